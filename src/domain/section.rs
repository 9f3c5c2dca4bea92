//! Clinical section model

use serde::{Deserialize, Serialize};

/// One free-text clinical section
///
/// Sections have no key of their own: their position in the document is their
/// identity.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Section {
    /// Heading (may be blank)
    #[serde(default)]
    pub title: String,

    /// Body text
    #[serde(default)]
    pub content: String,
}

impl Section {
    /// Creates a section with a title and content
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Creates a skeleton entry: a title with empty content
    pub fn titled(title: impl Into<String>) -> Self {
        Self::new(title, "")
    }

    /// Whether the title is empty or whitespace only
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}
