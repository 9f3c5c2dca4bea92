//! Domain identifier types
//!
//! Template identifiers are the values of the report-type selector ("1".."6").
//! Unknown identifiers are legal: the catalog maps them to its defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Report template identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use informe::domain::ids::TemplateId;
///
/// let id = TemplateId::new(" 6 ").unwrap();
/// assert_eq!(id.as_str(), "6");
/// assert!(!id.is_evolution());
/// assert!(TemplateId::evolution().is_evolution());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemplateId(String);

impl TemplateId {
    /// Identifier of the daily evolution note, the editor's starting template
    pub const EVOLUTION: &'static str = "2";

    /// Creates a new TemplateId, trimming surrounding whitespace
    ///
    /// # Returns
    ///
    /// Returns `Err` if the identifier is blank
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Template ID cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The evolution-note template
    pub fn evolution() -> Self {
        Self(Self::EVOLUTION.to_string())
    }

    /// Whether this is the evolution-note template (auto-dated title)
    pub fn is_evolution(&self) -> bool {
        self.0 == Self::EVOLUTION
    }

    /// Returns the template ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for TemplateId {
    fn default() -> Self {
        Self::evolution()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemplateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TemplateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id_valid() {
        let id = TemplateId::new("6").unwrap();
        assert_eq!(id.as_str(), "6");
        assert_eq!(id.to_string(), "6");
    }

    #[test]
    fn test_template_id_trims() {
        let id = TemplateId::from_str("  2\n").unwrap();
        assert!(id.is_evolution());
    }

    #[test]
    fn test_template_id_empty() {
        assert!(TemplateId::new("").is_err());
        assert!(TemplateId::new("   ").is_err());
    }

    #[test]
    fn test_template_id_default_is_evolution() {
        assert_eq!(TemplateId::default(), TemplateId::evolution());
    }

    #[test]
    fn test_template_id_serialization_is_transparent_string() {
        let id = TemplateId::new("3").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"3\"");
        let back: TemplateId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
