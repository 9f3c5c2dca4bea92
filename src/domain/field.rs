//! Patient field model
//!
//! A patient field is one labelled input row of the patient block (name, birth
//! date, age...). Rows are ordered; `id` is a stable key for the default rows and
//! may be empty for rows the user added.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Input type of a patient field
///
/// Anything other than `text`, `date` or `number` is coerced to `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Date,
    Number,
}

impl FieldType {
    /// Coerce a raw type name into a field type
    ///
    /// ```
    /// use informe::domain::FieldType;
    ///
    /// assert_eq!(FieldType::coerce("date"), FieldType::Date);
    /// assert_eq!(FieldType::coerce("checkbox"), FieldType::Text);
    /// ```
    pub fn coerce(raw: &str) -> Self {
        match raw {
            "date" => FieldType::Date,
            "number" => FieldType::Number,
            _ => FieldType::Text,
        }
    }

    /// Type name as written in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Date => "date",
            FieldType::Number => "number",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(FieldType::coerce(&raw))
    }
}

/// One patient field row
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatientField {
    /// Visible, user-editable label
    #[serde(default)]
    pub label: String,

    /// Stable key (empty for custom rows)
    #[serde(default)]
    pub id: String,

    /// Input type
    #[serde(default, rename = "type")]
    pub field_type: FieldType,

    /// Current value
    #[serde(default)]
    pub value: String,

    /// Placeholder hint
    #[serde(default)]
    pub placeholder: String,
}

impl PatientField {
    /// Creates an empty field with the given label, id and type
    pub fn new(label: impl Into<String>, id: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            label: label.into(),
            id: id.into(),
            field_type,
            value: String::new(),
            placeholder: String::new(),
        }
    }

    /// Sets the placeholder
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Label shown to readers; falls back to the id for unlabelled rows
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }
}
