//! Document snapshot and import sanitization
//!
//! [`DocumentSnapshot`] is the persisted artifact: the full editable state of one
//! report, written as JSON on export. [`SnapshotPatch`] is what an import turns into
//! after sanitization: every member is typed, and members that were missing or of
//! the wrong shape are either defaulted or marked as "leave untouched".

use super::errors::InformeError;
use super::field::{FieldType, PatientField};
use super::ids::TemplateId;
use super::result::Result;
use super::section::Section;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Version tag written on export. Imports never check it.
pub const SNAPSHOT_VERSION: &str = "v13";

/// Full serializable state of one in-progress document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    /// Format tag
    pub version: String,

    /// Active template
    pub template: TemplateId,

    /// Displayed title, trimmed
    pub title: String,

    /// Patient rows in display order
    pub patient_fields: Vec<PatientField>,

    /// Default field ids the user deleted from the current field set
    #[serde(default)]
    pub removed_default_patient_field_ids: Vec<String>,

    /// Treating physician
    #[serde(default)]
    pub medico: String,

    /// Physician specialty
    #[serde(default)]
    pub especialidad: String,

    /// Clinical sections in display order
    pub sections: Vec<Section>,
}

impl DocumentSnapshot {
    /// Pretty-printed JSON payload (two-space indent) as written to export files
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Sanitized, strongly-typed view of an imported document
///
/// `None` means "the input did not carry a usable value, keep what the editor has".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnapshotPatch {
    /// Template to select, if a non-empty id was present
    pub template: Option<TemplateId>,

    /// Title member as found in the input
    pub title: ImportedTitle,

    /// Replacement patient rows, only when the input member was an array
    pub patient_fields: Option<Vec<PatientField>>,

    /// Replacement sections, only when the input member was an array
    pub sections: Option<Vec<Section>>,

    /// Treating physician (missing means empty)
    pub medico: String,

    /// Physician specialty (missing means empty)
    pub especialidad: String,
}

impl SnapshotPatch {
    /// Parse and sanitize an import payload
    ///
    /// # Errors
    ///
    /// Returns [`InformeError::Format`] when the text is not JSON or not a JSON object.
    /// Any object is accepted; unrecognized members are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| InformeError::Format(format!("not valid JSON: {e}")))?;
        match value {
            Value::Object(map) => Ok(Self::from_object(&map)),
            other => Err(InformeError::Format(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Sanitize an arbitrary JSON value; non-objects yield an empty patch
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self::from_object(map),
            _ => Self::default(),
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        let template = match map.get("template") {
            Some(Value::String(s)) => TemplateId::new(s.as_str()).ok(),
            Some(Value::Number(n)) => TemplateId::new(n.to_string()).ok(),
            _ => None,
        };

        let title = ImportedTitle::from_member(map.get("title"));

        let patient_fields = match map.get("patientFields") {
            Some(Value::Array(items)) => Some(items.iter().map(sanitize_field).collect()),
            _ => None,
        };

        let sections = match map.get("sections") {
            Some(Value::Array(items)) => Some(items.iter().map(sanitize_section).collect()),
            _ => None,
        };

        Self {
            template,
            title,
            patient_fields,
            sections,
            medico: map.get("medico").map(coerce_string).unwrap_or_default(),
            especialidad: map.get("especialidad").map(coerce_string).unwrap_or_default(),
        }
    }
}

/// Title member of an import
///
/// Only a string replaces the current title. Absent and falsy values (`null`,
/// `false`, `0`) leave it alone but still let an evolution title be regenerated;
/// any other value leaves it alone entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImportedTitle {
    #[default]
    Missing,
    Text(String),
    Unusable,
}

impl ImportedTitle {
    fn from_member(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => ImportedTitle::Missing,
            Some(Value::Number(n)) if n.as_f64() == Some(0.0) => ImportedTitle::Missing,
            Some(Value::String(s)) => ImportedTitle::Text(s.clone()),
            Some(_) => ImportedTitle::Unusable,
        }
    }

    /// The new title, when the input carried a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ImportedTitle::Text(title) => Some(title),
            _ => None,
        }
    }

    /// Whether the input left no title of its own (absent, falsy or empty)
    pub fn is_blank(&self) -> bool {
        match self {
            ImportedTitle::Missing => true,
            ImportedTitle::Text(title) => title.is_empty(),
            ImportedTitle::Unusable => false,
        }
    }
}

impl From<DocumentSnapshot> for SnapshotPatch {
    fn from(snapshot: DocumentSnapshot) -> Self {
        Self {
            template: Some(snapshot.template),
            title: ImportedTitle::Text(snapshot.title),
            patient_fields: Some(snapshot.patient_fields),
            sections: Some(snapshot.sections),
            medico: snapshot.medico,
            especialidad: snapshot.especialidad,
        }
    }
}

fn sanitize_field(value: &Value) -> PatientField {
    let member = |key: &str| value.get(key).map(coerce_string).unwrap_or_default();
    PatientField {
        label: member("label"),
        id: member("id"),
        field_type: FieldType::coerce(&member("type")),
        value: member("value"),
        placeholder: member("placeholder"),
    }
}

fn sanitize_section(value: &Value) -> Section {
    let member = |key: &str| value.get(key).map(coerce_string).unwrap_or_default();
    Section {
        title: member("title"),
        content: member("content"),
    }
}

/// Scalars become their text form; null, arrays and objects become empty
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "true".to_string(),
        _ => String::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
