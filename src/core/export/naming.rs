//! Export file naming
//!
//! The exported file is named after what the user sees: the displayed title
//! without the institution suffix, then the patient's name.

use crate::core::catalog::{self, FIELD_NAME, FIELD_REPORT_DATE};
use crate::core::dates::{format_date_dmy, MISSING_DATE};
use crate::core::text::sanitize_filename;
use crate::domain::DocumentSnapshot;
use regex::Regex;
use std::sync::OnceLock;

/// Name used when neither a label nor a patient name is available
pub const FALLBACK_EXPORT_NAME: &str = "registro_clinico";

const FALLBACK_LABEL: &str = "Registro clínico";

fn hospital_suffix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\s*-\s*Hospital Hanga Roa$").expect("hard-coded pattern is valid")
    })
}

fn member_value<'a>(snapshot: &'a DocumentSnapshot, id: &str) -> &'a str {
    snapshot
        .patient_fields
        .iter()
        .find(|field| field.id == id)
        .map(|field| field.value.as_str())
        .unwrap_or("")
}

/// Document label: the title without the institution suffix
///
/// An empty title falls back to the template's selector label up to its first
/// `-`, followed by the report date when there is one.
pub fn export_label(snapshot: &DocumentSnapshot) -> String {
    let title = snapshot.title.trim();
    let label = hospital_suffix().replace(title, "").trim().to_string();
    if !label.is_empty() {
        return label;
    }

    let fallback = catalog::label_for(&snapshot.template)
        .and_then(|label| label.split('-').next().map(|part| part.trim().to_string()))
        .filter(|part| !part.is_empty())
        .unwrap_or_else(|| FALLBACK_LABEL.to_string());

    let date = format_date_dmy(member_value(snapshot, FIELD_REPORT_DATE));
    if date == MISSING_DATE {
        fallback
    } else {
        format!("{fallback} ({date})")
    }
}

/// Label and patient name joined by ` - `, unsanitized
///
/// ```
/// use informe::core::document::DocumentEditor;
/// use informe::core::export::build_export_name;
///
/// let mut editor = DocumentEditor::new();
/// editor.set_field_value("nombre", " Ana Tuki ").unwrap();
/// editor.set_field_value("finf", "2024-03-02").unwrap();
///
/// assert_eq!(build_export_name(&editor.snapshot()), "Evolución médica (02/03/24) - Ana Tuki");
/// ```
pub fn build_export_name(snapshot: &DocumentSnapshot) -> String {
    let parts: Vec<String> = [
        export_label(snapshot),
        member_value(snapshot, FIELD_NAME).trim().to_string(),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        FALLBACK_EXPORT_NAME.to_string()
    } else {
        parts.join(" - ")
    }
}

/// Append `.json` unless the name already ends with it (any case)
pub fn ensure_json_extension(name: &str) -> String {
    if name.to_ascii_lowercase().ends_with(".json") {
        name.to_string()
    } else {
        format!("{name}.json")
    }
}

/// File name offered to the sink: sanitized export name with a `.json` extension
pub fn export_file_name(snapshot: &DocumentSnapshot) -> String {
    let sanitized = sanitize_filename(&build_export_name(snapshot));
    if sanitized.is_empty() {
        ensure_json_extension(FALLBACK_EXPORT_NAME)
    } else {
        ensure_json_extension(&sanitized)
    }
}
