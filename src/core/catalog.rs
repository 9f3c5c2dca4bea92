//! Template catalog
//!
//! Maps a template identifier to its canonical section skeleton, its title
//! formatting rule and the base name used for exported and printed files. The
//! catalog tables are `static`; every lookup hands back owned copies so callers
//! can't reach the tables through a returned value.

use crate::core::dates::format_date_dmy;
use crate::domain::{FieldType, PatientField, Section, TemplateId};
use serde::Serialize;

/// Institution suffix appended to most titles
pub const HOSPITAL_SUFFIX: &str = " - Hospital Hanga Roa";

/// Title used for unknown templates
pub const DEFAULT_TITLE: &str = "Registro clínico - Hospital Hanga Roa";

/// Base file name used for unknown templates
pub const DEFAULT_BASE_NAME: &str = "Registro Clinico";

/// Field id holding the patient's name
pub const FIELD_NAME: &str = "nombre";
/// Field id holding the birth date
pub const FIELD_BIRTH_DATE: &str = "fecnac";
/// Field id holding the derived age
pub const FIELD_AGE: &str = "edad";
/// Field id holding the report date
pub const FIELD_REPORT_DATE: &str = "finf";

const GENERAL_EVOLUTION_SECTIONS: &[&str] = &[
    "Antecedentes",
    "Historia y evolución clínica",
    "Exámenes complementarios",
    "Diagnósticos",
    "Plan",
];

const MEDICAL_REPORT_SECTIONS: &[&str] = &["Antecedentes", ""];

// (label, id, type, placeholder)
const DEFAULT_PATIENT_FIELDS: &[(&str, &str, FieldType, &str)] = &[
    ("Nombre", FIELD_NAME, FieldType::Text, "Nombre Apellido"),
    ("Rut", "rut", FieldType::Text, ""),
    ("Fecha de nacimiento", FIELD_BIRTH_DATE, FieldType::Date, ""),
    ("Edad", FIELD_AGE, FieldType::Number, "años"),
    ("Fecha de ingreso", "fing", FieldType::Date, ""),
    ("Fecha del informe", FIELD_REPORT_DATE, FieldType::Date, ""),
];

// (id, selector label, base name)
const TEMPLATES: &[(&str, &str, &str)] = &[
    ("1", "Informe médico de traslado", "Informe medico"),
    ("2", "Evolución médica", "Evolucion medica"),
    ("3", "Epicrisis médica", "Epicrisis"),
    ("4", "Epicrisis médica de traslado", "Epicrisis traslado"),
    ("5", "Registro clínico - título libre", "Registro Clinico"),
    ("6", "Informe médico", "Informe medico"),
];

/// Selectable template entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateDescriptor {
    /// Selector value
    pub id: TemplateId,

    /// Selector display text
    pub label: String,

    /// Base name for exported/printed files
    pub base_name: String,
}

/// All selectable templates in selector order
pub fn templates() -> Vec<TemplateDescriptor> {
    TEMPLATES
        .iter()
        .filter_map(|(id, label, base)| {
            Some(TemplateDescriptor {
                id: TemplateId::new(*id).ok()?,
                label: label.to_string(),
                base_name: base.to_string(),
            })
        })
        .collect()
}

/// Whether the id is one of the selectable templates
pub fn is_known(template: &TemplateId) -> bool {
    TEMPLATES.iter().any(|(id, _, _)| *id == template.as_str())
}

/// Canonical section skeleton (titles only, empty content)
///
/// Only the medical report ("6") has its own shape; every other id, unknown ones
/// included, gets the five-section general evolution shape.
///
/// ```
/// use informe::core::catalog::skeleton_for;
/// use informe::domain::TemplateId;
///
/// let skeleton = skeleton_for(&TemplateId::new("6").unwrap());
/// assert_eq!(skeleton.len(), 2);
/// assert!(skeleton.iter().all(|s| s.content.is_empty()));
/// ```
pub fn skeleton_for(template: &TemplateId) -> Vec<Section> {
    let titles = match template.as_str() {
        "6" => MEDICAL_REPORT_SECTIONS,
        _ => GENERAL_EVOLUTION_SECTIONS,
    };
    titles.iter().map(|title| Section::titled(*title)).collect()
}

/// The general evolution skeleton
pub fn default_sections() -> Vec<Section> {
    skeleton_for(&TemplateId::evolution())
}

/// Title for a template; the evolution note embeds the report date
///
/// Template "5" intentionally has no title so the user can type one.
pub fn title_for(template: &TemplateId, report_date: &str) -> String {
    match template.as_str() {
        "1" => format!("Informe médico de traslado{HOSPITAL_SUFFIX}"),
        "2" => format!(
            "Evolución médica ({}){HOSPITAL_SUFFIX}",
            format_date_dmy(report_date)
        ),
        "3" => "Epicrisis médica".to_string(),
        "4" => "Epicrisis médica de traslado".to_string(),
        "5" => String::new(),
        "6" => format!("Informe médico{HOSPITAL_SUFFIX}"),
        _ => DEFAULT_TITLE.to_string(),
    }
}

/// Base name for file names, independent of title formatting
pub fn base_name_for(template: &TemplateId) -> String {
    TEMPLATES
        .iter()
        .find(|(id, _, _)| *id == template.as_str())
        .map(|(_, _, base)| base.to_string())
        .unwrap_or_else(|| DEFAULT_BASE_NAME.to_string())
}

/// Selector display label; unknown ids have none
pub fn label_for(template: &TemplateId) -> Option<String> {
    TEMPLATES
        .iter()
        .find(|(id, _, _)| *id == template.as_str())
        .map(|(_, label, _)| label.to_string())
}

/// The canonical patient rows, empty values
pub fn default_patient_fields() -> Vec<PatientField> {
    DEFAULT_PATIENT_FIELDS
        .iter()
        .map(|(label, id, field_type, placeholder)| {
            PatientField::new(*label, *id, *field_type).with_placeholder(*placeholder)
        })
        .collect()
}

/// Ids of the canonical patient rows, in order
pub fn default_patient_field_ids() -> Vec<String> {
    DEFAULT_PATIENT_FIELDS
        .iter()
        .map(|(_, id, _, _)| id.to_string())
        .filter(|id| !id.is_empty())
        .collect()
}
