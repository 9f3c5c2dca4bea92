//! Printable output
//!
//! Printing produces two things: a suggested file name for the printed document and
//! a plain-text rendering of the report.

use crate::core::catalog;
use crate::core::dates::format_dmy_dashed;
use crate::core::text::{collapse_blank_lines, strip_accents};
use crate::domain::{DocumentSnapshot, TemplateId};
use chrono::NaiveDate;

/// Suggested name for a printed document: `base - patient - dd-mm-yy`
///
/// Accents are stripped and anything outside `[A-Za-z0-9 _-]` is dropped. An empty
/// patient name is skipped. Falls back to the template's base name if nothing
/// survives sanitizing.
///
/// ```
/// use informe::core::print::suggested_print_name;
/// use informe::domain::TemplateId;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
/// let name = suggested_print_name(&TemplateId::new("3").unwrap(), "José Pakarati", today);
/// assert_eq!(name, "Epicrisis - Jose Pakarati - 15-06-24");
/// ```
pub fn suggested_print_name(template: &TemplateId, patient_name: &str, today: NaiveDate) -> String {
    let base = catalog::base_name_for(template);
    let date = format_dmy_dashed(today);
    let joined = [base.as_str(), patient_name.trim(), date.as_str()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" - ");

    let sanitized: String = strip_accents(&joined)
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();

    if sanitized.is_empty() {
        base
    } else {
        sanitized
    }
}

/// Plain-text rendering of a document as it would appear on paper
///
/// Rows with an empty value and sections with neither title nor content are left
/// out. The physician block only appears when one of its values is set.
pub fn render_plain_text(snapshot: &DocumentSnapshot) -> String {
    let mut out = String::new();

    if !snapshot.title.is_empty() {
        out.push_str(&snapshot.title);
        out.push_str("\n\n");
    }

    for field in &snapshot.patient_fields {
        if field.value.trim().is_empty() {
            continue;
        }
        out.push_str(&format!("{}: {}\n", field.display_label(), field.value.trim()));
    }
    out.push('\n');

    for section in &snapshot.sections {
        let title = section.title.trim();
        let content = section.content.trim_end();
        if title.is_empty() && content.trim().is_empty() {
            continue;
        }
        if !title.is_empty() {
            out.push_str(&title.to_uppercase());
            out.push('\n');
        }
        out.push_str(content);
        out.push_str("\n\n");
    }

    let medico = snapshot.medico.trim();
    let especialidad = snapshot.especialidad.trim();
    if !medico.is_empty() || !especialidad.is_empty() {
        out.push_str(&format!("Médico tratante: {medico}\nEspecialidad: {especialidad}\n"));
    }

    collapse_blank_lines(&out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::DocumentEditor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 9).unwrap()
    }

    #[test]
    fn test_print_name_without_patient() {
        let name = suggested_print_name(&TemplateId::evolution(), "   ", today());
        assert_eq!(name, "Evolucion medica - 09-01-24");
    }

    #[test]
    fn test_print_name_drops_symbols() {
        let name = suggested_print_name(&TemplateId::new("6").unwrap(), "Ana (Tuki)", today());
        assert_eq!(name, "Informe medico - Ana Tuki - 09-01-24");
    }

    #[test]
    fn test_print_name_unknown_template() {
        let name = suggested_print_name(&TemplateId::new("x").unwrap(), "", today());
        assert_eq!(name, "Registro Clinico - 09-01-24");
    }

    #[test]
    fn test_render_plain_text() {
        let mut editor = DocumentEditor::new();
        editor.set_field_value("nombre", "Ana Tuki").unwrap();
        editor.set_field_value("finf", "2024-01-09").unwrap();
        editor.set_section_content(0, "HTA").unwrap();
        editor.set_section_content(4, "Control en 7 días\n").unwrap();
        editor.set_medico("Dr. Hotus");

        let text = render_plain_text(&editor.snapshot());
        assert!(text.starts_with("Evolución médica (09/01/24) - Hospital Hanga Roa\n\nNombre: Ana Tuki\n"));
        assert!(text.contains("ANTECEDENTES\nHTA\n\n"));
        assert!(text.contains("PLAN\nControl en 7 días"));
        assert!(!text.contains("Rut:"));
        assert!(text.ends_with("Médico tratante: Dr. Hotus\nEspecialidad:"));
    }
}
