//! Clinical context sent with every assistant request

use crate::core::text::collapse_blank_lines;
use crate::domain::DocumentSnapshot;

/// Flatten the whole document into the text block the assistant reads
///
/// ```
/// use informe::assistant::context::build_context;
/// use informe::core::document::DocumentEditor;
///
/// let mut editor = DocumentEditor::new();
/// editor.set_field_value("nombre", "Ana Tuki").unwrap();
/// let context = build_context(&editor.snapshot());
///
/// assert!(context.starts_with("TÍTULO\nEvolución médica (____) - Hospital Hanga Roa\n\nDATOS DEL PACIENTE\nNombre: Ana Tuki\n"));
/// assert!(context.contains("SECCIONES CLÍNICAS\nAntecedentes\n"));
/// ```
pub fn build_context(snapshot: &DocumentSnapshot) -> String {
    let patient_block = snapshot
        .patient_fields
        .iter()
        .map(|field| format!("{}: {}", field.display_label(), field.value))
        .collect::<Vec<_>>()
        .join("\n");

    let sections_block = snapshot
        .sections
        .iter()
        .map(|section| format!("{}\n{}", section.title, section.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut medico_block = Vec::new();
    if !snapshot.medico.is_empty() {
        medico_block.push(format!("Médico tratante: {}", snapshot.medico));
    }
    if !snapshot.especialidad.is_empty() {
        medico_block.push(format!("Especialidad: {}", snapshot.especialidad));
    }

    let context = format!(
        "TÍTULO\n{}\n\nDATOS DEL PACIENTE\n{patient_block}\n\nSECCIONES CLÍNICAS\n{sections_block}\n\n{}",
        snapshot.title,
        medico_block.join("\n")
    );
    collapse_blank_lines(&context)
}
