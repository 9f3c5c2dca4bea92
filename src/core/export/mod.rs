//! Document export and import
//!
//! This module moves whole documents in and out of the editor:
//! - [`naming`] - export file names derived from the title and patient
//! - [`file`] - sink/source seams and their filesystem implementations
//!
//! Export writes the snapshot as pretty JSON. Import parses and sanitizes the text
//! first, so a malformed file never touches the editor.

pub mod file;
pub mod naming;

pub use file::{DocumentSink, DocumentSource, FileSink, FileSource, SaveOutcome};
pub use naming::{build_export_name, ensure_json_extension, export_file_name, export_label};

use crate::core::document::{Container, DocumentEditor};
use crate::domain::{PatientField, Result, Section, SnapshotPatch};

/// Serialize the editor's snapshot and hand it to `sink`
///
/// # Errors
///
/// Returns an error when serialization or the sink's write fails. A declined
/// save comes back as `Ok(SaveOutcome::Cancelled)`.
pub async fn export_document<P, S, K>(
    editor: &DocumentEditor<P, S>,
    sink: &K,
) -> Result<SaveOutcome>
where
    P: Container<PatientField>,
    S: Container<Section>,
    K: DocumentSink + ?Sized,
{
    let snapshot = editor.snapshot();
    let payload = snapshot.to_json_pretty()?;
    let name = export_file_name(&snapshot);

    tracing::info!(
        template = %snapshot.template,
        file_name = %name,
        sections = snapshot.sections.len(),
        "Exporting document"
    );

    let outcome = sink.save(payload.as_bytes(), &name).await?;
    if outcome == SaveOutcome::Cancelled {
        tracing::info!(file_name = %name, "Export cancelled");
    }
    Ok(outcome)
}

/// Read a document from `source` and apply it to the editor
///
/// Returns `false` when nothing was picked.
///
/// # Errors
///
/// Returns [`crate::domain::InformeError::Format`] for malformed JSON, leaving the
/// editor exactly as it was, or the source's read error.
pub async fn import_document<P, S, R>(editor: &mut DocumentEditor<P, S>, source: &R) -> Result<bool>
where
    P: Container<PatientField>,
    S: Container<Section>,
    R: DocumentSource + ?Sized,
{
    let Some(text) = source.import_text().await? else {
        tracing::debug!("Import cancelled, nothing picked");
        return Ok(false);
    };

    let patch = SnapshotPatch::parse(&text).map_err(|e| {
        crate::log_error_with_context!(&e, "Rejected import");
        e
    })?;
    editor.apply(patch);
    Ok(true)
}
