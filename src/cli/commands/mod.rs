//! CLI command implementations
//!
//! Document commands read and write the JSON document format through the same
//! sink/source pair the library exposes, so a file written by `informe new` can
//! be imported anywhere else and vice versa.

pub mod ask;
pub mod edit;
pub mod init;
pub mod new;
pub mod prefs;
pub mod print;
pub mod show;
pub mod template;
pub mod validate;

use crate::config::{load_config_or_default, InformeConfig};
use crate::core::catalog;
use crate::core::document::DocumentEditor;
use crate::core::export::{export_document, import_document, FileSink, FileSource, SaveOutcome};
use crate::domain::{InformeError, Result, TemplateId};

/// Load the configuration, printing the failure for the user
///
/// `None` means the command should exit with the configuration error code.
pub(crate) fn load_config_or_report(config_path: &str) -> Option<InformeConfig> {
    match load_config_or_default(config_path) {
        Ok(config) => Some(config),
        Err(e) => {
            println!("❌ Failed to load configuration");
            println!("   Error: {e}");
            None
        }
    }
}

/// Read a document file into a fresh editor
pub(crate) async fn open_document(path: &str) -> Result<DocumentEditor> {
    let mut editor = DocumentEditor::new();
    if !import_document(&mut editor, &FileSource::new(path)).await? {
        return Err(InformeError::Validation(format!("No document at {path}")));
    }
    Ok(editor)
}

/// Write the editor back to `path`, replacing the previous contents
pub(crate) async fn save_document(editor: &DocumentEditor, path: &str) -> Result<SaveOutcome> {
    export_document(editor, &FileSink::at_path(path).with_overwrite(true)).await
}

/// Parse a template id that must exist in the catalog
pub(crate) fn parse_template(raw: &str) -> std::result::Result<TemplateId, String> {
    let template = TemplateId::new(raw)?;
    if catalog::is_known(&template) {
        Ok(template)
    } else {
        Err(format!(
            "Unknown template '{raw}'. Run `informe template --list` to see the options"
        ))
    }
}

/// Split a `KEY=VALUE` argument
pub(crate) fn split_assignment(raw: &str) -> std::result::Result<(&str, &str), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim(), value))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("Expected KEY=VALUE, got '{raw}'"))
}

/// Parse a 1-based section number from the command line into an index
pub(crate) fn section_index(raw: &str) -> std::result::Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(format!("Section numbers start at 1, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_template() {
        assert_eq!(parse_template(" 6 ").unwrap().as_str(), "6");
        assert!(parse_template("9").is_err());
        assert!(parse_template("").is_err());
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("nombre=Ana = B").unwrap(), ("nombre", "Ana = B"));
        assert_eq!(split_assignment("rut=").unwrap(), ("rut", ""));
        assert!(split_assignment("=x").is_err());
        assert!(split_assignment("nombre").is_err());
    }

    #[test]
    fn test_section_index() {
        assert_eq!(section_index("1").unwrap(), 0);
        assert_eq!(section_index("5").unwrap(), 4);
        assert!(section_index("0").is_err());
        assert!(section_index("x").is_err());
    }

    #[tokio::test]
    async fn test_save_then_open_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let path = path.to_str().unwrap();

        let mut editor = DocumentEditor::new();
        editor.set_field_value("nombre", "Ana Tuki").unwrap();
        assert!(save_document(&editor, path).await.unwrap().is_saved());
        assert!(save_document(&editor, path).await.unwrap().is_saved());

        let reopened = open_document(path).await.unwrap();
        assert_eq!(reopened.patient_name(), "Ana Tuki");
    }

    #[tokio::test]
    async fn test_open_missing_document_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");
        assert!(open_document(path.to_str().unwrap()).await.is_err());
    }
}
