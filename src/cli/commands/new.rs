//! New command implementation
//!
//! Creates a fresh document for a template and saves it as JSON.

use super::{load_config_or_report, parse_template};
use crate::core::catalog::{FIELD_BIRTH_DATE, FIELD_NAME, FIELD_REPORT_DATE};
use crate::core::dates::is_iso_date;
use crate::core::document::DocumentEditor;
use crate::core::export::{export_document, DocumentSink, FileSink, SaveOutcome};
use clap::Args;

/// Arguments for the new command
#[derive(Args, Debug)]
pub struct NewArgs {
    /// Template id (defaults to document.default_template)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Patient name
    #[arg(long)]
    pub patient: Option<String>,

    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Report date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Exact output path; defaults to the export name inside document.output_dir
    #[arg(short, long)]
    pub output: Option<String>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl NewArgs {
    /// Execute the new command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_config_or_report(config_path) else {
            return Ok(2);
        };

        let template = match &self.template {
            Some(raw) => match parse_template(raw) {
                Ok(t) => t,
                Err(e) => {
                    println!("❌ {e}");
                    return Ok(1);
                }
            },
            None => config.document.template(),
        };

        for (flag, value) in [("--birth-date", &self.birth_date), ("--date", &self.date)] {
            if let Some(value) = value.as_deref().filter(|v| !is_iso_date(v)) {
                println!("❌ {flag} must be a date in YYYY-MM-DD format, got '{value}'");
                return Ok(1);
            }
        }

        tracing::info!(template = %template, "Creating document");

        let mut editor = DocumentEditor::new();
        if &template != editor.template() {
            editor.change_template(template);
        }
        for (id, value) in [
            (FIELD_NAME, &self.patient),
            (FIELD_BIRTH_DATE, &self.birth_date),
            (FIELD_REPORT_DATE, &self.date),
        ] {
            if let Some(value) = value {
                editor.set_field_value(id, value.as_str())?;
            }
        }

        let overwrite = self.force || config.document.overwrite;
        let sink = match &self.output {
            Some(path) => FileSink::at_path(path),
            None => FileSink::in_directory(&config.document.output_dir),
        }
        .with_overwrite(overwrite);

        Self::write(&editor, &sink).await
    }

    async fn write<K: DocumentSink>(editor: &DocumentEditor, sink: &K) -> anyhow::Result<i32> {
        match export_document(editor, sink).await? {
            SaveOutcome::Saved(path) => {
                println!("✅ Document created: {}", path.display());
                println!("   Template: {}", editor.template());
                println!("   Title: {}", editor.title());
                println!("   Sections: {}", editor.sections().len());
                Ok(0)
            }
            SaveOutcome::Cancelled => {
                println!("❌ A document with that name already exists");
                println!("   Use --force to overwrite or --output to pick another path");
                Ok(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::open_document;
    use tempfile::TempDir;

    fn args(dir: &TempDir) -> NewArgs {
        NewArgs {
            template: Some("6".to_string()),
            patient: Some("Ana Tuki".to_string()),
            birth_date: Some("1990-03-01".to_string()),
            date: Some("2024-06-15".to_string()),
            output: Some(dir.path().join("doc.json").to_string_lossy().to_string()),
            force: false,
        }
    }

    #[tokio::test]
    async fn test_new_writes_document() {
        let dir = TempDir::new().unwrap();
        let code = args(&dir).execute("nonexistent-informe.toml").await.unwrap();
        assert_eq!(code, 0);

        let editor = open_document(dir.path().join("doc.json").to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(editor.template().as_str(), "6");
        assert_eq!(editor.patient_name(), "Ana Tuki");
        assert_eq!(editor.report_date(), "2024-06-15");
    }

    #[tokio::test]
    async fn test_new_refuses_existing_file_without_force() {
        let dir = TempDir::new().unwrap();
        assert_eq!(args(&dir).execute("nonexistent-informe.toml").await.unwrap(), 0);
        assert_eq!(args(&dir).execute("nonexistent-informe.toml").await.unwrap(), 1);

        let mut forced = args(&dir);
        forced.force = true;
        assert_eq!(forced.execute("nonexistent-informe.toml").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_new_rejects_bad_input() {
        let dir = TempDir::new().unwrap();
        let mut bad_template = args(&dir);
        bad_template.template = Some("42".to_string());
        assert_eq!(bad_template.execute("nonexistent-informe.toml").await.unwrap(), 1);

        let mut bad_date = args(&dir);
        bad_date.date = Some("15/06/2024".to_string());
        assert_eq!(bad_date.execute("nonexistent-informe.toml").await.unwrap(), 1);
        assert!(!dir.path().join("doc.json").exists());
    }
}
