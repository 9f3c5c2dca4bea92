//! Print command implementation
//!
//! Renders a document as plain text. With `--save-dir` the text is written
//! under the suggested print name instead of going to stdout.

use super::open_document;
use crate::core::dates;
use crate::core::export::{DocumentSink, FileSink, SaveOutcome};
use crate::core::print::{render_plain_text, suggested_print_name};
use clap::Args;

/// Arguments for the print command
#[derive(Args, Debug)]
pub struct PrintArgs {
    /// Document to print
    pub file: String,

    /// Write `<suggested name>.txt` into this directory
    #[arg(long)]
    pub save_dir: Option<String>,

    /// Only print the suggested file name
    #[arg(long, conflicts_with = "save_dir")]
    pub name_only: bool,

    /// Overwrite an existing printout
    #[arg(long)]
    pub force: bool,
}

impl PrintArgs {
    /// Execute the print command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let editor = match open_document(&self.file).await {
            Ok(editor) => editor,
            Err(e) => {
                println!("❌ Failed to open document: {e}");
                return Ok(1);
            }
        };

        let name = suggested_print_name(editor.template(), &editor.patient_name(), dates::today());
        if self.name_only {
            println!("{name}");
            return Ok(0);
        }

        let text = render_plain_text(&editor.snapshot());
        let Some(dir) = &self.save_dir else {
            println!("{text}");
            return Ok(0);
        };

        let sink = FileSink::in_directory(dir).with_overwrite(self.force);
        match sink.save(text.as_bytes(), &format!("{name}.txt")).await? {
            SaveOutcome::Saved(path) => {
                println!("🖨️  Printout written: {}", path.display());
                Ok(0)
            }
            SaveOutcome::Cancelled => {
                println!("❌ {name}.txt already exists in {dir}");
                println!("   Use --force to overwrite");
                Ok(1)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::save_document;
    use crate::core::document::DocumentEditor;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_print_to_directory() {
        let dir = TempDir::new().unwrap();
        let doc = dir.path().join("doc.json").to_string_lossy().to_string();
        let mut editor = DocumentEditor::new();
        editor.change_template(crate::domain::TemplateId::new("3").unwrap());
        editor.set_field_value("nombre", "José Pakarati").unwrap();
        editor.set_section_content(0, "Ingresa por disnea").unwrap();
        save_document(&editor, &doc).await.unwrap();

        let out_dir = dir.path().join("print");
        let args = PrintArgs {
            file: doc.clone(),
            save_dir: Some(out_dir.to_string_lossy().to_string()),
            name_only: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert_eq!(args.execute().await.unwrap(), 1);

        let written: Vec<_> = std::fs::read_dir(&out_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("Epicrisis - Jose Pakarati - "));
        assert!(written[0].ends_with(".txt"));

        let text = std::fs::read_to_string(out_dir.join(&written[0])).unwrap();
        assert!(text.contains("Ingresa por disnea"));
    }
}
