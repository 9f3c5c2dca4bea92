//! Edit command implementation
//!
//! Applies field, section and header edits to a document file. Structural
//! changes run first, then values, then the explicit title, so `--title` wins
//! over a title regenerated by a report-date change.

use super::{open_document, save_document, section_index, split_assignment};
use crate::core::document::DocumentEditor;
use crate::domain::Result;
use clap::Args;

/// Arguments for the edit command
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// Document to edit
    pub file: String,

    /// Patient field value as ID=VALUE (repeatable)
    #[arg(long = "set", value_name = "ID=VALUE")]
    pub fields: Vec<String>,

    /// Section content as N=TEXT, 1-based (repeatable)
    #[arg(long = "section", value_name = "N=TEXT")]
    pub sections: Vec<String>,

    /// Section heading as N=TITLE, 1-based (repeatable)
    #[arg(long = "section-title", value_name = "N=TITLE")]
    pub section_titles: Vec<String>,

    /// Document title
    #[arg(long)]
    pub title: Option<String>,

    /// Treating physician
    #[arg(long)]
    pub medico: Option<String>,

    /// Physician specialty
    #[arg(long)]
    pub especialidad: Option<String>,

    /// Append an empty section
    #[arg(long)]
    pub add_section: bool,

    /// Remove the section at N (1-based)
    #[arg(long, value_name = "N")]
    pub remove_section: Option<String>,

    /// Append an empty patient field
    #[arg(long)]
    pub add_field: bool,

    /// Put back the default patient fields (clears their values)
    #[arg(long)]
    pub restore_fields: bool,
}

impl EditArgs {
    /// Execute the edit command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let mut editor = match open_document(&self.file).await {
            Ok(editor) => editor,
            Err(e) => {
                println!("❌ Failed to open document: {e}");
                return Ok(1);
            }
        };

        let changes = match self.apply(&mut editor) {
            Ok(changes) => changes,
            Err(e) => {
                println!("❌ {e}");
                return Ok(1);
            }
        };

        if changes == 0 {
            println!("ℹ️  Nothing to change");
            return Ok(0);
        }

        save_document(&editor, &self.file).await?;
        tracing::info!(file = %self.file, changes, "Document edited");

        println!("✅ {changes} change(s) saved to {}", self.file);
        println!("   Title: {}", editor.title());
        let removed = editor.removed_default_patient_field_ids();
        if !removed.is_empty() {
            println!("   Removed default fields: {}", removed.join(", "));
        }
        Ok(0)
    }

    /// Apply every requested change; the editor is discarded on error
    fn apply(&self, editor: &mut DocumentEditor) -> Result<usize> {
        let mut changes = 0;

        if self.restore_fields {
            editor.restore_patient_defaults();
            changes += 1;
        }
        if self.add_field {
            editor.add_patient_field();
            changes += 1;
        }
        if self.add_section {
            editor.add_section();
            changes += 1;
        }
        if let Some(raw) = &self.remove_section {
            editor.remove_section(section_index(raw).map_err(invalid)?)?;
            changes += 1;
        }

        for raw in &self.fields {
            let (id, value) = split_assignment(raw).map_err(invalid)?;
            editor.set_field_value(id, value)?;
            changes += 1;
        }
        for raw in &self.section_titles {
            let (number, title) = split_assignment(raw).map_err(invalid)?;
            editor.set_section_title(section_index(number).map_err(invalid)?, title)?;
            changes += 1;
        }
        for raw in &self.sections {
            let (number, text) = split_assignment(raw).map_err(invalid)?;
            editor.set_section_content(section_index(number).map_err(invalid)?, text)?;
            changes += 1;
        }

        if let Some(medico) = &self.medico {
            editor.set_medico(medico.as_str());
            changes += 1;
        }
        if let Some(especialidad) = &self.especialidad {
            editor.set_especialidad(especialidad.as_str());
            changes += 1;
        }
        if let Some(title) = &self.title {
            editor.set_title(title.as_str());
            changes += 1;
        }

        Ok(changes)
    }
}

fn invalid(message: String) -> crate::domain::InformeError {
    crate::domain::InformeError::Validation(message)
}
