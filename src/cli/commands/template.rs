//! Template command implementation
//!
//! Lists the catalog or switches a document to another template. Switching keeps
//! the written section content through reconciliation.

use super::{open_document, parse_template, save_document};
use crate::core::catalog;
use clap::Args;

/// Arguments for the template command
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Document to change
    pub file: Option<String>,

    /// Template id to switch to
    #[arg(long, requires = "file")]
    pub to: Option<String>,
}

impl TemplateArgs {
    /// Execute the template command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let (Some(file), Some(to)) = (&self.file, &self.to) else {
            return self.list().await;
        };

        let template = match parse_template(to) {
            Ok(t) => t,
            Err(e) => {
                println!("❌ {e}");
                return Ok(1);
            }
        };

        let mut editor = match open_document(file).await {
            Ok(editor) => editor,
            Err(e) => {
                println!("❌ Failed to open document: {e}");
                return Ok(1);
            }
        };

        let before = editor.sections().len();
        editor.change_template(template);
        save_document(&editor, file).await?;

        println!("✅ Template changed to {}", editor.template());
        println!("   Title: {}", editor.title());
        println!("   Sections: {} -> {}", before, editor.sections().len());
        for (i, section) in editor.sections().iter().enumerate() {
            let marker = if section.content.trim().is_empty() { " " } else { "•" };
            println!("   {marker} {}. {}", i + 1, section.title);
        }
        Ok(0)
    }

    async fn list(&self) -> anyhow::Result<i32> {
        let active = match &self.file {
            Some(file) => match open_document(file).await {
                Ok(editor) => Some(editor.template().clone()),
                Err(e) => {
                    println!("❌ Failed to open document: {e}");
                    return Ok(1);
                }
            },
            None => None,
        };

        println!("📋 Templates");
        println!();
        for template in catalog::templates() {
            let marker = if active.as_ref() == Some(&template.id) { "▶" } else { " " };
            println!("  {marker} {}  {}", template.id, template.label);
            for section in catalog::skeleton_for(&template.id) {
                println!("       - {}", section.title);
            }
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::DocumentEditor;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_template_switch_keeps_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json").to_string_lossy().to_string();

        let mut editor = DocumentEditor::new();
        editor.set_section_content(0, "Paciente estable").unwrap();
        save_document(&editor, &path).await.unwrap();

        let args = TemplateArgs {
            file: Some(path.clone()),
            to: Some("6".to_string()),
        };
        assert_eq!(args.execute().await.unwrap(), 0);

        let reopened = open_document(&path).await.unwrap();
        assert_eq!(reopened.template().as_str(), "6");
        assert_eq!(reopened.sections()[0].content, "Paciente estable");
    }

    #[tokio::test]
    async fn test_template_unknown_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json").to_string_lossy().to_string();
        save_document(&DocumentEditor::new(), &path).await.unwrap();

        let args = TemplateArgs {
            file: Some(path),
            to: Some("99".to_string()),
        };
        assert_eq!(args.execute().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_template_list() {
        let args = TemplateArgs { file: None, to: None };
        assert_eq!(args.execute().await.unwrap(), 0);
    }
}
