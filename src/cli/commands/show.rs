//! Show command implementation

use super::open_document;
use crate::assistant::build_context;
use crate::core::catalog;
use crate::domain::DocumentSnapshot;
use clap::{Args, ValueEnum};

/// Output format for the show command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    /// Short overview with section fill state
    #[default]
    Summary,
    /// The persisted JSON snapshot
    Json,
    /// The text block the assistant receives as context
    Context,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Document to show
    pub file: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ShowFormat::Summary)]
    pub format: ShowFormat,
}

impl ShowArgs {
    /// Execute the show command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let editor = match open_document(&self.file).await {
            Ok(editor) => editor,
            Err(e) => {
                println!("❌ Failed to open document: {e}");
                return Ok(1);
            }
        };
        let snapshot = editor.snapshot();

        match self.format {
            ShowFormat::Json => println!("{}", snapshot.to_json_pretty()?),
            ShowFormat::Context => println!("{}", build_context(&snapshot)),
            ShowFormat::Summary => print!("{}", render_summary(&snapshot)),
        }
        Ok(0)
    }
}

fn render_summary(snapshot: &DocumentSnapshot) -> String {
    let mut out = String::new();
    let label = catalog::label_for(&snapshot.template).unwrap_or_else(|| "—".to_string());

    out.push_str(&format!("📄 {}\n", display_or_dash(&snapshot.title)));
    out.push_str(&format!("   Template: {} ({label})\n", snapshot.template));
    out.push('\n');

    out.push_str("Patient:\n");
    for field in &snapshot.patient_fields {
        out.push_str(&format!(
            "  {}: {}\n",
            field.display_label(),
            display_or_dash(&field.value)
        ));
    }
    if !snapshot.removed_default_patient_field_ids.is_empty() {
        out.push_str(&format!(
            "  (removed: {})\n",
            snapshot.removed_default_patient_field_ids.join(", ")
        ));
    }
    out.push('\n');

    out.push_str("Sections:\n");
    for (i, section) in snapshot.sections.iter().enumerate() {
        let chars = section.content.trim().chars().count();
        let state = if chars == 0 {
            "empty".to_string()
        } else {
            format!("{chars} chars")
        };
        out.push_str(&format!(
            "  {}. {} [{state}]\n",
            i + 1,
            display_or_dash(&section.title)
        ));
    }

    if !snapshot.medico.is_empty() || !snapshot.especialidad.is_empty() {
        out.push('\n');
        out.push_str(&format!("Médico: {}\n", display_or_dash(&snapshot.medico)));
        out.push_str(&format!(
            "Especialidad: {}\n",
            display_or_dash(&snapshot.especialidad)
        ));
    }
    out
}

fn display_or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}
