//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Informe using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Informe - clinical report editor
#[derive(Parser, Debug)]
#[command(name = "informe")]
#[command(version, about, long_about = None)]
#[command(author = "Informe Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "informe.toml", env = "INFORME_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "INFORME_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new document for a template
    New(commands::new::NewArgs),

    /// List templates or switch a document to another template
    Template(commands::template::TemplateArgs),

    /// Edit patient fields, sections and the header of a document
    Edit(commands::edit::EditArgs),

    /// Show a document
    Show(commands::show::ShowArgs),

    /// Render a document as printable text
    Print(commands::print::PrintArgs),

    /// Ask the writing assistant about a document
    Ask(commands::ask::AskArgs),

    /// Show or change assistant preferences
    Prefs(commands::prefs::PrefsArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Run the selected command and return the process exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        match &self.command {
            Commands::New(args) => args.execute(&self.config).await,
            Commands::Template(args) => args.execute().await,
            Commands::Edit(args) => args.execute().await,
            Commands::Show(args) => args.execute().await,
            Commands::Print(args) => args.execute().await,
            Commands::Ask(args) => args.execute(&self.config).await,
            Commands::Prefs(args) => args.execute(&self.config).await,
            Commands::ValidateConfig(args) => args.execute(&self.config).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}
