// Informe - Clinical report editor with a writing assistant
// Copyright (c) 2025 Informe Contributors
// Licensed under the MIT License

//! # Informe - clinical report editor
//!
//! Informe edits clinical documents (transfer reports, daily evolution notes,
//! discharge summaries) built from a template catalog, and pairs them with a
//! generative writing assistant.
//!
//! ## Overview
//!
//! This library provides:
//! - **Templates** with canonical section skeletons and titles
//! - **Reconciliation** that keeps written content when the template changes
//! - **Snapshots** that export a whole document as JSON and import it back,
//!   sanitizing anything malformed
//! - **Printing** to plain text with a suggested file name
//! - **An assistant** that answers questions about the case or rewrites a section
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Catalog, reconciliation, editor, export/import, print
//! - [`assistant`] - Context building, prompts, preferences, Gemini client, sessions
//! - [`domain`] - Document types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use informe::core::document::DocumentEditor;
//! use informe::core::export::{export_document, FileSink};
//! use informe::domain::TemplateId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut editor = DocumentEditor::new();
//!     editor.set_field_value("nombre", "Ana Tuki")?;
//!     editor.set_section_content(0, "Dolor abdominal de 2 días de evolución")?;
//!
//!     // content written so far moves into the new template's sections
//!     editor.change_template(TemplateId::new("3")?);
//!
//!     let outcome = export_document(&editor, &FileSink::in_directory("informes")).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], an alias over
//! [`domain::InformeError`]. Reconciliation and snapshot application never fail;
//! a malformed import is rejected before it reaches the editor.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
