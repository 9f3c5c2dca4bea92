//! Core business logic for Informe.
//!
//! # Modules
//!
//! - [`catalog`] - Template skeletons, titles and file base names
//! - [`reconcile`] - Section reconciliation on template change
//! - [`document`] - Editor state and the snapshot contract
//! - [`export`] - JSON export/import through sink and source seams
//! - [`print`] - Print file names and plain-text rendering
//! - [`dates`] / [`text`] - Date and string helpers
//!
//! # Template Change Workflow
//!
//! 1. **Collect**: read the current sections back from the section container
//! 2. **Merge**: reconcile them with the new template's skeleton
//! 3. **Render**: replace the container contents with the merged list
//! 4. **Retitle**: regenerate the title for the new template
//!
//! # Example
//!
//! ```rust
//! use informe::core::document::DocumentEditor;
//! use informe::domain::TemplateId;
//!
//! let mut editor = DocumentEditor::new();
//! editor.set_section_content(1, "Paciente estable").unwrap();
//! editor.change_template(TemplateId::new("3").unwrap());
//!
//! assert_eq!(editor.title(), "Epicrisis médica");
//! assert_eq!(editor.sections()[1].content, "Paciente estable");
//! ```

pub mod catalog;
pub mod dates;
pub mod document;
pub mod export;
pub mod print;
pub mod reconcile;
pub mod text;
