//! Domain models and types for Informe.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Document shapes** ([`PatientField`], [`Section`], [`DocumentSnapshot`])
//! - **Import sanitization** ([`SnapshotPatch`])
//! - **Identifiers** ([`TemplateId`])
//! - **Error types** ([`InformeError`], [`AssistantError`])
//! - **Result type alias** ([`Result`])
//!
//! # Import Sanitization
//!
//! Imported files are untyped JSON. They are normalized member by member into a
//! [`SnapshotPatch`] before anything touches the editor:
//!
//! ```rust
//! use informe::domain::SnapshotPatch;
//!
//! # fn example() -> informe::domain::Result<()> {
//! let patch = SnapshotPatch::parse(r#"{"title": "Epicrisis", "sections": "oops"}"#)?;
//! assert_eq!(patch.title.as_text(), Some("Epicrisis"));
//! assert!(patch.sections.is_none()); // existing sections are kept
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod field;
pub mod ids;
pub mod result;
pub mod section;
pub mod snapshot;

// Re-export commonly used types for convenience
pub use errors::{AssistantError, InformeError};
pub use field::{FieldType, PatientField};
pub use ids::TemplateId;
pub use result::Result;
pub use section::Section;
pub use snapshot::{DocumentSnapshot, ImportedTitle, SnapshotPatch, SNAPSHOT_VERSION};
