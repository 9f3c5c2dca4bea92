//! In-memory document editing
//!
//! - [`container`] - render/collect containers for patient rows and sections
//! - [`editor`] - the editor state, its user-event operations and the snapshot contract

pub mod container;
pub mod editor;

pub use container::{Collect, Container, MemoryContainer};
pub use editor::DocumentEditor;
