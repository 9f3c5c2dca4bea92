//! Generative writing assistant
//!
//! The assistant reads the whole document as context and either answers
//! questions about the case (chat mode) or rewrites one section (edit mode).
//!
//! - [`context`] - document flattened into the context block
//! - [`prompts`] - personas, system prompts, quick actions
//! - [`preferences`] - persisted assistant settings
//! - [`fallback`] - model id normalization and fallback selection
//! - [`client`] - the `ContentGenerator` seam and its Gemini REST implementation
//! - [`session`] - conversation state and send/apply operations
//!
//! # Example
//!
//! ```rust,no_run
//! use informe::assistant::{AssistantSession, GeminiClient, PreferenceStore, SendOutcome};
//! use informe::config::AssistantConfig;
//! use informe::core::document::DocumentEditor;
//!
//! # async fn example() -> informe::domain::Result<()> {
//! let config = AssistantConfig::default();
//! let client = GeminiClient::new(&config)?;
//! let mut session = AssistantSession::new(client, PreferenceStore::new(&config.preferences_path));
//!
//! let editor = DocumentEditor::new();
//! match session.send("Resume el caso", &editor.snapshot()).await {
//!     SendOutcome::Replied(reply) => println!("{}", reply.text),
//!     other => eprintln!("{other:?}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod context;
pub mod fallback;
pub mod preferences;
pub mod prompts;
pub mod session;

pub use client::{Content, ContentGenerator, GeminiClient, GenerateRequest, GenerateResponse};
pub use context::build_context;
pub use fallback::{normalize_model_id, suggest_fallback_model, DEFAULT_MODEL};
pub use preferences::{PreferenceStore, Preferences, PREFERENCES_KEY};
pub use prompts::{AssistantMode, AssistantProfile, QuickAction};
pub use session::{apply_proposal, AssistantSession, Message, MessageRole, Refusal, SendOutcome};
