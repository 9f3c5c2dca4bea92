//! Ask command implementation
//!
//! Runs one assistant turn over a document. In edit mode the reply is a proposal
//! for the target section; `--apply` writes it back to the file.

use super::{load_config_or_report, open_document, save_document, section_index};
use crate::assistant::prompts::{find_quick_action, quick_actions};
use crate::assistant::session::FALLBACK_SELECTED_MESSAGE;
use crate::assistant::{
    apply_proposal, AssistantMode, AssistantSession, ContentGenerator, GeminiClient,
    PreferenceStore, Refusal, SendOutcome,
};
use crate::config::InformeConfig;
use crate::core::document::DocumentEditor;
use clap::Args;

/// Arguments for the ask command
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Document used as context
    pub file: String,

    /// Request text
    #[arg(trailing_var_arg = true)]
    pub request: Vec<String>,

    /// Conversation mode (chat or edit)
    #[arg(short, long, default_value = "chat")]
    pub mode: AssistantMode,

    /// Section to rewrite in edit mode (1-based)
    #[arg(short, long, default_value = "1")]
    pub section: String,

    /// Use a quick action by label instead of typing a request
    #[arg(short, long, conflicts_with = "request")]
    pub action: Option<String>,

    /// Write the edit-mode proposal into the document
    #[arg(long)]
    pub apply: bool,
}

impl AskArgs {
    /// Execute the ask command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let Some(config) = load_config_or_report(config_path) else {
            return Ok(2);
        };

        let client = match GeminiClient::new(&config.assistant) {
            Ok(client) => client,
            Err(e) => {
                println!("❌ Failed to create assistant client");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        self.run(client, &config).await
    }

    /// Run the turn against any generator
    pub async fn run<G: ContentGenerator>(
        &self,
        generator: G,
        config: &InformeConfig,
    ) -> anyhow::Result<i32> {
        let text = match self.request_text() {
            Ok(text) => text,
            Err(e) => {
                println!("❌ {e}");
                return Ok(1);
            }
        };

        let mut editor = match open_document(&self.file).await {
            Ok(editor) => editor,
            Err(e) => {
                println!("❌ Failed to open document: {e}");
                return Ok(1);
            }
        };

        let target = match section_index(&self.section) {
            Ok(index) if index < editor.sections().len() => index,
            Ok(_) | Err(_) => {
                println!(
                    "❌ Section {} does not exist (document has {})",
                    self.section,
                    editor.sections().len()
                );
                return Ok(1);
            }
        };

        let store = PreferenceStore::new(&config.assistant.preferences_path);
        let mut session = AssistantSession::new(generator, store)
            .with_api_key(config.assistant.api_key.clone());
        session.set_mode(self.mode);
        session.set_target_section(target, editor.sections().len());

        let allow_markdown = session.preferences().allow_markdown;
        match session.send(&text, &editor.snapshot()).await {
            SendOutcome::Replied(reply) => {
                println!("{}", reply.display_text(allow_markdown));
                if self.apply {
                    return self.apply_reply(&reply, &mut editor).await;
                }
                Ok(0)
            }
            SendOutcome::FallbackSelected { model } => {
                println!("⚠️  {FALLBACK_SELECTED_MESSAGE}");
                println!("   Selected model: {model}");
                Ok(1)
            }
            SendOutcome::Failed(message) => {
                println!("❌ {message}");
                Ok(1)
            }
            SendOutcome::Refused(Refusal::MissingApiKey) => {
                println!("❌ No assistant API key configured");
                println!("   Use `informe prefs --api-key <KEY>` or set INFORME_ASSISTANT_API_KEY");
                Ok(2)
            }
            SendOutcome::Refused(Refusal::BlankText) => {
                println!("❌ Nothing to ask");
                Ok(1)
            }
            SendOutcome::Refused(Refusal::Pending) => {
                println!("❌ A request is already in progress");
                Ok(1)
            }
        }
    }

    async fn apply_reply(
        &self,
        reply: &crate::assistant::Message,
        editor: &mut DocumentEditor,
    ) -> anyhow::Result<i32> {
        if let Err(e) = apply_proposal(reply, editor) {
            println!("❌ {e}");
            return Ok(1);
        }
        save_document(editor, &self.file).await?;
        println!();
        println!("✅ Proposal applied to section {} of {}", self.section, self.file);
        Ok(0)
    }

    fn request_text(&self) -> Result<String, String> {
        match &self.action {
            Some(label) => find_quick_action(self.mode, label)
                .map(|action| action.prompt.to_string())
                .ok_or_else(|| {
                    let labels: Vec<&str> =
                        quick_actions(self.mode).iter().map(|a| a.label).collect();
                    format!(
                        "Unknown quick action '{label}' for {} mode. Available: {}",
                        self.mode,
                        labels.join(", ")
                    )
                }),
            None => Ok(self.request.join(" ")),
        }
    }
}
