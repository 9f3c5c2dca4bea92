//! Assistant conversation session
//!
//! A session owns the conversation with the model: the mode, the message list,
//! the target section for edit mode, the pending flag and the last error. Each
//! [`AssistantSession::send`] ends in exactly one [`SendOutcome`].

use super::client::{Content, ContentGenerator, GenerateRequest};
use super::context::build_context;
use super::fallback::suggest_fallback_model;
use super::preferences::{PreferenceStore, Preferences};
use super::prompts::{edit_prompt, quick_actions, system_prompt, AssistantMode, QuickAction};
use crate::config::SecretString;
use crate::core::document::{Container, DocumentEditor};
use crate::core::text::markdown_to_plain_text;
use crate::domain::{AssistantError, DocumentSnapshot, InformeError, PatientField, Result, Section};
use secrecy::ExposeSecret;
use uuid::Uuid;

/// Number of most recent messages sent as history
pub const HISTORY_WINDOW: usize = 6;

/// Error shown after switching to a fallback model
pub const FALLBACK_SELECTED_MESSAGE: &str =
    "Modelo no disponible. Se seleccionó automáticamente otro modelo, intente nuevamente.";

/// Error shown when a failure carries no message
pub const GENERIC_FAILURE_MESSAGE: &str = "No se pudo completar la solicitud.";

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// One entry of the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    pub text: String,

    /// Section an edit-mode reply proposes to replace
    pub proposal_section_index: Option<usize>,
}

impl Message {
    fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: text.into(),
            proposal_section_index: None,
        }
    }

    /// Text as it should be shown; replies lose their markdown when it is not allowed
    pub fn display_text(&self, allow_markdown: bool) -> String {
        if self.role == MessageRole::Assistant && !allow_markdown {
            markdown_to_plain_text(&self.text)
        } else {
            self.text.clone()
        }
    }
}

/// Why a send did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// Another request is still in flight
    Pending,
    /// No API key configured
    MissingApiKey,
    /// Nothing to send
    BlankText,
}

/// Terminal result of one send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The send did not start; nothing changed
    Refused(Refusal),

    /// The reply was appended to the conversation
    Replied(Message),

    /// The model was unavailable and another one was selected and saved; the
    /// user has to send again
    FallbackSelected { model: String },

    /// The request failed; the message is also kept as the session error
    Failed(String),
}

/// Conversation state over a content generator
pub struct AssistantSession<G> {
    generator: G,
    store: Option<PreferenceStore>,
    preferences: Preferences,
    api_key_override: Option<SecretString>,
    mode: AssistantMode,
    messages: Vec<Message>,
    pending: bool,
    error: String,
    target_section_index: usize,
}

impl<G: ContentGenerator> AssistantSession<G> {
    /// Session with preferences loaded from `store`
    pub fn new(generator: G, store: PreferenceStore) -> Self {
        let preferences = store.load();
        let mut session = Self::with_preferences(generator, preferences);
        session.store = Some(store);
        session
    }

    /// Session over in-memory preferences that are never persisted
    pub fn with_preferences(generator: G, preferences: Preferences) -> Self {
        Self {
            generator,
            store: None,
            preferences,
            api_key_override: None,
            mode: AssistantMode::Chat,
            messages: Vec::new(),
            pending: false,
            error: String::new(),
            target_section_index: 0,
        }
    }

    /// Use `api_key` for requests instead of the stored one; it is never persisted
    pub fn with_api_key(mut self, api_key: Option<SecretString>) -> Self {
        self.api_key_override = api_key.filter(|key| !key.expose_secret().is_blank());
        self
    }

    /// Key used for the next request
    fn active_api_key(&self) -> Option<SecretString> {
        self.api_key_override.clone().or_else(|| {
            self.preferences
                .api_key
                .clone()
                .filter(|key| !key.expose_secret().is_blank())
        })
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Change preferences and persist them
    pub fn update_preferences(&mut self, update: impl FnOnce(&mut Preferences)) {
        update(&mut self.preferences);
        self.persist();
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            store.save(&self.preferences);
        }
    }

    pub fn mode(&self) -> AssistantMode {
        self.mode
    }

    /// Switch mode; a real switch clears the conversation and the error
    pub fn set_mode(&mut self, mode: AssistantMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.messages.clear();
        self.error.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Last error, empty when the last send succeeded
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn target_section_index(&self) -> usize {
        self.target_section_index
    }

    /// Pick the section edit mode works on, clamped to the available sections
    pub fn set_target_section(&mut self, index: usize, section_count: usize) {
        self.target_section_index = index.min(section_count.saturating_sub(1));
    }

    /// Quick actions for the current mode
    pub fn quick_actions(&self) -> &'static [QuickAction] {
        quick_actions(self.mode)
    }

    /// Send a user request about `snapshot`
    pub async fn send(&mut self, text: &str, snapshot: &DocumentSnapshot) -> SendOutcome {
        let text = text.trim();
        if self.pending {
            return SendOutcome::Refused(Refusal::Pending);
        }
        let Some(api_key) = self.active_api_key() else {
            return SendOutcome::Refused(Refusal::MissingApiKey);
        };
        if text.is_empty() {
            return SendOutcome::Refused(Refusal::BlankText);
        }

        let user_message = Message::new(MessageRole::User, text);
        let user_id = user_message.id.clone();
        self.messages.push(user_message);

        if !snapshot.sections.is_empty() {
            self.set_target_section(self.target_section_index, snapshot.sections.len());
        }
        let section = match self.mode {
            AssistantMode::Edit => snapshot.sections.get(self.target_section_index),
            AssistantMode::Chat => None,
        };

        let persona = system_prompt(self.preferences.assistant_profile, self.mode, section);
        let prompt_text = match section {
            Some(section) => edit_prompt(section, text),
            None => text.to_string(),
        };

        let history_start = self.messages.len().saturating_sub(HISTORY_WINDOW);
        let history = self.messages[history_start..].iter().map(|message| {
            let body = if message.id == user_id {
                prompt_text.clone()
            } else {
                message.text.clone()
            };
            match message.role {
                MessageRole::User => Content::user(body),
                MessageRole::Assistant => Content::model(body),
            }
        });

        let mut contents = vec![
            Content::user(persona),
            Content::user(format!("CONTEXTO CLÍNICO COMPLETO:\n{}", build_context(snapshot))),
        ];
        contents.extend(history);

        let request = GenerateRequest {
            api_key,
            model: self.preferences.model.clone(),
            project_id: self.preferences.project().map(String::from),
            contents,
        };

        let proposal_index = section.map(|_| self.target_section_index);
        self.error.clear();
        self.pending = true;
        tracing::info!(
            mode = %self.mode,
            model = %request.model,
            turns = request.contents.len(),
            "Sending assistant request"
        );

        let result = self.generator.generate(&request).await;
        self.pending = false;

        match result {
            Ok(response) => {
                let mut reply = Message::new(MessageRole::Assistant, response.reply_text());
                reply.proposal_section_index = proposal_index;
                self.messages.push(reply.clone());
                SendOutcome::Replied(reply)
            }
            Err(AssistantError::ModelUnavailable {
                available_models, ..
            }) if self.preferences.auto_model => {
                let model = suggest_fallback_model(&available_models);
                tracing::warn!(
                    unavailable = %request.model,
                    fallback = %model,
                    "Model unavailable, fallback selected"
                );
                self.preferences.model = model.clone();
                self.persist();
                self.error = FALLBACK_SELECTED_MESSAGE.to_string();
                SendOutcome::FallbackSelected { model }
            }
            Err(e) => {
                crate::log_error_with_context!(&e, "Assistant request failed");
                let message = failure_message(&e);
                self.error = message.clone();
                SendOutcome::Failed(message)
            }
        }
    }
}

fn failure_message(error: &AssistantError) -> String {
    let message = match error {
        AssistantError::ModelUnavailable { message, .. } => message.clone(),
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

/// Write an edit-mode reply into the section it targets, as plain text
///
/// # Errors
///
/// Returns a validation error when the message carries no proposal or its
/// section no longer exists.
pub fn apply_proposal<P, S>(message: &Message, editor: &mut DocumentEditor<P, S>) -> Result<()>
where
    P: Container<PatientField>,
    S: Container<Section>,
{
    let index = message.proposal_section_index.ok_or_else(|| {
        InformeError::Validation("This reply does not propose a section edit".to_string())
    })?;
    editor.set_section_content(index, markdown_to_plain_text(&message.text))?;
    tracing::info!(section = index, "Assistant proposal applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::client::{AssistantResult, GenerateResponse, Role};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct Scripted {
        replies: Mutex<Vec<AssistantResult<GenerateResponse>>>,
        seen: Mutex<Vec<GenerateRequest>>,
    }

    impl Scripted {
        fn new(replies: Vec<AssistantResult<GenerateResponse>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ContentGenerator for Scripted {
        async fn generate(&self, request: &GenerateRequest) -> AssistantResult<GenerateResponse> {
            self.seen.lock().unwrap().push(request.clone());
            self.replies.lock().unwrap().remove(0)
        }
    }

    fn reply(text: &str) -> AssistantResult<GenerateResponse> {
        Ok(serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        }))
        .unwrap())
    }

    fn keyed() -> Preferences {
        let mut prefs = Preferences::default();
        prefs.set_api_key("AIza-test");
        prefs
    }

    #[tokio::test]
    async fn test_refusals() {
        let editor = DocumentEditor::new();
        let mut session = AssistantSession::with_preferences(Scripted::new(vec![]), Preferences::default());
        assert_eq!(
            session.send("hola", &editor.snapshot()).await,
            SendOutcome::Refused(Refusal::MissingApiKey)
        );

        let mut session = AssistantSession::with_preferences(Scripted::new(vec![]), keyed());
        assert_eq!(
            session.send("   ", &editor.snapshot()).await,
            SendOutcome::Refused(Refusal::BlankText)
        );
        assert!(session.messages().is_empty());
    }

    #[tokio::test]
    async fn test_configured_key_takes_precedence() {
        use crate::config::secret_string;

        let editor = DocumentEditor::new();
        let mut session =
            AssistantSession::with_preferences(Scripted::new(vec![reply("ok")]), keyed())
                .with_api_key(Some(secret_string("AIza-config".to_string())));

        session.send("hola", &editor.snapshot()).await;
        let seen = session.generator.seen.lock().unwrap();
        assert_eq!(seen[0].api_key.expose_secret().as_str(), "AIza-config");
        assert_eq!(
            session.preferences().api_key.as_ref().unwrap().expose_secret().as_str(),
            "AIza-test"
        );
    }

    #[tokio::test]
    async fn test_blank_configured_key_is_ignored() {
        use crate::config::secret_string;

        let editor = DocumentEditor::new();
        let mut session =
            AssistantSession::with_preferences(Scripted::new(vec![]), Preferences::default())
                .with_api_key(Some(secret_string("  ".to_string())));
        assert_eq!(
            session.send("hola", &editor.snapshot()).await,
            SendOutcome::Refused(Refusal::MissingApiKey)
        );
    }

    #[tokio::test]
    async fn test_chat_request_layout() {
        let editor = DocumentEditor::new();
        let mut session = AssistantSession::with_preferences(
            Scripted::new(vec![reply("uno"), reply("dos")]),
            keyed(),
        );

        session.send("primera", &editor.snapshot()).await;
        let outcome = session.send("segunda", &editor.snapshot()).await;
        assert!(matches!(outcome, SendOutcome::Replied(ref m) if m.text == "dos"));

        let seen = session.generator.seen.lock().unwrap();
        let contents = &seen[1].contents;
        assert_eq!(contents.len(), 5);
        assert!(contents[1].parts[0].text.starts_with("CONTEXTO CLÍNICO COMPLETO:\nTÍTULO\n"));
        assert_eq!(contents[2].parts[0].text, "primera");
        assert_eq!(contents[3].role, Role::Model);
        assert_eq!(contents[4].parts[0].text, "segunda");
    }

    #[tokio::test]
    async fn test_history_is_windowed() {
        let editor = DocumentEditor::new();
        let replies = (0..5).map(|i| reply(&format!("r{i}"))).collect();
        let mut session = AssistantSession::with_preferences(Scripted::new(replies), keyed());
        for i in 0..5 {
            session.send(&format!("q{i}"), &editor.snapshot()).await;
        }
        let seen = session.generator.seen.lock().unwrap();
        let last = &seen[4].contents;
        assert_eq!(last.len(), 2 + HISTORY_WINDOW);
        assert_eq!(last[2].parts[0].text, "r1");
        assert_eq!(last[7].parts[0].text, "q4");
    }

    #[tokio::test]
    async fn test_edit_mode_proposal_and_apply() {
        let mut editor = DocumentEditor::new();
        editor.set_section_content(4, "control").unwrap();
        let mut session =
            AssistantSession::with_preferences(Scripted::new(vec![reply("**Control** en 7 días")]), keyed());
        session.set_mode(AssistantMode::Edit);
        session.set_target_section(9, editor.sections().len());
        assert_eq!(session.target_section_index(), 4);

        let outcome = session.send("Expande", &editor.snapshot()).await;
        let SendOutcome::Replied(message) = outcome else {
            panic!("expected a reply");
        };
        assert_eq!(message.proposal_section_index, Some(4));

        let seen = session.generator.seen.lock().unwrap();
        assert!(seen[0].contents[0].parts[0].text.contains("editar la sección \"Plan\""));
        assert_eq!(
            seen[0].contents[2].parts[0].text,
            "Sección objetivo: Plan\nContenido actual:\ncontrol\n\nSolicitud: Expande"
        );
        drop(seen);

        apply_proposal(&message, &mut editor).unwrap();
        assert_eq!(editor.sections()[4].content, "Control en 7 días");
    }

    #[tokio::test]
    async fn test_model_unavailable_selects_fallback_once() {
        let editor = DocumentEditor::new();
        let unavailable = Err(AssistantError::ModelUnavailable {
            message: "not found".to_string(),
            available_models: vec!["gemini-pro".to_string()],
        });
        let mut prefs = keyed();
        prefs.set_model("gemini-ultra");
        let mut session = AssistantSession::with_preferences(Scripted::new(vec![unavailable]), prefs);

        let outcome = session.send("hola", &editor.snapshot()).await;
        assert_eq!(
            outcome,
            SendOutcome::FallbackSelected {
                model: "gemini-pro".to_string()
            }
        );
        assert_eq!(session.preferences().model, "gemini-pro");
        assert_eq!(session.error(), FALLBACK_SELECTED_MESSAGE);
        assert_eq!(session.generator.seen.lock().unwrap().len(), 1);
        assert!(!session.is_pending());
    }

    #[tokio::test]
    async fn test_model_unavailable_without_auto_model_fails() {
        let editor = DocumentEditor::new();
        let unavailable = Err(AssistantError::ModelUnavailable {
            message: "models/x is not found".to_string(),
            available_models: vec![],
        });
        let mut prefs = keyed();
        prefs.auto_model = false;
        let mut session = AssistantSession::with_preferences(Scripted::new(vec![unavailable]), prefs);

        let outcome = session.send("hola", &editor.snapshot()).await;
        assert_eq!(outcome, SendOutcome::Failed("models/x is not found".to_string()));
        assert_eq!(session.preferences().model, "gemini-1.5-flash-latest");
    }

    #[tokio::test]
    async fn test_mode_switch_clears_conversation() {
        let editor = DocumentEditor::new();
        let failure = Err(AssistantError::RequestFailed("boom".to_string()));
        let mut session = AssistantSession::with_preferences(Scripted::new(vec![failure]), keyed());
        session.send("hola", &editor.snapshot()).await;
        assert_eq!(session.error(), "boom");
        assert_eq!(session.messages().len(), 1);

        session.set_mode(AssistantMode::Chat);
        assert_eq!(session.messages().len(), 1);

        session.set_mode(AssistantMode::Edit);
        assert!(session.messages().is_empty());
        assert!(session.error().is_empty());
        assert_eq!(session.quick_actions().len(), 4);
    }

    #[test]
    fn test_apply_without_proposal_is_rejected() {
        let mut editor = DocumentEditor::new();
        let message = Message::new(MessageRole::Assistant, "texto");
        assert!(apply_proposal(&message, &mut editor).is_err());
        assert_eq!(message.display_text(false), "texto");
    }
}
