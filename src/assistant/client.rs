//! Generative-language API client
//!
//! [`ContentGenerator`] is the seam the assistant session talks to.
//! [`GeminiClient`] implements it over the Gemini REST `generateContent` endpoint:
//! the API key travels as the `key` query parameter and the body is
//! `{"contents": [...]}`.

use super::fallback::normalize_model_id;
use crate::config::{AssistantConfig, SecretString};
use crate::domain::{AssistantError, InformeError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Message shown when the backend gives no usable error message
pub const DEFAULT_ERROR_MESSAGE: &str = "No se pudo generar la respuesta de Gemini.";

/// Reply text used when the backend returns no candidate text
pub const EMPTY_REPLY: &str = "Sin respuesta";

/// Result type for assistant backend calls
pub type AssistantResult<T> = std::result::Result<T, AssistantError>;

/// Speaker of a content entry, as the API names it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One text part of a content entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// One turn of the conversation sent to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Content {
    /// Single-part user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Single-part model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Everything needed for one generation call
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// API key; an empty key fails before any request is made
    pub api_key: SecretString,

    /// Model id, normalized before use
    pub model: String,

    /// Project id; selects the project-scoped endpoint when set
    pub project_id: Option<String>,

    /// Conversation turns
    pub contents: Vec<Content>,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    contents: &'a [Content],
}

/// Successful `generateContent` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One generated alternative
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

/// Parts of a generated alternative
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl GenerateResponse {
    /// Text of the first candidate, parts joined by newlines
    ///
    /// Falls back to [`EMPTY_REPLY`] when there is no text.
    pub fn reply_text(&self) -> String {
        let text = self
            .candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            EMPTY_REPLY.to_string()
        } else {
            text.to_string()
        }
    }
}

/// Backend that turns a conversation into a reply
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a reply for `request`
    ///
    /// # Errors
    ///
    /// - [`AssistantError::MissingApiKey`] when the key is empty
    /// - [`AssistantError::ModelUnavailable`] when the model does not exist
    /// - any other variant for transport or backend failures
    async fn generate(&self, request: &GenerateRequest) -> AssistantResult<GenerateResponse>;
}

/// Gemini REST client with bounded retry
///
/// # Example
///
/// ```no_run
/// use informe::assistant::client::{Content, ContentGenerator, GeminiClient, GenerateRequest};
/// use informe::config::{secret_string, AssistantConfig};
///
/// # async fn example() -> informe::domain::Result<()> {
/// let client = GeminiClient::new(&AssistantConfig::default())?;
/// let request = GenerateRequest {
///     api_key: secret_string("my-key".to_string()),
///     model: "gemini-1.5-flash".to_string(),
///     project_id: None,
///     contents: vec![Content::user("Resume el caso")],
/// };
/// let reply = client.generate(&request).await?;
/// println!("{}", reply.reply_text());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl GeminiClient {
    /// Build a client from the assistant configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the base URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(config: &AssistantConfig) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            InformeError::Configuration(format!("Invalid assistant base_url '{}': {e}", config.base_url))
        })?;

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)))
            .build()
            .map_err(|e| InformeError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Full endpoint URL for a request, key included
    pub fn endpoint(&self, request: &GenerateRequest) -> AssistantResult<Url> {
        let model = normalize_model_id(&request.model);
        let path = match request.project_id.as_deref().map(str::trim) {
            Some(project) if !project.is_empty() => format!(
                "{}/projects/{project}/locations/us-central1/models/{model}:generateContent",
                self.base_url
            ),
            _ => format!("{}/models/{model}:generateContent", self.base_url),
        };

        let mut url = Url::parse(&path)
            .map_err(|e| AssistantError::RequestFailed(format!("Invalid endpoint {path}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("key", request.api_key.expose_secret().as_str());
        Ok(url)
    }

    async fn request_once(&self, request: &GenerateRequest) -> AssistantResult<GenerateResponse> {
        let url = self.endpoint(request)?;

        let response = self
            .client
            .post(url)
            .json(&GenerateBody {
                contents: &request.contents,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AssistantError::Timeout(e.to_string())
                } else {
                    AssistantError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let payload: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            return Err(map_error_payload(&payload));
        }

        serde_json::from_str(&body)
            .map_err(|e| AssistantError::InvalidResponse(format!("status {status}: {e}")))
    }
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, request: &GenerateRequest) -> AssistantResult<GenerateResponse> {
        if request.api_key.expose_secret().as_str().trim().is_empty() {
            return Err(AssistantError::MissingApiKey);
        }

        let max_attempts = self.max_retries + 1;
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.request_once(request).await {
                Ok(response) => {
                    tracing::debug!(
                        model = %normalize_model_id(&request.model),
                        attempt = attempt,
                        candidates = response.candidates.len(),
                        "Assistant reply received"
                    );
                    return Ok(response);
                }
                Err(e) if e.is_transient() && attempt < max_attempts => {
                    crate::log_retry_attempt!(attempt, max_attempts, e.to_string().as_str());
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Map a non-2xx body onto an assistant error
///
/// `error.status == "NOT_FOUND"` means the model does not exist; its `details`
/// entries are model ids, either plain strings or objects with a `model` member.
pub fn map_error_payload(payload: &Value) -> AssistantError {
    let error = payload.get("error");
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty());

    let not_found = error
        .and_then(|e| e.get("status"))
        .and_then(Value::as_str)
        == Some("NOT_FOUND");

    if not_found {
        let available_models = error
            .and_then(|e| e.get("details"))
            .and_then(Value::as_array)
            .map(|details| {
                details
                    .iter()
                    .filter_map(|entry| match entry {
                        Value::String(model) => Some(model.clone()),
                        Value::Object(map) => map.get("model").and_then(Value::as_str).map(String::from),
                        _ => None,
                    })
                    .filter(|model| !model.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        return AssistantError::ModelUnavailable {
            message: message.unwrap_or("Modelo no disponible").to_string(),
            available_models,
        };
    }

    AssistantError::RequestFailed(message.unwrap_or(DEFAULT_ERROR_MESSAGE).to_string())
}
