//! Gemini client and assistant session against a mock backend

use informe::assistant::client::{Content, ContentGenerator, GeminiClient, GenerateRequest};
use informe::assistant::{
    apply_proposal, AssistantMode, AssistantSession, PreferenceStore, Preferences, SendOutcome,
};
use informe::config::{secret_string, AssistantConfig};
use informe::core::document::DocumentEditor;
use informe::domain::AssistantError;
use mockito::{Matcher, Server};
use serde_json::json;
use tempfile::TempDir;

const FLASH_PATH: &str = "/models/gemini-1.5-flash-latest:generateContent";

fn client_for(server: &Server) -> GeminiClient {
    let config = AssistantConfig {
        base_url: server.url(),
        retry_delay_ms: 0,
        ..AssistantConfig::default()
    };
    GeminiClient::new(&config).unwrap()
}

fn request(key: &str, model: &str) -> GenerateRequest {
    GenerateRequest {
        api_key: secret_string(key.to_string()),
        model: model.to_string(),
        project_id: None,
        contents: vec![Content::user("hola")],
    }
}

fn reply_body(text: &str) -> String {
    json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
}

#[tokio::test]
async fn test_generate_sends_key_and_parses_reply() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", FLASH_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "secret-key".into()))
        .match_body(Matcher::PartialJson(json!({
            "contents": [{"role": "user", "parts": [{"text": "hola"}]}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply_body("Paciente estable."))
        .create_async()
        .await;

    let client = client_for(&server);
    let response = client
        .generate(&request("secret-key", "models/gemini-1.5-flash-latest"))
        .await
        .unwrap();

    assert_eq!(response.reply_text(), "Paciente estable.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_not_found_reports_available_models() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-ultra:generateContent")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(
            json!({"error": {
                "status": "NOT_FOUND",
                "message": "models/gemini-ultra is not found",
                "details": ["models/gemini-pro", {"model": "gemini-1.5-flash"}]
            }})
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let err = client_for(&server)
        .generate(&request("k", "gemini-ultra"))
        .await
        .unwrap_err();

    match err {
        AssistantError::ModelUnavailable {
            message,
            available_models,
        } => {
            assert_eq!(message, "models/gemini-ultra is not found");
            assert_eq!(available_models, vec!["models/gemini-pro", "gemini-1.5-flash"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_are_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", FLASH_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(json!({"error": {"message": "backend overloaded"}}).to_string())
        .expect(2)
        .create_async()
        .await;

    let err = client_for(&server)
        .generate(&request("k", ""))
        .await
        .unwrap_err();

    assert_eq!(err, AssistantError::RequestFailed("backend overloaded".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_key_never_reaches_the_backend() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let err = client_for(&server)
        .generate(&request("   ", "gemini-pro"))
        .await
        .unwrap_err();

    assert_eq!(err, AssistantError::MissingApiKey);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_edit_reply_can_be_applied() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", FLASH_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "abc".into()))
        .with_status(200)
        .with_body(reply_body("**Plan:** control en 48 horas."))
        .create_async()
        .await;

    let mut editor = DocumentEditor::new();
    editor.set_section_content(1, "control pronto").unwrap();

    let mut preferences = Preferences::default();
    preferences.set_api_key("abc");
    let mut session = AssistantSession::with_preferences(client_for(&server), preferences);
    session.set_mode(AssistantMode::Edit);
    session.set_target_section(1, editor.sections().len());

    let outcome = session.send("Mejora la redacción", &editor.snapshot()).await;
    let SendOutcome::Replied(message) = outcome else {
        panic!("expected a reply, got {outcome:?}");
    };
    assert_eq!(message.proposal_section_index, Some(1));

    apply_proposal(&message, &mut editor).unwrap();
    let content = &editor.sections()[1].content;
    assert!(content.contains("control en 48 horas."));
    assert!(!content.contains("**"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_session_selects_and_saves_fallback_model() {
    let dir = TempDir::new().unwrap();
    let store = PreferenceStore::new(dir.path().join("prefs.json"));
    let mut preferences = Preferences::default();
    preferences.set_api_key("abc");
    store.save(&preferences);

    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", FLASH_PATH)
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(
            json!({"error": {"status": "NOT_FOUND", "details": ["models/gemini-pro"]}}).to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let editor = DocumentEditor::new();
    let mut session = AssistantSession::new(client_for(&server), store.clone());
    let outcome = session.send("Resume el caso", &editor.snapshot()).await;

    assert_eq!(
        outcome,
        SendOutcome::FallbackSelected {
            model: "gemini-pro".to_string()
        }
    );
    assert_eq!(session.preferences().model, "gemini-pro");
    assert_eq!(store.load().model, "gemini-pro");
    assert!(!session.error().is_empty());
    mock.assert_async().await;
}
