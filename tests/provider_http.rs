//! 后端 HTTP 协议测试
//!
//! 用 mockito 模拟 Gemini 与 Ollama 接口，验证请求头、请求体和各类回复的处理

use std::sync::Arc;

use mockito::{Matcher, Server};
use serde_json::json;

use ai_translator::translation::config::{ConfigManager, MemoryStore};
use ai_translator::translation::{
    GeminiProvider, OllamaProvider, Provider, SettingsDraft, TranslationError,
    TranslationService,
};

const GEMINI_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn gemini(server: &Server) -> GeminiProvider {
    GeminiProvider::new("test-key", "gemini-2.5-flash")
        .unwrap()
        .with_base_url(&server.url())
}

#[tokio::test]
async fn test_gemini_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GEMINI_PATH)
        .match_header("x-goog-api-key", "test-key")
        .match_body(Matcher::Json(json!({
            "contents": [{ "parts": [{ "text": "Translate: Hello" }] }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "Bon" }, { "text": "jour" }] }
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let reply = gemini(&server).generate("Translate: Hello").await;

    assert_eq!(reply, Ok("Bonjour".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_gemini_error_body_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", GEMINI_PATH)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let error = gemini(&server).generate("hi").await.unwrap_err();

    assert_eq!(error, TranslationError::NetworkError("API key not valid.".to_string()));
}

#[tokio::test]
async fn test_gemini_error_without_body_uses_status() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", GEMINI_PATH)
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let error = gemini(&server).generate("hi").await.unwrap_err();

    assert_eq!(error.to_string(), "HTTP 503");
}

#[tokio::test]
async fn test_gemini_empty_reply() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", GEMINI_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "candidates": [] }).to_string())
        .create_async()
        .await;

    let error = gemini(&server).generate("hi").await.unwrap_err();

    assert_eq!(error.to_string(), "Gemini response was empty");
}

#[tokio::test]
async fn test_ollama_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::Json(json!({
            "model": "llama3",
            "prompt": "Translate: Hello",
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "model": "llama3", "response": "Hola", "done": true }).to_string())
        .create_async()
        .await;

    let provider = OllamaProvider::new(&format!("{}/", server.url()), "llama3").unwrap();
    let reply = provider.generate("Translate: Hello").await;

    assert_eq!(reply, Ok("Hola".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ollama_missing_response_field() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "done": true }).to_string())
        .create_async()
        .await;

    let provider = OllamaProvider::new(&server.url(), "qwen3").unwrap();
    let error = provider.generate("hi").await.unwrap_err();

    assert_eq!(error.to_string(), "Ollama response was empty");
}

#[tokio::test]
async fn test_ollama_error_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/generate")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json!({ "error": "model 'missing' not found" }).to_string())
        .create_async()
        .await;

    let provider = OllamaProvider::new(&server.url(), "missing").unwrap();
    let error = provider.generate("hi").await.unwrap_err();

    assert_eq!(
        error,
        TranslationError::NetworkError("model 'missing' not found".to_string())
    );
}

/// 设置中选择本地后端后，段落翻译走完整 HTTP 流程
#[tokio::test]
async fn test_paragraph_translation_through_local_backend() {
    let mut server = Server::new_async().await;
    let reply = json!([{ "id": "seg_1", "html": "Hallo <b>Welt</b>" }]).to_string();
    let mock = server
        .mock("POST", "/api/generate")
        .match_body(Matcher::PartialJson(json!({ "model": "qwen3", "stream": false })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "response": reply }).to_string())
        .create_async()
        .await;

    let manager = ConfigManager::new(Arc::new(MemoryStore::new()));
    assert!(manager.save_config(&SettingsDraft {
        provider: Some("ollama".to_string()),
        target_language: Some("de".to_string()),
        ollama_host: Some(server.url()),
        ..Default::default()
    }));
    let service = TranslationService::new(Arc::new(manager));

    let response = service
        .translate_html_by_paragraph("<p>Hello <b>world</b></p><img src=\"a.png\">")
        .await;

    assert!(response.success, "unexpected failure: {:?}", response.error);
    assert_eq!(
        response.translated_html.as_deref(),
        Some("<p>Hallo <b>Welt</b></p><img src=\"a.png\">")
    );
    mock.assert_async().await;
}
