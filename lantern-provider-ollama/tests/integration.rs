//! Integration tests for the Ollama provider using wiremock.

use futures::StreamExt;
use lantern_provider_ollama::{
    ChatMessage, ChatRequest, ModelProvider, Ollama, ProviderError, ReqwestTransport, StreamEvent,
    ThinkingMode, TokenUsage, ToolDefinition,
};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn minimal_request() -> ChatRequest {
    ChatRequest::new(vec![ChatMessage::user("Hello")])
}

async fn collect_events(provider: &Ollama, request: ChatRequest) -> Vec<StreamEvent> {
    provider.stream_chat(request).receiver.collect().await
}

fn tags_body() -> serde_json::Value {
    serde_json::json!({
        "models": [
            {
                "name": "llama3.2:latest",
                "model": "llama3.2:latest",
                "modified_at": "2025-01-10T08:00:00Z",
                "size": 2019393189_u64,
                "digest": "a80c4f17acd5",
                "details": {
                    "format": "gguf",
                    "family": "llama",
                    "parameter_size": "3.2B",
                    "quantization_level": "Q4_K_M"
                }
            },
            {
                "name": "deepseek-r1:8b",
                "model": "deepseek-r1:8b",
                "details": { "parameter_size": "8.0B" }
            },
            { "name": "custom-model" }
        ]
    })
}

// ─── list_models ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_models_returns_tags_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tags_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let models = provider.list_models(None).await.expect("should succeed");

    let ids: Vec<&str> = models.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["llama3.2:latest", "deepseek-r1:8b", "custom-model"]);
    assert_eq!(models[0].name, "llama3.2:latest");
    assert_eq!(models[0].description.as_deref(), Some("3.2B"));
    assert_eq!(models[1].description.as_deref(), Some("8.0B"));
    assert!(models[2].description.is_none());
}

#[tokio::test]
async fn list_models_uses_per_call_server_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Configured URL points nowhere; the override must win.
    let provider = Ollama::new().base_url("http://127.0.0.1:1");
    let uri = format!("{}/", mock_server.uri());
    let models = provider.list_models(Some(&uri)).await.expect("should succeed");
    assert!(models.is_empty());
}

#[tokio::test]
async fn list_models_returns_service_unavailable_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal server error"))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let err = provider.list_models(None).await.unwrap_err();

    assert!(
        matches!(err, ProviderError::ServiceUnavailable { status: 500, .. }),
        "expected ServiceUnavailable, got: {err:?}"
    );
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn list_models_returns_model_not_found_on_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(404).set_body_string("404 page not found"))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let err = provider.list_models(None).await.unwrap_err();
    assert!(
        matches!(err, ProviderError::ModelNotFound(_)),
        "expected ModelNotFound, got: {err:?}"
    );
}

#[tokio::test]
async fn list_models_with_invalid_json_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let err = provider.list_models(None).await.unwrap_err();
    assert!(
        matches!(err, ProviderError::InvalidResponse(_)),
        "expected InvalidResponse, got: {err:?}"
    );
}

#[tokio::test]
async fn list_models_connection_refused_is_network_error() {
    let provider = Ollama::new().base_url("http://127.0.0.1:1");
    let err = provider.list_models(None).await.unwrap_err();
    assert!(
        matches!(err, ProviderError::Network(_)),
        "expected Network, got: {err:?}"
    );
    assert!(err.is_retryable());
}

// ─── stream_chat ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn stream_returns_content_and_usage() {
    let mock_server = MockServer::start().await;

    let ndjson_body = concat!(
        r#"{"model":"llama3.2","message":{"role":"assistant","content":"Hello"},"done":false}"#,
        "\n",
        r#"{"model":"llama3.2","message":{"role":"assistant","content":" world"},"done":false}"#,
        "\n",
        r#"{"model":"llama3.2","message":{"role":"assistant","content":""},"done":true,"done_reason":"stop","eval_count":10,"prompt_eval_count":20}"#,
        "\n",
    );

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson_body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let events = collect_events(&provider, minimal_request()).await;

    assert_eq!(
        events,
        vec![
            StreamEvent::content("Hello"),
            StreamEvent::content(" world"),
            StreamEvent::Done {
                usage: Some(TokenUsage {
                    input_tokens: 20,
                    output_tokens: 10
                })
            },
        ]
    );
}

#[tokio::test]
async fn stream_request_body_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(serde_json::json!({
            "model": "qwen3:8b",
            "stream": true,
            "think": "high",
            "options": { "num_predict": 64 },
            "messages": [
                { "role": "system", "content": "Be terse." },
                { "role": "user", "content": "Hello" }
            ],
            "tools": [{
                "type": "function",
                "function": { "name": "search", "description": "Search the web" }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"done\":true}\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let mut request = ChatRequest::new(vec![
        ChatMessage::system("Be terse."),
        ChatMessage::user("Hello"),
    ]);
    request.model = Some("qwen3:8b".into());
    request.options.max_tokens = Some(64);
    request.options.thinking = ThinkingMode::High;
    request.options.tools = vec![ToolDefinition {
        id: "search".into(),
        description: "Search the web".into(),
        parameters: serde_json::json!({"type": "object"}),
    }];

    let events = collect_events(&provider, request).await;
    assert_eq!(events, vec![StreamEvent::Done { usage: None }]);
}

#[tokio::test]
async fn stream_omits_think_when_off() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"done\":true}\n"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let _ = collect_events(&provider, minimal_request()).await;

    let received = mock_server.received_requests().await.expect("recording enabled");
    let body: serde_json::Value =
        serde_json::from_slice(&received[0].body).expect("body should be JSON");
    assert!(body.get("think").is_none(), "think must be omitted: {body}");
    assert!(body.get("tools").is_none(), "tools must be omitted: {body}");
    assert_eq!(body["model"], "llama3.2");
}

#[tokio::test]
async fn stream_with_thinking() {
    let mock_server = MockServer::start().await;

    let ndjson_body = concat!(
        r#"{"message":{"role":"assistant","content":"","thinking":"Two plus two"},"done":false}"#,
        "\n",
        r#"{"message":{"role":"assistant","content":"4"},"done":false}"#,
        "\n",
        r#"{"message":{"role":"assistant","content":""},"done":true}"#,
        "\n",
    );

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(serde_json::json!({ "think": true })))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson_body))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new()
        .base_url(mock_server.uri())
        .thinking(ThinkingMode::On);
    let events = collect_events(&provider, minimal_request()).await;

    assert_eq!(
        events,
        vec![
            StreamEvent::thinking("Two plus two"),
            StreamEvent::content("4"),
            StreamEvent::Done { usage: None },
        ]
    );
}

#[tokio::test]
async fn stream_with_tool_calls() {
    let mock_server = MockServer::start().await;

    let ndjson_body = concat!(
        r#"{"model":"llama3.2","message":{"role":"assistant","content":"","tool_calls":[{"function":{"name":"search","arguments":{"query":"rust"}}},{"function":{"name":"weather","arguments":"{\"city\":\"Oslo\"}"}}]},"done":true,"done_reason":"stop","eval_count":15,"prompt_eval_count":25}"#,
        "\n",
    );

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson_body))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let events = collect_events(&provider, minimal_request()).await;

    assert_eq!(events.len(), 3, "events: {events:?}");
    let mut ids = Vec::new();
    for (event, (expected_name, key, value)) in events
        .iter()
        .zip([("search", "query", "rust"), ("weather", "city", "Oslo")])
    {
        match event {
            StreamEvent::ToolStart { id, name, input } => {
                assert!(id.starts_with("call_"), "unexpected id: {id}");
                assert_eq!(name, expected_name);
                assert_eq!(input[key], value);
                ids.push(id.clone());
            }
            other => panic!("expected ToolStart, got: {other:?}"),
        }
    }
    assert_ne!(ids[0], ids[1]);
    assert!(matches!(events[2], StreamEvent::Done { usage: Some(_) }));
}

#[tokio::test]
async fn stream_skips_malformed_lines() {
    let mock_server = MockServer::start().await;

    let ndjson_body = concat!(
        r#"{"message":{"content":"A"},"done":false}"#,
        "\n",
        "garbage line\n",
        r#"{"message":{"content":"B"},"done":true}"#,
    );

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson_body))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let events = collect_events(&provider, minimal_request()).await;
    assert_eq!(
        events,
        vec![
            StreamEvent::content("A"),
            StreamEvent::content("B"),
            StreamEvent::Done { usage: None },
        ]
    );
}

#[tokio::test]
async fn stream_with_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let events = collect_events(&provider, minimal_request()).await;
    assert_eq!(events, vec![StreamEvent::Done { usage: None }]);
}

#[tokio::test]
async fn stream_returns_error_on_404() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model 'nonexistent' not found"))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let events = collect_events(&provider, minimal_request()).await;

    assert_eq!(events.len(), 1);
    match &events[0] {
        StreamEvent::Error { message } => {
            assert!(message.contains("404"), "message: {message}");
            assert!(message.contains("model 'nonexistent' not found"), "message: {message}");
        }
        other => panic!("expected Error, got: {other:?}"),
    }
}

#[tokio::test]
async fn stream_returns_error_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal server error"))
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let events = collect_events(&provider, minimal_request()).await;

    assert_eq!(events.len(), 1);
    assert!(
        matches!(&events[0], StreamEvent::Error { message } if message.contains("500")),
        "events: {events:?}"
    );
}

#[tokio::test]
async fn stream_connection_refused_yields_error_event() {
    let provider = Ollama::new().base_url("http://127.0.0.1:1");
    let events = collect_events(&provider, minimal_request()).await;
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], StreamEvent::Error { .. }));
}

#[tokio::test]
async fn stream_sends_nothing_until_polled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"done\":true}\n"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let provider = Ollama::new().base_url(mock_server.uri());
    let handle = provider.stream_chat(minimal_request());
    drop(handle);
    // `expect(0)` is verified when the server drops.
}

#[tokio::test]
async fn client_timeout_reports_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"models": []}))
                .set_delay(std::time::Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_millis(100))
        .build()
        .expect("client should build");
    let provider = Ollama::new()
        .base_url(mock_server.uri())
        .transport(ReqwestTransport::with_client(client));

    let err = provider.list_models(None).await.unwrap_err();
    assert!(
        matches!(err, ProviderError::Timeout(_)),
        "expected Timeout, got: {err:?}"
    );
    assert!(err.is_retryable());
    let msg = err.to_string();
    assert!(msg.starts_with("request timed out: "), "message: {msg}");
    assert!(!msg.contains("30s"), "message: {msg}");
}
