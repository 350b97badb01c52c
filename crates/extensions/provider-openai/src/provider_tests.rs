use super::*;
use transassist_protocols::Message;

#[test]
fn test_provider_id() {
    let provider = OpenAIProvider::new("test-key");
    assert_eq!(provider.id(), "openai");
}

#[test]
fn test_provider_default_url() {
    let provider = OpenAIProvider::new("key");
    assert_eq!(provider.api_url(), DEFAULT_API_URL);
    assert_eq!(DEFAULT_API_URL, "https://api.openai.com/v1/chat/completions");
}

#[test]
fn test_custom_url() {
    let provider = OpenAIProvider::with_url("test-key", "https://custom.api/v1");
    assert_eq!(provider.api_url(), "https://custom.api/v1");
}

#[test]
fn test_build_request_borrows_fields() {
    let provider = OpenAIProvider::new("key");
    let request = CompletionRequest::new("gpt-4", vec![Message::user("Hello")]).with_temperature(0.3);
    let api_request = provider.build_request(&request);
    assert_eq!(api_request.model, "gpt-4");
    assert_eq!(api_request.messages.len(), 1);
    assert_eq!(api_request.temperature, Some(0.3));
    assert_eq!(api_request.max_tokens, None);
}

#[tokio::test]
async fn test_empty_url_is_rejected() {
    let provider = OpenAIProvider::with_url("key", "  ");
    let request = CompletionRequest::new("gpt-4", vec![Message::user("Hello")]);
    let err = provider.complete(request).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidRequest(_)));
}

mod http {
    use super::*;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    fn request() -> CompletionRequest {
        CompletionRequest::new("gpt-3.5-turbo", vec![Message::user("Translate: Hello")])
            .with_temperature(0.3)
    }

    async fn server_returning(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/"))
            .respond_with(template)
            .expect(1)
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_complete_success_trims_content() {
        let mock_server = MockServer::start().await;
        let response_body = serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-3.5-turbo-0125",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "\n  Hallo  \n" },
                "finish_reason": "stop"
            }]
        });

        Mock::given(matchers::method("POST"))
            .and(matchers::path("/"))
            .and(matchers::header("Authorization", "Bearer test-key"))
            .and(matchers::body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [{ "role": "user", "content": "Translate: Hello" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response_body))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenAIProvider::with_url("test-key", mock_server.uri());
        let response = provider.complete(request()).await.unwrap();
        assert_eq!(response.content, "Hallo");
        assert_eq!(response.model, "gpt-3.5-turbo-0125");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    }

    #[tokio::test]
    async fn test_complete_api_error_uses_status_text() {
        let error_body = r#"{"error": {"message": "Rate limit exceeded", "type": "rate_limit_error"}}"#;
        let mock_server = server_returning(ResponseTemplate::new(429).set_body_string(error_body)).await;

        let provider = OpenAIProvider::with_url("test-key", mock_server.uri());
        let err = provider.complete(request()).await.unwrap_err();
        match err {
            ProviderError::ApiError { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Too Many Requests");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_complete_unauthorized() {
        let mock_server = server_returning(ResponseTemplate::new(401)).await;
        let provider = OpenAIProvider::with_url("bad-key", mock_server.uri());
        let err = provider.complete(request()).await.unwrap_err();
        assert_eq!(err.to_string(), "API request failed: 401 Unauthorized");
    }

    #[tokio::test]
    async fn test_complete_missing_choices() {
        let mock_server =
            server_returning(ResponseTemplate::new(200).set_body_string(r#"{"id": "x", "choices": []}"#)).await;
        let provider = OpenAIProvider::with_url("test-key", mock_server.uri());
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_null_content() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let mock_server = server_returning(ResponseTemplate::new(200).set_body_string(body)).await;
        let provider = OpenAIProvider::with_url("test-key", mock_server.uri());
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_non_json_body() {
        let mock_server = server_returning(ResponseTemplate::new(200).set_body_string("<html>")).await;
        let provider = OpenAIProvider::with_url("test-key", mock_server.uri());
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_complete_network_error() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();
        drop(mock_server);

        let provider = OpenAIProvider::with_url("test-key", uri);
        let err = provider.complete(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
