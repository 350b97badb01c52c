use super::*;
use serde_json::json;

#[test]
fn test_translate_request_wire_shape() {
    let request = BridgeRequest::Translate {
        source_text: "Hello".to_string(),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value, json!({"action": "translate", "sourceText": "Hello"}));
}

#[test]
fn test_check_site_support_request_parse() {
    let request: BridgeRequest =
        serde_json::from_value(json!({"action": "checkSiteSupport", "hostname": "crowdin.com"}))
            .unwrap();
    assert_eq!(
        request,
        BridgeRequest::CheckSiteSupport {
            hostname: "crowdin.com".to_string()
        }
    );
}

#[test]
fn test_get_settings_request_parse() {
    let request: BridgeRequest = serde_json::from_value(json!({"action": "getSettings"})).unwrap();
    assert_eq!(request, BridgeRequest::GetSettings);
}

#[test]
fn test_unknown_action_rejected() {
    let result = serde_json::from_value::<BridgeRequest>(json!({"action": "openOptions"}));
    assert!(result.is_err());
}

#[test]
fn test_response_variants_parse() {
    let ok: BridgeResponse = serde_json::from_value(json!({"translation": "Bonjour"})).unwrap();
    assert_eq!(ok.into_translation().unwrap(), "Bonjour");

    let supported: BridgeResponse = serde_json::from_value(json!({"supported": true})).unwrap();
    assert_eq!(supported, BridgeResponse::Supported { supported: true });

    let legacy_error: BridgeResponse =
        serde_json::from_value(json!({"error": "API key not configured"})).unwrap();
    assert!(matches!(
        legacy_error.into_translation(),
        Err(TranslateError::MissingApiKey)
    ));
}

#[test]
fn test_error_response_keeps_kind() {
    let response = BridgeResponse::error(&TranslateError::InvalidResponse("no choices".into()));
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["kind"], "protocol");

    let back: BridgeResponse = serde_json::from_value(value).unwrap();
    let err = back.into_translation().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[test]
fn test_settings_summary_parse() {
    let response: BridgeResponse = serde_json::from_value(json!({
        "apiProvider": "openai",
        "apiUrl": "https://api.openai.com/v1/chat/completions",
        "model": "gpt-3.5-turbo",
        "customModel": "",
        "apiKeyConfigured": false
    }))
    .unwrap();
    assert!(matches!(response, BridgeResponse::Settings(ref s) if !s.api_key_configured));
}

#[test]
fn test_unexpected_response_is_bridge_error() {
    let err = BridgeResponse::Supported { supported: false }
        .into_translation()
        .unwrap_err();
    assert!(matches!(err, TranslateError::Bridge(_)));
}
