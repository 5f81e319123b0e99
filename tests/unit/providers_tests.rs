/*!
 * Tests for provider construction and the provider trait
 */

use std::sync::Arc;

use serde_json::json;

use csvtrad::app_config::{ProviderConfig, ProviderKind};
use csvtrad::errors::ProviderError;
use csvtrad::providers::google::GoogleProvider;
use csvtrad::providers::mock::MockProvider;
use csvtrad::providers::ollama::OllamaProvider;
use csvtrad::providers::{create_provider, Provider};

#[tokio::test]
async fn test_mockProvider_throughTraitObject_shouldTranslate() {
    let provider: Arc<dyn Provider> = Arc::new(MockProvider::working());

    assert_eq!(provider.translate("Olá", "pt", "en").await.unwrap(), "[en] Olá");
    assert!(provider.test_connection().await.is_ok());
    assert_eq!(provider.name(), "Mock");
}

#[tokio::test]
async fn test_mockProvider_failing_shouldFailConnectionTest() {
    let provider = MockProvider::failing();

    assert!(provider.translate("Olá", "pt", "en").await.is_err());
    assert!(matches!(
        provider.test_connection().await,
        Err(ProviderError::ConnectionError(_))
    ));
}

#[test]
fn test_createProvider_shouldFollowConfiguredKind() {
    let google = create_provider(&ProviderConfig::new(ProviderKind::Google)).unwrap();
    let ollama = create_provider(&ProviderConfig::new(ProviderKind::Ollama)).unwrap();

    assert_eq!(google.name(), "Google");
    assert_eq!(ollama.name(), "Ollama");
}

#[test]
fn test_createProvider_withInvalidEndpoint_shouldFail() {
    let mut config = ProviderConfig::new(ProviderKind::Google);
    config.endpoint = "not a url".to_string();

    assert!(matches!(create_provider(&config), Err(ProviderError::ConnectionError(_))));
}

#[test]
fn test_googleParseResponse_shouldJoinSentences() {
    let body = json!([[["Good food. ", "Comida boa. ", null], ["Cheap.", "Barato.", null]], null, "pt"]);
    assert_eq!(GoogleProvider::parse_response(&body).unwrap(), "Good food. Cheap.");

    assert!(matches!(
        GoogleProvider::parse_response(&json!([[]])),
        Err(ProviderError::EmptyResponse)
    ));
    assert!(matches!(
        GoogleProvider::parse_response(&json!({"error": "x"})),
        Err(ProviderError::ParseError(_))
    ));
}

#[test]
fn test_ollamaSystemPrompt_shouldNameLanguagesAndTokens() {
    let prompt = OllamaProvider::system_prompt("pt", "en");
    assert!(prompt.contains("Portuguese"));
    assert!(prompt.contains("English"));
    assert!(prompt.contains("__URL_0__"));
    assert!(prompt.contains("__LITERAL_4__"));

    let auto = OllamaProvider::system_prompt("auto", "en");
    assert!(auto.contains("detected source language"));
}

#[test]
fn test_mockProvider_withCustomResponse_shouldCountRequests() {
    let provider = MockProvider::echo().with_custom_response(|request| request.text.to_uppercase());

    let result = tokio_test::block_on(async {
        provider.translate("olá", "pt", "en").await.unwrap();
        provider.translate("mundo", "pt", "en").await
    });

    assert_eq!(result.unwrap(), "MUNDO");
    assert_eq!(provider.request_count(), 2);
}
