use std::time::Duration;

use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::{config::Config, errors::ProviderError};

/// One chat completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
}

/// A text model that turns an instruction into free-form text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError>;
}

pub struct OpenAiModelService {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiModelService {
    pub fn new(api_key: &str, api_base: &str, model: &str) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
        }
    }

    /// Returns `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let key = config.openai_api_key.as_ref()?;
        Some(Self::new(
            key.expose_secret(),
            &config.openai_api_base,
            &config.openai_model,
        ))
    }

    fn request_body(&self, request: &CompletionRequest) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.prompt },
            ],
            "max_tokens": request.max_tokens,
            "temperature": request.temperature,
        })
    }
}

#[async_trait]
impl TextModel for OpenAiModelService {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let body = self.request_body(&request);

        let response: Value =
            tokio::time::timeout(request.timeout, self.client.chat().create_byot(body))
                .await
                .map_err(|_| {
                    ProviderError::Transport(format!(
                        "completion timed out after {:?}",
                        request.timeout
                    ))
                })??;

        completion_text(&response)
    }
}

/// Extracts the first choice's message content.
pub fn completion_text(response: &Value) -> Result<String, ProviderError> {
    let content = response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();

    if content.is_empty() {
        return Err(ProviderError::Transport(
            "completion returned an empty body".to_string(),
        ));
    }

    Ok(content.to_string())
}
