use super::types::*;
use crate::{Error, Result, config::GeminiConfig};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// Client for the Gemini `generateContent` REST endpoint.
///
/// No timeout is configured: the call waits as long as the backend does.
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            model: config.model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        debug!(
            "Calling {} with {} content blocks",
            self.model,
            request.contents.len()
        );

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::llm(format!(
                "Gemini returned status {}: {}",
                status, body
            )));
        }

        let response: GenerateContentResponse = response.json().await?;
        debug!(
            "Received {} candidates from {}",
            response.candidates.len(),
            response.model_version.as_deref().unwrap_or(&self.model)
        );

        Ok(response)
    }
}
