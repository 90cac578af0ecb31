mod prompt;
mod types;

pub use prompt::{
    REQUIRED_FIELDS, RESPONSE_MIME_TYPE, build_generate_request, build_instruction, response_schema,
};
pub use types::MedicineResponse;

use crate::{Error, Result, llm::LlmClient, request::MedicineRequest};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Turns a [`MedicineRequest`] into a [`MedicineResponse`] with one model call.
///
/// Every failure (transport, empty output, schema mismatch) is logged and
/// collapsed into [`Error::Backend`]. Nothing is retried or repaired.
pub struct MedicineAdvisor {
    llm_client: Arc<dyn LlmClient>,
}

impl MedicineAdvisor {
    pub fn new(llm_client: Arc<dyn LlmClient>) -> Self {
        Self { llm_client }
    }

    pub async fn fetch_medicine_info(&self, request: &MedicineRequest) -> Result<MedicineResponse> {
        match self.try_fetch(request).await {
            Ok(response) => {
                info!("Received medicine information for '{}'", response.medicine_name);
                Ok(response)
            }
            Err(e) => {
                error!("Gemini API error: {}", e);
                Err(Error::Backend)
            }
        }
    }

    async fn try_fetch(&self, request: &MedicineRequest) -> Result<MedicineResponse> {
        debug!(
            "Requesting medicine information (image: {}, language: {})",
            request.has_image(),
            request.language
        );

        let response = self
            .llm_client
            .generate_content(build_generate_request(request))
            .await?;

        let text = response
            .text()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| Error::llm("No response received from AI"))?;

        Ok(serde_json::from_str(&text)?)
    }
}
