mod evaluate;
mod generate;
mod prompts;
mod schemas;
mod study;
mod types;

use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use crate::infrastructure::config::CredentialResolver;
use crate::infrastructure::llm_clients::{GenerationRequest, LLMClient};
use crate::infrastructure::response::decode_json_response;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{error, info};

/// Builds skill prompts, calls the model and turns its output into domain values.
///
/// Holds no state between calls: every operation resolves its own credential,
/// makes exactly one request and either returns a complete value or an error.
pub struct ContentClient {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    config: LLMConfig,
    credentials: Arc<CredentialResolver>,
}

impl ContentClient {
    pub fn new(
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        config: LLMConfig,
        credentials: Arc<CredentialResolver>,
    ) -> Self {
        Self {
            llm_client,
            config,
            credentials,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: GenerationRequest,
    ) -> Result<T> {
        let result = self.request_json_inner(operation, &request).await;
        if let Err(err) = &result {
            error!(operation, error = %err, "Content request failed");
        }
        result
    }

    async fn request_json_inner<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: &GenerationRequest,
    ) -> Result<T> {
        let api_key = self.credentials.resolve()?;
        let config = self.config.with_api_key(api_key);

        info!(operation, model = %config.model, "Requesting structured content");
        let raw_output = self.llm_client.generate(&config, request).await?;

        if raw_output.trim().is_empty() {
            return Err(AppError::EmptyResponse(format!(
                "No content generated for {}",
                operation
            )));
        }

        decode_json_response(&raw_output)
    }
}
