pub mod gemini;

use crate::domain::error::Result;
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde_json::Value;

pub use gemini::GeminiClient;

/// One structured-output generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// JSON schema the model is asked to conform to.
    pub response_schema: Value,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, response_schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            response_schema,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

#[async_trait]
pub trait LLMClient {
    /// Returns the raw text of the first candidate, empty when the model produced none.
    async fn generate(&self, config: &LLMConfig, request: &GenerationRequest) -> Result<String>;
}
