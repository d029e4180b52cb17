use super::{GenerationRequest, LLMClient};
use crate::domain::error::{AppError, Result};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
    #[serde(rename = "responseSchema")]
    response_schema: &'a Value,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

pub struct GeminiClient {
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    fn api_key(config: &LLMConfig) -> Result<&str> {
        config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::Configuration("Missing API key for Gemini".to_string()))
    }

    fn build_body<'a>(config: &LLMConfig, request: &'a GenerationRequest) -> GeminiRequest<'a> {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: &request.prompt,
                }],
                role: Some("user"),
            }],
            system_instruction: request
                .system_instruction
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .map(|text| GeminiContent {
                    parts: vec![GeminiPart { text }],
                    role: None,
                }),
            generation_config: GenerationConfig {
                temperature: config.temperature.map(f64::from),
                max_output_tokens: config.max_tokens,
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
            },
        }
    }

    fn candidate_text(response: GeminiResponse) -> String {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(&self, config: &LLMConfig, request: &GenerationRequest) -> Result<String> {
        let api_key = Self::api_key(config)?;
        let base_url = config.base_url.trim_end_matches('/');
        let url = format!("{}/{}:generateContent", base_url, config.model.trim());

        let body = Self::build_body(config, request);

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::Transport(format!("API error ({}): {}", status, text)));
        }

        let json: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response body: {}", e)))?;

        Ok(Self::candidate_text(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_declares_json_schema_and_system_instruction() {
        let config = LLMConfig::default();
        let request = GenerationRequest::new("Define \"albeit\".", json!({ "type": "OBJECT" }))
            .with_system_instruction("You are an IELTS tutor.");

        let body = serde_json::to_value(GeminiClient::build_body(&config, &request)).unwrap();

        assert_eq!(body["contents"][0]["parts"][0]["text"], "Define \"albeit\".");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are an IELTS tutor.");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        assert!(body["generationConfig"].get("maxOutputTokens").is_none());
    }

    #[test]
    fn test_blank_system_instruction_is_omitted() {
        let config = LLMConfig::default();
        let request = GenerationRequest::new("x", json!({})).with_system_instruction("  ");
        let body = serde_json::to_value(GeminiClient::build_body(&config, &request)).unwrap();
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_candidate_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"a\":" }, { "text": "1}" }] } }]
        }))
        .unwrap();
        assert_eq!(GeminiClient::candidate_text(response), "{\"a\":1}");
    }

    #[test]
    fn test_missing_candidates_yield_empty_text() {
        let response: GeminiResponse =
            serde_json::from_value(json!({ "promptFeedback": { "blockReason": "SAFETY" } }))
                .unwrap();
        assert_eq!(GeminiClient::candidate_text(response), "");
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let err = GeminiClient::api_key(&LLMConfig::default()).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_client_builds_with_request_timeout() {
        assert!(GeminiClient::new().is_ok());
        assert!(GeminiClient::with_timeout(Duration::from_millis(1)).is_ok());
    }
}
