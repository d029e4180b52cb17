use super::prompts::build_evaluation_prompt;
use super::schemas::evaluation_schema;
use super::types::EvaluationOutput;
use super::ContentClient;
use crate::domain::error::{AppError, Result};
use crate::domain::evaluation::EvaluationResult;
use crate::domain::response::ResponseSet;
use crate::domain::skill::Skill;
use crate::domain::test_content::GeneratedTest;
use crate::infrastructure::llm_clients::GenerationRequest;
use tracing::info;

impl ContentClient {
    pub async fn evaluate_test(
        &self,
        skill: Skill,
        test: &GeneratedTest,
        responses: &ResponseSet,
    ) -> Result<EvaluationResult> {
        if test.skill() != skill {
            return Err(AppError::ValidationError(format!(
                "Cannot grade a {} test as {}",
                test.skill(),
                skill
            )));
        }

        let test_json = serde_json::to_string(test)
            .map_err(|e| AppError::Internal(format!("Failed to encode test: {}", e)))?;
        let responses_json = serde_json::to_string(responses)
            .map_err(|e| AppError::Internal(format!("Failed to encode responses: {}", e)))?;

        let request = GenerationRequest::new(
            build_evaluation_prompt(skill, &test_json, &responses_json),
            evaluation_schema(),
        );

        let output: EvaluationOutput = self.request_json("evaluate_test", request).await?;
        let result = output.into_result(skill)?;

        info!(
            test_id = %test.id,
            skill = %skill,
            overall_band = result.overall_band,
            "Evaluated test"
        );
        Ok(result)
    }
}
