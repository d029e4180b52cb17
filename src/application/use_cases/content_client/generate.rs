use super::prompts::{build_test_prompt, TEST_AUTHOR_INSTRUCTION};
use super::schemas::test_schema;
use super::types::TestOutput;
use super::ContentClient;
use crate::domain::error::{AppError, Result};
use crate::domain::session::MAX_QUESTION_COUNT;
use crate::domain::skill::Skill;
use crate::domain::test_content::GeneratedTest;
use crate::infrastructure::llm_clients::GenerationRequest;
use tracing::info;

impl ContentClient {
    /// Generates a fresh test for `skill`.
    ///
    /// `count` sets the number of questions for reading and listening. Writing
    /// always yields two tasks and speaking three parts, whatever the count.
    pub async fn generate_test(&self, skill: Skill, count: u32) -> Result<GeneratedTest> {
        let counted = matches!(skill, Skill::Reading | Skill::Listening);
        if counted && !(1..=MAX_QUESTION_COUNT).contains(&count) {
            return Err(AppError::ValidationError(format!(
                "Question count must be between 1 and {}, got {}",
                MAX_QUESTION_COUNT, count
            )));
        }

        let request = GenerationRequest::new(build_test_prompt(skill, count), test_schema())
            .with_system_instruction(TEST_AUTHOR_INSTRUCTION);

        let output: TestOutput = self.request_json("generate_test", request).await?;
        let content = output.into_content(skill, count as usize)?;
        let test = GeneratedTest::new(content);

        info!(
            test_id = %test.id,
            skill = %skill,
            questions = test.questions().len(),
            "Generated test"
        );
        Ok(test)
    }
}
