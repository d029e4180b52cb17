use super::prompts::{build_essay_analysis_prompt, build_word_definition_prompt};
use super::schemas::{essay_analysis_schema, word_definition_schema};
use super::types::{shape_analysis, shape_definition};
use super::ContentClient;
use crate::domain::error::{AppError, Result};
use crate::domain::study::{EssayAnalysis, WordDefinition};
use crate::infrastructure::llm_clients::GenerationRequest;
use tracing::warn;

impl ContentClient {
    pub async fn get_word_definition(&self, word: &str) -> Result<WordDefinition> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AppError::ValidationError("Word must not be empty".to_string()));
        }

        let request =
            GenerationRequest::new(build_word_definition_prompt(word), word_definition_schema());
        let definition: WordDefinition = self.request_json("get_word_definition", request).await?;
        shape_definition(definition)
    }

    /// Like [`get_word_definition`](Self::get_word_definition), but any failure
    /// becomes [`WordDefinition::placeholder`] so one bad lookup never blocks the list.
    pub async fn get_word_definition_or_placeholder(&self, word: &str) -> WordDefinition {
        match self.get_word_definition(word).await {
            Ok(definition) => definition,
            Err(err) => {
                warn!(word, error = %err, "Falling back to placeholder definition");
                WordDefinition::placeholder()
            }
        }
    }

    pub async fn analyze_writing_technique(
        &self,
        question: &str,
        essay: &str,
    ) -> Result<EssayAnalysis> {
        if essay.trim().is_empty() {
            return Err(AppError::ValidationError("Essay must not be empty".to_string()));
        }

        let request = GenerationRequest::new(
            build_essay_analysis_prompt(question.trim(), essay.trim()),
            essay_analysis_schema(),
        );
        let analysis: EssayAnalysis = self
            .request_json("analyze_writing_technique", request)
            .await?;
        shape_analysis(analysis)
    }
}
