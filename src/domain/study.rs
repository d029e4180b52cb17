use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDefinition {
    pub definition: String,
    pub usage: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl WordDefinition {
    /// Shown in place of a definition that could not be fetched.
    pub fn placeholder() -> Self {
        Self {
            definition: "Could not load definition.".to_string(),
            usage: String::new(),
            synonyms: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EssayAnalysis {
    pub structure_analysis: String,
    pub key_vocabulary: Vec<String>,
    pub grammar_highlights: String,
    pub coherence_comment: String,
}
