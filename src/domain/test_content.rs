use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::response::ResponseKey;
use crate::domain::skill::Skill;

pub const WRITING_TASK_COUNT: usize = 2;
pub const SPEAKING_PART_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    #[serde(alias = "multiple_choice")]
    MultipleChoice,
    #[serde(alias = "short-answer")]
    Text,
    #[serde(alias = "true-false")]
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Only used for grading; stripped from the candidate view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingTask {
    pub title: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_words: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeakingPart {
    pub title: String,
    pub questions: Vec<String>,
}

/// Skill-specific body of a generated test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "skill", rename_all = "lowercase")]
pub enum TestContent {
    Listening {
        transcript: String,
        questions: Vec<Question>,
    },
    Reading {
        passage: String,
        questions: Vec<Question>,
    },
    Writing {
        tasks: Vec<WritingTask>,
    },
    Speaking {
        parts: Vec<SpeakingPart>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTest {
    pub id: String,
    #[serde(flatten)]
    pub content: TestContent,
}

impl GeneratedTest {
    pub fn new(content: TestContent) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
        }
    }

    pub fn skill(&self) -> Skill {
        match self.content {
            TestContent::Listening { .. } => Skill::Listening,
            TestContent::Reading { .. } => Skill::Reading,
            TestContent::Writing { .. } => Skill::Writing,
            TestContent::Speaking { .. } => Skill::Speaking,
        }
    }

    /// Reading passage or listening transcript.
    pub fn intro_text(&self) -> Option<&str> {
        match &self.content {
            TestContent::Listening { transcript, .. } => Some(transcript),
            TestContent::Reading { passage, .. } => Some(passage),
            _ => None,
        }
    }

    pub fn questions(&self) -> &[Question] {
        match &self.content {
            TestContent::Listening { questions, .. } | TestContent::Reading { questions, .. } => {
                questions.as_slice()
            }
            _ => &[],
        }
    }

    /// Copy safe to show while the test is running.
    pub fn candidate_view(&self) -> GeneratedTest {
        let mut view = self.clone();
        match &mut view.content {
            TestContent::Listening { questions, .. } | TestContent::Reading { questions, .. } => {
                for question in questions.iter_mut() {
                    question.correct_answer = None;
                }
            }
            _ => {}
        }
        view
    }

    /// Whether an answer under `key` belongs to this test.
    pub fn accepts(&self, key: &ResponseKey) -> bool {
        match (&self.content, key) {
            (
                TestContent::Listening { questions, .. } | TestContent::Reading { questions, .. },
                ResponseKey::Question(id),
            ) => questions.iter().any(|question| &question.id == id),
            (TestContent::Writing { tasks }, ResponseKey::Task(index)) => {
                (1..=tasks.len()).contains(&(*index as usize))
            }
            (TestContent::Speaking { parts }, ResponseKey::Part(index)) => {
                (1..=parts.len()).contains(&(*index as usize))
            }
            _ => false,
        }
    }
}
