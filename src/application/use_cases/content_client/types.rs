use serde::Deserialize;
use std::collections::HashSet;
use tracing::warn;

use crate::domain::error::{AppError, Result};
use crate::domain::evaluation::{clamp_score, snap_band, CriterionScore, EvaluationResult};
use crate::domain::skill::Skill;
use crate::domain::study::{EssayAnalysis, WordDefinition};
use crate::domain::test_content::{
    Question, QuestionKind, SpeakingPart, TestContent, WritingTask, SPEAKING_PART_COUNT,
    WRITING_TASK_COUNT,
};

const MAX_SYNONYMS: usize = 3;
const MAX_KEY_VOCABULARY: usize = 7;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TestOutput {
    #[serde(default)]
    pub(crate) intro_text: Option<String>,
    #[serde(default)]
    pub(crate) questions: Vec<QuestionOutput>,
    #[serde(default)]
    pub(crate) tasks: Vec<TaskOutput>,
    #[serde(default)]
    pub(crate) parts: Vec<PartOutput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuestionOutput {
    #[serde(default)]
    pub(crate) id: String,
    pub(crate) text: String,
    #[serde(rename = "type")]
    pub(crate) kind: QuestionKind,
    #[serde(default)]
    pub(crate) options: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) correct_answer: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskOutput {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) prompt: String,
    #[serde(default)]
    pub(crate) min_words: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PartOutput {
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) questions: Vec<String>,
}

impl TestOutput {
    /// Shapes raw output into the variant for `skill`. `count` caps question lists.
    pub(crate) fn into_content(self, skill: Skill, count: usize) -> Result<TestContent> {
        match skill {
            Skill::Reading => Ok(TestContent::Reading {
                passage: require_intro(self.intro_text, "reading passage")?,
                questions: shape_questions(self.questions, count)?,
            }),
            Skill::Listening => Ok(TestContent::Listening {
                transcript: require_intro(self.intro_text, "listening transcript")?,
                questions: shape_questions(self.questions, count)?,
            }),
            Skill::Writing => Ok(TestContent::Writing {
                tasks: shape_tasks(self.tasks)?,
            }),
            Skill::Speaking => Ok(TestContent::Speaking {
                parts: shape_parts(self.parts)?,
            }),
        }
    }
}

fn require_intro(intro_text: Option<String>, what: &str) -> Result<String> {
    intro_text
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| AppError::MalformedContent(format!("Generated test has no {}", what)))
}

fn shape_questions(raw: Vec<QuestionOutput>, count: usize) -> Result<Vec<Question>> {
    let mut seen = HashSet::new();
    let mut questions = Vec::new();

    for item in raw.into_iter().filter(|item| !item.text.trim().is_empty()) {
        let id = item.id.trim().to_string();
        let id = if id.is_empty() || seen.contains(&id) {
            next_free_id(&seen, questions.len() + 1)
        } else {
            id
        };
        seen.insert(id.clone());

        let options = item
            .options
            .map(|options| {
                options
                    .into_iter()
                    .map(|option| option.trim().to_string())
                    .filter(|option| !option.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|options| !options.is_empty());

        let kind = match (item.kind, &options) {
            (QuestionKind::MultipleChoice, Some(options)) if options.len() >= 2 => {
                QuestionKind::MultipleChoice
            }
            (QuestionKind::MultipleChoice, _) => {
                warn!(question_id = %id, "Multiple-choice question without options; answering as text");
                QuestionKind::Text
            }
            (kind, _) => kind,
        };

        questions.push(Question {
            id,
            text: item.text.trim().to_string(),
            kind,
            options,
            correct_answer: item.correct_answer,
        });
    }

    if questions.is_empty() {
        return Err(AppError::MalformedContent(
            "Generated test has no questions".to_string(),
        ));
    }
    if count > 0 {
        questions.truncate(count);
    }
    Ok(questions)
}

/// First `q{n}` with `n >= start` that no earlier question uses.
fn next_free_id(seen: &HashSet<String>, start: usize) -> String {
    (start..)
        .map(|n| format!("q{}", n))
        .find(|candidate| !seen.contains(candidate))
        .unwrap_or_default()
}

fn shape_tasks(raw: Vec<TaskOutput>) -> Result<Vec<WritingTask>> {
    let tasks: Vec<WritingTask> = raw
        .into_iter()
        .filter(|task| !task.prompt.trim().is_empty())
        .take(WRITING_TASK_COUNT)
        .enumerate()
        .map(|(index, task)| WritingTask {
            title: non_empty_or(task.title, || format!("Task {}", index + 1)),
            prompt: task.prompt.trim().to_string(),
            min_words: task.min_words,
        })
        .collect();

    if tasks.len() < WRITING_TASK_COUNT {
        return Err(AppError::MalformedContent(format!(
            "Expected {} writing tasks, got {}",
            WRITING_TASK_COUNT,
            tasks.len()
        )));
    }
    Ok(tasks)
}

fn shape_parts(raw: Vec<PartOutput>) -> Result<Vec<SpeakingPart>> {
    let parts: Vec<SpeakingPart> = raw
        .into_iter()
        .map(|part| PartOutput {
            title: part.title,
            questions: part
                .questions
                .into_iter()
                .map(|question| question.trim().to_string())
                .filter(|question| !question.is_empty())
                .collect(),
        })
        .filter(|part| !part.questions.is_empty())
        .take(SPEAKING_PART_COUNT)
        .enumerate()
        .map(|(index, part)| SpeakingPart {
            title: non_empty_or(part.title, || format!("Part {}", index + 1)),
            questions: part.questions,
        })
        .collect();

    if parts.len() < SPEAKING_PART_COUNT {
        return Err(AppError::MalformedContent(format!(
            "Expected {} speaking parts, got {}",
            SPEAKING_PART_COUNT,
            parts.len()
        )));
    }
    Ok(parts)
}

fn non_empty_or(value: String, fallback: impl FnOnce() -> String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EvaluationOutput {
    pub(crate) overall_band: f64,
    pub(crate) criteria: Vec<CriterionScore>,
    pub(crate) general_feedback: String,
    pub(crate) improvement_plan: Vec<String>,
}

impl EvaluationOutput {
    /// Reorders criteria to the skill's table, clamping every score into 0-9.
    pub(crate) fn into_result(self, skill: Skill) -> Result<EvaluationResult> {
        let mut remaining = self.criteria;
        let mut criteria = Vec::with_capacity(4);

        for name in skill.criteria() {
            let position = remaining
                .iter()
                .position(|criterion| criterion.name.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    AppError::MalformedContent(format!("Evaluation is missing criterion '{}'", name))
                })?;
            let criterion = remaining.swap_remove(position);
            criteria.push(CriterionScore {
                name: name.to_string(),
                score: clamp_score(criterion.score),
                feedback: criterion.feedback.trim().to_string(),
                improvement: criterion.improvement.trim().to_string(),
            });
        }

        if !remaining.is_empty() {
            warn!(
                skill = %skill,
                extra = remaining.len(),
                "Dropping criteria outside the skill table"
            );
        }

        Ok(EvaluationResult {
            overall_band: snap_band(self.overall_band),
            skill,
            criteria,
            general_feedback: self.general_feedback.trim().to_string(),
            improvement_plan: self
                .improvement_plan
                .into_iter()
                .map(|step| step.trim().to_string())
                .filter(|step| !step.is_empty())
                .collect(),
        })
    }
}

pub(crate) fn shape_definition(mut definition: WordDefinition) -> Result<WordDefinition> {
    if definition.definition.trim().is_empty() {
        return Err(AppError::MalformedContent(
            "Definition text is empty".to_string(),
        ));
    }
    definition.synonyms.retain(|synonym| !synonym.trim().is_empty());
    definition.synonyms.truncate(MAX_SYNONYMS);
    Ok(definition)
}

pub(crate) fn shape_analysis(mut analysis: EssayAnalysis) -> Result<EssayAnalysis> {
    if analysis.structure_analysis.trim().is_empty() {
        return Err(AppError::MalformedContent(
            "Structure analysis is empty".to_string(),
        ));
    }
    analysis.key_vocabulary.retain(|item| !item.trim().is_empty());
    analysis.key_vocabulary.truncate(MAX_KEY_VOCABULARY);
    Ok(analysis)
}
