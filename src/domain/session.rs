//! Screen sequencing for one practice session.
//!
//! `AppState` is a plain value. Every change goes through [`AppState::apply`],
//! which consumes the old state and returns the next one or an error, so the
//! owner decides when to commit.

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};
use crate::domain::evaluation::EvaluationResult;
use crate::domain::response::{ResponseKey, ResponseSet};
use crate::domain::skill::Skill;
use crate::domain::test_content::GeneratedTest;

pub const DEFAULT_QUESTION_COUNT: u32 = 15;
pub const MAX_QUESTION_COUNT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Home,
    Setup,
    Test,
    Results,
    History,
    Resources,
    Vocabulary,
    EssaySamples,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(View),
    SelectSkill(Skill),
    SetQuestionCount(u32),
    BeginGeneration,
    TestGenerated(GeneratedTest),
    Answer { key: ResponseKey, answer: String },
    BeginEvaluation,
    EvaluationCompleted(EvaluationResult),
    OperationFailed(String),
    Restart,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate(_) => "navigate",
            Action::SelectSkill(_) => "select_skill",
            Action::SetQuestionCount(_) => "set_question_count",
            Action::BeginGeneration => "begin_generation",
            Action::TestGenerated(_) => "test_generated",
            Action::Answer { .. } => "answer",
            Action::BeginEvaluation => "begin_evaluation",
            Action::EvaluationCompleted(_) => "evaluation_completed",
            Action::OperationFailed(_) => "operation_failed",
            Action::Restart => "restart",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub view: View,
    pub selected_skill: Option<Skill>,
    pub question_count: u32,
    pub current_test: Option<GeneratedTest>,
    pub responses: ResponseSet,
    pub result: Option<EvaluationResult>,
    /// Set while a generation or evaluation call is outstanding.
    pub loading: Option<String>,
    pub last_error: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Home,
            selected_skill: None,
            question_count: DEFAULT_QUESTION_COUNT,
            current_test: None,
            responses: ResponseSet::new(),
            result: None,
            loading: None,
            last_error: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Copy of the state with answer keys hidden until results are shown.
    pub fn public_view(&self) -> AppState {
        let mut view = self.clone();
        if self.view != View::Results {
            view.current_test = self.current_test.as_ref().map(GeneratedTest::candidate_view);
        }
        view
    }

    pub fn apply(self, action: Action) -> Result<AppState> {
        if self.is_loading() {
            return match action {
                Action::TestGenerated(test) => self.finish_generation(test),
                Action::EvaluationCompleted(result) => self.finish_evaluation(result),
                Action::OperationFailed(error) => Ok(AppState {
                    loading: None,
                    last_error: Some(error),
                    ..self
                }),
                other => Err(AppError::InvalidTransition(format!(
                    "{} rejected while busy: {}",
                    other.name(),
                    self.loading.as_deref().unwrap_or_default()
                ))),
            };
        }

        match action {
            Action::Navigate(target) => self.navigate(target),
            Action::SelectSkill(skill) => {
                self.expect_view(View::Home, "select a skill")?;
                Ok(AppState {
                    view: View::Setup,
                    selected_skill: Some(skill),
                    last_error: None,
                    ..self
                })
            }
            Action::SetQuestionCount(count) => {
                self.expect_view(View::Setup, "change the question count")?;
                if !(1..=MAX_QUESTION_COUNT).contains(&count) {
                    return Err(AppError::ValidationError(format!(
                        "Question count must be between 1 and {}, got {}",
                        MAX_QUESTION_COUNT, count
                    )));
                }
                Ok(AppState {
                    question_count: count,
                    ..self
                })
            }
            Action::BeginGeneration => {
                self.expect_view(View::Setup, "start a test")?;
                let skill = self.selected_skill.ok_or_else(|| {
                    AppError::InvalidTransition("No skill selected".to_string())
                })?;
                Ok(AppState {
                    loading: Some(format!("Generating {} Test...", skill.title())),
                    last_error: None,
                    ..self
                })
            }
            Action::Answer { key, answer } => {
                self.expect_view(View::Test, "answer")?;
                let accepted = self
                    .current_test
                    .as_ref()
                    .map(|test| test.accepts(&key))
                    .unwrap_or(false);
                if !accepted {
                    return Err(AppError::ValidationError(format!(
                        "{} is not part of the current test",
                        key
                    )));
                }
                let mut next = self;
                next.responses.record(key, answer);
                Ok(next)
            }
            Action::BeginEvaluation => {
                self.expect_view(View::Test, "submit")?;
                Ok(AppState {
                    loading: Some("Analyzing Performance & Estimating Band Score...".to_string()),
                    last_error: None,
                    ..self
                })
            }
            Action::Restart => {
                self.expect_view(View::Results, "restart")?;
                Ok(AppState {
                    question_count: self.question_count,
                    ..AppState::default()
                })
            }
            Action::TestGenerated(_) | Action::EvaluationCompleted(_) | Action::OperationFailed(_) => {
                Err(AppError::InvalidTransition(
                    "No operation is in progress".to_string(),
                ))
            }
        }
    }

    fn navigate(self, target: View) -> Result<AppState> {
        match target {
            View::Home | View::History | View::Resources => {
                let back_to_resources = target == View::Resources
                    && matches!(self.view, View::Vocabulary | View::EssaySamples);
                if back_to_resources {
                    return Ok(AppState {
                        view: View::Resources,
                        ..self
                    });
                }
                Ok(AppState {
                    view: target,
                    question_count: self.question_count,
                    ..AppState::default()
                })
            }
            View::Vocabulary | View::EssaySamples => {
                if !matches!(
                    self.view,
                    View::Resources | View::Vocabulary | View::EssaySamples
                ) {
                    return Err(AppError::InvalidTransition(format!(
                        "{:?} is only reachable from resources",
                        target
                    )));
                }
                Ok(AppState {
                    view: target,
                    ..self
                })
            }
            View::Setup | View::Test | View::Results => Err(AppError::InvalidTransition(format!(
                "{:?} cannot be opened directly",
                target
            ))),
        }
    }

    fn finish_generation(self, test: GeneratedTest) -> Result<AppState> {
        self.expect_view(View::Setup, "receive a generated test")?;
        if self.selected_skill != Some(test.skill()) {
            return Err(AppError::InvalidTransition(format!(
                "Generated a {} test for a {:?} session",
                test.skill(),
                self.selected_skill
            )));
        }
        Ok(AppState {
            view: View::Test,
            current_test: Some(test),
            responses: ResponseSet::new(),
            loading: None,
            ..self
        })
    }

    fn finish_evaluation(self, result: EvaluationResult) -> Result<AppState> {
        self.expect_view(View::Test, "receive an evaluation")?;
        Ok(AppState {
            view: View::Results,
            result: Some(result),
            loading: None,
            ..self
        })
    }

    fn expect_view(&self, expected: View, what: &str) -> Result<()> {
        if self.view == expected {
            Ok(())
        } else {
            Err(AppError::InvalidTransition(format!(
                "Cannot {} from {:?}",
                what, self.view
            )))
        }
    }
}
