use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Listening,
    Reading,
    Writing,
    Speaking,
}

impl Skill {
    pub const ALL: [Skill; 4] = [
        Skill::Listening,
        Skill::Reading,
        Skill::Writing,
        Skill::Speaking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Listening => "listening",
            Skill::Reading => "reading",
            Skill::Writing => "writing",
            Skill::Speaking => "speaking",
        }
    }

    /// Capitalized name used in user-facing messages.
    pub fn title(&self) -> &'static str {
        match self {
            Skill::Listening => "Listening",
            Skill::Reading => "Reading",
            Skill::Writing => "Writing",
            Skill::Speaking => "Speaking",
        }
    }

    /// The four graded criteria for this skill, in report order.
    pub fn criteria(&self) -> [&'static str; 4] {
        match self {
            Skill::Listening => ["Main Ideas", "Specific Details", "Inference", "Vocabulary"],
            Skill::Reading => [
                "Skimming & Scanning",
                "Detail Comprehension",
                "Inference",
                "Vocabulary Range",
            ],
            Skill::Writing => [
                "Task Achievement",
                "Coherence & Cohesion",
                "Lexical Resource",
                "Grammatical Range & Accuracy",
            ],
            Skill::Speaking => [
                "Fluency & Coherence",
                "Lexical Resource",
                "Grammatical Range & Accuracy",
                "Pronunciation",
            ],
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Skill {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Skill::ALL
            .into_iter()
            .find(|skill| skill.as_str() == normalized)
            .ok_or_else(|| AppError::ValidationError(format!("Unknown skill: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Speaking".parse::<Skill>().unwrap(), Skill::Speaking);
        assert_eq!(" reading ".parse::<Skill>().unwrap(), Skill::Reading);
        assert!("grammar".parse::<Skill>().is_err());
    }

    #[test]
    fn test_every_skill_has_four_distinct_criteria() {
        for skill in Skill::ALL {
            let criteria = skill.criteria();
            for (i, name) in criteria.iter().enumerate() {
                assert!(!criteria[i + 1..].contains(name), "{skill}: duplicate {name}");
            }
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Skill::Writing).unwrap(), "\"writing\"");
        let skill: Skill = serde_json::from_str("\"listening\"").unwrap();
        assert_eq!(skill, Skill::Listening);
    }
}
