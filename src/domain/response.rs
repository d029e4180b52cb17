use serde::{Deserialize, Serialize};
use std::fmt;

/// What an answer refers to. Task and part indices are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseKey {
    #[serde(rename = "questionId")]
    Question(String),
    #[serde(rename = "taskId")]
    Task(u32),
    #[serde(rename = "partId")]
    Part(u32),
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseKey::Question(id) => write!(f, "question {}", id),
            ResponseKey::Task(index) => write!(f, "task {}", index),
            ResponseKey::Part(index) => write!(f, "part {}", index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    #[serde(flatten)]
    pub key: ResponseKey,
    pub answer: String,
}

/// Answers given during one test, at most one per key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseSet {
    responses: Vec<UserResponse>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `answer` under `key`, replacing any earlier answer for the same key.
    pub fn record(&mut self, key: ResponseKey, answer: String) {
        match self.responses.iter_mut().find(|response| response.key == key) {
            Some(existing) => existing.answer = answer,
            None => self.responses.push(UserResponse { key, answer }),
        }
    }

    pub fn get(&self, key: &ResponseKey) -> Option<&str> {
        self.responses
            .iter()
            .find(|response| &response.key == key)
            .map(|response| response.answer.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserResponse> {
        self.responses.iter()
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl FromIterator<UserResponse> for ResponseSet {
    fn from_iter<I: IntoIterator<Item = UserResponse>>(iter: I) -> Self {
        let mut set = ResponseSet::new();
        for response in iter {
            set.record(response.key, response.answer);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_answer_supersedes_earlier() {
        let mut set = ResponseSet::new();
        set.record(ResponseKey::Question("q1".to_string()), "A".to_string());
        set.record(ResponseKey::Part(1), "I live in Lyon.".to_string());
        set.record(ResponseKey::Question("q1".to_string()), "C".to_string());

        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&ResponseKey::Question("q1".to_string())), Some("C"));
        assert_eq!(set.get(&ResponseKey::Part(1)), Some("I live in Lyon."));
    }

    #[test]
    fn test_wire_format_uses_named_keys() {
        let response = UserResponse {
            key: ResponseKey::Task(2),
            answer: "Essay text".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "taskId": 2, "answer": "Essay text" }));

        let parsed: UserResponse =
            serde_json::from_str(r#"{"questionId":"q3","answer":"True"}"#).unwrap();
        assert_eq!(parsed.key, ResponseKey::Question("q3".to_string()));
    }

    #[test]
    fn test_collecting_deduplicates_keys() {
        let set: ResponseSet = vec![
            UserResponse {
                key: ResponseKey::Part(2),
                answer: "first".to_string(),
            },
            UserResponse {
                key: ResponseKey::Part(2),
                answer: "second".to_string(),
            },
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&ResponseKey::Part(2)), Some("second"));
    }
}
