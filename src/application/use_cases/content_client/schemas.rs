//! Response shapes declared to the model, in the OpenAPI subset Gemini accepts.

use serde_json::{json, Value};

fn question_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "id": { "type": "STRING" },
            "text": { "type": "STRING" },
            "type": { "type": "STRING", "enum": ["multiple-choice", "text", "boolean"] },
            "options": { "type": "ARRAY", "items": { "type": "STRING" } },
            "correctAnswer": { "type": "STRING" }
        },
        "required": ["id", "text", "type"]
    })
}

pub(crate) fn test_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "introText": { "type": "STRING" },
            "questions": { "type": "ARRAY", "items": question_schema() },
            "tasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "prompt": { "type": "STRING" },
                        "minWords": { "type": "INTEGER" }
                    }
                }
            },
            "parts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "questions": { "type": "ARRAY", "items": { "type": "STRING" } }
                    }
                }
            }
        }
    })
}

pub(crate) fn evaluation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overallBand": { "type": "NUMBER" },
            "criteria": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "score": { "type": "NUMBER" },
                        "feedback": { "type": "STRING" },
                        "improvement": { "type": "STRING" }
                    },
                    "required": ["name", "score", "feedback", "improvement"]
                }
            },
            "generalFeedback": { "type": "STRING" },
            "improvementPlan": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["overallBand", "criteria", "generalFeedback", "improvementPlan"]
    })
}

pub(crate) fn word_definition_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "definition": { "type": "STRING" },
            "usage": { "type": "STRING" },
            "synonyms": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["definition", "usage"]
    })
}

pub(crate) fn essay_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "structureAnalysis": { "type": "STRING" },
            "keyVocabulary": { "type": "ARRAY", "items": { "type": "STRING" } },
            "grammarHighlights": { "type": "STRING" },
            "coherenceComment": { "type": "STRING" }
        },
        "required": ["structureAnalysis", "keyVocabulary", "grammarHighlights", "coherenceComment"]
    })
}
