// src/content/question.rs

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ContentError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuestionCategory {
    Informational,
    Safety,
    Usage,
    Purchase,
    Comparison,
}

impl QuestionCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionCategory::Informational => "INFORMATIONAL",
            QuestionCategory::Safety => "SAFETY",
            QuestionCategory::Usage => "USAGE",
            QuestionCategory::Purchase => "PURCHASE",
            QuestionCategory::Comparison => "COMPARISON",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INFORMATIONAL" => Ok(QuestionCategory::Informational),
            "SAFETY" => Ok(QuestionCategory::Safety),
            "USAGE" => Ok(QuestionCategory::Usage),
            "PURCHASE" => Ok(QuestionCategory::Purchase),
            "COMPARISON" => Ok(QuestionCategory::Comparison),
            other => Err(format!("unknown question category: {other}")),
        }
    }
}

/// A generated customer question.
///
/// `answer` is always `None` in the questions step output. The FAQ step pairs
/// questions with answers by building new [`FaqItem`](super::FaqItem)s rather
/// than filling this in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub category: QuestionCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>, category: QuestionCategory) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category,
            answer: None,
        }
    }

    /// Parse a batch of questions from an LLM-produced JSON array.
    ///
    /// Each element must be a mapping with non-empty `text` and a known
    /// `category`. A missing `id` becomes `q<n>` (1-based); a repeated id is
    /// made unique by appending `-<n>`.
    pub fn batch_from_value(value: &Value) -> Result<Vec<Question>> {
        let items = value
            .as_array()
            .ok_or_else(|| ContentError::validation("questions must be a sequence"))?;

        let mut seen: HashSet<String> = HashSet::new();
        let mut batch = Vec::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            let obj = item.as_object().ok_or_else(|| {
                ContentError::validation(format!("question at index {idx} must be a mapping"))
            })?;

            let text = obj
                .get("text")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    ContentError::validation(format!("missing field text at index {idx}"))
                })?;

            let category = obj
                .get("category")
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    ContentError::validation(format!("missing field category at index {idx}"))
                })?
                .parse::<QuestionCategory>()
                .map_err(|e| ContentError::validation(format!("{e} at index {idx}")))?;

            let mut id = match obj.get("id") {
                Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
                Some(Value::Number(n)) => n.to_string(),
                _ => format!("q{}", idx + 1),
            };
            if seen.contains(&id) {
                id = format!("{id}-{}", idx + 1);
            }
            seen.insert(id.clone());

            batch.push(Question::new(id, text, category));
        }

        Ok(batch)
    }
}
