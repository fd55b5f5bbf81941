// src/steps/faq.rs

use serde_json::{Map, Value};
use tracing::debug;

use crate::dag::{SharedStore, UnitOutput};
use crate::errors::{ContentError, Result};
use crate::llm::CompletionService;
use crate::steps::prompts;
use crate::templates::build_faq_page;
use crate::types::UnitId;

const MAX_TOKENS: u32 = 2000;

/// Answer the first `limit` questions in one completion call.
///
/// The page keeps the question text from the store and takes the answer at
/// the same index in the response; a missing answer fails in the template.
pub async fn run(
    completion: &dyn CompletionService,
    store: &SharedStore,
    limit: usize,
) -> Result<UnitOutput> {
    let product = store.product(UnitId::Faq)?;
    let questions = store.questions(UnitId::Faq)?;
    let selected = &questions[..questions.len().min(limit)];

    if selected.is_empty() {
        debug!("no questions to answer; emitting an empty faq page");
        return Ok(UnitOutput::Document(build_faq_page(&Value::Array(Vec::new()))?));
    }

    let response = completion
        .complete_json(
            prompts::FAQ_SYSTEM,
            &prompts::faq_user(&product, selected),
            MAX_TOKENS,
        )
        .await?;
    let answers = response
        .as_array()
        .ok_or_else(|| ContentError::validation("faq answers must be a sequence"))?;

    let items = selected
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            let mut item = Map::new();
            item.insert("question".to_string(), Value::String(question.text.clone()));
            if let Some(answer) = answers.get(idx).and_then(|a| a.get("answer")) {
                item.insert("answer".to_string(), answer.clone());
            }
            Value::Object(item)
        })
        .collect();

    Ok(UnitOutput::Document(build_faq_page(&Value::Array(items))?))
}
