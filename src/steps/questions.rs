// src/steps/questions.rs

use tracing::debug;

use crate::content::Question;
use crate::dag::{SharedStore, UnitOutput};
use crate::errors::{ContentError, Result};
use crate::llm::CompletionService;
use crate::steps::prompts;
use crate::types::UnitId;

const MAX_TOKENS: u32 = 2000;

pub async fn run(completion: &dyn CompletionService, store: &SharedStore) -> Result<UnitOutput> {
    let product = store.product(UnitId::Questions)?;

    let response = completion
        .complete_json(
            prompts::QUESTIONS_SYSTEM,
            &prompts::questions_user(&product),
            MAX_TOKENS,
        )
        .await?;

    let questions = Question::batch_from_value(&response)?;
    if questions.is_empty() {
        return Err(ContentError::validation("model returned no questions"));
    }

    debug!(count = questions.len(), "parsed question batch");
    Ok(UnitOutput::Questions(questions))
}
