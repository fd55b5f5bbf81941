// src/steps/mod.rs

//! Bodies of the five units.
//!
//! [`StepRunner`] is the production [`UnitExecutor`]: it dispatches on the
//! unit id and hands each body the completion service it needs.

pub mod blocks;
pub mod comparison;
pub mod faq;
pub mod parser;
pub mod product;
pub mod prompts;
pub mod questions;

use std::sync::Arc;

use async_trait::async_trait;

use crate::dag::{SharedStore, UnitExecutor, UnitOutput};
use crate::errors::Result;
use crate::llm::CompletionService;
use crate::types::UnitId;

/// Default number of questions the FAQ page answers.
pub const DEFAULT_FAQ_QUESTIONS: usize = 5;

pub struct StepRunner {
    completion: Arc<dyn CompletionService>,
    faq_questions: usize,
}

impl StepRunner {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            faq_questions: DEFAULT_FAQ_QUESTIONS,
        }
    }

    pub fn with_faq_questions(mut self, count: usize) -> Self {
        self.faq_questions = count;
        self
    }
}

#[async_trait]
impl UnitExecutor for StepRunner {
    async fn execute(&self, unit: UnitId, store: &SharedStore) -> Result<UnitOutput> {
        let completion = self.completion.as_ref();
        match unit {
            UnitId::Parser => parser::run(store),
            UnitId::Questions => questions::run(completion, store).await,
            UnitId::Product => product::run(completion, store).await,
            UnitId::Comparison => comparison::run(completion, store).await,
            UnitId::Faq => faq::run(completion, store, self.faq_questions).await,
        }
    }
}
