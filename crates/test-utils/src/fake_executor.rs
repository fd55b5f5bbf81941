use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use contentdag::content::{Document, Product};
use contentdag::dag::{SharedStore, UnitExecutor, UnitOutput};
use contentdag::errors::{ContentError, Result};
use contentdag::types::UnitId;

/// A fake executor that:
/// - records which units were run, in order
/// - returns a trivial output of the right kind for each unit
/// - optionally fails one unit with a `GenerationFailure`
///
/// It reads nothing from the store besides the raw input, so it runs any
/// acyclic graph regardless of declared dependencies.
#[derive(Clone, Default)]
pub struct FakeExecutor {
    executed: Arc<Mutex<Vec<UnitId>>>,
    fail_on: Option<UnitId>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(unit: UnitId) -> Self {
        Self {
            executed: Arc::default(),
            fail_on: Some(unit),
        }
    }

    pub fn executed(&self) -> Vec<UnitId> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl UnitExecutor for FakeExecutor {
    async fn execute(&self, unit: UnitId, store: &SharedStore) -> Result<UnitOutput> {
        self.executed.lock().unwrap().push(unit);

        if self.fail_on == Some(unit) {
            return Err(ContentError::GenerationFailure(format!(
                "fake failure in {unit}"
            )));
        }

        Ok(match unit {
            UnitId::Parser => UnitOutput::Product(Arc::new(Product::from_raw(store.raw_input())?)),
            UnitId::Questions => UnitOutput::Questions(Vec::new()),
            UnitId::Product | UnitId::Comparison | UnitId::Faq => {
                UnitOutput::Document(Document::Faq { faqs: Vec::new() })
            }
        })
    }
}
