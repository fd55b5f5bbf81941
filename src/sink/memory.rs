// src/sink/memory.rs

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use super::OutputSink;
use crate::errors::Result;

/// In-memory sink that records every write, in order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded `(name, document)` pairs in write order.
    pub fn writes(&self) -> Vec<(String, Value)> {
        self.lock().clone()
    }

    /// The most recent document written under `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.lock()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, doc)| doc.clone())
    }

    pub fn names(&self) -> Vec<String> {
        self.lock().iter().map(|(n, _)| n.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(String, Value)>> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputSink for MemorySink {
    fn write(&self, document: &Value, name: &str) -> Result<()> {
        self.lock().push((name.to_string(), document.clone()));
        Ok(())
    }
}
