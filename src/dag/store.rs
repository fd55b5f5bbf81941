// src/dag/store.rs

//! Write-once store shared by all units of a run.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::content::{Document, Product, Question};
use crate::errors::{ContentError, Result};
use crate::types::UnitId;

/// Key under which the raw seed is visible to units.
pub const RAW_INPUT_KEY: &str = "raw_input";

/// Output of one unit body.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitOutput {
    Product(Arc<Product>),
    Questions(Vec<Question>),
    Document(Document),
}

impl UnitOutput {
    pub fn kind(&self) -> &'static str {
        match self {
            UnitOutput::Product(_) => "product",
            UnitOutput::Questions(_) => "questions",
            UnitOutput::Document(_) => "document",
        }
    }
}

/// Mapping from unit id (plus the raw-input sentinel) to output.
///
/// Every key is written at most once per run. Reading a key that has not
/// been written is a contract violation on the reading unit.
#[derive(Debug, Clone, Default)]
pub struct SharedStore {
    raw_input: Value,
    outputs: HashMap<UnitId, UnitOutput>,
}

impl SharedStore {
    pub fn new(raw_input: Value) -> Self {
        Self {
            raw_input,
            outputs: HashMap::new(),
        }
    }

    pub fn raw_input(&self) -> &Value {
        &self.raw_input
    }

    /// Record `output` under `unit`. Fails if the key is already populated.
    pub fn insert(&mut self, unit: UnitId, output: UnitOutput) -> Result<()> {
        if self.outputs.contains_key(&unit) {
            return Err(ContentError::duplicate_write(unit, unit.as_str()));
        }
        self.outputs.insert(unit, output);
        Ok(())
    }

    pub fn contains(&self, key: UnitId) -> bool {
        self.outputs.contains_key(&key)
    }

    pub fn get(&self, key: UnitId) -> Option<&UnitOutput> {
        self.outputs.get(&key)
    }

    /// Read `key` on behalf of `reader`.
    pub fn require(&self, reader: UnitId, key: UnitId) -> Result<&UnitOutput> {
        self.outputs
            .get(&key)
            .ok_or_else(|| ContentError::missing_key(reader, key.as_str()))
    }

    /// The parsed product, as read by `reader`.
    pub fn product(&self, reader: UnitId) -> Result<Arc<Product>> {
        match self.require(reader, UnitId::Parser)? {
            UnitOutput::Product(p) => Ok(Arc::clone(p)),
            other => Err(wrong_kind(reader, UnitId::Parser, other)),
        }
    }

    /// The generated question batch, as read by `reader`.
    pub fn questions(&self, reader: UnitId) -> Result<&[Question]> {
        match self.require(reader, UnitId::Questions)? {
            UnitOutput::Questions(q) => Ok(q),
            other => Err(wrong_kind(reader, UnitId::Questions, other)),
        }
    }

    /// The page document a unit produced, if it produced one.
    pub fn document(&self, key: UnitId) -> Option<&Document> {
        match self.outputs.get(&key) {
            Some(UnitOutput::Document(doc)) => Some(doc),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

fn wrong_kind(reader: UnitId, key: UnitId, found: &UnitOutput) -> ContentError {
    ContentError::ContractViolation {
        unit: reader,
        key: format!("{key} (holds {})", found.kind()),
        reason: "requires a different output kind under",
    }
}
