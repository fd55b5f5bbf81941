// src/engine/outputs.rs

use std::fmt;

use serde_json::Value;
use tracing::{debug, info};

use crate::content::Document;
use crate::dag::SharedStore;
use crate::errors::{ContentError, Result};
use crate::sink::OutputSink;
use crate::types::UnitId;

/// Named destination for one page document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputSlot {
    Faq,
    ProductPage,
    ComparisonPage,
}

impl OutputSlot {
    pub const ALL: [OutputSlot; 3] = [
        OutputSlot::Faq,
        OutputSlot::ProductPage,
        OutputSlot::ComparisonPage,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputSlot::Faq => "faq",
            OutputSlot::ProductPage => "product_page",
            OutputSlot::ComparisonPage => "comparison_page",
        }
    }

    /// Unit whose store entry fills this slot.
    pub fn source(self) -> UnitId {
        match self {
            OutputSlot::Faq => UnitId::Faq,
            OutputSlot::ProductPage => UnitId::Product,
            OutputSlot::ComparisonPage => UnitId::Comparison,
        }
    }
}

impl fmt::Display for OutputSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectedDocument {
    pub slot: OutputSlot,
    pub document: Document,
    /// Hex blake3 digest of the document's JSON encoding.
    pub fingerprint: String,
}

/// Page documents found in a finished store, keyed by slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutputs {
    documents: Vec<CollectedDocument>,
}

impl RunOutputs {
    /// Pick the page documents out of `store`. A slot whose unit produced
    /// nothing is simply absent.
    pub fn collect(store: &SharedStore) -> Result<Self> {
        let mut documents = Vec::new();
        for slot in OutputSlot::ALL {
            if let Some(document) = store.document(slot.source()) {
                let fingerprint = document.fingerprint()?;
                debug!(slot = %slot, %fingerprint, "collected document");
                documents.push(CollectedDocument {
                    slot,
                    document: document.clone(),
                    fingerprint,
                });
            }
        }
        Ok(Self { documents })
    }

    pub fn get(&self, slot: OutputSlot) -> Option<&CollectedDocument> {
        self.documents.iter().find(|d| d.slot == slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollectedDocument> {
        self.documents.iter()
    }

    pub fn is_complete(&self) -> bool {
        OutputSlot::ALL.iter().all(|slot| self.get(*slot).is_some())
    }

    /// Write every slot to `sink`, or nothing at all.
    ///
    /// All slots must be filled and every document must serialise before the
    /// first write is attempted.
    pub fn flush(&self, sink: &dyn OutputSink) -> Result<()> {
        let mut rendered: Vec<(OutputSlot, Value)> = Vec::with_capacity(OutputSlot::ALL.len());
        for slot in OutputSlot::ALL {
            let collected = self
                .get(slot)
                .ok_or_else(|| ContentError::IncompleteRun(slot.name().to_string()))?;
            let value = serde_json::to_value(&collected.document)
                .map_err(|e| ContentError::Serialization(format!("document {slot}: {e}")))?;
            rendered.push((slot, value));
        }

        for (slot, value) in &rendered {
            sink.write(value, slot.name())?;
        }
        info!(count = rendered.len(), "flushed documents");
        Ok(())
    }
}
