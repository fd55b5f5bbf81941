// src/sink/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use crate::errors::{ContentError, Result};

pub mod memory;

pub use memory::MemorySink;

/// Destination for finished documents.
pub trait OutputSink: Send + Sync + Debug {
    /// Persist `document` under `name`.
    fn write(&self, document: &Value, name: &str) -> Result<()>;
}

/// Writes `<dir>/<name>.json`, pretty-printed UTF-8.
///
/// The directory is created on the first write.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl OutputSink for FileSink {
    fn write(&self, document: &Value, name: &str) -> Result<()> {
        let rendered = serde_json::to_string_pretty(document)
            .map_err(|e| ContentError::Serialization(format!("document {name}: {e}")))?;

        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        fs::write(&path, rendered)?;

        info!(path = %path.display(), "wrote document");
        Ok(())
    }
}
