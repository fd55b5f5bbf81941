// src/errors.rs

//! Crate-wide error type and result alias.
//!
//! Every kind here propagates synchronously out of a step body or the
//! scheduler loop; nothing inside the core downgrades them to warnings.

use thiserror::Error;

use crate::types::UnitId;

#[derive(Error, Debug)]
pub enum ContentError {
    /// A unit read a store key its dependencies should have produced, or a
    /// key was written twice.
    #[error("Contract violation: unit '{unit}' {reason} '{key}'")]
    ContractViolation {
        unit: UnitId,
        key: String,
        reason: &'static str,
    },

    /// No unit is ready but the run is not complete.
    #[error("Scheduling deadlock: completed {completed:?}, still pending {pending:?}")]
    SchedulingDeadlock {
        completed: Vec<UnitId>,
        pending: Vec<UnitId>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Generation failure: {0}")]
    GenerationFailure(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Cycle detected in unit graph: {0}")]
    DagCycle(String),

    #[error("Run cancelled")]
    Cancelled,

    /// A named output slot was empty when the caller tried to flush it.
    #[error("Run incomplete: no document for output slot '{0}'")]
    IncompleteRun(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ContentError {
    /// Shorthand for the common "field X is wrong" validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        ContentError::Validation(msg.into())
    }

    pub(crate) fn missing_key(unit: UnitId, key: impl Into<String>) -> Self {
        ContentError::ContractViolation {
            unit,
            key: key.into(),
            reason: "requires missing store key",
        }
    }

    pub(crate) fn duplicate_write(unit: UnitId, key: impl Into<String>) -> Self {
        ContentError::ContractViolation {
            unit,
            key: key.into(),
            reason: "wrote already-populated store key",
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ContentError>;
