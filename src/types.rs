// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of one of the five step units.
///
/// The set is closed: every place that dispatches on a unit matches on this
/// enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitId {
    Parser,
    Questions,
    Product,
    Comparison,
    Faq,
}

impl UnitId {
    /// All units in declaration order.
    pub const ALL: [UnitId; 5] = [
        UnitId::Parser,
        UnitId::Questions,
        UnitId::Product,
        UnitId::Comparison,
        UnitId::Faq,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UnitId::Parser => "parser",
            UnitId::Questions => "questions",
            UnitId::Product => "product",
            UnitId::Comparison => "comparison",
            UnitId::Faq => "faq",
        }
    }

    /// Default dependency set for this unit.
    pub fn default_dependencies(self) -> &'static [UnitId] {
        match self {
            UnitId::Parser => &[],
            UnitId::Questions | UnitId::Product | UnitId::Comparison => &[UnitId::Parser],
            UnitId::Faq => &[UnitId::Parser, UnitId::Questions],
        }
    }

    /// Whether the unit body calls the text-completion service.
    pub fn uses_completion(self) -> bool {
        !matches!(self, UnitId::Parser)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parser" => Ok(UnitId::Parser),
            "questions" => Ok(UnitId::Questions),
            "product" => Ok(UnitId::Product),
            "comparison" => Ok(UnitId::Comparison),
            "faq" => Ok(UnitId::Faq),
            other => Err(format!(
                "unknown unit: {other} (expected parser, questions, product, comparison or faq)"
            )),
        }
    }
}

/// Lifecycle of a unit within one run. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    Pending,
    Running,
    Completed,
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UnitStatus::Pending => "pending",
            UnitStatus::Running => "running",
            UnitStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// How the scheduler runs the units of one ready generation.
///
/// - `Sequential`: one unit at a time, in declaration order (default).
/// - `Concurrent`: the whole generation at once against a store snapshot;
///   outputs are written after every unit in the generation has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Sequential,
    Concurrent,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Sequential
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(ExecutionMode::Sequential),
            "concurrent" => Ok(ExecutionMode::Concurrent),
            other => Err(format!(
                "invalid execution mode: {other} (expected \"sequential\" or \"concurrent\")"
            )),
        }
    }
}
