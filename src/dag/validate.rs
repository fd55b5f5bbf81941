// src/dag/validate.rs

use std::collections::HashSet;

use crate::dag::graph::UnitGraph;
use crate::dag::unit::StepUnit;
use crate::errors::{ContentError, Result};

/// Check a unit set before a production run.
///
/// Rejects an empty set, duplicate ids, dependencies on units that are not in
/// the set, self-dependencies and cycles.
pub fn validate_units(units: &[StepUnit]) -> Result<()> {
    ensure_has_units(units)?;
    validate_unique_ids(units)?;
    validate_dependencies(units)?;
    UnitGraph::from_units(units).topological_order()?;
    Ok(())
}

fn ensure_has_units(units: &[StepUnit]) -> Result<()> {
    if units.is_empty() {
        return Err(ContentError::ConfigError(
            "unit set must contain at least one unit".to_string(),
        ));
    }
    Ok(())
}

fn validate_unique_ids(units: &[StepUnit]) -> Result<()> {
    let mut seen = HashSet::new();
    for unit in units {
        if !seen.insert(unit.id()) {
            return Err(ContentError::ConfigError(format!(
                "unit '{}' is declared more than once",
                unit.id()
            )));
        }
    }
    Ok(())
}

fn validate_dependencies(units: &[StepUnit]) -> Result<()> {
    let ids: HashSet<_> = units.iter().map(StepUnit::id).collect();
    for unit in units {
        for dep in unit.dependencies() {
            if *dep == unit.id() {
                return Err(ContentError::ConfigError(format!(
                    "unit '{}' cannot depend on itself",
                    unit.id()
                )));
            }
            if !ids.contains(dep) {
                return Err(ContentError::ConfigError(format!(
                    "unit '{}' has unknown dependency '{}'",
                    unit.id(),
                    dep
                )));
            }
        }
    }
    Ok(())
}
