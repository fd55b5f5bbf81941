// src/dag/graph.rs

use std::collections::BTreeMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::unit::StepUnit;
use crate::errors::{ContentError, Result};
use crate::types::UnitId;

#[derive(Debug, Clone, Default)]
struct UnitNode {
    deps: Vec<UnitId>,
    dependents: Vec<UnitId>,
}

/// Adjacency view over a set of units, for diagnostics and dry-run output.
#[derive(Debug, Clone)]
pub struct UnitGraph {
    /// Units in declaration order.
    order: Vec<UnitId>,
    nodes: BTreeMap<UnitId, UnitNode>,
}

impl UnitGraph {
    pub fn from_units(units: &[StepUnit]) -> Self {
        let mut nodes: BTreeMap<UnitId, UnitNode> = BTreeMap::new();
        let order: Vec<UnitId> = units.iter().map(StepUnit::id).collect();

        for unit in units {
            nodes.entry(unit.id()).or_default().deps = unit.dependencies().to_vec();
        }

        for unit in units {
            for dep in unit.dependencies() {
                if let Some(node) = nodes.get_mut(dep) {
                    node.dependents.push(unit.id());
                }
            }
        }

        Self { order, nodes }
    }

    pub fn units(&self) -> &[UnitId] {
        &self.order
    }

    pub fn dependencies_of(&self, id: UnitId) -> &[UnitId] {
        self.nodes.get(&id).map(|n| n.deps.as_slice()).unwrap_or(&[])
    }

    pub fn dependents_of(&self, id: UnitId) -> &[UnitId] {
        self.nodes
            .get(&id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Units with no dependencies.
    pub fn roots(&self) -> Vec<UnitId> {
        self.order
            .iter()
            .copied()
            .filter(|id| self.dependencies_of(*id).is_empty())
            .collect()
    }

    /// A dependency-respecting order of all units.
    ///
    /// Edges run dep -> unit; a cycle is reported as [`ContentError::DagCycle`].
    pub fn topological_order(&self) -> Result<Vec<UnitId>> {
        let mut graph: DiGraphMap<UnitId, ()> = DiGraphMap::new();
        for id in &self.order {
            graph.add_node(*id);
        }
        for id in &self.order {
            for dep in self.dependencies_of(*id) {
                graph.add_edge(*dep, *id, ());
            }
        }

        toposort(&graph, None).map_err(|cycle| {
            ContentError::DagCycle(format!(
                "cycle detected in unit graph involving unit '{}'",
                cycle.node_id()
            ))
        })
    }
}
