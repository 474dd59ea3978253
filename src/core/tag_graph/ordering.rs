#![allow(clippy::result_large_err)]

//! Presentation ordering by fixed-point local repair.
//!
//! The first tag (lowest index) that sits before one of its dependencies is moved to
//! the slot immediately after its latest dependency, then the scan restarts from the
//! top. Repeating until a full pass moves nothing yields a specific order with minimal
//! movement from the input; a plain topological sort would produce a different one.

use crate::core::error::AppError;
use crate::core::tag_graph::dependencies::DependencyAnalysis;
use crate::core::types::ErrorCategory;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Smallest move budget used when none is configured.
pub const MIN_MOVE_BUDGET: usize = 64;

/// Knobs for [`order_tags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderingOptions {
    /// Reject working lists whose tags form a dependency cycle before repairing.
    pub check_cycles: bool,
    /// Upper bound on repositioning moves. `None` derives one from the list length.
    pub max_moves: Option<usize>,
}

impl Default for OrderingOptions {
    fn default() -> Self {
        Self {
            check_cycles: true,
            max_moves: None,
        }
    }
}

/// Move budget for a list of `len` tags when none is configured.
pub fn default_move_budget(len: usize) -> usize {
    len.saturating_mul(len)
        .saturating_mul(len)
        .max(MIN_MOVE_BUDGET)
}

/// Reorder `tag_order` so each tag appears after every dependency present in the list.
///
/// Dependencies that are not in the list do not constrain the order. Self-references
/// never move a tag.
pub fn order_tags<S: AsRef<str>>(
    analysis: &DependencyAnalysis,
    tag_order: &[S],
    options: &OrderingOptions,
) -> Result<Vec<String>, AppError> {
    let mut ordered: Vec<String> = tag_order
        .iter()
        .map(|tag| tag.as_ref().to_string())
        .collect();
    if ordered.is_empty() {
        return Ok(ordered);
    }

    if options.check_cycles {
        ensure_acyclic(analysis, &ordered)?;
    }

    let budget = options
        .max_moves
        .unwrap_or_else(|| default_move_budget(ordered.len()));
    let mut moves = 0usize;

    while let Some((from, anchor)) = first_misplaced(analysis, &ordered) {
        if moves >= budget {
            return Err(AppError::new(
                ErrorCategory::OrderingError,
                format!(
                    "tag ordering did not stabilize after {} moves (last tag moved: '{}')",
                    moves, ordered[from]
                ),
            )
            .with_code("TAG-ORDER-002")
            .with_suggestion("check the schema for circular dependencies"));
        }
        let tag = ordered.remove(from);
        // `anchor` shifted down by one after the removal, so this lands right after it.
        ordered.insert(anchor, tag);
        moves += 1;
        tracing::trace!(tag = %ordered[anchor], from, to = anchor, "repositioned tag");
    }

    tracing::debug!(tags = ordered.len(), moves, "tag order stabilized");
    Ok(ordered)
}

/// Position of the first tag placed before one of its dependencies, with the position
/// of its latest dependency.
fn first_misplaced(analysis: &DependencyAnalysis, ordered: &[String]) -> Option<(usize, usize)> {
    ordered.iter().enumerate().find_map(|(index, tag)| {
        let latest = analysis
            .dependencies_of(tag)?
            .iter()
            .filter_map(|dep| ordered.iter().position(|candidate| candidate == dep))
            .max()?;
        (latest > index).then_some((index, latest))
    })
}

fn ensure_acyclic(analysis: &DependencyAnalysis, ordered: &[String]) -> Result<(), AppError> {
    let mut graph: DiGraph<&str, ()> = DiGraph::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
    for tag in ordered {
        nodes
            .entry(tag.as_str())
            .or_insert_with(|| graph.add_node(tag.as_str()));
    }
    for tag in ordered {
        let to = nodes[tag.as_str()];
        let Some(deps) = analysis.dependencies_of(tag) else {
            continue;
        };
        for dep in deps.iter().filter(|dep| *dep != tag) {
            if let Some(&from) = nodes.get(dep.as_str()) {
                graph.add_edge(from, to, ());
            }
        }
    }

    toposort(&graph, None).map(|_| ()).map_err(|cycle| {
        let tag = graph[cycle.node_id()];
        AppError::new(
            ErrorCategory::OrderingError,
            format!("cannot order tags: '{}' is part of a dependency cycle", tag),
        )
        .with_code("TAG-ORDER-001")
        .with_suggestion("run `mediatag cycles` to list the cycles and break one of them")
    })
}
