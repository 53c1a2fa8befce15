//! Column assignment: longest-path layering from source nodes.
//!
//! A node's column is one greater than the maximum column of its
//! predecessors. Pinned nodes keep their caller-supplied column and
//! short-circuit the recursion, acting as fixed anchors. After assignment
//! every edge must point strictly forward; in an acyclic graph a backward
//! edge can only be introduced by an override, so a violation is reported
//! as [`Error::InvalidColumnOverride`].

use crate::{Error, Result};
use alluvial_core::FlowGraph;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Visit {
    InProgress,
    Done(u32),
}

/// Assigns `x` to every node and returns the highest column.
pub fn assign_columns(graph: &mut FlowGraph) -> Result<u32> {
    let mut state: FxHashMap<String, Visit> = FxHashMap::default();
    let keys: Vec<String> = graph.keys().map(str::to_string).collect();

    let mut max_x = 0;
    for key in &keys {
        let column = column_of(graph, key, &mut state)?;
        max_x = max_x.max(column);
    }

    for node in graph.iter_mut() {
        if let Some(Visit::Done(column)) = state.get(&node.key) {
            node.x = Some(*column);
        }
    }

    check_edge_direction(graph)?;
    Ok(max_x)
}

fn column_of(graph: &FlowGraph, key: &str, state: &mut FxHashMap<String, Visit>) -> Result<u32> {
    let node = graph.get(key).ok_or_else(|| Error::UnresolvedNode {
        key: key.to_string(),
    })?;

    // Pinned anchors are fixed: they never recurse, which also breaks any
    // cycle routed through them.
    if let Some(pinned) = node.pinned_column {
        state.insert(key.to_string(), Visit::Done(pinned));
        return Ok(pinned);
    }

    match state.get(key) {
        Some(Visit::Done(column)) => return Ok(*column),
        Some(Visit::InProgress) => {
            return Err(Error::CyclicGraph {
                key: key.to_string(),
            });
        }
        None => {}
    }
    state.insert(key.to_string(), Visit::InProgress);

    let mut column = 0;
    for edge in &node.from {
        column = column.max(column_of(graph, &edge.key, state)? + 1);
    }

    state.insert(key.to_string(), Visit::Done(column));
    Ok(column)
}

fn check_edge_direction(graph: &FlowGraph) -> Result<()> {
    for node in graph.iter() {
        let x = node.x.unwrap_or(0);
        for edge in &node.to {
            let neighbor_x = graph.get(&edge.key).and_then(|n| n.x).unwrap_or(0);
            if neighbor_x <= x {
                return Err(Error::InvalidColumnOverride {
                    from: node.key.clone(),
                    to: edge.key.clone(),
                });
            }
        }
    }
    Ok(())
}
