//! Flow-graph construction.
//!
//! One pass over the input accumulates per-node totals and edge lists; a
//! second pass sorts each node's edge lists by descending flow. Vec's sort is
//! stable, and edges are pushed in input order, so equal flows keep their
//! original relative order. That ordering is what the ribbon drawing layer
//! relies on for stacking.

use crate::error::{Error, Result};
use crate::model::{FlowEdge, FlowGraph, FlowRecord, f64_cmp};

/// Builds the node graph from an ordered sequence of flow records.
///
/// Rejects non-finite or negative flows and self-referential edges; zero-flow
/// records are permitted and later render as zero-height bands.
pub fn build_graph(records: &[FlowRecord]) -> Result<FlowGraph> {
    let mut graph = FlowGraph::default();

    for (index, record) in records.iter().enumerate() {
        if !record.flow.is_finite() || record.flow < 0.0 {
            return Err(Error::InvalidFlow {
                index,
                value: record.flow,
            });
        }
        if record.from == record.to {
            return Err(Error::SelfLoopEdge {
                key: record.from.clone(),
                index,
            });
        }

        let source = graph.ensure_node(&record.from);
        source.flow_out += record.flow;
        source.to.push(FlowEdge {
            key: record.to.clone(),
            flow: record.flow,
            index,
            add_y: 0.0,
        });

        let target = graph.ensure_node(&record.to);
        target.flow_in += record.flow;
        target.from.push(FlowEdge {
            key: record.from.clone(),
            flow: record.flow,
            index,
            add_y: 0.0,
        });
    }

    for node in graph.iter_mut() {
        sort_edges_by_flow(&mut node.from);
        sort_edges_by_flow(&mut node.to);
    }

    Ok(graph)
}

fn sort_edges_by_flow(edges: &mut [FlowEdge]) {
    edges.sort_by(|a, b| f64_cmp(b.flow, a.flow));
}
