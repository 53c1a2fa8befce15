//! Vertical ordering and proportional stacking within columns.
//!
//! Columns are processed left to right. Within a column, nodes are ordered
//! either by explicit priority or by a barycenter pass over the flow-weighted
//! band centers of their already-placed predecessors; each node's `y` is then
//! the cumulative height of the nodes stacked above it plus padding. Finally
//! every edge gets its `add_y` sub-offset: cumulative flow sums over the
//! node's flow-sorted edge lists, so the largest ribbon sits at the top of
//! the band and no two ribbons overlap at either endpoint.

use crate::options::LayoutOptions;
use alluvial_core::FlowGraph;
use std::cmp::Ordering;

/// Orders and stacks every column, writing `y` per node. Returns the tallest
/// column's stacked extent (`max_y`).
pub fn stack_columns(graph: &mut FlowGraph, max_x: u32, opts: &LayoutOptions) -> f64 {
    let heights: Vec<f64> = graph
        .iter()
        .map(|node| opts.size.apply(node.flow_in, node.flow_out))
        .collect();

    let mut columns: Vec<Vec<usize>> = vec![Vec::new(); max_x as usize + 1];
    for (i, node) in graph.iter().enumerate() {
        let x = node.x.unwrap_or(0) as usize;
        columns[x].push(i);
    }

    let has_priority = graph.iter().any(|n| n.priority.is_some());

    // Band center per node, filled in column by column so the next column's
    // barycenters see only already-placed predecessors.
    let mut centers: Vec<Option<f64>> = vec![None; graph.len()];
    let mut max_y: f64 = 0.0;

    for column in &mut columns {
        if has_priority {
            order_by_priority(graph, column);
        } else {
            order_by_barycenter(graph, &centers, column);
        }

        let mut y = 0.0;
        for &ni in column.iter() {
            let height = heights[ni];
            centers[ni] = Some(y + height / 2.0);
            if let Some(node) = graph.get_index_mut(ni) {
                node.y = Some(y);
            }
            y += height + opts.node_padding;
        }
        if !column.is_empty() {
            max_y = max_y.max(y - opts.node_padding);
        }
    }

    max_y
}

/// Ascending priority; prioritized nodes stack above unprioritized ones.
/// The sort is stable, so ties keep graph insertion order.
fn order_by_priority(graph: &FlowGraph, column: &mut [usize]) {
    column.sort_by(|&a, &b| {
        let pa = graph.get_index(a).and_then(|n| n.priority);
        let pb = graph.get_index(b).and_then(|n| n.priority);
        match (pa, pb) {
            (Some(pa), Some(pb)) => f64_cmp(pa, pb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Barycenter ordering: a node's sort key is the flow-weighted mean of its
/// predecessors' band centers. Nodes with no placed predecessor keep their
/// slots; the rest sort among themselves, ties by original position.
fn order_by_barycenter(graph: &FlowGraph, centers: &[Option<f64>], column: &mut [usize]) {
    struct Entry {
        node: usize,
        position: usize,
        barycenter: Option<f64>,
    }

    let entries: Vec<Entry> = column
        .iter()
        .enumerate()
        .map(|(position, &ni)| {
            let mut sum = 0.0;
            let mut weight = 0.0;
            if let Some(node) = graph.get_index(ni) {
                for edge in &node.from {
                    let center = graph
                        .index_of(&edge.key)
                        .and_then(|pi| centers.get(pi).copied().flatten());
                    if let Some(center) = center {
                        sum += edge.flow * center;
                        weight += edge.flow;
                    }
                }
            }
            Entry {
                node: ni,
                position,
                barycenter: (weight > 0.0).then_some(sum / weight),
            }
        })
        .collect();

    let mut sortable: Vec<&Entry> = entries.iter().filter(|e| e.barycenter.is_some()).collect();
    sortable.sort_by(|a, b| {
        f64_cmp(a.barycenter.unwrap_or(0.0), b.barycenter.unwrap_or(0.0))
            .then_with(|| a.position.cmp(&b.position))
    });

    let mut sorted = sortable.into_iter();
    for (slot, entry) in entries.iter().enumerate() {
        if entry.barycenter.is_some() {
            if let Some(next) = sorted.next() {
                column[slot] = next.node;
            }
        } else {
            column[slot] = entry.node;
        }
    }
}

/// Writes each edge's vertical sub-offset: cumulative flow sums over the
/// already-sorted `to` and `from` lists.
pub fn assign_edge_offsets(graph: &mut FlowGraph) {
    for node in graph.iter_mut() {
        let mut offset = 0.0;
        for edge in &mut node.to {
            edge.add_y = offset;
            offset += edge.flow;
        }
        let mut offset = 0.0;
        for edge in &mut node.from {
            edge.add_y = offset;
            offset += edge.flow;
        }
    }
}

fn f64_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
