//! Flow-graph record types.
//!
//! Edge references hold the neighbor's *key*, not a live reference; neighbor
//! lookups go through the owning [`FlowGraph`] at use time so the graph stays
//! an acyclic ownership tree even when the diagram itself is dense.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One raw input record: a directed, weighted connection between two named
/// nodes. The record's position in the input sequence doubles as its edge
/// index (stable tiebreaker and offset lookup key).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRecord {
    pub from: String,
    pub to: String,
    pub flow: f64,
}

impl FlowRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, flow: f64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            flow,
        }
    }
}

/// An edge as seen from one of its endpoint nodes.
///
/// `add_y` is the vertical sub-offset of this edge within the endpoint's
/// stacked band. It is zero until layout runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    /// Key of the neighbor node (the other endpoint).
    pub key: String,
    pub flow: f64,
    /// Position of the originating record in the input sequence.
    pub index: usize,
    #[serde(default)]
    pub add_y: f64,
}

/// A named aggregation point for flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub key: String,
    /// Total inbound throughput (sum over `from`).
    pub flow_in: f64,
    /// Total outbound throughput (sum over `to`).
    pub flow_out: f64,
    /// Incoming edges, sorted by descending flow (ties keep input order).
    pub from: Vec<FlowEdge>,
    /// Outgoing edges, sorted by descending flow (ties keep input order).
    pub to: Vec<FlowEdge>,
    /// Caller-pinned column, when a `column` override names this node.
    pub pinned_column: Option<u32>,
    /// Vertical ordering hint, when a `priority` override names this node.
    pub priority: Option<f64>,
    /// Assigned column. `None` until layout runs.
    pub x: Option<u32>,
    /// Assigned vertical offset in data units. `None` until layout runs.
    pub y: Option<f64>,
}

impl Node {
    pub(crate) fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            flow_in: 0.0,
            flow_out: 0.0,
            from: Vec::new(),
            to: Vec::new(),
            pinned_column: None,
            priority: None,
            x: None,
            y: None,
        }
    }

    /// True when no edge points at this node.
    pub fn is_source(&self) -> bool {
        self.from.is_empty()
    }

    /// True when no edge leaves this node.
    pub fn is_sink(&self) -> bool {
        self.to.is_empty()
    }
}

/// Insertion-ordered node mapping. Iteration order is the first sighting of
/// each key in the input sequence, which keeps build and layout deterministic
/// for identical inputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
    nodes: IndexMap<String, Node>,
}

impl FlowGraph {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.nodes.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.nodes.get_mut(key)
    }

    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.nodes.get_index(index).map(|(_, node)| node)
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_index_mut(index).map(|(_, node)| node)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.nodes.get_index_of(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.values_mut()
    }

    /// Fetches the node for `key`, creating an empty one on first sight.
    pub(crate) fn ensure_node(&mut self, key: &str) -> &mut Node {
        self.nodes
            .entry(key.to_string())
            .or_insert_with(|| Node::new(key))
    }
}

pub(crate) fn f64_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
