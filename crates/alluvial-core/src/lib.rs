#![forbid(unsafe_code)]

//! Flow-graph data model and builder for Sankey diagrams.
//!
//! This crate turns an ordered list of `(from, to, flow)` records into a
//! [`FlowGraph`]: an insertion-ordered map from node key to a [`Node`] that
//! aggregates inbound/outbound throughput and carries flow-sorted edge lists.
//! The graph is rebuilt wholesale on every data update; layout (a separate
//! crate) mutates it in place afterwards.

pub mod builder;
pub mod error;
pub mod model;

pub use builder::build_graph;
pub use error::{Error, Result};
pub use model::{FlowEdge, FlowGraph, FlowRecord, Node};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
