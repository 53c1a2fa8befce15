#![forbid(unsafe_code)]

//! Layout engine for Sankey flow graphs.
//!
//! Consumes the node graph built by `alluvial-core` and assigns, in place:
//! an integer column per node (longest-path layering with optional pinned
//! anchors), a vertical offset per node (priority or barycenter ordering,
//! proportional stacking), and a vertical sub-offset (`add_y`) per edge so
//! ribbons leave and enter nodes in distinct, non-overlapping slices.
//! A separate geometry step maps the data-space result through
//! caller-supplied scales into pixel rectangles and ribbon endpoints.

pub mod column;
pub mod geometry;
pub mod options;
pub mod stack;

pub use geometry::{
    FlowGeometry, GeometryOptions, LinearScale, NodeGeometry, PixelMapper, RibbonGeometry,
    map_geometry,
};
pub use options::{LayoutOptions, SizePolicy};

use alluvial_core::{FlowGraph, FlowRecord};
use tracing::debug;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cyclic flow graph: no column assignment exists (cycle through '{key}')")]
    CyclicGraph { key: String },

    #[error("column override conflict: edge '{from}' -> '{to}' would point backward")]
    InvalidColumnOverride { from: String, to: String },

    #[error("unknown size policy '{value}': expected \"min\" or \"max\"")]
    UnknownSizePolicy { value: String },

    #[error("record references node '{key}' missing from the graph")]
    UnresolvedNode { key: String },

    #[error("node '{key}' has no layout position; run layout before mapping geometry")]
    NodeNotLaidOut { key: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Overall bounding size of the laid-out graph in data-space units. The
/// caller uses these to configure axis scale bounds (`min = 0`).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extents {
    /// Highest assigned column.
    pub max_x: u32,
    /// Tallest column's total stacked height, padding included.
    pub max_y: f64,
}

/// Lays out the flow graph in place and returns its extents.
///
/// Runs, in order: override application, longest-path column assignment,
/// per-column vertical ordering and stacking, and per-edge `add_y`
/// computation. Computed fields are reset first, so re-running with the same
/// input and options is idempotent. On error the graph must be considered
/// unpositioned; callers should skip rendering for the current update cycle.
pub fn layout(
    graph: &mut FlowGraph,
    records: &[FlowRecord],
    opts: &LayoutOptions,
) -> Result<Extents> {
    debug!(
        nodes = graph.len(),
        records = records.len(),
        size = ?opts.size,
        "laying out flow graph"
    );

    for record in records {
        for key in [&record.from, &record.to] {
            if !graph.contains_key(key) {
                return Err(Error::UnresolvedNode { key: key.clone() });
            }
        }
    }

    apply_overrides(graph, opts);

    let max_x = column::assign_columns(graph)?;
    let max_y = stack::stack_columns(graph, max_x, opts);
    stack::assign_edge_offsets(graph);

    debug!(max_x, max_y, "flow graph laid out");
    Ok(Extents { max_x, max_y })
}

/// Resolves `column`/`priority` overrides onto the nodes and clears any
/// previously computed positions.
fn apply_overrides(graph: &mut FlowGraph, opts: &LayoutOptions) {
    for node in graph.iter_mut() {
        node.pinned_column = opts.column.get(&node.key).copied();
        node.priority = opts.priority.get(&node.key).copied();
        node.x = None;
        node.y = None;
        for edge in node.from.iter_mut().chain(node.to.iter_mut()) {
            edge.add_y = 0.0;
        }
    }
}
