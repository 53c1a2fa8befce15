#![forbid(unsafe_code)]

//! `alluvial` renders the data side of Sankey flow diagrams, headlessly.
//!
//! Given weighted `(from, to, flow)` records it builds a node graph
//! (`alluvial-core`), assigns columns, vertical bands, and per-ribbon
//! sub-offsets (`alluvial-layout`), and maps the result into pixel-space
//! rectangles and ribbon endpoints. Curve drawing, fonts, colors, animation,
//! and hit-testing stay with the host toolkit.
//!
//! ```
//! use alluvial::{DiagramOptions, FlowRecord, flow_diagram};
//!
//! let records = vec![
//!     FlowRecord::new("Oil", "Energy", 15.0),
//!     FlowRecord::new("Gas", "Energy", 20.0),
//! ];
//! let diagram = flow_diagram(&records, &DiagramOptions::default()).unwrap();
//! assert_eq!(diagram.extents.max_x, 1);
//! assert_eq!(diagram.geometry.ribbons.len(), 2);
//! ```

pub use alluvial_core::{FlowEdge, FlowGraph, FlowRecord, Node, build_graph};
pub use alluvial_layout::{
    Extents, FlowGeometry, GeometryOptions, LayoutOptions, LinearScale, NodeGeometry, PixelMapper,
    RibbonGeometry, SizePolicy, layout, map_geometry,
};

use rustc_hash::FxHashMap;
use tracing::debug;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] alluvial_core::Error),
    #[error(transparent)]
    Layout(#[from] alluvial_layout::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Host-facing options for one diagram update: the recognized dataset
/// options plus the pixel box the geometry is mapped into.
#[derive(Debug, Clone)]
pub struct DiagramOptions {
    /// Pins specific nodes to specific columns.
    pub column: FxHashMap<String, u32>,
    /// Vertical ordering hint; lower values stack higher.
    pub priority: FxHashMap<String, f64>,
    pub size: SizePolicy,
    /// Gap between stacked nodes within a column, in data units.
    pub node_padding: f64,
    /// Rendered column width in pixels.
    pub node_width: f64,
    /// Display labels per node key; missing keys fall back to the key.
    pub labels: FxHashMap<String, String>,
    /// Pixel width of the target box.
    pub width: f64,
    /// Pixel height of the target box.
    pub height: f64,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            column: FxHashMap::default(),
            priority: FxHashMap::default(),
            size: SizePolicy::default(),
            node_padding: 0.0,
            node_width: 20.0,
            labels: FxHashMap::default(),
            width: 600.0,
            height: 400.0,
        }
    }
}

/// A fully laid-out diagram: the mutated node graph, its data-space extents,
/// and the pixel geometry derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDiagramLayout {
    pub graph: FlowGraph,
    pub extents: Extents,
    pub geometry: FlowGeometry,
}

/// Runs the whole pipeline: build the graph, lay it out, map it to pixels.
///
/// The x scale spans `[0, max_x]` across the box width minus one node width,
/// so the last column's node body stays inside the box; the y scale spans
/// `[0, max_y]` top-down.
pub fn flow_diagram(records: &[FlowRecord], opts: &DiagramOptions) -> Result<FlowDiagramLayout> {
    let mut graph = build_graph(records)?;

    let layout_opts = LayoutOptions {
        column: opts.column.clone(),
        priority: opts.priority.clone(),
        size: opts.size,
        node_padding: opts.node_padding,
    };
    let extents = layout(&mut graph, records, &layout_opts)?;

    let x_scale = LinearScale::new(
        f64::from(extents.max_x),
        (0.0, (opts.width - opts.node_width).max(0.0)),
    );
    let y_scale = LinearScale::new(extents.max_y, (0.0, opts.height));
    let geometry_opts = GeometryOptions {
        node_width: opts.node_width,
        size: opts.size,
        labels: opts.labels.clone(),
    };
    let geometry = map_geometry(&graph, records, &geometry_opts, &x_scale, &y_scale)?;

    debug!(
        nodes = geometry.nodes.len(),
        ribbons = geometry.ribbons.len(),
        "flow diagram ready"
    );
    Ok(FlowDiagramLayout {
        graph,
        extents,
        geometry,
    })
}
