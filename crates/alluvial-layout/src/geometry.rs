//! Pixel-geometry mapping.
//!
//! Layout is pure data-space computation; this step maps it through
//! caller-supplied scales into pixel coordinates for drawing. The host
//! supplies one [`PixelMapper`] per axis (its own scale objects, or the
//! [`LinearScale`] provided here) so the layout engine never touches
//! rendering concerns directly.

use crate::{Error, Result};
use alluvial_core::{FlowEdge, FlowGraph, FlowRecord};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Converts a data-space coordinate into a pixel coordinate.
pub trait PixelMapper {
    fn pixel_for(&self, value: f64) -> f64;
}

/// A linear scale over the domain `[0, domain_max]`.
///
/// With `reverse` set, the domain maps onto the range back to front — the
/// orientation hosts with bottom-up y ranges need. Diagram axes are
/// configured with `min = 0` and `max` from the layout extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    pub domain_max: f64,
    pub range_start: f64,
    pub range_end: f64,
    pub reverse: bool,
}

impl LinearScale {
    pub fn new(domain_max: f64, range: (f64, f64)) -> Self {
        Self {
            domain_max,
            range_start: range.0,
            range_end: range.1,
            reverse: false,
        }
    }

    pub fn reversed(domain_max: f64, range: (f64, f64)) -> Self {
        Self {
            reverse: true,
            ..Self::new(domain_max, range)
        }
    }
}

impl PixelMapper for LinearScale {
    fn pixel_for(&self, value: f64) -> f64 {
        let t = if self.domain_max > 0.0 {
            value / self.domain_max
        } else {
            0.0
        };
        let t = if self.reverse { 1.0 - t } else { t };
        self.range_start + t * (self.range_end - self.range_start)
    }
}

#[derive(Debug, Clone)]
pub struct GeometryOptions {
    /// Rendered column width in pixels.
    pub node_width: f64,
    /// Node-height sizing policy, shared with layout.
    pub size: crate::SizePolicy,
    /// Display labels per node key; missing keys fall back to the key itself.
    pub labels: FxHashMap<String, String>,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            node_width: 20.0,
            size: crate::SizePolicy::default(),
            labels: FxHashMap::default(),
        }
    }
}

/// One node's pixel rectangle plus its resolved display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeGeometry {
    pub key: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Pixel endpoints of one flow ribbon. `x`/`y` anchor the ribbon at the right
/// face of the source node, `x2`/`y2` at the left face of the target node;
/// `height` is the ribbon's pixel thickness at either end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RibbonGeometry {
    /// Position of the originating record in the input sequence.
    pub index: usize,
    pub from: String,
    pub to: String,
    pub x: f64,
    pub y: f64,
    pub x2: f64,
    pub y2: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGeometry {
    pub nodes: Vec<NodeGeometry>,
    pub ribbons: Vec<RibbonGeometry>,
}

/// Maps a laid-out graph into pixel-space node rectangles and ribbon
/// endpoints. `records` must be the same sequence the graph was built from;
/// each record's position is its edge index for the `add_y` lookup.
pub fn map_geometry(
    graph: &FlowGraph,
    records: &[FlowRecord],
    opts: &GeometryOptions,
    x_scale: &dyn PixelMapper,
    y_scale: &dyn PixelMapper,
) -> Result<FlowGeometry> {
    let mut nodes = Vec::with_capacity(graph.len());
    for node in graph.iter() {
        let (x, y) = position_of(graph, &node.key)?;
        let px = x_scale.pixel_for(x as f64);
        let py = y_scale.pixel_for(y);
        let band = opts.size.apply(node.flow_in, node.flow_out);
        let height = (y_scale.pixel_for(y + band) - py).abs();
        let label = opts
            .labels
            .get(&node.key)
            .cloned()
            .unwrap_or_else(|| node.key.clone());
        nodes.push(NodeGeometry {
            key: node.key.clone(),
            label,
            x: px,
            y: py,
            width: opts.node_width,
            height,
        });
    }

    let mut ribbons = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let (from_x, from_y) = position_of(graph, &record.from)?;
        let (to_x, to_y) = position_of(graph, &record.to)?;
        let from_node = graph.get(&record.from).ok_or_else(|| Error::UnresolvedNode {
            key: record.from.clone(),
        })?;
        let to_node = graph.get(&record.to).ok_or_else(|| Error::UnresolvedNode {
            key: record.to.clone(),
        })?;

        let start_y = from_y + add_y_for(&from_node.to, &record.to, index);
        let end_y = to_y + add_y_for(&to_node.from, &record.from, index);

        let y = y_scale.pixel_for(start_y);
        ribbons.push(RibbonGeometry {
            index,
            from: record.from.clone(),
            to: record.to.clone(),
            x: x_scale.pixel_for(from_x as f64) + opts.node_width,
            y,
            x2: x_scale.pixel_for(to_x as f64),
            y2: y_scale.pixel_for(end_y),
            height: (y_scale.pixel_for(start_y + record.flow) - y).abs(),
        });
    }

    Ok(FlowGeometry { nodes, ribbons })
}

fn position_of(graph: &FlowGraph, key: &str) -> Result<(u32, f64)> {
    let node = graph.get(key).ok_or_else(|| Error::UnresolvedNode {
        key: key.to_string(),
    })?;
    match (node.x, node.y) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(Error::NodeNotLaidOut {
            key: key.to_string(),
        }),
    }
}

/// Finds the sub-offset of the edge `(key, index)` within an endpoint's edge
/// list. Unknown edges map to offset zero.
fn add_y_for(edges: &[FlowEdge], key: &str, index: usize) -> f64 {
    edges
        .iter()
        .find(|e| e.key == key && e.index == index)
        .map(|e| e.add_y)
        .unwrap_or(0.0)
}
