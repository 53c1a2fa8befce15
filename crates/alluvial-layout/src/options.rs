//! Layout configuration.

use crate::{Error, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Node-height sizing policy: whether a node's rendered band covers the
/// minimum or the maximum of its total inflow and outflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizePolicy {
    Min,
    #[default]
    Max,
}

impl SizePolicy {
    /// Parses the host-facing `size` option value. Resolved once during
    /// configuration validation, not re-dispatched per draw call.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            _ => Err(Error::UnknownSizePolicy {
                value: value.to_string(),
            }),
        }
    }

    /// Band height for a node with the given totals. A pure source or sink
    /// has one zero side; the nonzero side is used for both operands.
    pub fn apply(self, flow_in: f64, flow_out: f64) -> f64 {
        let a = if flow_in != 0.0 { flow_in } else { flow_out };
        let b = if flow_out != 0.0 { flow_out } else { flow_in };
        match self {
            Self::Min => a.min(b),
            Self::Max => a.max(b),
        }
    }
}

/// Recognized layout options, mirroring the host-facing dataset options.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    /// Pins specific nodes to specific columns.
    pub column: FxHashMap<String, u32>,
    /// Vertical ordering hint; lower values stack higher.
    pub priority: FxHashMap<String, f64>,
    pub size: SizePolicy,
    /// Gap between stacked nodes within a column, in data units.
    pub node_padding: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_min_and_max_only() {
        assert_eq!(SizePolicy::parse("min").unwrap(), SizePolicy::Min);
        assert_eq!(SizePolicy::parse("max").unwrap(), SizePolicy::Max);
        assert!(matches!(
            SizePolicy::parse("median").unwrap_err(),
            Error::UnknownSizePolicy { .. }
        ));
    }

    #[test]
    fn apply_uses_nonzero_side_for_sources_and_sinks() {
        assert_eq!(SizePolicy::Min.apply(0.0, 10.0), 10.0);
        assert_eq!(SizePolicy::Max.apply(0.0, 10.0), 10.0);
        assert_eq!(SizePolicy::Min.apply(7.0, 0.0), 7.0);
    }

    #[test]
    fn apply_picks_min_or_max_of_both_sides() {
        assert_eq!(SizePolicy::Min.apply(4.0, 9.0), 4.0);
        assert_eq!(SizePolicy::Max.apply(4.0, 9.0), 9.0);
    }

    #[test]
    fn apply_is_zero_for_isolated_nodes() {
        assert_eq!(SizePolicy::Max.apply(0.0, 0.0), 0.0);
    }
}
