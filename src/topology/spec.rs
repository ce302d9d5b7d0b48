//! Per-layer node and edge specifications.
//!
//! A structured topology is declared as an ordered list of layer specs
//! (root layer first) plus one edge spec per adjacent layer pair. The specs
//! double as the structural contract: after construction, every vertex's
//! up/down degree is checked against its layer's spec.

use std::time::Duration;

use serde::Serialize;

/// Role of a vertex within the hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Spine,
    Leaf,
    Host,
}

impl std::fmt::Display for NodeRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeRole::Spine => write!(f, "spine"),
            NodeRole::Leaf => write!(f, "leaf"),
            NodeRole::Host => write!(f, "host"),
        }
    }
}

/// Layer-specific vertex metadata for a structured topology.
#[derive(Debug, Clone)]
pub struct StructuredNodeSpec {
    /// Number of links toward the layer above (closer to the core).
    pub up_total: usize,
    /// Number of links toward the layer below (closer to the hosts).
    pub down_total: usize,
    /// Speed in Gbps of up links, if the layer has any.
    pub up_speed_gbps: Option<f64>,
    /// Speed in Gbps of down links, if the layer has any.
    pub down_speed_gbps: Option<f64>,
    /// Role of every vertex at this layer.
    pub role: NodeRole,
}

/// Static metadata for the links between one layer pair.
#[derive(Debug, Clone)]
pub struct StructuredEdgeSpec {
    /// Bandwidth in Gbps.
    pub speed_gbps: f64,
}

/// Attributes carried on a single link and into the emulator manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAttrs {
    /// Bandwidth in Gbps.
    pub bandwidth_gbps: f64,
    /// Propagation delay, if the shape declares one.
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub delay: Option<Duration>,
}

impl LinkAttrs {
    pub fn new(bandwidth_gbps: f64, delay: Option<Duration>) -> Self {
        LinkAttrs { bandwidth_gbps, delay }
    }
}
