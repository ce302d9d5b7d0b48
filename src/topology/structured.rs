//! Structured multi-rooted tree topology with layer-relative queries.
//!
//! A `StructuredTopology` pairs the labeled graph with the per-layer specs
//! it was declared against and answers the hierarchy-direction questions an
//! emulator driver asks: which layer a vertex sits at, its neighbors one
//! layer up or down, and whether a physical port number faces up or down.

use std::collections::BTreeSet;

use log::debug;

use crate::error::{Result, TopologyError};
use crate::node_id::NodeId;
use crate::topology::graph::{TopologyGraph, Vertex, VertexRole};
use crate::topology::spec::{LinkAttrs, NodeRole, StructuredEdgeSpec, StructuredNodeSpec};

/// Starting index for emulated switch ports. Ports alternate up/down from
/// this base, odd ports facing up.
pub const PORT_BASE: usize = 1;

/// A built structured topology: layer specs plus the labeled graph.
///
/// Construction is a single eager pass performed by the shape builders in
/// [`crate::topology::leaf_spine`] and [`crate::topology::fat_tree`]; once
/// [`StructuredTopology::validate`] has passed, the topology is handed to
/// the emulator by reference and never mutated again.
#[derive(Debug)]
pub struct StructuredTopology {
    node_specs: Vec<StructuredNodeSpec>,
    edge_specs: Vec<StructuredEdgeSpec>,
    graph: TopologyGraph,
}

impl StructuredTopology {
    /// Create an empty topology declared against the given layer specs.
    ///
    /// One node spec per layer (root first) and one edge spec per adjacent
    /// layer pair.
    pub fn new(
        node_specs: Vec<StructuredNodeSpec>,
        edge_specs: Vec<StructuredEdgeSpec>,
    ) -> Result<Self> {
        if node_specs.is_empty() {
            return Err(TopologyError::Configuration(
                "topology needs at least one layer spec".to_string(),
            ));
        }
        if edge_specs.len() + 1 != node_specs.len() {
            return Err(TopologyError::Configuration(format!(
                "{} layers require {} edge specs, got {}",
                node_specs.len(),
                node_specs.len() - 1,
                edge_specs.len()
            )));
        }
        Ok(StructuredTopology {
            node_specs,
            edge_specs,
            graph: TopologyGraph::new(),
        })
    }

    /// Number of declared layers.
    pub fn layer_count(&self) -> usize {
        self.node_specs.len()
    }

    /// Declared spec for a layer.
    pub fn node_spec(&self, layer: usize) -> Option<&StructuredNodeSpec> {
        self.node_specs.get(layer)
    }

    /// Declared spec for the links between `layer` and `layer + 1`.
    pub fn edge_spec(&self, layer: usize) -> Option<&StructuredEdgeSpec> {
        self.edge_specs.get(layer)
    }

    /// The underlying labeled graph.
    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    /// Add a switch vertex at `layer`, named and tagged from `id`.
    pub fn add_switch(&mut self, layer: usize, id: NodeId) -> Result<String> {
        let role = match self.role_at(layer)? {
            NodeRole::Spine => VertexRole::Spine,
            NodeRole::Leaf => VertexRole::Leaf,
            NodeRole::Host => {
                return Err(TopologyError::Configuration(format!(
                    "layer {layer} is a host layer; use add_host"
                )))
            }
        };
        self.add_tagged(layer, id, role)
    }

    /// Add a host vertex at `layer` carrying its identifier-derived
    /// network and hardware addresses.
    pub fn add_host(&mut self, layer: usize, id: NodeId) -> Result<String> {
        if self.role_at(layer)? != NodeRole::Host {
            return Err(TopologyError::Configuration(format!(
                "layer {layer} is not a host layer"
            )));
        }
        self.add_tagged(
            layer,
            id,
            VertexRole::Host {
                ip: id.ip_str(),
                mac: id.mac_str(),
            },
        )
    }

    /// Link two vertices, taking the bandwidth from the edge spec of the
    /// upper layer unless `attrs` overrides it.
    pub fn add_link(&mut self, a: &str, b: &str, attrs: Option<LinkAttrs>) -> Result<()> {
        let attrs = match attrs {
            Some(attrs) => attrs,
            None => {
                let upper = self.graph.layer_of(a)?.min(self.graph.layer_of(b)?);
                let spec = self.edge_specs.get(upper).ok_or_else(|| {
                    TopologyError::Configuration(format!("no edge spec for layer pair {upper}"))
                })?;
                LinkAttrs::new(spec.speed_gbps, None)
            }
        };
        self.graph.add_edge(a, b, attrs)
    }

    fn role_at(&self, layer: usize) -> Result<NodeRole> {
        self.node_specs
            .get(layer)
            .map(|s| s.role)
            .ok_or_else(|| TopologyError::Configuration(format!("layer {layer} out of range")))
    }

    fn add_tagged(&mut self, layer: usize, id: NodeId, role: VertexRole) -> Result<String> {
        let name = id.name_str();
        debug!("adding {} vertex {} at layer {}", role_label(&role), name, layer);
        self.graph.add_vertex(Vertex {
            name: name.clone(),
            layer,
            dpid: id.dpid_str(),
            role,
        })?;
        Ok(name)
    }

    /// Layer of a vertex. Fails for unknown names.
    pub fn layer(&self, name: &str) -> Result<usize> {
        self.graph.layer_of(name)
    }

    /// All vertex names at a layer; empty for out-of-range layers.
    pub fn layer_nodes(&self, layer: usize) -> BTreeSet<String> {
        self.graph
            .vertices()
            .filter(|v| v.layer == layer)
            .map(|v| v.name.clone())
            .collect()
    }

    /// Whether a port number faces up (toward the core). Ports alternate
    /// up/down starting at [`PORT_BASE`].
    pub fn is_port_up(&self, port: usize) -> bool {
        port % 2 == PORT_BASE % 2
    }

    /// Neighbors one layer closer to the core.
    pub fn up_nodes(&self, name: &str) -> Result<BTreeSet<String>> {
        self.adjacent_at_layer(name, |layer| layer.checked_sub(1))
    }

    /// Neighbors one layer closer to the hosts.
    pub fn down_nodes(&self, name: &str) -> Result<BTreeSet<String>> {
        self.adjacent_at_layer(name, |layer| layer.checked_add(1))
    }

    /// Edges toward the core, as `(name, neighbor)` pairs.
    pub fn up_edges(&self, name: &str) -> Result<BTreeSet<(String, String)>> {
        Ok(self
            .up_nodes(name)?
            .into_iter()
            .map(|n| (name.to_string(), n))
            .collect())
    }

    /// Edges toward the hosts, as `(name, neighbor)` pairs.
    pub fn down_edges(&self, name: &str) -> Result<BTreeSet<(String, String)>> {
        Ok(self
            .down_nodes(name)?
            .into_iter()
            .map(|n| (name.to_string(), n))
            .collect())
    }

    fn adjacent_at_layer(
        &self,
        name: &str,
        target: impl Fn(usize) -> Option<usize>,
    ) -> Result<BTreeSet<String>> {
        let layer = self.graph.layer_of(name)?;
        let Some(wanted) = target(layer) else {
            return Ok(BTreeSet::new());
        };
        Ok(self
            .graph
            .neighbors(name)?
            .iter()
            .filter(|n| self.graph.layer_of(n).is_ok_and(|l| l == wanted))
            .cloned()
            .collect())
    }

    /// Check structural well-formedness against the layer specs: every
    /// vertex's up/down degree must equal its layer's declared fan-out.
    /// Shape builders call this before handing the topology out.
    pub fn validate(&self) -> Result<()> {
        for vertex in self.graph.vertices() {
            let spec = self.node_specs.get(vertex.layer).ok_or_else(|| {
                TopologyError::Configuration(format!(
                    "vertex '{}' tagged with undeclared layer {}",
                    vertex.name, vertex.layer
                ))
            })?;
            let up = self.up_nodes(&vertex.name)?.len();
            let down = self.down_nodes(&vertex.name)?.len();
            if up != spec.up_total || down != spec.down_total {
                return Err(TopologyError::Configuration(format!(
                    "vertex '{}' at layer {} has fan-out {}/{} (up/down), spec declares {}/{}",
                    vertex.name, vertex.layer, up, down, spec.up_total, spec.down_total
                )));
            }
        }
        Ok(())
    }
}

fn role_label(role: &VertexRole) -> &'static str {
    match role {
        VertexRole::Spine => "spine",
        VertexRole::Leaf => "leaf",
        VertexRole::Host { .. } => "host",
    }
}
