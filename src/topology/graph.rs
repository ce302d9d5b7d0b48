//! Labeled adjacency-map graph underlying a structured topology.
//!
//! The graph owns its vertices and undirected edges directly rather than
//! delegating to a graph library: the only queries the emulator driver
//! needs are name lookup, per-layer enumeration, and neighbor filtering,
//! all of which are O(1)/O(degree) on an adjacency map keyed by vertex
//! name. `BTreeMap`/`BTreeSet` keep iteration deterministic so repeated
//! builds produce identical manifests.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{Result, TopologyError};
use crate::topology::spec::LinkAttrs;

/// Role tag plus the metadata relevant to that role.
///
/// Only host vertices carry address metadata; switches are addressed by
/// DPID alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum VertexRole {
    Spine,
    Leaf,
    Host { ip: String, mac: String },
}

impl VertexRole {
    pub fn is_host(&self) -> bool {
        matches!(self, VertexRole::Host { .. })
    }
}

/// A single vertex with its layer tag and identifier-derived metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Vertex {
    /// Unique name within the whole graph.
    pub name: String,
    /// Hierarchy layer, 0 = topmost.
    pub layer: usize,
    /// Packed identifier as a 16-digit hex string.
    pub dpid: String,
    #[serde(flatten)]
    pub role: VertexRole,
}

/// An undirected link between two adjacent-layer vertices.
#[derive(Debug, Clone, Serialize)]
pub struct Edge {
    pub a: String,
    pub b: String,
    #[serde(flatten)]
    pub attrs: LinkAttrs,
}

/// Adjacency-map graph of a built topology.
#[derive(Debug, Default)]
pub struct TopologyGraph {
    vertices: BTreeMap<String, Vertex>,
    adjacency: BTreeMap<String, BTreeSet<String>>,
    edges: Vec<Edge>,
}

impl TopologyGraph {
    pub fn new() -> Self {
        TopologyGraph::default()
    }

    /// Add a vertex. Names must be unique across the whole graph.
    pub fn add_vertex(&mut self, vertex: Vertex) -> Result<()> {
        if self.vertices.contains_key(&vertex.name) {
            return Err(TopologyError::Configuration(format!(
                "duplicate vertex name '{}'",
                vertex.name
            )));
        }
        self.adjacency.insert(vertex.name.clone(), BTreeSet::new());
        self.vertices.insert(vertex.name.clone(), vertex);
        Ok(())
    }

    /// Add an undirected edge between two existing vertices.
    ///
    /// Both endpoints must exist and sit in adjacent layers; same-layer and
    /// skip-layer links are structural errors for the tree shapes built
    /// here.
    pub fn add_edge(&mut self, a: &str, b: &str, attrs: LinkAttrs) -> Result<()> {
        let la = self.layer_of(a)?;
        let lb = self.layer_of(b)?;
        if la.abs_diff(lb) != 1 {
            return Err(TopologyError::Configuration(format!(
                "edge '{a}'-'{b}' spans layers {la} and {lb}; links must join adjacent layers"
            )));
        }
        self.adjacency
            .get_mut(a)
            .ok_or_else(|| TopologyError::NotFound(a.to_string()))?
            .insert(b.to_string());
        self.adjacency
            .get_mut(b)
            .ok_or_else(|| TopologyError::NotFound(b.to_string()))?
            .insert(a.to_string());
        self.edges.push(Edge {
            a: a.to_string(),
            b: b.to_string(),
            attrs,
        });
        Ok(())
    }

    /// Look up a vertex by name.
    pub fn vertex(&self, name: &str) -> Option<&Vertex> {
        self.vertices.get(name)
    }

    /// Layer of a vertex, failing for unknown names.
    pub fn layer_of(&self, name: &str) -> Result<usize> {
        self.vertices
            .get(name)
            .map(|v| v.layer)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))
    }

    /// Neighbors of a vertex, failing for unknown names.
    pub fn neighbors(&self, name: &str) -> Result<&BTreeSet<String>> {
        self.adjacency
            .get(name)
            .ok_or_else(|| TopologyError::NotFound(name.to_string()))
    }

    /// All vertices in name order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(name: &str, layer: usize) -> Vertex {
        Vertex {
            name: name.to_string(),
            layer,
            dpid: format!("{:016x}", layer),
            role: VertexRole::Spine,
        }
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut g = TopologyGraph::new();
        g.add_vertex(vertex("0_0", 0)).unwrap();
        assert!(matches!(
            g.add_vertex(vertex("0_0", 1)),
            Err(TopologyError::Configuration(_))
        ));
    }

    #[test]
    fn test_edge_requires_adjacent_layers() {
        let mut g = TopologyGraph::new();
        g.add_vertex(vertex("0_0", 0)).unwrap();
        g.add_vertex(vertex("1_0", 1)).unwrap();
        g.add_vertex(vertex("2_0", 2)).unwrap();
        g.add_vertex(vertex("0_1", 0)).unwrap();

        let attrs = LinkAttrs::new(1.0, None);
        g.add_edge("0_0", "1_0", attrs.clone()).unwrap();
        // skip-layer
        assert!(matches!(
            g.add_edge("0_0", "2_0", attrs.clone()),
            Err(TopologyError::Configuration(_))
        ));
        // same-layer
        assert!(matches!(
            g.add_edge("0_0", "0_1", attrs.clone()),
            Err(TopologyError::Configuration(_))
        ));
        // missing endpoint
        assert!(matches!(
            g.add_edge("0_0", "9_9", attrs),
            Err(TopologyError::NotFound(_))
        ));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let mut g = TopologyGraph::new();
        g.add_vertex(vertex("0_0", 0)).unwrap();
        g.add_vertex(vertex("1_0", 1)).unwrap();
        g.add_edge("0_0", "1_0", LinkAttrs::new(1.0, None)).unwrap();

        assert!(g.neighbors("0_0").unwrap().contains("1_0"));
        assert!(g.neighbors("1_0").unwrap().contains("0_0"));
        assert_eq!(g.edge_count(), 1);
    }
}
