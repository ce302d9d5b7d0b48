//! Structured topology construction.
//!
//! This module contains the layer specs, the labeled graph, the
//! layer-relative query surface, and the two concrete shapes
//! (leaf-spine and fat-tree).

pub mod spec;
pub mod graph;
pub mod structured;
pub mod leaf_spine;
pub mod fat_tree;

// Re-export key types for easier access
pub use spec::{LinkAttrs, NodeRole, StructuredEdgeSpec, StructuredNodeSpec};
pub use graph::{Edge, TopologyGraph, Vertex, VertexRole};
pub use structured::{StructuredTopology, PORT_BASE};
pub use leaf_spine::LeafSpineParams;
pub use fat_tree::FatTreeParams;
