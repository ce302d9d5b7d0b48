//! # dctopo - Data-center topology generator for network emulation
//!
//! This library builds labeled leaf-spine and fat-tree graphs of switches
//! and hosts, with bandwidth/delay link attributes, for consumption by an
//! external network emulator.
//!
//! ## Overview
//!
//! A topology is declared as per-layer node and edge specs, built eagerly
//! in a single pass (spines down to hosts), validated against the declared
//! fan-outs, and then handed to the emulator driver by reference or as a
//! serialized manifest. Every vertex is addressed by a two-field
//! [`node_id::NodeId`] whose packed DPID handle, name, IP, and MAC forms
//! all derive from the same coordinate pair.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `error`: typed error taxonomy for construction and queries
//! - `node_id`: hierarchical node identifier with packed DPID handle
//! - `topology`: layer specs, the labeled graph, layer-relative queries,
//!   and the leaf-spine / fat-tree shape builders
//! - `registry`: constant name-to-factory mapping for shape selection
//! - `manifest`: emulator-facing YAML/JSON serialization
//!
//! ## Example Usage
//!
//! ```rust
//! use dctopo::registry::TopologyRegistry;
//! use dctopo::manifest::TopologyManifest;
//!
//! # fn main() -> color_eyre::eyre::Result<()> {
//! let topo = TopologyRegistry::builtin().build("ft")?;
//! assert_eq!(topo.layer_nodes(0).len(), 4); // spines of the default k=4 tree
//!
//! let manifest = TopologyManifest::from_topology("ft", &topo);
//! println!("{}", manifest.to_yaml()?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Construction and query failures are reported through the typed
//! [`error::TopologyError`]; file IO and serialization at the driver
//! boundary use `color_eyre` for contextual reports. Construction is
//! all-or-nothing: a topology is either fully built and validated or the
//! build aborts before any handoff.

pub mod error;
pub mod node_id;
pub mod topology;
pub mod registry;
pub mod manifest;
