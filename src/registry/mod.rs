//! Topology registry.
//!
//! Maps short topology names to zero-argument factories so an emulator
//! driver can select a shape by name (`"ft"`, `"ls"`) without knowing its
//! construction parameters. The mapping is constant: it is assembled once
//! at first use and never mutated afterwards, so every caller sees the
//! same set of names for the life of the process.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use log::debug;

use crate::error::{Result, TopologyError};
use crate::topology::{FatTreeParams, LeafSpineParams, StructuredTopology};

/// A zero-argument topology factory producing a built, validated graph.
pub type TopologyFactory = fn() -> Result<StructuredTopology>;

/// Name-to-factory mapping for the built-in topology shapes.
#[derive(Debug)]
pub struct TopologyRegistry {
    entries: BTreeMap<&'static str, TopologyFactory>,
}

static BUILTIN: OnceLock<TopologyRegistry> = OnceLock::new();

impl TopologyRegistry {
    /// The process-wide registry of built-in shapes.
    pub fn builtin() -> &'static TopologyRegistry {
        BUILTIN.get_or_init(|| {
            let mut entries: BTreeMap<&'static str, TopologyFactory> = BTreeMap::new();
            entries.insert("ft", || FatTreeParams::default().build());
            entries.insert("ls", || LeafSpineParams::default().build());
            TopologyRegistry { entries }
        })
    }

    /// Look up a factory by name.
    pub fn get(&self, name: &str) -> Option<TopologyFactory> {
        self.entries.get(name).copied()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }

    /// Build the named topology with its default parameters.
    ///
    /// Unknown names are a configuration error, not `NotFound` — the
    /// latter is reserved for vertex queries against a built graph.
    pub fn build(&self, name: &str) -> Result<StructuredTopology> {
        let factory = self.get(name).ok_or_else(|| {
            TopologyError::Configuration(format!(
                "unknown topology '{}'; registered: {}",
                name,
                self.names().join(", ")
            ))
        })?;
        debug!("building topology '{}' from registry defaults", name);
        factory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_names() {
        assert_eq!(TopologyRegistry::builtin().names(), vec!["ft", "ls"]);
    }

    #[test]
    fn test_build_by_name() {
        let topo = TopologyRegistry::builtin().build("ft").unwrap();
        assert_eq!(topo.layer_nodes(0).len(), 4);

        let topo = TopologyRegistry::builtin().build("ls").unwrap();
        assert_eq!(topo.layer_nodes(0).len(), 1);
    }

    #[test]
    fn test_unknown_name_is_configuration_error() {
        assert!(matches!(
            TopologyRegistry::builtin().build("mesh"),
            Err(TopologyError::Configuration(_))
        ));
    }

    #[test]
    fn test_registry_is_shared() {
        let a = TopologyRegistry::builtin() as *const _;
        let b = TopologyRegistry::builtin() as *const _;
        assert_eq!(a, b);
    }
}
