//! Emulator-facing topology manifest.
//!
//! This module flattens a built [`StructuredTopology`] into the record
//! shape the external emulator driver consumes: a node list with
//! layer/role/address metadata and a link list with bandwidth and delay
//! attributes. The manifest serializes to YAML or JSON; the in-process
//! handoff remains the `StructuredTopology` reference itself.

use std::fs;
use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result, WrapErr};
use serde::Serialize;

use crate::topology::{StructuredTopology, VertexRole};

/// One emulated node: a switch or a host.
#[derive(Debug, Serialize)]
pub struct ManifestNode {
    pub name: String,
    pub layer: usize,
    /// Datapath identifier, 16 hex digits.
    pub dpid: String,
    pub role: String,
    /// Network address; hosts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    /// Hardware address; hosts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
}

/// One emulated link with its traffic-shaping attributes.
#[derive(Debug, Serialize)]
pub struct ManifestLink {
    pub a: String,
    pub b: String,
    pub bandwidth_gbps: f64,
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub delay: Option<Duration>,
}

/// Complete topology description for the emulator driver.
#[derive(Debug, Serialize)]
pub struct TopologyManifest {
    /// Short topology name the manifest was generated from.
    pub topology: String,
    pub nodes: Vec<ManifestNode>,
    pub links: Vec<ManifestLink>,
}

impl TopologyManifest {
    /// Flatten a built topology into manifest records.
    pub fn from_topology(name: &str, topo: &StructuredTopology) -> Self {
        let nodes = topo
            .graph()
            .vertices()
            .map(|v| {
                let (role, ip, mac) = match &v.role {
                    VertexRole::Spine => ("spine", None, None),
                    VertexRole::Leaf => ("leaf", None, None),
                    VertexRole::Host { ip, mac } => {
                        ("host", Some(ip.clone()), Some(mac.clone()))
                    }
                };
                ManifestNode {
                    name: v.name.clone(),
                    layer: v.layer,
                    dpid: v.dpid.clone(),
                    role: role.to_string(),
                    ip,
                    mac,
                }
            })
            .collect();
        let links = topo
            .graph()
            .edges()
            .iter()
            .map(|e| ManifestLink {
                a: e.a.clone(),
                b: e.b.clone(),
                bandwidth_gbps: e.attrs.bandwidth_gbps,
                delay: e.attrs.delay,
            })
            .collect();
        TopologyManifest {
            topology: name.to_string(),
            nodes,
            links,
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).wrap_err("Failed to serialize manifest to YAML")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).wrap_err("Failed to serialize manifest to JSON")
    }

    /// Write the manifest to a file, choosing the format from the
    /// extension: `.json` writes JSON, `.yaml`/`.yml` (or anything else)
    /// writes YAML.
    pub fn write(&self, path: &Path) -> Result<()> {
        let rendered = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => self.to_json()?,
            _ => self.to_yaml()?,
        };
        fs::write(path, rendered)
            .wrap_err_with(|| format!("Failed to write manifest to '{}'", path.display()))?;
        log::info!(
            "wrote manifest for '{}' ({} nodes, {} links) to {}",
            self.topology,
            self.nodes.len(),
            self.links.len(),
            path.display()
        );
        Ok(())
    }
}

/// Quick sanity check used by the driver before handoff: the manifest must
/// describe at least one node and reference only known nodes in its links.
pub fn check_manifest(manifest: &TopologyManifest) -> Result<()> {
    if manifest.nodes.is_empty() {
        return Err(eyre!("manifest describes an empty topology"));
    }
    for link in &manifest.links {
        for end in [&link.a, &link.b] {
            if !manifest.nodes.iter().any(|n| &n.name == end) {
                return Err(eyre!("link references unknown node '{end}'"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::LeafSpineParams;

    #[test]
    fn test_manifest_counts() {
        let topo = LeafSpineParams::default().build().unwrap();
        let manifest = TopologyManifest::from_topology("ls", &topo);
        assert_eq!(manifest.nodes.len(), 7);
        assert_eq!(manifest.links.len(), 6);
        check_manifest(&manifest).unwrap();
    }

    #[test]
    fn test_host_records_carry_addresses() {
        let topo = LeafSpineParams::default().build().unwrap();
        let manifest = TopologyManifest::from_topology("ls", &topo);
        for node in &manifest.nodes {
            if node.role == "host" {
                assert!(node.ip.as_deref().unwrap().starts_with("10.0.2."));
                assert!(node.mac.as_deref().unwrap().starts_with("00:00:00:00:02:"));
            } else {
                assert!(node.ip.is_none());
                assert!(node.mac.is_none());
            }
        }
    }

    #[test]
    fn test_yaml_render() {
        let topo = LeafSpineParams::default().build().unwrap();
        let manifest = TopologyManifest::from_topology("ls", &topo);
        let yaml = manifest.to_yaml().unwrap();
        assert!(yaml.contains("topology: ls"));
        assert!(yaml.contains("bandwidth_gbps: 40.0"));
        assert!(yaml.contains("delay: 4us"));
    }

    #[test]
    fn test_write_chooses_format_by_extension() {
        let topo = LeafSpineParams::default().build().unwrap();
        let manifest = TopologyManifest::from_topology("ls", &topo);

        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("topo.json");
        manifest.write(&json_path).unwrap();
        let written = std::fs::read_to_string(&json_path).unwrap();
        serde_json::from_str::<serde_json::Value>(&written).unwrap();

        let yaml_path = dir.path().join("topo.yaml");
        manifest.write(&yaml_path).unwrap();
        let written = std::fs::read_to_string(&yaml_path).unwrap();
        assert!(written.starts_with("topology: ls"));
    }
}
