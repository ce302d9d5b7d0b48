//! Simple leaf-spine topology with explicit tier counts.
//!
//! Three layers: spines (layer 0), leaves (layer 1), hosts (layer 2).
//! Every leaf connects to every spine; every host connects to exactly one
//! leaf. Spine-leaf and leaf-host links carry independent bandwidth and
//! delay settings.

use std::time::Duration;

use log::info;

use crate::error::{Result, TopologyError};
use crate::node_id::NodeId;
use crate::topology::spec::{LinkAttrs, NodeRole, StructuredEdgeSpec, StructuredNodeSpec};
use crate::topology::structured::StructuredTopology;

pub const LAYER_SPINE: usize = 0;
pub const LAYER_LEAF: usize = 1;
pub const LAYER_HOST: usize = 2;

/// Construction parameters for a leaf-spine fabric.
#[derive(Debug, Clone)]
pub struct LeafSpineParams {
    pub spines: usize,
    pub leaves: usize,
    pub hosts_per_leaf: usize,
    /// Spine-leaf link bandwidth in Gbps.
    pub spine_leaf_gbps: f64,
    /// Leaf-host link bandwidth in Gbps.
    pub leaf_host_gbps: f64,
    pub spine_leaf_delay: Option<Duration>,
    pub leaf_host_delay: Option<Duration>,
}

impl Default for LeafSpineParams {
    /// Defaults for a minimal two-rack fabric: one 40 Gbps spine tier over
    /// two leaves with two 10 Gbps hosts each, 4 us of wire delay.
    fn default() -> Self {
        LeafSpineParams {
            spines: 1,
            leaves: 2,
            hosts_per_leaf: 2,
            spine_leaf_gbps: 40.0,
            leaf_host_gbps: 10.0,
            spine_leaf_delay: Some(Duration::from_micros(4)),
            leaf_host_delay: Some(Duration::from_micros(4)),
        }
    }
}

impl LeafSpineParams {
    fn check(&self) -> Result<()> {
        if self.spines == 0 || self.leaves == 0 || self.hosts_per_leaf == 0 {
            return Err(TopologyError::Configuration(format!(
                "leaf-spine tiers must be non-empty, got spines={} leaves={} hosts_per_leaf={}",
                self.spines, self.leaves, self.hosts_per_leaf
            )));
        }
        if self.spine_leaf_gbps <= 0.0 || self.leaf_host_gbps <= 0.0 {
            return Err(TopologyError::Configuration(format!(
                "link bandwidth must be positive, got {} and {} Gbps",
                self.spine_leaf_gbps, self.leaf_host_gbps
            )));
        }
        Ok(())
    }

    /// Build the fabric. Fails fast on malformed parameters and hands back
    /// a validated topology or nothing.
    pub fn build(&self) -> Result<StructuredTopology> {
        self.check()?;

        let node_specs = vec![
            StructuredNodeSpec {
                up_total: 0,
                down_total: self.leaves,
                up_speed_gbps: None,
                down_speed_gbps: Some(self.spine_leaf_gbps),
                role: NodeRole::Spine,
            },
            StructuredNodeSpec {
                up_total: self.spines,
                down_total: self.hosts_per_leaf,
                up_speed_gbps: Some(self.spine_leaf_gbps),
                down_speed_gbps: Some(self.leaf_host_gbps),
                role: NodeRole::Leaf,
            },
            StructuredNodeSpec {
                up_total: 1,
                down_total: 0,
                up_speed_gbps: Some(self.leaf_host_gbps),
                down_speed_gbps: None,
                role: NodeRole::Host,
            },
        ];
        let edge_specs = vec![
            StructuredEdgeSpec { speed_gbps: self.spine_leaf_gbps },
            StructuredEdgeSpec { speed_gbps: self.leaf_host_gbps },
        ];
        let mut topo = StructuredTopology::new(node_specs, edge_specs)?;

        let mut spines = Vec::with_capacity(self.spines);
        for s in 0..self.spines {
            let name = topo.add_switch(LAYER_SPINE, NodeId::new(LAYER_SPINE as u64, s as u64)?)?;
            spines.push(name);
        }

        let spine_leaf = LinkAttrs::new(self.spine_leaf_gbps, self.spine_leaf_delay);
        let leaf_host = LinkAttrs::new(self.leaf_host_gbps, self.leaf_host_delay);
        for l in 0..self.leaves {
            let leaf = topo.add_switch(LAYER_LEAF, NodeId::new(LAYER_LEAF as u64, l as u64)?)?;
            for h in 0..self.hosts_per_leaf {
                let seq = (l * self.hosts_per_leaf + h) as u64;
                let host = topo.add_host(LAYER_HOST, NodeId::new(LAYER_HOST as u64, seq)?)?;
                topo.add_link(&host, &leaf, Some(leaf_host.clone()))?;
            }
            for spine in &spines {
                topo.add_link(&leaf, spine, Some(spine_leaf.clone()))?;
            }
        }

        topo.validate()?;
        info!(
            "built leaf-spine topology: {} spines, {} leaves, {} hosts, {} links",
            self.spines,
            self.leaves,
            self.leaves * self.hosts_per_leaf,
            topo.graph().edge_count()
        );
        Ok(topo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape() {
        let topo = LeafSpineParams::default().build().unwrap();
        assert_eq!(topo.layer_nodes(LAYER_SPINE).len(), 1);
        assert_eq!(topo.layer_nodes(LAYER_LEAF).len(), 2);
        assert_eq!(topo.layer_nodes(LAYER_HOST).len(), 4);

        for leaf in topo.layer_nodes(LAYER_LEAF) {
            assert_eq!(topo.up_edges(&leaf).unwrap().len(), 1);
            assert_eq!(topo.down_edges(&leaf).unwrap().len(), 2);
        }
        for spine in topo.layer_nodes(LAYER_SPINE) {
            assert_eq!(topo.down_edges(&spine).unwrap().len(), 2);
        }
    }

    #[test]
    fn test_link_attrs_follow_tier() {
        let topo = LeafSpineParams::default().build().unwrap();
        for edge in topo.graph().edges() {
            let upper = topo.layer(&edge.a).unwrap().min(topo.layer(&edge.b).unwrap());
            let expected = if upper == LAYER_SPINE { 40.0 } else { 10.0 };
            assert_eq!(edge.attrs.bandwidth_gbps, expected);
            assert_eq!(edge.attrs.delay, Some(Duration::from_micros(4)));
        }
    }

    #[test]
    fn test_zero_counts_rejected() {
        let params = LeafSpineParams { leaves: 0, ..Default::default() };
        assert!(matches!(
            params.build(),
            Err(TopologyError::Configuration(_))
        ));
    }

    #[test]
    fn test_bad_bandwidth_rejected() {
        let params = LeafSpineParams { spine_leaf_gbps: 0.0, ..Default::default() };
        assert!(matches!(
            params.build(),
            Err(TopologyError::Configuration(_))
        ));
    }

    #[test]
    fn test_hosts_carry_addresses() {
        let topo = LeafSpineParams::default().build().unwrap();
        for name in topo.layer_nodes(LAYER_HOST) {
            let vertex = topo.graph().vertex(&name).unwrap();
            assert!(vertex.role.is_host());
        }
        for name in topo.layer_nodes(LAYER_LEAF) {
            let vertex = topo.graph().vertex(&name).unwrap();
            assert!(!vertex.role.is_host());
        }
    }
}
