//! Two-tier k-ary fat-tree topology.
//!
//! From "A scalable, commodity data center network architecture", M. Al-Fares
//! et al., SIGCOMM 2008, collapsed to spine/leaf/host tiers: `k` spines,
//! `2k` leaves, and `k/2` hosts per leaf (`k^2` hosts total). Every leaf
//! connects to all spines, giving each leaf `k` up-links and `k/2`
//! down-links. All links run at the same speed.

use log::info;

use crate::error::{Result, TopologyError};
use crate::node_id::NodeId;
use crate::topology::spec::{NodeRole, StructuredEdgeSpec, StructuredNodeSpec};
use crate::topology::structured::StructuredTopology;

pub const LAYER_SPINE: usize = 0;
pub const LAYER_LEAF: usize = 1;
pub const LAYER_HOST: usize = 2;

/// Construction parameters for a k-ary fat-tree.
#[derive(Debug, Clone)]
pub struct FatTreeParams {
    /// Switch degree. Must be a positive even integer: each leaf splits its
    /// radix evenly between `k` spine up-links and `k/2` host down-links.
    pub k: usize,
    /// Uniform link bandwidth in Gbps.
    pub speed_gbps: f64,
}

impl Default for FatTreeParams {
    fn default() -> Self {
        FatTreeParams { k: 4, speed_gbps: 1.0 }
    }
}

impl FatTreeParams {
    fn check(&self) -> Result<()> {
        if self.k == 0 || self.k % 2 != 0 {
            return Err(TopologyError::Configuration(format!(
                "fat-tree degree k must be a positive even integer, got {}",
                self.k
            )));
        }
        if self.speed_gbps <= 0.0 {
            return Err(TopologyError::Configuration(format!(
                "link bandwidth must be positive, got {} Gbps",
                self.speed_gbps
            )));
        }
        Ok(())
    }

    /// Build the fat-tree. Fails fast on odd or zero `k`.
    pub fn build(&self) -> Result<StructuredTopology> {
        self.check()?;
        let k = self.k;

        let node_specs = vec![
            StructuredNodeSpec {
                up_total: 0,
                down_total: k * 2,
                up_speed_gbps: None,
                down_speed_gbps: Some(self.speed_gbps),
                role: NodeRole::Spine,
            },
            StructuredNodeSpec {
                up_total: k,
                down_total: k / 2,
                up_speed_gbps: Some(self.speed_gbps),
                down_speed_gbps: Some(self.speed_gbps),
                role: NodeRole::Leaf,
            },
            StructuredNodeSpec {
                up_total: 1,
                down_total: 0,
                up_speed_gbps: Some(self.speed_gbps),
                down_speed_gbps: None,
                role: NodeRole::Host,
            },
        ];
        let edge_specs = vec![
            StructuredEdgeSpec { speed_gbps: self.speed_gbps },
            StructuredEdgeSpec { speed_gbps: self.speed_gbps },
        ];
        let mut topo = StructuredTopology::new(node_specs, edge_specs)?;

        let mut spines = Vec::with_capacity(k);
        for s in 0..k {
            let name = topo.add_switch(LAYER_SPINE, NodeId::new(LAYER_SPINE as u64, s as u64)?)?;
            spines.push(name);
        }

        for l in 0..k * 2 {
            let leaf = topo.add_switch(LAYER_LEAF, NodeId::new(LAYER_LEAF as u64, l as u64)?)?;
            for h in 0..k / 2 {
                let seq = (l * (k / 2) + h) as u64;
                let host = topo.add_host(LAYER_HOST, NodeId::new(LAYER_HOST as u64, seq)?)?;
                topo.add_link(&host, &leaf, None)?;
            }
            for spine in &spines {
                topo.add_link(&leaf, spine, None)?;
            }
        }

        topo.validate()?;
        info!(
            "built fat-tree topology (k={}): {} spines, {} leaves, {} hosts, {} links",
            k,
            k,
            k * 2,
            k * k,
            topo.graph().edge_count()
        );
        Ok(topo)
    }
}
