use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::info;

use dctopo::manifest::{check_manifest, TopologyManifest};
use dctopo::registry::TopologyRegistry;
use dctopo::topology::{FatTreeParams, LeafSpineParams, StructuredTopology};

/// Data-center topology generator for network emulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Topology shape to build ("ft" or "ls")
    #[arg(short, long, default_value = "ft")]
    topo: String,

    /// Fat-tree switch degree (positive even integer)
    #[arg(short, long)]
    k: Option<usize>,

    /// Number of spine switches (leaf-spine only)
    #[arg(long)]
    spines: Option<usize>,

    /// Number of leaf switches (leaf-spine only)
    #[arg(long)]
    leaves: Option<usize>,

    /// Hosts attached to each leaf (leaf-spine only)
    #[arg(long)]
    hosts_per_leaf: Option<usize>,

    /// Uniform link bandwidth in Gbps (overrides per-tier defaults)
    #[arg(short, long)]
    bandwidth: Option<f64>,

    /// Link propagation delay, e.g. "4us" or "1ms"
    #[arg(short, long, value_parser = humantime::parse_duration)]
    delay: Option<Duration>,

    /// Output file for the manifest (.yaml/.yml or .json); stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    /// Whether any shape parameter was given on the command line. Without
    /// overrides the registry's default factory is used directly.
    fn has_overrides(&self) -> bool {
        self.k.is_some()
            || self.spines.is_some()
            || self.leaves.is_some()
            || self.hosts_per_leaf.is_some()
            || self.bandwidth.is_some()
            || self.delay.is_some()
    }

    fn build_topology(&self) -> Result<StructuredTopology> {
        if !self.has_overrides() {
            return Ok(TopologyRegistry::builtin().build(&self.topo)?);
        }
        let topo = match self.topo.as_str() {
            "ft" => {
                let defaults = FatTreeParams::default();
                FatTreeParams {
                    k: self.k.unwrap_or(defaults.k),
                    speed_gbps: self.bandwidth.unwrap_or(defaults.speed_gbps),
                }
                .build()?
            }
            "ls" => {
                let defaults = LeafSpineParams::default();
                LeafSpineParams {
                    spines: self.spines.unwrap_or(defaults.spines),
                    leaves: self.leaves.unwrap_or(defaults.leaves),
                    hosts_per_leaf: self.hosts_per_leaf.unwrap_or(defaults.hosts_per_leaf),
                    spine_leaf_gbps: self.bandwidth.unwrap_or(defaults.spine_leaf_gbps),
                    leaf_host_gbps: self.bandwidth.unwrap_or(defaults.leaf_host_gbps),
                    spine_leaf_delay: self.delay.or(defaults.spine_leaf_delay),
                    leaf_host_delay: self.delay.or(defaults.leaf_host_delay),
                }
                .build()?
            }
            other => {
                // Unknown names get the registry's error with the list of
                // registered shapes.
                return Ok(TopologyRegistry::builtin().build(other)?);
            }
        };
        Ok(topo)
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Building topology '{}'", args.topo);
    let topo = args.build_topology()?;

    for layer in 0..topo.layer_count() {
        let nodes = topo.layer_nodes(layer);
        let role = topo
            .node_spec(layer)
            .map(|s| s.role.to_string())
            .unwrap_or_default();
        info!("layer {}: {} {} vertices", layer, nodes.len(), role);
    }
    info!(
        "{} vertices, {} links total",
        topo.graph().vertex_count(),
        topo.graph().edge_count()
    );

    let manifest = TopologyManifest::from_topology(&args.topo, &topo);
    check_manifest(&manifest)?;

    match &args.output {
        Some(path) => manifest.write(path)?,
        None => print!("{}", manifest.to_yaml()?),
    }

    Ok(())
}
