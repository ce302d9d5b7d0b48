//! Error taxonomy for topology construction and queries.
//!
//! Every failure is raised at the point of detection and propagates to the
//! caller unchanged; construction is all-or-nothing and the core never
//! retries or partially recovers. The driver decides whether to abort or
//! rebuild with different parameters.

/// Errors produced while building or querying a topology.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// Invalid or inconsistent topology parameters (odd k where even is
    /// required, zero counts, fan-out that does not match the layer specs).
    #[error("invalid topology configuration: {0}")]
    Configuration(String),

    /// A coordinate field does not fit its encoding lane.
    #[error("field '{field}' value {value} exceeds {width}-bit encoding lane")]
    Overflow {
        field: &'static str,
        value: u64,
        width: u32,
    },

    /// A name string failed to parse into coordinate fields.
    #[error("malformed node name: {0}")]
    Format(String),

    /// A query referenced a vertex absent from the graph.
    #[error("no such vertex: {0}")]
    NotFound(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TopologyError>;
