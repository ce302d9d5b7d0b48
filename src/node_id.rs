//! Hierarchical node identifier with a packed DPID handle.
//!
//! Every vertex in a structured topology is addressed by two small
//! coordinate fields: a switch-level field `sw` and a within-level field
//! `host`. The pair packs into a DPID-compatible opaque 64-bit handle with
//! `sw` in bits 8-15 and `host` in bits 0-7, most significant field first.
//! Name, IP, and MAC strings are all derived from the same two fields, so
//! any one form recovers the others.

use crate::error::{Result, TopologyError};

/// Bit width of each coordinate lane.
const FIELD_BITS: u32 = 8;
const FIELD_MASK: u64 = (1 << FIELD_BITS) - 1;

/// A topology node identifier.
///
/// `NodeId` is a pure value type: constructed once per vertex at build time
/// and never mutated. Encoding is bijective — decoding a handle reproduces
/// exactly the fields that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    sw: u64,
    host: u64,
}

impl NodeId {
    /// Create an identifier from explicit coordinate fields.
    ///
    /// Fails with [`TopologyError::Overflow`] if either field does not fit
    /// its 8-bit lane.
    pub fn new(sw: u64, host: u64) -> Result<Self> {
        if sw > FIELD_MASK {
            return Err(TopologyError::Overflow {
                field: "sw",
                value: sw,
                width: FIELD_BITS,
            });
        }
        if host > FIELD_MASK {
            return Err(TopologyError::Overflow {
                field: "host",
                value: host,
                width: FIELD_BITS,
            });
        }
        Ok(NodeId { sw, host })
    }

    /// Decode an identifier from a packed DPID handle.
    ///
    /// Total for any input; bits above the two lanes are ignored, matching
    /// the mask-and-shift extraction the handle was packed with.
    pub fn from_dpid(dpid: u64) -> Self {
        NodeId {
            sw: (dpid >> FIELD_BITS) & FIELD_MASK,
            host: dpid & FIELD_MASK,
        }
    }

    /// Parse an identifier from its underscore-joined name form, e.g. `"2_15"`.
    pub fn from_name(name: &str) -> Result<Self> {
        let mut fields = name.split('_');
        let (sw, host) = match (fields.next(), fields.next(), fields.next()) {
            (Some(sw), Some(host), None) => (sw, host),
            _ => {
                return Err(TopologyError::Format(format!(
                    "expected '<sw>_<host>', got '{name}'"
                )))
            }
        };
        let sw = sw
            .parse::<u64>()
            .map_err(|e| TopologyError::Format(format!("bad sw field in '{name}': {e}")))?;
        let host = host
            .parse::<u64>()
            .map_err(|e| TopologyError::Format(format!("bad host field in '{name}': {e}")))?;
        NodeId::new(sw, host)
    }

    /// Switch-level coordinate field.
    pub fn sw(&self) -> u64 {
        self.sw
    }

    /// Within-level coordinate field.
    pub fn host(&self) -> u64 {
        self.host
    }

    /// Packed opaque handle.
    pub fn dpid(&self) -> u64 {
        (self.sw << FIELD_BITS) | self.host
    }

    /// Handle as a zero-padded 16-digit hex string, the form emulators
    /// expect for datapath identifiers.
    pub fn dpid_str(&self) -> String {
        format!("{:016x}", self.dpid())
    }

    /// Name form, parseable back through [`NodeId::from_name`].
    pub fn name_str(&self) -> String {
        format!("{}_{}", self.sw, self.host)
    }

    /// Network address derived from the coordinate fields.
    pub fn ip_str(&self) -> String {
        format!("10.0.{}.{}", self.sw, self.host)
    }

    /// Hardware address derived from the coordinate fields.
    ///
    /// Defined for any identifier; whether a vertex actually carries a
    /// hardware address is a per-layer decision made by the graph builder
    /// (host vertices only).
    pub fn mac_str(&self) -> String {
        format!("00:00:00:00:{:02x}:{:02x}", self.sw, self.host)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.sw, self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_layout() {
        let id = NodeId::new(2, 15).unwrap();
        assert_eq!(id.dpid(), (2 << 8) | 15);
        assert_eq!(id.dpid_str(), "000000000000020f");
    }

    #[test]
    fn test_dpid_round_trip() {
        for sw in [0u64, 1, 2, 127, 255] {
            for host in [0u64, 1, 42, 254, 255] {
                let id = NodeId::new(sw, host).unwrap();
                assert_eq!(NodeId::from_dpid(id.dpid()), id);
            }
        }
    }

    #[test]
    fn test_name_round_trip() {
        let id = NodeId::new(1, 7).unwrap();
        assert_eq!(id.name_str(), "1_7");
        assert_eq!(NodeId::from_name(&id.name_str()).unwrap(), id);
    }

    #[test]
    fn test_overflow_is_rejected() {
        assert!(matches!(
            NodeId::new(256, 0),
            Err(TopologyError::Overflow { field: "sw", value: 256, width: 8 })
        ));
        assert!(matches!(
            NodeId::new(0, 300),
            Err(TopologyError::Overflow { field: "host", .. })
        ));
    }

    #[test]
    fn test_malformed_names() {
        assert!(matches!(NodeId::from_name("1"), Err(TopologyError::Format(_))));
        assert!(matches!(NodeId::from_name("1_2_3"), Err(TopologyError::Format(_))));
        assert!(matches!(NodeId::from_name("a_b"), Err(TopologyError::Format(_))));
        // Parses, but the field is too wide for its lane.
        assert!(matches!(
            NodeId::from_name("999_0"),
            Err(TopologyError::Overflow { .. })
        ));
    }

    #[test]
    fn test_address_forms() {
        let id = NodeId::new(2, 15).unwrap();
        assert_eq!(id.ip_str(), "10.0.2.15");
        assert_eq!(id.mac_str(), "00:00:00:00:02:0f");
        assert_eq!(id.to_string(), "(2, 15)");
    }

    #[test]
    fn test_from_dpid_ignores_high_lanes() {
        let id = NodeId::from_dpid(0xdead_0000_0000_0102);
        assert_eq!((id.sw(), id.host()), (1, 2));
    }
}
