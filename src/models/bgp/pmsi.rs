//! PMSI Tunnel attribute (RFC 6514 §5)

use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

bitflags! {
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PmsiFlags: u8 {
        /// L-bit: Leaf Information Required
        const LEAF_INFORMATION_REQUIRED = 0x01;
    }
}

/// PMSI Tunnel Types
///
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#pmsi-tunnel-types>
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PmsiTunnelType {
    NoTunnelInformation = 0,
    RsvpTeP2mpLsp = 1,
    MldpP2mpLsp = 2,
    PimSsmTree = 3,
    PimSmTree = 4,
    BidirPimTree = 5,
    IngressReplication = 6,
    MldpMp2mpLsp = 7,
    TransportTunnel = 8,
    Bier = 0x0b,
    #[num_enum(catch_all)]
    Unknown(u8),
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PmsiTunnel {
    pub flags: PmsiFlags,
    pub tunnel_type: PmsiTunnelType,
    /// 20-bit label from the high-order bits of the 3-byte label field
    pub mpls_label: u32,
    pub tunnel_identifier: Vec<u8>,
}

impl PmsiTunnel {
    pub fn leaf_information_required(&self) -> bool {
        self.flags.contains(PmsiFlags::LEAF_INFORMATION_REQUIRED)
    }

    /// Tunnel endpoint of an ingress replication tunnel, whose identifier is a unicast address.
    pub fn ingress_replication_endpoint(&self) -> Option<IpAddr> {
        if self.tunnel_type != PmsiTunnelType::IngressReplication {
            return None;
        }
        match self.tunnel_identifier.len() {
            4 => {
                let mut octets = [0u8; 4];
                octets.copy_from_slice(&self.tunnel_identifier);
                Some(IpAddr::V4(Ipv4Addr::from(octets)))
            }
            16 => {
                let mut octets = [0u8; 16];
                octets.copy_from_slice(&self.tunnel_identifier);
                Some(IpAddr::V6(Ipv6Addr::from(octets)))
            }
            _ => None,
        }
    }
}
