//! BGP-LS extensions for SRv6 (RFC 9514)

use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::models::*;

/// SRv6 Endpoint Behaviors
///
/// <https://www.iana.org/assignments/segment-routing/segment-routing.xhtml#srv6-endpoint-behaviors>
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Srv6EndpointBehavior {
    Opaque = 0xffff,
    End = 1,
    EndPsp = 2,
    EndUsp = 3,
    EndPspUsp = 4,
    EndX = 5,
    EndXPsp = 6,
    EndXUsp = 7,
    EndXPspUsp = 8,
    EndT = 9,
    EndTPsp = 10,
    EndTUsp = 11,
    EndTPspUsp = 12,
    EndB6Encaps = 14,
    EndBm = 15,
    EndDx6 = 16,
    EndDx4 = 17,
    EndDt6 = 18,
    EndDt4 = 19,
    EndDt46 = 20,
    EndDx2 = 21,
    EndDx2v = 22,
    EndDt2u = 23,
    EndDt2m = 24,
    #[num_enum(catch_all)]
    Unknown(u16),
}

bitflags! {
    /// SRv6 Capabilities flags (RFC 9514 §3.1)
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Srv6CapabilityFlags: u16 {
        /// O-flag: the router supports the O-bit in the SRH
        const OAM = 0x4000;
    }
}

bitflags! {
    /// Flags of the SRv6 End.X SID, LAN End.X SID and BGP Peer Node SID TLVs
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Srv6SidFlags: u8 {
        const BACKUP = 0x80;
        const SET = 0x40;
        const PERSISTENT = 0x20;
    }
}

bitflags! {
    /// SRv6 Locator flags (RFC 9514 §5.1)
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Srv6LocatorFlags: u8 {
        const DOWN = 0x80;
    }
}

/// SRv6 SID Structure (1252): bit lengths of the SID parts
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6SidStructure {
    pub locator_block_length: u8,
    pub locator_node_length: u8,
    pub function_length: u8,
    pub argument_length: u8,
}

/// Sub-TLV of the SRv6 BGP-LS TLVs. Types this crate does not know are preserved.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Srv6SubTlv {
    SidStructure(Srv6SidStructure),
    Unknown(Tlv),
}

/// SRv6 Capabilities TLV (1038)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6Capability {
    pub flags: Srv6CapabilityFlags,
    pub sub_tlvs: Vec<Srv6SubTlv>,
}

/// SRv6 End.X SID TLV (1106)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6EndXSid {
    pub endpoint_behavior: Srv6EndpointBehavior,
    pub flags: Srv6SidFlags,
    pub algorithm: u8,
    pub weight: u8,
    pub sid: Ipv6Addr,
    pub sub_tlvs: Vec<Srv6SubTlv>,
}

/// SRv6 LAN End.X SID TLV (1107 for IS-IS, 1108 for OSPFv3)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6LanEndXSid {
    pub endpoint_behavior: Srv6EndpointBehavior,
    pub flags: Srv6SidFlags,
    pub algorithm: u8,
    pub weight: u8,
    /// IS-IS System-ID (6 bytes) or OSPFv3 Router-ID (4 bytes)
    pub neighbor_id: Vec<u8>,
    pub sid: Ipv6Addr,
    pub sub_tlvs: Vec<Srv6SubTlv>,
}

/// SRv6 Locator TLV (1162)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6Locator {
    pub flags: Srv6LocatorFlags,
    pub algorithm: u8,
    pub metric: u32,
    pub sub_tlvs: Vec<Srv6SubTlv>,
}

/// SRv6 Endpoint Behavior TLV (1250)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6EndpointBehaviorTlv {
    pub endpoint_behavior: Srv6EndpointBehavior,
    pub flags: u8,
    pub algorithm: u8,
}

/// SRv6 BGP Peer Node SID TLV (1251)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6PeerNodeSid {
    pub flags: Srv6SidFlags,
    pub weight: u8,
    pub peer_as: u32,
    pub peer_bgp_id: Ipv4Addr,
}

/// Descriptors of an SRv6 SID NLRI (RFC 9514 §6)
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6SidDescriptors {
    pub multi_topology_id: Option<u16>,
    /// SRv6 SID Information TLVs (518)
    pub sids: Vec<Ipv6Addr>,
}

/// SRv6 SID NLRI (BGP-LS NLRI type 6, RFC 9514 §6)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6SidNlri {
    pub protocol_id: ProtocolId,
    pub identifier: u64,
    pub local_node: NodeDescriptor,
    pub descriptors: Srv6SidDescriptors,
}
