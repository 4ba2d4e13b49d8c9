//! BGP Link-State building blocks shared by the SR, SRv6 and TE Policy models (RFC 9552)

use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};
use std::net::Ipv4Addr;

use crate::models::*;

/// Protocol Identifier as defined in RFC 9552.
///
/// Decoding is strict: a code outside the registry fails the enclosing NLRI.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ProtocolId {
    IsisL1 = 1,
    IsisL2 = 2,
    Ospfv2 = 3,
    Direct = 4,
    Static = 5,
    Ospfv3 = 6,
    Bgp = 7,
    RsvpTe = 8,
    SegmentRouting = 9,
}

impl ProtocolId {
    pub const fn is_isis(&self) -> bool {
        matches!(self, ProtocolId::IsisL1 | ProtocolId::IsisL2)
    }

    pub const fn is_ospf(&self) -> bool {
        matches!(self, ProtocolId::Ospfv2 | ProtocolId::Ospfv3)
    }
}

/// Node Descriptor Sub-TLV Types
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum NodeDescriptorType {
    #[num_enum(default)]
    Reserved = 0,
    LocalNodeDescriptors = 256,
    RemoteNodeDescriptors = 257,
    AutonomousSystem = 512,
    BgpLsIdentifier = 513,
    OspfAreaId = 514,
    IgpRouterId = 515,
    BgpRouterId = 516,
    MemberAsn = 517,
}

/// BGP-LS attribute TLV codes of the segment routing extensions (RFC 9085, RFC 9086, RFC 9514).
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum SrTlvType {
    SrCapabilities = 1034,
    SrAlgorithm = 1035,
    SrLocalBlock = 1036,
    SrmsPreference = 1037,
    Srv6Capabilities = 1038,
    AdjacencySid = 1099,
    LanAdjacencySid = 1100,
    PeerNodeSid = 1101,
    PeerAdjacencySid = 1102,
    PeerSetSid = 1103,
    Srv6EndXSid = 1106,
    IsisSrv6LanEndXSid = 1107,
    Ospfv3Srv6LanEndXSid = 1108,
    PrefixSid = 1158,
    SidLabel = 1161,
    Srv6Locator = 1162,
    Srv6EndpointBehavior = 1250,
    Srv6BgpPeerNodeSid = 1251,
    Srv6SidStructure = 1252,
}

/// A raw TLV kept as-is, for types the decoder does not interpret.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tlv {
    pub tlv_type: u16,
    pub value: Vec<u8>,
}

impl Tlv {
    pub fn new(tlv_type: u16, value: Vec<u8>) -> Self {
        Self { tlv_type, value }
    }
}

/// Node Descriptor (RFC 9552 §5.2.1.4)
#[derive(Debug, PartialEq, Clone, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeDescriptor {
    pub autonomous_system: Option<u32>,
    pub bgp_ls_identifier: Option<u32>,
    pub ospf_area_id: Option<u32>,
    pub igp_router_id: Option<Vec<u8>>,
    /// BGP Router-ID (RFC 9086)
    pub bgp_router_id: Option<Ipv4Addr>,
    /// Member-ASN (RFC 9086)
    pub member_asn: Option<u32>,
    pub unknown_tlvs: Vec<Tlv>,
}

impl NodeDescriptor {
    /// Whether the sub-TLV of the given type was present.
    pub fn has(&self, tlv_type: NodeDescriptorType) -> bool {
        match tlv_type {
            NodeDescriptorType::AutonomousSystem => self.autonomous_system.is_some(),
            NodeDescriptorType::BgpLsIdentifier => self.bgp_ls_identifier.is_some(),
            NodeDescriptorType::OspfAreaId => self.ospf_area_id.is_some(),
            NodeDescriptorType::IgpRouterId => self.igp_router_id.is_some(),
            NodeDescriptorType::BgpRouterId => self.bgp_router_id.is_some(),
            NodeDescriptorType::MemberAsn => self.member_asn.is_some(),
            _ => false,
        }
    }
}

/// One decoded segment routing TLV out of a BGP-LS attribute.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkStateSrTlv {
    SrCapabilities(SrCapability),
    SrAlgorithm(Vec<u8>),
    SrLocalBlock(SrLocalBlock),
    SrmsPreference(u8),
    Srv6Capabilities(Srv6Capability),
    AdjacencySid(AdjacencySid),
    LanAdjacencySid(LanAdjacencySid),
    PeerNodeSid(PeerSid),
    PeerAdjacencySid(PeerSid),
    PeerSetSid(PeerSid),
    Srv6EndXSid(Srv6EndXSid),
    Srv6LanEndXSid(Srv6LanEndXSid),
    PrefixSid(PrefixSid),
    Srv6Locator(Srv6Locator),
    Srv6EndpointBehavior(Srv6EndpointBehaviorTlv),
    Srv6BgpPeerNodeSid(Srv6PeerNodeSid),
    Srv6SidStructure(Srv6SidStructure),
    /// Any other BGP-LS attribute TLV, kept raw.
    Other(Tlv),
}
