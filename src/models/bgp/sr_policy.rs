//! SR Policy data structures: the SAFI 73 NLRI (RFC 9256 §2.1) and the SR Policy tunnel
//! encapsulation TLV with its segment lists (RFC 9830)

use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::models::*;

/// SR Policy NLRI (SAFI 73)
///
/// ```text
///  +-----------------------------------------------+
///  |    NLRI Length                   (1 octet)    |
///  +-----------------------------------------------+
///  |    Distinguisher                 (4 octets)   |
///  +-----------------------------------------------+
///  |    Policy Color                  (4 octets)   |
///  +-----------------------------------------------+
///  |    Endpoint                      (4 or 16 octets)
///  +-----------------------------------------------+
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrPolicyNlri {
    /// NLRI length in bytes (the wire carries bits)
    pub length: u8,
    pub distinguisher: u32,
    pub color: u32,
    pub endpoint: IpAddr,
}

/// Sub-TLV types of the SR Policy tunnel encapsulation TLV
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SrPolicySubTlvType {
    Preference = 12,
    BindingSid = 13,
    Enlp = 14,
    Priority = 15,
    Srv6BindingSid = 20,
    SegmentList = 128,
    CandidatePathName = 129,
    PolicyName = 130,
}

/// Sub-TLV types inside a Segment List
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SegmentListSubTlvType {
    /// SR-MPLS label
    TypeA = 1,
    /// IPv4 node address with optional SR-MPLS SID
    TypeC = 3,
    /// IPv6 node address with optional SR-MPLS SID
    TypeD = 4,
    /// IPv4 node address and local interface ID
    TypeE = 5,
    /// IPv4 local and remote interface addresses
    TypeF = 6,
    /// IPv6 local/remote interface IDs and node addresses
    TypeG = 7,
    /// IPv6 local and remote interface addresses
    TypeH = 8,
    Weight = 9,
    /// SRv6 SID
    TypeB = 13,
    /// IPv6 node address with optional SRv6 SID
    TypeI = 14,
    /// IPv6 local/remote interface IDs and node addresses with optional SRv6 SID
    TypeJ = 15,
    /// IPv6 local and remote interface addresses with optional SRv6 SID
    TypeK = 16,
}

bitflags! {
    /// Binding SID sub-TLV flags
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct BindingSidFlags: u8 {
        /// S-Flag: specified BSID only
        const SPECIFIED = 0x80;
        /// I-Flag: drop upon invalid
        const INVALID_DROP = 0x40;
        /// B-Flag: SRv6 endpoint behavior and SID structure present (SRv6 BSID only)
        const ENDPOINT_BEHAVIOR = 0x20;
    }
}

bitflags! {
    /// Segment sub-TLV flags
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SegmentFlags: u8 {
        const VERIFICATION = 0x80;
        const ALGORITHM = 0x40;
        const SRV6_BEHAVIOR = 0x20;
        const BEHAVIOR_AND_STRUCTURE = 0x10;
    }
}

/// Binding SID value, tagged by the length it was carried with (0, 4 or 16 bytes).
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindingSid {
    NoBsid,
    /// 20-bit MPLS label
    Label(u32),
    Srv6(Ipv6Addr),
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingSidTlv {
    pub flags: BindingSidFlags,
    pub bsid: BindingSid,
}

/// SRv6 Endpoint Behavior and SID Structure (RFC 9830 §2.4.4.2.4)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6BehaviorAndStructure {
    pub endpoint_behavior: Srv6EndpointBehavior,
    pub structure: Srv6SidStructure,
}

/// SRv6 Binding SID sub-TLV (20)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6BindingSidTlv {
    pub flags: BindingSidFlags,
    pub sid: Ipv6Addr,
    pub behavior: Option<Srv6BehaviorAndStructure>,
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Preference {
    pub flags: u8,
    pub preference: u32,
}

/// Explicit NULL Label Policy values
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum EnlpValue {
    PushIpv4 = 1,
    PushIpv6 = 2,
    PushBoth = 3,
    PushNone = 4,
    #[num_enum(catch_all)]
    Unknown(u8),
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enlp {
    pub flags: u8,
    pub enlp: EnlpValue,
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weight {
    pub flags: u8,
    pub weight: u32,
}

/// A 4-byte SR-MPLS SID: label(20) TC(3) S(1) TTL(8)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MplsSid {
    pub label: u32,
    pub traffic_class: u8,
    pub bottom_of_stack: bool,
    pub ttl: u8,
}

impl From<u32> for MplsSid {
    fn from(value: u32) -> Self {
        MplsSid {
            label: value >> 12,
            traffic_class: ((value >> 9) & 0x07) as u8,
            bottom_of_stack: (value >> 8) & 0x01 == 0x01,
            ttl: (value & 0xff) as u8,
        }
    }
}

impl From<MplsSid> for u32 {
    fn from(sid: MplsSid) -> Self {
        (sid.label << 12)
            | ((sid.traffic_class as u32 & 0x07) << 9)
            | ((sid.bottom_of_stack as u32) << 8)
            | sid.ttl as u32
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabelSegment {
    pub flags: SegmentFlags,
    pub sid: MplsSid,
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6SidSegment {
    pub flags: SegmentFlags,
    pub sid: Ipv6Addr,
    pub behavior: Option<Srv6BehaviorAndStructure>,
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ipv4NodeSegment {
    pub flags: SegmentFlags,
    pub algorithm: u8,
    pub node_address: Ipv4Addr,
    pub sid: Option<MplsSid>,
}

/// One segment of a segment list.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    TypeA(LabelSegment),
    TypeB(Srv6SidSegment),
    TypeC(Ipv4NodeSegment),
    /// Types D to K are recognized but not decoded; the raw value is kept.
    Unsupported {
        segment_type: SegmentListSubTlvType,
        value: Vec<u8>,
    },
}

impl Segment {
    pub fn segment_type(&self) -> SegmentListSubTlvType {
        match self {
            Segment::TypeA(_) => SegmentListSubTlvType::TypeA,
            Segment::TypeB(_) => SegmentListSubTlvType::TypeB,
            Segment::TypeC(_) => SegmentListSubTlvType::TypeC,
            Segment::Unsupported { segment_type, .. } => *segment_type,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentList {
    pub weight: Option<Weight>,
    pub segments: Vec<Segment>,
}

/// Sub-TLV of the SR Policy TLV this crate does not interpret.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnknownSubTlv {
    pub code: u8,
    pub value: Vec<u8>,
}

/// Decoded value of a Tunnel Encapsulation TLV with tunnel type 15 (SR Policy).
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrPolicyTlv {
    pub preference: Option<Preference>,
    pub binding_sid: Option<BindingSidTlv>,
    pub srv6_binding_sids: Vec<Srv6BindingSidTlv>,
    pub enlp: Option<Enlp>,
    pub priority: Option<u8>,
    pub candidate_path_name: Option<String>,
    pub policy_name: Option<String>,
    pub segment_lists: Vec<SegmentList>,
    pub unknown_sub_tlvs: Vec<UnknownSubTlv>,
}
