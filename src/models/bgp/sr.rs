//! BGP-LS segment routing TLVs for SR-MPLS (RFC 9085) and BGP EPE (RFC 9086)

use bitflags::bitflags;

use crate::models::*;

/// The SID/Label field of the SR TLVs.
///
/// On the wire a 3-byte field carries an MPLS label in its low 20 bits, and a 4-byte field
/// carries a 32-bit SID index.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SidLabel {
    Label(u32),
    Index(u32),
}

impl SidLabel {
    pub const fn value(&self) -> u32 {
        match self {
            SidLabel::Label(v) | SidLabel::Index(v) => *v,
        }
    }
}

bitflags! {
    /// IS-IS Adjacency SID flags (RFC 8667 §2.2.1)
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IsisAdjSidFlags: u8 {
        const ADDRESS_FAMILY = 0x80;
        const BACKUP = 0x40;
        const VALUE = 0x20;
        const LOCAL = 0x10;
        const SET = 0x08;
        const PERSISTENT = 0x04;
    }
}

bitflags! {
    /// OSPF Adjacency SID flags (RFC 8665 §6.1)
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OspfAdjSidFlags: u8 {
        const BACKUP = 0x80;
        const VALUE = 0x40;
        const LOCAL = 0x20;
        const GROUP = 0x10;
        const PERSISTENT = 0x08;
    }
}

/// Adjacency SID flags, interpreted according to the advertising protocol.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdjSidFlags {
    Isis(IsisAdjSidFlags),
    Ospf(OspfAdjSidFlags),
    Raw(u8),
}

impl AdjSidFlags {
    pub fn new(protocol_id: ProtocolId, bits: u8) -> Self {
        if protocol_id.is_isis() {
            AdjSidFlags::Isis(IsisAdjSidFlags::from_bits_retain(bits))
        } else if protocol_id.is_ospf() {
            AdjSidFlags::Ospf(OspfAdjSidFlags::from_bits_retain(bits))
        } else {
            AdjSidFlags::Raw(bits)
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            AdjSidFlags::Isis(f) => f.bits(),
            AdjSidFlags::Ospf(f) => f.bits(),
            AdjSidFlags::Raw(b) => *b,
        }
    }

    pub fn is_backup(&self) -> bool {
        match self {
            AdjSidFlags::Isis(f) => f.contains(IsisAdjSidFlags::BACKUP),
            AdjSidFlags::Ospf(f) => f.contains(OspfAdjSidFlags::BACKUP),
            AdjSidFlags::Raw(_) => false,
        }
    }
}

/// Adjacency SID TLV (1099)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdjacencySid {
    pub flags: AdjSidFlags,
    pub weight: u8,
    pub sid: SidLabel,
}

/// LAN Adjacency SID TLV (1100)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LanAdjacencySid {
    pub flags: AdjSidFlags,
    pub weight: u8,
    /// IS-IS System-ID (6 bytes) or OSPF Router-ID (4 bytes)
    pub neighbor_id: Vec<u8>,
    pub sid: SidLabel,
}

bitflags! {
    /// IS-IS Prefix SID flags (RFC 8667 §2.1.1)
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct IsisPrefixSidFlags: u8 {
        const READVERTISEMENT = 0x80;
        const NODE = 0x40;
        const NO_PHP = 0x20;
        const EXPLICIT_NULL = 0x10;
        const VALUE = 0x08;
        const LOCAL = 0x04;
    }
}

bitflags! {
    /// OSPF Prefix SID flags (RFC 8665 §5)
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct OspfPrefixSidFlags: u8 {
        const NO_PHP = 0x40;
        const MAPPING_SERVER = 0x20;
        const EXPLICIT_NULL = 0x10;
        const VALUE = 0x08;
        const LOCAL = 0x04;
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrefixSidFlags {
    Isis(IsisPrefixSidFlags),
    Ospf(OspfPrefixSidFlags),
    Raw(u8),
}

impl PrefixSidFlags {
    pub fn new(protocol_id: ProtocolId, bits: u8) -> Self {
        if protocol_id.is_isis() {
            PrefixSidFlags::Isis(IsisPrefixSidFlags::from_bits_retain(bits))
        } else if protocol_id.is_ospf() {
            PrefixSidFlags::Ospf(OspfPrefixSidFlags::from_bits_retain(bits))
        } else {
            PrefixSidFlags::Raw(bits)
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            PrefixSidFlags::Isis(f) => f.bits(),
            PrefixSidFlags::Ospf(f) => f.bits(),
            PrefixSidFlags::Raw(b) => *b,
        }
    }
}

/// Prefix SID TLV (1158)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixSid {
    pub flags: PrefixSidFlags,
    pub algorithm: u8,
    pub sid: SidLabel,
}

bitflags! {
    /// Peer Node/Adjacency/Set SID flags (RFC 9086 §5)
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PeerSidFlags: u8 {
        const VALUE = 0x80;
        const LOCAL = 0x40;
        const BACKUP = 0x20;
        const PERSISTENT = 0x10;
    }
}

/// Peer Node SID (1101), Peer Adjacency SID (1102) and Peer Set SID (1103) share one layout.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerSid {
    pub flags: PeerSidFlags,
    pub weight: u8,
    pub sid: SidLabel,
}

bitflags! {
    /// IS-IS SR Capabilities flags (RFC 8667 §3.1)
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SrCapabilityFlags: u8 {
        const MPLS_IPV4 = 0x80;
        const MPLS_IPV6 = 0x40;
    }
}

/// One range entry of the SR Capabilities or SR Local Block TLV.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SidLabelRange {
    /// 24-bit range size
    pub range_size: u32,
    /// First SID/label of the range
    pub sid: SidLabel,
}

/// SR Capabilities TLV (1034)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrCapability {
    pub flags: SrCapabilityFlags,
    pub ranges: Vec<SidLabelRange>,
}

/// SR Local Block TLV (1036)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrLocalBlock {
    /// No flags are defined; kept as received.
    pub flags: u8,
    pub ranges: Vec<SidLabelRange>,
}
