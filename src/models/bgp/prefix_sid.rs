//! BGP Prefix-SID attribute (RFC 8669) and its SRv6 Service TLVs (RFC 9252)

use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::net::Ipv6Addr;

use crate::models::*;

/// BGP Prefix-SID TLV types
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PrefixSidTlvType {
    LabelIndex = 1,
    OriginatorSrgb = 3,
    Srv6L3Service = 5,
    Srv6L2Service = 6,
}

/// BGP Prefix-SID path attribute (type 40)
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrefixSidAttribute {
    pub tlvs: Vec<PrefixSidTlv>,
}

impl PrefixSidAttribute {
    pub fn label_index(&self) -> Option<u32> {
        self.tlvs.iter().find_map(|tlv| match tlv {
            PrefixSidTlv::LabelIndex { label_index, .. } => Some(*label_index),
            _ => None,
        })
    }

    /// All SRv6 service SIDs, L3 first then L2, in wire order.
    pub fn srv6_sids(&self) -> Vec<Ipv6Addr> {
        let l3 = self.tlvs.iter().filter_map(|tlv| match tlv {
            PrefixSidTlv::Srv6L3Service(s) => Some(s),
            _ => None,
        });
        let l2 = self.tlvs.iter().filter_map(|tlv| match tlv {
            PrefixSidTlv::Srv6L2Service(s) => Some(s),
            _ => None,
        });
        l3.chain(l2)
            .flat_map(|service| service.sub_tlvs.iter())
            .filter_map(|sub_tlv| match sub_tlv {
                Srv6ServiceSubTlv::SidInformation(info) => Some(info.sid),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrefixSidTlv {
    LabelIndex { flags: u16, label_index: u32 },
    OriginatorSrgb { flags: u16, srgbs: Vec<SrgbRange> },
    Srv6L3Service(Srv6ServiceTlv),
    Srv6L2Service(Srv6ServiceTlv),
    Unknown { code: u8, value: Vec<u8> },
}

/// One Segment Routing Global Block of the Originator SRGB TLV.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrgbRange {
    pub base: u32,
    pub range: u32,
}

/// SRv6 L3/L2 Service TLV (RFC 9252 §2)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6ServiceTlv {
    pub reserved: u8,
    pub sub_tlvs: Vec<Srv6ServiceSubTlv>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Srv6ServiceSubTlv {
    SidInformation(Srv6SidInformation),
    Unknown { code: u8, value: Vec<u8> },
}

/// SRv6 SID Information Sub-TLV (RFC 9252 §3.1)
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6SidInformation {
    pub sid: Ipv6Addr,
    pub flags: u8,
    pub endpoint_behavior: Srv6EndpointBehavior,
    pub sub_sub_tlvs: Vec<Srv6ServiceSubSubTlv>,
}

impl Srv6SidInformation {
    pub fn sid_structure(&self) -> Option<&Srv6ServiceSidStructure> {
        self.sub_sub_tlvs.iter().find_map(|t| match t {
            Srv6ServiceSubSubTlv::SidStructure(s) => Some(s),
            _ => None,
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Srv6ServiceSubSubTlv {
    SidStructure(Srv6ServiceSidStructure),
    Unknown { code: u8, value: Vec<u8> },
}

/// SRv6 SID Structure Sub-Sub-TLV (RFC 9252 §3.2.1)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Srv6ServiceSidStructure {
    pub structure: Srv6SidStructure,
    pub transposition_length: u8,
    pub transposition_offset: u8,
}
