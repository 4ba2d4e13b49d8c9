//! TE Policy NLRI and descriptors (draft-ietf-idr-te-lsp-distribution)

use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive, TryFromPrimitive};
use std::collections::BTreeMap;
use std::net::IpAddr;

use crate::models::*;

/// TE Policy Descriptor TLV types
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum PolicyDescriptorType {
    TunnelId = 550,
    LspId = 551,
    TunnelHeadEnd = 552,
    TunnelTailEnd = 553,
    SrCandidatePath = 554,
}

/// Who instantiated an SR Policy candidate path
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ProtocolOrigin {
    Pcep = 10,
    BgpSrPolicy = 20,
    Configuration = 30,
    #[num_enum(catch_all)]
    Unknown(u8),
}

bitflags! {
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CandidatePathDescriptorFlags: u8 {
        /// E-Flag: the endpoint is an IPv6 address
        const ENDPOINT_IPV6 = 0x80;
        /// O-Flag: the originator address is an IPv6 address
        const ORIGINATOR_IPV6 = 0x40;
    }
}

/// SR Policy Candidate Path Descriptor (554)
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SrCandidatePathDescriptor {
    pub protocol_origin: ProtocolOrigin,
    pub flags: CandidatePathDescriptorFlags,
    pub endpoint: IpAddr,
    pub color: u32,
    pub originator_asn: u32,
    pub originator_address: IpAddr,
    pub discriminator: u32,
}

#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PolicyDescriptor {
    TunnelId(u16),
    LspId(u16),
    TunnelHeadEnd(IpAddr),
    TunnelTailEnd(IpAddr),
    SrCandidatePath(SrCandidatePathDescriptor),
    Unknown(Tlv),
}

/// TE Policy NLRI
///
/// ```text
///  +-+-+-+-+-+-+-+-+
///  |  Protocol-ID  |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |                           Identifier                          |
///  |                            (64 bits)                          |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  //               Headend (Node Descriptors)                    //
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  //                 TE Policy Descriptors (variable)            //
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TePolicyNlri {
    pub protocol_id: ProtocolId,
    pub identifier: u64,
    pub head_end: NodeDescriptor,
    /// MD5 of the raw head-end node descriptor TLV, lowercase hex
    pub head_end_hash: String,
    /// At most one descriptor per TLV type, keyed by type
    pub policy_descriptors: BTreeMap<u16, PolicyDescriptor>,
}

impl TePolicyNlri {
    pub fn descriptor(&self, tlv_type: PolicyDescriptorType) -> Option<&PolicyDescriptor> {
        self.policy_descriptors.get(&u16::from(tlv_type))
    }

    pub fn tunnel_id(&self) -> Option<u16> {
        match self.descriptor(PolicyDescriptorType::TunnelId) {
            Some(PolicyDescriptor::TunnelId(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn lsp_id(&self) -> Option<u16> {
        match self.descriptor(PolicyDescriptorType::LspId) {
            Some(PolicyDescriptor::LspId(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn candidate_path(&self) -> Option<&SrCandidatePathDescriptor> {
        match self.descriptor(PolicyDescriptorType::SrCandidatePath) {
            Some(PolicyDescriptor::SrCandidatePath(cp)) => Some(cp),
            _ => None,
        }
    }
}
