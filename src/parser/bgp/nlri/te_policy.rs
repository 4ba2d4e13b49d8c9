//! TE Policy NLRI parsing - draft-ietf-idr-te-lsp-distribution
//!
//! ```text
//! Protocol-ID (1) | Identifier (8) | Head-end Node Descriptors TLV (256) | Policy Descriptor TLVs
//! ```

use bytes::Bytes;
use log::{debug, trace};
use std::collections::BTreeMap;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::nlri::{check_mandatory_descriptors, read_node_descriptor_tlv};
use crate::parser::{Cursor, ReadUtils};

const HEAD_END: &str = "head-end Node Descriptor";

/// Parse a TE Policy NLRI
///
/// The head-end node descriptor must carry the Autonomous System (512) and BGP Router-ID (516)
/// sub-TLVs. Its raw bytes are hashed into [TePolicyNlri::head_end_hash].
pub fn parse_te_policy_nlri(data: Bytes) -> Result<TePolicyNlri, ParserError> {
    trace!("TE Policy NLRI: {}", hex::encode(&data));
    let mut input = Cursor::new(data);
    input.require("TE Policy NLRI", 9)?;

    let protocol_id = ProtocolId::try_from(input.read_u8()?)?;
    if !matches!(protocol_id, ProtocolId::RsvpTe | ProtocolId::SegmentRouting) {
        return Err(ParserError::InvalidEnumValue {
            type_name: "ProtocolId",
            value: u8::from(protocol_id) as u64,
        });
    }
    let identifier = input.read_u64()?;

    let (head_end, raw) =
        read_node_descriptor_tlv(&mut input, NodeDescriptorType::LocalNodeDescriptors)?;
    check_mandatory_descriptors(
        &head_end,
        HEAD_END,
        &[
            NodeDescriptorType::AutonomousSystem,
            NodeDescriptorType::BgpRouterId,
        ],
    )?;
    let head_end_hash = format!("{:x}", md5::compute(&raw));

    let policy_descriptors = parse_policy_descriptors(input)?;

    Ok(TePolicyNlri {
        protocol_id,
        identifier,
        head_end,
        head_end_hash,
        policy_descriptors,
    })
}

/// Parse the TE Policy Descriptor TLVs, at most one per type.
pub fn parse_policy_descriptors(
    data: impl Into<Cursor>,
) -> Result<BTreeMap<u16, PolicyDescriptor>, ParserError> {
    let mut input = data.into();
    let mut descriptors = BTreeMap::new();

    while !input.is_empty() {
        let (tlv_type, value) = input.read_tlv_t16_l16("TE Policy Descriptor TLV")?;
        if descriptors.contains_key(&tlv_type) {
            return Err(ParserError::DuplicateField {
                what: "TE Policy Descriptor TLV",
                field_type: tlv_type,
            });
        }
        descriptors.insert(tlv_type, parse_policy_descriptor(tlv_type, value)?);
    }

    Ok(descriptors)
}

fn parse_policy_descriptor(
    tlv_type: u16,
    mut value: Cursor,
) -> Result<PolicyDescriptor, ParserError> {
    let descriptor_type = match PolicyDescriptorType::try_from(tlv_type) {
        Ok(t) => t,
        Err(_) => {
            debug!("keeping unknown TE Policy descriptor {}", tlv_type);
            return Ok(PolicyDescriptor::Unknown(Tlv::new(
                tlv_type,
                value.read_remaining(),
            )));
        }
    };

    let descriptor = match descriptor_type {
        PolicyDescriptorType::TunnelId => {
            value.expect_len("Tunnel ID descriptor", &[2])?;
            PolicyDescriptor::TunnelId(value.read_u16()?)
        }
        PolicyDescriptorType::LspId => {
            value.expect_len("LSP ID descriptor", &[2])?;
            PolicyDescriptor::LspId(value.read_u16()?)
        }
        PolicyDescriptorType::TunnelHeadEnd => {
            let len = value.expect_len("IPv4/IPv6 Tunnel Head-end address", &[4, 16])?;
            PolicyDescriptor::TunnelHeadEnd(
                value.read_address_by_len("IPv4/IPv6 Tunnel Head-end address", len)?,
            )
        }
        PolicyDescriptorType::TunnelTailEnd => {
            let len = value.expect_len("IPv4/IPv6 Tunnel Tail-end address", &[4, 16])?;
            PolicyDescriptor::TunnelTailEnd(
                value.read_address_by_len("IPv4/IPv6 Tunnel Tail-end address", len)?,
            )
        }
        PolicyDescriptorType::SrCandidatePath => {
            PolicyDescriptor::SrCandidatePath(parse_sr_candidate_path_descriptor(value)?)
        }
    };

    Ok(descriptor)
}

/// SR Policy Candidate Path Descriptor (554)
///
/// ```text
/// protocol-origin(1) flags(1) reserved(2) endpoint(4|16) color(4)
/// originator-ASN(4) originator-address(4|16) discriminator(4)
/// ```
///
/// The E and O flags select the endpoint and originator address widths; the TLV length must
/// match them exactly.
fn parse_sr_candidate_path_descriptor(
    mut value: Cursor,
) -> Result<SrCandidatePathDescriptor, ParserError> {
    const WHAT: &str = "SR Policy Candidate Path descriptor";
    value.require(WHAT, 4)?;

    let protocol_origin = ProtocolOrigin::from(value.read_u8()?);
    let flags = CandidatePathDescriptorFlags::from_bits_retain(value.read_u8()?);
    value.read_u16()?;

    let endpoint_len = match flags.contains(CandidatePathDescriptorFlags::ENDPOINT_IPV6) {
        true => 16,
        false => 4,
    };
    let originator_len = match flags.contains(CandidatePathDescriptorFlags::ORIGINATOR_IPV6) {
        true => 16,
        false => 4,
    };
    value.expect_len(WHAT, &[endpoint_len + originator_len + 12])?;

    Ok(SrCandidatePathDescriptor {
        protocol_origin,
        flags,
        endpoint: value.read_address_by_len(WHAT, endpoint_len)?,
        color: value.read_u32()?,
        originator_asn: value.read_u32()?,
        originator_address: value.read_address_by_len(WHAT, originator_len)?,
        discriminator: value.read_u32()?,
    })
}
