//! BGP-LS Node Descriptor TLV parsing - RFC 9552 §5.2.1

use bytes::Buf;
use log::debug;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{Cursor, ReadUtils};

const SUB_TLV: &str = "Node Descriptor sub-TLV";

/// Parse the sub-TLVs of a Local (256) or Remote (257) Node Descriptors TLV
///
/// Sub-TLV types outside 512-517 are kept raw. A known sub-TLV appearing twice is an error.
pub fn parse_node_descriptor(data: impl Into<Cursor>) -> Result<NodeDescriptor, ParserError> {
    let mut input = data.into();
    let mut desc = NodeDescriptor::default();

    while !input.is_empty() {
        let (tlv_type, mut value) = input.read_tlv_t16_l16(SUB_TLV)?;
        let sub_tlv_type = NodeDescriptorType::from(tlv_type);

        if desc.has(sub_tlv_type) {
            return Err(ParserError::DuplicateField {
                what: SUB_TLV,
                field_type: tlv_type,
            });
        }

        match sub_tlv_type {
            NodeDescriptorType::AutonomousSystem => {
                desc.autonomous_system = Some(read_u32_value(&mut value, "Autonomous System")?)
            }
            NodeDescriptorType::BgpLsIdentifier => {
                desc.bgp_ls_identifier = Some(read_u32_value(&mut value, "BGP-LS Identifier")?)
            }
            NodeDescriptorType::OspfAreaId => {
                desc.ospf_area_id = Some(read_u32_value(&mut value, "OSPF Area-ID")?)
            }
            NodeDescriptorType::IgpRouterId => {
                value.require("IGP Router-ID", 1)?;
                desc.igp_router_id = Some(value.read_remaining());
            }
            NodeDescriptorType::BgpRouterId => {
                value.expect_len("BGP Router-ID", &[4])?;
                desc.bgp_router_id = Some(value.read_ipv4_address()?);
            }
            NodeDescriptorType::MemberAsn => {
                desc.member_asn = Some(read_u32_value(&mut value, "Member-ASN")?)
            }
            _ => {
                debug!("keeping unknown node descriptor sub-TLV {}", tlv_type);
                desc.unknown_tlvs.push(Tlv::new(tlv_type, value.read_remaining()));
            }
        }
    }

    Ok(desc)
}

fn read_u32_value(value: &mut Cursor, what: &'static str) -> Result<u32, ParserError> {
    value.expect_len(what, &[4])?;
    value.read_u32()
}

/// Read a whole Node Descriptors TLV of the `expected` type off `input`.
///
/// Returns the decoded descriptor together with the raw TLV bytes, header included.
pub(crate) fn read_node_descriptor_tlv(
    input: &mut Cursor,
    expected: NodeDescriptorType,
) -> Result<(NodeDescriptor, Vec<u8>), ParserError> {
    let mut raw = input.clone();
    let (tlv_type, value) = input.read_tlv_t16_l16("Node Descriptors TLV")?;
    if NodeDescriptorType::from(tlv_type) != expected {
        return Err(ParserError::UnknownType {
            what: "Node Descriptors TLV",
            tlv_type,
        });
    }

    let raw = raw.read_n_bytes(4 + value.remaining())?;
    Ok((parse_node_descriptor(value)?, raw))
}

/// Fail with [ParserError::MissingMandatoryTlv] on the first of `required` that `desc` lacks.
pub fn check_mandatory_descriptors(
    desc: &NodeDescriptor,
    what: &'static str,
    required: &[NodeDescriptorType],
) -> Result<(), ParserError> {
    match required.iter().find(|t| !desc.has(**t)) {
        Some(missing) => Err(ParserError::MissingMandatoryTlv {
            what,
            tlv_type: u16::from(*missing),
        }),
        None => Ok(()),
    }
}
