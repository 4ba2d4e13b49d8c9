//! BGP-LS SRv6 attribute TLVs - RFC 9514

use log::debug;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{Cursor, ReadUtils};

const SRV6_SID_STRUCTURE_TLV: u16 = SrTlvType::Srv6SidStructure as u16;

/// Parse the sub-TLVs that trail the SRv6 TLVs.
///
/// Only the SID Structure sub-TLV (1252) is interpreted; any other type is kept raw.
pub fn parse_srv6_sub_tlvs(data: impl Into<Cursor>) -> Result<Vec<Srv6SubTlv>, ParserError> {
    let mut input = data.into();
    let mut sub_tlvs = vec![];

    while !input.is_empty() {
        let (tlv_type, mut value) = input.read_tlv_t16_l16("SRv6 sub-TLV")?;
        let sub_tlv = match tlv_type {
            SRV6_SID_STRUCTURE_TLV => Srv6SubTlv::SidStructure(parse_srv6_sid_structure(value)?),
            _ => {
                debug!("keeping unknown SRv6 sub-TLV type {}", tlv_type);
                Srv6SubTlv::Unknown(Tlv::new(tlv_type, value.read_remaining()))
            }
        };
        sub_tlvs.push(sub_tlv);
    }

    Ok(sub_tlvs)
}

/// Parse SRv6 SID Structure TLV (1252)
pub fn parse_srv6_sid_structure(data: impl Into<Cursor>) -> Result<Srv6SidStructure, ParserError> {
    let mut input = data.into();
    input.expect_len("SRv6 SID Structure TLV", &[4])?;

    Ok(Srv6SidStructure {
        locator_block_length: input.read_u8()?,
        locator_node_length: input.read_u8()?,
        function_length: input.read_u8()?,
        argument_length: input.read_u8()?,
    })
}

/// Parse SRv6 Capabilities TLV (1038)
pub fn parse_srv6_capability(data: impl Into<Cursor>) -> Result<Srv6Capability, ParserError> {
    let mut input = data.into();
    input.require("SRv6 Capabilities TLV", 4)?;

    let flags = Srv6CapabilityFlags::from_bits_retain(input.read_u16()?);
    input.read_u16()?;
    let sub_tlvs = parse_srv6_sub_tlvs(input)?;

    Ok(Srv6Capability { flags, sub_tlvs })
}

/// Parse SRv6 End.X SID TLV (1106)
///
/// ```text
/// behavior(2) flags(1) algorithm(1) weight(1) reserved(1) SID(16) sub-TLVs...
/// ```
pub fn parse_srv6_end_x_sid(data: impl Into<Cursor>) -> Result<Srv6EndXSid, ParserError> {
    let mut input = data.into();
    input.require("SRv6 End.X SID TLV", 22)?;

    let endpoint_behavior = Srv6EndpointBehavior::from(input.read_u16()?);
    let flags = Srv6SidFlags::from_bits_retain(input.read_u8()?);
    let algorithm = input.read_u8()?;
    let weight = input.read_u8()?;
    input.read_u8()?;
    let sid = input.read_ipv6_address()?;
    let sub_tlvs = parse_srv6_sub_tlvs(input)?;

    Ok(Srv6EndXSid {
        endpoint_behavior,
        flags,
        algorithm,
        weight,
        sid,
        sub_tlvs,
    })
}

/// Parse SRv6 LAN End.X SID TLV, 1107 (IS-IS, 6-byte System-ID) or 1108 (OSPFv3, 4-byte
/// Router-ID)
pub fn parse_srv6_lan_end_x_sid(
    data: impl Into<Cursor>,
    tlv_type: SrTlvType,
) -> Result<Srv6LanEndXSid, ParserError> {
    let mut input = data.into();
    let neighbor_len = match tlv_type {
        SrTlvType::IsisSrv6LanEndXSid => 6,
        SrTlvType::Ospfv3Srv6LanEndXSid => 4,
        other => {
            return Err(ParserError::UnknownType {
                what: "SRv6 LAN End.X SID TLV",
                tlv_type: u16::from(other),
            })
        }
    };
    input.require("SRv6 LAN End.X SID TLV", 6 + neighbor_len + 16)?;

    let endpoint_behavior = Srv6EndpointBehavior::from(input.read_u16()?);
    let flags = Srv6SidFlags::from_bits_retain(input.read_u8()?);
    let algorithm = input.read_u8()?;
    let weight = input.read_u8()?;
    input.read_u8()?;
    let neighbor_id = input.read_n_bytes(neighbor_len)?;
    let sid = input.read_ipv6_address()?;
    let sub_tlvs = parse_srv6_sub_tlvs(input)?;

    Ok(Srv6LanEndXSid {
        endpoint_behavior,
        flags,
        algorithm,
        weight,
        neighbor_id,
        sid,
        sub_tlvs,
    })
}

/// Parse SRv6 Locator TLV (1162)
pub fn parse_srv6_locator(data: impl Into<Cursor>) -> Result<Srv6Locator, ParserError> {
    let mut input = data.into();
    input.require("SRv6 Locator TLV", 8)?;

    let flags = Srv6LocatorFlags::from_bits_retain(input.read_u8()?);
    let algorithm = input.read_u8()?;
    input.read_u16()?;
    let metric = input.read_u32()?;
    let sub_tlvs = parse_srv6_sub_tlvs(input)?;

    Ok(Srv6Locator {
        flags,
        algorithm,
        metric,
        sub_tlvs,
    })
}

/// Parse SRv6 Endpoint Behavior TLV (1250)
pub fn parse_srv6_endpoint_behavior(
    data: impl Into<Cursor>,
) -> Result<Srv6EndpointBehaviorTlv, ParserError> {
    let mut input = data.into();
    input.expect_len("SRv6 Endpoint Behavior TLV", &[4])?;

    Ok(Srv6EndpointBehaviorTlv {
        endpoint_behavior: Srv6EndpointBehavior::from(input.read_u16()?),
        flags: input.read_u8()?,
        algorithm: input.read_u8()?,
    })
}

/// Parse SRv6 BGP Peer Node SID TLV (1251)
pub fn parse_srv6_peer_node_sid(data: impl Into<Cursor>) -> Result<Srv6PeerNodeSid, ParserError> {
    let mut input = data.into();
    input.expect_len("SRv6 BGP Peer Node SID TLV", &[12])?;

    let flags = Srv6SidFlags::from_bits_retain(input.read_u8()?);
    let weight = input.read_u8()?;
    input.read_u16()?;

    Ok(Srv6PeerNodeSid {
        flags,
        weight,
        peer_as: input.read_u32()?,
        peer_bgp_id: input.read_ipv4_address()?,
    })
}
