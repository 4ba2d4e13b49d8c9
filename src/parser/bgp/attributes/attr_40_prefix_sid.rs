//! BGP Prefix-SID attribute parsing - RFC 8669, RFC 9252
//!
//! ```text
//!  TLV:           Type (1) | Length (2) | Value
//!  Label-Index:   Reserved (1) | Flags (2) | Label Index (4)
//!  SRGB:          Flags (2) | n x (SRGB base (3) | SRGB range (3))
//!  SRv6 Service:  Reserved (1) | Service sub-TLVs
//! ```

use bytes::Bytes;
use log::{debug, trace};

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{Cursor, ReadUtils};

const SRV6_SID_INFORMATION: u8 = 1;
const SRV6_SID_STRUCTURE: u8 = 1;

/// Parse BGP Prefix-SID attribute (type 40)
///
/// TLV types without a decoder are kept as received.
pub fn parse_prefix_sid_attribute(data: Bytes) -> Result<PrefixSidAttribute, ParserError> {
    trace!("Prefix-SID attribute: {}", hex::encode(&data));
    let mut input = Cursor::new(data);
    let mut tlvs = vec![];

    while !input.is_empty() {
        let (code, mut value) = input.read_tlv_t8_l16("Prefix-SID TLV")?;
        let tlv = match PrefixSidTlvType::try_from(code) {
            Ok(PrefixSidTlvType::LabelIndex) => parse_label_index(value)?,
            Ok(PrefixSidTlvType::OriginatorSrgb) => parse_originator_srgb(value)?,
            Ok(PrefixSidTlvType::Srv6L3Service) => {
                PrefixSidTlv::Srv6L3Service(parse_srv6_service(value)?)
            }
            Ok(PrefixSidTlvType::Srv6L2Service) => {
                PrefixSidTlv::Srv6L2Service(parse_srv6_service(value)?)
            }
            Err(_) => {
                debug!("keeping unknown Prefix-SID TLV {}", code);
                PrefixSidTlv::Unknown {
                    code,
                    value: value.read_remaining(),
                }
            }
        };
        tlvs.push(tlv);
    }

    Ok(PrefixSidAttribute { tlvs })
}

fn parse_label_index(mut input: Cursor) -> Result<PrefixSidTlv, ParserError> {
    input.expect_len("Label-Index TLV", &[7])?;
    input.read_u8()?;
    Ok(PrefixSidTlv::LabelIndex {
        flags: input.read_u16()?,
        label_index: input.read_u32()?,
    })
}

fn parse_originator_srgb(mut input: Cursor) -> Result<PrefixSidTlv, ParserError> {
    input.require("Originator SRGB TLV", 2)?;
    let flags = input.read_u16()?;

    let mut srgbs = vec![];
    while !input.is_empty() {
        input.require_record("Originator SRGB range", 6)?;
        srgbs.push(SrgbRange {
            base: input.read_u24()?,
            range: input.read_u24()?,
        });
    }

    Ok(PrefixSidTlv::OriginatorSrgb { flags, srgbs })
}

/// SRv6 L3/L2 Service TLV value: reserved(1) then Service sub-TLVs
fn parse_srv6_service(mut input: Cursor) -> Result<Srv6ServiceTlv, ParserError> {
    input.require("SRv6 Service TLV", 1)?;
    let reserved = input.read_u8()?;

    let mut sub_tlvs = vec![];
    while !input.is_empty() {
        let (code, mut value) = input.read_tlv_t8_l16("SRv6 Service sub-TLV")?;
        let sub_tlv = match code {
            SRV6_SID_INFORMATION => {
                Srv6ServiceSubTlv::SidInformation(parse_srv6_sid_information(value)?)
            }
            _ => {
                debug!("keeping unknown SRv6 Service sub-TLV {}", code);
                Srv6ServiceSubTlv::Unknown {
                    code,
                    value: value.read_remaining(),
                }
            }
        };
        sub_tlvs.push(sub_tlv);
    }

    Ok(Srv6ServiceTlv { reserved, sub_tlvs })
}

/// reserved(1) SID(16) flags(1) behavior(2) reserved(1) sub-sub-TLVs
fn parse_srv6_sid_information(mut input: Cursor) -> Result<Srv6SidInformation, ParserError> {
    input.require("SRv6 SID Information sub-TLV", 21)?;
    input.read_u8()?;
    let sid = input.read_ipv6_address()?;
    let flags = input.read_u8()?;
    let endpoint_behavior = Srv6EndpointBehavior::from(input.read_u16()?);
    input.read_u8()?;

    let mut sub_sub_tlvs = vec![];
    while !input.is_empty() {
        let (code, mut value) = input.read_tlv_t8_l16("SRv6 Service sub-sub-TLV")?;
        let sub_sub_tlv = match code {
            SRV6_SID_STRUCTURE => {
                value.expect_len("SRv6 SID Structure sub-sub-TLV", &[6])?;
                Srv6ServiceSubSubTlv::SidStructure(Srv6ServiceSidStructure {
                    structure: Srv6SidStructure {
                        locator_block_length: value.read_u8()?,
                        locator_node_length: value.read_u8()?,
                        function_length: value.read_u8()?,
                        argument_length: value.read_u8()?,
                    },
                    transposition_length: value.read_u8()?,
                    transposition_offset: value.read_u8()?,
                })
            }
            _ => {
                debug!("keeping unknown SRv6 Service sub-sub-TLV {}", code);
                Srv6ServiceSubSubTlv::Unknown {
                    code,
                    value: value.read_remaining(),
                }
            }
        };
        sub_sub_tlvs.push(sub_sub_tlv);
    }

    Ok(Srv6SidInformation {
        sid,
        flags,
        endpoint_behavior,
        sub_sub_tlvs,
    })
}
