//! SR Policy tunnel encapsulation parsing - RFC 9830, RFC 9012
//!
//! An SR Policy is advertised as a Tunnel Encapsulation attribute (type 23) carrying one Tunnel
//! TLV of tunnel type 15. Its value is a list of sub-TLVs whose length field is one byte for
//! codes below 128 and two bytes otherwise.

use bytes::{Buf, Bytes};
use log::{debug, trace};

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{Cursor, ReadUtils};

/// Tunnel type code of the SR Policy Tunnel TLV
pub const SR_POLICY_TUNNEL_TYPE: u16 = 15;

const SUB_TLV: &str = "SR Policy sub-TLV";

/// Parse BGP Tunnel Encapsulation attribute (type 23), keeping the SR Policy tunnels
///
/// Tunnel TLVs of any other tunnel type are skipped.
pub fn parse_sr_policy_tunnel_encapsulation(data: Bytes) -> Result<Vec<SrPolicyTlv>, ParserError> {
    trace!("tunnel encapsulation attribute: {}", hex::encode(&data));
    let mut input = Cursor::new(data);
    let mut policies = vec![];

    while !input.is_empty() {
        let (tunnel_type, value) = input.read_tlv_t16_l16("Tunnel TLV")?;
        if tunnel_type != SR_POLICY_TUNNEL_TYPE {
            debug!("skipping tunnel TLV of tunnel type {}", tunnel_type);
            continue;
        }
        policies.push(parse_sr_policy_sub_tlvs(value)?);
    }

    Ok(policies)
}

/// Parse the value of an SR Policy Tunnel TLV (tunnel type 15)
pub fn parse_sr_policy_tlv(data: Bytes) -> Result<SrPolicyTlv, ParserError> {
    trace!("SR Policy tunnel TLV: {}", hex::encode(&data));
    parse_sr_policy_sub_tlvs(Cursor::new(data))
}

fn parse_sr_policy_sub_tlvs(mut input: Cursor) -> Result<SrPolicyTlv, ParserError> {
    let mut policy = SrPolicyTlv::default();

    while !input.is_empty() {
        let (code, mut value) = read_sub_tlv(&mut input)?;

        let sub_tlv_type = match SrPolicySubTlvType::try_from(code) {
            Ok(t) => t,
            Err(_) => {
                debug!("keeping unknown SR Policy sub-TLV {}", code);
                policy.unknown_sub_tlvs.push(UnknownSubTlv {
                    code,
                    value: value.read_remaining(),
                });
                continue;
            }
        };

        match sub_tlv_type {
            SrPolicySubTlvType::Preference => {
                set_once(&mut policy.preference, parse_preference(value)?, code)?
            }
            SrPolicySubTlvType::BindingSid => {
                set_once(&mut policy.binding_sid, parse_binding_sid(value)?, code)?
            }
            SrPolicySubTlvType::Srv6BindingSid => policy
                .srv6_binding_sids
                .push(parse_srv6_binding_sid(value)?),
            SrPolicySubTlvType::Enlp => set_once(&mut policy.enlp, parse_enlp(value)?, code)?,
            SrPolicySubTlvType::Priority => {
                value.expect_len("Priority sub-TLV", &[2])?;
                let priority = value.read_u8()?;
                set_once(&mut policy.priority, priority, code)?
            }
            SrPolicySubTlvType::SegmentList => {
                policy.segment_lists.push(parse_segment_list(value)?)
            }
            SrPolicySubTlvType::CandidatePathName => set_once(
                &mut policy.candidate_path_name,
                parse_name(value, "Candidate Path Name sub-TLV")?,
                code,
            )?,
            SrPolicySubTlvType::PolicyName => set_once(
                &mut policy.policy_name,
                parse_name(value, "Policy Name sub-TLV")?,
                code,
            )?,
        }
    }

    Ok(policy)
}

/// Read one sub-TLV header: type(1), then length(1) for types below 128 or length(2) otherwise.
fn read_sub_tlv(input: &mut Cursor) -> Result<(u8, Cursor), ParserError> {
    let header_offset = input.position();
    input.require_record(SUB_TLV, 1)?;
    let code = input.peek_remaining()[0];
    let header_len = if code < 128 { 2 } else { 3 };
    input.require_record(SUB_TLV, header_len)?;

    input.read_u8()?;
    let length = if code < 128 {
        input.read_u8()? as usize
    } else {
        input.read_u16()? as usize
    };
    let value = input.record_value(SUB_TLV, header_offset, length)?;
    Ok((code, value))
}

fn set_once<T>(slot: &mut Option<T>, value: T, code: u8) -> Result<(), ParserError> {
    if slot.is_some() {
        return Err(ParserError::DuplicateField {
            what: SUB_TLV,
            field_type: code as u16,
        });
    }
    *slot = Some(value);
    Ok(())
}

fn parse_preference(mut input: Cursor) -> Result<Preference, ParserError> {
    input.expect_len("Preference sub-TLV", &[6])?;
    let flags = input.read_u8()?;
    input.read_u8()?;
    Ok(Preference {
        flags,
        preference: input.read_u32()?,
    })
}

/// Binding SID sub-TLV (13): flags(1) reserved(1) then no BSID, a 4-byte label field or a
/// 16-byte SRv6 SID.
fn parse_binding_sid(mut input: Cursor) -> Result<BindingSidTlv, ParserError> {
    let length = input.expect_len("Binding SID sub-TLV", &[2, 6, 18])?;
    let flags = BindingSidFlags::from_bits_retain(input.read_u8()?);
    input.read_u8()?;

    let bsid = match length {
        2 => BindingSid::NoBsid,
        6 => BindingSid::Label(input.read_u32()? >> 12),
        _ => BindingSid::Srv6(input.read_ipv6_address()?),
    };
    Ok(BindingSidTlv { flags, bsid })
}

fn parse_srv6_binding_sid(mut input: Cursor) -> Result<Srv6BindingSidTlv, ParserError> {
    let length = input.expect_len("SRv6 Binding SID sub-TLV", &[18, 26])?;
    let flags = BindingSidFlags::from_bits_retain(input.read_u8()?);
    input.read_u8()?;
    let sid = input.read_ipv6_address()?;
    let behavior = match length {
        26 => Some(read_behavior_and_structure(&mut input)?),
        _ => None,
    };
    Ok(Srv6BindingSidTlv {
        flags,
        sid,
        behavior,
    })
}

fn parse_enlp(mut input: Cursor) -> Result<Enlp, ParserError> {
    input.expect_len("ENLP sub-TLV", &[3])?;
    let flags = input.read_u8()?;
    input.read_u8()?;
    Ok(Enlp {
        flags,
        enlp: EnlpValue::from(input.read_u8()?),
    })
}

fn parse_name(mut input: Cursor, what: &'static str) -> Result<String, ParserError> {
    input.require(what, 1)?;
    input.read_u8()?;
    let len = input.remaining();
    input.read_n_bytes_to_string(len)
}

/// behavior(2) reserved(2) LB(1) LN(1) function(1) argument(1)
fn read_behavior_and_structure(
    input: &mut Cursor,
) -> Result<Srv6BehaviorAndStructure, ParserError> {
    let endpoint_behavior = Srv6EndpointBehavior::from(input.read_u16()?);
    input.read_u16()?;
    Ok(Srv6BehaviorAndStructure {
        endpoint_behavior,
        structure: Srv6SidStructure {
            locator_block_length: input.read_u8()?,
            locator_node_length: input.read_u8()?,
            function_length: input.read_u8()?,
            argument_length: input.read_u8()?,
        },
    })
}

/// Parse Segment List sub-TLV (128): reserved(1) then segment sub-TLVs with 1-byte type and
/// length
///
/// Types A, B and C are decoded. Types D to K are recognized and kept raw. Any other code fails
/// the list, as does a second Weight sub-TLV.
pub fn parse_segment_list(data: impl Into<Cursor>) -> Result<SegmentList, ParserError> {
    let mut input = data.into();
    input.require("Segment List sub-TLV", 1)?;
    input.read_u8()?;

    let mut list = SegmentList::default();
    while !input.is_empty() {
        let (code, mut value) = input.read_tlv_t8_l8("Segment List sub-TLV")?;
        let segment_type = SegmentListSubTlvType::try_from(code)?;

        match segment_type {
            SegmentListSubTlvType::Weight => {
                if list.weight.is_some() {
                    return Err(ParserError::DuplicateField {
                        what: "Segment List Weight sub-TLV",
                        field_type: code as u16,
                    });
                }
                list.weight = Some(parse_weight(value)?);
            }
            SegmentListSubTlvType::TypeA => {
                list.segments.push(Segment::TypeA(parse_segment_type_a(value)?))
            }
            SegmentListSubTlvType::TypeB => {
                list.segments.push(Segment::TypeB(parse_segment_type_b(value)?))
            }
            SegmentListSubTlvType::TypeC => {
                list.segments.push(Segment::TypeC(parse_segment_type_c(value)?))
            }
            other => {
                debug!(
                    "segment {:?} not decoded, keeping {} bytes",
                    other,
                    value.remaining()
                );
                list.segments.push(Segment::Unsupported {
                    segment_type: other,
                    value: value.read_remaining(),
                });
            }
        }
    }

    Ok(list)
}

fn parse_weight(mut input: Cursor) -> Result<Weight, ParserError> {
    input.expect_len("Weight sub-TLV", &[6])?;
    let flags = input.read_u8()?;
    input.read_u8()?;
    Ok(Weight {
        flags,
        weight: input.read_u32()?,
    })
}

/// flags(1) reserved(1) label(20) TC(3) S(1) TTL(8)
fn parse_segment_type_a(mut input: Cursor) -> Result<LabelSegment, ParserError> {
    input.expect_len("Segment Type A", &[6])?;
    let flags = SegmentFlags::from_bits_retain(input.read_u8()?);
    input.read_u8()?;
    Ok(LabelSegment {
        flags,
        sid: MplsSid::from(input.read_u32()?),
    })
}

/// flags(1) reserved(1) SID(16) [behavior and SID structure(8)]
fn parse_segment_type_b(mut input: Cursor) -> Result<Srv6SidSegment, ParserError> {
    let length = input.expect_len("Segment Type B", &[18, 26])?;
    let flags = SegmentFlags::from_bits_retain(input.read_u8()?);
    input.read_u8()?;
    let sid = input.read_ipv6_address()?;
    let behavior = match length {
        26 => Some(read_behavior_and_structure(&mut input)?),
        _ => None,
    };
    Ok(Srv6SidSegment {
        flags,
        sid,
        behavior,
    })
}

/// flags(1) algorithm(1) IPv4 node address(4) [SR-MPLS SID(4)]
fn parse_segment_type_c(mut input: Cursor) -> Result<Ipv4NodeSegment, ParserError> {
    let length = input.expect_len("Segment Type C", &[6, 10])?;
    let flags = SegmentFlags::from_bits_retain(input.read_u8()?);
    let algorithm = input.read_u8()?;
    let node_address = input.read_ipv4_address()?;
    let sid = match length {
        10 => Some(MplsSid::from(input.read_u32()?)),
        _ => None,
    };
    Ok(Ipv4NodeSegment {
        flags,
        algorithm,
        node_address,
        sid,
    })
}
