//! BGP Link-State attribute parsing - RFC 9552
//!
//! Walks the TLVs of a BGP-LS attribute and decodes the segment routing ones (RFC 9085,
//! RFC 9086, RFC 9514). Every other TLV is kept as received.

use bytes::Bytes;
use log::trace;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::attributes::*;
use crate::parser::{Cursor, ReadUtils};

/// Parse the segment routing TLVs of a BGP Link-State attribute (type 29)
///
/// `protocol_id` is the Protocol-ID of the NLRI the attribute was received with; it selects the
/// IS-IS or OSPF flag layout of the Adjacency SID and Prefix SID TLVs and the neighbor width of
/// the LAN Adjacency SID TLV.
pub fn parse_link_state_sr_tlvs(
    data: Bytes,
    protocol_id: ProtocolId,
) -> Result<Vec<LinkStateSrTlv>, ParserError> {
    trace!("BGP-LS attribute: {}", hex::encode(&data));
    let mut input = Cursor::new(data);
    let mut tlvs = vec![];

    while !input.is_empty() {
        let (tlv_type, value) = input.read_tlv_t16_l16("BGP-LS attribute TLV")?;
        tlvs.push(parse_link_state_sr_tlv(tlv_type, value, protocol_id)?);
    }

    Ok(tlvs)
}

/// Decode one BGP-LS attribute TLV by type.
pub fn parse_link_state_sr_tlv(
    tlv_type: u16,
    value: Cursor,
    protocol_id: ProtocolId,
) -> Result<LinkStateSrTlv, ParserError> {
    let sr_type = match SrTlvType::try_from(tlv_type) {
        Ok(t) => t,
        Err(_) => return Ok(other_tlv(tlv_type, value)),
    };

    let tlv = match sr_type {
        SrTlvType::SrCapabilities => LinkStateSrTlv::SrCapabilities(parse_sr_capability(value)?),
        SrTlvType::SrAlgorithm => LinkStateSrTlv::SrAlgorithm(parse_sr_algorithm(value)?),
        SrTlvType::SrLocalBlock => LinkStateSrTlv::SrLocalBlock(parse_sr_local_block(value)?),
        SrTlvType::SrmsPreference => {
            LinkStateSrTlv::SrmsPreference(parse_srms_preference(value)?)
        }
        SrTlvType::Srv6Capabilities => {
            LinkStateSrTlv::Srv6Capabilities(parse_srv6_capability(value)?)
        }
        SrTlvType::AdjacencySid => {
            LinkStateSrTlv::AdjacencySid(parse_adjacency_sid(value, protocol_id)?)
        }
        SrTlvType::LanAdjacencySid => {
            LinkStateSrTlv::LanAdjacencySid(parse_lan_adjacency_sid(value, protocol_id)?)
        }
        SrTlvType::PeerNodeSid => LinkStateSrTlv::PeerNodeSid(parse_peer_sid(value)?),
        SrTlvType::PeerAdjacencySid => LinkStateSrTlv::PeerAdjacencySid(parse_peer_sid(value)?),
        SrTlvType::PeerSetSid => LinkStateSrTlv::PeerSetSid(parse_peer_sid(value)?),
        SrTlvType::Srv6EndXSid => LinkStateSrTlv::Srv6EndXSid(parse_srv6_end_x_sid(value)?),
        SrTlvType::IsisSrv6LanEndXSid | SrTlvType::Ospfv3Srv6LanEndXSid => {
            LinkStateSrTlv::Srv6LanEndXSid(parse_srv6_lan_end_x_sid(value, sr_type)?)
        }
        SrTlvType::PrefixSid => LinkStateSrTlv::PrefixSid(parse_prefix_sid(value, protocol_id)?),
        SrTlvType::Srv6Locator => LinkStateSrTlv::Srv6Locator(parse_srv6_locator(value)?),
        SrTlvType::Srv6EndpointBehavior => {
            LinkStateSrTlv::Srv6EndpointBehavior(parse_srv6_endpoint_behavior(value)?)
        }
        SrTlvType::Srv6BgpPeerNodeSid => {
            LinkStateSrTlv::Srv6BgpPeerNodeSid(parse_srv6_peer_node_sid(value)?)
        }
        SrTlvType::Srv6SidStructure => {
            LinkStateSrTlv::Srv6SidStructure(parse_srv6_sid_structure(value)?)
        }
        // only meaningful inside the SR Capabilities and SR Local Block TLVs
        SrTlvType::SidLabel => other_tlv(tlv_type, value),
    };

    Ok(tlv)
}

fn other_tlv(tlv_type: u16, mut value: Cursor) -> LinkStateSrTlv {
    LinkStateSrTlv::Other(Tlv::new(tlv_type, value.read_remaining()))
}
