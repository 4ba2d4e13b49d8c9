//! BGP-LS SR-MPLS attribute TLVs - RFC 9085, RFC 9086
//!
//! All the SID-carrying TLVs end with a SID/Label field whose meaning depends on its width: a
//! 3-byte field is an MPLS label (low 20 bits), a 4-byte field is a 32-bit index. The SR
//! Capabilities and SR Local Block TLVs instead carry ranges, where the 3-byte range size is a
//! plain 24-bit integer followed by a SID/Label sub-TLV.

use bytes::Buf;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{Cursor, ReadUtils};

const SID_LABEL_SUB_TLV: u16 = SrTlvType::SidLabel as u16;

/// flags(1) + weight/algorithm(1) + reserved(2)
const SID_TLV_HEADER_LEN: usize = 4;

/// Read the SID/Label field that fills the rest of `input`.
pub(crate) fn read_sid_label(
    input: &mut Cursor,
    what: &'static str,
) -> Result<SidLabel, ParserError> {
    match input.remaining() {
        3 => Ok(SidLabel::Label(input.read_u24()? & 0x000f_ffff)),
        4 => Ok(SidLabel::Index(input.read_u32()?)),
        length => Err(ParserError::InvalidLength { what, length }),
    }
}

/// Parse Adjacency SID TLV (1099)
pub fn parse_adjacency_sid(
    data: impl Into<Cursor>,
    protocol_id: ProtocolId,
) -> Result<AdjacencySid, ParserError> {
    let mut input = data.into();
    input.require("Adjacency SID TLV", SID_TLV_HEADER_LEN + 3)?;

    let flags = AdjSidFlags::new(protocol_id, input.read_u8()?);
    let weight = input.read_u8()?;
    input.read_u16()?;
    let sid = read_sid_label(&mut input, "Adjacency SID TLV")?;

    Ok(AdjacencySid { flags, weight, sid })
}

/// Parse LAN Adjacency SID TLV (1100)
///
/// The neighbor is an IS-IS System-ID (6 bytes) or an OSPF Router-ID (4 bytes), picked by the
/// protocol that advertised the link.
pub fn parse_lan_adjacency_sid(
    data: impl Into<Cursor>,
    protocol_id: ProtocolId,
) -> Result<LanAdjacencySid, ParserError> {
    let mut input = data.into();
    let neighbor_len = if protocol_id.is_isis() { 6 } else { 4 };
    input.require("LAN Adjacency SID TLV", SID_TLV_HEADER_LEN + neighbor_len + 3)?;

    let flags = AdjSidFlags::new(protocol_id, input.read_u8()?);
    let weight = input.read_u8()?;
    input.read_u16()?;
    let neighbor_id = input.read_n_bytes(neighbor_len)?;
    let sid = read_sid_label(&mut input, "LAN Adjacency SID TLV")?;

    Ok(LanAdjacencySid {
        flags,
        weight,
        neighbor_id,
        sid,
    })
}

/// Parse Prefix SID TLV (1158)
pub fn parse_prefix_sid(
    data: impl Into<Cursor>,
    protocol_id: ProtocolId,
) -> Result<PrefixSid, ParserError> {
    let mut input = data.into();
    input.require("Prefix SID TLV", SID_TLV_HEADER_LEN + 3)?;

    let flags = PrefixSidFlags::new(protocol_id, input.read_u8()?);
    let algorithm = input.read_u8()?;
    input.read_u16()?;
    let sid = read_sid_label(&mut input, "Prefix SID TLV")?;

    Ok(PrefixSid {
        flags,
        algorithm,
        sid,
    })
}

/// Parse Peer Node SID (1101), Peer Adjacency SID (1102) or Peer Set SID (1103) TLV
pub fn parse_peer_sid(data: impl Into<Cursor>) -> Result<PeerSid, ParserError> {
    let mut input = data.into();
    input.require("Peer SID TLV", SID_TLV_HEADER_LEN + 3)?;

    let flags = PeerSidFlags::from_bits_retain(input.read_u8()?);
    let weight = input.read_u8()?;
    input.read_u16()?;
    let sid = read_sid_label(&mut input, "Peer SID TLV")?;

    Ok(PeerSid { flags, weight, sid })
}

/// Parse SR Capabilities TLV (1034)
pub fn parse_sr_capability(data: impl Into<Cursor>) -> Result<SrCapability, ParserError> {
    let mut input = data.into();
    input.require("SR Capabilities TLV", 2)?;

    let flags = SrCapabilityFlags::from_bits_retain(input.read_u8()?);
    input.read_u8()?;
    let ranges = parse_sid_label_ranges(&mut input, "SR Capabilities range")?;

    Ok(SrCapability { flags, ranges })
}

/// Parse SR Local Block TLV (1036)
pub fn parse_sr_local_block(data: impl Into<Cursor>) -> Result<SrLocalBlock, ParserError> {
    let mut input = data.into();
    input.require("SR Local Block TLV", 2)?;

    let flags = input.read_u8()?;
    input.read_u8()?;
    let ranges = parse_sid_label_ranges(&mut input, "SR Local Block range")?;

    Ok(SrLocalBlock { flags, ranges })
}

/// Walk `range(3) + SID/Label sub-TLV` entries until the input is exhausted.
///
/// The only sub-TLV allowed here is SID/Label (1161); anything else fails the TLV.
fn parse_sid_label_ranges(
    input: &mut Cursor,
    what: &'static str,
) -> Result<Vec<SidLabelRange>, ParserError> {
    let mut ranges = vec![];

    while !input.is_empty() {
        // range(3) + sub-TLV type(2) + sub-TLV length(2)
        input.require_record(what, 7)?;
        let range_size = input.read_u24()?;

        let (sub_tlv_type, mut value) = input.read_tlv_t16_l16(what)?;
        if sub_tlv_type != SID_LABEL_SUB_TLV {
            return Err(ParserError::UnknownType {
                what: "SID/Label sub-TLV",
                tlv_type: sub_tlv_type,
            });
        }
        let sid = read_sid_label(&mut value, "SID/Label sub-TLV")?;

        ranges.push(SidLabelRange { range_size, sid });
    }

    Ok(ranges)
}

/// Parse SR Algorithm TLV (1035)
pub fn parse_sr_algorithm(data: impl Into<Cursor>) -> Result<Vec<u8>, ParserError> {
    let mut input = data.into();
    Ok(input.read_remaining())
}

/// Parse SRMS Preference TLV (1037)
pub fn parse_srms_preference(data: impl Into<Cursor>) -> Result<u8, ParserError> {
    let mut input = data.into();
    input.expect_len("SRMS Preference TLV", &[1])?;
    input.read_u8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, Bytes, BytesMut};

    #[test]
    fn test_parse_adjacency_sid_isis_label() {
        // F=0 B=0 V=1 L=1, weight 10, label 24001
        let data = Bytes::from(vec![0x30, 0x0a, 0x00, 0x00, 0x00, 0x5d, 0xc1]);
        let adj = parse_adjacency_sid(data, ProtocolId::IsisL2).unwrap();

        assert_eq!(
            adj.flags,
            AdjSidFlags::Isis(IsisAdjSidFlags::VALUE | IsisAdjSidFlags::LOCAL)
        );
        assert_eq!(adj.weight, 10);
        assert_eq!(adj.sid, SidLabel::Label(24001));
        assert_eq!(adj.sid.value(), 24001);
    }

    #[test]
    fn test_parse_adjacency_sid_ospf_flags() {
        let data = Bytes::from(vec![0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07]);
        let adj = parse_adjacency_sid(data, ProtocolId::Ospfv2).unwrap();

        assert!(adj.flags.is_backup());
        assert_eq!(adj.flags.bits(), 0x80);
        assert_eq!(adj.sid, SidLabel::Index(7));
        assert_eq!(adj.sid.value(), 7);
    }

    #[test]
    fn test_adjacency_sid_flags_depend_on_protocol() {
        let data = Bytes::from(vec![0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10]);
        let isis = parse_adjacency_sid(data.clone(), ProtocolId::IsisL1).unwrap();
        let ospf = parse_adjacency_sid(data.clone(), ProtocolId::Ospfv3).unwrap();
        let bgp = parse_adjacency_sid(data, ProtocolId::Bgp).unwrap();

        // 0x40 is B for IS-IS but V for OSPF
        assert!(isis.flags.is_backup());
        assert!(!ospf.flags.is_backup());
        assert_eq!(bgp.flags, AdjSidFlags::Raw(0x40));
    }

    #[test]
    fn test_parse_adjacency_sid_bad_length() {
        let data = Bytes::from(vec![0x30, 0x0a, 0x00, 0x00, 0x05, 0xdc, 0x41, 0x00, 0x00]);
        assert_eq!(
            parse_adjacency_sid(data, ProtocolId::IsisL2).unwrap_err(),
            ParserError::InvalidLength {
                what: "Adjacency SID TLV",
                length: 5
            }
        );

        let data = Bytes::from(vec![0x30, 0x0a, 0x00]);
        assert!(matches!(
            parse_adjacency_sid(data, ProtocolId::IsisL2),
            Err(ParserError::InsufficientData { needed: 7, .. })
        ));
    }

    #[test]
    fn test_parse_lan_adjacency_sid() {
        let mut data = BytesMut::new();
        data.put_u8(0x30);
        data.put_u8(0x01);
        data.put_u16(0);
        data.put_slice(&[0x19, 0x21, 0x68, 0x00, 0x00, 0x01]);
        data.put_uint(24005, 3);

        let lan = parse_lan_adjacency_sid(data.freeze(), ProtocolId::IsisL2).unwrap();
        assert_eq!(lan.neighbor_id, vec![0x19, 0x21, 0x68, 0x00, 0x00, 0x01]);
        assert_eq!(lan.sid, SidLabel::Label(24005));

        let mut data = BytesMut::new();
        data.put_u8(0x60);
        data.put_u8(0x01);
        data.put_u16(0);
        data.put_slice(&[10, 0, 0, 2]);
        data.put_u32(100);
        let lan = parse_lan_adjacency_sid(data.freeze(), ProtocolId::Ospfv2).unwrap();
        assert_eq!(lan.neighbor_id, vec![10, 0, 0, 2]);
        assert_eq!(lan.sid, SidLabel::Index(100));
    }

    #[test]
    fn test_parse_prefix_sid() {
        // IS-IS N flag, algorithm 0, index 101
        let data = Bytes::from(vec![0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x65]);
        let sid = parse_prefix_sid(data, ProtocolId::IsisL2).unwrap();
        assert_eq!(sid.flags, PrefixSidFlags::Isis(IsisPrefixSidFlags::NODE));
        assert_eq!(sid.algorithm, 0);
        assert_eq!(sid.sid, SidLabel::Index(101));

        // OSPF NP flag, algorithm 128, label
        let data = Bytes::from(vec![0x40, 0x80, 0x00, 0x00, 0x00, 0x03, 0xe8]);
        let sid = parse_prefix_sid(data, ProtocolId::Ospfv2).unwrap();
        assert_eq!(sid.flags, PrefixSidFlags::Ospf(OspfPrefixSidFlags::NO_PHP));
        assert_eq!(sid.algorithm, 128);
        assert_eq!(sid.sid, SidLabel::Label(1000));
    }

    #[test]
    fn test_parse_peer_sid() {
        let data = Bytes::from(vec![0xd0, 0x00, 0x00, 0x00, 0x00, 0x05, 0xdc]);
        let peer = parse_peer_sid(data).unwrap();
        assert_eq!(
            peer.flags,
            PeerSidFlags::VALUE | PeerSidFlags::LOCAL | PeerSidFlags::PERSISTENT
        );
        assert_eq!(peer.sid, SidLabel::Label(1500));
    }

    #[test]
    fn test_label_is_masked_to_20_bits() {
        // upper nibble of the 3-byte field is not part of the label
        let data = Bytes::from(vec![0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff]);
        assert_eq!(
            parse_peer_sid(data).unwrap().sid,
            SidLabel::Label(0x000f_ffff)
        );
    }

    fn sr_capability_bytes() -> BytesMut {
        let mut data = BytesMut::new();
        data.put_u8(0xc0); // I and V
        data.put_u8(0x00);
        // range 8000, first label 16000
        data.put_uint(8000, 3);
        data.put_u16(1161);
        data.put_u16(3);
        data.put_uint(16000, 3);
        // range 0xf00001 (not masked), first index 0xf0000001 (not masked)
        data.put_uint(0xf00001, 3);
        data.put_u16(1161);
        data.put_u16(4);
        data.put_u32(0xf0000001);
        data
    }

    #[test]
    fn test_parse_sr_capability() {
        let cap = parse_sr_capability(sr_capability_bytes().freeze()).unwrap();
        assert_eq!(
            cap.flags,
            SrCapabilityFlags::MPLS_IPV4 | SrCapabilityFlags::MPLS_IPV6
        );
        assert_eq!(
            cap.ranges,
            vec![
                SidLabelRange {
                    range_size: 8000,
                    sid: SidLabel::Label(16000)
                },
                SidLabelRange {
                    range_size: 0xf00001,
                    sid: SidLabel::Index(0xf0000001)
                },
            ]
        );
    }

    #[test]
    fn test_parse_sr_capability_masks_label_but_not_range() {
        let mut data = BytesMut::new();
        data.put_u16(0);
        data.put_uint(0xffffff, 3);
        data.put_u16(1161);
        data.put_u16(3);
        data.put_uint(0xffffff, 3);
        let cap = parse_sr_capability(data.freeze()).unwrap();
        assert_eq!(cap.ranges[0].range_size, 0xffffff);
        assert_eq!(cap.ranges[0].sid, SidLabel::Label(0x0fffff));
    }

    #[test]
    fn test_parse_sr_capability_unknown_sub_tlv() {
        let mut data = BytesMut::new();
        data.put_u16(0);
        data.put_uint(100, 3);
        data.put_u16(1162);
        data.put_u16(3);
        data.put_uint(16000, 3);
        assert_eq!(
            parse_sr_capability(data.freeze()).unwrap_err(),
            ParserError::UnknownType {
                what: "SID/Label sub-TLV",
                tlv_type: 1162
            }
        );
    }

    #[test]
    fn test_parse_sr_capability_truncated_range() {
        let mut data = sr_capability_bytes();
        // a trailing partial range entry
        data.put_uint(100, 3);
        data.put_u16(1161);
        let len = data.len();
        assert_eq!(
            parse_sr_capability(data.freeze()).unwrap_err(),
            ParserError::TruncatedRecord {
                what: "SR Capabilities range",
                offset: len - 5,
                needed: 7,
                available: 5
            }
        );
    }

    #[test]
    fn test_parse_sr_capability_sid_value_past_end() {
        let mut data = BytesMut::new();
        data.put_u16(0);
        data.put_uint(100, 3);
        data.put_u16(1161);
        data.put_u16(4);
        data.put_uint(16000, 3);
        assert!(matches!(
            parse_sr_capability(data.freeze()),
            Err(ParserError::TruncatedRecord { needed: 4, available: 3, .. })
        ));
    }

    #[test]
    fn test_parse_sr_local_block() {
        let mut data = BytesMut::new();
        data.put_u8(0);
        data.put_u8(0);
        data.put_uint(1000, 3);
        data.put_u16(1161);
        data.put_u16(3);
        data.put_uint(15000, 3);

        let srlb = parse_sr_local_block(data.freeze()).unwrap();
        assert_eq!(srlb.flags, 0);
        assert_eq!(
            srlb.ranges,
            vec![SidLabelRange {
                range_size: 1000,
                sid: SidLabel::Label(15000)
            }]
        );

        // header only: no ranges is still well formed
        let srlb = parse_sr_local_block(Bytes::from_static(&[0, 0])).unwrap();
        assert!(srlb.ranges.is_empty());
    }

    #[test]
    fn test_parse_sr_algorithm_and_srms_preference() {
        assert_eq!(
            parse_sr_algorithm(Bytes::from_static(&[0, 1, 128])).unwrap(),
            vec![0, 1, 128]
        );
        assert_eq!(parse_srms_preference(Bytes::from_static(&[5])).unwrap(), 5);
        assert!(parse_srms_preference(Bytes::from_static(&[5, 6])).is_err());
    }
}
