//! SRv6 SID NLRI parsing - RFC 9514 §6

use bytes::Bytes;
use log::trace;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::nlri::read_node_descriptor_tlv;
use crate::parser::{Cursor, ReadUtils};

const MULTI_TOPOLOGY_ID: u16 = 263;
const SRV6_SID_INFORMATION: u16 = 518;

/// Parse an SRv6 SID NLRI: Protocol-ID(1) Identifier(8) Local Node Descriptors TLV, then the
/// SRv6 SID descriptors
pub fn parse_srv6_sid_nlri(data: Bytes) -> Result<Srv6SidNlri, ParserError> {
    trace!("SRv6 SID NLRI: {}", hex::encode(&data));
    let mut input = Cursor::new(data);
    input.require("SRv6 SID NLRI", 9)?;

    let protocol_id = ProtocolId::try_from(input.read_u8()?)?;
    let identifier = input.read_u64()?;
    let (local_node, _) =
        read_node_descriptor_tlv(&mut input, NodeDescriptorType::LocalNodeDescriptors)?;
    let descriptors = parse_srv6_sid_descriptors(input)?;

    Ok(Srv6SidNlri {
        protocol_id,
        identifier,
        local_node,
        descriptors,
    })
}

/// Parse the SRv6 SID descriptor TLVs
///
/// Only Multi-Topology ID (263) and SRv6 SID Information (518) may appear; any other type fails
/// the NLRI.
pub fn parse_srv6_sid_descriptors(
    data: impl Into<Cursor>,
) -> Result<Srv6SidDescriptors, ParserError> {
    let mut input = data.into();
    let mut descriptors = Srv6SidDescriptors::default();

    while !input.is_empty() {
        let (tlv_type, mut value) = input.read_tlv_t16_l16("SRv6 SID descriptor TLV")?;
        match tlv_type {
            MULTI_TOPOLOGY_ID => {
                if descriptors.multi_topology_id.is_some() {
                    return Err(ParserError::DuplicateField {
                        what: "SRv6 SID descriptor TLV",
                        field_type: tlv_type,
                    });
                }
                value.expect_len("Multi-Topology ID TLV", &[2])?;
                descriptors.multi_topology_id = Some(value.read_u16()? & 0x0fff);
            }
            SRV6_SID_INFORMATION => {
                value.expect_len("SRv6 SID Information TLV", &[16])?;
                descriptors.sids.push(value.read_ipv6_address()?);
            }
            _ => {
                return Err(ParserError::UnknownType {
                    what: "SRv6 SID descriptor TLV",
                    tlv_type,
                })
            }
        }
    }

    Ok(descriptors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};
    use std::net::Ipv6Addr;

    fn put_tlv(data: &mut BytesMut, tlv_type: u16, value: &[u8]) {
        data.put_u16(tlv_type);
        data.put_u16(value.len() as u16);
        data.put_slice(value);
    }

    const SID: Ipv6Addr = Ipv6Addr::new(0xfc00, 0, 0, 1, 0x40, 0, 0, 0);

    #[test]
    fn test_parse_srv6_sid_descriptors() {
        let mut data = BytesMut::new();
        put_tlv(&mut data, 263, &[0x80, 0x02]);
        put_tlv(&mut data, 518, &SID.octets());

        let descriptors = parse_srv6_sid_descriptors(data.freeze()).unwrap();
        assert_eq!(descriptors.multi_topology_id, Some(2));
        assert_eq!(descriptors.sids, vec![SID]);
    }

    #[test]
    fn test_unknown_descriptor_type_is_an_error() {
        let mut data = BytesMut::new();
        put_tlv(&mut data, 518, &SID.octets());
        put_tlv(&mut data, 519, &[0]);

        assert_eq!(
            parse_srv6_sid_descriptors(data.freeze()),
            Err(ParserError::UnknownType {
                what: "SRv6 SID descriptor TLV",
                tlv_type: 519
            })
        );
    }

    #[test]
    fn test_sid_information_length() {
        let mut data = BytesMut::new();
        put_tlv(&mut data, 518, &[0; 8]);
        assert_eq!(
            parse_srv6_sid_descriptors(data.freeze()),
            Err(ParserError::InvalidLength {
                what: "SRv6 SID Information TLV",
                length: 8
            })
        );
    }

    #[test]
    fn test_parse_srv6_sid_nlri() {
        let mut node = BytesMut::new();
        put_tlv(&mut node, 512, &65001u32.to_be_bytes());
        put_tlv(&mut node, 515, &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

        let mut data = BytesMut::new();
        data.put_u8(2);
        data.put_u64(0);
        put_tlv(&mut data, 256, &node);
        put_tlv(&mut data, 518, &SID.octets());

        let nlri = parse_srv6_sid_nlri(data.freeze()).unwrap();
        assert_eq!(nlri.protocol_id, ProtocolId::IsisL2);
        assert_eq!(nlri.local_node.autonomous_system, Some(65001));
        assert_eq!(nlri.descriptors.sids, vec![SID]);
        assert_eq!(nlri.descriptors.multi_topology_id, None);
    }
}
