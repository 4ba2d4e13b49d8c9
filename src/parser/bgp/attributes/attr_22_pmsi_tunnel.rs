//! PMSI Tunnel attribute parsing - RFC 6514 §5
//!
//! ```text
//! +---------------------------------+
//! |  Flags (1 octet)                |
//! +---------------------------------+
//! |  Tunnel Type (1 octet)          |
//! +---------------------------------+
//! |  MPLS Label (3 octets)          |
//! +---------------------------------+
//! |  Tunnel Identifier (variable)   |
//! +---------------------------------+
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use log::trace;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{Cursor, ReadUtils};

const PMSI_HEADER_LEN: usize = 5;

/// Parse BGP PMSI Tunnel attribute (type 22)
///
/// The label field is always present on the wire, whether or not the L flag is set. Everything
/// after it is the tunnel identifier, which may be empty.
pub fn parse_pmsi_tunnel(data: Bytes) -> Result<PmsiTunnel, ParserError> {
    trace!("PMSI tunnel attribute: {}", hex::encode(&data));
    let mut input = Cursor::new(data);
    input.require("PMSI Tunnel attribute", PMSI_HEADER_LEN)?;

    let flags = PmsiFlags::from_bits_retain(input.read_u8()?);
    let tunnel_type = PmsiTunnelType::from(input.read_u8()?);
    let mpls_label = decode_mpls_label(input.read_array::<3>()?);
    let tunnel_identifier = input.read_remaining();

    Ok(PmsiTunnel {
        flags,
        tunnel_type,
        mpls_label,
        tunnel_identifier,
    })
}

/// Extract the 20-bit label from a 3-byte label field.
///
/// The label sits in the high-order 20 bits; the low 4 bits (EXP and S) are dropped.
#[inline]
pub fn decode_mpls_label(field: [u8; 3]) -> u32 {
    ((field[0] as u32) << 12) | ((field[1] as u32) << 4) | ((field[2] as u32) >> 4)
}

/// Encode BGP PMSI Tunnel attribute value
pub fn encode_pmsi_tunnel(pmsi: &PmsiTunnel) -> Bytes {
    let mut bytes = BytesMut::with_capacity(PMSI_HEADER_LEN + pmsi.tunnel_identifier.len());
    bytes.put_u8(pmsi.flags.bits());
    bytes.put_u8(u8::from(pmsi.tunnel_type));
    bytes.put_uint(((pmsi.mpls_label & 0x000f_ffff) << 4) as u64, 3);
    bytes.extend_from_slice(&pmsi.tunnel_identifier);
    bytes.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_parse_pmsi_tunnel_label_bits() {
        // label 12345 in the top 20 bits, S bit set: 12345 << 4 | 1 = 0x030391
        let data = Bytes::from(vec![0x01, 0x01, 0x03, 0x03, 0x91, 0x01, 0x02, 0x03, 0x04]);
        let pmsi = parse_pmsi_tunnel(data).unwrap();

        assert!(pmsi.leaf_information_required());
        assert_eq!(pmsi.tunnel_type, PmsiTunnelType::RsvpTeP2mpLsp);
        assert_eq!(pmsi.mpls_label, 12345);
        assert_eq!(pmsi.tunnel_identifier, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_decode_mpls_label_drops_low_nibble() {
        assert_eq!(decode_mpls_label([0x30, 0x39, 0x00]), 0x30390);
        assert_eq!(decode_mpls_label([0x30, 0x39, 0x0f]), 0x30390);
        assert_eq!(decode_mpls_label([0xff, 0xff, 0xff]), 0x000f_ffff);
        assert_eq!(decode_mpls_label([0x00, 0x00, 0x10]), 1);
    }

    #[test]
    fn test_parse_pmsi_tunnel_label_field_high_bits() {
        // label field 0x303900 carries 0x30390 in its top 20 bits
        let data = Bytes::from_static(&[0x00, 0x00, 0x30, 0x39, 0x00]);
        let pmsi = parse_pmsi_tunnel(data).unwrap();

        assert_eq!(pmsi.tunnel_type, PmsiTunnelType::NoTunnelInformation);
        assert_eq!(pmsi.mpls_label, 197520);
        assert!(pmsi.tunnel_identifier.is_empty());
    }

    #[test]
    fn test_parse_pmsi_tunnel_ingress_replication() {
        let mut data = BytesMut::new();
        data.put_u8(0x00);
        data.put_u8(6);
        data.put_uint(100 << 4, 3);
        data.put_slice(&[192, 0, 2, 1]);

        let pmsi = parse_pmsi_tunnel(data.freeze()).unwrap();
        assert!(!pmsi.leaf_information_required());
        assert_eq!(pmsi.tunnel_type, PmsiTunnelType::IngressReplication);
        assert_eq!(pmsi.mpls_label, 100);
        assert_eq!(
            pmsi.ingress_replication_endpoint(),
            Some(IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)))
        );
    }

    #[test]
    fn test_parse_pmsi_tunnel_without_identifier() {
        let pmsi = parse_pmsi_tunnel(Bytes::from_static(&[0x00, 0x00, 0x00, 0x00, 0x00])).unwrap();
        assert_eq!(pmsi.tunnel_type, PmsiTunnelType::NoTunnelInformation);
        assert!(pmsi.tunnel_identifier.is_empty());
        assert_eq!(pmsi.ingress_replication_endpoint(), None);
    }

    #[test]
    fn test_parse_pmsi_tunnel_unknown_type() {
        let pmsi = parse_pmsi_tunnel(Bytes::from_static(&[0x00, 0x42, 0x00, 0x00, 0x00])).unwrap();
        assert_eq!(pmsi.tunnel_type, PmsiTunnelType::Unknown(0x42));
    }

    #[test]
    fn test_parse_pmsi_tunnel_too_short() {
        let result = parse_pmsi_tunnel(Bytes::from_static(&[0x01, 0x01, 0x30, 0x39]));
        assert_eq!(
            result,
            Err(ParserError::InsufficientData {
                what: "PMSI Tunnel attribute",
                needed: 5,
                available: 4
            })
        );
    }

    #[test]
    fn test_encode_pmsi_tunnel() {
        let pmsi = PmsiTunnel {
            flags: PmsiFlags::LEAF_INFORMATION_REQUIRED,
            tunnel_type: PmsiTunnelType::MldpP2mpLsp,
            mpls_label: 12345,
            tunnel_identifier: vec![0xaa, 0xbb],
        };
        let encoded = encode_pmsi_tunnel(&pmsi);
        assert_eq!(
            encoded.as_ref(),
            &[0x01, 0x02, 0x03, 0x03, 0x90, 0xaa, 0xbb]
        );
        assert_eq!(parse_pmsi_tunnel(encoded).unwrap(), pmsi);
    }
}
