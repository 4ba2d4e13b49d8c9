//! SR Policy NLRI parsing (SAFI 73) - RFC 9256 §2.1

use bytes::{BufMut, Bytes, BytesMut};
use log::trace;
use std::net::IpAddr;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{Cursor, ReadUtils};

/// length(1) + distinguisher(4) + color(4) + smallest endpoint(4)
const MIN_SR_POLICY_NLRI_LEN: usize = 13;

/// Parse an SR Policy NLRI
///
/// The endpoint is an IPv4 or IPv6 address depending on how many bytes follow the color, and the
/// leading length (in bits) must agree with it.
pub fn parse_sr_policy_nlri(data: Bytes) -> Result<SrPolicyNlri, ParserError> {
    trace!("SR Policy NLRI: {}", hex::encode(&data));
    let mut input = Cursor::new(data);
    input.require("SR Policy NLRI", MIN_SR_POLICY_NLRI_LEN)?;

    let length_bits = input.read_u8()?;
    let distinguisher = input.read_u32()?;
    let color = input.read_u32()?;

    let endpoint_len = input.expect_len("SR Policy NLRI endpoint", &[4, 16])?;
    if length_bits as usize != (8 + endpoint_len) * 8 {
        return Err(ParserError::InvalidLength {
            what: "SR Policy NLRI",
            length: length_bits as usize,
        });
    }
    let endpoint = input.read_address_by_len("SR Policy NLRI endpoint", endpoint_len)?;

    Ok(SrPolicyNlri {
        length: length_bits / 8,
        distinguisher,
        color,
        endpoint,
    })
}

/// Encode an SR Policy NLRI; the length field is derived from the endpoint family.
pub fn encode_sr_policy_nlri(nlri: &SrPolicyNlri) -> Bytes {
    let mut bytes = BytesMut::with_capacity(25);
    let endpoint_len = match nlri.endpoint {
        IpAddr::V4(_) => 4,
        IpAddr::V6(_) => 16,
    };
    bytes.put_u8(((8 + endpoint_len) * 8) as u8);
    bytes.put_u32(nlri.distinguisher);
    bytes.put_u32(nlri.color);
    match nlri.endpoint {
        IpAddr::V4(addr) => bytes.put_slice(&addr.octets()),
        IpAddr::V6(addr) => bytes.put_slice(&addr.octets()),
    }
    bytes.freeze()
}
