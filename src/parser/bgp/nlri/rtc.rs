//! Route Target Constraint NLRI parsing - RFC 4684 §4
//!
//! ```text
//! +-------------------------------+
//! | length (1 octet, in bits)     |
//! +-------------------------------+
//! | origin AS (4 octets)          |
//! +-------------------------------+
//! | route target (8 octets)       |
//! +-------------------------------+
//! ```
//!
//! Only the default route (0 bits), an origin AS alone (32 bits) and a full entry (96 bits) are
//! accepted. Prefixes of other lengths are legal in RFC 4684 but not supported here.

use bytes::{BufMut, Bytes, BytesMut};
use log::trace;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::{Cursor, ReadUtils};

/// Parse a buffer holding one or more RTC NLRIs back-to-back
///
/// With `add_path` set, every entry is prefixed by a 4-byte path identifier (RFC 7911).
pub fn parse_rtc_nlri_list(data: Bytes, add_path: bool) -> Result<Vec<RtcNlri>, ParserError> {
    trace!("RTC NLRI: {}", hex::encode(&data));
    let mut input = Cursor::new(data);
    let mut nlris = vec![];

    while !input.is_empty() {
        nlris.push(parse_rtc_nlri(&mut input, add_path)?);
    }

    Ok(nlris)
}

/// Parse a single RTC NLRI off the front of `input`.
pub fn parse_rtc_nlri(input: &mut Cursor, add_path: bool) -> Result<RtcNlri, ParserError> {
    let path_id = match add_path {
        true => Some(input.read_u32()?),
        false => None,
    };

    let length = input.read_u8()?;
    let (origin_as, route_target) = match length {
        0 => (None, None),
        32 => (Some(input.read_u32()?), None),
        96 => {
            let origin_as = input.read_u32()?;
            let [ec_type, sub_type, value @ ..] = input.read_array::<8>()?;
            let route_target = RouteTarget {
                ec_type,
                sub_type,
                value,
            };
            validate_route_target(&route_target)?;
            (Some(origin_as), Some(route_target))
        }
        _ => {
            return Err(ParserError::InvalidLength {
                what: "RTC NLRI",
                length: length as usize,
            })
        }
    };

    Ok(RtcNlri {
        path_id,
        length,
        origin_as,
        route_target,
    })
}

/// Check that an extended community is a Route Target.
///
/// The low 6 bits of the type must be 0x00 (two-octet AS), 0x01 (IPv4 address) or 0x02
/// (four-octet AS), and the sub-type must be 0x02.
pub fn validate_route_target(route_target: &RouteTarget) -> Result<(), ParserError> {
    let valid_type = matches!(route_target.ec_type & 0x3f, 0x00..=0x02);
    if !valid_type || route_target.sub_type != 0x02 {
        return Err(ParserError::InvalidRouteTarget {
            ec_type: route_target.ec_type,
            sub_type: route_target.sub_type,
        });
    }
    Ok(())
}

/// Encode one RTC NLRI
pub fn encode_rtc_nlri(nlri: &RtcNlri, add_path: bool) -> Bytes {
    let mut bytes = BytesMut::with_capacity(17);
    if add_path {
        bytes.put_u32(nlri.path_id.unwrap_or(0));
    }
    bytes.put_u8(nlri.length);
    if let Some(asn) = nlri.origin_as {
        bytes.put_u32(asn);
    }
    if let Some(rt) = &nlri.route_target {
        bytes.put_slice(&rt.to_bytes());
    }
    bytes.freeze()
}
