//! Route Target Constraint NLRI (RFC 4684)

use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

/// Route Target extended community carried in a full-length RTC NLRI.
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
///  |  Type high    |  Sub-type     |                               |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+                               |
///  |                             Value                             |
///  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteTarget {
    pub ec_type: u8,
    pub sub_type: u8,
    pub value: [u8; 6],
}

/// Administrator fields of a Route Target, split according to its type.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum RouteTargetAdmin {
    TwoOctetAs { asn: u16, local_admin: u32 },
    Ipv4Addr { addr: Ipv4Addr, local_admin: u16 },
    FourOctetAs { asn: u32, local_admin: u16 },
}

impl RouteTarget {
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0] = self.ec_type;
        bytes[1] = self.sub_type;
        bytes[2..].copy_from_slice(&self.value);
        bytes
    }

    /// Only meaningful on a validated Route Target: the low 6 bits of the type pick the layout.
    pub fn admin(&self) -> RouteTargetAdmin {
        let v = &self.value;
        match self.ec_type & 0x3f {
            0x01 => RouteTargetAdmin::Ipv4Addr {
                addr: Ipv4Addr::new(v[0], v[1], v[2], v[3]),
                local_admin: u16::from_be_bytes([v[4], v[5]]),
            },
            0x02 => RouteTargetAdmin::FourOctetAs {
                asn: u32::from_be_bytes([v[0], v[1], v[2], v[3]]),
                local_admin: u16::from_be_bytes([v[4], v[5]]),
            },
            _ => RouteTargetAdmin::TwoOctetAs {
                asn: u16::from_be_bytes([v[0], v[1]]),
                local_admin: u32::from_be_bytes([v[2], v[3], v[4], v[5]]),
            },
        }
    }
}

impl Display for RouteTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.admin() {
            RouteTargetAdmin::TwoOctetAs { asn, local_admin } => {
                write!(f, "rt:{}:{}", asn, local_admin)
            }
            RouteTargetAdmin::Ipv4Addr { addr, local_admin } => {
                write!(f, "rt:{}:{}", addr, local_admin)
            }
            RouteTargetAdmin::FourOctetAs { asn, local_admin } => {
                write!(f, "rt:{}:{}", asn, local_admin)
            }
        }
    }
}

/// One RTC NLRI entry.
///
/// `length` is the prefix length in bits as carried on the wire: 0 is the default (wildcard)
/// route, 32 carries only the Origin AS, 96 carries the Origin AS and a Route Target.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RtcNlri {
    pub path_id: Option<u32>,
    pub length: u8,
    pub origin_as: Option<u32>,
    pub route_target: Option<RouteTarget>,
}

impl RtcNlri {
    pub fn is_default(&self) -> bool {
        self.length == 0
    }
}
