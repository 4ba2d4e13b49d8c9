/*!
bgpkit-srte decodes the BGP and BGP-LS extensions used for segment routing and traffic
engineering: the PMSI Tunnel attribute, Route Target Constraint NLRI, BGP-LS SR-MPLS and SRv6
TLVs, the BGP Prefix-SID attribute, SR Policy NLRI and tunnel TLVs, and TE Policy NLRI.

The crate does not read BGP messages itself. Each decoder takes the raw bytes of one attribute,
TLV or NLRI that a BGP message parser has already cut out, and returns an owned model.

# Examples

## Route Target Constraint NLRI

```
use bgpkit_srte::parse_rtc_nlri_list;
use bytes::Bytes;

// length 32 bits, origin AS 65000
let nlris = parse_rtc_nlri_list(Bytes::from_static(&[0x20, 0x00, 0x00, 0xfd, 0xe8]), false).unwrap();
assert_eq!(nlris[0].origin_as, Some(65000));
assert!(nlris[0].route_target.is_none());
```

## SR Policy NLRI

```
use bgpkit_srte::parse_sr_policy_nlri;
use bytes::Bytes;
use std::net::{IpAddr, Ipv4Addr};

let nlri = parse_sr_policy_nlri(Bytes::from_static(&[
    96, 0, 0, 0, 1, 0, 0, 0, 100, 192, 0, 2, 1,
]))
.unwrap();
assert_eq!(nlri.color, 100);
assert_eq!(nlri.endpoint, IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
```

## Errors

Decoding is all-or-nothing. A malformed buffer yields a [ParserError] describing what failed and
where; no partially decoded value is returned.

```
use bgpkit_srte::{parse_rtc_nlri_list, ParserError};
use bytes::Bytes;

let err = parse_rtc_nlri_list(Bytes::from_static(&[0x18, 0, 0, 0]), false).unwrap_err();
assert_eq!(err, ParserError::InvalidLength { what: "RTC NLRI", length: 24 });
```

# Logging

Decoders log through the [log] facade: raw input as hex at `trace` level on entry, and records
that are skipped or kept undecoded at `debug` level. Install any logger to see them.

# Features

- `serde`: derive `Serialize` and `Deserialize` for the model types
*/

pub mod error;
pub mod models;
pub mod parser;

pub use error::ParserError;
pub use parser::*;
