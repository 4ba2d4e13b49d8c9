/*!
Decoders for BGP and BGP-LS extension payloads.

Every decoder takes the raw value of one attribute, TLV or NLRI, already cut out of a BGP UPDATE,
and returns the decoded model or a [ParserError]. Decoders keep no state between calls.
*/
pub mod bgp;
pub mod utils;

pub use self::utils::*;
pub use bgp::*;

pub use crate::error::ParserError;
