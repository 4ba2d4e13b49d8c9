//! BGP path attributes and BGP-LS attribute TLVs, one file per attribute type code.

mod attr_22_pmsi_tunnel;
mod attr_23_sr_policy;
mod attr_29_linkstate;
mod attr_29_linkstate_sr;
mod attr_29_linkstate_srv6;
mod attr_40_prefix_sid;

pub use attr_22_pmsi_tunnel::*;
pub use attr_23_sr_policy::*;
pub use attr_29_linkstate::*;
pub use attr_29_linkstate_sr::*;
pub use attr_29_linkstate_srv6::*;
pub use attr_40_prefix_sid::*;
