//! BGP and BGP-LS extension structs.

pub mod linkstate;
pub mod pmsi;
pub mod prefix_sid;
pub mod rtc;
pub mod sr;
pub mod sr_policy;
pub mod srv6;
pub mod te_policy;

pub use linkstate::*;
pub use pmsi::*;
pub use prefix_sid::*;
pub use rtc::*;
pub use sr::*;
pub use sr_policy::*;
pub use srv6::*;
pub use te_policy::*;
