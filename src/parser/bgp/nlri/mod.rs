//! NLRI decoders for the Route Target Constraint, SR Policy and BGP-LS address families.

mod node_descriptor;
mod rtc;
mod sr_policy;
mod srv6_sid;
mod te_policy;

pub use node_descriptor::*;
pub use rtc::*;
pub use sr_policy::*;
pub use srv6_sid::*;
pub use te_policy::*;
