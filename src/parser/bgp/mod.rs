/*!
Provides parsing of BGP path attributes and NLRI.
*/
pub mod attributes;
pub mod nlri;

pub use attributes::*;
pub use nlri::*;
