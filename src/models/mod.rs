/*!
Data structures produced by the decoders.

Every struct here is a plain owned value: it holds no reference into the buffer it was decoded
from and can be sent across threads freely.
*/
pub mod bgp;

pub use bgp::*;
