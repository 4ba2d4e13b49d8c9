/*!
error module defines the error types used in bgpkit-srte.
*/
use num_enum::{TryFromPrimitive, TryFromPrimitiveError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// A cursor read needed more bytes than the buffer had left.
    ///
    /// ## Occurs during:
    ///  - Any fixed-width field read (integers, addresses, byte spans)
    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// The buffer handed to a fixed-header decoder is shorter than the header itself.
    ///
    /// ## Occurs during:
    ///  - PMSI Tunnel, SID TLVs, SRv6 fixed TLVs
    #[error("insufficient data for {what}: need at least {needed} bytes, got {available}")]
    InsufficientData {
        what: &'static str,
        needed: usize,
        available: usize,
    },
    /// A record header, or the value its length field announces, does not fit in what is left.
    ///
    /// ## Occurs during:
    ///  - Walking any TLV or sub-TLV list
    #[error("truncated {what} record at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedRecord {
        what: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A length field, or the length of a fixed-size value, is outside the legal set.
    #[error("invalid length {length} for {what}")]
    InvalidLength { what: &'static str, length: usize },
    /// This error represents a [num_enum::TryFromPrimitiveError] error for any of a number of
    /// different types.
    ///
    /// ## Occurs during:
    ///  - TE Policy protocol-id check
    ///  - SR Policy segment type dispatch
    #[error("unrecognized value {value} for {type_name}")]
    InvalidEnumValue { type_name: &'static str, value: u64 },
    /// A sub-TLV type that a strict decoder does not know.
    #[error("unknown {what} type {tlv_type}")]
    UnknownType { what: &'static str, tlv_type: u16 },
    /// A sub-record that may appear once per container appeared again.
    #[error("duplicate {what} (type {field_type})")]
    DuplicateField { what: &'static str, field_type: u16 },
    /// Route Target extended community that RFC 4684 does not allow in an RTC NLRI.
    #[error("invalid route target: type {ec_type:#04x}, sub-type {sub_type:#04x}")]
    InvalidRouteTarget { ec_type: u8, sub_type: u8 },
    #[error("missing mandatory {what} TLV {tlv_type}")]
    MissingMandatoryTlv { what: &'static str, tlv_type: u16 },
}

impl<T> From<TryFromPrimitiveError<T>> for ParserError
where
    T: TryFromPrimitive,
    T::Primitive: Into<u64>,
{
    #[inline]
    fn from(value: TryFromPrimitiveError<T>) -> Self {
        ParserError::InvalidEnumValue {
            type_name: T::NAME,
            value: value.number.into(),
        }
    }
}
