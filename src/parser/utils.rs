/*!
Provides the bounds-checked [Cursor] shared by every decoder, and the [ReadUtils] helpers for
reading big-endian integers, addresses and byte spans from it.
*/
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use bytes::{Buf, Bytes};

use crate::error::ParserError;

/// A read position over an owned byte buffer.
///
/// The cursor only moves forward. Every read is checked against the bytes left, and errors carry
/// the absolute offset of the failed read, including for sub-cursors created with
/// [Cursor::split_to].
#[derive(Debug, Clone)]
pub struct Cursor {
    data: Bytes,
    start: usize,
    consumed: usize,
}

impl Cursor {
    pub fn new(data: impl Into<Bytes>) -> Cursor {
        Cursor {
            data: data.into(),
            start: 0,
            consumed: 0,
        }
    }

    /// Absolute offset of the next unread byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.start + self.consumed
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The undecoded tail, without consuming it.
    #[inline]
    pub fn peek_remaining(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Split the next `n` bytes off into their own cursor and advance past them.
    pub fn split_to(&mut self, n: usize) -> Result<Cursor, ParserError> {
        self.has_n_remaining(n)?;
        Ok(self.split_unchecked(n))
    }

    fn split_unchecked(&mut self, n: usize) -> Cursor {
        let sub = Cursor {
            data: self.data.split_to(n),
            start: self.position(),
            consumed: 0,
        };
        self.consumed += n;
        sub
    }

    /// Check that a fixed header of `needed` bytes fits in what is left.
    pub fn require(&self, what: &'static str, needed: usize) -> Result<(), ParserError> {
        if self.remaining() < needed {
            return Err(ParserError::InsufficientData {
                what,
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Check that exactly one of the `accepted` lengths is left, returning it.
    pub fn expect_len(&self, what: &'static str, accepted: &[usize]) -> Result<usize, ParserError> {
        let length = self.remaining();
        if accepted.contains(&length) {
            Ok(length)
        } else {
            Err(ParserError::InvalidLength { what, length })
        }
    }

    /// Check that a record header of `needed` bytes fits in what is left.
    pub fn require_record(&self, what: &'static str, needed: usize) -> Result<(), ParserError> {
        if self.remaining() < needed {
            return Err(ParserError::TruncatedRecord {
                what,
                offset: self.position(),
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Split off the value of a record whose header started at `header_offset`.
    ///
    /// The cursor advances by the declared length, regardless of how much of the value the caller
    /// later decodes.
    pub fn record_value(
        &mut self,
        what: &'static str,
        header_offset: usize,
        length: usize,
    ) -> Result<Cursor, ParserError> {
        if self.remaining() < length {
            return Err(ParserError::TruncatedRecord {
                what,
                offset: header_offset,
                needed: length,
                available: self.remaining(),
            });
        }
        Ok(self.split_unchecked(length))
    }

    /// Read a 2-byte type, 2-byte length record (the BGP-LS layout).
    pub fn read_tlv_t16_l16(&mut self, what: &'static str) -> Result<(u16, Cursor), ParserError> {
        let header_offset = self.position();
        self.require_record(what, 4)?;
        let tlv_type = self.get_u16();
        let length = self.get_u16() as usize;
        let value = self.record_value(what, header_offset, length)?;
        Ok((tlv_type, value))
    }

    /// Read a 1-byte type, 2-byte length record (the BGP Prefix-SID layout).
    pub fn read_tlv_t8_l16(&mut self, what: &'static str) -> Result<(u8, Cursor), ParserError> {
        let header_offset = self.position();
        self.require_record(what, 3)?;
        let tlv_type = self.get_u8();
        let length = self.get_u16() as usize;
        let value = self.record_value(what, header_offset, length)?;
        Ok((tlv_type, value))
    }

    /// Read a 1-byte type, 1-byte length record (the SR Policy segment list layout).
    pub fn read_tlv_t8_l8(&mut self, what: &'static str) -> Result<(u8, Cursor), ParserError> {
        let header_offset = self.position();
        self.require_record(what, 2)?;
        let tlv_type = self.get_u8();
        let length = self.get_u8() as usize;
        let value = self.record_value(what, header_offset, length)?;
        Ok((tlv_type, value))
    }
}

impl From<Bytes> for Cursor {
    fn from(data: Bytes) -> Self {
        Cursor::new(data)
    }
}

impl From<Vec<u8>> for Cursor {
    fn from(data: Vec<u8>) -> Self {
        Cursor::new(data)
    }
}

impl Buf for Cursor {
    #[inline]
    fn remaining(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn chunk(&self) -> &[u8] {
        self.data.as_ref()
    }

    #[inline]
    fn advance(&mut self, cnt: usize) {
        self.data.advance(cnt);
        self.consumed += cnt;
    }
}

impl ReadUtils for Cursor {
    #[inline]
    fn offset(&self) -> usize {
        self.position()
    }
}

pub trait ReadUtils: Buf {
    /// Absolute offset used in error reports.
    fn offset(&self) -> usize;

    #[inline]
    fn has_n_remaining(&self, n: usize) -> Result<(), ParserError> {
        if self.remaining() < n {
            Err(ParserError::TruncatedInput {
                offset: self.offset(),
                needed: n,
                available: self.remaining(),
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, ParserError> {
        self.has_n_remaining(1)?;
        Ok(self.get_u8())
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, ParserError> {
        self.has_n_remaining(2)?;
        Ok(self.get_u16())
    }

    /// Read a 3-byte big-endian integer into the low 24 bits of a `u32`.
    #[inline]
    fn read_u24(&mut self) -> Result<u32, ParserError> {
        self.has_n_remaining(3)?;
        Ok(self.get_uint(3) as u32)
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, ParserError> {
        self.has_n_remaining(4)?;
        Ok(self.get_u32())
    }

    #[inline]
    fn read_u64(&mut self) -> Result<u64, ParserError> {
        self.has_n_remaining(8)?;
        Ok(self.get_u64())
    }

    #[inline]
    fn read_u128(&mut self) -> Result<u128, ParserError> {
        self.has_n_remaining(16)?;
        Ok(self.get_u128())
    }

    fn read_ipv4_address(&mut self) -> Result<Ipv4Addr, ParserError> {
        let addr = self.read_u32()?;
        Ok(Ipv4Addr::from(addr))
    }

    fn read_ipv6_address(&mut self) -> Result<Ipv6Addr, ParserError> {
        let addr = self.read_u128()?;
        Ok(Ipv6Addr::from(addr))
    }

    /// Read an IPv4 or IPv6 address, picked by the byte width the wire format implies.
    fn read_address_by_len(&mut self, what: &'static str, len: usize) -> Result<IpAddr, ParserError> {
        match len {
            4 => Ok(IpAddr::V4(self.read_ipv4_address()?)),
            16 => Ok(IpAddr::V6(self.read_ipv6_address()?)),
            length => Err(ParserError::InvalidLength { what, length }),
        }
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], ParserError> {
        self.has_n_remaining(N)?;
        let mut buf = [0u8; N];
        self.copy_to_slice(&mut buf);
        Ok(buf)
    }

    /// Copy out the next `n_bytes`; the result does not borrow the input buffer.
    fn read_n_bytes(&mut self, n_bytes: usize) -> Result<Vec<u8>, ParserError> {
        self.has_n_remaining(n_bytes)?;
        let mut buf = vec![0u8; n_bytes];
        self.copy_to_slice(&mut buf);
        Ok(buf)
    }

    fn read_remaining(&mut self) -> Vec<u8> {
        let mut buf = vec![0u8; self.remaining()];
        self.copy_to_slice(&mut buf);
        buf
    }

    fn read_n_bytes_to_string(&mut self, n_bytes: usize) -> Result<String, ParserError> {
        let buffer = self.read_n_bytes(n_bytes)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
