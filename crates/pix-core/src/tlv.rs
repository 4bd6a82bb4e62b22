//! # TLV Codec
//!
//! The EMV "ID / length / value" rule and the CRC-16 that seals a payload.
//!
//! ## Element Layout
//! ```text
//! ┌──────┬──────┬──────────────────────────┐
//! │  ID  │ LEN  │ VALUE                    │
//! │ "59" │ "13" │ "Fulano de Tal"          │
//! └──────┴──────┴──────────────────────────┘
//!   2 digits, zero-padded decimal byte count, then the raw UTF-8 bytes
//! ```
//!
//! The 2-digit length caps a value at 99 bytes. Longer values are rejected
//! with [`PayloadError::FieldTooLong`] instead of producing a malformed
//! element.
//!
//! ## Checksum
//! CRC-16/CCITT-FALSE: polynomial `0x1021`, initial value `0xFFFF`, MSB first,
//! no reflection, no final XOR. XMODEM and CCITT-TRUE differ only in the
//! initial value or bit order and produce different results.
//!
//! ```rust
//! use pix_core::tlv::{crc16, encode};
//! use pix_core::Tag;
//!
//! assert_eq!(encode(Tag::CountryCode, "BR").unwrap(), "5802BR");
//! assert_eq!(crc16(b"123456789"), "29B1");
//! ```

use crate::error::{DecodeError, PayloadError, PayloadResult};
use crate::types::Tag;
use crate::MAX_TLV_VALUE_LEN;

/// CRC-16/CCITT-FALSE generator polynomial.
pub const CRC16_POLYNOMIAL: u32 = 0x1021;

/// Initial register value.
pub const CRC16_INIT: u32 = 0xFFFF;

/// Tag `63` header. The checksum covers the payload body followed by these
/// four characters.
pub const CHECKSUM_HEADER: &str = "6304";

/// Hex digits in the rendered checksum.
pub const CHECKSUM_LEN: usize = 4;

// =============================================================================
// Encoding
// =============================================================================

/// Encodes a single element.
///
/// ```rust
/// use pix_core::tlv::encode;
/// use pix_core::Tag;
///
/// assert_eq!(encode(Tag::MerchantName, "São João").unwrap(), "5910São João");
/// assert!(encode(Tag::Description, &"x".repeat(100)).is_err());
/// ```
pub fn encode(tag: Tag, value: &str) -> PayloadResult<String> {
    let mut out = String::with_capacity(4 + value.len());
    push(&mut out, tag, value)?;
    Ok(out)
}

/// Appends an element to `out`, leaving `out` untouched on error.
pub fn push(out: &mut String, tag: Tag, value: &str) -> PayloadResult<()> {
    let len = value.len();
    if len > MAX_TLV_VALUE_LEN {
        return Err(PayloadError::FieldTooLong {
            field: tag,
            len,
            max: MAX_TLV_VALUE_LEN,
        });
    }

    out.push_str(tag.id());
    out.push_str(&format!("{len:02}"));
    out.push_str(value);
    Ok(())
}

// =============================================================================
// Checksum
// =============================================================================

/// Raw CRC-16/CCITT-FALSE register after consuming `data`.
pub fn checksum(data: &[u8]) -> u16 {
    let mut register = CRC16_INIT;

    for &byte in data {
        register ^= u32::from(byte) << 8;
        for _ in 0..8 {
            register <<= 1;
            if register & 0x10000 != 0 {
                register ^= CRC16_POLYNOMIAL;
            }
            register &= 0xFFFF;
        }
    }

    register as u16
}

/// Checksum rendered as 4 uppercase hex digits, zero-padded.
pub fn crc16(data: &[u8]) -> String {
    format!("{:04X}", checksum(data))
}

// =============================================================================
// Parsing
// =============================================================================

/// One element read back from a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvElement {
    pub id: String,
    pub value: String,
}

impl TlvElement {
    /// Parses the value as a nested template (tags `26` and `62`).
    pub fn children(&self) -> Result<Vec<TlvElement>, DecodeError> {
        parse(&self.value)
    }

    /// True when this element carries `tag`'s id.
    pub fn is(&self, tag: Tag) -> bool {
        self.id == tag.id()
    }
}

/// Splits a string into consecutive elements.
///
/// ```rust
/// use pix_core::tlv::parse;
///
/// let elements = parse("0002015802BR").unwrap();
/// assert_eq!(elements.len(), 2);
/// assert_eq!(elements[1].id, "58");
/// assert_eq!(elements[1].value, "BR");
/// ```
pub fn parse(input: &str) -> Result<Vec<TlvElement>, DecodeError> {
    let bytes = input.as_bytes();
    let mut elements = Vec::new();
    let mut offset = 0;

    while offset < bytes.len() {
        let header = bytes
            .get(offset..offset + 4)
            .ok_or(DecodeError::Truncated {
                offset,
                needed: 4,
                available: bytes.len() - offset,
            })?;
        let (id, len_digits) = header.split_at(2);

        if !id.iter().all(u8::is_ascii_digit) {
            return Err(DecodeError::InvalidTagId {
                offset,
                found: String::from_utf8_lossy(id).into_owned(),
            });
        }
        if !len_digits.iter().all(u8::is_ascii_digit) {
            return Err(DecodeError::InvalidLength {
                offset: offset + 2,
                found: String::from_utf8_lossy(len_digits).into_owned(),
            });
        }

        let len = usize::from(len_digits[0] - b'0') * 10 + usize::from(len_digits[1] - b'0');
        let start = offset + 4;
        let end = start + len;

        if end > bytes.len() {
            return Err(DecodeError::Truncated {
                offset,
                needed: len,
                available: bytes.len() - start,
            });
        }

        let value = input
            .get(start..end)
            .ok_or(DecodeError::InvalidUtf8 { offset: start })?;

        elements.push(TlvElement {
            id: id.iter().map(|&b| char::from(b)).collect(),
            value: value.to_string(),
        });
        offset = end;
    }

    Ok(elements)
}

/// First element carrying `tag`'s id.
pub fn find(elements: &[TlvElement], tag: Tag) -> Option<&TlvElement> {
    elements.iter().find(|e| e.is(tag))
}

// =============================================================================
// Unit Tests
// =============================================================================
