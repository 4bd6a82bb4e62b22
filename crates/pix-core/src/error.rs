//! # Error Types
//!
//! Domain-specific error types for pix-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pix-core errors (this file)                                           │
//! │  ├── PayloadError  - Building a payload from field values failed       │
//! │  ├── DecodeError   - Reading an existing payload string failed         │
//! │  └── PixError      - Either of the above                               │
//! │                                                                         │
//! │  pix-cli errors (separate crate)                                       │
//! │  └── CliError      - Config, I/O and output failures                   │
//! │                                                                         │
//! │  Flow: PayloadError / DecodeError → PixError → CliError → stderr       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Name the offending field via [`Tag`], never a free-form string
//! 3. Errors are atomic: a failed build never exposes a partial payload

use thiserror::Error;

use crate::types::Tag;

// =============================================================================
// Payload Error
// =============================================================================

/// Failures detected while turning field values into a payload.
///
/// Every variant is raised synchronously by `build()`. Retrying with the same
/// input yields the same error, so callers should fix the input instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    /// A required field was never set on the builder.
    ///
    /// ## When This Occurs
    /// - `pix_key`, `merchant_name`, `merchant_city`, `txid` or `amount`
    ///   left unset before calling `build()`
    ///
    /// An explicitly set empty string is *not* missing.
    #[error("{field} is required")]
    MissingField { field: Tag },

    /// A value does not fit its length limit.
    ///
    /// ## When This Occurs
    /// - Any TLV value longer than 99 bytes (the 2-digit length prefix)
    /// - Merchant name over 25 characters, city over 15, txid over 25
    #[error("{field} is too long: {len} exceeds the limit of {max}")]
    FieldTooLong { field: Tag, len: usize, max: usize },

    /// The transaction amount could not be normalized.
    ///
    /// ## When This Occurs
    /// - Non-numeric text (`"abc"`, `"1,000.00"`)
    /// - Negative, NaN or infinite values
    /// - Values beyond the representable centavo range
    #[error("Invalid amount '{input}': {reason}")]
    InvalidAmount { input: String, reason: String },

    /// A value has the right length but the wrong shape.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: Tag, reason: String },
}

// =============================================================================
// Decode Error
// =============================================================================

/// Failures while parsing or verifying an existing payload string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Fewer bytes remain than the element header announced.
    #[error("Truncated element at byte {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The two id characters are not ASCII digits.
    #[error("Invalid tag id '{found}' at byte {offset}")]
    InvalidTagId { offset: usize, found: String },

    /// The two length characters are not ASCII digits.
    #[error("Invalid length '{found}' at byte {offset}")]
    InvalidLength { offset: usize, found: String },

    /// A value boundary falls inside a multi-byte UTF-8 character.
    #[error("Value at byte {offset} does not end on a character boundary")]
    InvalidUtf8 { offset: usize },

    /// The string does not end with a `6304XXXX` checksum element.
    #[error("Payload has no CRC16 element")]
    MissingChecksum,

    /// The trailing checksum does not match the payload body.
    #[error("CRC16 mismatch: expected {expected}, found {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    /// A mandatory element is absent.
    #[error("Missing element {tag}")]
    MissingTag { tag: Tag },

    /// A fixed-value element carries something else.
    #[error("Element {tag} must be '{expected}', found '{found}'")]
    UnexpectedValue {
        tag: Tag,
        expected: &'static str,
        found: String,
    },
}

// =============================================================================
// Crate Error
// =============================================================================

/// Any pix-core failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixError {
    /// Building failed (wraps PayloadError).
    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    /// Decoding failed (wraps DecodeError).
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result of building or validating a payload.
pub type PayloadResult<T> = Result<T, PayloadError>;

/// Result of any pix-core operation.
pub type PixResult<T> = Result<T, PixError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error_messages() {
        let err = PayloadError::MissingField {
            field: Tag::PixKey,
        };
        assert_eq!(err.to_string(), "pix_key is required");

        let err = PayloadError::FieldTooLong {
            field: Tag::MerchantCity,
            len: 16,
            max: 15,
        };
        assert_eq!(
            err.to_string(),
            "merchant_city is too long: 16 exceeds the limit of 15"
        );
    }

    #[test]
    fn test_decode_error_messages() {
        let err = DecodeError::ChecksumMismatch {
            expected: "1A35".to_string(),
            actual: "0000".to_string(),
        };
        assert_eq!(err.to_string(), "CRC16 mismatch: expected 1A35, found 0000");

        let err = DecodeError::MissingTag { tag: Tag::Txid };
        assert_eq!(err.to_string(), "Missing element txid");
    }

    #[test]
    fn test_errors_convert_to_pix_error() {
        let err: PixError = PayloadError::MissingField { field: Tag::Txid }.into();
        assert!(matches!(err, PixError::Payload(_)));

        let err: PixError = DecodeError::MissingChecksum.into();
        assert!(matches!(err, PixError::Decode(DecodeError::MissingChecksum)));
    }
}
