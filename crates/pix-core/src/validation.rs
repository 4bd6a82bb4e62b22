//! # Validation Module
//!
//! Field rules applied by `build()` before anything is encoded.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: EMVCo field rules (THIS MODULE)                              │
//! │  ├── merchant name ≤ 25 characters                                     │
//! │  ├── merchant city ≤ 15 characters                                     │
//! │  └── txid: 1-25 alphanumerics, or "***"                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: TLV encoding (tlv module)                                    │
//! │  └── every value ≤ 99 bytes, nested templates included                 │
//! │                                                                         │
//! │  Not checked: whether the Pix key exists or belongs to the merchant    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Character limits count Unicode scalar values; the TLV byte limit counts
//! UTF-8 bytes.
//!
//! ## Usage
//! ```rust
//! use pix_core::validation::{validate_merchant_city, validate_txid};
//!
//! assert!(validate_merchant_city("SAO PAULO").is_ok());
//! assert!(validate_txid("***").is_ok());
//! assert!(validate_txid("pedido-42").is_err());
//! ```

use crate::error::{PayloadError, PayloadResult};
use crate::types::{PayloadFields, Tag};
use crate::{MAX_MERCHANT_CITY_LEN, MAX_MERCHANT_NAME_LEN, MAX_TXID_LEN, TXID_NONE};

// =============================================================================
// String Validators
// =============================================================================

/// Validates the receiver's name.
///
/// ## Rules
/// - At most 25 characters
/// - Empty is accepted (the value is still emitted as `5900`)
pub fn validate_merchant_name(name: &str) -> PayloadResult<()> {
    check_char_limit(Tag::MerchantName, name, MAX_MERCHANT_NAME_LEN)
}

/// Validates the receiver's city.
///
/// ## Rules
/// - At most 15 characters
pub fn validate_merchant_city(city: &str) -> PayloadResult<()> {
    check_char_limit(Tag::MerchantCity, city, MAX_MERCHANT_CITY_LEN)
}

/// Validates the reconciliation id.
///
/// ## Rules
/// - `"***"` is always accepted (no reconciliation id)
/// - Otherwise 1 to 25 ASCII letters or digits
///
/// ```rust
/// use pix_core::validation::validate_txid;
///
/// assert!(validate_txid("PEDIDO42").is_ok());
/// assert!(validate_txid("").is_err());
/// assert!(validate_txid(&"A".repeat(26)).is_err());
/// ```
pub fn validate_txid(txid: &str) -> PayloadResult<()> {
    if txid == TXID_NONE {
        return Ok(());
    }

    if txid.is_empty() {
        return Err(PayloadError::InvalidFormat {
            field: Tag::Txid,
            reason: format!("must not be empty, use \"{TXID_NONE}\" for none"),
        });
    }

    check_char_limit(Tag::Txid, txid, MAX_TXID_LEN)?;

    if !txid.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PayloadError::InvalidFormat {
            field: Tag::Txid,
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(())
}

/// Runs every field rule over a complete field set.
pub fn validate_fields(fields: &PayloadFields) -> PayloadResult<()> {
    validate_merchant_name(&fields.merchant_name)?;
    validate_merchant_city(&fields.merchant_city)?;
    validate_txid(&fields.txid)?;
    Ok(())
}

fn check_char_limit(field: Tag, value: &str, max: usize) -> PayloadResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(PayloadError::FieldTooLong { field, len, max });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
