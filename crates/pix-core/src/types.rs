//! # Domain Types
//!
//! The EMV tag table and the field set a payload is built from.
//!
//! ## Tag Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Pix Payload Elements                              │
//! │                                                                         │
//! │  00 Payload Format Indicator        "01"                                │
//! │  26 Merchant Account Information ─┬─ 00 GUI          "br.gov.bcb.pix"   │
//! │                                   ├─ 01 Pix key                         │
//! │                                   └─ 02 Description                     │
//! │  52 Merchant Category Code          "0000"                              │
//! │  53 Transaction Currency            "986" (BRL)                         │
//! │  54 Transaction Amount              "10.50"                             │
//! │  58 Country Code                    "BR"                                │
//! │  59 Merchant Name                                                       │
//! │  60 Merchant City                                                       │
//! │  62 Additional Data Field Template ─── 05 TXID                          │
//! │  63 CRC16                           "XXXX"                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ids of nested elements (`00`, `01`, `02`, `05`) are scoped to their
//! template, so `Gui` and `PayloadFormatIndicator` share the id `00`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::Amount;

// =============================================================================
// Tag Table
// =============================================================================

/// Every element this crate reads or writes, keyed by meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    PayloadFormatIndicator,
    MerchantAccountInformation,
    /// Globally unique identifier of the Pix arrangement.
    Gui,
    PixKey,
    Description,
    MerchantCategoryCode,
    TransactionCurrency,
    TransactionAmount,
    CountryCode,
    MerchantName,
    MerchantCity,
    AdditionalDataFieldTemplate,
    Txid,
    Crc16,
}

impl Tag {
    /// Top-level elements in mandatory emission order.
    pub const TOP_LEVEL: [Tag; 10] = [
        Tag::PayloadFormatIndicator,
        Tag::MerchantAccountInformation,
        Tag::MerchantCategoryCode,
        Tag::TransactionCurrency,
        Tag::TransactionAmount,
        Tag::CountryCode,
        Tag::MerchantName,
        Tag::MerchantCity,
        Tag::AdditionalDataFieldTemplate,
        Tag::Crc16,
    ];

    /// Every tag, top-level and nested.
    pub const ALL: [Tag; 14] = [
        Tag::PayloadFormatIndicator,
        Tag::MerchantAccountInformation,
        Tag::Gui,
        Tag::PixKey,
        Tag::Description,
        Tag::MerchantCategoryCode,
        Tag::TransactionCurrency,
        Tag::TransactionAmount,
        Tag::CountryCode,
        Tag::MerchantName,
        Tag::MerchantCity,
        Tag::AdditionalDataFieldTemplate,
        Tag::Txid,
        Tag::Crc16,
    ];

    /// The 2-digit EMV id written before the length prefix.
    pub const fn id(&self) -> &'static str {
        match self {
            Tag::PayloadFormatIndicator => "00",
            Tag::MerchantAccountInformation => "26",
            Tag::Gui => "00",
            Tag::PixKey => "01",
            Tag::Description => "02",
            Tag::MerchantCategoryCode => "52",
            Tag::TransactionCurrency => "53",
            Tag::TransactionAmount => "54",
            Tag::CountryCode => "58",
            Tag::MerchantName => "59",
            Tag::MerchantCity => "60",
            Tag::AdditionalDataFieldTemplate => "62",
            Tag::Txid => "05",
            Tag::Crc16 => "63",
        }
    }

    /// Snake-case name used in error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Tag::PayloadFormatIndicator => "payload_format_indicator",
            Tag::MerchantAccountInformation => "merchant_account_information",
            Tag::Gui => "gui",
            Tag::PixKey => "pix_key",
            Tag::Description => "description",
            Tag::MerchantCategoryCode => "merchant_category_code",
            Tag::TransactionCurrency => "transaction_currency",
            Tag::TransactionAmount => "amount",
            Tag::CountryCode => "country_code",
            Tag::MerchantName => "merchant_name",
            Tag::MerchantCity => "merchant_city",
            Tag::AdditionalDataFieldTemplate => "additional_data_field_template",
            Tag::Txid => "txid",
            Tag::Crc16 => "crc16",
        }
    }

    /// The template this tag lives in, or `None` for top-level tags.
    pub const fn parent(&self) -> Option<Tag> {
        match self {
            Tag::Gui | Tag::PixKey | Tag::Description => Some(Tag::MerchantAccountInformation),
            Tag::Txid => Some(Tag::AdditionalDataFieldTemplate),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Payload Fields
// =============================================================================

/// The variable part of a Pix payload.
///
/// Values are stored exactly as they will be encoded. Instances coming out of
/// [`PayloadBuilder::fields`](crate::PayloadBuilder::fields) or
/// [`decode`](crate::decode) have already passed validation; hand-built ones
/// are validated again when encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadFields {
    /// Receiver's Pix key (e-mail, phone, CPF/CNPJ or random key).
    pub pix_key: String,

    /// Free text shown to the payer. Empty when not provided.
    #[serde(default)]
    pub description: String,

    /// Receiver's name, at most 25 characters.
    pub merchant_name: String,

    /// Receiver's city, at most 15 characters.
    pub merchant_city: String,

    /// Reconciliation id, or `"***"` for none.
    pub txid: String,

    /// Amount in BRL, serialized as `"10.50"`.
    pub amount: Amount,
}

// =============================================================================
// Unit Tests
// =============================================================================
