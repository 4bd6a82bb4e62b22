//! # pix-core: Pix Payload Encoding
//!
//! Builds the EMV Merchant-Presented QR payload ("copia e cola") used by
//! Brazil's Pix instant-payment network. Pure functions, zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pix Payload Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 pix-cli (config, logging, `pix`)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PayloadBuilder / decode                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 ★ pix-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  payload  │  │    tlv    │  │  amount   │  │ validation│  │   │
//! │  │   │  Builder  │─►│  encode   │  │  Amount   │  │  EMVCo    │  │   │
//! │  │   │  decode   │  │  crc16    │  │  rounding │  │  limits   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RENDERING • PURE FUNCTIONS                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Payload (opaque string)                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              QR renderer (external, not in this repo)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`payload`] - `PayloadBuilder`, `Payload`, `verify`, `decode`
//! - [`tlv`] - element encoding/parsing and CRC-16/CCITT-FALSE
//! - [`amount`] - `Amount` in centavos and the rounding policy
//! - [`types`] - the tag table and `PayloadFields`
//! - [`validation`] - EMVCo field limits
//! - [`error`] - error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pix_core::PayloadBuilder;
//!
//! let payload = PayloadBuilder::new()
//!     .pix_key("pix@example.com")
//!     .description("Pedido 42")
//!     .merchant_name("Fulano de Tal")
//!     .merchant_city("BRASILIA")
//!     .amount(10.5)
//!     .txid("PEDIDO42")
//!     .build()?;
//!
//! assert!(payload.as_str().starts_with("000201"));
//! assert_eq!(payload.checksum(), "EC13");
//! # Ok::<(), pix_core::PayloadError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod error;
pub mod payload;
pub mod tlv;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use amount::{Amount, AmountInput};
pub use error::{DecodeError, PayloadError, PayloadResult, PixError, PixResult};
pub use payload::{decode, generate_payload, verify, Payload, PayloadBuilder};
pub use tlv::crc16;
pub use types::{PayloadFields, Tag};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tag `00` value: payload format version.
pub const PAYLOAD_FORMAT_INDICATOR: &str = "01";

/// Tag `26`/`00` value identifying the Pix arrangement.
pub const PIX_GUI: &str = "br.gov.bcb.pix";

/// Tag `52` value. Pix does not use merchant category codes.
pub const MERCHANT_CATEGORY_CODE: &str = "0000";

/// Tag `53` value: ISO 4217 numeric code for BRL.
pub const TRANSACTION_CURRENCY: &str = "986";

/// Tag `58` value.
pub const COUNTRY_CODE: &str = "BR";

/// Txid sentinel meaning "no reconciliation id".
pub const TXID_NONE: &str = "***";

/// Largest value a 2-digit length prefix can announce.
pub const MAX_TLV_VALUE_LEN: usize = 99;

/// EMVCo limit for tag `59`, in characters.
pub const MAX_MERCHANT_NAME_LEN: usize = 25;

/// EMVCo limit for tag `60`, in characters.
pub const MAX_MERCHANT_CITY_LEN: usize = 15;

/// Pix limit for tag `62`/`05`, in characters.
pub const MAX_TXID_LEN: usize = 25;
