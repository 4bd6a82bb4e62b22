//! # Payload Module
//!
//! Assembles, verifies and decodes the Pix "copia e cola" string.
//!
//! ## Build Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PayloadBuilder                                                         │
//! │    .pix_key() .description() .merchant_name() ... .amount()            │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  fields()  ── missing field? ──► MissingField                           │
//! │        │   ── bad amount?    ──► InvalidAmount                          │
//! │        │   ── EMVCo limits?  ──► FieldTooLong / InvalidFormat           │
//! │        ▼                                                                │
//! │  PayloadFields::encode()                                                │
//! │        │  00 → 26{00,01,02} → 52 → 53 → 54 → 58 → 59 → 60 → 62{05}      │
//! │        │  (any value > 99 bytes ──► FieldTooLong)                       │
//! │        ▼                                                                │
//! │  body + "6304" + CRC16(body + "6304")  ──►  Payload                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed build never returns part of a payload.

use serde::Serialize;
use std::fmt;

use crate::amount::{Amount, AmountInput};
use crate::error::{DecodeError, PayloadError, PayloadResult, PixResult};
use crate::tlv::{self, TlvElement, CHECKSUM_HEADER, CHECKSUM_LEN};
use crate::types::{PayloadFields, Tag};
use crate::validation::validate_fields;
use crate::{
    COUNTRY_CODE, MERCHANT_CATEGORY_CODE, PAYLOAD_FORMAT_INDICATOR, PIX_GUI, TRANSACTION_CURRENCY,
};

// =============================================================================
// Payload
// =============================================================================

/// A complete, checksummed payload string.
///
/// Hand [`as_str`](Payload::as_str) to any QR renderer as opaque data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Payload(String);

impl Payload {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// The trailing 4 hex digits.
    pub fn checksum(&self) -> &str {
        &self.0[self.0.len() - CHECKSUM_LEN..]
    }

    /// Everything the checksum covers, ending in `"6304"`.
    pub fn body(&self) -> &str {
        &self.0[..self.0.len() - CHECKSUM_LEN]
    }

    /// Byte length of the payload.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Payload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Payload> for String {
    fn from(payload: Payload) -> Self {
        payload.0
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Collects field values and produces a [`Payload`].
///
/// Setters only record values. All checks run in [`build`](Self::build), so
/// a builder can be filled in any order and reused.
///
/// ## Example
/// ```rust
/// use pix_core::PayloadBuilder;
///
/// let payload = PayloadBuilder::new()
///     .pix_key("12345678900")
///     .merchant_name("Loja")
///     .merchant_city("Sao Paulo")
///     .amount(0.99)
///     .txid("***")
///     .build()
///     .unwrap();
///
/// assert_eq!(payload.checksum(), "71F6");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayloadBuilder {
    pix_key: Option<String>,
    description: Option<String>,
    merchant_name: Option<String>,
    merchant_city: Option<String>,
    txid: Option<String>,
    amount: Option<AmountInput>,
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Receiver's Pix key.
    pub fn pix_key(mut self, pix_key: impl Into<String>) -> Self {
        self.pix_key = Some(pix_key.into());
        self
    }

    /// Optional free text for the payer.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn merchant_name(mut self, merchant_name: impl Into<String>) -> Self {
        self.merchant_name = Some(merchant_name.into());
        self
    }

    pub fn merchant_city(mut self, merchant_city: impl Into<String>) -> Self {
        self.merchant_city = Some(merchant_city.into());
        self
    }

    /// Reconciliation id; pass [`TXID_NONE`](crate::TXID_NONE) for none.
    pub fn txid(mut self, txid: impl Into<String>) -> Self {
        self.txid = Some(txid.into());
        self
    }

    /// Transaction amount. Accepts integers, floats, decimal strings,
    /// [`rust_decimal::Decimal`] and [`Amount`]; see [`crate::amount`] for the
    /// rounding policy.
    pub fn amount(mut self, amount: impl Into<AmountInput>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// Validates the collected values without encoding them.
    pub fn fields(&self) -> PayloadResult<PayloadFields> {
        let fields = PayloadFields {
            pix_key: required(&self.pix_key, Tag::PixKey)?,
            description: self.description.clone().unwrap_or_default(),
            merchant_name: required(&self.merchant_name, Tag::MerchantName)?,
            merchant_city: required(&self.merchant_city, Tag::MerchantCity)?,
            txid: required(&self.txid, Tag::Txid)?,
            amount: self
                .amount
                .as_ref()
                .ok_or(PayloadError::MissingField {
                    field: Tag::TransactionAmount,
                })?
                .normalize()?,
        };

        validate_fields(&fields)?;
        Ok(fields)
    }

    /// Produces the final payload.
    pub fn build(&self) -> PayloadResult<Payload> {
        self.fields()?.encode()
    }
}

fn required(value: &Option<String>, field: Tag) -> PayloadResult<String> {
    value.clone().ok_or(PayloadError::MissingField { field })
}

// =============================================================================
// Encoding
// =============================================================================

impl PayloadFields {
    /// Starts a builder.
    pub fn builder() -> PayloadBuilder {
        PayloadBuilder::new()
    }

    /// Validates and encodes these fields.
    pub fn encode(&self) -> PayloadResult<Payload> {
        validate_fields(self)?;

        let mut body = String::with_capacity(128);
        tlv::push(&mut body, Tag::PayloadFormatIndicator, PAYLOAD_FORMAT_INDICATOR)?;
        tlv::push(
            &mut body,
            Tag::MerchantAccountInformation,
            &self.merchant_account_information()?,
        )?;
        tlv::push(&mut body, Tag::MerchantCategoryCode, MERCHANT_CATEGORY_CODE)?;
        tlv::push(&mut body, Tag::TransactionCurrency, TRANSACTION_CURRENCY)?;
        tlv::push(&mut body, Tag::TransactionAmount, &self.amount.to_string())?;
        tlv::push(&mut body, Tag::CountryCode, COUNTRY_CODE)?;
        tlv::push(&mut body, Tag::MerchantName, &self.merchant_name)?;
        tlv::push(&mut body, Tag::MerchantCity, &self.merchant_city)?;
        tlv::push(
            &mut body,
            Tag::AdditionalDataFieldTemplate,
            &self.additional_data_field_template()?,
        )?;

        body.push_str(CHECKSUM_HEADER);
        let crc = tlv::crc16(body.as_bytes());
        body.push_str(&crc);

        tracing::debug!(len = body.len(), crc = %crc, txid = %self.txid, "Pix payload built");
        Ok(Payload(body))
    }

    /// Tag `26` value: GUI, key and description.
    fn merchant_account_information(&self) -> PayloadResult<String> {
        let mut value = tlv::encode(Tag::Gui, PIX_GUI)?;
        tlv::push(&mut value, Tag::PixKey, &self.pix_key)?;
        tlv::push(&mut value, Tag::Description, &self.description)?;
        Ok(value)
    }

    /// Tag `62` value: the txid.
    fn additional_data_field_template(&self) -> PayloadResult<String> {
        tlv::encode(Tag::Txid, &self.txid)
    }
}

/// Encodes a field set.
///
/// Same as [`PayloadFields::encode`]; provided as the crate's free-function
/// entry point.
pub fn generate_payload(fields: &PayloadFields) -> PayloadResult<Payload> {
    fields.encode()
}

// =============================================================================
// Verification & Decoding
// =============================================================================

/// Checks that `payload` ends with a `6304XXXX` element whose digits match
/// the CRC of everything before them.
///
/// Hex digits are compared case-insensitively.
pub fn verify(payload: &str) -> Result<(), DecodeError> {
    let split = payload
        .len()
        .checked_sub(CHECKSUM_LEN)
        .ok_or(DecodeError::MissingChecksum)?;
    let (Some(body), Some(actual)) = (payload.get(..split), payload.get(split..)) else {
        return Err(DecodeError::MissingChecksum);
    };

    if !body.ends_with(CHECKSUM_HEADER) {
        return Err(DecodeError::MissingChecksum);
    }

    let expected = tlv::crc16(body.as_bytes());
    if !actual.eq_ignore_ascii_case(&expected) {
        return Err(DecodeError::ChecksumMismatch {
            expected,
            actual: actual.to_string(),
        });
    }

    Ok(())
}

/// Reads a payload back into its fields.
///
/// Verifies the checksum, requires the fixed elements to carry the values
/// this crate emits, and re-applies field validation. Elements the encoder
/// never writes are ignored.
///
/// ```rust
/// use pix_core::{decode, PayloadBuilder};
///
/// let payload = PayloadBuilder::new()
///     .pix_key("pix@example.com")
///     .merchant_name("Loja")
///     .merchant_city("Recife")
///     .amount("5")
///     .txid("***")
///     .build()
///     .unwrap();
///
/// let fields = decode(payload.as_str()).unwrap();
/// assert_eq!(fields.merchant_city, "Recife");
/// assert_eq!(fields.amount.to_string(), "5.00");
/// ```
pub fn decode(payload: &str) -> PixResult<PayloadFields> {
    verify(payload)?;
    let elements = tlv::parse(payload)?;

    expect_value(&elements, Tag::PayloadFormatIndicator, PAYLOAD_FORMAT_INDICATOR)?;
    expect_value(&elements, Tag::TransactionCurrency, TRANSACTION_CURRENCY)?;
    expect_value(&elements, Tag::CountryCode, COUNTRY_CODE)?;

    let account = element(&elements, Tag::MerchantAccountInformation)?.children()?;
    expect_value(&account, Tag::Gui, PIX_GUI)?;

    let additional = element(&elements, Tag::AdditionalDataFieldTemplate)?.children()?;

    let fields = PayloadFields {
        pix_key: element(&account, Tag::PixKey)?.value.clone(),
        description: tlv::find(&account, Tag::Description)
            .map(|e| e.value.clone())
            .unwrap_or_default(),
        merchant_name: element(&elements, Tag::MerchantName)?.value.clone(),
        merchant_city: element(&elements, Tag::MerchantCity)?.value.clone(),
        txid: element(&additional, Tag::Txid)?.value.clone(),
        amount: canonical_amount(&element(&elements, Tag::TransactionAmount)?.value)?,
    };

    validate_fields(&fields)?;
    Ok(fields)
}

/// Reads tag `54` without rounding; only the form `encode` writes is accepted.
fn canonical_amount(value: &str) -> PixResult<Amount> {
    let amount = Amount::parse(value)?;
    if amount.to_string() != value {
        return Err(DecodeError::UnexpectedValue {
            tag: Tag::TransactionAmount,
            expected: "an amount with exactly two decimal places",
            found: value.to_string(),
        }
        .into());
    }
    Ok(amount)
}

fn element(elements: &[TlvElement], tag: Tag) -> Result<&TlvElement, DecodeError> {
    tlv::find(elements, tag).ok_or(DecodeError::MissingTag { tag })
}

fn expect_value(
    elements: &[TlvElement],
    tag: Tag,
    expected: &'static str,
) -> Result<(), DecodeError> {
    let found = &element(elements, tag)?.value;
    if found != expected {
        return Err(DecodeError::UnexpectedValue {
            tag,
            expected,
            found: found.clone(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PixError;

    /// Field values the network's reference example uses: everything blank
    /// except amount and the "no txid" sentinel.
    fn blank_builder() -> PayloadBuilder {
        PayloadBuilder::new()
            .pix_key("")
            .description("")
            .merchant_name("")
            .merchant_city("")
            .amount("1.00")
            .txid("***")
    }

    fn sample_builder() -> PayloadBuilder {
        PayloadBuilder::new()
            .pix_key("pix@example.com")
            .description("Pedido 42")
            .merchant_name("Fulano de Tal")
            .merchant_city("BRASILIA")
            .amount(10.5)
            .txid("PEDIDO42")
    }

    #[test]
    fn test_blank_payload_exact_bytes() {
        let payload = blank_builder().build().unwrap();
        assert_eq!(
            payload.as_str(),
            "00020126260014br.gov.bcb.pix0100020052040000530398654041.005802BR5900600062070503***63041A35"
        );
        assert_eq!(payload.checksum(), "1A35");
    }

    #[test]
    fn test_sample_payload_exact_bytes() {
        let payload = sample_builder().build().unwrap();
        assert_eq!(
            payload.as_str(),
            "00020126500014br.gov.bcb.pix0115pix@example.com0209Pedido 42520400005303986540510.505802BR5913Fulano de Tal6008BRASILIA62120508PEDIDO426304EC13"
        );
    }

    #[test]
    fn test_multibyte_name_length_prefix() {
        let payload = PayloadBuilder::new()
            .pix_key("chave")
            .merchant_name("São João")
            .merchant_city("Recife")
            .amount(1)
            .txid("***")
            .build()
            .unwrap();
        assert_eq!(
            payload.as_str(),
            "00020126310014br.gov.bcb.pix0105chave020052040000530398654041.005802BR5910São João6006Recife62070503***6304702C"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = sample_builder();
        let first = builder.build().unwrap();
        for _ in 0..10 {
            assert_eq!(builder.build().unwrap(), first);
        }
        assert_eq!(sample_builder().build().unwrap(), first);
    }

    #[test]
    fn test_checksum_recomputable_from_prefix() {
        let payload = blank_builder().build().unwrap();
        let prefix = payload.as_str().split("6304").next().unwrap();
        let recomputed = tlv::crc16(format!("{prefix}6304").as_bytes());
        assert_eq!(recomputed, payload.checksum());
        assert!(payload.body().ends_with(CHECKSUM_HEADER));
    }

    #[test]
    fn test_round_trip_structure() {
        let payload = sample_builder().build().unwrap();
        let elements = tlv::parse(payload.as_str()).unwrap();

        let ids: Vec<_> = elements.iter().map(|e| e.id.as_str()).collect();
        let expected: Vec<_> = Tag::TOP_LEVEL.iter().map(|t| t.id()).collect();
        assert_eq!(ids, expected);

        let account = elements[1].children().unwrap();
        let nested: Vec<_> = account.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(nested, ["00", "01", "02"]);

        let additional = elements[8].children().unwrap();
        assert_eq!(additional.len(), 1);
        assert_eq!(additional[0].id, "05");
    }

    #[test]
    fn test_length_prefixes_match_byte_lengths() {
        let payload = PayloadBuilder::new()
            .pix_key("+5561999999999")
            .description("Açaí & pão de queijo")
            .merchant_name("Padaria Conceição")
            .merchant_city("Goiânia")
            .amount("12.34")
            .txid("ABC123")
            .build()
            .unwrap();

        let mut stack = vec![payload.as_str().to_string()];
        let mut seen = 0;
        while let Some(blob) = stack.pop() {
            let mut offset = 0;
            for element in tlv::parse(&blob).unwrap() {
                let prefix: usize = blob[offset + 2..offset + 4].parse().unwrap();
                assert_eq!(prefix, element.value.len());
                offset += 4 + element.value.len();
                seen += 1;
                if element.id == "26" || element.id == "62" {
                    stack.push(element.value);
                }
            }
        }
        assert_eq!(seen, 14);
    }

    #[test]
    fn test_amount_inputs_normalize_alike() {
        let one = |amount: AmountInput| {
            blank_builder()
                .amount(amount)
                .fields()
                .unwrap()
                .amount
                .to_string()
        };
        assert_eq!(one(1.into()), "1.00");
        assert_eq!(one(1.0.into()), "1.00");
        assert_eq!(one("1".into()), "1.00");
        assert_eq!(one(1.005.into()), "1.01");
    }

    #[test]
    fn test_missing_pix_key() {
        let builder = PayloadBuilder::new()
            .merchant_name("Loja")
            .merchant_city("Recife")
            .amount(1)
            .txid("***");
        assert_eq!(
            builder.build(),
            Err(PayloadError::MissingField { field: Tag::PixKey })
        );
    }

    #[test]
    fn test_missing_each_required_field() {
        let cases = [
            (PayloadBuilder::new(), Tag::PixKey),
            (PayloadBuilder::new().pix_key("k"), Tag::MerchantName),
            (PayloadBuilder::new().pix_key("k").merchant_name("n"), Tag::MerchantCity),
            (
                PayloadBuilder::new().pix_key("k").merchant_name("n").merchant_city("c"),
                Tag::Txid,
            ),
            (
                PayloadBuilder::new()
                    .pix_key("k")
                    .merchant_name("n")
                    .merchant_city("c")
                    .txid("***"),
                Tag::TransactionAmount,
            ),
        ];
        for (builder, field) in cases {
            assert_eq!(builder.build(), Err(PayloadError::MissingField { field }));
        }
    }

    #[test]
    fn test_description_optional() {
        let with_blank = blank_builder().build().unwrap();
        let without = PayloadBuilder::new()
            .pix_key("")
            .merchant_name("")
            .merchant_city("")
            .amount("1.00")
            .txid("***")
            .build()
            .unwrap();
        assert_eq!(with_blank, without);
    }

    #[test]
    fn test_pix_key_too_long() {
        let err = blank_builder().pix_key("k".repeat(100)).build().unwrap_err();
        assert_eq!(
            err,
            PayloadError::FieldTooLong {
                field: Tag::PixKey,
                len: 100,
                max: 99
            }
        );
    }

    #[test]
    fn test_merchant_account_template_too_long() {
        // Each part fits, the wrapped template does not
        let err = blank_builder()
            .pix_key("k".repeat(60))
            .description("d".repeat(40))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            PayloadError::FieldTooLong {
                field: Tag::MerchantAccountInformation,
                ..
            }
        ));
    }

    #[test]
    fn test_emvco_limits_enforced() {
        assert!(matches!(
            blank_builder().merchant_name("N".repeat(26)).build(),
            Err(PayloadError::FieldTooLong { field: Tag::MerchantName, .. })
        ));
        assert!(matches!(
            blank_builder().merchant_city("C".repeat(16)).build(),
            Err(PayloadError::FieldTooLong { field: Tag::MerchantCity, .. })
        ));
        assert!(matches!(
            blank_builder().txid("not valid!").build(),
            Err(PayloadError::InvalidFormat { field: Tag::Txid, .. })
        ));
    }

    #[test]
    fn test_invalid_amount() {
        for amount in ["abc", "-1", "1,50"] {
            assert!(matches!(
                blank_builder().amount(amount).build(),
                Err(PayloadError::InvalidAmount { .. })
            ));
        }
    }

    #[test]
    fn test_generate_payload_matches_builder() {
        let fields = sample_builder().fields().unwrap();
        assert_eq!(
            generate_payload(&fields).unwrap(),
            sample_builder().build().unwrap()
        );
    }

    #[test]
    fn test_hand_built_fields_are_validated() {
        let mut fields = sample_builder().fields().unwrap();
        fields.merchant_city = "Cidade Grande Demais".to_string();
        assert!(fields.encode().is_err());
    }

    #[test]
    fn test_zero_padded_checksum() {
        let payload = PayloadBuilder::new()
            .pix_key("pix@example.com")
            .merchant_name("Loja")
            .merchant_city("Recife")
            .amount(5)
            .txid("TX201")
            .build()
            .unwrap();
        assert_eq!(payload.checksum(), "0ACC");
        assert_eq!(payload.checksum().len(), 4);
    }

    #[test]
    fn test_verify() {
        let payload = sample_builder().build().unwrap();
        assert!(verify(payload.as_str()).is_ok());

        let lower_crc = format!("{}{}", payload.body(), payload.checksum().to_lowercase());
        assert!(verify(&lower_crc).is_ok());

        let tampered = payload.as_str().replace("10.50", "99.50");
        assert!(matches!(
            verify(&tampered),
            Err(DecodeError::ChecksumMismatch { .. })
        ));

        assert_eq!(verify("abc"), Err(DecodeError::MissingChecksum));
        assert_eq!(verify("000201"), Err(DecodeError::MissingChecksum));
    }

    #[test]
    fn test_decode_round_trip() {
        let fields = sample_builder().fields().unwrap();
        let payload = fields.encode().unwrap();
        assert_eq!(decode(payload.as_str()).unwrap(), fields);

        let blank = blank_builder().fields().unwrap();
        assert_eq!(decode(blank_builder().build().unwrap().as_str()).unwrap(), blank);
    }

    #[test]
    fn test_decode_rejects_foreign_currency() {
        // 53 = 840 (USD)
        let body = "00020126260014br.gov.bcb.pix0100020052040000530384054041.005802BR5900600062070503***6304";
        let payload = format!("{body}{}", tlv::crc16(body.as_bytes()));
        assert!(matches!(
            decode(&payload),
            Err(PixError::Decode(DecodeError::UnexpectedValue {
                tag: Tag::TransactionCurrency,
                ..
            }))
        ));
    }

    #[test]
    fn test_decode_rejects_non_canonical_amount() {
        for amount in ["1.005", "1.0", "1", "01.00"] {
            let body = format!(
                "00020126260014br.gov.bcb.pix0100020052040000530398654{:02}{amount}5802BR5900600062070503***6304",
                amount.len()
            );
            let payload = format!("{body}{}", tlv::crc16(body.as_bytes()));
            assert!(verify(&payload).is_ok());
            assert_eq!(
                decode(&payload),
                Err(PixError::Decode(DecodeError::UnexpectedValue {
                    tag: Tag::TransactionAmount,
                    expected: "an amount with exactly two decimal places",
                    found: amount.to_string(),
                })),
                "amount {amount}"
            );
        }
    }

    #[test]
    fn test_decode_missing_txid_template() {
        let body = "00020126260014br.gov.bcb.pix0100020052040000530398654041.005802BR590060006304";
        let payload = format!("{body}{}", tlv::crc16(body.as_bytes()));
        assert_eq!(
            decode(&payload),
            Err(PixError::Decode(DecodeError::MissingTag {
                tag: Tag::AdditionalDataFieldTemplate
            }))
        );
    }

    #[test]
    fn test_payload_serializes_as_string() {
        let payload = blank_builder().build().unwrap();
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, format!("\"{payload}\""));
    }

    #[test]
    fn test_fields_serialize() {
        let fields = sample_builder().fields().unwrap();
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["amount"], "10.50");
        assert_eq!(json["merchant_name"], "Fulano de Tal");
    }
}
