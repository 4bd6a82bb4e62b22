//! # Commands
//!
//! `pix encode` and `pix decode`. Each returns the text to print on stdout;
//! `main` owns the actual printing.
//!
//! ## User Workflow
//! ```text
//! merchant.toml + PIX_* env + flags
//!      │
//!      ▼
//! encode() ──► PayloadBuilder ──► "000201...6304ABCD" ──► QR renderer
//!
//! "000201...6304ABCD"
//!      │
//!      ▼
//! decode() ──► verify CRC ──► PayloadFields as JSON
//! ```

use pix_core::{decode as decode_payload, Payload, PayloadBuilder, PayloadFields, MAX_TXID_LEN};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cli::{Cli, Command, DecodeArgs, EncodeArgs};
use crate::config::PixConfig;
use crate::error::CliResult;

/// JSON shape printed by `pix encode --json`.
#[derive(Debug, Serialize)]
pub struct EncodeOutput<'a> {
    pub fields: &'a PayloadFields,
    pub payload: &'a Payload,
}

/// Loads configuration and dispatches the selected subcommand.
pub fn run(cli: Cli) -> CliResult<String> {
    match cli.command {
        Command::Encode(args) => {
            let config = PixConfig::load(cli.config)?;
            encode(&args, &config)
        }
        Command::Decode(args) => decode(&args),
    }
}

/// Builds a payload from flags layered over the merchant profile.
pub fn encode(args: &EncodeArgs, config: &PixConfig) -> CliResult<String> {
    let merchant = &config.merchant;
    let mut builder = PayloadBuilder::new().amount(args.amount.as_str());

    if let Some(key) = args.key.as_ref().or(merchant.pix_key.as_ref()) {
        builder = builder.pix_key(key.as_str());
    }
    if let Some(name) = args.name.as_ref().or(merchant.name.as_ref()) {
        builder = builder.merchant_name(name.as_str());
    }
    if let Some(city) = args.city.as_ref().or(merchant.city.as_ref()) {
        builder = builder.merchant_city(city.as_str());
    }
    if let Some(description) = args.description.as_ref().or(merchant.description.as_ref()) {
        builder = builder.description(description.as_str());
    }

    let txid = if args.new_txid {
        let generated = generate_txid();
        debug!(txid = %generated, "Generated transaction id");
        generated
    } else {
        args.txid.clone()
    };
    builder = builder.txid(txid);

    let fields = builder.fields()?;
    let payload = fields.encode()?;
    info!(
        amount = %fields.amount,
        txid = %fields.txid,
        crc = payload.checksum(),
        "Payload generated"
    );

    if args.json {
        let output = EncodeOutput {
            fields: &fields,
            payload: &payload,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    } else {
        Ok(payload.into_string())
    }
}

/// Verifies a payload and renders its fields as pretty JSON.
pub fn decode(args: &DecodeArgs) -> CliResult<String> {
    let fields = decode_payload(args.payload.trim())?;
    debug!(txid = %fields.txid, "Payload decoded");
    Ok(serde_json::to_string_pretty(&fields)?)
}

/// A random reconciliation id: the first 25 hex digits of a UUID v4, upper-cased.
pub fn generate_txid() -> String {
    let mut txid = Uuid::new_v4().simple().to_string().to_uppercase();
    txid.truncate(MAX_TXID_LEN);
    txid
}
