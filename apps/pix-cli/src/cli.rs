//! Command-line arguments for the `pix` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pix_core::TXID_NONE;

/// Generate and inspect Pix "copia e cola" payloads.
#[derive(Debug, Parser)]
#[command(name = "pix", author, version, about, long_about = None)]
pub struct Cli {
    /// Merchant profile (TOML). Defaults to the platform config directory.
    #[arg(long, global = true, env = "PIX_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a payload and print it
    Encode(EncodeArgs),

    /// Verify a payload and print its fields as JSON
    Decode(DecodeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    /// Transaction amount in BRL, e.g. 10.50
    #[arg(long)]
    pub amount: String,

    /// Receiver's Pix key (overrides the profile)
    #[arg(long)]
    pub key: Option<String>,

    /// Receiver's name, up to 25 characters (overrides the profile)
    #[arg(long)]
    pub name: Option<String>,

    /// Receiver's city, up to 15 characters (overrides the profile)
    #[arg(long)]
    pub city: Option<String>,

    /// Text shown to the payer
    #[arg(long)]
    pub description: Option<String>,

    /// Reconciliation id (letters and digits, up to 25)
    #[arg(long, default_value = TXID_NONE, conflicts_with = "new_txid")]
    pub txid: String,

    /// Generate a random 25-character reconciliation id
    #[arg(long)]
    pub new_txid: bool,

    /// Print fields and payload as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// The payload string to inspect
    pub payload: String,
}
