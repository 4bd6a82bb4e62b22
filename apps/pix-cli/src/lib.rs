//! # pix-cli
//!
//! Thin command-line layer over `pix-core`: loads the merchant profile,
//! parses flags, prints the payload. QR rendering is left to whatever
//! consumes stdout.
//!
//! ## Usage
//! ```bash
//! # Merchant data from ~/.config/pix/merchant.toml
//! pix encode --amount 10.50 --txid PEDIDO42
//!
//! # Everything on the command line
//! pix encode --key pix@example.com --name "Fulano de Tal" --city BRASILIA --amount 1
//!
//! # Inspect a payload
//! pix decode '00020126...6304EC13'
//!
//! # Verbose logs on stderr
//! RUST_LOG=debug pix encode --amount 5 --new-txid
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only the command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=pix_core=debug` - Show payload assembly events
/// - Default: warnings only, plus info for this crate
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,pix_cli=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
