use std::process::ExitCode;

use clap::Parser;
use pix_cli::cli::Cli;

fn main() -> ExitCode {
    pix_cli::init_tracing();

    match pix_cli::commands::run(Cli::parse()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("pix failed: {e}");
            ExitCode::FAILURE
        }
    }
}
