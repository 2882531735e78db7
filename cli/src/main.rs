// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # BitAuth CLI
//!
//! Entry point for the `bitauth` binary, a thin shell over the library's
//! hex API:
//!
//! - `generate`: fresh identity as JSON
//! - `sin`: SIN for a public key
//! - `public-key`: public key for a private key
//! - `sign`: DER signature for a message
//! - `verify`: check a signature (exit status 1 when invalid)
//! - `version`: print build version information

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;

use bitauth::Sin;

use cli::{BitauthCli, Commands};
use logging::LogFormat;

/// JSON shape printed by `generate`.
#[derive(Serialize)]
struct IdentityOutput {
    private_key: String,
    public_key: String,
    sin: Sin,
}

fn main() -> Result<ExitCode> {
    let cli = BitauthCli::parse();
    logging::init_logging("warn", LogFormat::from_str_lossy(&cli.log_format));

    match cli.command {
        Commands::Generate => generate(),
        Commands::Sin(args) => {
            let sin = bitauth::derive_sin(&args.public_key).context("failed to derive SIN")?;
            println!("{}", sin);
            Ok(ExitCode::SUCCESS)
        }
        Commands::PublicKey(args) => {
            let public_key = bitauth::public_key_from_private_key(&args.private_key)
                .context("failed to derive public key")?;
            println!("{}", public_key);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Sign(args) => {
            let signature = bitauth::sign(args.message.as_bytes(), &args.private_key)
                .context("failed to sign message")?;
            println!("{}", signature);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify(args) => Ok(verify(args)),
        Commands::Version => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn generate() -> Result<ExitCode> {
    let identity = bitauth::generate_identity().context("failed to generate identity")?;
    tracing::info!(sin = %identity.sin(), "identity generated");

    let output = IdentityOutput {
        private_key: identity.encoded_private_key(),
        public_key: identity.encoded_public_key(),
        sin: identity.sin().clone(),
    };
    let json = serde_json::to_string_pretty(&output).context("failed to serialize identity")?;
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

fn verify(args: cli::VerifyArgs) -> ExitCode {
    if bitauth::verify_signature(args.message.as_bytes(), &args.signature, &args.public_key) {
        println!("valid");
        ExitCode::SUCCESS
    } else {
        println!("invalid");
        ExitCode::FAILURE
    }
}

fn print_version() {
    for line in version_lines() {
        println!("{}", line);
    }
}

fn version_lines() -> Vec<String> {
    vec![
        format!("bitauth   {}", env!("CARGO_PKG_VERSION")),
        format!(
            "scheme    {} with {}",
            bitauth::config::SIGNING_ALGORITHM,
            bitauth::config::MESSAGE_DIGEST_ALGORITHM
        ),
    ]
}
