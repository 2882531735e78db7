//! # CLI Interface
//!
//! Argument structure for the `bitauth` binary, via `clap` derive.

use clap::{Parser, Subcommand};

/// BitAuth identities and signatures from the command line.
///
/// Keys and signatures are hex, SINs are base58. Results go to stdout,
/// logs to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "bitauth",
    about = "BitAuth identities and signatures",
    version,
    propagate_version = true
)]
pub struct BitauthCli {
    /// Log output format: pretty or json.
    #[arg(
        long,
        global = true,
        env = "BITAUTH_LOG_FORMAT",
        default_value = "pretty"
    )]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh identity and print it as JSON.
    Generate,
    /// Print the SIN for a public key.
    Sin(SinArgs),
    /// Print the compressed public key for a private key.
    PublicKey(PublicKeyArgs),
    /// Sign a message and print the DER signature as hex.
    Sign(SignArgs),
    /// Check a signature. Exits with status 1 when it does not verify.
    Verify(VerifyArgs),
    /// Print version information and exit.
    Version,
}

#[derive(Parser, Debug)]
pub struct SinArgs {
    /// Hex-encoded public key.
    #[arg(long)]
    pub public_key: String,
}

#[derive(Parser, Debug)]
pub struct PublicKeyArgs {
    /// Hex-encoded private key.
    #[arg(long, env = "BITAUTH_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
}

#[derive(Parser, Debug)]
pub struct SignArgs {
    /// Hex-encoded private key.
    ///
    /// Prefer the environment variable; command lines end up in shell
    /// history and process listings.
    #[arg(long, env = "BITAUTH_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,

    /// The message to sign, taken as UTF-8 bytes.
    pub message: String,
}

#[derive(Parser, Debug)]
pub struct VerifyArgs {
    /// Hex-encoded public key of the claimed signer.
    #[arg(long)]
    pub public_key: String,

    /// Hex-encoded DER signature.
    #[arg(long)]
    pub signature: String,

    /// The message that was signed.
    pub message: String,
}
