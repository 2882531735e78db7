//! # Protocol Configuration & Constants
//!
//! Every magic number in BitAuth lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong.
//!
//! Most of these values are fixed by things we don't control: the secp256k1
//! curve, the Bitcoin hashing conventions, and the identity protocol's SIN
//! layout. Changing any of them breaks compatibility with every SIN and
//! signature already out in the wild.

// ---------------------------------------------------------------------------
// Curve Parameters
// ---------------------------------------------------------------------------

/// The only curve we speak. Same one Bitcoin uses.
pub const SIGNING_ALGORITHM: &str = "ECDSA-secp256k1";

/// Order `N` of the secp256k1 base point, big-endian hex.
pub const SECP256K1_ORDER_HEX: &str =
    "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";

/// Private scalar length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// SEC1 compressed public key length: one parity byte plus the X coordinate.
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// SEC1 uncompressed public key length: `0x04 || X || Y`.
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

/// Nonce length drawn from the random source for every signature.
pub const NONCE_LENGTH: usize = 32;

/// Upper bound on nonce / scalar re-draws. A uniformly random 32-byte value
/// lands outside `[1, N-1]` with probability around 2^-128, so hitting this
/// cap means the random source is broken, not unlucky.
pub const MAX_NONCE_ATTEMPTS: usize = 64;

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Digest applied to a message before signing. One round, not two.
pub const MESSAGE_DIGEST_ALGORITHM: &str = "SHA-256";

/// SHA-256 output length.
pub const DIGEST_LENGTH: usize = 32;

/// RIPEMD-160 output length, i.e. the length of a hash160.
pub const HASH160_LENGTH: usize = 20;

/// Number of double-SHA-256 bytes kept as a checksum.
pub const CHECKSUM_LENGTH: usize = 4;

// ---------------------------------------------------------------------------
// DER
// ---------------------------------------------------------------------------

/// Tag of the outer SEQUENCE.
pub const DER_SEQUENCE_TAG: u8 = 0x30;

/// Tag of each INTEGER inside the sequence.
pub const DER_INTEGER_TAG: u8 = 0x02;

/// Largest length representable in the single-byte short form. secp256k1
/// signatures top out at 72 bytes, so the long form never appears.
pub const DER_MAX_SHORT_LENGTH: usize = 127;

// ---------------------------------------------------------------------------
// SIN
// ---------------------------------------------------------------------------

/// First byte of every SIN payload.
pub const SIN_VERSION: u8 = 0x0F;

/// SIN type byte for ephemeral identities, the only kind we derive.
pub const SIN_TYPE_EPHEMERAL: u8 = 0x02;

/// Decoded SIN length: version + type + hash160 + checksum.
pub const SIN_PAYLOAD_LENGTH: usize = 2 + HASH160_LENGTH + CHECKSUM_LENGTH;

/// Returns the label for a SIN type byte, mainly for logging.
pub fn sin_type_name(sin_type: u8) -> String {
    match sin_type {
        SIN_TYPE_EPHEMERAL => "ephemeral".to_string(),
        other => format!("unknown(0x{:02X})", other),
    }
}
