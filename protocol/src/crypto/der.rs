//! # DER Signature Codec
//!
//! Encodes and decodes the one ASN.1 structure BitAuth cares about:
//!
//! ```text
//! 0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>
//! ```
//!
//! Both integers are unsigned magnitudes written big-endian with the fewest
//! bytes possible. DER integers are signed, so a magnitude whose first byte
//! has the high bit set gets one `0x00` byte in front of it.
//!
//! The parser is a fixed-offset walk with a bounds check before every read.
//! It accepts exactly what [`encode`] produces: short-form lengths only,
//! minimal non-negative integers, no trailing bytes. Anything else is an
//! error, so every successfully decoded signature re-encodes to the same
//! bytes.

use num_bigint::BigUint;
use thiserror::Error;

use crate::config::{DER_INTEGER_TAG, DER_MAX_SHORT_LENGTH, DER_SEQUENCE_TAG};

/// Everything that can go wrong reading or writing a DER signature.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DerError {
    #[error("input ended before offset {offset}")]
    Truncated { offset: usize },

    #[error("expected sequence tag 0x30, found 0x{found:02x}")]
    InvalidSequenceTag { found: u8 },

    #[error("sequence declares {declared} bytes but {actual} follow")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("length {length} exceeds the single-byte form")]
    LengthOverflow { length: usize },

    #[error("expected integer tag 0x02 at offset {offset}, found 0x{found:02x}")]
    InvalidIntegerTag { offset: usize, found: u8 },

    #[error("integer at offset {offset} claims {length} bytes, only {available} left")]
    IntegerOverrun {
        offset: usize,
        length: usize,
        available: usize,
    },

    #[error("zero-length integer at offset {offset}")]
    EmptyInteger { offset: usize },

    #[error("integer at offset {offset} is negative or not minimally encoded")]
    NonCanonicalInteger { offset: usize },

    #[error("{count} unexpected bytes after the second integer")]
    TrailingBytes { count: usize },
}

/// DER-encode an `(r, s)` pair.
///
/// Fails only if either integer is too large for a single-byte length,
/// which never happens for values below the secp256k1 order.
pub fn encode(r: &BigUint, s: &BigUint) -> Result<Vec<u8>, DerError> {
    let rb = integer_bytes(r);
    let sb = integer_bytes(s);

    let body_len = 2 + rb.len() + 2 + sb.len();
    for length in [rb.len(), sb.len(), body_len] {
        if length > DER_MAX_SHORT_LENGTH {
            return Err(DerError::LengthOverflow { length });
        }
    }

    let mut der = Vec::with_capacity(2 + body_len);
    der.push(DER_SEQUENCE_TAG);
    der.push(body_len as u8);
    der.push(DER_INTEGER_TAG);
    der.push(rb.len() as u8);
    der.extend_from_slice(&rb);
    der.push(DER_INTEGER_TAG);
    der.push(sb.len() as u8);
    der.extend_from_slice(&sb);
    Ok(der)
}

/// Decode a DER signature into its `(r, s)` pair.
pub fn decode(der: &[u8]) -> Result<(BigUint, BigUint), DerError> {
    let header = der.get(..2).ok_or(DerError::Truncated { offset: der.len() })?;
    if header[0] != DER_SEQUENCE_TAG {
        return Err(DerError::InvalidSequenceTag { found: header[0] });
    }

    let declared = header[1] as usize;
    if declared > DER_MAX_SHORT_LENGTH {
        return Err(DerError::LengthOverflow { length: declared });
    }
    let actual = der.len() - 2;
    if declared != actual {
        return Err(DerError::LengthMismatch { declared, actual });
    }

    let (r, offset) = read_integer(der, 2)?;
    let (s, offset) = read_integer(der, offset)?;

    if offset != der.len() {
        return Err(DerError::TrailingBytes {
            count: der.len() - offset,
        });
    }

    Ok((r, s))
}

/// Minimal big-endian magnitude, padded with `0x00` when the high bit is set.
fn integer_bytes(value: &BigUint) -> Vec<u8> {
    let magnitude = value.to_bytes_be();
    if magnitude[0] & 0x80 != 0 {
        let mut padded = Vec::with_capacity(magnitude.len() + 1);
        padded.push(0x00);
        padded.extend_from_slice(&magnitude);
        padded
    } else {
        magnitude
    }
}

/// Reads one `0x02 <len> <value>` triple starting at `offset`. Returns the
/// integer and the offset just past it.
fn read_integer(der: &[u8], offset: usize) -> Result<(BigUint, usize), DerError> {
    let tag = *der.get(offset).ok_or(DerError::Truncated { offset })?;
    if tag != DER_INTEGER_TAG {
        return Err(DerError::InvalidIntegerTag { offset, found: tag });
    }

    let length = *der
        .get(offset + 1)
        .ok_or(DerError::Truncated { offset: offset + 1 })? as usize;
    if length > DER_MAX_SHORT_LENGTH {
        return Err(DerError::LengthOverflow { length });
    }
    if length == 0 {
        return Err(DerError::EmptyInteger { offset });
    }

    let start = offset + 2;
    let available = der.len() - start;
    let value = der.get(start..start + length).ok_or(DerError::IntegerOverrun {
        offset,
        length,
        available,
    })?;

    // Negative, or a leading zero the value didn't need.
    let negative = value[0] & 0x80 != 0;
    let padded_needlessly = value.len() > 1 && value[0] == 0x00 && value[1] & 0x80 == 0;
    if negative || padded_needlessly {
        return Err(DerError::NonCanonicalInteger { offset });
    }

    Ok((BigUint::from_bytes_be(value), start + length))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(hex_str: &str) -> BigUint {
        BigUint::parse_bytes(hex_str.as_bytes(), 16).unwrap()
    }

    const SAMPLE: &str = "304402200a7834674f35d01159a7d99fc9af5243b1407b9b1ccb3a298fccb9099974f49302206530410f6b5e1cdba3e6d3f73e877aee556b1b1eda2417e91dd156276582b41a";

    #[test]
    fn test_encode_small_integers() {
        let der = encode(&BigUint::from(1u32), &BigUint::from(2u32)).unwrap();
        assert_eq!(der, vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x02]);
    }

    #[test]
    fn test_encode_pads_high_bit() {
        let der = encode(&BigUint::from(0x80u32), &BigUint::from(0x7Fu32)).unwrap();
        assert_eq!(
            der,
            vec![0x30, 0x07, 0x02, 0x02, 0x00, 0x80, 0x02, 0x01, 0x7F]
        );
    }

    #[test]
    fn test_encode_full_width_padded() {
        let n_minus_one =
            big("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140");
        let der = encode(&n_minus_one, &n_minus_one).unwrap();
        // 33-byte integers: 2 + 33 each, plus the sequence header.
        assert_eq!(der.len(), 72);
        assert_eq!(der[1], 70);
        assert_eq!(&der[2..5], &[0x02, 0x21, 0x00]);
    }

    #[test]
    fn test_encode_rejects_oversized_integers() {
        let huge = BigUint::from_bytes_be(&[0x01; 130]);
        assert!(matches!(
            encode(&huge, &BigUint::from(1u32)),
            Err(DerError::LengthOverflow { .. })
        ));
    }

    #[test]
    fn test_decode_known_signature() {
        let der = hex::decode(SAMPLE).unwrap();
        let (r, s) = decode(&der).unwrap();
        assert_eq!(
            r,
            big("0a7834674f35d01159a7d99fc9af5243b1407b9b1ccb3a298fccb9099974f493")
        );
        assert_eq!(
            s,
            big("6530410f6b5e1cdba3e6d3f73e877aee556b1b1eda2417e91dd156276582b41a")
        );
        assert_eq!(encode(&r, &s).unwrap(), der);
    }

    #[test]
    fn test_roundtrip_mixed_widths() {
        let cases = [
            (big("01"), big("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140")),
            (big("80"), big("7f")),
            (big("00ff00ff"), big("ff00ff00")),
            (
                big("7fffffffffffffffffffffffffffffff5d576e7357a4501ddfe92f46681b20a0"),
                big("8000000000000000000000000000000000000000000000000000000000000000"),
            ),
        ];
        for (r, s) in cases {
            let der = encode(&r, &s).unwrap();
            assert_eq!(decode(&der).unwrap(), (r, s));
        }
    }

    #[test]
    fn test_every_truncation_fails_cleanly() {
        let der = hex::decode(SAMPLE).unwrap();
        for len in 0..der.len() {
            assert!(decode(&der[..len]).is_err(), "truncated to {} bytes", len);
        }
    }

    #[test]
    fn test_truncation_with_patched_length_fails_cleanly() {
        // Keep the outer length consistent so the inner checks are reached.
        let der = hex::decode(SAMPLE).unwrap();
        for len in 2..der.len() {
            let mut cut = der[..len].to_vec();
            cut[1] = (len - 2) as u8;
            assert!(decode(&cut).is_err(), "patched truncation to {} bytes", len);
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(&[]), Err(DerError::Truncated { offset: 0 }));
        assert_eq!(decode(&[0x30]), Err(DerError::Truncated { offset: 1 }));
    }

    #[test]
    fn test_wrong_sequence_tag() {
        let mut der = hex::decode(SAMPLE).unwrap();
        der[0] = 0x31;
        assert_eq!(decode(&der), Err(DerError::InvalidSequenceTag { found: 0x31 }));
    }

    #[test]
    fn test_length_mismatch() {
        let mut der = hex::decode(SAMPLE).unwrap();
        der[1] = 0x43;
        assert_eq!(
            decode(&der),
            Err(DerError::LengthMismatch {
                declared: 0x43,
                actual: 0x44
            })
        );
    }

    #[test]
    fn test_long_form_length_rejected() {
        let der = [0x30, 0x81, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01];
        assert_eq!(decode(&der), Err(DerError::LengthOverflow { length: 0x81 }));
    }

    #[test]
    fn test_wrong_integer_tags() {
        let mut der = hex::decode(SAMPLE).unwrap();
        der[2] = 0x03;
        assert_eq!(
            decode(&der),
            Err(DerError::InvalidIntegerTag {
                offset: 2,
                found: 0x03
            })
        );

        let mut der = hex::decode(SAMPLE).unwrap();
        der[36] = 0x04;
        assert_eq!(
            decode(&der),
            Err(DerError::InvalidIntegerTag {
                offset: 36,
                found: 0x04
            })
        );
    }

    #[test]
    fn test_integer_overrun() {
        // r claims 5 bytes but the sequence only holds 4 after its header.
        let der = [0x30, 0x06, 0x02, 0x05, 0x01, 0x02, 0x01, 0x01];
        assert_eq!(
            decode(&der),
            Err(DerError::IntegerOverrun {
                offset: 2,
                length: 5,
                available: 4
            })
        );
    }

    #[test]
    fn test_empty_integer() {
        let der = [0x30, 0x05, 0x02, 0x00, 0x02, 0x01, 0x01];
        assert_eq!(decode(&der), Err(DerError::EmptyInteger { offset: 2 }));
    }

    #[test]
    fn test_non_canonical_integers() {
        // Unneeded leading zero on r.
        let padded = [0x30, 0x07, 0x02, 0x02, 0x00, 0x01, 0x02, 0x01, 0x01];
        assert_eq!(
            decode(&padded),
            Err(DerError::NonCanonicalInteger { offset: 2 })
        );

        // s with the sign bit set and no padding.
        let negative = [0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x80];
        assert_eq!(
            decode(&negative),
            Err(DerError::NonCanonicalInteger { offset: 5 })
        );
    }

    #[test]
    fn test_trailing_bytes() {
        let der = [0x30, 0x08, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01, 0xAA, 0xBB];
        assert_eq!(decode(&der), Err(DerError::TrailingBytes { count: 2 }));
    }
}
