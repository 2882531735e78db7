//! # Curve Provider
//!
//! The signer, verifier, and identity factory never touch curve arithmetic
//! directly. They go through [`CurveProvider`], which exposes exactly the
//! operations ECDSA needs: multiply by the base point, multiply an arbitrary
//! point, add two points, read an X coordinate, and convert to and from the
//! SEC1 compressed encoding.
//!
//! Scalars cross this boundary as [`BigUint`] so that the ECDSA layer can do
//! its own modular arithmetic on R and S without caring how the curve
//! backend represents field elements.
//!
//! [`Secp256k1`] is the production provider, backed by the pure-Rust `k256`
//! crate. Its point multiplication is constant-time.

use k256::elliptic_curve::ff::PrimeField;
use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::point::AffineCoordinates;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ProjectivePoint, PublicKey as K256PublicKey, Scalar};
use num_bigint::BigUint;
use std::sync::OnceLock;
use thiserror::Error;

use crate::config::{COMPRESSED_PUBLIC_KEY_LENGTH, PRIVATE_KEY_LENGTH, SECP256K1_ORDER_HEX};

/// Errors from point encoding and decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurveError {
    #[error("bytes do not encode a point on the curve")]
    InvalidEncoding,

    #[error("point at infinity has no SEC1 encoding")]
    PointAtInfinity,
}

/// Point arithmetic over a prime-order curve, as consumed by ECDSA.
///
/// Implementations must be safe to share across threads: every method
/// takes `&self` and none of them mutate anything.
pub trait CurveProvider: Send + Sync {
    /// The backend's point representation.
    type Point: Clone;

    /// Order `N` of the base point.
    fn order(&self) -> &BigUint;

    /// The base point `G`.
    fn generator(&self) -> Self::Point;

    /// `k·P`. `k` is reduced modulo `N` first.
    fn scalar_multiply(&self, point: &Self::Point, k: &BigUint) -> Self::Point;

    /// `P + Q`.
    fn add_points(&self, a: &Self::Point, b: &Self::Point) -> Self::Point;

    /// Affine X coordinate, or `None` for the point at infinity.
    fn x_coordinate(&self, point: &Self::Point) -> Option<BigUint>;

    /// Parse a SEC1-encoded point. Fails on anything that isn't on the curve.
    fn decompress_point(&self, bytes: &[u8]) -> Result<Self::Point, CurveError>;

    /// SEC1 compressed encoding of a point.
    fn compress_point(
        &self,
        point: &Self::Point,
    ) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LENGTH], CurveError>;

    /// `k·G`.
    fn scalar_base_multiply(&self, k: &BigUint) -> Self::Point {
        self.scalar_multiply(&self.generator(), k)
    }
}

/// Order of the secp256k1 base point, parsed once.
pub fn secp256k1_order() -> &'static BigUint {
    static ORDER: OnceLock<BigUint> = OnceLock::new();
    ORDER.get_or_init(|| {
        BigUint::parse_bytes(SECP256K1_ORDER_HEX.as_bytes(), 16)
            .unwrap_or_else(|| unreachable!("curve order constant is valid hex"))
    })
}

/// secp256k1 backed by `k256`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1;

impl Secp256k1 {
    pub fn new() -> Self {
        Self
    }

    /// Converts an integer into a `k256` scalar, reducing modulo `N`.
    fn to_scalar(&self, k: &BigUint) -> Scalar {
        let reduced = (k % secp256k1_order()).to_bytes_be();
        let mut repr = [0u8; PRIVATE_KEY_LENGTH];
        repr[PRIVATE_KEY_LENGTH - reduced.len()..].copy_from_slice(&reduced);
        // Anything already reduced below N is a canonical representation.
        Option::from(Scalar::from_repr(repr.into())).unwrap_or(Scalar::ZERO)
    }
}

impl CurveProvider for Secp256k1 {
    type Point = ProjectivePoint;

    fn order(&self) -> &BigUint {
        secp256k1_order()
    }

    fn generator(&self) -> ProjectivePoint {
        ProjectivePoint::GENERATOR
    }

    fn scalar_multiply(&self, point: &ProjectivePoint, k: &BigUint) -> ProjectivePoint {
        *point * self.to_scalar(k)
    }

    fn add_points(&self, a: &ProjectivePoint, b: &ProjectivePoint) -> ProjectivePoint {
        *a + *b
    }

    fn x_coordinate(&self, point: &ProjectivePoint) -> Option<BigUint> {
        if bool::from(point.is_identity()) {
            return None;
        }
        Some(BigUint::from_bytes_be(&point.to_affine().x()))
    }

    fn decompress_point(&self, bytes: &[u8]) -> Result<ProjectivePoint, CurveError> {
        K256PublicKey::from_sec1_bytes(bytes)
            .map(|pk| pk.to_projective())
            .map_err(|_| CurveError::InvalidEncoding)
    }

    fn compress_point(
        &self,
        point: &ProjectivePoint,
    ) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LENGTH], CurveError> {
        if bool::from(point.is_identity()) {
            return Err(CurveError::PointAtInfinity);
        }
        let encoded = point.to_affine().to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
        out.copy_from_slice(encoded.as_bytes());
        Ok(out)
    }
}
