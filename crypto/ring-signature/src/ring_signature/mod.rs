// Copyright (c) 2018-2025 The Umbra Foundation

//! Umbra linkable ring signatures
//!
//! Two CLSAG variants over the Ed25519 curve: a two-layer signature binding
//! a stealth address and an amount commitment, and a four-layer extension
//! which additionally binds an extended amount commitment (on the auxiliary
//! generator X) and a concealing point.

pub use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
};
pub use rand_core::CryptoRngCore;

use curve25519_dalek::{
    constants::ED25519_BASEPOINT_POINT,
    traits::{IsIdentity, MultiscalarMul},
};
use sha3::{Digest, Keccak256};

use crate::domain_separators::{GENERATOR_X_DOMAIN_TAG, HASH_TO_POINT_DOMAIN_TAG};

mod clsag_gg;
mod clsag_ggxg;
mod commitment;
mod curve_scalar;
mod error;
mod key_image;
mod transcript;

pub use clsag_gg::{ClsagGG, RingMemberGG};
pub use clsag_ggxg::{ClsagGGXG, RingMemberGGXG};
pub use commitment::{Commitment, CompressedCommitment};
pub use curve_scalar::CurveScalar;
pub use error::Error;
pub use key_image::KeyImage;
pub use transcript::TranscriptHasher;

/// The base point for blinding factors used with all amount commitments
pub const B_BLINDING: EdwardsPoint = ED25519_BASEPOINT_POINT;

/// The scalar 1/8, used to produce the on-wire representative of a
/// full-cofactor point.
pub(crate) fn inv_eight() -> Scalar {
    Scalar::from(8u64).invert()
}

/// This is a structure which contains a pair of orthogonal generators for
/// Pedersen commitments.
#[derive(Clone, Copy, Debug)]
pub struct PedersenGens {
    /// Base point corresponding to the value of a Pedersen commitment
    pub B: EdwardsPoint,
    /// Base point corresponding to the blinding factor of a Pedersen
    /// commitment
    pub B_blinding: EdwardsPoint,
}

impl PedersenGens {
    /// Creates a Pedersen commitment using the value scalar and a blinding
    /// factor.
    pub fn commit(&self, value: Scalar, blinding: Scalar) -> EdwardsPoint {
        EdwardsPoint::multiscalar_mul(&[value, blinding], &[self.B, self.B_blinding])
    }
}

/// Generators (base points) for Pedersen commitments to amounts.
///
/// For commitment to amount 'v' with blinding 'b', we want 'C = v*B + b*G'
/// so commitments to zero are signed on G, where G is the Ed25519 basepoint.
pub fn generators() -> PedersenGens {
    PedersenGens {
        B: hash_to_point(&ED25519_BASEPOINT_POINT.compress()),
        B_blinding: B_BLINDING,
    }
}

/// The auxiliary generator X, carrying the extended-commitment layer.
///
/// Derived from the basepoint encoding under its own domain tag; in the
/// main subgroup by construction, with no known discrete log relation to G.
pub fn generator_x() -> EdwardsPoint {
    point_from_hash(GENERATOR_X_DOMAIN_TAG, ED25519_BASEPOINT_POINT.compress().as_bytes())
}

/// Applies a hash function to a stealth address and returns a point in the
/// main subgroup, used as the per-key base for linkability.
pub fn hash_to_point(stealth_address: &CompressedEdwardsY) -> EdwardsPoint {
    point_from_hash(HASH_TO_POINT_DOMAIN_TAG, stealth_address.as_bytes())
}

/// Maps a seed hash onto the main subgroup: rehash with a counter until the
/// candidate decompresses, then clear the cofactor. The identity is rejected
/// so the result is a generator of the main subgroup.
fn point_from_hash(tag: &[u8], bytes: &[u8]) -> EdwardsPoint {
    let mut hasher = Keccak256::new();
    hasher.update(tag);
    hasher.update(bytes);
    let seed: [u8; 32] = hasher.finalize().into();

    let mut counter = 0u64;
    loop {
        let mut hasher = Keccak256::new();
        hasher.update(seed);
        hasher.update(counter.to_le_bytes());
        let candidate: [u8; 32] = hasher.finalize().into();

        if let Some(point) = CompressedEdwardsY(candidate).decompress() {
            let point = point.mul_by_cofactor();
            if !point.is_identity() {
                return point;
            }
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator0() {
        assert_eq!(
            generators().B,
            hash_to_point(&ED25519_BASEPOINT_POINT.compress())
        )
    }

    #[test]
    fn test_hash_to_point_is_deterministic_and_torsion_free() {
        let stealth = (Scalar::from(7u64) * B_BLINDING).compress();
        let a = hash_to_point(&stealth);
        let b = hash_to_point(&stealth);
        assert_eq!(a, b);
        assert!(a.is_torsion_free());
        assert!(!a.is_identity());
    }

    #[test]
    fn test_distinct_keys_hash_to_distinct_points() {
        let a = hash_to_point(&(Scalar::from(1u64) * B_BLINDING).compress());
        let b = hash_to_point(&(Scalar::from(2u64) * B_BLINDING).compress());
        assert_ne!(a, b);
    }

    #[test]
    fn test_generator_x_is_independent() {
        let x = generator_x();
        assert!(x.is_torsion_free());
        assert_ne!(x, B_BLINDING);
        assert_ne!(x, generators().B);
    }

    #[test]
    fn test_inv_eight_inverts_cofactor_clearing() {
        let point = generators().B;
        assert_eq!((inv_eight() * point).mul_by_cofactor(), point);
    }
}
