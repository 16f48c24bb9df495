// Copyright (c) 2018-2025 The Umbra Foundation

//! Pedersen commitments and their on-wire encoding.
//!
//! Arithmetic uses the full-cofactor point; the wire format stores the
//! `P/8` representative. The two conversions below are the only place the
//! `*8` / `*(1/8)` adjustment happens, so signer and verifier cannot drift.

use core::fmt;

use super::{inv_eight, Error, PedersenGens, Scalar};
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Pedersen commitment in full-cofactor form, as used in arithmetic.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Commitment {
    /// A Pedersen commitment `v*B + b*B_blinding` to a quantity `v` with
    /// blinding `b`
    pub point: EdwardsPoint,
}

impl Commitment {
    /// Create a new commitment from value, blinding factor, and Pedersen
    /// generators
    pub fn new(value: u64, blinding: Scalar, generator: &PedersenGens) -> Self {
        Self {
            point: generator.commit(Scalar::from(value), blinding),
        }
    }
}

impl TryFrom<&CompressedCommitment> for Commitment {
    type Error = Error;

    /// Decompress a wire commitment and lift it back to full-cofactor form.
    fn try_from(src: &CompressedCommitment) -> Result<Self, Self::Error> {
        let point = src
            .point
            .decompress()
            .ok_or(Error::InvalidCurvePoint)?
            .mul_by_cofactor();
        Ok(Self { point })
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({:?})", self.point.compress())
    }
}

/// A Pedersen commitment in compressed on-wire form, storing the `P/8`
/// representative of the full-cofactor point.
#[derive(Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct CompressedCommitment {
    /// The compressed `P/8` representative
    pub point: CompressedEdwardsY,
}

impl CompressedCommitment {
    /// Create a new compressed commitment from value, blinding factor, and
    /// Pedersen generators
    pub fn new(value: u64, blinding: Scalar, generator: &PedersenGens) -> Self {
        Self::from(&Commitment::new(value, blinding, generator))
    }

    /// View the underlying compressed point as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.point.as_bytes()
    }
}

impl From<&Commitment> for CompressedCommitment {
    fn from(src: &Commitment) -> Self {
        Self {
            point: (inv_eight() * src.point).compress(),
        }
    }
}

impl From<&[u8; 32]> for CompressedCommitment {
    fn from(src: &[u8; 32]) -> Self {
        Self {
            point: CompressedEdwardsY(*src),
        }
    }
}

impl AsRef<[u8; 32]> for CompressedCommitment {
    fn as_ref(&self) -> &[u8; 32] {
        self.point.as_bytes()
    }
}

impl fmt::Debug for CompressedCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompressedCommitment(")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}
