// Copyright (c) 2018-2025 The Umbra Foundation

use core::fmt;

use super::{hash_to_point, Error, Scalar, B_BLINDING};
use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    traits::Identity,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

/// The "image" of a private key `x`: I = x * Hp(x * G) = x * Hp(P).
///
/// The same type carries the auxiliary images transmitted inside a
/// signature; those are stored in their on-wire `P/8` form.
#[derive(Clone, Copy, Eq, Hash, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct KeyImage {
    /// The curve point corresponding to the key image
    pub point: CompressedEdwardsY,
}

impl KeyImage {
    /// View the underlying `CompressedEdwardsY` as an array of bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.point.as_bytes()
    }

    /// Copies `self` into a new Vec.
    pub fn to_vec(&self) -> alloc::vec::Vec<u8> {
        self.point.as_bytes().to_vec()
    }

    /// Derives the key image of `spend_secret` for the given stealth
    /// address: I = x * Hp(P).
    pub fn derive(spend_secret: &Scalar, stealth_address: &CompressedEdwardsY) -> Self {
        let Hp = hash_to_point(stealth_address);
        Self {
            point: (spend_secret * Hp).compress(),
        }
    }

    /// Decompresses the key image, rejecting encodings which do not lie in
    /// the main subgroup.
    pub fn decompress_checked(&self) -> Result<EdwardsPoint, Error> {
        let point = self.point.decompress().ok_or(Error::InvalidKeyImage)?;
        if !point.is_torsion_free() {
            return Err(Error::KeyImageNotInMainSubgroup);
        }
        Ok(point)
    }
}

impl Default for KeyImage {
    fn default() -> Self {
        Self {
            point: CompressedEdwardsY::identity(),
        }
    }
}

impl From<&Scalar> for KeyImage {
    fn from(spend_secret: &Scalar) -> Self {
        let P = (spend_secret * B_BLINDING).compress();
        Self::derive(spend_secret, &P)
    }
}

// Many tests use this
impl From<u64> for KeyImage {
    fn from(n: u64) -> Self {
        Self::from(&Scalar::from(n))
    }
}

impl From<EdwardsPoint> for KeyImage {
    fn from(point: EdwardsPoint) -> Self {
        Self {
            point: point.compress(),
        }
    }
}

impl TryFrom<[u8; 32]> for KeyImage {
    type Error = Error;
    fn try_from(src: [u8; 32]) -> Result<Self, Self::Error> {
        Ok(Self {
            point: CompressedEdwardsY(src),
        })
    }
}

impl TryFrom<&[u8]> for KeyImage {
    type Error = Error;
    fn try_from(src: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; 32] = src
            .try_into()
            .map_err(|_e| Error::LengthMismatch(src.len(), 32))?;
        Self::try_from(bytes)
    }
}

impl AsRef<CompressedEdwardsY> for KeyImage {
    fn as_ref(&self) -> &CompressedEdwardsY {
        &self.point
    }
}

impl AsRef<[u8; 32]> for KeyImage {
    fn as_ref(&self) -> &[u8; 32] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for KeyImage {
    fn as_ref(&self) -> &[u8] {
        &self.as_bytes()[..]
    }
}

impl PartialOrd for KeyImage {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for KeyImage {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl fmt::Debug for KeyImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyImage(")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for KeyImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
