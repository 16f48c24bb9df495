// Copyright (c) 2018-2025 The Umbra Foundation

//! Errors which can occur in connection to CLSAG signatures

use displaydoc::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An error which can occur when signing or verifying a CLSAG
#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Error {
    /// Incorrect length for array copy, provided `{0}`, required `{1}`.
    LengthMismatch(usize, usize),

    /// Index out of bounds
    IndexOutOfBounds,

    /// Invalid curve point
    InvalidCurvePoint,

    /// The signature was not able to be validated
    InvalidSignature,

    /// Failed to compress/decompress a KeyImage
    InvalidKeyImage,

    /// Key image does not belong to the main subgroup
    KeyImageNotInMainSubgroup,

    /// Derived key image disagrees with the caller-provided one
    KeyImageMismatch,

    /// Invalid signing state
    InvalidState,
}
