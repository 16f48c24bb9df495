// Copyright (c) 2018-2025 The Umbra Foundation

//! Umbra CLSAG linkable ring signatures.
//!
//! This crate implements the signing and verification core used for
//! confidential transaction inputs: two-layer CLSAG signatures over stealth
//! addresses and amount commitments, and four-layer CLSAG signatures which
//! additionally bind an extended amount commitment on the auxiliary
//! generator X and a concealing point.
//!
//! The crate is purely functional: each sign or verify call owns its
//! transcript hasher, takes the caller's RNG, performs no I/O and keeps no
//! state between calls. Distinct calls may run concurrently.

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![allow(non_snake_case)]

extern crate alloc;

pub mod domain_separators;
mod ring_signature;

pub use crate::ring_signature::{
    generator_x, generators, hash_to_point, ClsagGG, ClsagGGXG, Commitment, CompressedCommitment,
    CompressedEdwardsY, CryptoRngCore, CurveScalar, EdwardsPoint, Error, KeyImage, PedersenGens,
    RingMemberGG, RingMemberGGXG, Scalar, TranscriptHasher, B_BLINDING,
};
