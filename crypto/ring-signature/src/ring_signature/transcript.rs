// Copyright (c) 2018-2025 The Umbra Foundation

//! Fiat-Shamir transcript hashing for CLSAG signatures.
//!
//! A single hasher instance accompanies a whole sign or verify call. Items
//! are appended as 32-byte chunks; finalizing computes the Keccak-256 digest
//! of the chunks accumulated since the previous finalize and drains them, so
//! the next append starts the next transcript segment. The ring-wide input
//! hash uses the raw digest; challenges and aggregation coefficients use the
//! digest reduced modulo the group order.
//!
//! Signer and verifier must feed byte-identical segments in the same order;
//! any reordering produces signatures that do not verify.

use alloc::vec::Vec;
use curve25519_dalek::{edwards::CompressedEdwardsY, scalar::Scalar};
use sha3::{Digest, Keccak256};

/// Accumulates 32-byte transcript items and hashes them into challenges.
pub struct TranscriptHasher {
    buf: Vec<u8>,
}

impl TranscriptHasher {
    /// Create a hasher with room for `num_items` 32-byte items.
    pub fn with_capacity(num_items: usize) -> Self {
        Self {
            buf: Vec::with_capacity(num_items * 32),
        }
    }

    /// Append a scalar in its canonical 32-byte little-endian encoding.
    pub fn append_scalar(&mut self, scalar: &Scalar) {
        self.buf.extend_from_slice(scalar.as_bytes());
    }

    /// Append a point in its canonical 32-byte compressed encoding.
    pub fn append_point(&mut self, point: &CompressedEdwardsY) {
        self.buf.extend_from_slice(point.as_bytes());
    }

    /// Append a raw 32-byte chunk: a domain tag, a message digest, or a
    /// previously produced input hash.
    pub fn append_raw(&mut self, bytes: &[u8; 32]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Digest of the current segment without reduction. Drains the segment.
    pub fn finalize_raw(&mut self) -> [u8; 32] {
        let digest: [u8; 32] = Keccak256::digest(&self.buf).into();
        self.buf.clear();
        digest
    }

    /// Digest of the current segment reduced modulo the group order. Drains
    /// the segment.
    pub fn finalize_scalar(&mut self) -> Scalar {
        Scalar::from_bytes_mod_order(self.finalize_raw())
    }
}
