// Copyright (c) 2018-2025 The Umbra Foundation

//! Four-layer CLSAG signatures over stealth addresses, amount commitments,
//! extended amount commitments and concealing points.
//!
//! This extends the two-layer construction with a second proof family under
//! the auxiliary generator X: at the undisclosed ring index the signer knows
//! the spend secret, the pseudo-output blinding relation, the opening of the
//! extended amount commitment on X, and the concealing-point secret. Layers
//! 0, 1 and 3 share the G family (one response vector), layer 2 forms the X
//! family (a second response vector).

use alloc::vec::Vec;

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    domain_separators::{
        CLSAG_GGXG_CHALLENGE_DOMAIN_TAG, CLSAG_GGXG_LAYER_0_DOMAIN_TAG,
        CLSAG_GGXG_LAYER_1_DOMAIN_TAG, CLSAG_GGXG_LAYER_2_DOMAIN_TAG,
        CLSAG_GGXG_LAYER_3_DOMAIN_TAG,
    },
    ring_signature::{
        generator_x, hash_to_point, inv_eight, Commitment, CompressedCommitment, CurveScalar,
        Error, KeyImage, Scalar, TranscriptHasher, B_BLINDING,
    },
};

/// A ring member of a four-layer CLSAG: the one-time spend key, the amount
/// commitment and the concealing point of the same output, in wire form.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct RingMemberGGXG {
    /// The one-time spend key of the output
    pub stealth_address: CompressedEdwardsY,
    /// The output's amount commitment, stored as its `P/8` representative
    pub amount_commitment: CompressedCommitment,
    /// The output's concealing point, stored as its `P/8` representative
    pub concealing_point: CompressedCommitment,
}

/// Four-layer CLSAG signature.
#[derive(Clone, Debug, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ClsagGGXG {
    /// The initial challenge `c[0]`.
    pub c_zero: CurveScalar,

    /// G-family responses `r_g[0], ..., r_g[ring_size-1]` (layers 0, 1, 3).
    pub responses_g: Vec<CurveScalar>,

    /// X-family responses `r_x[0], ..., r_x[ring_size-1]` (layer 2).
    pub responses_x: Vec<CurveScalar>,

    /// Auxiliary key image `K1 = (f/8) * Hp(P)` for the commitment layer.
    pub commitment_key_image: KeyImage,

    /// Auxiliary key image `K2 = (x_aux/8) * Hp(P)` for the extended layer.
    pub extended_key_image: KeyImage,

    /// Auxiliary key image `K3 = (q/8) * Hp(P)` for the concealing layer.
    pub concealing_key_image: KeyImage,
}

impl ClsagGGXG {
    /// Sign a ring of stealth addresses, amount commitments and concealing
    /// points.
    ///
    /// # Arguments
    /// * `message` - Message digest to be bound to the signature.
    /// * `ring` - The ring of candidate inputs, in wire form.
    /// * `real_index` - The index in the ring of the real input.
    /// * `pseudo_out_commitment` - The pseudo-output amount commitment, in
    ///   full-cofactor form.
    /// * `extended_commitment` - The extended amount commitment, in
    ///   full-cofactor form.
    /// * `key_image` - The expected key image of the real input.
    /// * `spend_secret` - The real input's spend secret `x_p`, `P = x_p * G`.
    /// * `commitment_secret` - The blinding difference `f` satisfying
    ///   `8 * amount_commitment[real_index] - pseudo_out = f * G`.
    /// * `extended_secret` - The opening `x_aux` of the extended commitment
    ///   on X: `extended - 8 * amount_commitment[real_index] -
    ///   8 * concealing_point[real_index] = x_aux * X`.
    /// * `concealing_secret` - The secret `q` satisfying
    ///   `8 * concealing_point[real_index] = q * G`.
    /// * `rng` - Cryptographic RNG.
    pub fn sign(
        message: &[u8; 32],
        ring: &[RingMemberGGXG],
        real_index: usize,
        pseudo_out_commitment: &Commitment,
        extended_commitment: &Commitment,
        key_image: &KeyImage,
        spend_secret: &Scalar,
        commitment_secret: &Scalar,
        extended_secret: &Scalar,
        concealing_secret: &Scalar,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<Self, Error> {
        let ring_size = ring.len();

        if real_index >= ring_size {
            return Err(Error::IndexOutOfBounds);
        }

        let G = B_BLINDING;
        let X = generator_x();
        let D = pseudo_out_commitment.point;
        let E = extended_commitment.point;

        // Pre-decompress ring
        let mut decompressed_ring: Vec<(EdwardsPoint, Commitment, Commitment)> =
            Vec::with_capacity(ring_size);
        for member in ring {
            let P = member
                .stealth_address
                .decompress()
                .ok_or(Error::InvalidCurvePoint)?;
            let A = Commitment::try_from(&member.amount_commitment)?;
            let Q = Commitment::try_from(&member.concealing_point)?;
            decompressed_ring.push((P, A, Q));
        }

        // Key image: I = x_p * Hp(P), checked against the caller's claim
        let Hp_real = hash_to_point(&ring[real_index].stealth_address);
        let I = spend_secret * Hp_real;
        if I.compress() != key_image.point {
            return Err(Error::KeyImageMismatch);
        }

        // Auxiliary key images, transmitted in their K/8 form
        let K1_div8 = (inv_eight() * commitment_secret) * Hp_real;
        let commitment_key_image = KeyImage {
            point: K1_div8.compress(),
        };
        let K1 = K1_div8.mul_by_cofactor();

        let K2_div8 = (inv_eight() * extended_secret) * Hp_real;
        let extended_key_image = KeyImage {
            point: K2_div8.compress(),
        };
        let K2 = K2_div8.mul_by_cofactor();

        let K3_div8 = (inv_eight() * concealing_secret) * Hp_real;
        let concealing_key_image = KeyImage {
            point: K3_div8.compress(),
        };
        let K3 = K3_div8.mul_by_cofactor();

        // Ring-wide input digest
        let mut hasher = TranscriptHasher::with_capacity(4 + 3 * ring_size);
        let pseudo_out_compressed = CompressedCommitment::from(pseudo_out_commitment);
        let extended_compressed = CompressedCommitment::from(extended_commitment);
        let input_hash = compute_input_hash(
            &mut hasher,
            message,
            ring,
            &pseudo_out_compressed,
            &extended_compressed,
            key_image,
        );

        // Aggregation coefficients, one per layer
        let mu_P =
            aggregation_coefficient(&mut hasher, &CLSAG_GGXG_LAYER_0_DOMAIN_TAG, &input_hash);
        let mu_C =
            aggregation_coefficient(&mut hasher, &CLSAG_GGXG_LAYER_1_DOMAIN_TAG, &input_hash);
        let mu_X =
            aggregation_coefficient(&mut hasher, &CLSAG_GGXG_LAYER_2_DOMAIN_TAG, &input_hash);
        let mu_Q =
            aggregation_coefficient(&mut hasher, &CLSAG_GGXG_LAYER_3_DOMAIN_TAG, &input_hash);

        // Aggregated public keys: layers 0, 1, 3 form the G family, layer 2
        // the X family.
        let mut W_g: Vec<EdwardsPoint> = Vec::with_capacity(ring_size);
        let mut W_x: Vec<EdwardsPoint> = Vec::with_capacity(ring_size);
        for (P_i, A_i, Q_i) in &decompressed_ring {
            W_g.push(mu_P * P_i + mu_C * (A_i.point - D) + mu_Q * Q_i.point);
            W_x.push(mu_X * (E - A_i.point - Q_i.point));
        }

        // Aggregated secret keys, per family
        let w_secret_g = mu_P * spend_secret + mu_C * commitment_secret + mu_Q * concealing_secret;
        let w_secret_x = mu_X * extended_secret;

        // Aggregated key images; K2 contributes only to the X family
        let W_KI_g = mu_P * I + mu_C * K1 + mu_Q * K3;
        let W_KI_x = mu_X * K2;

        // Initial commitment at the real index, one nonce per family
        let alpha_g = Scalar::random(rng);
        let alpha_x = Scalar::random(rng);
        hasher.append_raw(&CLSAG_GGXG_CHALLENGE_DOMAIN_TAG);
        hasher.append_raw(&input_hash);
        hasher.append_point(&(alpha_g * G).compress());
        hasher.append_point(&(alpha_g * Hp_real).compress());
        hasher.append_point(&(alpha_x * X).compress());
        hasher.append_point(&(alpha_x * Hp_real).compress());
        let mut c_prev = hasher.finalize_scalar(); // c[real_index + 1]

        // Random responses for the decoys
        let mut responses_g: Vec<CurveScalar> =
            alloc::vec![CurveScalar::from(Scalar::ZERO); ring_size];
        let mut responses_x: Vec<CurveScalar> =
            alloc::vec![CurveScalar::from(Scalar::ZERO); ring_size];
        for i in 0..ring_size {
            if i != real_index {
                responses_g[i] = CurveScalar::from(Scalar::random(rng));
                responses_x[i] = CurveScalar::from(Scalar::random(rng));
            }
        }

        // Go around the ring from real_index + 1 back to real_index
        let mut c_zero: Option<Scalar> = None;
        for n in 1..ring_size {
            let i = (real_index + n) % ring_size;
            if i == 0 {
                c_zero = Some(c_prev);
            }

            let s_g = responses_g[i].scalar;
            let s_x = responses_x[i].scalar;
            let Hp_i = hash_to_point(&ring[i].stealth_address);

            hasher.append_raw(&CLSAG_GGXG_CHALLENGE_DOMAIN_TAG);
            hasher.append_raw(&input_hash);
            hasher.append_point(&(s_g * G + c_prev * W_g[i]).compress());
            hasher.append_point(&(s_g * Hp_i + c_prev * W_KI_g).compress());
            hasher.append_point(&(s_x * X + c_prev * W_x[i]).compress());
            hasher.append_point(&(s_x * Hp_i + c_prev * W_KI_x).compress());
            c_prev = hasher.finalize_scalar(); // c[i + 1]
        }

        if real_index == 0 {
            debug_assert!(c_zero.is_none());
            c_zero = Some(c_prev);
        }
        let c_zero = c_zero.ok_or(Error::InvalidState)?;

        // Close the loop in both families
        responses_g[real_index] = CurveScalar::from(alpha_g - c_prev * w_secret_g);
        responses_x[real_index] = CurveScalar::from(alpha_x - c_prev * w_secret_x);

        Ok(ClsagGGXG {
            c_zero: CurveScalar::from(c_zero),
            responses_g,
            responses_x,
            commitment_key_image,
            extended_key_image,
            concealing_key_image,
        })
    }

    /// Verify a four-layer CLSAG signature.
    ///
    /// # Arguments
    /// * `message` - Message digest that was signed.
    /// * `ring` - The ring of candidate inputs, in wire form.
    /// * `pseudo_out_commitment` - The pseudo-output amount commitment, in
    ///   wire form.
    /// * `extended_commitment` - The extended amount commitment, in wire
    ///   form.
    /// * `key_image` - The key image spent by this signature.
    pub fn verify(
        &self,
        message: &[u8; 32],
        ring: &[RingMemberGGXG],
        pseudo_out_commitment: &CompressedCommitment,
        extended_commitment: &CompressedCommitment,
        key_image: &KeyImage,
    ) -> Result<(), Error> {
        let ring_size = ring.len();

        if ring_size == 0 {
            return Err(Error::IndexOutOfBounds);
        }

        if self.responses_g.len() != ring_size {
            return Err(Error::LengthMismatch(self.responses_g.len(), ring_size));
        }

        if self.responses_x.len() != ring_size {
            return Err(Error::LengthMismatch(self.responses_x.len(), ring_size));
        }

        let G = B_BLINDING;
        let X = generator_x();

        // The key image must lie in the main subgroup
        let I = key_image.decompress_checked()?;

        // Lift the wire commitments and auxiliary images to full-cofactor
        // form
        let D = Commitment::try_from(pseudo_out_commitment)?.point;
        let E = Commitment::try_from(extended_commitment)?.point;
        let K1 = self
            .commitment_key_image
            .point
            .decompress()
            .ok_or(Error::InvalidKeyImage)?
            .mul_by_cofactor();
        let K2 = self
            .extended_key_image
            .point
            .decompress()
            .ok_or(Error::InvalidKeyImage)?
            .mul_by_cofactor();
        let K3 = self
            .concealing_key_image
            .point
            .decompress()
            .ok_or(Error::InvalidKeyImage)?
            .mul_by_cofactor();

        // Pre-decompress ring
        let mut decompressed_ring: Vec<(EdwardsPoint, Commitment, Commitment)> =
            Vec::with_capacity(ring_size);
        for member in ring {
            let P = member
                .stealth_address
                .decompress()
                .ok_or(Error::InvalidCurvePoint)?;
            let A = Commitment::try_from(&member.amount_commitment)?;
            let Q = Commitment::try_from(&member.concealing_point)?;
            decompressed_ring.push((P, A, Q));
        }

        // Recompute the ring-wide input digest and the coefficients
        let mut hasher = TranscriptHasher::with_capacity(4 + 3 * ring_size);
        let input_hash = compute_input_hash(
            &mut hasher,
            message,
            ring,
            pseudo_out_commitment,
            extended_commitment,
            key_image,
        );
        let mu_P =
            aggregation_coefficient(&mut hasher, &CLSAG_GGXG_LAYER_0_DOMAIN_TAG, &input_hash);
        let mu_C =
            aggregation_coefficient(&mut hasher, &CLSAG_GGXG_LAYER_1_DOMAIN_TAG, &input_hash);
        let mu_X =
            aggregation_coefficient(&mut hasher, &CLSAG_GGXG_LAYER_2_DOMAIN_TAG, &input_hash);
        let mu_Q =
            aggregation_coefficient(&mut hasher, &CLSAG_GGXG_LAYER_3_DOMAIN_TAG, &input_hash);

        let mut W_g: Vec<EdwardsPoint> = Vec::with_capacity(ring_size);
        let mut W_x: Vec<EdwardsPoint> = Vec::with_capacity(ring_size);
        for (P_i, A_i, Q_i) in &decompressed_ring {
            W_g.push(mu_P * P_i + mu_C * (A_i.point - D) + mu_Q * Q_i.point);
            W_x.push(mu_X * (E - A_i.point - Q_i.point));
        }
        let W_KI_g = mu_P * I + mu_C * K1 + mu_Q * K3;
        let W_KI_x = mu_X * K2;

        // Recompute the challenge chain from c[0]
        let mut c_prev = self.c_zero.scalar;
        for i in 0..ring_size {
            let s_g = self.responses_g[i].scalar;
            let s_x = self.responses_x[i].scalar;
            let Hp_i = hash_to_point(&ring[i].stealth_address);

            hasher.append_raw(&CLSAG_GGXG_CHALLENGE_DOMAIN_TAG);
            hasher.append_raw(&input_hash);
            hasher.append_point(&(s_g * G + c_prev * W_g[i]).compress());
            hasher.append_point(&(s_g * Hp_i + c_prev * W_KI_g).compress());
            hasher.append_point(&(s_x * X + c_prev * W_x[i]).compress());
            hasher.append_point(&(s_x * Hp_i + c_prev * W_KI_x).compress());
            c_prev = hasher.finalize_scalar(); // c[i + 1]
        }

        // Check that we closed the loop
        if c_prev == self.c_zero.scalar {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }

    /// The wire encoding:
    /// `c || r_g[0..ring_size-1] || r_x[0..ring_size-1] || K1 || K2 || K3`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32 * (2 * self.responses_g.len() + 4));
        bytes.extend_from_slice(self.c_zero.as_bytes());
        for response in &self.responses_g {
            bytes.extend_from_slice(response.as_bytes());
        }
        for response in &self.responses_x {
            bytes.extend_from_slice(response.as_bytes());
        }
        bytes.extend_from_slice(self.commitment_key_image.as_bytes());
        bytes.extend_from_slice(self.extended_key_image.as_bytes());
        bytes.extend_from_slice(self.concealing_key_image.as_bytes());
        bytes
    }
}

impl TryFrom<&[u8]> for ClsagGGXG {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Error> {
        // c + 2 * ring_size responses + 3 auxiliary images
        if src.len() % 32 != 0 || src.len() < 192 || (src.len() / 32) % 2 != 0 {
            return Err(Error::LengthMismatch(src.len(), 192));
        }
        let ring_size = (src.len() / 32 - 4) / 2;

        let chunk = |index: usize| -> [u8; 32] {
            let mut out = [0u8; 32];
            out.copy_from_slice(&src[index * 32..(index + 1) * 32]);
            out
        };

        let c_zero = CurveScalar::from(&chunk(0));
        let mut responses_g = Vec::with_capacity(ring_size);
        for i in 0..ring_size {
            responses_g.push(CurveScalar::from(&chunk(1 + i)));
        }
        let mut responses_x = Vec::with_capacity(ring_size);
        for i in 0..ring_size {
            responses_x.push(CurveScalar::from(&chunk(1 + ring_size + i)));
        }
        let commitment_key_image = KeyImage::try_from(chunk(1 + 2 * ring_size))?;
        let extended_key_image = KeyImage::try_from(chunk(2 + 2 * ring_size))?;
        let concealing_key_image = KeyImage::try_from(chunk(3 + 2 * ring_size))?;

        Ok(Self {
            c_zero,
            responses_g,
            responses_x,
            commitment_key_image,
            extended_key_image,
            concealing_key_image,
        })
    }
}

/// Digest of the ring-wide inputs: the message, every ring member's fields
/// in declared order, the pseudo-output and extended commitments in wire
/// form, and the key image.
fn compute_input_hash(
    hasher: &mut TranscriptHasher,
    message: &[u8; 32],
    ring: &[RingMemberGGXG],
    pseudo_out_commitment: &CompressedCommitment,
    extended_commitment: &CompressedCommitment,
    key_image: &KeyImage,
) -> [u8; 32] {
    hasher.append_raw(message);
    for member in ring {
        hasher.append_point(&member.stealth_address);
        hasher.append_point(&member.amount_commitment.point);
        hasher.append_point(&member.concealing_point.point);
    }
    hasher.append_point(&pseudo_out_commitment.point);
    hasher.append_point(&extended_commitment.point);
    hasher.append_point(&key_image.point);
    hasher.finalize_raw()
}

/// Aggregation coefficient for one layer: the layer tag and the input hash
/// hashed to a scalar.
fn aggregation_coefficient(
    hasher: &mut TranscriptHasher,
    layer_tag: &[u8; 32],
    input_hash: &[u8; 32],
) -> Scalar {
    hasher.append_raw(layer_tag);
    hasher.append_raw(input_hash);
    hasher.finalize_scalar()
}
