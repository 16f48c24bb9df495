// Copyright (c) 2018-2025 The Umbra Foundation

//! Two-layer CLSAG (Concise Linkable Spontaneous Anonymous Group)
//! signatures over stealth addresses and amount commitments.
//!
//! A signature proves, for one undisclosed ring index, knowledge of the
//! spend secret of the stealth address and of the blinding relation between
//! that member's amount commitment and the pseudo-output commitment, with a
//! single response scalar per ring member.
//!
//! Reference: "Concise Linkable Ring Signatures and Forgery Against
//! Adversarial Keys" https://eprint.iacr.org/2019/654
//!
//! The two layers are aggregated with coefficients drawn from a running
//! transcript. Every challenge in the ring loop hashes the same ring-wide
//! input digest, so the whole ring, the pseudo-output and the key image are
//! bound into each round.

use alloc::vec::Vec;

use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    domain_separators::{
        CLSAG_GG_CHALLENGE_DOMAIN_TAG, CLSAG_GG_LAYER_0_DOMAIN_TAG, CLSAG_GG_LAYER_1_DOMAIN_TAG,
    },
    ring_signature::{
        hash_to_point, inv_eight, Commitment, CompressedCommitment, CurveScalar, Error, KeyImage,
        Scalar, TranscriptHasher, B_BLINDING,
    },
};

/// A ring member of a two-layer CLSAG: a one-time spend key and the amount
/// commitment of the same output, both in wire form.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct RingMemberGG {
    /// The one-time spend key of the output
    pub stealth_address: CompressedEdwardsY,
    /// The output's amount commitment, stored as its `P/8` representative
    pub amount_commitment: CompressedCommitment,
}

/// Two-layer CLSAG signature for a ring of stealth addresses and amount
/// commitments.
#[derive(Clone, Debug, Eq, PartialEq, Zeroize)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ClsagGG {
    /// The initial challenge `c[0]`.
    pub c_zero: CurveScalar,

    /// Responses `r[0], r[1], ..., r[ring_size-1]`.
    pub responses: Vec<CurveScalar>,

    /// Auxiliary key image `K1 = (f/8) * Hp(P)` for the commitment layer,
    /// stored in its `P/8` wire form.
    pub commitment_key_image: KeyImage,
}

impl ClsagGG {
    /// Sign a ring of stealth addresses and amount commitments.
    ///
    /// # Arguments
    /// * `message` - Message digest to be bound to the signature.
    /// * `ring` - The ring of candidate inputs, in wire form.
    /// * `real_index` - The index in the ring of the real input.
    /// * `pseudo_out_commitment` - The pseudo-output amount commitment, in
    ///   full-cofactor form.
    /// * `key_image` - The expected key image of the real input.
    /// * `spend_secret` - The real input's spend secret `x`, `P = x * G`.
    /// * `commitment_secret` - The blinding difference `f` satisfying
    ///   `8 * amount_commitment[real_index] - pseudo_out = f * G`.
    /// * `rng` - Cryptographic RNG.
    pub fn sign(
        message: &[u8; 32],
        ring: &[RingMemberGG],
        real_index: usize,
        pseudo_out_commitment: &Commitment,
        key_image: &KeyImage,
        spend_secret: &Scalar,
        commitment_secret: &Scalar,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<Self, Error> {
        let ring_size = ring.len();

        if real_index >= ring_size {
            return Err(Error::IndexOutOfBounds);
        }

        let G = B_BLINDING;
        let D = pseudo_out_commitment.point;

        // Pre-decompress ring
        let mut decompressed_ring: Vec<(EdwardsPoint, Commitment)> =
            Vec::with_capacity(ring_size);
        for member in ring {
            let P = member
                .stealth_address
                .decompress()
                .ok_or(Error::InvalidCurvePoint)?;
            let A = Commitment::try_from(&member.amount_commitment)?;
            decompressed_ring.push((P, A));
        }

        // Key image: I = x * Hp(P), checked against the caller's claim
        let Hp_real = hash_to_point(&ring[real_index].stealth_address);
        let I = spend_secret * Hp_real;
        if I.compress() != key_image.point {
            return Err(Error::KeyImageMismatch);
        }

        // Auxiliary key image for the commitment layer, transmitted as K1/8
        let K1_div8 = (inv_eight() * commitment_secret) * Hp_real;
        let commitment_key_image = KeyImage {
            point: K1_div8.compress(),
        };
        let K1 = K1_div8.mul_by_cofactor();

        // Ring-wide input digest
        let mut hasher = TranscriptHasher::with_capacity(3 + 2 * ring_size);
        let pseudo_out_compressed = CompressedCommitment::from(pseudo_out_commitment);
        let input_hash = compute_input_hash(
            &mut hasher,
            message,
            ring,
            &pseudo_out_compressed,
            key_image,
        );

        // Aggregation coefficients mu_P and mu_C
        let mu_P =
            aggregation_coefficient(&mut hasher, &CLSAG_GG_LAYER_0_DOMAIN_TAG, &input_hash);
        let mu_C =
            aggregation_coefficient(&mut hasher, &CLSAG_GG_LAYER_1_DOMAIN_TAG, &input_hash);

        // Aggregated public key per ring index: W = mu_P * P + mu_C * (A - D)
        let mut W: Vec<EdwardsPoint> = Vec::with_capacity(ring_size);
        for (P_i, A_i) in &decompressed_ring {
            W.push(mu_P * P_i + mu_C * (A_i.point - D));
        }

        // Aggregated secret key and aggregated key image
        let w_secret = mu_P * spend_secret + mu_C * commitment_secret;
        let W_KI = mu_P * I + mu_C * K1;

        // Initial commitment at the real index
        let alpha = Scalar::random(rng);
        hasher.append_raw(&CLSAG_GG_CHALLENGE_DOMAIN_TAG);
        hasher.append_raw(&input_hash);
        hasher.append_point(&(alpha * G).compress());
        hasher.append_point(&(alpha * Hp_real).compress());
        let mut c_prev = hasher.finalize_scalar(); // c[real_index + 1]

        // Random responses for the decoys
        let mut responses: Vec<CurveScalar> =
            alloc::vec![CurveScalar::from(Scalar::ZERO); ring_size];
        for i in 0..ring_size {
            if i != real_index {
                responses[i] = CurveScalar::from(Scalar::random(rng));
            }
        }

        // Go around the ring from real_index + 1 back to real_index. The
        // challenge at ring index 0 is the one the signature transmits.
        let mut c_zero: Option<Scalar> = None;
        for n in 1..ring_size {
            let i = (real_index + n) % ring_size;
            if i == 0 {
                c_zero = Some(c_prev);
            }

            let s_i = responses[i].scalar;
            hasher.append_raw(&CLSAG_GG_CHALLENGE_DOMAIN_TAG);
            hasher.append_raw(&input_hash);
            hasher.append_point(&(s_i * G + c_prev * W[i]).compress());
            hasher.append_point(
                &(s_i * hash_to_point(&ring[i].stealth_address) + c_prev * W_KI).compress(),
            );
            c_prev = hasher.finalize_scalar(); // c[i + 1]
        }

        // When the real index is 0 the walk stops just short of index 0, so
        // the transmitted challenge is only known now. Exactly one of the
        // two assignments happens.
        if real_index == 0 {
            debug_assert!(c_zero.is_none());
            c_zero = Some(c_prev);
        }
        let c_zero = c_zero.ok_or(Error::InvalidState)?;

        // Close the loop: r[real_index] = alpha - c * (mu_P * x + mu_C * f)
        responses[real_index] = CurveScalar::from(alpha - c_prev * w_secret);

        Ok(ClsagGG {
            c_zero: CurveScalar::from(c_zero),
            responses,
            commitment_key_image,
        })
    }

    /// Verify a two-layer CLSAG signature.
    ///
    /// # Arguments
    /// * `message` - Message digest that was signed.
    /// * `ring` - The ring of candidate inputs, in wire form.
    /// * `pseudo_out_commitment` - The pseudo-output amount commitment, in
    ///   wire form.
    /// * `key_image` - The key image spent by this signature.
    pub fn verify(
        &self,
        message: &[u8; 32],
        ring: &[RingMemberGG],
        pseudo_out_commitment: &CompressedCommitment,
        key_image: &KeyImage,
    ) -> Result<(), Error> {
        let ring_size = ring.len();

        if ring_size == 0 {
            return Err(Error::IndexOutOfBounds);
        }

        if self.responses.len() != ring_size {
            return Err(Error::LengthMismatch(self.responses.len(), ring_size));
        }

        let G = B_BLINDING;

        // The key image must lie in the main subgroup
        let I = key_image.decompress_checked()?;

        // Lift the wire commitments to full-cofactor form
        let D = Commitment::try_from(pseudo_out_commitment)?.point;
        let K1 = self
            .commitment_key_image
            .point
            .decompress()
            .ok_or(Error::InvalidKeyImage)?
            .mul_by_cofactor();

        // Pre-decompress ring
        let mut decompressed_ring: Vec<(EdwardsPoint, Commitment)> =
            Vec::with_capacity(ring_size);
        for member in ring {
            let P = member
                .stealth_address
                .decompress()
                .ok_or(Error::InvalidCurvePoint)?;
            let A = Commitment::try_from(&member.amount_commitment)?;
            decompressed_ring.push((P, A));
        }

        // Recompute the ring-wide input digest and the coefficients
        let mut hasher = TranscriptHasher::with_capacity(3 + 2 * ring_size);
        let input_hash =
            compute_input_hash(&mut hasher, message, ring, pseudo_out_commitment, key_image);
        let mu_P =
            aggregation_coefficient(&mut hasher, &CLSAG_GG_LAYER_0_DOMAIN_TAG, &input_hash);
        let mu_C =
            aggregation_coefficient(&mut hasher, &CLSAG_GG_LAYER_1_DOMAIN_TAG, &input_hash);

        let mut W: Vec<EdwardsPoint> = Vec::with_capacity(ring_size);
        for (P_i, A_i) in &decompressed_ring {
            W.push(mu_P * P_i + mu_C * (A_i.point - D));
        }
        let W_KI = mu_P * I + mu_C * K1;

        // Recompute the challenge chain from c[0]
        let mut c_prev = self.c_zero.scalar;
        for i in 0..ring_size {
            let s_i = self.responses[i].scalar;
            hasher.append_raw(&CLSAG_GG_CHALLENGE_DOMAIN_TAG);
            hasher.append_raw(&input_hash);
            hasher.append_point(&(s_i * G + c_prev * W[i]).compress());
            hasher.append_point(
                &(s_i * hash_to_point(&ring[i].stealth_address) + c_prev * W_KI).compress(),
            );
            c_prev = hasher.finalize_scalar(); // c[i + 1]
        }

        // Check that we closed the loop
        if c_prev == self.c_zero.scalar {
            Ok(())
        } else {
            Err(Error::InvalidSignature)
        }
    }

    /// The wire encoding: `c || r[0] || ... || r[ring_size-1] || K1`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(32 * (self.responses.len() + 2));
        bytes.extend_from_slice(self.c_zero.as_bytes());
        for response in &self.responses {
            bytes.extend_from_slice(response.as_bytes());
        }
        bytes.extend_from_slice(self.commitment_key_image.as_bytes());
        bytes
    }
}

impl TryFrom<&[u8]> for ClsagGG {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Error> {
        if src.len() % 32 != 0 || src.len() < 96 {
            return Err(Error::LengthMismatch(src.len(), 96));
        }
        let ring_size = src.len() / 32 - 2;

        let chunk = |index: usize| -> [u8; 32] {
            let mut out = [0u8; 32];
            out.copy_from_slice(&src[index * 32..(index + 1) * 32]);
            out
        };

        let c_zero = CurveScalar::from(&chunk(0));
        let mut responses = Vec::with_capacity(ring_size);
        for i in 0..ring_size {
            responses.push(CurveScalar::from(&chunk(1 + i)));
        }
        let commitment_key_image = KeyImage::try_from(chunk(1 + ring_size))?;

        Ok(Self {
            c_zero,
            responses,
            commitment_key_image,
        })
    }
}

/// Digest of the ring-wide inputs: the message, every ring member's fields
/// in declared order, the pseudo-output in wire form, and the key image.
fn compute_input_hash(
    hasher: &mut TranscriptHasher,
    message: &[u8; 32],
    ring: &[RingMemberGG],
    pseudo_out_commitment: &CompressedCommitment,
    key_image: &KeyImage,
) -> [u8; 32] {
    hasher.append_raw(message);
    for member in ring {
        hasher.append_point(&member.stealth_address);
        hasher.append_point(&member.amount_commitment.point);
    }
    hasher.append_point(&pseudo_out_commitment.point);
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

#[cfg(test)]
mod clsag_gg_tests {
    use super::*;
    use crate::ring_signature::generators;
    use curve25519_dalek::constants::EIGHT_TORSION;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};
    use rand_core::RngCore;

    #[derive(Clone)]
    struct ClsagGGTestParams {
        message: [u8; 32],
        ring: Vec<RingMemberGG>,
        real_index: usize,
        spend_secret: Scalar,
        commitment_secret: Scalar,
        key_image: KeyImage,
        pseudo_out: Commitment,
    }

    impl ClsagGGTestParams {
        fn random_at<RNG: CryptoRngCore>(
            num_mixins: usize,
            real_index: usize,
            rng: &mut RNG,
        ) -> Self {
            assert!(real_index <= num_mixins);
            let generator = generators();

            let mut message = [0u8; 32];
            rng.fill_bytes(&mut message);

            let mut ring: Vec<RingMemberGG> = Vec::new();
            for _ in 0..num_mixins {
                let stealth_address = (Scalar::random(rng) * B_BLINDING).compress();
                let amount_commitment =
                    CompressedCommitment::new(rng.next_u64(), Scalar::random(rng), &generator);
                ring.push(RingMemberGG {
                    stealth_address,
                    amount_commitment,
                });
            }

            // The real input
            let spend_secret = Scalar::random(rng);
            let stealth_address = (spend_secret * B_BLINDING).compress();
            let value = rng.next_u64();
            let blinding = Scalar::random(rng);
            let amount_commitment = CompressedCommitment::new(value, blinding, &generator);

            // A pseudo-output to the same value under a fresh blinding, so
            // the two commitments differ by a multiple of the blinding base.
            let pseudo_out_blinding = Scalar::random(rng);
            let pseudo_out = Commitment::new(value, pseudo_out_blinding, &generator);
            let commitment_secret = blinding - pseudo_out_blinding;

            let key_image = KeyImage::derive(&spend_secret, &stealth_address);

            ring.insert(
                real_index,
                RingMemberGG {
                    stealth_address,
                    amount_commitment,
                },
            );
            assert_eq!(ring.len(), num_mixins + 1);

            Self {
                message,
                ring,
                real_index,
                spend_secret,
                commitment_secret,
                key_image,
                pseudo_out,
            }
        }

        fn random<RNG: CryptoRngCore>(num_mixins: usize, rng: &mut RNG) -> Self {
            let real_index = rng.next_u64() as usize % (num_mixins + 1);
            Self::random_at(num_mixins, real_index, rng)
        }

        fn pseudo_out_compressed(&self) -> CompressedCommitment {
            CompressedCommitment::from(&self.pseudo_out)
        }

        fn sign<RNG: CryptoRngCore>(&self, rng: &mut RNG) -> Result<ClsagGG, Error> {
            ClsagGG::sign(
                &self.message,
                &self.ring,
                self.real_index,
                &self.pseudo_out,
                &self.key_image,
                &self.spend_secret,
                &self.commitment_secret,
                rng,
            )
        }

        fn verify(&self, signature: &ClsagGG) -> Result<(), Error> {
            signature.verify(
                &self.message,
                &self.ring,
                &self.pseudo_out_compressed(),
                &self.key_image,
            )
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(6))]

        #[test]
        fn test_clsag_gg_signature_has_correct_length(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng: StdRng = SeedableRng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            let ring_size = num_mixins + 1;
            assert_eq!(signature.responses.len(), ring_size);
            assert_eq!(signature.to_bytes().len(), 32 * (ring_size + 2));
        }

        #[test]
        fn test_clsag_gg_verify_accepts_valid(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng: StdRng = SeedableRng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();
            assert!(params.verify(&signature).is_ok());
        }

        #[test]
        fn test_clsag_gg_verify_is_deterministic(
            num_mixins in 1..9usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng: StdRng = SeedableRng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();
            assert_eq!(params.verify(&signature), params.verify(&signature));
        }

        #[test]
        fn test_clsag_gg_verify_rejects_wrong_message(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng: StdRng = SeedableRng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            let mut wrong_message = params.message;
            wrong_message[3] ^= 0x04;

            match signature.verify(
                &wrong_message,
                &params.ring,
                &params.pseudo_out_compressed(),
                &params.key_image,
            ) {
                Err(Error::InvalidSignature) => {}
                _ => panic!("Should reject wrong message"),
            }
        }

        #[test]
        fn test_clsag_gg_verify_rejects_wrong_pseudo_out(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng: StdRng = SeedableRng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();

            let generator = generators();
            let wrong_pseudo_out =
                CompressedCommitment::new(rng.next_u64(), Scalar::random(&mut rng), &generator);

            match signature.verify(
                &params.message,
                &params.ring,
                &wrong_pseudo_out,
                &params.key_image,
            ) {
                Err(Error::InvalidSignature) => {}
                _ => panic!("Should reject wrong pseudo-output"),
            }
        }

        #[test]
        fn test_clsag_gg_wire_roundtrip(
            num_mixins in 1..17usize,
            seed in any::<[u8; 32]>(),
        ) {
            let mut rng: StdRng = SeedableRng::from_seed(seed);
            let params = ClsagGGTestParams::random(num_mixins, &mut rng);

            let signature = params.sign(&mut rng).unwrap();
            let bytes = signature.to_bytes();
            let recovered = ClsagGG::try_from(&bytes[..]).unwrap();

            assert_eq!(signature, recovered);
            assert!(params.verify(&recovered).is_ok());
        }
    }

    #[test]
    fn test_clsag_gg_ring_of_one() {
        let mut rng = StdRng::seed_from_u64(100);
        let params = ClsagGGTestParams::random_at(0, 0, &mut rng);

        let signature = params.sign(&mut rng).unwrap();
        assert_eq!(signature.responses.len(), 1);
        assert!(params.verify(&signature).is_ok());
    }

    #[test]
    fn test_clsag_gg_secret_at_front_of_ring_11() {
        // The transmitted challenge is only known after the ring walk here.
        let mut rng = StdRng::seed_from_u64(101);
        let params = ClsagGGTestParams::random_at(10, 0, &mut rng);

        let signature = params.sign(&mut rng).unwrap();
        assert!(params.verify(&signature).is_ok());
    }

    #[test]
    fn test_clsag_gg_secret_at_back_of_ring_11() {
        // The ring walk passes index 0 on its first step here.
        let mut rng = StdRng::seed_from_u64(102);
        let params = ClsagGGTestParams::random_at(10, 10, &mut rng);

        let signature = params.sign(&mut rng).unwrap();
        assert!(params.verify(&signature).is_ok());
    }

    #[test]
    fn test_clsag_gg_any_ring_position_can_sign() {
        let mut rng = StdRng::seed_from_u64(103);
        let generator = generators();
        let ring_size = 4;
        let message = [42u8; 32];

        let mut spend_secrets = Vec::new();
        let mut blindings = Vec::new();
        let mut values = Vec::new();
        let mut ring = Vec::new();
        for _ in 0..ring_size {
            let x = Scalar::random(&mut rng);
            let b = Scalar::random(&mut rng);
            let v = rng.next_u64();
            ring.push(RingMemberGG {
                stealth_address: (x * B_BLINDING).compress(),
                amount_commitment: CompressedCommitment::new(v, b, &generator),
            });
            spend_secrets.push(x);
            blindings.push(b);
            values.push(v);
        }

        // The same ring signs at every position.
        for real_index in 0..ring_size {
            let pseudo_out_blinding = Scalar::random(&mut rng);
            let pseudo_out = Commitment::new(values[real_index], pseudo_out_blinding, &generator);
            let commitment_secret = blindings[real_index] - pseudo_out_blinding;
            let key_image = KeyImage::derive(
                &spend_secrets[real_index],
                &ring[real_index].stealth_address,
            );

            let signature = ClsagGG::sign(
                &message,
                &ring,
                real_index,
                &pseudo_out,
                &key_image,
                &spend_secrets[real_index],
                &commitment_secret,
                &mut rng,
            )
            .unwrap();

            assert!(signature
                .verify(
                    &message,
                    &ring,
                    &CompressedCommitment::from(&pseudo_out),
                    &key_image,
                )
                .is_ok());
        }
    }

    #[test]
    fn test_clsag_gg_rejects_tampered_response() {
        let mut rng = StdRng::seed_from_u64(104);
        let params = ClsagGGTestParams::random_at(4, 2, &mut rng);

        let mut signature = params.sign(&mut rng).unwrap();

        let mut bytes = *signature.responses[4].as_bytes();
        bytes[0] = bytes[0].wrapping_add(1);
        signature.responses[4] = CurveScalar::from(&bytes);

        match params.verify(&signature) {
            Err(Error::InvalidSignature) => {}
            _ => panic!("Should reject tampered response"),
        }
    }

    #[test]
    fn test_clsag_gg_rejects_tampered_challenge() {
        let mut rng = StdRng::seed_from_u64(105);
        let params = ClsagGGTestParams::random(4, &mut rng);

        let mut signature = params.sign(&mut rng).unwrap();
        signature.c_zero = CurveScalar::from(signature.c_zero.scalar + Scalar::ONE);

        match params.verify(&signature) {
            Err(Error::InvalidSignature) => {}
            _ => panic!("Should reject tampered challenge"),
        }
    }

    #[test]
    fn test_clsag_gg_rejects_tampered_commitment_key_image() {
        let mut rng = StdRng::seed_from_u64(106);
        let params = ClsagGGTestParams::random(4, &mut rng);

        let mut signature = params.sign(&mut rng).unwrap();
        signature.commitment_key_image = KeyImage::from(5u64);

        match params.verify(&signature) {
            Err(Error::InvalidSignature) => {}
            _ => panic!("Should reject tampered auxiliary key image"),
        }
    }

    #[test]
    fn test_clsag_gg_rejects_modified_key_image() {
        let mut rng = StdRng::seed_from_u64(107);
        let params = ClsagGGTestParams::random(4, &mut rng);

        let signature = params.sign(&mut rng).unwrap();
        let wrong_key_image = KeyImage::from(rng.next_u64());

        match signature.verify(
            &params.message,
            &params.ring,
            &params.pseudo_out_compressed(),
            &wrong_key_image,
        ) {
            Err(Error::InvalidSignature) => {}
            _ => panic!("Should reject modified key image"),
        }
    }

    #[test]
    fn test_clsag_gg_rejects_permuted_ring() {
        let mut rng = StdRng::seed_from_u64(108);
        let params = ClsagGGTestParams::random_at(4, 2, &mut rng);

        let signature = params.sign(&mut rng).unwrap();

        // Swap two decoys; the real member keeps its position.
        let mut permuted_ring = params.ring.clone();
        permuted_ring.swap(0, 4);

        match signature.verify(
            &params.message,
            &permuted_ring,
            &params.pseudo_out_compressed(),
            &params.key_image,
        ) {
            Err(Error::InvalidSignature) => {}
            _ => panic!("Should reject permuted ring"),
        }
    }

    #[test]
    fn test_clsag_gg_rejects_key_image_outside_main_subgroup() {
        let mut rng = StdRng::seed_from_u64(109);
        let params = ClsagGGTestParams::random(4, &mut rng);

        let signature = params.sign(&mut rng).unwrap();

        let dirty_point = params.key_image.decompress_checked().unwrap() + EIGHT_TORSION[1];
        let dirty_key_image = KeyImage::from(dirty_point);

        match signature.verify(
            &params.message,
            &params.ring,
            &params.pseudo_out_compressed(),
            &dirty_key_image,
        ) {
            Err(Error::KeyImageNotInMainSubgroup) => {}
            _ => panic!("Should reject key image outside the main subgroup"),
        }
    }

    #[test]
    fn test_clsag_gg_sign_rejects_wrong_key_image() {
        let mut rng = StdRng::seed_from_u64(110);
        let mut params = ClsagGGTestParams::random(4, &mut rng);

        params.key_image = KeyImage::from(7u64);

        match params.sign(&mut rng) {
            Err(Error::KeyImageMismatch) => {}
            _ => panic!("Should fail with KeyImageMismatch"),
        }
    }

    #[test]
    fn test_clsag_gg_index_out_of_bounds() {
        let mut rng = StdRng::seed_from_u64(111);
        let mut params = ClsagGGTestParams::random(4, &mut rng);

        params.real_index = 100; // Out of bounds

        match params.sign(&mut rng) {
            Err(Error::IndexOutOfBounds) => {}
            _ => panic!("Should fail with IndexOutOfBounds"),
        }
    }

    #[test]
    fn test_clsag_gg_empty_ring() {
        let mut rng = StdRng::seed_from_u64(112);
        let mut params = ClsagGGTestParams::random(4, &mut rng);

        params.ring.clear();
        params.real_index = 0;

        match params.sign(&mut rng) {
            Err(Error::IndexOutOfBounds) => {}
            _ => panic!("Should fail with IndexOutOfBounds"),
        }
    }

    #[test]
    fn test_clsag_gg_same_key_same_image_across_signatures() {
        let mut rng = StdRng::seed_from_u64(113);
        let params = ClsagGGTestParams::random_at(4, 1, &mut rng);

        let mut other = params.clone();
        other.message = [9u8; 32];

        let first = params.sign(&mut rng).unwrap();
        let second = other.sign(&mut rng).unwrap();

        // The linkability tag depends only on the spend secret and stealth
        // address, so both signatures spend the identical 32-byte image.
        assert_eq!(params.key_image, other.key_image);
        assert!(params.verify(&first).is_ok());
        assert!(other.verify(&second).is_ok());
    }

    #[test]
    fn test_clsag_gg_rejects_malformed_wire_bytes() {
        assert!(ClsagGG::try_from(&[][..]).is_err());
        assert!(ClsagGG::try_from(&[0u8; 95][..]).is_err());
        assert!(ClsagGG::try_from(&[0u8; 64][..]).is_err());
    }
}
