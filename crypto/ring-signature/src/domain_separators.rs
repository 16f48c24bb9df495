// Copyright (c) 2018-2025 The Umbra Foundation

//! Domain separation tags for the CLSAG transcripts.
//!
//! The layer and challenge tags are fixed 32-byte constants appended to the
//! transcript verbatim; they must match the deployed protocol byte-for-byte.
//! Shorter tags are padded with `_` to the full width.

/// Domain tag for the layer-0 (stealth address) aggregation coefficient of a
/// two-layer CLSAG.
pub const CLSAG_GG_LAYER_0_DOMAIN_TAG: [u8; 32] = *b"umb_clsag_gg_layer_0____________";

/// Domain tag for the layer-1 (amount commitment) aggregation coefficient of
/// a two-layer CLSAG.
pub const CLSAG_GG_LAYER_1_DOMAIN_TAG: [u8; 32] = *b"umb_clsag_gg_layer_1____________";

/// Domain tag for the round challenges of a two-layer CLSAG.
pub const CLSAG_GG_CHALLENGE_DOMAIN_TAG: [u8; 32] = *b"umb_clsag_gg_challenge__________";

/// Domain tag for the layer-0 (stealth address) aggregation coefficient of a
/// four-layer CLSAG.
pub const CLSAG_GGXG_LAYER_0_DOMAIN_TAG: [u8; 32] = *b"umb_clsag_ggxg_layer_0__________";

/// Domain tag for the layer-1 (amount commitment) aggregation coefficient of
/// a four-layer CLSAG.
pub const CLSAG_GGXG_LAYER_1_DOMAIN_TAG: [u8; 32] = *b"umb_clsag_ggxg_layer_1__________";

/// Domain tag for the layer-2 (extended commitment) aggregation coefficient
/// of a four-layer CLSAG.
pub const CLSAG_GGXG_LAYER_2_DOMAIN_TAG: [u8; 32] = *b"umb_clsag_ggxg_layer_2__________";

/// Domain tag for the layer-3 (concealing point) aggregation coefficient of a
/// four-layer CLSAG.
pub const CLSAG_GGXG_LAYER_3_DOMAIN_TAG: [u8; 32] = *b"umb_clsag_ggxg_layer_3__________";

/// Domain tag for the round challenges of a four-layer CLSAG.
pub const CLSAG_GGXG_CHALLENGE_DOMAIN_TAG: [u8; 32] = *b"umb_clsag_ggxg_challenge________";

/// Domain tag for hashing a stealth address onto the curve.
pub const HASH_TO_POINT_DOMAIN_TAG: &[u8] = b"umb_hash_to_point";

/// Domain tag for deriving the auxiliary generator X.
pub const GENERATOR_X_DOMAIN_TAG: &[u8] = b"umb_generator_x";
