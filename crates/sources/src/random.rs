//! Per-packet random state.
//!
//! There is no global random state anywhere in the launch core: each
//! packet's generator is derived from the segment seed and the packet's
//! history index, so the packet stream is identical for identical
//! configurations regardless of how histories are distributed over
//! threads.

use nalgebra::Vector3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

/// SplitMix64-style scramble so consecutive history indices land far
/// apart in seed space.
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// The generator for one packet, derived from the segment seed and the
/// packet's history index.
pub fn packet_rng(seed: u64, history_index: usize) -> ChaChaRng {
    let mut z = seed ^ (history_index as u64).wrapping_mul(GOLDEN_GAMMA);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    ChaChaRng::seed_from_u64(z ^ (z >> 31))
}

/// An isotropic unit direction.
pub fn isotropic_direction(rng: &mut ChaChaRng) -> Vector3<f64> {
    let cos_theta: f64 = 2.0 * rng.random::<f64>() - 1.0;
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let phi = 2.0 * std::f64::consts::PI * rng.random::<f64>();
    Vector3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}
