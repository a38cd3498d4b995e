//! Weight evaluation: positional remap and seeded coherent noise.

use glam::DVec3;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

use crate::cache::WeightCache;
use crate::part_map::PartMap;
use crate::settings::{FalloffMode, Settings};

/// Octave count for the random-mode noise.
const NOISE_OCTAVES: usize = 4;

/// Raw weight used for every fallback path: empty map, unknown part id,
/// degenerate positional segment.
const DEFAULT_WEIGHT: f64 = 1.0;

/// Compute the (post-scale) weight for one part.
///
/// Pure in everything but the cache: given the same map, settings, and part
/// id this always returns the same value, whether served from the cache or
/// recomputed. Safe to call from many threads at once; see [`WeightCache`]
/// for the accepted duplicate-compute race on cold entries.
pub fn weight_for(
    part: u32,
    settings: &Settings,
    parts: &PartMap,
    cache: &WeightCache,
) -> f64 {
    if parts.is_empty() {
        // No topology observed yet; neutral weight, nothing worth caching.
        return settings.scale * DEFAULT_WEIGHT;
    }

    if let Some(raw) = cache.get(part) {
        return settings.scale * raw;
    }

    let raw = match parts.get(part) {
        Some(summary) => match settings.mode {
            FalloffMode::Random { seed } => part_noise(summary.center, seed),
            FalloffMode::Positional { min_pos, max_pos } => {
                let segment = max_pos - min_pos;
                let den = segment.length_squared();
                if den == 0.0 {
                    DEFAULT_WEIGHT
                } else {
                    remap_linear((summary.center - min_pos).dot(segment) / den)
                }
            }
        },
        None => {
            // Stale id from before a rebuild, or a part the build never saw.
            log::debug!("weight query for unknown part {part}");
            DEFAULT_WEIGHT
        }
    };

    cache.set(part, raw);
    settings.scale * raw
}

/// Clamped linear ease: identity on [0, 1], flat outside.
fn remap_linear(t: f64) -> f64 {
    t.clamp(0.0, 1.0)
}

/// Deterministic multi-octave noise of a position, in [0, 1].
///
/// The generator is built fresh from the seed on every call so the result is
/// a pure function of (position, seed) with no shared state to synchronize.
fn part_noise(pos: DVec3, seed: u32) -> f64 {
    let fbm: Fbm<Perlin> = Fbm::new(seed).set_octaves(NOISE_OCTAVES);
    let n = fbm.get([pos.x, pos.y, pos.z]);
    // fBm sums land roughly in [-1, 1]; fold into the raw-weight range.
    (0.5 * (n + 1.0)).clamp(0.0, 1.0)
}
