//! Per-part falloff weights for segmented point sets.
//!
//! A "part" is a caller-assigned integer grouping of 3D points (e.g. a
//! connected island of a mesh). This crate builds a geometric summary per
//! part, evaluates a scalar weight for each part under one of two modes
//! (a linear remap along a user-defined segment, or seeded coherent noise),
//! and caches the results so repeated queries are cheap and safe from many
//! threads.
//!
//! # Example
//!
//! ```
//! use glam::DVec3;
//! use part_falloff::{PartFalloff, Settings};
//!
//! let mut falloff = PartFalloff::new();
//! falloff.rebuild([
//!     (0, DVec3::new(0.0, 0.0, 0.0)),
//!     (1, DVec3::new(10.0, 0.0, 0.0)),
//! ]);
//! falloff.apply(Settings::positional(DVec3::ZERO, DVec3::new(10.0, 0.0, 0.0)));
//!
//! assert_eq!(falloff.weight(0), 0.0);
//! assert_eq!(falloff.weight(1), 1.0);
//! ```

mod cache;
mod evaluate;
mod part_map;
mod settings;
mod util;

pub use cache::WeightCache;
pub use evaluate::weight_for;
pub use part_map::{PartMap, PartSummary};
pub use settings::{FalloffMode, Settings, SettingsTracker};

use glam::DVec3;

/// Falloff state for one point source: part summaries, the weight cache,
/// and the last-applied settings.
///
/// The lifecycle has two phases that must not overlap, and the borrow rules
/// enforce that for anyone holding the whole struct: [`rebuild`] and
/// [`apply`] take `&mut self`, while [`weight`] takes `&self` and may be
/// called from many threads at once.
///
/// [`rebuild`]: PartFalloff::rebuild
/// [`apply`]: PartFalloff::apply
/// [`weight`]: PartFalloff::weight
#[derive(Debug, Default)]
pub struct PartFalloff {
    parts: PartMap,
    cache: WeightCache,
    tracker: SettingsTracker,
}

impl PartFalloff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild part summaries from the full point set of a new topology
    /// snapshot, dropping all cached weights.
    pub fn rebuild(&mut self, points: impl IntoIterator<Item = (u32, DVec3)>) {
        self.parts.build(points);
        self.cache.clear();
    }

    /// Apply settings for the next evaluation pass. Invalidates the cache
    /// iff they differ from the previous settings in anything but scale.
    pub fn apply(&mut self, settings: Settings) {
        self.tracker.apply(settings, &self.cache);
    }

    /// Weight for a part under the current settings.
    ///
    /// Total over all inputs: an empty map, an unknown part id, or a
    /// degenerate segment all yield the scaled default weight rather than an
    /// error. Before any [`apply`](Self::apply), every part weighs `1.0`.
    pub fn weight(&self, part: u32) -> f64 {
        match self.tracker.current() {
            Some(settings) => weight_for(part, &settings, &self.parts, &self.cache),
            None => 1.0,
        }
    }

    /// Componentwise min/max over all part centers, used by callers to seed
    /// default segment endpoints.
    pub fn bounds(&self) -> (DVec3, DVec3) {
        self.parts.bounds()
    }

    /// Whether any topology has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
