//! Falloff settings and change-driven cache invalidation.

use glam::DVec3;

use crate::cache::WeightCache;

/// How raw weights are assigned to parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FalloffMode {
    /// Linear remap of the part center's projection onto a segment,
    /// clamped to [0, 1].
    Positional {
        /// Segment start; parts projecting here (or before) weigh 0.
        min_pos: DVec3,
        /// Segment end; parts projecting here (or past) weigh 1.
        max_pos: DVec3,
    },

    /// Deterministic coherent noise of the part center.
    Random {
        /// Noise seed; same seed and center always yield the same weight.
        seed: u32,
    },
}

/// Per-evaluation-pass settings.
///
/// `scale` sits outside [`FalloffMode`] on purpose: it multiplies cached raw
/// weights uniformly on the way out, so changing it never requires
/// recomputation. Cache invalidation compares modes only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub mode: FalloffMode,
    pub scale: f64,
}

impl Settings {
    pub fn positional(min_pos: DVec3, max_pos: DVec3) -> Self {
        Self {
            mode: FalloffMode::Positional { min_pos, max_pos },
            scale: 1.0,
        }
    }

    pub fn random(seed: u32) -> Self {
        Self {
            mode: FalloffMode::Random { seed },
            scale: 1.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Tracks the last-applied [`Settings`] and clears the weight cache whenever
/// a newly applied value differs in anything but scale.
///
/// `apply` must complete before the weight queries it governs and must not
/// run concurrently with them (it mutates the cache).
#[derive(Debug, Default)]
pub struct SettingsTracker {
    current: Option<Settings>,
}

impl SettingsTracker {
    /// Apply new settings for the next evaluation pass, invalidating the
    /// cache if the mode (endpoints, seed, or kind) changed.
    pub fn apply(&mut self, new: Settings, cache: &WeightCache) {
        let invalidates = match self.current {
            Some(prev) => prev.mode != new.mode,
            None => false,
        };
        if invalidates {
            log::debug!("settings changed, clearing {} cached weights", cache.len());
            cache.clear();
        }
        self.current = Some(new);
    }

    /// The settings governing the current pass, if any have been applied.
    pub fn current(&self) -> Option<Settings> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_cache() -> WeightCache {
        let cache = WeightCache::default();
        cache.set(0, 0.25);
        cache.set(1, 0.75);
        cache
    }

    #[test]
    fn test_first_apply_keeps_cache() {
        let cache = seeded_cache();
        let mut tracker = SettingsTracker::default();
        tracker.apply(Settings::random(42), &cache);

        assert_eq!(cache.len(), 2);
        assert_eq!(tracker.current(), Some(Settings::random(42)));
    }

    #[test]
    fn test_same_mode_keeps_cache() {
        let cache = seeded_cache();
        let mut tracker = SettingsTracker::default();
        tracker.apply(Settings::random(42), &cache);
        tracker.apply(Settings::random(42), &cache);

        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_scale_change_keeps_cache() {
        let cache = seeded_cache();
        let mut tracker = SettingsTracker::default();
        tracker.apply(Settings::random(42), &cache);
        tracker.apply(Settings::random(42).with_scale(0.5), &cache);

        assert_eq!(cache.len(), 2);
        assert_eq!(tracker.current().map(|s| s.scale), Some(0.5));
    }

    #[test]
    fn test_seed_change_clears_cache() {
        let cache = seeded_cache();
        let mut tracker = SettingsTracker::default();
        tracker.apply(Settings::random(42), &cache);
        tracker.apply(Settings::random(43), &cache);

        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_mode_kind_change_clears_cache() {
        let cache = seeded_cache();
        let mut tracker = SettingsTracker::default();
        tracker.apply(Settings::random(42), &cache);
        tracker.apply(Settings::positional(DVec3::ZERO, DVec3::X), &cache);

        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_endpoint_change_clears_cache() {
        let cache = seeded_cache();
        let mut tracker = SettingsTracker::default();
        tracker.apply(Settings::positional(DVec3::ZERO, DVec3::X), &cache);
        tracker.apply(Settings::positional(DVec3::ZERO, DVec3::Y), &cache);

        assert_eq!(cache.len(), 0);
    }
}
