//! Thread-safe cache of raw (pre-scale) part weights.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

/// Map from part id to its cached raw weight.
///
/// One coarse lock guards the whole map; entries number one per mesh part
/// (tens to low thousands), so contention is negligible and no per-entry
/// locking is warranted. The lock is never held across a weight
/// computation: the evaluator calls `get` and `set` as two independent
/// operations, so two threads racing on a cold entry may both compute and
/// store the same deterministic value. That duplicate work is accepted.
#[derive(Debug, Default)]
pub struct WeightCache {
    weights: Mutex<FxHashMap<u32, f64>>,
}

impl WeightCache {
    /// Cached raw weight for a part, if one has been computed this pass.
    pub fn get(&self, part: u32) -> Option<f64> {
        self.lock().get(&part).copied()
    }

    /// Store a raw weight, replacing any prior entry for the part.
    pub fn set(&self, part: u32, weight: f64) {
        self.lock().insert(part, weight);
    }

    /// Drop every cached weight.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FxHashMap<u32, f64>> {
        // A poisoned lock means a panic mid-insert on a plain HashMap op;
        // the map itself is still structurally sound.
        self.weights.lock().unwrap_or_else(|e| e.into_inner())
    }
}
