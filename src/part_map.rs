//! Per-part geometric summaries built from raw point data.

use glam::DVec3;
use rustc_hash::FxHashMap;

use crate::util::Timed;

/// Aggregate geometry for one part (a caller-assigned island of points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartSummary {
    /// Center of the part's bounding box.
    pub center: DVec3,

    /// Extent of the part's bounding box (max - min).
    pub axis: DVec3,
}

/// Running min/max box over a set of points.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: DVec3,
    max: DVec3,
}

impl Bounds {
    fn new(p: DVec3) -> Self {
        Self { min: p, max: p }
    }

    fn add(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    fn extent(&self) -> DVec3 {
        self.max - self.min
    }
}

/// Summaries for every part observed in the current topology snapshot,
/// plus the bounding range of all part centers.
///
/// Built wholesale by [`PartMap::build`] and read-only afterward. A rebuild
/// must not run concurrently with queries on the same instance; callers
/// quiesce evaluation while handling a topology change.
#[derive(Debug, Default)]
pub struct PartMap {
    parts: FxHashMap<u32, PartSummary>,
    min: DVec3,
    max: DVec3,
}

impl PartMap {
    /// Rebuild the map from the full point set of one topology snapshot.
    ///
    /// Groups positions by part id, computes each part's bounding box, and
    /// derives the map-wide bounds from the part centers. Replaces any prior
    /// contents.
    pub fn build(&mut self, points: impl IntoIterator<Item = (u32, DVec3)>) {
        let _t = Timed::debug("PartMap::build");

        let mut boxes: FxHashMap<u32, Bounds> = FxHashMap::default();
        for (part, pos) in points {
            boxes
                .entry(part)
                .and_modify(|b| b.add(pos))
                .or_insert_with(|| Bounds::new(pos));
        }

        self.parts.clear();
        let mut center_bounds: Option<Bounds> = None;
        for (part, bbox) in boxes {
            let summary = PartSummary {
                center: bbox.center(),
                axis: bbox.extent(),
            };
            match center_bounds.as_mut() {
                Some(b) => b.add(summary.center),
                None => center_bounds = Some(Bounds::new(summary.center)),
            }
            self.parts.insert(part, summary);
        }

        let bounds = center_bounds.unwrap_or(Bounds {
            min: DVec3::ZERO,
            max: DVec3::ZERO,
        });
        self.min = bounds.min;
        self.max = bounds.max;

        log::debug!("PartMap::build: {} parts", self.parts.len());
    }

    /// Look up the summary for a part id. Absent ids (stale, or never seen
    /// by the last build) are not an error; callers fall back to a default
    /// weight.
    pub fn get(&self, part: u32) -> Option<&PartSummary> {
        self.parts.get(&part)
    }

    /// Whether any parts have been observed.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Number of parts in the current snapshot.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Componentwise min/max over all part centers. Zero vectors when empty.
    pub fn bounds(&self) -> (DVec3, DVec3) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point_parts() {
        let mut map = PartMap::default();
        map.build([
            (0, DVec3::new(1.0, 2.0, 3.0)),
            (7, DVec3::new(-1.0, 0.0, 5.0)),
        ]);

        assert_eq!(map.len(), 2);
        let s = map.get(0).expect("part 0 should exist");
        assert_eq!(s.center, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(s.axis, DVec3::ZERO);
    }

    #[test]
    fn test_center_is_box_center() {
        // Cluster with an off-center mass: the box center ignores density.
        let mut map = PartMap::default();
        map.build([
            (3, DVec3::new(0.0, 0.0, 0.0)),
            (3, DVec3::new(0.0, 0.0, 0.0)),
            (3, DVec3::new(0.0, 0.0, 0.0)),
            (3, DVec3::new(4.0, 2.0, -6.0)),
        ]);

        let s = map.get(3).expect("part 3 should exist");
        assert_eq!(s.center, DVec3::new(2.0, 1.0, -3.0));
        assert_eq!(s.axis, DVec3::new(4.0, 2.0, 6.0));
    }

    #[test]
    fn test_bounds_span_part_centers() {
        let mut map = PartMap::default();
        map.build([
            (0, DVec3::new(-2.0, 0.0, 0.0)),
            (1, DVec3::new(5.0, 1.0, -1.0)),
            (2, DVec3::new(0.0, -3.0, 4.0)),
        ]);

        let (min, max) = map.bounds();
        assert_eq!(min, DVec3::new(-2.0, -3.0, -1.0));
        assert_eq!(max, DVec3::new(5.0, 1.0, 4.0));
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut map = PartMap::default();
        map.build([(0, DVec3::ZERO), (1, DVec3::X)]);
        map.build([(9, DVec3::new(1.0, 1.0, 1.0))]);

        assert_eq!(map.len(), 1);
        assert!(map.get(0).is_none());
        assert!(map.get(9).is_some());
        let (min, max) = map.bounds();
        assert_eq!(min, DVec3::new(1.0, 1.0, 1.0));
        assert_eq!(max, DVec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_empty_build() {
        let mut map = PartMap::default();
        map.build(std::iter::empty());

        assert!(map.is_empty());
        assert_eq!(map.bounds(), (DVec3::ZERO, DVec3::ZERO));
    }
}
