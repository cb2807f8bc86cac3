//! Per-point lookup generations.

use std::collections::HashMap;

use super::types::PointId;

/// Tracks the current lookup generation for each point.
///
/// Every new lookup bumps the generation of its point. A result is current
/// only if it carries the latest generation, which gives "latest request
/// wins" per point regardless of the order responses arrive in.
#[derive(Debug, Default, Clone)]
pub struct GenerationTracker {
    current: HashMap<PointId, u64>,
}

impl GenerationTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation for `id` and return it.
    pub fn bump(&mut self, id: PointId) -> u64 {
        let generation = self.current.entry(id).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Returns true if `generation` is the latest issued for `id`.
    pub fn is_current(&self, id: PointId, generation: u64) -> bool {
        self.current.get(&id) == Some(&generation)
    }

    /// Stop tracking every point.
    pub fn clear(&mut self) {
        self.current.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bump_is_monotonic_per_point() {
        let mut tracker = GenerationTracker::new();
        let a = PointId(1);
        let b = PointId(2);

        assert_eq!(tracker.bump(a), 1);
        assert_eq!(tracker.bump(a), 2);
        assert_eq!(tracker.bump(b), 1);
        assert!(tracker.is_current(a, 2));
    }

    #[test]
    fn test_only_latest_generation_is_current() {
        let mut tracker = GenerationTracker::new();
        let id = PointId(7);

        let first = tracker.bump(id);
        let second = tracker.bump(id);

        assert!(!tracker.is_current(id, first));
        assert!(tracker.is_current(id, second));
    }

    #[test]
    fn test_cleared_points_are_never_current() {
        let mut tracker = GenerationTracker::new();
        let id = PointId(3);
        let generation = tracker.bump(id);

        tracker.clear();

        assert!(!tracker.is_current(id, generation));
        assert_eq!(tracker.bump(id), 1);
    }
}
