//! Per-lane enemy population used to decide which defenders shoot.

use std::collections::BTreeMap;

use lane_defence_core::Lane;

/// Multiset of lanes keyed by lane, counting the live enemies on each.
#[derive(Clone, Debug, Default)]
pub(crate) struct LaneOccupancy {
    counts: BTreeMap<Lane, u32>,
}

impl LaneOccupancy {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records an enemy entering the lane.
    pub(crate) fn occupy(&mut self, lane: Lane) {
        *self.counts.entry(lane).or_insert(0) += 1;
    }

    /// Records an enemy leaving the lane. Releasing an empty lane is a no-op.
    pub(crate) fn release(&mut self, lane: Lane) {
        let Some(count) = self.counts.get_mut(&lane) else {
            return;
        };
        *count = count.saturating_sub(1);
        if *count == 0 {
            let _ = self.counts.remove(&lane);
        }
    }

    pub(crate) fn is_occupied(&self, lane: Lane) -> bool {
        self.population(lane) > 0
    }

    pub(crate) fn population(&self, lane: Lane) -> u32 {
        self.counts.get(&lane).copied().unwrap_or(0)
    }

    /// Lanes holding at least one enemy, in top-to-bottom order.
    pub(crate) fn occupied(&self) -> Vec<Lane> {
        self.counts.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_track_each_enemy_independently() {
        let mut lanes = LaneOccupancy::new();
        lanes.occupy(Lane::new(2));
        lanes.occupy(Lane::new(2));
        lanes.occupy(Lane::new(4));

        lanes.release(Lane::new(2));
        assert!(lanes.is_occupied(Lane::new(2)));
        assert_eq!(lanes.population(Lane::new(2)), 1);

        lanes.release(Lane::new(2));
        assert!(!lanes.is_occupied(Lane::new(2)));
        assert_eq!(lanes.occupied(), vec![Lane::new(4)]);
    }

    #[test]
    fn releasing_an_empty_lane_is_ignored() {
        let mut lanes = LaneOccupancy::new();
        lanes.release(Lane::new(1));
        assert!(lanes.occupied().is_empty());
    }
}
