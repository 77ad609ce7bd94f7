//! Spendable resources and cumulative score.

/// Counters mutated by placements, kills and pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Economy {
    resources: u32,
    score: u32,
}

impl Economy {
    /// Creates an economy holding the provided starting resources and no score.
    pub(crate) const fn new(starting_resources: u32) -> Self {
        Self {
            resources: starting_resources,
            score: 0,
        }
    }

    pub(crate) const fn resources(&self) -> u32 {
        self.resources
    }

    pub(crate) const fn score(&self) -> u32 {
        self.score
    }

    /// Deducts `cost` when affordable. Either the full cost is paid or nothing changes.
    pub(crate) fn try_spend(&mut self, cost: u32) -> bool {
        if self.resources < cost {
            return false;
        }
        self.resources -= cost;
        true
    }

    /// Credits resources, and the score when `scored` is set.
    pub(crate) fn credit(&mut self, amount: u32, scored: bool) {
        self.resources = self.resources.saturating_add(amount);
        if scored {
            self.score = self.score.saturating_add(amount);
        }
    }
}
