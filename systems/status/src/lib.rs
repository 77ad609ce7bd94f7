#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure status system that reports score and decides when a session is won.

use lane_defence_core::{Command, EconomySnapshot, Outcome, StatusReport};

/// Evaluates the win condition after every tick.
#[derive(Clone, Copy, Debug)]
pub struct StatusEvaluator {
    winning_score: u32,
}

impl StatusEvaluator {
    /// Creates an evaluator for the provided winning threshold.
    #[must_use]
    pub const fn new(winning_score: u32) -> Self {
        Self { winning_score }
    }

    /// Summarises the tick and requests victory once the field is clear.
    ///
    /// Victory requires the winning score, no live enemies and no latched outcome.
    pub fn handle(
        &self,
        economy: EconomySnapshot,
        live_enemies: usize,
        outcome: Option<Outcome>,
        out: &mut Vec<Command>,
    ) -> StatusReport {
        if outcome.is_none() && economy.score >= self.winning_score && live_enemies == 0 {
            out.push(Command::DeclareVictory);
        }

        StatusReport {
            score: economy.score,
            resources: economy.resources,
            frame: economy.frame,
            outcome,
        }
    }
}
