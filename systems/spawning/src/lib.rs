#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded spawning system responsible for emitting enemy and pickup spawn commands.

use lane_defence_core::{Command, Event, Lane, Rules, SpawnSchedule};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug)]
pub struct Config {
    enemy_schedule: SpawnSchedule,
    speed_min: f32,
    speed_max: f32,
    pickup_interval: u32,
    pickup_cap: u32,
    pickup_amounts: Vec<u32>,
    pickup_span: f32,
    lanes: Vec<Lane>,
    winning_score: u32,
    rng_seed: u64,
}

impl Config {
    /// Derives the spawning cadence and ranges from the session rules.
    #[must_use]
    pub fn from_rules(rules: &Rules, rng_seed: u64) -> Self {
        Self {
            enemy_schedule: rules.enemy_schedule,
            speed_min: rules.enemy_speed_min,
            speed_max: rules.enemy_speed_max,
            pickup_interval: rules.pickup_interval,
            pickup_cap: rules.pickup_cap,
            pickup_amounts: rules.pickup_amounts.clone(),
            pickup_span: (rules.field_width - rules.cell_size).max(0.0),
            lanes: rules.grid_layout().lanes().collect(),
            winning_score: rules.winning_score,
            rng_seed,
        }
    }
}

/// World facts the spawner consults before emitting commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnContext {
    /// Score accumulated so far.
    pub score: u32,
    /// Pickups currently waiting to be collected.
    pub active_pickups: usize,
}

/// Pure system that emits spawn commands on a shrinking enemy cadence.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    enemy_interval: u32,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            enemy_interval: config.enemy_schedule.start.max(1),
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            config,
        }
    }

    /// Ticks that currently separate two enemy spawns.
    #[must_use]
    pub const fn enemy_interval(&self) -> u32 {
        self.enemy_interval
    }

    /// Consumes world events and emits spawn commands for every simulated frame.
    ///
    /// Nothing spawns once the score reaches the winning threshold.
    pub fn handle(&mut self, events: &[Event], context: SpawnContext, out: &mut Vec<Command>) {
        if context.score >= self.config.winning_score || self.config.lanes.is_empty() {
            return;
        }

        for event in events {
            if let Event::TimeAdvanced { frame } = event {
                self.spawn_enemy(*frame, out);
                self.spawn_pickup(*frame, context.active_pickups, out);
            }
        }
    }

    fn spawn_enemy(&mut self, frame: u64, out: &mut Vec<Command>) {
        if frame % u64::from(self.enemy_interval) != 0 {
            return;
        }

        let Some(lane) = self.select_lane() else {
            return;
        };
        let speed = if self.config.speed_max > self.config.speed_min {
            self.rng
                .gen_range(self.config.speed_min..self.config.speed_max)
        } else {
            self.config.speed_min
        };
        out.push(Command::SpawnEnemy { lane, speed });

        self.enemy_interval = self.config.enemy_schedule.next(self.enemy_interval).max(1);
    }

    fn spawn_pickup(&mut self, frame: u64, active: usize, out: &mut Vec<Command>) {
        let interval = u64::from(self.config.pickup_interval);
        if interval == 0 || frame % interval != 0 {
            return;
        }

        let cap = self.config.pickup_cap as usize;
        if cap != 0 && active >= cap {
            return;
        }

        let x = if self.config.pickup_span > 0.0 {
            self.rng.gen_range(0.0..self.config.pickup_span)
        } else {
            0.0
        };
        let Some(lane) = self.select_lane() else {
            return;
        };
        let Some(&amount) = self.config.pickup_amounts.choose(&mut self.rng) else {
            return;
        };
        out.push(Command::SpawnPickup { x, lane, amount });
    }

    fn select_lane(&mut self) -> Option<Lane> {
        self.config.lanes.choose(&mut self.rng).copied()
    }
}
