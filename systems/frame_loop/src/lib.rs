#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame loop that drives the world and every system in a fixed per-tick order.
//!
//! One call to [`FrameLoop::tick`] performs, in order: pointer placement,
//! the world tick, spawning, feedback messages and the status evaluation.
//! Commands produced at each stage are applied before the next stage reads
//! the event stream. Once the world latches an outcome the loop halts and
//! further ticks are ignored.

use lane_defence_core::{Command, Event, PointerInput, Rules, RulesError, StatusReport};
use lane_defence_system_feedback::Feedback;
use lane_defence_system_placement::Placement;
use lane_defence_system_spawning::{Config as SpawningConfig, SpawnContext, Spawning};
use lane_defence_system_status::StatusEvaluator;
use lane_defence_world::{self as world, query, World};
use tracing::{debug, info};

/// Whether the host should schedule another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// The session is still running.
    Continue,
    /// The session reached a terminal outcome; no further ticks will run.
    Halt,
}

/// Result of a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// Status published after the tick.
    pub status: StatusReport,
    /// Continuation decision for the host.
    pub control: FrameControl,
}

/// Host primitive that supplies pointer input for the next frame.
pub trait FrameScheduler {
    /// Requests the next frame, returning `None` when the host stops scheduling.
    fn next_frame(&mut self) -> Option<PointerInput>;
}

/// Owns the world and the systems that react to it.
#[derive(Debug)]
pub struct FrameLoop {
    world: World,
    placement: Placement,
    spawning: Spawning,
    feedback: Feedback,
    status: StatusEvaluator,
    commands: Vec<Command>,
    events: Vec<Event>,
    last_status: StatusReport,
    halted: bool,
}

impl FrameLoop {
    /// Creates a loop for the provided rules with a seeded spawner.
    ///
    /// # Errors
    ///
    /// Returns an error when the rules fail validation.
    pub fn new(rules: Rules, seed: u64) -> Result<Self, RulesError> {
        let layout = rules.grid_layout();
        let spawning = Spawning::new(SpawningConfig::from_rules(&rules, seed));
        let status = StatusEvaluator::new(rules.winning_score);
        let world = World::new(rules)?;
        let economy = query::economy(&world);

        Ok(Self {
            world,
            placement: Placement::new(layout),
            spawning,
            feedback: Feedback::new(layout),
            status,
            commands: Vec::new(),
            events: Vec::new(),
            last_status: StatusReport {
                score: economy.score,
                resources: economy.resources,
                frame: economy.frame,
                outcome: None,
            },
            halted: false,
        })
    }

    /// Read-only access to the simulated world.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Events broadcast by the world during the most recent tick.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Status published by the most recent tick.
    #[must_use]
    pub const fn status(&self) -> StatusReport {
        self.last_status
    }

    /// Reports whether the loop stopped after a terminal outcome.
    #[must_use]
    pub const fn is_halted(&self) -> bool {
        self.halted
    }

    /// Simulates one frame using the pointer state observed by the host.
    pub fn tick(&mut self, input: PointerInput) -> TickReport {
        if self.halted {
            return TickReport {
                status: self.last_status,
                control: FrameControl::Halt,
            };
        }

        self.events.clear();

        let world_ref = &self.world;
        self.placement.handle(
            input,
            |cell| query::defender_at(world_ref, cell).is_some(),
            &mut self.commands,
        );
        self.commands.push(Command::Tick {
            pointer: input.position,
        });
        self.flush_commands();

        let context = SpawnContext {
            score: query::economy(&self.world).score,
            active_pickups: query::pickup_count(&self.world),
        };
        self.spawning.handle(&self.events, context, &mut self.commands);
        self.feedback.handle(&self.events, &mut self.commands);
        self.flush_commands();

        let _ = self.status.handle(
            query::economy(&self.world),
            query::enemy_count(&self.world),
            query::outcome(&self.world),
            &mut self.commands,
        );
        self.flush_commands();

        let economy = query::economy(&self.world);
        let status = StatusReport {
            score: economy.score,
            resources: economy.resources,
            frame: economy.frame,
            outcome: query::outcome(&self.world),
        };
        self.last_status = status;

        let control = if let Some(outcome) = status.outcome {
            self.halted = true;
            info!(
                ?outcome,
                score = status.score,
                frame = status.frame,
                "frame loop halted"
            );
            FrameControl::Halt
        } else {
            FrameControl::Continue
        };

        TickReport { status, control }
    }

    /// Ticks once per frame supplied by the scheduler until it stops or the session ends.
    pub fn run<S>(&mut self, scheduler: &mut S) -> StatusReport
    where
        S: FrameScheduler + ?Sized,
    {
        while !self.halted {
            let Some(input) = scheduler.next_frame() else {
                debug!(frame = self.last_status.frame, "scheduler stopped");
                break;
            };
            let _ = self.tick(input);
        }
        self.last_status
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }
}
