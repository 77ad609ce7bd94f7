#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.

mod defenders;
mod economy;
mod enemies;
mod grid;
mod lanes;
mod messages;
mod pickups;
mod projectiles;

use lane_defence_core::{
    CellCoord, Command, Event, FieldPoint, Lane, Outcome, PlacementError, Rules, RulesError,
    WELCOME_BANNER,
};
use tracing::{debug, info};

use crate::{
    defenders::DefenderPool, economy::Economy, enemies::EnemyPool, grid::Grid,
    lanes::LaneOccupancy, messages::MessageBoard, pickups::PickupPool,
    projectiles::ProjectilePool,
};

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: Rules,
    grid: Grid,
    economy: Economy,
    lanes: LaneOccupancy,
    defenders: DefenderPool,
    projectiles: ProjectilePool,
    enemies: EnemyPool,
    pickups: PickupPool,
    messages: MessageBoard,
    pointer: Option<FieldPoint>,
    outcome: Option<Outcome>,
    frame: u64,
}

impl World {
    /// Creates a world governed by the provided rules.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency reported by [`Rules::validate`].
    pub fn new(rules: Rules) -> Result<Self, RulesError> {
        rules.validate()?;
        let grid = Grid::new(rules.grid_layout());
        Ok(Self {
            banner: WELCOME_BANNER,
            economy: Economy::new(rules.starting_resources),
            lanes: LaneOccupancy::new(),
            defenders: DefenderPool::new(),
            projectiles: ProjectilePool::new(),
            enemies: EnemyPool::new(),
            pickups: PickupPool::new(),
            messages: MessageBoard::new(),
            pointer: None,
            outcome: None,
            frame: 0,
            grid,
            rules,
        })
    }

    fn lane_exists(&self, lane: Lane) -> bool {
        self.grid
            .layout()
            .lane_of(CellCoord::new(0, lane.row()))
            .is_some()
    }

    fn place_defender(&mut self, cell: CellCoord) -> Result<Event, PlacementError> {
        let layout = *self.grid.layout();
        if !layout.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if layout.is_reserved(cell) {
            return Err(PlacementError::ReservedBar);
        }
        if self.defenders.occupant(cell).is_some() {
            return Err(PlacementError::Occupied);
        }
        if !self.economy.try_spend(self.rules.defender_cost) {
            return Err(PlacementError::InsufficientResources);
        }

        let defender = self.defenders.place(cell, &layout, &self.rules);
        Ok(Event::DefenderPlaced {
            defender,
            cell,
            resources: self.economy.resources(),
        })
    }

    fn advance(&mut self, pointer: Option<FieldPoint>, out_events: &mut Vec<Event>) {
        self.pointer = pointer;
        out_events.push(Event::TimeAdvanced { frame: self.frame });

        let layout = *self.grid.layout();
        self.defenders.update(
            &self.rules,
            &layout,
            &self.lanes,
            &mut self.enemies,
            &mut self.projectiles,
            out_events,
        );
        self.pickups.collect(
            pointer,
            &mut self.economy,
            self.rules.pickups_award_score,
            out_events,
        );
        self.projectiles
            .update(self.rules.projectile_limit(), &mut self.enemies);
        self.enemies.update(
            &self.rules,
            &mut self.lanes,
            &mut self.economy,
            &mut self.outcome,
            out_events,
        );
        self.messages.update(&self.rules);

        self.frame = self.frame.saturating_add(1);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Once an outcome has been latched every command is ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    if world.outcome.is_some() {
        return;
    }

    match command {
        Command::Tick { pointer } => world.advance(pointer, out_events),
        Command::PlaceDefender { cell } => match world.place_defender(cell) {
            Ok(event) => {
                debug!(
                    column = cell.column(),
                    row = cell.row(),
                    resources = world.economy.resources(),
                    "defender placed"
                );
                out_events.push(event);
            }
            Err(reason) => {
                debug!(column = cell.column(), row = cell.row(), ?reason, "placement rejected");
                out_events.push(Event::DefenderPlacementRejected { cell, reason });
            }
        },
        Command::SpawnEnemy { lane, speed } => {
            if !world.lane_exists(lane) {
                return;
            }
            let layout = *world.grid.layout();
            let enemy = world.enemies.spawn(lane, speed, &layout, &world.rules);
            world.lanes.occupy(lane);
            out_events.push(Event::EnemySpawned { enemy, lane });
        }
        Command::SpawnPickup { x, lane, amount } => {
            if !world.lane_exists(lane) {
                return;
            }
            let layout = *world.grid.layout();
            let pickup = world.pickups.spawn(x, lane, amount, &layout, &world.rules);
            out_events.push(Event::PickupSpawned { pickup, amount });
        }
        Command::ShowMessage {
            text,
            position,
            size,
            tint,
        } => world.messages.show(text, position, size, tint),
        Command::DeclareVictory => {
            world.outcome = Some(Outcome::Won);
            info!(score = world.economy.score(), "victory declared");
            out_events.push(Event::OutcomeDecided {
                outcome: Outcome::Won,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use lane_defence_core::{
        CellCoord, DefenderId, DefenderSnapshot, EconomySnapshot, EnemySnapshot, GridLayout,
        Lane, MessageSnapshot, Outcome, PickupSnapshot, ProjectileSnapshot, Rules,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Rules the world was created with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Provides read-only access to the grid geometry.
    #[must_use]
    pub fn grid_layout(world: &World) -> &GridLayout {
        world.grid.layout()
    }

    /// Number of placement cells built at start-up.
    #[must_use]
    pub fn grid_cell_count(world: &World) -> usize {
        world.grid.len()
    }

    /// Cells under the pointer observed during the most recent tick.
    #[must_use]
    pub fn hovered_cells(world: &World) -> Vec<CellCoord> {
        world.grid.hovered(world.pointer)
    }

    /// Captures resources, score and the number of simulated ticks.
    #[must_use]
    pub fn economy(world: &World) -> EconomySnapshot {
        EconomySnapshot {
            resources: world.economy.resources(),
            score: world.economy.score(),
            frame: world.frame,
        }
    }

    /// Terminal outcome, if one has been latched.
    #[must_use]
    pub fn outcome(world: &World) -> Option<Outcome> {
        world.outcome
    }

    /// Snapshots of every live defender in placement order.
    #[must_use]
    pub fn defenders(world: &World) -> Vec<DefenderSnapshot> {
        world.defenders.snapshots()
    }

    /// Defender standing in the provided cell, if any.
    #[must_use]
    pub fn defender_at(world: &World, cell: CellCoord) -> Option<DefenderId> {
        world.defenders.occupant(cell)
    }

    /// Snapshots of every live enemy in spawn order.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EnemySnapshot> {
        world.enemies.iter().map(|enemy| enemy.snapshot()).collect()
    }

    /// Number of live enemies.
    #[must_use]
    pub fn enemy_count(world: &World) -> usize {
        world.enemies.len()
    }

    /// Snapshots of every projectile in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world.projectiles.snapshots()
    }

    /// Snapshots of every uncollected pickup.
    #[must_use]
    pub fn pickups(world: &World) -> Vec<PickupSnapshot> {
        world.pickups.snapshots()
    }

    /// Number of uncollected pickups.
    #[must_use]
    pub fn pickup_count(world: &World) -> usize {
        world.pickups.len()
    }

    /// Snapshots of every live floating message.
    #[must_use]
    pub fn messages(world: &World) -> Vec<MessageSnapshot> {
        world.messages.snapshots()
    }

    /// Number of live enemies travelling along the lane.
    #[must_use]
    pub fn lane_population(world: &World, lane: Lane) -> u32 {
        world.lanes.population(lane)
    }

    /// Lanes containing at least one enemy, top to bottom.
    #[must_use]
    pub fn occupied_lanes(world: &World) -> Vec<Lane> {
        world.lanes.occupied()
    }
}
