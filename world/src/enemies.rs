//! Enemy pool: leftward movement, contact holds, kill rewards and the loss condition.

use lane_defence_core::{
    EnemyId, EnemySnapshot, Event, FieldPoint, GridLayout, Lane, Outcome, Rect, Rules,
};
use tracing::{debug, info};

use crate::{economy::Economy, lanes::LaneOccupancy};

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    id: EnemyId,
    lane: Lane,
    bounds: Rect,
    speed: f32,
    held: bool,
    health: f32,
    max_health: f32,
}

impl Enemy {
    fn movement(&self) -> f32 {
        if self.held {
            0.0
        } else {
            self.speed
        }
    }

    pub(crate) const fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            lane: self.lane,
            bounds: self.bounds,
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            movement: self.movement(),
        }
    }
}

/// Live enemies in spawn order.
#[derive(Debug)]
pub(crate) struct EnemyPool {
    entries: Vec<Enemy>,
    next_id: u32,
}

impl EnemyPool {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Enemy> {
        self.entries.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Places a new enemy at the right edge of the field.
    pub(crate) fn spawn(
        &mut self,
        lane: Lane,
        speed: f32,
        layout: &GridLayout,
        rules: &Rules,
    ) -> EnemyId {
        let id = EnemyId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let extent = layout.occupant_extent();
        self.entries.push(Enemy {
            id,
            lane,
            bounds: Rect::new(
                rules.field_width,
                layout.lane_top(lane) + layout.cell_gap(),
                extent,
                extent,
            ),
            speed,
            held: false,
            health: rules.enemy_health,
            max_health: rules.enemy_health,
        });
        id
    }

    /// Applies `power` damage to the earliest spawned enemy overlapping `bounds`.
    ///
    /// Returns `true` when an enemy was struck.
    pub(crate) fn strike(&mut self, bounds: &Rect, power: f32) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|enemy| enemy.bounds.overlaps(bounds))
        {
            Some(enemy) => {
                enemy.health -= power;
                true
            }
            None => false,
        }
    }

    /// Holds every enemy that overlaps a surviving defender and releases the rest.
    pub(crate) fn refresh_holds(&mut self, defenders: &[Rect]) {
        for enemy in &mut self.entries {
            enemy.held = defenders
                .iter()
                .any(|defender| defender.overlaps(&enemy.bounds));
        }
    }

    /// Moves every enemy, latches the loss on a breach and removes defeated enemies.
    pub(crate) fn update(
        &mut self,
        rules: &Rules,
        lanes: &mut LaneOccupancy,
        economy: &mut Economy,
        outcome: &mut Option<Outcome>,
        out: &mut Vec<Event>,
    ) {
        for enemy in &mut self.entries {
            enemy.bounds.x -= enemy.movement();
            if enemy.bounds.x < 0.0 && outcome.is_none() {
                *outcome = Some(Outcome::Lost);
                info!(enemy = enemy.id.get(), lane = enemy.lane.row(), "enemy breached the field");
                out.push(Event::EnemyBreached {
                    enemy: enemy.id,
                    lane: enemy.lane,
                });
                out.push(Event::OutcomeDecided {
                    outcome: Outcome::Lost,
                });
            }
        }

        self.entries.retain(|enemy| {
            if enemy.health > 0.0 {
                return true;
            }

            let reward = rules.kill_reward(enemy.max_health);
            economy.credit(reward, true);
            lanes.release(enemy.lane);
            debug!(enemy = enemy.id.get(), reward, "enemy defeated");
            out.push(Event::EnemyDefeated {
                enemy: enemy.id,
                lane: enemy.lane,
                reward,
                position: FieldPoint::new(enemy.bounds.x, enemy.bounds.y),
            });
            false
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (EnemyPool, GridLayout, Rules) {
        let rules = Rules::classic();
        (EnemyPool::new(), rules.grid_layout(), rules)
    }

    #[test]
    fn enemies_enter_at_the_right_edge_of_their_lane() {
        let (mut pool, layout, rules) = setup();
        let _ = pool.spawn(Lane::new(3), 0.5, &layout, &rules);
        let snapshot = pool.iter().next().expect("enemy").snapshot();
        assert_eq!(snapshot.bounds, Rect::new(800.0, 303.0, 94.0, 94.0));
        assert!((snapshot.health - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn overkill_still_pays_a_tenth_of_max_health() {
        let (mut pool, layout, rules) = setup();
        let mut lanes = LaneOccupancy::new();
        let mut economy = Economy::new(0);
        let mut outcome = None;
        let mut events = Vec::new();
        let _ = pool.spawn(Lane::new(1), 0.5, &layout, &rules);
        lanes.occupy(Lane::new(1));

        let target = *pool.iter().next().expect("enemy").bounds();
        assert!(pool.strike(&target, 350.0));
        pool.update(&rules, &mut lanes, &mut economy, &mut outcome, &mut events);

        assert_eq!(pool.len(), 0);
        assert_eq!((economy.resources(), economy.score()), (10, 10));
        assert!(!lanes.is_occupied(Lane::new(1)));
        assert!(outcome.is_none());
    }

    #[test]
    fn strike_hits_earliest_spawned_overlap_only() {
        let (mut pool, layout, rules) = setup();
        let first = pool.spawn(Lane::new(2), 0.5, &layout, &rules);
        let _ = pool.spawn(Lane::new(2), 0.5, &layout, &rules);

        let target = *pool.iter().next().expect("enemy").bounds();
        assert!(pool.strike(&target, 20.0));

        let health: Vec<(EnemyId, f32)> = pool
            .iter()
            .map(|enemy| (enemy.snapshot().id, enemy.snapshot().health))
            .collect();
        assert_eq!(health[0], (first, 80.0));
        assert!((health[1].1 - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn held_enemies_do_not_move() {
        let (mut pool, layout, rules) = setup();
        let mut lanes = LaneOccupancy::new();
        let mut economy = Economy::new(0);
        let mut outcome = None;
        let mut events = Vec::new();
        let _ = pool.spawn(Lane::new(1), 0.5, &layout, &rules);
        let bounds = *pool.iter().next().expect("enemy").bounds();

        pool.refresh_holds(&[bounds]);
        pool.update(&rules, &mut lanes, &mut economy, &mut outcome, &mut events);
        assert_eq!(pool.iter().next().expect("enemy").bounds().x, 800.0);

        pool.refresh_holds(&[]);
        pool.update(&rules, &mut lanes, &mut economy, &mut outcome, &mut events);
        assert!((pool.iter().next().expect("enemy").bounds().x - 799.5).abs() < 1e-4);
    }
}
