//! Projectile pool: straight-line flight to the right and first-hit damage.

use lane_defence_core::{FieldPoint, ProjectileId, ProjectileSnapshot, Rect, Rules};

use crate::enemies::EnemyPool;

#[derive(Clone, Debug)]
struct Projectile {
    id: ProjectileId,
    bounds: Rect,
    power: f32,
    speed: f32,
}

#[derive(Debug)]
pub(crate) struct ProjectilePool {
    entries: Vec<Projectile>,
    next_id: u32,
}

impl ProjectilePool {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn snapshots(&self) -> Vec<ProjectileSnapshot> {
        self.entries
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                bounds: projectile.bounds,
                power: projectile.power,
            })
            .collect()
    }

    /// Launches a projectile whose upper-left corner sits at `origin`.
    pub(crate) fn launch(&mut self, origin: FieldPoint, rules: &Rules) -> ProjectileId {
        let id = ProjectileId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Projectile {
            id,
            bounds: Rect::new(
                origin.x,
                origin.y,
                rules.projectile_size,
                rules.projectile_size,
            ),
            power: rules.projectile_power,
            speed: rules.projectile_speed,
        });
        id
    }

    /// Advances every projectile, resolving hits against the enemy pool.
    ///
    /// A projectile damages at most one enemy and is removed on impact or once
    /// its left edge passes `limit`.
    pub(crate) fn update(&mut self, limit: f32, enemies: &mut EnemyPool) {
        self.entries.retain_mut(|projectile| {
            projectile.bounds.x += projectile.speed;
            if enemies.strike(&projectile.bounds, projectile.power) {
                return false;
            }
            projectile.bounds.x <= limit
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::Lane;

    #[test]
    fn projectiles_leave_once_past_the_limit() {
        let rules = Rules::classic();
        let mut pool = ProjectilePool::new();
        let mut enemies = EnemyPool::new();
        let _ = pool.launch(FieldPoint::new(696.0, 350.0), &rules);

        pool.update(rules.projectile_limit(), &mut enemies);
        assert_eq!(pool.snapshots().len(), 0);
    }

    #[test]
    fn projectile_is_consumed_by_its_first_hit() {
        let rules = Rules::classic();
        let layout = rules.grid_layout();
        let mut pool = ProjectilePool::new();
        let mut enemies = EnemyPool::new();
        let _ = enemies.spawn(Lane::new(3), 0.5, &layout, &rules);
        let _ = pool.launch(FieldPoint::new(792.0, 350.0), &rules);

        pool.update(1_000.0, &mut enemies);

        assert!(pool.snapshots().is_empty());
        let health = enemies.iter().next().expect("enemy").snapshot().health;
        assert!((health - 80.0).abs() < f32::EPSILON);
    }
}
