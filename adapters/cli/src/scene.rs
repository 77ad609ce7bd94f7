//! Copies world snapshots into the presentation scene.

use lane_defence_core::StatusReport;
use lane_defence_rendering::{
    DefenderPresentation, EnemyPresentation, HudPresentation, MessagePresentation,
    PickupPresentation, ProjectilePresentation, Scene,
};
use lane_defence_world::{query, World};

/// Rebuilds every dynamic channel of the scene from the current world state.
pub(crate) fn populate_scene(world: &World, status: StatusReport, scene: &mut Scene) {
    scene.hovered_cells = query::hovered_cells(world);
    scene.defenders = query::defenders(world)
        .iter()
        .map(DefenderPresentation::from)
        .collect();
    scene.enemies = query::enemies(world)
        .iter()
        .map(EnemyPresentation::from)
        .collect();
    scene.projectiles = query::projectiles(world)
        .iter()
        .map(ProjectilePresentation::from)
        .collect();
    scene.pickups = query::pickups(world)
        .iter()
        .map(PickupPresentation::from)
        .collect();
    scene.messages = query::messages(world)
        .iter()
        .map(MessagePresentation::from)
        .collect();
    scene.hud = HudPresentation {
        score: status.score,
        resources: status.resources,
    };
    scene.banner = status.banner();
}

#[cfg(test)]
mod tests {
    use super::*;
    use lane_defence_core::{CellCoord, Command, Lane, Outcome, Rules};
    use lane_defence_rendering::GridPresentation;
    use lane_defence_world::apply;

    #[test]
    fn scene_mirrors_world_snapshots() {
        let rules = Rules::classic();
        let layout = rules.grid_layout();
        let mut world = World::new(rules).expect("valid rules");
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceDefender {
                cell: CellCoord::new(1, 1),
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::SpawnEnemy {
                lane: Lane::new(4),
                speed: 0.5,
            },
            &mut events,
        );

        let mut scene = Scene::new(GridPresentation::from_layout(&layout).expect("grid"));
        let status = StatusReport {
            score: 0,
            resources: 200,
            frame: 0,
            outcome: Some(Outcome::Lost),
        };
        populate_scene(&world, status, &mut scene);

        assert_eq!(scene.defenders.len(), 1);
        assert_eq!(scene.enemies.len(), 1);
        assert_eq!(scene.hud.lines()[1], "Resources: 200");
        assert_eq!(scene.banner, status.banner());
    }
}
