//! Defender pool: lane-gated firing and contact attrition.

use lane_defence_core::{
    CellCoord, DefenderId, DefenderSnapshot, Event, FieldPoint, GridLayout, Rect, Rules,
};
use tracing::debug;

use crate::{enemies::EnemyPool, lanes::LaneOccupancy, projectiles::ProjectilePool};

#[derive(Clone, Debug)]
struct Defender {
    id: DefenderId,
    cell: CellCoord,
    bounds: Rect,
    health: f32,
    shooting: bool,
    timer: u32,
}

impl Defender {
    fn muzzle(&self) -> FieldPoint {
        FieldPoint::new(
            self.bounds.right(),
            self.bounds.y + self.bounds.height / 2.0,
        )
    }
}

#[derive(Debug)]
pub(crate) struct DefenderPool {
    entries: Vec<Defender>,
    next_id: u32,
}

impl DefenderPool {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Defender standing in `cell`, if any.
    pub(crate) fn occupant(&self, cell: CellCoord) -> Option<DefenderId> {
        self.entries
            .iter()
            .find(|defender| defender.cell == cell)
            .map(|defender| defender.id)
    }

    pub(crate) fn snapshots(&self) -> Vec<DefenderSnapshot> {
        self.entries
            .iter()
            .map(|defender| DefenderSnapshot {
                id: defender.id,
                cell: defender.cell,
                bounds: defender.bounds,
                health: defender.health,
                shooting: defender.shooting,
            })
            .collect()
    }

    pub(crate) fn place(&mut self, cell: CellCoord, layout: &GridLayout, rules: &Rules) -> DefenderId {
        let id = DefenderId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let origin = layout.placement_origin(cell);
        let extent = layout.occupant_extent();
        self.entries.push(Defender {
            id,
            cell,
            bounds: Rect::new(origin.x, origin.y, extent, extent),
            health: rules.defender_health,
            shooting: false,
            timer: 0,
        });
        id
    }

    /// Runs one tick of firing and contact damage, then refreshes enemy holds.
    pub(crate) fn update(
        &mut self,
        rules: &Rules,
        layout: &GridLayout,
        lanes: &LaneOccupancy,
        enemies: &mut EnemyPool,
        projectiles: &mut ProjectilePool,
        out: &mut Vec<Event>,
    ) {
        for defender in &mut self.entries {
            defender.shooting = layout
                .lane_of(defender.cell)
                .map_or(false, |lane| lanes.is_occupied(lane));

            if defender.shooting {
                defender.timer = defender.timer.saturating_add(1);
                if defender.timer >= rules.fire_interval {
                    defender.timer = 0;
                    let projectile = projectiles.launch(defender.muzzle(), rules);
                    out.push(Event::ProjectileFired {
                        projectile,
                        defender: defender.id,
                    });
                }
            } else {
                defender.timer = 0;
            }

            let contacts = enemies
                .iter()
                .filter(|enemy| enemy.bounds().overlaps(&defender.bounds))
                .count();
            defender.health -= rules.contact_damage * contacts as f32;
        }

        self.entries.retain(|defender| {
            if defender.health > 0.0 {
                return true;
            }
            debug!(defender = defender.id.get(), "defender destroyed");
            out.push(Event::DefenderDestroyed {
                defender: defender.id,
                cell: defender.cell,
            });
            false
        });

        let bounds: Vec<Rect> = self.entries.iter().map(|defender| defender.bounds).collect();
        enemies.refresh_holds(&bounds);
    }
}
