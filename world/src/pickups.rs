//! Resource pickups collected by hovering the pointer over them.

use lane_defence_core::{Event, FieldPoint, GridLayout, Lane, PickupId, PickupSnapshot, Rect, Rules};
use tracing::debug;

use crate::economy::Economy;

#[derive(Clone, Debug)]
struct Pickup {
    id: PickupId,
    bounds: Rect,
    amount: u32,
}

#[derive(Debug)]
pub(crate) struct PickupPool {
    entries: Vec<Pickup>,
    next_id: u32,
}

impl PickupPool {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn snapshots(&self) -> Vec<PickupSnapshot> {
        self.entries
            .iter()
            .map(|pickup| PickupSnapshot {
                id: pickup.id,
                bounds: pickup.bounds,
                amount: pickup.amount,
            })
            .collect()
    }

    pub(crate) fn spawn(
        &mut self,
        x: f32,
        lane: Lane,
        amount: u32,
        layout: &GridLayout,
        rules: &Rules,
    ) -> PickupId {
        let id = PickupId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.entries.push(Pickup {
            id,
            bounds: Rect::new(
                x,
                layout.lane_top(lane),
                rules.pickup_width,
                rules.pickup_height,
            ),
            amount,
        });
        id
    }

    /// Collects every pickup under the pointer.
    pub(crate) fn collect(
        &mut self,
        pointer: Option<FieldPoint>,
        economy: &mut Economy,
        award_score: bool,
        out: &mut Vec<Event>,
    ) {
        let Some(point) = pointer else {
            return;
        };
        let cursor = Rect::pointer(point);

        self.entries.retain(|pickup| {
            if !pickup.bounds.overlaps(&cursor) {
                return true;
            }
            economy.credit(pickup.amount, award_score);
            debug!(pickup = pickup.id.get(), amount = pickup.amount, "pickup collected");
            out.push(Event::PickupCollected {
                pickup: pickup.id,
                amount: pickup.amount,
                position: pickup.bounds.origin(),
            });
            false
        });
    }
}
