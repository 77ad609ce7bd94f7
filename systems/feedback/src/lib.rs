#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure feedback system that answers world events with floating messages.

use lane_defence_core::{Command, Event, FieldPoint, GridLayout, MessageTint, PlacementError};

/// Anchor of reward echoes inside the status bar.
pub const STATUS_ANCHOR: FieldPoint = FieldPoint::new(470.0, 85.0);

/// Text shown when a placement fails for lack of resources.
pub const INSUFFICIENT_RESOURCES_TEXT: &str = "Need more resources";

const REWARD_SIZE: f32 = 30.0;
const WARNING_SIZE: f32 = 20.0;

/// Feedback system bound to the grid used to anchor rejection messages.
#[derive(Clone, Copy, Debug)]
pub struct Feedback {
    layout: GridLayout,
}

impl Feedback {
    /// Creates a feedback system for the provided layout.
    #[must_use]
    pub const fn new(layout: GridLayout) -> Self {
        Self { layout }
    }

    /// Emits `ShowMessage` commands for rewards and funding rejections.
    pub fn handle(&self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::PickupCollected {
                    amount, position, ..
                } => Self::reward(*amount, *position, out),
                Event::EnemyDefeated {
                    reward, position, ..
                } => Self::reward(*reward, *position, out),
                Event::DefenderPlacementRejected {
                    cell,
                    reason: PlacementError::InsufficientResources,
                } => out.push(Command::ShowMessage {
                    text: INSUFFICIENT_RESOURCES_TEXT.to_owned(),
                    position: self.layout.placement_origin(*cell),
                    size: WARNING_SIZE,
                    tint: MessageTint::Warning,
                }),
                _ => {}
            }
        }
    }

    fn reward(amount: u32, position: FieldPoint, out: &mut Vec<Command>) {
        let text = format!("+{amount}");
        out.push(Command::ShowMessage {
            text: text.clone(),
            position,
            size: REWARD_SIZE,
            tint: MessageTint::Reward,
        });
        out.push(Command::ShowMessage {
            text,
            position: STATUS_ANCHOR,
            size: REWARD_SIZE,
            tint: MessageTint::Status,
        });
    }
}
