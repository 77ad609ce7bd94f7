//! Floating text overlays that drift upward and fade.

use lane_defence_core::{FieldPoint, MessageSnapshot, MessageTint, Rules};

#[derive(Clone, Debug)]
struct Message {
    text: String,
    position: FieldPoint,
    size: f32,
    tint: MessageTint,
    opacity: f32,
    age: u32,
}

#[derive(Debug, Default)]
pub(crate) struct MessageBoard {
    entries: Vec<Message>,
}

impl MessageBoard {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn show(&mut self, text: String, position: FieldPoint, size: f32, tint: MessageTint) {
        self.entries.push(Message {
            text,
            position,
            size,
            tint,
            opacity: 1.0,
            age: 0,
        });
    }

    pub(crate) fn snapshots(&self) -> Vec<MessageSnapshot> {
        self.entries
            .iter()
            .map(|message| MessageSnapshot {
                text: message.text.clone(),
                position: message.position,
                size: message.size,
                tint: message.tint,
                opacity: message.opacity,
            })
            .collect()
    }

    pub(crate) fn update(&mut self, rules: &Rules) {
        for message in &mut self.entries {
            message.position.y -= rules.message_drift;
            message.age = message.age.saturating_add(1);
            if message.opacity > rules.message_opacity_floor {
                message.opacity =
                    (message.opacity - rules.message_fade).max(rules.message_opacity_floor);
            }
        }
        self.entries
            .retain(|message| message.age < rules.message_lifespan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_drift_fade_and_expire() {
        let rules = Rules::classic();
        let mut board = MessageBoard::new();
        board.show("+20".into(), FieldPoint::new(100.0, 100.0), 30.0, MessageTint::Reward);

        board.update(&rules);
        let snapshot = &board.snapshots()[0];
        assert!((snapshot.position.y - 99.7).abs() < 1e-4);
        assert!((snapshot.opacity - 0.97).abs() < 1e-4);

        for _ in 1..49 {
            board.update(&rules);
        }
        assert_eq!(board.snapshots().len(), 1);
        assert!(board.snapshots()[0].opacity > 0.0);

        board.update(&rules);
        assert!(board.snapshots().is_empty());
    }

    #[test]
    fn fading_stops_at_the_opacity_floor() {
        let rules = Rules {
            message_fade: 0.3,
            message_opacity_floor: 0.2,
            ..Rules::classic()
        };
        let mut board = MessageBoard::new();
        board.show("+10".into(), FieldPoint::new(0.0, 50.0), 30.0, MessageTint::Status);

        let mut seen = Vec::new();
        for _ in 0..4 {
            board.update(&rules);
            seen.push(board.snapshots()[0].opacity);
        }

        assert!((seen[0] - 0.7).abs() < 1e-4);
        assert!((seen[1] - 0.4).abs() < 1e-4);
        assert!((seen[2] - 0.2).abs() < 1e-4);
        assert!((seen[3] - 0.2).abs() < 1e-4);
    }
}
