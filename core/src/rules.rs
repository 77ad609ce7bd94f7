//! Tunable constants that define a Lane Defence session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GridLayout;

/// Decreasing cooldown between enemy spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnSchedule {
    /// Interval, in ticks, used for the first spawn.
    pub start: u32,
    /// Amount subtracted from the interval after every spawn.
    pub step: u32,
    /// Smallest interval the schedule ever reaches.
    pub floor: u32,
}

impl SpawnSchedule {
    /// Interval that follows `current` once a spawn happened.
    ///
    /// The result never drops below [`SpawnSchedule::floor`].
    #[must_use]
    pub fn next(&self, current: u32) -> u32 {
        current.saturating_sub(self.step).max(self.floor)
    }
}

impl Default for SpawnSchedule {
    fn default() -> Self {
        Self {
            start: 600,
            step: 40,
            floor: 100,
        }
    }
}

/// Complete rule set for a session.
///
/// Missing fields fall back to the classic rules when deserializing, so rule
/// files only need to mention the values they override.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Width of the play field.
    pub field_width: f32,
    /// Height of the play field, including the status bar.
    pub field_height: f32,
    /// Side length of a grid cell.
    pub cell_size: f32,
    /// Inset between a cell border and its occupant.
    pub cell_gap: f32,
    /// Resources available when the session starts.
    pub starting_resources: u32,
    /// Price of a single defender.
    pub defender_cost: u32,
    /// Health a defender is placed with.
    pub defender_health: f32,
    /// Health a defender loses per tick for every enemy touching it.
    pub contact_damage: f32,
    /// Ticks between consecutive shots of an active defender.
    pub fire_interval: u32,
    /// Distance a projectile travels per tick.
    pub projectile_speed: f32,
    /// Damage a projectile deals on impact.
    pub projectile_power: f32,
    /// Side length of a projectile.
    pub projectile_size: f32,
    /// Health an enemy spawns with.
    pub enemy_health: f32,
    /// Inclusive lower bound of the randomized enemy speed.
    pub enemy_speed_min: f32,
    /// Exclusive upper bound of the randomized enemy speed.
    pub enemy_speed_max: f32,
    /// Divisor applied to an enemy's maximum health to compute its kill reward.
    pub kill_reward_divisor: u32,
    /// Cooldown schedule for enemy spawns.
    pub enemy_schedule: SpawnSchedule,
    /// Ticks between pickup spawns.
    pub pickup_interval: u32,
    /// Maximum number of simultaneously active pickups; zero means unlimited.
    pub pickup_cap: u32,
    /// Reward amounts a pickup may carry.
    pub pickup_amounts: Vec<u32>,
    /// Width of a pickup.
    pub pickup_width: f32,
    /// Height of a pickup.
    pub pickup_height: f32,
    /// Whether collecting a pickup also raises the score.
    pub pickups_award_score: bool,
    /// Score that must be reached, with the field cleared, to win.
    pub winning_score: u32,
    /// Ticks a floating message stays alive.
    pub message_lifespan: u32,
    /// Opacity removed from a floating message every tick.
    pub message_fade: f32,
    /// Lowest opacity a floating message fades to.
    pub message_opacity_floor: f32,
    /// Upward drift of a floating message per tick.
    pub message_drift: f32,
}

impl Rules {
    /// Single short level: unlimited pickups that do not add to the score.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            cell_size: 100.0,
            cell_gap: 3.0,
            starting_resources: 300,
            defender_cost: 100,
            defender_health: 100.0,
            contact_damage: 0.5,
            fire_interval: 50,
            projectile_speed: 5.0,
            projectile_power: 20.0,
            projectile_size: 10.0,
            enemy_health: 100.0,
            enemy_speed_min: 0.4,
            enemy_speed_max: 0.6,
            kill_reward_divisor: 10,
            enemy_schedule: SpawnSchedule::default(),
            pickup_interval: 500,
            pickup_cap: 0,
            pickup_amounts: vec![20, 30, 40],
            pickup_width: 40.0,
            pickup_height: 20.0,
            pickups_award_score: false,
            winning_score: 10,
            message_lifespan: 50,
            message_fade: 0.03,
            message_opacity_floor: 0.01,
            message_drift: 0.3,
        }
    }

    /// Longer level with capped pickups that also count towards the score.
    #[must_use]
    pub fn extended() -> Self {
        Self {
            pickup_cap: 4,
            pickups_award_score: true,
            winning_score: 200,
            ..Self::classic()
        }
    }

    /// Grid geometry derived from the field and cell dimensions.
    #[must_use]
    pub fn grid_layout(&self) -> GridLayout {
        let (columns, rows) = if self.cell_size > 0.0 {
            (
                (self.field_width / self.cell_size).floor().max(0.0) as u32,
                (self.field_height / self.cell_size).floor().max(0.0) as u32,
            )
        } else {
            (0, 0)
        };
        GridLayout::new(
            columns,
            rows,
            self.cell_size,
            self.cell_gap,
            GridLayout::STATUS_BAR_ROWS,
        )
    }

    /// Horizontal position past which projectiles are discarded.
    #[must_use]
    pub fn projectile_limit(&self) -> f32 {
        self.field_width - self.cell_size
    }

    /// Resources and score granted for defeating an enemy with `max_health`.
    #[must_use]
    pub fn kill_reward(&self, max_health: f32) -> u32 {
        if self.kill_reward_divisor == 0 {
            return 0;
        }
        (max_health.max(0.0) / self.kill_reward_divisor as f32).floor() as u32
    }

    fn float_fields(&self) -> [(&'static str, f32); 17] {
        [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("cell_size", self.cell_size),
            ("cell_gap", self.cell_gap),
            ("defender_health", self.defender_health),
            ("contact_damage", self.contact_damage),
            ("projectile_speed", self.projectile_speed),
            ("projectile_power", self.projectile_power),
            ("projectile_size", self.projectile_size),
            ("enemy_health", self.enemy_health),
            ("enemy_speed_min", self.enemy_speed_min),
            ("enemy_speed_max", self.enemy_speed_max),
            ("pickup_width", self.pickup_width),
            ("pickup_height", self.pickup_height),
            ("message_fade", self.message_fade),
            ("message_opacity_floor", self.message_opacity_floor),
            ("message_drift", self.message_drift),
        ]
    }

    /// Checks that the rules describe a playable session.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found, starting with non-finite numbers.
    pub fn validate(&self) -> Result<(), RulesError> {
        if let Some((name, value)) = self
            .float_fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(RulesError::NonFiniteValue { name, value });
        }

        let non_negative = [
            ("contact_damage", self.contact_damage),
            ("projectile_power", self.projectile_power),
            ("pickup_width", self.pickup_width),
            ("pickup_height", self.pickup_height),
            ("message_fade", self.message_fade),
            ("message_opacity_floor", self.message_opacity_floor),
        ];
        if let Some((name, value)) = non_negative.into_iter().find(|(_, value)| *value < 0.0) {
            return Err(RulesError::NegativeValue { name, value });
        }

        let positive = [
            ("defender_health", self.defender_health),
            ("enemy_health", self.enemy_health),
            ("projectile_speed", self.projectile_speed),
            ("projectile_size", self.projectile_size),
        ];
        if let Some((name, value)) = positive.into_iter().find(|(_, value)| *value <= 0.0) {
            return Err(RulesError::NonPositiveValue { name, value });
        }

        if self.message_opacity_floor > 1.0 {
            return Err(RulesError::OpacityFloorOutOfRange {
                floor: self.message_opacity_floor,
            });
        }

        if self.cell_size <= 0.0 {
            return Err(RulesError::NonPositiveCellSize {
                cell_size: self.cell_size,
            });
        }

        if self.cell_gap < 0.0 || self.cell_gap * 2.0 >= self.cell_size {
            return Err(RulesError::GapTooLarge {
                cell_gap: self.cell_gap,
                cell_size: self.cell_size,
            });
        }

        let layout = self.grid_layout();
        if layout.columns() < 2 || layout.lane_count() == 0 {
            return Err(RulesError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
            });
        }

        if self.enemy_speed_min <= 0.0 || self.enemy_speed_max < self.enemy_speed_min {
            return Err(RulesError::InvalidSpeedRange {
                min: self.enemy_speed_min,
                max: self.enemy_speed_max,
            });
        }

        let schedule = self.enemy_schedule;
        if schedule.floor == 0 || schedule.start < schedule.floor {
            return Err(RulesError::InvalidSpawnSchedule {
                start: schedule.start,
                floor: schedule.floor,
            });
        }

        if self.fire_interval == 0 {
            return Err(RulesError::ZeroInterval {
                name: "fire_interval",
            });
        }

        if self.pickup_interval == 0 {
            return Err(RulesError::ZeroInterval {
                name: "pickup_interval",
            });
        }

        if self.pickup_amounts.is_empty() {
            return Err(RulesError::EmptyPickupAmounts);
        }

        if self.kill_reward_divisor == 0 {
            return Err(RulesError::ZeroRewardDivisor);
        }

        Ok(())
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::classic()
    }
}

/// Reasons a rule set is rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RulesError {
    /// Cells must have a positive, finite size.
    #[error("cell size must be positive (received {cell_size})")]
    NonPositiveCellSize {
        /// Provided cell size.
        cell_size: f32,
    },
    /// The inset leaves no room for an occupant inside a cell.
    #[error("cell gap {cell_gap} leaves no room inside a cell of size {cell_size}")]
    GapTooLarge {
        /// Provided cell gap.
        cell_gap: f32,
        /// Provided cell size.
        cell_size: f32,
    },
    /// The field cannot host a status bar, a lane and a projectile margin.
    #[error("field of {width}x{height} needs at least two columns and one lane below the status bar")]
    FieldTooSmall {
        /// Provided field width.
        width: f32,
        /// Provided field height.
        height: f32,
    },
    /// Enemy speeds must be positive and form a non-empty range.
    #[error("enemy speed range {min}..{max} is empty or not positive")]
    InvalidSpeedRange {
        /// Provided lower bound.
        min: f32,
        /// Provided upper bound.
        max: f32,
    },
    /// The spawn floor must be positive and not exceed the starting interval.
    #[error("enemy spawn schedule must start at or above a positive floor (start {start}, floor {floor})")]
    InvalidSpawnSchedule {
        /// Provided starting interval.
        start: u32,
        /// Provided floor.
        floor: u32,
    },
    /// A tick interval was configured as zero.
    #[error("{name} must be positive")]
    ZeroInterval {
        /// Name of the offending field.
        name: &'static str,
    },
    /// Pickups need at least one reward amount.
    #[error("pickup amount set must not be empty")]
    EmptyPickupAmounts,
    /// Kill rewards divide by a positive number.
    #[error("kill reward divisor must be positive")]
    ZeroRewardDivisor,
    /// Every numeric rule must be a finite number.
    #[error("{name} must be a finite number (received {value})")]
    NonFiniteValue {
        /// Name of the offending field.
        name: &'static str,
        /// Provided value.
        value: f32,
    },
    /// Sizes, damage and fade amounts cannot be negative.
    #[error("{name} must not be negative (received {value})")]
    NegativeValue {
        /// Name of the offending field.
        name: &'static str,
        /// Provided value.
        value: f32,
    },
    /// Health, projectile speed and projectile size must be positive.
    #[error("{name} must be positive (received {value})")]
    NonPositiveValue {
        /// Name of the offending field.
        name: &'static str,
        /// Provided value.
        value: f32,
    },
    /// Opacity is a fraction, so its floor cannot exceed one.
    #[error("message opacity floor must lie within 0..=1 (received {floor})")]
    OpacityFloorOutOfRange {
        /// Provided floor.
        floor: f32,
    },
}
