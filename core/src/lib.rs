#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command batches.

mod rules;

pub use rules::{Rules, RulesError, SpawnSchedule};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Side length of the square used to represent the pointer during collision tests.
pub const POINTER_EXTENT: f32 = 0.1;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation by exactly one tick.
    Tick {
        /// Pointer position observed for the tick, if the pointer is over the field.
        pointer: Option<FieldPoint>,
    },
    /// Requests placement of a defender inside the provided grid cell.
    PlaceDefender {
        /// Cell that should host the defender.
        cell: CellCoord,
    },
    /// Requests that an enemy enter the field on the provided lane.
    SpawnEnemy {
        /// Lane the enemy travels along.
        lane: Lane,
        /// Intrinsic leftward speed of the enemy in field units per tick.
        speed: f32,
    },
    /// Requests that a collectible resource pickup appear on the field.
    SpawnPickup {
        /// Horizontal position of the pickup's left edge.
        x: f32,
        /// Lane that determines the pickup's vertical position.
        lane: Lane,
        /// Resources awarded when the pickup is collected.
        amount: u32,
    },
    /// Requests a transient cosmetic message overlay.
    ShowMessage {
        /// Text displayed by the message.
        text: String,
        /// Anchor of the message's text baseline.
        position: FieldPoint,
        /// Font size used when presenting the message.
        size: f32,
        /// Semantic tint applied by presentation adapters.
        tint: MessageTint,
    },
    /// Requests that the world latch the winning outcome.
    DeclareVictory,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation processed a tick.
    TimeAdvanced {
        /// Zero-based index of the tick that was simulated.
        frame: u64,
    },
    /// Confirms that a defender was placed.
    DefenderPlaced {
        /// Identifier assigned to the defender.
        defender: DefenderId,
        /// Cell occupied by the defender.
        cell: CellCoord,
        /// Resources remaining after paying for the defender.
        resources: u32,
    },
    /// Reports that a placement request was declined.
    DefenderPlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Reports that a defender ran out of health and was removed.
    DefenderDestroyed {
        /// Identifier of the removed defender.
        defender: DefenderId,
        /// Cell the defender occupied.
        cell: CellCoord,
    },
    /// Confirms that a defender launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Defender that launched the projectile.
        defender: DefenderId,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Lane the enemy travels along.
        lane: Lane,
    },
    /// Reports that an enemy ran out of health and was removed.
    EnemyDefeated {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// Lane the enemy occupied.
        lane: Lane,
        /// Resources and score awarded for the kill.
        reward: u32,
        /// Upper-left corner of the enemy when it was removed.
        position: FieldPoint,
    },
    /// Reports that an enemy crossed the left edge of the field.
    EnemyBreached {
        /// Identifier of the enemy that crossed the edge.
        enemy: EnemyId,
        /// Lane the enemy occupied.
        lane: Lane,
    },
    /// Confirms that a resource pickup appeared on the field.
    PickupSpawned {
        /// Identifier assigned to the pickup.
        pickup: PickupId,
        /// Resources the pickup awards.
        amount: u32,
    },
    /// Reports that the pointer collected a resource pickup.
    PickupCollected {
        /// Identifier of the collected pickup.
        pickup: PickupId,
        /// Resources awarded by the pickup.
        amount: u32,
        /// Upper-left corner of the pickup when it was collected.
        position: FieldPoint,
    },
    /// Announces that the session reached a terminal outcome.
    OutcomeDecided {
        /// Outcome latched by the world.
        outcome: Outcome,
    },
}

/// Reasons a defender placement request may be declined by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies within the reserved status bar.
    ReservedBar,
    /// The requested cell lies outside the grid.
    OutOfBounds,
    /// A defender already occupies the requested cell.
    Occupied,
    /// The player cannot afford another defender.
    InsufficientResources,
}

/// Terminal outcome of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The score threshold was reached and the field was cleared.
    Won,
    /// An enemy crossed the left edge of the field.
    Lost,
}

/// Semantic tint applied to floating messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageTint {
    /// Reward feedback drawn over the field.
    Reward,
    /// Reward feedback mirrored inside the status bar.
    Status,
    /// Warning shown when an action is declined.
    Warning,
}

/// Position expressed in field units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldPoint {
    /// Horizontal coordinate, growing to the right.
    pub x: f32,
    /// Vertical coordinate, growing downward.
    pub y: f32,
}

impl FieldPoint {
    /// Creates a new field point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle expressed in field units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge of the rectangle.
    pub x: f32,
    /// Top edge of the rectangle.
    pub y: f32,
    /// Horizontal extent of the rectangle.
    pub width: f32,
    /// Vertical extent of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the tiny rectangle used to represent the pointer.
    #[must_use]
    pub const fn pointer(point: FieldPoint) -> Self {
        Self::new(point.x, point.y, POINTER_EXTENT, POINTER_EXTENT)
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub const fn origin(&self) -> FieldPoint {
        FieldPoint::new(self.x, self.y)
    }

    /// Right edge of the rectangle.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the rectangle.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Reports whether the rectangle overlaps `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        collision(self, other)
    }
}

/// Reports whether two rectangles overlap.
///
/// Separation is tested with strict comparisons on all four sides, so
/// rectangles that merely touch along an edge count as overlapping.
#[must_use]
pub fn collision(first: &Rect, second: &Rect) -> bool {
    !(first.x > second.right()
        || first.right() < second.x
        || first.y > second.bottom()
        || first.bottom() < second.y)
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Horizontal row along which enemies travel, identified by its grid row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lane(u32);

impl Lane {
    /// Creates a lane identifier from a grid row index.
    #[must_use]
    pub const fn new(row: u32) -> Self {
        Self(row)
    }

    /// Grid row that hosts the lane.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.0
    }
}

/// Fixed cell layout that tiles the field below the reserved status bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    columns: u32,
    rows: u32,
    cell_size: f32,
    cell_gap: f32,
    reserved_rows: u32,
}

impl GridLayout {
    /// Number of rows at the top of the field reserved for the status bar.
    pub const STATUS_BAR_ROWS: u32 = 1;

    /// Creates a new layout description.
    #[must_use]
    pub const fn new(
        columns: u32,
        rows: u32,
        cell_size: f32,
        cell_gap: f32,
        reserved_rows: u32,
    ) -> Self {
        Self {
            columns,
            rows,
            cell_size,
            cell_gap,
            reserved_rows,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid, including the status bar.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Inset applied between a cell's border and its occupant.
    #[must_use]
    pub const fn cell_gap(&self) -> f32 {
        self.cell_gap
    }

    /// Total width of the grid measured in field units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Total height of the grid measured in field units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Height of the reserved status bar.
    #[must_use]
    pub fn bar_height(&self) -> f32 {
        self.reserved_rows as f32 * self.cell_size
    }

    /// Side length of defenders and enemies, which sit inset inside a cell.
    #[must_use]
    pub fn occupant_extent(&self) -> f32 {
        self.cell_size - self.cell_gap * 2.0
    }

    /// Resolves the cell that contains the provided point.
    ///
    /// Returns `None` when the point lies outside the grid.
    #[must_use]
    pub fn cell_at(&self, point: FieldPoint) -> Option<CellCoord> {
        if self.cell_size <= 0.0 || point.x < 0.0 || point.y < 0.0 {
            return None;
        }

        let column = (point.x / self.cell_size).floor() as u32;
        let row = (point.y / self.cell_size).floor() as u32;
        if column >= self.columns || row >= self.rows {
            return None;
        }

        Some(CellCoord::new(column, row))
    }

    /// Reports whether the cell lies within the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Reports whether the cell belongs to the reserved status bar.
    #[must_use]
    pub const fn is_reserved(&self, cell: CellCoord) -> bool {
        cell.row() < self.reserved_rows
    }

    /// Bounds of the cell in field units.
    #[must_use]
    pub fn cell_bounds(&self, cell: CellCoord) -> Rect {
        Rect::new(
            cell.column() as f32 * self.cell_size,
            cell.row() as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Upper-left corner at which an occupant of the cell is drawn.
    #[must_use]
    pub fn placement_origin(&self, cell: CellCoord) -> FieldPoint {
        let bounds = self.cell_bounds(cell);
        FieldPoint::new(bounds.x + self.cell_gap, bounds.y + self.cell_gap)
    }

    /// Lane served by the cell, or `None` for status bar and out-of-grid cells.
    #[must_use]
    pub fn lane_of(&self, cell: CellCoord) -> Option<Lane> {
        if !self.contains(cell) || self.is_reserved(cell) {
            return None;
        }
        Some(Lane::new(cell.row()))
    }

    /// Top edge of the lane's row.
    #[must_use]
    pub fn lane_top(&self, lane: Lane) -> f32 {
        lane.row() as f32 * self.cell_size
    }

    /// Number of lanes available below the status bar.
    #[must_use]
    pub const fn lane_count(&self) -> u32 {
        self.rows.saturating_sub(self.reserved_rows)
    }

    /// Iterator over every lane in top-to-bottom order.
    pub fn lanes(&self) -> impl Iterator<Item = Lane> {
        (self.reserved_rows..self.rows).map(Lane::new)
    }

    /// Iterator over every playable cell in row-major order.
    pub fn playable_cells(&self) -> impl Iterator<Item = CellCoord> {
        let columns = self.columns;
        (self.reserved_rows..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
    }
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a resource pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PickupId(u32);

impl PickupId {
    /// Creates a new pickup identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Pointer observations gathered by an adapter for a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    /// Pointer position in field units, or `None` when the pointer left the field.
    pub position: Option<FieldPoint>,
    /// Whether the player clicked during the frame.
    pub clicked: bool,
}

impl PointerInput {
    /// Creates a pointer observation with explicit field values.
    #[must_use]
    pub const fn new(position: Option<FieldPoint>, clicked: bool) -> Self {
        Self { position, clicked }
    }

    /// Convenience constructor for a click at the provided point.
    #[must_use]
    pub const fn click_at(point: FieldPoint) -> Self {
        Self::new(Some(point), true)
    }
}

/// Spendable and cumulative counters tracked by the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EconomySnapshot {
    /// Currency available for defender placement.
    pub resources: u32,
    /// Cumulative score earned during the session.
    pub score: u32,
    /// Number of ticks simulated so far.
    pub frame: u64,
}

/// Immutable representation of a single defender.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Identifier allocated to the defender.
    pub id: DefenderId,
    /// Cell the defender occupies.
    pub cell: CellCoord,
    /// Bounds of the defender in field units.
    pub bounds: Rect,
    /// Remaining health.
    pub health: f32,
    /// Whether an enemy currently shares the defender's lane.
    pub shooting: bool,
}

/// Immutable representation of a single enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier allocated to the enemy.
    pub id: EnemyId,
    /// Lane the enemy travels along.
    pub lane: Lane,
    /// Bounds of the enemy in field units.
    pub bounds: Rect,
    /// Remaining health.
    pub health: f32,
    /// Health the enemy spawned with.
    pub max_health: f32,
    /// Intrinsic leftward speed.
    pub speed: f32,
    /// Distance the enemy moves on the next tick.
    pub movement: f32,
}

/// Immutable representation of a single projectile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile.
    pub id: ProjectileId,
    /// Bounds of the projectile in field units.
    pub bounds: Rect,
    /// Damage dealt on impact.
    pub power: f32,
}

/// Immutable representation of a single resource pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupSnapshot {
    /// Identifier allocated to the pickup.
    pub id: PickupId,
    /// Bounds of the pickup in field units.
    pub bounds: Rect,
    /// Resources awarded on collection.
    pub amount: u32,
}

/// Immutable representation of a floating message.
#[derive(Clone, Debug, PartialEq)]
pub struct MessageSnapshot {
    /// Text displayed by the message.
    pub text: String,
    /// Anchor of the message's text baseline.
    pub position: FieldPoint,
    /// Font size used when presenting the message.
    pub size: f32,
    /// Semantic tint of the message.
    pub tint: MessageTint,
    /// Current opacity in the range 0.0..=1.0.
    pub opacity: f32,
}

/// Terminal banner displayed over the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Banner {
    /// Loss banner.
    GameOver,
    /// Win banner quoting the final score.
    LevelCompleted {
        /// Score reached when the level was completed.
        score: u32,
    },
}

impl Banner {
    /// Headline text of the banner.
    #[must_use]
    pub const fn headline(&self) -> &'static str {
        match self {
            Self::GameOver => "GAME OVER!!",
            Self::LevelCompleted { .. } => "Level Completed!!",
        }
    }

    /// Optional secondary line displayed below the headline.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::GameOver => None,
            Self::LevelCompleted { score } => Some(format!("You Win With {score}")),
        }
    }
}

/// Status published once per tick after every pool updated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusReport {
    /// Cumulative score.
    pub score: u32,
    /// Spendable resources.
    pub resources: u32,
    /// Number of ticks simulated so far.
    pub frame: u64,
    /// Terminal outcome, once latched.
    pub outcome: Option<Outcome>,
}

impl StatusReport {
    /// Banner that presentation adapters should draw, if any.
    #[must_use]
    pub const fn banner(&self) -> Option<Banner> {
        match self.outcome {
            Some(Outcome::Lost) => Some(Banner::GameOver),
            Some(Outcome::Won) => Some(Banner::LevelCompleted { score: self.score }),
            None => None,
        }
    }

    /// Reports whether the session reached a terminal outcome.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}
