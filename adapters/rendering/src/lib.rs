#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Lane Defence adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use lane_defence_core::{
    Banner, CellCoord, DefenderSnapshot, EnemySnapshot, FieldPoint, GridLayout, MessageSnapshot,
    MessageTint, PickupSnapshot, PointerInput, ProjectileSnapshot, Rect,
};
use std::{error::Error, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with its alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

/// Colors used for every element of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Status bar fill.
    pub status_bar: Color,
    /// Outline of the hovered cell.
    pub cell_outline: Color,
    /// Defender body.
    pub defender: Color,
    /// Health label drawn on defenders.
    pub defender_label: Color,
    /// Enemy body.
    pub enemy: Color,
    /// Health label drawn on enemies.
    pub enemy_label: Color,
    /// Projectile fill.
    pub projectile: Color,
    /// Pickup body.
    pub pickup: Color,
    /// Amount label drawn on pickups.
    pub pickup_label: Color,
    /// Score and resource counters.
    pub hud: Color,
    /// Terminal banner text.
    pub banner: Color,
    /// Reward messages floating at the entity that produced them.
    pub reward: Color,
    /// Reward echoes inside the status bar.
    pub status: Color,
    /// Warnings such as a failed purchase.
    pub warning: Color,
}

impl Palette {
    /// Color used for a floating message with the provided tint and opacity.
    #[must_use]
    pub fn message(&self, tint: MessageTint, opacity: f32) -> Color {
        let base = match tint {
            MessageTint::Reward => self.reward,
            MessageTint::Status => self.status,
            MessageTint::Warning => self.warning,
        };
        base.with_alpha(opacity)
    }
}

impl Default for Palette {
    fn default() -> Self {
        let gold = Color::from_rgb_u8(0xff, 0xd7, 0x00);
        Self {
            status_bar: Color::from_rgb_u8(0x6c, 0x52, 0xa0),
            cell_outline: Color::from_rgb_u8(0, 0, 0),
            defender: Color::from_rgb_u8(0x00, 0x80, 0x00),
            defender_label: gold,
            enemy: Color::from_rgb_u8(0xff, 0x00, 0x00),
            enemy_label: Color::from_rgb_u8(0xff, 0xc0, 0xcb),
            projectile: Color::from_rgb_u8(0x00, 0x00, 0xff),
            pickup: Color::from_rgb_u8(0xff, 0xa5, 0x00),
            pickup_label: Color::from_rgb_u8(0xff, 0xff, 0xff),
            hud: gold,
            banner: Color::from_rgb_u8(0, 0, 0),
            reward: Color::from_rgb_u8(0x00, 0x00, 0x00),
            status: gold,
            warning: Color::from_rgb_u8(0x00, 0x00, 0xff),
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position expressed in field units, present only while over the field.
    pub cursor_world_space: Option<Vec2>,
    /// Whether the adapter detected a primary click on this frame.
    pub confirm_action: bool,
}

impl FrameInput {
    /// Converts the adapter input into the pointer state consumed by the simulation.
    #[must_use]
    pub fn pointer(&self) -> PointerInput {
        PointerInput::new(
            self.cursor_world_space
                .map(|cursor| FieldPoint::new(cursor.x, cursor.y)),
            self.confirm_action,
        )
    }
}

/// Describes the cell layout and status bar of the play field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of columns in the field.
    pub columns: u32,
    /// Number of rows in the field, including the status bar.
    pub rows: u32,
    /// Side length of a cell in field units.
    pub cell_size: f32,
    /// Rows at the top of the field reserved for the status bar.
    pub reserved_rows: u32,
}

impl GridPresentation {
    /// Creates a grid descriptor after validating the cell size.
    pub fn new(
        columns: u32,
        rows: u32,
        cell_size: f32,
        reserved_rows: u32,
    ) -> Result<Self, RenderingError> {
        if cell_size <= 0.0 || !cell_size.is_finite() {
            return Err(RenderingError::InvalidCellSize { cell_size });
        }

        Ok(Self {
            columns,
            rows,
            cell_size,
            reserved_rows,
        })
    }

    /// Builds a grid descriptor that mirrors the simulation layout.
    pub fn from_layout(layout: &GridLayout) -> Result<Self, RenderingError> {
        Self::new(
            layout.columns(),
            layout.rows(),
            layout.cell_size(),
            GridLayout::STATUS_BAR_ROWS,
        )
    }

    /// Width of the field in field units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Height of the field in field units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Height of the status bar in field units.
    #[must_use]
    pub fn bar_height(&self) -> f32 {
        self.reserved_rows as f32 * self.cell_size
    }

    /// Upper-left corner of the cell in field units.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            cell.column() as f32 * self.cell_size,
            cell.row() as f32 * self.cell_size,
        )
    }

    /// Reports whether the position lies on the field.
    #[must_use]
    pub fn contains(&self, position: Vec2) -> bool {
        position.x >= 0.0
            && position.y >= 0.0
            && position.x < self.width()
            && position.y < self.height()
    }
}

fn origin_of(bounds: &Rect) -> Vec2 {
    Vec2::new(bounds.x, bounds.y)
}

fn size_of(bounds: &Rect) -> Vec2 {
    Vec2::new(bounds.width, bounds.height)
}

/// Presentation data describing a defender.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderPresentation {
    /// Upper-left corner in field units.
    pub origin: Vec2,
    /// Extent in field units.
    pub size: Vec2,
    /// Remaining health.
    pub health: f32,
    /// Whether the defender is currently engaging an enemy.
    pub shooting: bool,
}

impl From<&DefenderSnapshot> for DefenderPresentation {
    fn from(snapshot: &DefenderSnapshot) -> Self {
        Self {
            origin: origin_of(&snapshot.bounds),
            size: size_of(&snapshot.bounds),
            health: snapshot.health,
            shooting: snapshot.shooting,
        }
    }
}

/// Presentation data describing an enemy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Upper-left corner in field units.
    pub origin: Vec2,
    /// Extent in field units.
    pub size: Vec2,
    /// Remaining health.
    pub health: f32,
    /// Health the enemy spawned with.
    pub max_health: f32,
}

impl EnemyPresentation {
    /// Remaining health as a fraction of the spawn health.
    #[must_use]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }
}

impl From<&EnemySnapshot> for EnemyPresentation {
    fn from(snapshot: &EnemySnapshot) -> Self {
        Self {
            origin: origin_of(&snapshot.bounds),
            size: size_of(&snapshot.bounds),
            health: snapshot.health,
            max_health: snapshot.max_health,
        }
    }
}

/// Presentation data describing a projectile, drawn as a disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectilePresentation {
    /// Centre of the disc in field units.
    pub center: Vec2,
    /// Radius of the disc in field units.
    pub radius: f32,
}

impl From<&ProjectileSnapshot> for ProjectilePresentation {
    fn from(snapshot: &ProjectileSnapshot) -> Self {
        Self {
            center: origin_of(&snapshot.bounds),
            radius: snapshot.bounds.width,
        }
    }
}

/// Presentation data describing a resource pickup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickupPresentation {
    /// Upper-left corner in field units.
    pub origin: Vec2,
    /// Extent in field units.
    pub size: Vec2,
    /// Resources awarded on collection.
    pub amount: u32,
}

impl From<&PickupSnapshot> for PickupPresentation {
    fn from(snapshot: &PickupSnapshot) -> Self {
        Self {
            origin: origin_of(&snapshot.bounds),
            size: size_of(&snapshot.bounds),
            amount: snapshot.amount,
        }
    }
}

/// Presentation data describing a floating message.
#[derive(Clone, Debug, PartialEq)]
pub struct MessagePresentation {
    /// Text to draw.
    pub text: String,
    /// Baseline anchor in field units.
    pub position: Vec2,
    /// Font size in field units.
    pub size: f32,
    /// Semantic tint.
    pub tint: MessageTint,
    /// Opacity in the range 0.0..=1.0.
    pub opacity: f32,
}

impl From<&MessageSnapshot> for MessagePresentation {
    fn from(snapshot: &MessageSnapshot) -> Self {
        Self {
            text: snapshot.text.clone(),
            position: Vec2::new(snapshot.position.x, snapshot.position.y),
            size: snapshot.size,
            tint: snapshot.tint,
            opacity: snapshot.opacity,
        }
    }
}

/// Counters shown inside the status bar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HudPresentation {
    /// Cumulative score.
    pub score: u32,
    /// Spendable resources.
    pub resources: u32,
}

impl HudPresentation {
    /// Text lines drawn top to bottom in the status bar.
    #[must_use]
    pub fn lines(&self) -> [String; 2] {
        [
            format!("Score: {}", self.score),
            format!("Resources: {}", self.resources),
        ]
    }
}

/// Scene description combining the field, its inhabitants and the status overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Field layout.
    pub grid: GridPresentation,
    /// Cells currently under the pointer.
    pub hovered_cells: Vec<CellCoord>,
    /// Live defenders.
    pub defenders: Vec<DefenderPresentation>,
    /// Live enemies.
    pub enemies: Vec<EnemyPresentation>,
    /// Projectiles in flight.
    pub projectiles: Vec<ProjectilePresentation>,
    /// Uncollected pickups.
    pub pickups: Vec<PickupPresentation>,
    /// Floating messages.
    pub messages: Vec<MessagePresentation>,
    /// Status bar counters.
    pub hud: HudPresentation,
    /// Terminal banner, once the session ended.
    pub banner: Option<Banner>,
}

impl Scene {
    /// Creates an empty scene for the provided grid.
    #[must_use]
    pub fn new(grid: GridPresentation) -> Self {
        Self {
            grid,
            hovered_cells: Vec::new(),
            defenders: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            messages: Vec::new(),
            hud: HudPresentation::default(),
            banner: None,
        }
    }
}

/// Tells the backend whether the simulation wants further updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SceneUpdate {
    /// Keep calling the update closure every frame.
    Running,
    /// The session ended; keep drawing the last scene without updating it.
    Finished,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Colors used for scene elements.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor using the default palette.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            palette: Palette::default(),
            scene,
        }
    }
}

/// Rendering backend capable of presenting Lane Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives per-frame input captured by
    /// the adapter and may mutate the scene before it is rendered. Once it
    /// returns [`SceneUpdate::Finished`] the backend stops calling it and keeps
    /// presenting the final scene.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> SceneUpdate + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Cells must have a positive, finite size.
    InvalidCellSize {
        /// Provided cell size that failed validation.
        cell_size: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCellSize { cell_size } => {
                write!(f, "cell_size must be positive (received {cell_size})")
            }
        }
    }
}

impl Error for RenderingError {}
