#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Lane Defence.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use lane_defence_core::Banner;
use lane_defence_rendering::{
    Color, FrameInput, Palette, Presentation, RenderingBackend, Scene, SceneUpdate,
};
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use std::time::Duration;

const DEFENDER_LABEL_SIZE: f32 = 40.0;
const PICKUP_LABEL_SIZE: f32 = 20.0;
const HUD_TEXT_SIZE: f32 = 50.0;
const BANNER_HEADLINE_SIZE: f32 = 100.0;
const BANNER_DETAIL_SIZE: f32 = 50.0;
const BANNER_LEFT: f32 = 180.0;
const HEALTH_BAR_HEIGHT: f32 = 6.0;

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `H` toggles enemy health-bar overlays.
    toggle_health_bars: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            toggle_health_bars: is_key_pressed(KeyCode::H),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints the frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut Scene) -> SceneUpdate + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            palette,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: scene.grid.width().round() as i32,
            window_height: scene.grid.height().round() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut show_health_bars = false;
            let mut finished = false;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }
                if keyboard.toggle_health_bars {
                    show_health_bars = !show_health_bars;
                }

                macroquad::window::clear_background(background);

                let metrics = SceneMetrics::from_scene(
                    &scene,
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );

                if !finished {
                    let frame_input = gather_frame_input(&scene, &metrics);
                    finished = update_scene(frame_input, &mut scene) == SceneUpdate::Finished;
                }

                draw_scene(&scene, &palette, &metrics, show_health_bars);

                let frame_dt =
                    Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                    if show_fps {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Mapping between field units and screen pixels for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let world_width = scene.grid.width();
        let world_height = scene.grid.height();
        let scale = if world_width <= 0.0 || world_height <= 0.0 {
            1.0
        } else {
            (screen_width / world_width).min(screen_height / world_height)
        };

        Self {
            scale,
            offset_x: ((screen_width - world_width * scale) * 0.5).max(0.0),
            offset_y: ((screen_height - world_height * scale) * 0.5).max(0.0),
        }
    }

    fn to_screen(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            self.offset_x + position.x * self.scale,
            self.offset_y + position.y * self.scale,
        )
    }

    fn to_field(&self, screen: Vec2) -> Option<Vec2> {
        if self.scale <= f32::EPSILON {
            return None;
        }
        Some(Vec2::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        ))
    }
}

fn gather_frame_input(scene: &Scene, metrics: &SceneMetrics) -> FrameInput {
    let (cursor_x, cursor_y) = mouse_position();
    gather_frame_input_from_observations(
        scene,
        metrics,
        Vec2::new(cursor_x, cursor_y),
        is_mouse_button_pressed(MouseButton::Left),
    )
}

fn gather_frame_input_from_observations(
    scene: &Scene,
    metrics: &SceneMetrics,
    cursor_position: Vec2,
    confirm_click: bool,
) -> FrameInput {
    let cursor = metrics
        .to_field(cursor_position)
        .filter(|position| scene.grid.contains(*position));

    FrameInput {
        cursor_world_space: cursor,
        confirm_action: confirm_click && cursor.is_some(),
    }
}

fn draw_scene(scene: &Scene, palette: &Palette, metrics: &SceneMetrics, show_health_bars: bool) {
    draw_status_bar(scene, palette, metrics);
    draw_hovered_cells(scene, palette, metrics);
    draw_defenders(scene, palette, metrics);
    draw_enemies(scene, palette, metrics, show_health_bars);
    draw_projectiles(scene, palette, metrics);
    draw_pickups(scene, palette, metrics);
    draw_hud(scene, palette, metrics);
    draw_messages(scene, palette, metrics);
    draw_banner(scene.banner, palette, metrics);
}

fn draw_status_bar(scene: &Scene, palette: &Palette, metrics: &SceneMetrics) {
    let origin = metrics.to_screen(Vec2::ZERO);
    macroquad::shapes::draw_rectangle(
        origin.x,
        origin.y,
        scene.grid.width() * metrics.scale,
        scene.grid.bar_height() * metrics.scale,
        to_macroquad_color(palette.status_bar),
    );
}

fn draw_hovered_cells(scene: &Scene, palette: &Palette, metrics: &SceneMetrics) {
    let extent = scene.grid.cell_size * metrics.scale;
    for cell in &scene.hovered_cells {
        let origin = metrics.to_screen(scene.grid.cell_origin(*cell));
        macroquad::shapes::draw_rectangle_lines(
            origin.x,
            origin.y,
            extent,
            extent,
            1.0,
            to_macroquad_color(palette.cell_outline),
        );
    }
}

#[allow(clippy::too_many_arguments)] // Boxes and labels share one placement path.
fn draw_labelled_box(
    origin: Vec2,
    size: Vec2,
    fill: Color,
    label: &str,
    label_offset: Vec2,
    label_size: f32,
    label_color: Color,
    metrics: &SceneMetrics,
) {
    let screen = metrics.to_screen(origin);
    macroquad::shapes::draw_rectangle(
        screen.x,
        screen.y,
        size.x * metrics.scale,
        size.y * metrics.scale,
        to_macroquad_color(fill),
    );
    let anchor = metrics.to_screen(origin + label_offset);
    let _ = macroquad::text::draw_text(
        label,
        anchor.x,
        anchor.y,
        label_size * metrics.scale,
        to_macroquad_color(label_color),
    );
}

fn draw_defenders(scene: &Scene, palette: &Palette, metrics: &SceneMetrics) {
    for defender in &scene.defenders {
        draw_labelled_box(
            defender.origin,
            defender.size,
            palette.defender,
            &format!("{}", defender.health.floor()),
            Vec2::new(15.0, 30.0),
            DEFENDER_LABEL_SIZE,
            palette.defender_label,
            metrics,
        );
    }
}

fn draw_enemies(scene: &Scene, palette: &Palette, metrics: &SceneMetrics, show_health_bars: bool) {
    for enemy in &scene.enemies {
        draw_labelled_box(
            enemy.origin,
            enemy.size,
            palette.enemy,
            &format!("{}", enemy.health.floor()),
            Vec2::new(15.0, 30.0),
            DEFENDER_LABEL_SIZE,
            palette.enemy_label,
            metrics,
        );

        if show_health_bars {
            let bar = metrics.to_screen(enemy.origin + Vec2::new(0.0, enemy.size.y));
            macroquad::shapes::draw_rectangle(
                bar.x,
                bar.y,
                enemy.size.x * enemy.health_fraction() * metrics.scale,
                HEALTH_BAR_HEIGHT * metrics.scale,
                to_macroquad_color(palette.enemy_label),
            );
        }
    }
}

fn draw_projectiles(scene: &Scene, palette: &Palette, metrics: &SceneMetrics) {
    let color = to_macroquad_color(palette.projectile);
    for projectile in &scene.projectiles {
        let center = metrics.to_screen(projectile.center);
        macroquad::shapes::draw_circle(
            center.x,
            center.y,
            projectile.radius * metrics.scale,
            color,
        );
    }
}

fn draw_pickups(scene: &Scene, palette: &Palette, metrics: &SceneMetrics) {
    for pickup in &scene.pickups {
        draw_labelled_box(
            pickup.origin,
            pickup.size,
            palette.pickup,
            &pickup.amount.to_string(),
            Vec2::new(10.0, 15.0),
            PICKUP_LABEL_SIZE,
            palette.pickup_label,
            metrics,
        );
    }
}

fn draw_hud(scene: &Scene, palette: &Palette, metrics: &SceneMetrics) {
    let color = to_macroquad_color(palette.hud);
    for (index, line) in scene.hud.lines().iter().enumerate() {
        let anchor = metrics.to_screen(Vec2::new(10.0, 40.0 * (index as f32 + 1.0)));
        let _ = macroquad::text::draw_text(
            line,
            anchor.x,
            anchor.y,
            HUD_TEXT_SIZE * metrics.scale,
            color,
        );
    }
}

fn draw_messages(scene: &Scene, palette: &Palette, metrics: &SceneMetrics) {
    for message in &scene.messages {
        let anchor = metrics.to_screen(message.position);
        let _ = macroquad::text::draw_text(
            &message.text,
            anchor.x,
            anchor.y,
            message.size * metrics.scale,
            to_macroquad_color(palette.message(message.tint, message.opacity)),
        );
    }
}

fn banner_lines(banner: Banner) -> Vec<(String, Vec2, f32)> {
    match banner.detail() {
        None => vec![(
            banner.headline().to_owned(),
            Vec2::new(BANNER_LEFT, 350.0),
            BANNER_HEADLINE_SIZE,
        )],
        Some(detail) => vec![
            (
                banner.headline().to_owned(),
                Vec2::new(BANNER_LEFT, 300.0),
                BANNER_HEADLINE_SIZE,
            ),
            (detail, Vec2::new(BANNER_LEFT, 350.0), BANNER_DETAIL_SIZE),
        ],
    }
}

fn draw_banner(banner: Option<Banner>, palette: &Palette, metrics: &SceneMetrics) {
    let Some(banner) = banner else {
        return;
    };
    let color = to_macroquad_color(palette.banner);
    for (text, position, size) in banner_lines(banner) {
        let anchor = metrics.to_screen(position);
        let _ = macroquad::text::draw_text(&text, anchor.x, anchor.y, size * metrics.scale, color);
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
