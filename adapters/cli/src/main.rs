#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Lane Defence experience.

mod rules_file;
mod scene;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lane_defence_core::PointerInput;
use lane_defence_rendering::{
    Color, GridPresentation, Presentation, RenderingBackend, Scene, SceneUpdate,
};
use lane_defence_rendering_macroquad::MacroquadBackend;
use lane_defence_system_frame_loop::{FrameControl, FrameLoop, FrameScheduler};
use lane_defence_world::query;
use tracing::info;

use crate::{rules_file::RulesPreset, scene::populate_scene};

/// Command-line arguments accepted by the Lane Defence binary.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", about = "Defend five lanes against advancing enemies")]
struct CliArgs {
    /// Built-in rule preset.
    #[arg(long, value_enum, default_value_t = RulesPreset::Classic)]
    rules: RulesPreset,
    /// TOML file overriding the preset; omitted keys use classic values.
    #[arg(long, value_name = "PATH")]
    rules_file: Option<PathBuf>,
    /// Seed for the spawner; a random seed is drawn when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Simulate the given number of ticks without opening a window.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    vsync: bool,
    /// Print the frame rate once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Supplies idle frames until the tick budget is spent.
#[derive(Debug)]
struct HeadlessScheduler {
    remaining: u64,
}

impl FrameScheduler for HeadlessScheduler {
    fn next_frame(&mut self) -> Option<PointerInput> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(PointerInput::default())
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing();

    let rules = rules_file::load_rules(args.rules, args.rules_file.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let layout = rules.grid_layout();
    let mut frame_loop =
        FrameLoop::new(rules, seed).context("failed to start the simulation")?;
    info!(
        seed,
        banner = query::welcome_banner(frame_loop.world()),
        "session started"
    );

    if let Some(ticks) = args.headless {
        let status = frame_loop.run(&mut HeadlessScheduler { remaining: ticks });
        info!(
            score = status.score,
            resources = status.resources,
            frame = status.frame,
            outcome = ?status.outcome,
            "headless run finished"
        );
        if let Some(banner) = status.banner() {
            println!("{}", banner.headline());
            if let Some(detail) = banner.detail() {
                println!("{detail}");
            }
        }
        return Ok(());
    }

    let grid = GridPresentation::from_layout(&layout).context("invalid field layout")?;
    let mut scene = Scene::new(grid);
    populate_scene(frame_loop.world(), frame_loop.status(), &mut scene);

    MacroquadBackend::new()
        .with_vsync(args.vsync)
        .with_show_fps(args.show_fps)
        .run(
            Presentation::new("Lane Defence", Color::from_rgb_u8(0xff, 0xff, 0xff), scene),
            move |input, scene| {
                let report = frame_loop.tick(input.pointer());
                populate_scene(frame_loop.world(), report.status, scene);
                match report.control {
                    FrameControl::Continue => SceneUpdate::Running,
                    FrameControl::Halt => SceneUpdate::Finished,
                }
            },
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headless_scheduler_stops_after_budget() {
        let mut scheduler = HeadlessScheduler { remaining: 2 };
        assert!(scheduler.next_frame().is_some());
        assert!(scheduler.next_frame().is_some());
        assert!(scheduler.next_frame().is_none());
    }

    #[test]
    fn arguments_parse_with_defaults() {
        let args = CliArgs::try_parse_from(["lane-defence"]).expect("defaults parse");
        assert_eq!(args.rules, RulesPreset::Classic);
        assert!(args.vsync);
        assert!(args.headless.is_none());

        let args = CliArgs::try_parse_from([
            "lane-defence",
            "--rules",
            "extended",
            "--seed",
            "9",
            "--headless",
            "500",
        ])
        .expect("explicit flags parse");
        assert_eq!(args.rules, RulesPreset::Extended);
        assert_eq!((args.seed, args.headless), (Some(9), Some(500)));
    }
}
