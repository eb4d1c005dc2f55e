#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for the Starfighter core.

mod config;
mod render;
mod simulate;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use starfighter_core::{Command, Difficulty, Event, Rotation, WaveId};
use starfighter_system_selection::Selection;
use starfighter_system_wave_generation::{self as wave_generation, WaveGeneration};
use tracing_subscriber::filter::EnvFilter;

/// Inspect Starfighter wave generation and ship selection from the terminal.
#[derive(Debug, Parser)]
#[command(name = "starfighter")]
struct Cli {
    /// Path to the JSON game configuration.
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Print the lanes of consecutive waves at a fixed difficulty.
    Waves {
        /// Global seed every wave seed is derived from.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Difficulty in [0, 1]; values outside are clamped.
        #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
        difficulty: f32,
        /// Number of waves to print.
        #[arg(long, default_value_t = 10)]
        count: u32,
    },
    /// Play a headless run in which every obstacle escapes.
    Simulate {
        /// Global seed every wave seed is derived from.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Simulated run length in seconds.
        #[arg(long, default_value_t = 60.0)]
        seconds: f64,
        /// Seconds an obstacle needs to cross the playfield.
        #[arg(long, default_value_t = 3.0)]
        travel: f64,
    },
    /// Show the spaceship carousel after rotating it.
    Select {
        /// Steps to rotate; negative values rotate left.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        rotate: i32,
    },
}

fn seconds(value: f64, name: &str) -> Result<Duration> {
    Duration::try_from_secs_f64(value).with_context(|| {
        format!("--{name} must be a non-negative number of seconds, got {value}")
    })
}

fn print_waves(config_path: &Path, seed: u64, difficulty: f32, count: u32) {
    let config = config::load_or_default(config_path);
    let generation = WaveGeneration::new(wave_generation::Config::new(
        seed,
        config.obstacle_health_modifier(),
    ));
    let difficulty = Difficulty::new(difficulty);
    for wave in 0..count {
        let plan = generation.plan_wave(WaveId::new(wave), difficulty);
        println!("{}", render::wave_line(&plan));
    }
}

fn print_simulation(config_path: &Path, seed: u64, length: Duration, travel: Duration) {
    let config = config::load_or_default(config_path);
    let summary = simulate::run(&config, seed, length, travel, |plan| {
        println!("{}", render::wave_line(plan));
    });
    println!(
        "score {} after {} waves in {:.1}s",
        summary.score,
        summary.wave_count,
        length.as_secs_f64()
    );
}

fn print_selection(config_path: &Path, rotate: i32) {
    let config = config::load_or_default(config_path);
    let mut selection = Selection::new(config.spaceship_types().iter().cloned());
    let mut events = Vec::new();
    rotate_carousel(&mut selection, rotate, &mut events);
    selection.handle(&[Command::ConfirmSelection], &mut events);
    println!("{}", render::carousel(&selection.view()));
    if let Some(Event::SpaceshipSelected { spaceship }) = events.last() {
        println!("selected {}", spaceship.name());
    }
}

/// Rotates by `rotate` steps, skipping whole turns of the ring.
fn rotate_carousel(selection: &mut Selection, rotate: i32, out_events: &mut Vec<Event>) {
    let rotation = if rotate.is_negative() {
        Rotation::Left
    } else {
        Rotation::Right
    };
    let len = selection.roster().len().max(1) as u64;
    let steps = u64::from(rotate.unsigned_abs()) % len;
    for _ in 0..steps {
        selection.handle(&[Command::RotateSelection { rotation }], out_events);
    }
}

/// Entry point for the Starfighter command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.mode {
        Mode::Waves {
            seed,
            difficulty,
            count,
        } => print_waves(&cli.config, seed, difficulty, count),
        Mode::Simulate {
            seed,
            seconds: length,
            travel,
        } => print_simulation(
            &cli.config,
            seed,
            seconds(length, "seconds")?,
            seconds(travel, "travel")?,
        ),
        Mode::Select { rotate } => print_selection(&cli.config, rotate),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_line_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_rotation_and_custom_config() {
        let cli = Cli::parse_from([
            "starfighter",
            "select",
            "--rotate",
            "-2",
            "--config",
            "ships.json",
        ]);
        assert_eq!(cli.config, PathBuf::from("ships.json"));
        assert!(matches!(cli.mode, Mode::Select { rotate: -2 }));
    }

    #[test]
    fn negative_durations_are_rejected() {
        assert!(seconds(-1.0, "seconds").is_err());
        assert!(seconds(f64::NAN, "travel").is_err());
        assert_eq!(seconds(1.5, "travel").unwrap(), Duration::from_millis(1_500));
    }

    #[test]
    fn durations_beyond_range_are_rejected() {
        assert!(seconds(1e20, "seconds").is_err());
        assert!(seconds(f64::INFINITY, "travel").is_err());
    }

    fn centred_after(rotate: i32) -> String {
        let config = starfighter_core::GameConfig::default();
        let mut selection = Selection::new(config.spaceship_types().iter().cloned());
        let mut events = Vec::new();
        rotate_carousel(&mut selection, rotate, &mut events);
        render::carousel(&selection.view())
    }

    #[test]
    fn huge_rotations_wrap_around_the_roster() {
        assert_eq!(centred_after(i32::MIN), centred_after(-2));
        assert_eq!(centred_after(2_000_000_000), centred_after(2));
        assert_eq!(centred_after(i32::MAX), centred_after(1));
        assert_ne!(centred_after(1), centred_after(0));
    }

    #[test]
    fn rotation_emits_one_event_per_reduced_step() {
        let mut selection = Selection::new(
            starfighter_core::GameConfig::default()
                .spaceship_types()
                .iter()
                .cloned(),
        );
        let mut events = Vec::new();
        rotate_carousel(&mut selection, -7, &mut events);
        assert_eq!(events.len(), 1);
    }
}
