#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic procedural wave generation system.
//!
//! [`WaveGenerator`] lays out a single row of obstacles across the lane from
//! any [`RandomSource`]. [`WaveGeneration`] wraps it as a pure system that
//! answers [`Command::GenerateWave`] with reproducible [`WavePlan`]s, seeding
//! each wave independently from a global seed.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use starfighter_core::{Command, Difficulty, Event, RngSource, WaveId, WavePlan};

mod generator;

pub use generator::{Wave, WaveGenerator};
pub use starfighter_core::RandomSource;

const MODIFIER_DIFFICULTY_SLOPE: f32 = 1.2;
const MODIFIER_MIN: f32 = 1.0;
const MODIFIER_MAX: f32 = 2.2;

/// Configuration parameters required to construct the generation system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    global_seed: u64,
    obstacle_health_modifier: f32,
}

impl Config {
    /// Creates a new configuration from a run seed and a global health multiplier.
    #[must_use]
    pub const fn new(global_seed: u64, obstacle_health_modifier: f32) -> Self {
        Self {
            global_seed,
            obstacle_health_modifier,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(0, 1.0)
    }
}

/// Pure system that turns wave requests into deterministic [`WavePlan`] values.
#[derive(Debug)]
pub struct WaveGeneration {
    config: Config,
}

impl WaveGeneration {
    /// Creates a new generation system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Consumes `GenerateWave` commands and emits [`Event::WavePlanned`].
    pub fn handle(&mut self, commands: &[Command], out_events: &mut Vec<Event>) {
        for command in commands {
            if let Command::GenerateWave { wave, difficulty } = command {
                let plan = self.plan_wave(*wave, *difficulty);
                out_events.push(Event::WavePlanned { plan });
            }
        }
    }

    /// Generates the plan for a single wave.
    #[must_use]
    pub fn plan_wave(&self, wave: WaveId, difficulty: Difficulty) -> WavePlan {
        let seed = derive_wave_seed(self.config.global_seed, wave);
        let source = RngSource::new(ChaCha8Rng::seed_from_u64(seed));
        let mut generator = WaveGenerator::new(source);
        let slots: Vec<_> = generator.generate_wave(difficulty.get()).collect();

        let modifier = obstacle_modifier(difficulty);
        let plan = WavePlan::new(
            wave,
            difficulty,
            slots,
            modifier,
            modifier * self.config.obstacle_health_modifier,
        );

        tracing::debug!(
            wave = wave.get(),
            difficulty = difficulty.get(),
            obstacles = plan.obstacle_count(),
            "planned wave"
        );
        plan
    }
}

fn obstacle_modifier(difficulty: Difficulty) -> f32 {
    (difficulty.get() * MODIFIER_DIFFICULTY_SLOPE + 1.0).clamp(MODIFIER_MIN, MODIFIER_MAX)
}

fn derive_wave_seed(global_seed: u64, wave: WaveId) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(global_seed.to_le_bytes());
    hasher.update(wave.get().to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
