#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative run state management for Starfighter.

use std::{collections::BTreeMap, time::Duration};

use starfighter_core::{Command, Event, ObstacleOutcome, SpawnError, WaveId, WavePlan};

const WAVE_DESTROYED_SCORE: u32 = 175;
const WAVE_SURVIVED_SCORE: u32 = 100;

/// Lifecycle stage of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// No run has started yet.
    Idle,
    /// Waves are launching and scores are counted.
    Running,
    /// The run finished; score and wave count are final.
    Ended,
}

#[derive(Debug)]
struct ActiveWave {
    remaining: u32,
}

/// Represents the authoritative Starfighter run state.
#[derive(Debug)]
pub struct World {
    phase: RunPhase,
    score: u32,
    wave_count: u32,
    clock: Duration,
    active_waves: BTreeMap<WaveId, ActiveWave>,
}

impl World {
    /// Creates a new world with no run in progress.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: RunPhase::Idle,
            score: 0,
            wave_count: 0,
            clock: Duration::ZERO,
            active_waves: BTreeMap::new(),
        }
    }

    fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    fn score_changed(&self) -> Event {
        Event::ScoreChanged {
            score: self.score,
            wave_count: self.wave_count,
        }
    }

    fn spawn_wave(&mut self, plan: &WavePlan, out_events: &mut Vec<Event>) {
        let wave = plan.wave();
        if !self.is_running() {
            out_events.push(Event::WaveSpawnRejected {
                wave,
                reason: SpawnError::NotRunning,
            });
            return;
        }
        if self.active_waves.contains_key(&wave) {
            out_events.push(Event::WaveSpawnRejected {
                wave,
                reason: SpawnError::DuplicateWave,
            });
            return;
        }

        let obstacles = plan.obstacle_count();
        self.wave_count = self.wave_count.saturating_add(1);
        out_events.push(Event::WaveSpawned { wave, obstacles });

        if obstacles == 0 {
            self.clear_wave(wave, ObstacleOutcome::Escaped, out_events);
            return;
        }

        let _ = self.active_waves.insert(
            wave,
            ActiveWave {
                remaining: obstacles,
            },
        );
        out_events.push(self.score_changed());
    }

    fn resolve_obstacle(
        &mut self,
        wave: WaveId,
        outcome: ObstacleOutcome,
        out_events: &mut Vec<Event>,
    ) {
        if !self.is_running() {
            return;
        }
        let Some(active) = self.active_waves.get_mut(&wave) else {
            return;
        };

        active.remaining = active.remaining.saturating_sub(1);
        if active.remaining == 0 {
            let _ = self.active_waves.remove(&wave);
            self.clear_wave(wave, outcome, out_events);
        }
    }

    fn clear_wave(&mut self, wave: WaveId, outcome: ObstacleOutcome, out_events: &mut Vec<Event>) {
        let award = match outcome {
            ObstacleOutcome::Destroyed => WAVE_DESTROYED_SCORE,
            ObstacleOutcome::Escaped => WAVE_SURVIVED_SCORE,
        };
        self.score = self.score.saturating_add(award);
        out_events.push(Event::WaveCleared {
            wave,
            outcome,
            award,
        });
        out_events.push(self.score_changed());
    }

    fn award(&mut self, amount: i32) {
        self.score = if amount.is_negative() {
            self.score.saturating_sub(amount.unsigned_abs())
        } else {
            self.score.saturating_add(amount.unsigned_abs())
        };
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StartRun => {
            world.phase = RunPhase::Running;
            world.score = 0;
            world.wave_count = 0;
            world.clock = Duration::ZERO;
            world.active_waves.clear();
            tracing::debug!("run started");
            out_events.push(Event::RunStarted);
            out_events.push(world.score_changed());
        }
        Command::Tick { dt } => {
            if world.is_running() {
                world.clock = world.clock.saturating_add(dt);
                out_events.push(Event::TimeAdvanced { dt });
            }
        }
        Command::SpawnWave { plan } => world.spawn_wave(&plan, out_events),
        Command::ResolveObstacle { wave, outcome } => {
            world.resolve_obstacle(wave, outcome, out_events);
        }
        Command::AwardScore { amount } => {
            if world.is_running() {
                world.award(amount);
                out_events.push(world.score_changed());
            }
        }
        Command::EndRun => {
            if world.is_running() {
                world.phase = RunPhase::Ended;
                world.active_waves.clear();
                tracing::debug!(
                    score = world.score,
                    wave_count = world.wave_count,
                    "run ended"
                );
                out_events.push(Event::RunEnded {
                    score: world.score,
                    wave_count: world.wave_count,
                });
            }
        }
        Command::GenerateWave { .. }
        | Command::RotateSelection { .. }
        | Command::ConfirmSelection
        | Command::ReplaceRoster { .. } => {}
    }
}

/// Read-only queries over the world state.
pub mod query {
    use std::time::Duration;

    use starfighter_core::WaveId;

    use super::{RunPhase, World};

    /// Lifecycle stage of the current run.
    #[must_use]
    pub fn phase(world: &World) -> RunPhase {
        world.phase
    }

    /// Current score.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Number of waves spawned during the current run.
    #[must_use]
    pub fn wave_count(world: &World) -> u32 {
        world.wave_count
    }

    /// Simulated time elapsed since the run started.
    #[must_use]
    pub fn clock(world: &World) -> Duration {
        world.clock
    }

    /// Identifiers of waves that still have obstacles in play, in launch order.
    #[must_use]
    pub fn active_waves(world: &World) -> Vec<WaveId> {
        world.active_waves.keys().copied().collect()
    }

    /// Obstacles of the wave still in play, if the wave is active.
    #[must_use]
    pub fn remaining_obstacles(world: &World, wave: WaveId) -> Option<u32> {
        world.active_waves.get(&wave).map(|active| active.remaining)
    }
}
