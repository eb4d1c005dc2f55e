#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic schedule that decides when the next wave launches and how hard it is.

use std::time::Duration;

use starfighter_core::{Command, Difficulty, Event, WaveId};

/// Configuration parameters required to construct the wave schedule.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    initial_interval: Duration,
    interval_decay: f32,
    minimum_interval: Duration,
    difficulty_ramp: u32,
}

impl Config {
    /// Creates a new configuration.
    ///
    /// After every launch the interval is multiplied by `interval_decay` but
    /// never drops below `minimum_interval`. Difficulty grows linearly and
    /// saturates once `difficulty_ramp` waves have launched.
    #[must_use]
    pub const fn new(
        initial_interval: Duration,
        interval_decay: f32,
        minimum_interval: Duration,
        difficulty_ramp: u32,
    ) -> Self {
        Self {
            initial_interval,
            interval_decay,
            minimum_interval,
            difficulty_ramp,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(4_500),
            0.97,
            Duration::from_millis(1_650),
            25,
        )
    }
}

/// Pure system that emits wave requests on a shrinking timer while a run is active.
#[derive(Debug)]
pub struct WaveSchedule {
    config: Config,
    interval: Duration,
    accumulator: Duration,
    running: bool,
    next_wave: WaveId,
}

impl WaveSchedule {
    /// Creates a new schedule using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            interval: config.initial_interval,
            accumulator: Duration::ZERO,
            running: false,
            next_wave: WaveId::new(0),
        }
    }

    /// Interval that has to elapse before the next launch.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of waves requested since the current run started.
    #[must_use]
    pub const fn waves_launched(&self) -> u32 {
        self.next_wave.get()
    }

    /// Consumes events and emits `GenerateWave` commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::RunStarted => {
                    self.interval = self.config.initial_interval;
                    self.accumulator = Duration::ZERO;
                    self.next_wave = WaveId::new(0);
                    self.running = true;
                    self.launch(out);
                }
                Event::RunEnded { .. } => {
                    self.running = false;
                    self.accumulator = Duration::ZERO;
                }
                Event::TimeAdvanced { dt } if self.running => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                    self.resolve_launches(out);
                }
                _ => {}
            }
        }
    }

    fn resolve_launches(&mut self, out: &mut Vec<Command>) {
        if self.interval.is_zero() {
            return;
        }

        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            self.interval = self.shrink(self.interval);
            self.launch(out);
        }
    }

    fn shrink(&self, interval: Duration) -> Duration {
        interval
            .mul_f32(self.config.interval_decay.max(0.0))
            .max(self.config.minimum_interval)
    }

    fn launch(&mut self, out: &mut Vec<Command>) {
        let wave = self.next_wave;
        let difficulty = Difficulty::from_progress(wave.get(), self.config.difficulty_ramp);
        tracing::debug!(
            wave = wave.get(),
            difficulty = difficulty.get(),
            interval_ms = self.interval.as_millis() as u64,
            "scheduling wave"
        );
        out.push(Command::GenerateWave { wave, difficulty });
        self.next_wave = wave.next();
    }
}
