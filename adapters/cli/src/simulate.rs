//! Headless run driving the world, the schedule and wave generation together.

use std::time::Duration;

use starfighter_core::{Command, Event, GameConfig, ObstacleOutcome, WaveId, WavePlan};
use starfighter_system_wave_generation::{self as wave_generation, WaveGeneration};
use starfighter_system_wave_schedule::{self as wave_schedule, WaveSchedule};
use starfighter_world::{self as world, query, World};

const TICK: Duration = Duration::from_millis(100);

/// Final bookkeeping of a simulated run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) score: u32,
    pub(crate) wave_count: u32,
}

#[derive(Debug)]
struct InFlight {
    wave: WaveId,
    obstacles: u32,
    escapes_at: Duration,
}

/// Plays a run for `length` of simulated time in which every obstacle escapes
/// `travel` after its wave spawned. `on_plan` observes each spawned plan.
pub(crate) fn run<F>(
    config: &GameConfig,
    seed: u64,
    length: Duration,
    travel: Duration,
    mut on_plan: F,
) -> Summary
where
    F: FnMut(&WavePlan),
{
    let mut world = World::new();
    let mut schedule = WaveSchedule::new(wave_schedule::Config::default());
    let mut generation = WaveGeneration::new(wave_generation::Config::new(
        seed,
        config.obstacle_health_modifier(),
    ));
    let mut in_flight: Vec<InFlight> = Vec::new();

    let mut events = Vec::new();
    world::apply(&mut world, Command::StartRun, &mut events);

    loop {
        let mut requests = Vec::new();
        schedule.handle(&events, &mut requests);
        let mut planned = Vec::new();
        generation.handle(&requests, &mut planned);
        events.clear();

        let now = query::clock(&world);
        for event in planned {
            if let Event::WavePlanned { plan } = event {
                on_plan(&plan);
                in_flight.push(InFlight {
                    wave: plan.wave(),
                    obstacles: plan.obstacle_count(),
                    escapes_at: now.saturating_add(travel),
                });
                world::apply(&mut world, Command::SpawnWave { plan }, &mut events);
            }
        }

        let (escaped, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut in_flight)
            .into_iter()
            .partition(|flight| flight.escapes_at <= now);
        in_flight = pending;
        for flight in escaped {
            for _ in 0..flight.obstacles {
                world::apply(
                    &mut world,
                    Command::ResolveObstacle {
                        wave: flight.wave,
                        outcome: ObstacleOutcome::Escaped,
                    },
                    &mut events,
                );
            }
        }

        if now >= length {
            break;
        }
        world::apply(&mut world, Command::Tick { dt: TICK }, &mut events);
    }

    world::apply(&mut world, Command::EndRun, &mut events);
    tracing::debug!(
        score = query::score(&world),
        wave_count = query::wave_count(&world),
        "simulation finished"
    );
    Summary {
        score: query::score(&world),
        wave_count: query::wave_count(&world),
    }
}
