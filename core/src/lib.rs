#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Starfighter engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams and respond
//! exclusively with new command or event batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

mod random;

pub use random::{RandomSource, RngSource};

/// Total unit width that every generated wave fills exactly.
pub const LANE_WIDTH: u32 = 20;

/// Number of consecutive gap units reserved as the traversable corridor.
pub const CORRIDOR_WIDTH: u32 = 3;

/// Commands that express all permissible mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Starts a fresh run, resetting score and wave bookkeeping.
    StartRun,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a wave be generated for the provided difficulty.
    GenerateWave {
        /// Identifier assigned to the requested wave.
        wave: WaveId,
        /// Difficulty the wave should be generated with.
        difficulty: Difficulty,
    },
    /// Requests that a generated wave enter the playfield.
    SpawnWave {
        /// Materialized layout of the wave.
        plan: WavePlan,
    },
    /// Reports that a single obstacle of an active wave left play.
    ResolveObstacle {
        /// Wave the obstacle belongs to.
        wave: WaveId,
        /// How the obstacle left play.
        outcome: ObstacleOutcome,
    },
    /// Adds the provided amount to the score. Negative amounts subtract.
    AwardScore {
        /// Points to add.
        amount: i32,
    },
    /// Ends the current run.
    EndRun,
    /// Rotates the selection carousel one step.
    RotateSelection {
        /// Direction of the rotation.
        rotation: Rotation,
    },
    /// Confirms the spaceship currently centred in the carousel.
    ConfirmSelection,
    /// Replaces every selectable spaceship with the provided roster.
    ReplaceRoster {
        /// Spaceships offered by the carousel, in display order.
        roster: Vec<SpaceshipType>,
    },
}

/// Events broadcast after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a new run started.
    RunStarted,
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Publishes a freshly generated wave layout.
    WavePlanned {
        /// Materialized layout of the wave.
        plan: WavePlan,
    },
    /// Confirms that a wave entered the playfield.
    WaveSpawned {
        /// Identifier of the spawned wave.
        wave: WaveId,
        /// Number of obstacles the wave placed.
        obstacles: u32,
    },
    /// Reports that a wave spawn request was rejected.
    WaveSpawnRejected {
        /// Identifier of the rejected wave.
        wave: WaveId,
        /// Specific reason the spawn failed.
        reason: SpawnError,
    },
    /// Confirms that every obstacle of a wave left play.
    WaveCleared {
        /// Identifier of the cleared wave.
        wave: WaveId,
        /// How the final obstacle left play.
        outcome: ObstacleOutcome,
        /// Points awarded for the wave.
        award: u32,
    },
    /// Publishes the latest score and wave count.
    ScoreChanged {
        /// Current score.
        score: u32,
        /// Number of waves spawned during the run.
        wave_count: u32,
    },
    /// Announces that the run ended.
    RunEnded {
        /// Final score.
        score: u32,
        /// Number of waves spawned during the run.
        wave_count: u32,
    },
    /// Publishes the visible carousel triple after a change.
    SelectionChanged {
        /// Entry shown left of the centre.
        previous: Option<SpaceshipType>,
        /// Entry shown in the centre.
        current: Option<SpaceshipType>,
        /// Entry shown right of the centre.
        next: Option<SpaceshipType>,
    },
    /// Confirms the spaceship the player picked.
    SpaceshipSelected {
        /// Chosen spaceship.
        spaceship: SpaceshipType,
    },
}

/// Kinds of slot a wave is assembled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Empty slot one unit wide.
    Gap,
    /// Small obstacle two units wide.
    Small,
    /// Regular obstacle two units wide.
    Regular,
    /// Big obstacle three units wide.
    Big,
}

impl ObstacleKind {
    /// Width of the slot measured in lane units.
    #[must_use]
    pub const fn width(self) -> u32 {
        match self {
            Self::Gap => 1,
            Self::Small | Self::Regular => 2,
            Self::Big => 3,
        }
    }

    /// Reports whether the slot is empty.
    #[must_use]
    pub const fn is_gap(self) -> bool {
        matches!(self, Self::Gap)
    }
}

/// Scalar difficulty, always within `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Difficulty(f32);

impl Difficulty {
    /// Easiest difficulty.
    pub const MIN: Self = Self(0.0);
    /// Hardest difficulty.
    pub const MAX: Self = Self(1.0);

    /// Creates a difficulty, clamping out-of-range values and mapping NaN to zero.
    #[must_use]
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Difficulty reached after `completed` waves of a linear ramp spanning `ramp` waves.
    #[must_use]
    pub fn from_progress(completed: u32, ramp: u32) -> Self {
        if ramp == 0 {
            return Self::MAX;
        }
        Self::new(completed.min(ramp) as f32 / ramp as f32)
    }

    /// Retrieves the clamped value.
    #[must_use]
    pub const fn get(&self) -> f32 {
        self.0
    }
}

impl From<f32> for Difficulty {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Difficulty> for f32 {
    fn from(value: Difficulty) -> Self {
        value.0
    }
}

/// Zero-based identifier of a launched wave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WaveId(u32);

impl WaveId {
    /// Creates a new wave identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Identifier of the wave launched after this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Fully materialized wave ready to be positioned by the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WavePlan {
    wave: WaveId,
    difficulty: Difficulty,
    slots: Vec<ObstacleKind>,
    speed_modifier: f32,
    health_modifier: f32,
}

impl WavePlan {
    /// Creates a plan from generated slots and the modifiers applied to its obstacles.
    #[must_use]
    pub fn new(
        wave: WaveId,
        difficulty: Difficulty,
        slots: Vec<ObstacleKind>,
        speed_modifier: f32,
        health_modifier: f32,
    ) -> Self {
        Self {
            wave,
            difficulty,
            slots,
            speed_modifier,
            health_modifier,
        }
    }

    /// Identifier of the wave.
    #[must_use]
    pub const fn wave(&self) -> WaveId {
        self.wave
    }

    /// Difficulty the wave was generated with.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Slots in lane order, gaps included.
    #[must_use]
    pub fn slots(&self) -> &[ObstacleKind] {
        &self.slots
    }

    /// Multiplier applied to the descent speed of every obstacle.
    #[must_use]
    pub const fn speed_modifier(&self) -> f32 {
        self.speed_modifier
    }

    /// Multiplier applied to the health of every obstacle.
    #[must_use]
    pub const fn health_modifier(&self) -> f32 {
        self.health_modifier
    }

    /// Sum of all slot widths.
    #[must_use]
    pub fn total_width(&self) -> u32 {
        self.slots.iter().map(|kind| kind.width()).sum()
    }

    /// Number of non-gap slots.
    #[must_use]
    pub fn obstacle_count(&self) -> u32 {
        self.slots.iter().filter(|kind| !kind.is_gap()).count() as u32
    }

    /// Obstacles paired with the lane unit where each one starts.
    pub fn placements(&self) -> impl Iterator<Item = ObstaclePlacement> + '_ {
        self.slots
            .iter()
            .scan(0u32, |offset, &kind| {
                let start = *offset;
                *offset += kind.width();
                Some(ObstaclePlacement::new(kind, start))
            })
            .filter(|placement| !placement.kind().is_gap())
    }
}

/// Obstacle anchored at a lane offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    kind: ObstacleKind,
    offset: u32,
}

impl ObstaclePlacement {
    /// Creates a placement for the provided kind and starting lane unit.
    #[must_use]
    pub const fn new(kind: ObstacleKind, offset: u32) -> Self {
        Self { kind, offset }
    }

    /// Kind of obstacle placed.
    #[must_use]
    pub const fn kind(&self) -> ObstacleKind {
        self.kind
    }

    /// Lane unit where the obstacle starts.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }
}

/// How an obstacle left play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleOutcome {
    /// The player shot the obstacle down.
    Destroyed,
    /// The obstacle passed the bottom of the playfield.
    Escaped,
}

/// Reasons a wave spawn request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnError {
    /// No run is in progress.
    NotRunning,
    /// A wave with the same identifier is still active.
    DuplicateWave,
}

/// Direction the selection carousel rotates in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    /// Brings the previous entry to the centre.
    Left,
    /// Brings the next entry to the centre.
    Right,
}

/// Selectable spaceship and the stats shown for it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpaceshipType {
    name: String,
    serialized_name: String,
    health: i32,
    attack_damage: i32,
    speed: i32,
}

impl SpaceshipType {
    /// Creates a spaceship description.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        serialized_name: impl Into<String>,
        health: i32,
        attack_damage: i32,
        speed: i32,
    ) -> Self {
        Self {
            name: name.into(),
            serialized_name: serialized_name.into(),
            health,
            attack_damage,
            speed,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stable identifier used to resolve assets.
    #[must_use]
    pub fn serialized_name(&self) -> &str {
        &self.serialized_name
    }

    /// Hit points.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Damage dealt per shot.
    #[must_use]
    pub const fn attack_damage(&self) -> i32 {
        self.attack_damage
    }

    /// Horizontal movement speed.
    #[must_use]
    pub const fn speed(&self) -> i32 {
        self.speed
    }
}

/// Game configuration loaded at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GameConfig {
    obstacle_health_modifier: f32,
    spaceship_types: Vec<SpaceshipType>,
}

impl GameConfig {
    /// Creates a configuration from explicit values.
    #[must_use]
    pub fn new(obstacle_health_modifier: f32, spaceship_types: Vec<SpaceshipType>) -> Self {
        Self {
            obstacle_health_modifier,
            spaceship_types,
        }
    }

    /// Multiplier applied on top of the difficulty-driven obstacle health.
    #[must_use]
    pub const fn obstacle_health_modifier(&self) -> f32 {
        self.obstacle_health_modifier
    }

    /// Spaceships offered on the selection screen.
    #[must_use]
    pub fn spaceship_types(&self) -> &[SpaceshipType] {
        &self.spaceship_types
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            obstacle_health_modifier: 1.0,
            spaceship_types: vec![
                SpaceshipType::new("Millenium Falcon", "MilleniumFalcon", 10, 5, 650),
                SpaceshipType::new("X-Wing", "XWing", 10, 5, 650),
                SpaceshipType::new("Y-Wing", "YWing", 10, 5, 650),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Difficulty, GameConfig, ObstacleKind, ObstaclePlacement, SpaceshipType, WaveId, WavePlan,
        LANE_WIDTH,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn obstacle_widths_match_lane_units() {
        assert_eq!(ObstacleKind::Gap.width(), 1);
        assert_eq!(ObstacleKind::Small.width(), 2);
        assert_eq!(ObstacleKind::Regular.width(), 2);
        assert_eq!(ObstacleKind::Big.width(), 3);
    }

    #[test]
    fn difficulty_clamps_out_of_range_values() {
        assert_eq!(Difficulty::new(-5.0), Difficulty::MIN);
        assert_eq!(Difficulty::new(2.0), Difficulty::MAX);
        assert_eq!(Difficulty::new(f32::NAN), Difficulty::MIN);
        assert!((Difficulty::new(0.25).get() - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn difficulty_ramp_saturates() {
        assert_eq!(Difficulty::from_progress(0, 25), Difficulty::MIN);
        assert!((Difficulty::from_progress(5, 25).get() - 0.2).abs() < f32::EPSILON);
        assert_eq!(Difficulty::from_progress(40, 25), Difficulty::MAX);
        assert_eq!(Difficulty::from_progress(3, 0), Difficulty::MAX);
    }

    #[test]
    fn difficulty_deserialization_clamps() {
        let bytes = bincode::serialize(&3.5f32).expect("serialize");
        let restored: Difficulty = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, Difficulty::MAX);
    }

    #[test]
    fn placements_skip_gaps_and_track_offsets() {
        let plan = WavePlan::new(
            WaveId::new(0),
            Difficulty::MIN,
            vec![
                ObstacleKind::Gap,
                ObstacleKind::Big,
                ObstacleKind::Gap,
                ObstacleKind::Small,
            ],
            1.0,
            1.0,
        );
        let placements: Vec<_> = plan.placements().collect();
        assert_eq!(
            placements,
            vec![
                ObstaclePlacement::new(ObstacleKind::Big, 1),
                ObstaclePlacement::new(ObstacleKind::Small, 5),
            ]
        );
        assert_eq!(plan.obstacle_count(), 2);
        assert_eq!(plan.total_width(), 7);
    }

    #[test]
    fn wave_plan_round_trips_through_bincode() {
        let slots = vec![ObstacleKind::Gap; LANE_WIDTH as usize];
        let plan = WavePlan::new(WaveId::new(4), Difficulty::new(0.5), slots, 1.6, 1.6);
        assert_round_trip(&plan);
    }

    #[test]
    fn spaceship_round_trips_through_bincode() {
        assert_round_trip(&SpaceshipType::new("X-Wing", "XWing", 10, 5, 650));
    }

    #[test]
    fn default_config_offers_three_ships() {
        let config = GameConfig::default();
        assert_eq!(config.spaceship_types().len(), 3);
        assert!((config.obstacle_health_modifier() - 1.0).abs() < f32::EPSILON);
        assert_round_trip(&config);
    }

    #[test]
    fn wave_ids_advance() {
        assert_eq!(WaveId::new(2).next(), WaveId::new(3));
        assert_eq!(WaveId::new(u32::MAX).next(), WaveId::new(u32::MAX));
    }
}
