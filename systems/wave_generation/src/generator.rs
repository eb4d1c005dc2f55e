use std::iter::FusedIterator;

use starfighter_core::{Difficulty, ObstacleKind, RandomSource, CORRIDOR_WIDTH, LANE_WIDTH};

const GAP_BASE_PROBABILITY: f32 = 0.4;
const GAP_DIFFICULTY_SLOPE: f32 = 0.25;
const REGULAR_THRESHOLD_BASE: f64 = 0.55;
const REGULAR_THRESHOLD_SLOPE: f64 = 0.45;
const BIG_THRESHOLD_BASE: f64 = 0.8;
const BIG_THRESHOLD_SLOPE: f64 = 0.25;
const PADDING_UPGRADE_DIFFICULTY: f32 = 0.6;
/// Furthest distance ahead of the corridor at which padding closes the gap to it.
const MAX_CORRIDOR_PADDING: u32 = 2;

/// Lays out rows of obstacles across the lane for a given difficulty.
#[derive(Debug)]
pub struct WaveGenerator<R> {
    random: R,
}

impl<R: RandomSource> WaveGenerator<R> {
    /// Creates a generator drawing from the provided random source.
    #[must_use]
    pub const fn new(random: R) -> Self {
        Self { random }
    }

    /// Starts a new wave for the provided difficulty.
    ///
    /// Out-of-range difficulties are clamped. The returned iterator produces
    /// slots lazily, borrows the random source until dropped, and cannot be
    /// restarted: call `generate_wave` again to lay out another wave.
    pub fn generate_wave(&mut self, difficulty: f32) -> Wave<'_, R> {
        Wave {
            random: &mut self.random,
            difficulty: Difficulty::new(difficulty),
            offset: 0,
            corridor: None,
            pending_gaps: 0,
        }
    }

    /// Releases the random source.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.random
    }
}

/// One-shot lazy sequence of slots whose widths sum to [`LANE_WIDTH`].
#[derive(Debug)]
pub struct Wave<'a, R> {
    random: &'a mut R,
    difficulty: Difficulty,
    offset: u32,
    corridor: Option<u32>,
    pending_gaps: u32,
}

impl<R: RandomSource> Wave<'_, R> {
    /// Difficulty the wave is generated with, after clamping.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    fn corridor_start(&mut self) -> u32 {
        match self.corridor {
            Some(start) => start,
            None => {
                let start = self.random.next_below(LANE_WIDTH - CORRIDOR_WIDTH);
                self.corridor = Some(start);
                start
            }
        }
    }

    fn padding(&self, units: u32) -> ObstacleKind {
        if units == 1 {
            ObstacleKind::Gap
        } else if self.difficulty.get() > PADDING_UPGRADE_DIFFICULTY {
            ObstacleKind::Regular
        } else {
            ObstacleKind::Small
        }
    }

    fn draw_obstacle(&mut self) -> ObstacleKind {
        let difficulty = f64::from(self.difficulty.get());
        let regular_threshold = REGULAR_THRESHOLD_BASE - REGULAR_THRESHOLD_SLOPE * difficulty;
        let big_threshold = BIG_THRESHOLD_BASE - BIG_THRESHOLD_SLOPE * difficulty;
        let value = self.random.next_f64();

        if value < regular_threshold {
            ObstacleKind::Small
        } else if value < big_threshold {
            ObstacleKind::Regular
        } else {
            ObstacleKind::Big
        }
    }
}

impl<R: RandomSource> Iterator for Wave<'_, R> {
    type Item = ObstacleKind;

    fn next(&mut self) -> Option<ObstacleKind> {
        if self.pending_gaps > 0 {
            self.pending_gaps -= 1;
            return Some(ObstacleKind::Gap);
        }

        if self.offset >= LANE_WIDTH {
            return None;
        }

        let corridor = self.corridor_start();

        // Border padding wins over the corridor window at the tail of the lane.
        let remaining = LANE_WIDTH - self.offset;
        if remaining < CORRIDOR_WIDTH {
            self.offset = LANE_WIDTH;
            return Some(self.padding(remaining));
        }

        if let Some(distance) = corridor
            .checked_sub(self.offset)
            .filter(|distance| *distance <= MAX_CORRIDOR_PADDING)
        {
            self.offset = corridor + CORRIDOR_WIDTH;
            if distance == 0 {
                self.pending_gaps = CORRIDOR_WIDTH - 1;
                return Some(ObstacleKind::Gap);
            }
            self.pending_gaps = CORRIDOR_WIDTH;
            return Some(self.padding(distance));
        }

        let gap_probability =
            GAP_BASE_PROBABILITY - GAP_DIFFICULTY_SLOPE * self.difficulty.get();
        if gap_probability > self.random.next_f32() {
            self.offset += 1;
            return Some(ObstacleKind::Gap);
        }

        let kind = self.draw_obstacle();
        self.offset += kind.width();
        Some(kind)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = LANE_WIDTH.saturating_sub(self.offset);
        let pending = self.pending_gaps as usize;
        let lower = pending + remaining.div_ceil(ObstacleKind::Big.width()) as usize;
        let upper = pending + remaining as usize;
        (lower, Some(upper))
    }
}

impl<R: RandomSource> FusedIterator for Wave<'_, R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Replays scripted draws; panics if a test underestimates the draws a wave needs.
    #[derive(Debug, Default)]
    struct ScriptedSource {
        singles: VecDeque<f32>,
        doubles: VecDeque<f64>,
        integers: VecDeque<u32>,
    }

    impl ScriptedSource {
        fn new(integers: &[u32], singles: &[f32], doubles: &[f64]) -> Self {
            Self {
                singles: singles.iter().copied().collect(),
                doubles: doubles.iter().copied().collect(),
                integers: integers.iter().copied().collect(),
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn next_f32(&mut self) -> f32 {
            self.singles.pop_front().expect("scripted f32 draw")
        }

        fn next_f64(&mut self) -> f64 {
            self.doubles.pop_front().expect("scripted f64 draw")
        }

        fn next_below(&mut self, bound: u32) -> u32 {
            let value = self.integers.pop_front().expect("scripted integer draw");
            assert!(value < bound, "scripted integer {value} exceeds bound {bound}");
            value
        }
    }

    fn widths(wave: &[ObstacleKind]) -> u32 {
        wave.iter().map(|kind| kind.width()).sum()
    }

    #[test]
    fn corridor_at_lane_start_is_emitted_first() {
        // Corridor at 0, then every free slot fails the gap trial and draws Big.
        let mut source = ScriptedSource::new(&[0], &[0.99; 8], &[0.99; 8]);
        let mut generator = WaveGenerator::new(&mut source);
        let wave: Vec<_> = generator.generate_wave(0.0).collect();

        assert_eq!(&wave[..3], &[ObstacleKind::Gap; 3]);
        // 3 gaps, then Big x5 reaches 18, then two units of border padding.
        assert_eq!(
            &wave[3..],
            &[
                ObstacleKind::Big,
                ObstacleKind::Big,
                ObstacleKind::Big,
                ObstacleKind::Big,
                ObstacleKind::Big,
                ObstacleKind::Small,
            ]
        );
        assert_eq!(widths(&wave), LANE_WIDTH);
    }

    #[test]
    fn corridor_padding_closes_distance() {
        // Big from 0 lands at 3; corridor at 5 needs two units of padding.
        let mut source = ScriptedSource::new(&[5], &[0.99; 8], &[0.99; 8]);
        let mut generator = WaveGenerator::new(&mut source);
        let wave: Vec<_> = generator.generate_wave(0.0).collect();

        assert_eq!(
            &wave[..5],
            &[
                ObstacleKind::Big,
                ObstacleKind::Small,
                ObstacleKind::Gap,
                ObstacleKind::Gap,
                ObstacleKind::Gap,
            ]
        );
        assert_eq!(widths(&wave), LANE_WIDTH);
    }

    #[test]
    fn padding_upgrades_to_regular_when_hard() {
        let mut source = ScriptedSource::new(&[5], &[0.99; 8], &[0.99; 8]);
        let mut generator = WaveGenerator::new(&mut source);
        let wave: Vec<_> = generator.generate_wave(0.9).collect();

        assert_eq!(wave[1], ObstacleKind::Regular);
        assert_eq!(widths(&wave), LANE_WIDTH);
    }

    #[test]
    fn successful_trials_emit_single_gaps() {
        let mut source = ScriptedSource::new(&[16], &[0.0; 20], &[]);
        let mut generator = WaveGenerator::new(&mut source);
        let wave: Vec<_> = generator.generate_wave(0.0).collect();

        // Unit steps always reach the corridor two units early and pad with Small.
        let mut expected = vec![ObstacleKind::Gap; 14];
        expected.push(ObstacleKind::Small);
        expected.extend([ObstacleKind::Gap; 4]);
        assert_eq!(wave, expected);
        assert_eq!(widths(&wave), LANE_WIDTH);
    }

    #[test]
    fn obstacle_draw_thresholds_follow_difficulty() {
        // At difficulty 0: Small below 0.55, Regular below 0.8, Big otherwise.
        let mut source = ScriptedSource::new(&[16], &[0.99; 8], &[0.1, 0.6, 0.85, 0.1, 0.6]);
        let mut generator = WaveGenerator::new(&mut source);
        let wave: Vec<_> = generator.generate_wave(0.0).take(3).collect();
        assert_eq!(
            wave,
            vec![ObstacleKind::Small, ObstacleKind::Regular, ObstacleKind::Big]
        );

        // At difficulty 1: Small below 0.10, Regular below 0.55, Big otherwise.
        let mut source = ScriptedSource::new(&[16], &[0.99; 8], &[0.05, 0.3, 0.6]);
        let mut generator = WaveGenerator::new(&mut source);
        let wave: Vec<_> = generator.generate_wave(1.0).take(3).collect();
        assert_eq!(
            wave,
            vec![ObstacleKind::Small, ObstacleKind::Regular, ObstacleKind::Big]
        );
    }

    #[test]
    fn gap_trial_probability_shrinks_with_difficulty() {
        // 0.3 is a gap at difficulty 0 (p = 0.4) but not at difficulty 1 (p = 0.15).
        let mut source = ScriptedSource::new(&[16], &[0.3], &[]);
        let mut generator = WaveGenerator::new(&mut source);
        assert_eq!(generator.generate_wave(0.0).next(), Some(ObstacleKind::Gap));

        let mut source = ScriptedSource::new(&[16], &[0.3], &[0.99]);
        let mut generator = WaveGenerator::new(&mut source);
        assert_eq!(generator.generate_wave(1.0).next(), Some(ObstacleKind::Big));
    }

    #[test]
    fn corridor_draw_is_deferred_until_first_pull() {
        let mut source = ScriptedSource::new(&[], &[], &[]);
        let mut generator = WaveGenerator::new(&mut source);
        let wave = generator.generate_wave(0.5);
        assert_eq!(wave.size_hint(), (7, Some(20)));
    }

    #[test]
    fn exhausted_wave_stays_exhausted() {
        let mut source = ScriptedSource::new(&[16], &[0.0; 20], &[]);
        let mut generator = WaveGenerator::new(&mut source);
        let mut wave = generator.generate_wave(0.0);
        let mut emitted = 0;
        while wave.next().is_some() {
            emitted += 1;
        }
        assert_eq!(emitted, 19);
        assert_eq!(wave.next(), None);
        assert_eq!(wave.next(), None);
        assert_eq!(wave.size_hint(), (0, Some(0)));
    }
}
