//! Yes/no detectors: ball touches during a drill, fatigue after one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of yes/no readings, polled by the caller.
///
/// The drill driver polls once per detection interval for ball touches;
/// [`AppState::log_drill_session`](crate::profile::AppState::log_drill_session)
/// polls once per finished drill for fatigue.
pub trait Detector {
    /// Returns `true` when the watched condition was seen since the last poll.
    fn detect(&mut self) -> bool;
}

/// Replays a fixed sequence of readings, then reports nothing.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDetector {
    script: Vec<bool>,
    cursor: usize,
}

impl ScriptedDetector {
    pub fn new(script: impl Into<Vec<bool>>) -> Self {
        Self {
            script: script.into(),
            cursor: 0,
        }
    }

    /// Readings not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.len().saturating_sub(self.cursor)
    }
}

impl Detector for ScriptedDetector {
    fn detect(&mut self) -> bool {
        let reading = self.script.get(self.cursor).copied().unwrap_or(false);
        self.cursor = self.cursor.saturating_add(1);
        reading
    }
}

/// Stand-in for the vision model: a seeded coin flip per poll.
#[derive(Debug, Clone)]
pub struct SimulatedDetector {
    rng: Pcg32,
    hit_probability: f64,
}

impl SimulatedDetector {
    /// Default hit rate of the mock vision feed.
    pub const DEFAULT_HIT_PROBABILITY: f64 = 0.7;

    /// `hit_probability` is clamped to `0.0..=1.0`; a non-finite value
    /// never hits.
    pub fn new(seed: u64, hit_probability: f64) -> Self {
        let hit_probability = if hit_probability.is_finite() {
            hit_probability.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            rng: Pcg32::seed_from_u64(seed),
            hit_probability,
        }
    }

    pub fn hit_probability(&self) -> f64 {
        self.hit_probability
    }
}

impl Detector for SimulatedDetector {
    fn detect(&mut self) -> bool {
        self.rng.gen_bool(self.hit_probability)
    }
}

impl<D: Detector + ?Sized> Detector for &mut D {
    fn detect(&mut self) -> bool {
        (**self).detect()
    }
}

impl<D: Detector + ?Sized> Detector for Box<D> {
    fn detect(&mut self) -> bool {
        (**self).detect()
    }
}
