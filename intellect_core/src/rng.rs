use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Decision a random draw is made for. Overrides are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RandomKey {
    AgentSelection,
    MissionSelection,
    LeadSelection,
}

/// Random source for every tie-break in a turn.
///
/// Seeded explicitly; a fixed value can be forced per key so tests can pin a
/// single decision while the rest of the turn keeps drawing from the stream.
#[derive(Debug, Clone)]
pub struct TieBreaker {
    rng: ChaCha8Rng,
    overrides: HashMap<RandomKey, f64>,
}

impl TieBreaker {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            overrides: HashMap::new(),
        }
    }

    /// Force draws for `key` to `value`, clamped into `[0, 1)`.
    pub fn set_override(&mut self, key: RandomKey, value: f64) {
        let clamped = value.clamp(0.0, 1.0 - f64::EPSILON);
        self.overrides.insert(key, clamped);
    }

    pub fn clear_override(&mut self, key: RandomKey) {
        self.overrides.remove(&key);
    }

    pub fn sample(&mut self, key: RandomKey) -> f64 {
        match self.overrides.get(&key) {
            Some(value) => *value,
            None => self.rng.gen::<f64>(),
        }
    }

    /// Uniform index into a collection of `len` items.
    ///
    /// # Panics
    ///
    /// Panics when `len` is zero; callers must never offer an empty choice.
    pub fn pick_index(&mut self, key: RandomKey, len: usize) -> usize {
        assert!(len > 0, "cannot pick from an empty collection ({key:?})");
        let draw = self.sample(key);
        ((draw * len as f64) as usize).min(len - 1)
    }

    pub fn pick<'a, T>(&mut self, key: RandomKey, items: &'a [T]) -> &'a T {
        let index = self.pick_index(key, items.len());
        &items[index]
    }
}
