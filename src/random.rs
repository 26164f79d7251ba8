//! Uniform random source used by seeding and breeding.
//!
//! Every draw in the simulator is a single uniform value in `[0, 1)`, so the
//! whole engine only needs this one capability. Any `rand` generator
//! provides it; [`ScriptedSource`] replays a fixed sequence for tests.

use rand::{Rng, RngCore};

/// Largest value a [`ScriptedSource`] may hand out
const BELOW_ONE: f64 = 1.0 - f64::EPSILON;

/// Source of uniform draws in `[0, 1)`
pub trait UniformSource {
    /// Next uniform value in `[0, 1)`
    fn next_uniform(&mut self) -> f64;

    /// True with probability `p`
    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.next_uniform() < p
    }

    /// Uniform index in `0..len`
    #[inline]
    fn index_below(&mut self, len: usize) -> usize {
        let index = (self.next_uniform() * len as f64) as usize;
        index.min(len.saturating_sub(1))
    }
}

impl<R: RngCore> UniformSource for R {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Values are clamped into `[0, 1)` and NaN becomes `0.0`; an empty list
    /// behaves like `[0.0]`
    pub fn new(values: Vec<f64>) -> Self {
        let values = if values.is_empty() {
            vec![0.0]
        } else {
            values.into_iter().map(to_unit_interval).collect()
        };
        Self { values, cursor: 0 }
    }

    /// Source that always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

fn to_unit_interval(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, BELOW_ONE)
    }
}

impl UniformSource for ScriptedSource {
    fn next_uniform(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
