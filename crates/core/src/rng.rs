//! RNG module - injectable randomness for tile spawning
//!
//! Spawning is the only nondeterministic step in the game. It draws from a
//! [`RandomSource`], a source of uniform floats in `[0, 1)`, so tests can
//! script exact draws and replays can seed a deterministic generator.
//!
//! Provided sources:
//! - [`SimpleRng`]: dependency-free LCG, same seed gives the same game
//! - `rand::rngs::StdRng`: the terminal binary's default
//! - [`ScriptedSource`]: replays a fixed list of draws

use rand::rngs::StdRng;
use rand::Rng;

/// A source of uniform random floats in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would be a fixed point of the multiply step.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current generator state; `SimpleRng::new(rng.state())` resumes the sequence.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RandomSource for SimpleRng {
    fn next_unit(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        Self {
            draws: draws.into(),
            pos: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let v = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
