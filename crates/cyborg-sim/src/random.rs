//! The single source of randomness for object placement.
//!
//! Every random draw in the simulation is a uniform integer in `[0, upper)`.
//! The engine owns one seeded generator and passes it to the spawn
//! factories, so the same seed always builds the same city.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Uniform integer-range generator.
pub trait UniformRange {
    /// Uniform integer in `[0, upper)`. An `upper` of 0 yields 0.
    fn below(&mut self, upper: u32) -> u32;
}

impl UniformRange for ChaCha8Rng {
    fn below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        self.gen_range(0..upper)
    }
}

impl<R: UniformRange + ?Sized> UniformRange for &mut R {
    fn below(&mut self, upper: u32) -> u32 {
        (**self).below(upper)
    }
}
