//! Placeholder "simulated" series for the fit comparison.
//!
//! This is not a fitted model. Each simulated value is the observed value
//! scaled by a fixed factor plus uniform noise; the coefficients are fixed
//! and the output is intentionally non-deterministic. The noise source is
//! injected so tests can pin the output.

use opf_series::Series;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[low, high)`.
pub trait NoiseSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// Noise from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomNoise<R>(pub R);

impl RandomNoise<StdRng> {
    pub fn from_entropy() -> Self {
        RandomNoise(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        RandomNoise(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> NoiseSource for RandomNoise<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.0.gen_range(low..high)
    }
}

/// Always returns the same fraction of the requested range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl NoiseSource for FixedNoise {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.0
    }
}

/// Fixed perturbation applied to one observed series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    pub scale: f64,
    pub noise_low: f64,
    pub noise_high: f64,
}

/// `oilSim = oilObs * 0.95 + U(0, 10)`
pub const OIL: Perturbation = Perturbation {
    scale: 0.95,
    noise_low: 0.0,
    noise_high: 10.0,
};

/// `waterSim = waterObs * 1.05 + U(0, 5)`
pub const WATER: Perturbation = Perturbation {
    scale: 1.05,
    noise_low: 0.0,
    noise_high: 5.0,
};

/// `bswSim = bswObs + U(-1, 1)`
pub const BSW: Perturbation = Perturbation {
    scale: 1.0,
    noise_low: -1.0,
    noise_high: 1.0,
};

impl Perturbation {
    /// Perturb every present value; missing values stay missing.
    pub fn apply<N>(&self, observed: &[Option<f64>], noise: &mut N) -> Series
    where
        N: NoiseSource + ?Sized,
    {
        observed
            .iter()
            .map(|v| v.map(|v| v * self.scale + noise.uniform(self.noise_low, self.noise_high)))
            .collect()
    }
}
