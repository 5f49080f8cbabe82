//! Importance resampling of weighted particle sets.

use crate::sample::Sample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws a new particle set from a weighted one, with replacement and with
/// probability proportional to weight.
pub trait ResamplingAlgorithm: Send {
    /// Replace the content of `new_samples` with `count` draws from `samples`.
    ///
    /// Empty input or a non-positive total weight leaves `new_samples` empty.
    fn resample(&mut self, samples: &[Sample], count: usize, new_samples: &mut Vec<Sample>);
}

/// Systematic resampling: one random offset, `count` evenly spaced pointers.
///
/// Runs in O(n + count) and yields lower variance in the number of copies
/// per particle than independent weighted draws.
pub struct LowVarianceSampling {
    rng: StdRng,
}

impl LowVarianceSampling {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ResamplingAlgorithm for LowVarianceSampling {
    fn resample(&mut self, samples: &[Sample], count: usize, new_samples: &mut Vec<Sample>) {
        new_samples.clear();
        let total: f64 = samples.iter().map(Sample::weight).sum();
        if samples.is_empty() || count == 0 || total <= 0.0 {
            return;
        }
        new_samples.reserve(count);

        // `step` may underflow to zero for tiny totals.
        let step = total / count as f64;
        let start = self.rng.random::<f64>() * step;
        let mut index = 0;
        let mut cumulative = samples[0].weight();
        for i in 0..count {
            let pointer = start + i as f64 * step;
            // Zero-weight particles are skipped even when the pointer lands
            // exactly on a cumulative boundary.
            while index + 1 < samples.len()
                && (cumulative < pointer || samples[index].weight() <= 0.0)
            {
                index += 1;
                cumulative += samples[index].weight();
            }
            new_samples.push(samples[index]);
        }
    }
}
