//! Particle-filter proposal: resample, diffuse, and explore.

use super::{clamp_size_fractions, pixel_size_range, Sampler, TransitionModel};
use crate::resampling::ResamplingAlgorithm;
use crate::sample::Sample;
use condtrack_core::{Image, Offset, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResamplingSamplerParams {
    /// Number of particles produced per frame.
    pub count: usize,
    /// Fraction of particles drawn fresh from the whole image.
    pub random_rate: f64,
    /// Smallest accepted side as a fraction of `min(width, height)`.
    pub min_size: f64,
    /// Largest accepted side as a fraction of `min(width, height)`.
    pub max_size: f64,
}

impl Default for ResamplingSamplerParams {
    fn default() -> Self {
        Self {
            count: 800,
            random_rate: 0.35,
            min_size: 0.1,
            max_size: 0.9,
        }
    }
}

/// Draws most particles from the weighted previous generation, moves them
/// with a transition model and tops the set up with uniformly placed ones.
///
/// Particles that leave the image or the size range after the transition
/// are replaced by fresh ones, so the output always holds `count` samples
/// that fit inside the frame.
pub struct ResamplingSampler {
    count: usize,
    random_rate: f64,
    min_size: f64,
    max_size: f64,
    resampling: Box<dyn ResamplingAlgorithm>,
    transition: Box<dyn TransitionModel>,
    rng: StdRng,
}

impl ResamplingSampler {
    /// Create a sampler; out-of-range parameters are clamped.
    pub fn new(
        params: ResamplingSamplerParams,
        resampling: Box<dyn ResamplingAlgorithm>,
        transition: Box<dyn TransitionModel>,
        seed: u64,
    ) -> Self {
        let (min_size, max_size) = clamp_size_fractions(params.min_size, params.max_size);
        let random_rate = if params.random_rate.is_nan() {
            1.0
        } else {
            params.random_rate.clamp(0.0, 1.0)
        };
        Self {
            count: params.count,
            random_rate,
            min_size,
            max_size,
            resampling,
            transition,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Parameters after clamping.
    pub fn params(&self) -> ResamplingSamplerParams {
        ResamplingSamplerParams {
            count: self.count,
            random_rate: self.random_rate,
            min_size: self.min_size,
            max_size: self.max_size,
        }
    }

    pub fn set_resampling_algorithm(&mut self, resampling: Box<dyn ResamplingAlgorithm>) {
        self.resampling = resampling;
    }

    pub fn set_transition_model(&mut self, transition: Box<dyn TransitionModel>) {
        self.transition = transition;
    }

    /// Number of particles taken from the previous generation.
    fn resample_count(&self) -> usize {
        (self.count as f64 * (1.0 - self.random_rate)).round() as usize
    }

    fn is_valid(sample: &Sample, image: &Image, min_px: i32, max_px: i32) -> bool {
        sample.size() >= min_px && sample.size() <= max_px && image.bounds().contains(sample.bounds())
    }

    fn random_sample(&mut self, width: i32, height: i32, min_px: i32, max_px: i32) -> Sample {
        let fit = width.min(height);
        let hi = max_px.min(fit);
        let lo = min_px.min(hi);
        let size = self.rng.random_range(lo..=hi);
        let half = size / 2;
        let x = self.rng.random_range(half..=width - size + half);
        let y = self.rng.random_range(half..=height - size + half);
        Sample::new(x, y, size)
    }
}

impl Sampler for ResamplingSampler {
    fn sample(
        &mut self,
        samples: &[Sample],
        offset: Offset,
        image: &Image,
        new_samples: &mut Vec<Sample>,
    ) -> Result<()> {
        image.ensure_not_empty()?;
        let width = image.width as i32;
        let height = image.height as i32;
        let (min_px, max_px) =
            pixel_size_range(self.min_size, self.max_size, image.width, image.height);

        let wanted = self.resample_count();
        self.resampling.resample(samples, wanted, new_samples);
        if wanted > 0 && new_samples.is_empty() && !samples.is_empty() {
            warn!(previous = samples.len(), "resampling degenerated, exploring only");
        }
        for sample in new_samples.iter_mut() {
            sample.set_weight(0.0);
            sample.set_object(false);
        }
        self.transition.predict(new_samples, offset);

        let mut replaced = 0usize;
        for sample in new_samples.iter_mut() {
            if !Self::is_valid(sample, image, min_px, max_px) {
                *sample = self.random_sample(width, height, min_px, max_px);
                replaced += 1;
            }
        }
        let resampled = new_samples.len();
        while new_samples.len() < self.count {
            let sample = self.random_sample(width, height, min_px, max_px);
            new_samples.push(sample);
        }

        debug!(
            resampled,
            replaced,
            random = new_samples.len() - resampled,
            "proposal generated"
        );
        Ok(())
    }
}
