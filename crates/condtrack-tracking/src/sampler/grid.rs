//! Exhaustive sliding-window proposal.

use super::{clamp_size_fractions, non_negative, pixel_size_range, Sampler, MIN_SIZE_SCALE};
use crate::sample::Sample;
use condtrack_core::{Image, Offset, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSamplerParams {
    /// Smallest window side as a fraction of `min(width, height)`.
    pub min_size: f64,
    /// Largest window side as a fraction of `min(width, height)`.
    pub max_size: f64,
    /// Growth factor between two consecutive window sizes.
    pub size_scale: f64,
    /// Stride as a fraction of the current window size.
    pub step_size: f64,
}

impl Default for GridSamplerParams {
    fn default() -> Self {
        Self {
            min_size: 0.1,
            max_size: 0.5,
            size_scale: 1.2,
            step_size: 0.1,
        }
    }
}

/// Detector-style scan over every position and scale.
///
/// Ignores the previous particle set and the motion offset, so every frame
/// gets the same deterministic proposal for a given image size.
#[derive(Debug, Clone)]
pub struct GridSampler {
    min_size: f64,
    max_size: f64,
    size_scale: f64,
    step_size: f64,
}

impl GridSampler {
    /// Create a grid sampler; out-of-range parameters are clamped.
    pub fn new(params: GridSamplerParams) -> Self {
        let (min_size, max_size) = clamp_size_fractions(params.min_size, params.max_size);
        let size_scale = if params.size_scale.is_nan() {
            MIN_SIZE_SCALE
        } else {
            params.size_scale.max(MIN_SIZE_SCALE)
        };
        Self {
            min_size,
            max_size,
            size_scale,
            step_size: non_negative(params.step_size),
        }
    }

    /// Parameters after clamping.
    pub fn params(&self) -> GridSamplerParams {
        GridSamplerParams {
            min_size: self.min_size,
            max_size: self.max_size,
            size_scale: self.size_scale,
            step_size: self.step_size,
        }
    }
}

impl Default for GridSampler {
    fn default() -> Self {
        Self::new(GridSamplerParams::default())
    }
}

impl Sampler for GridSampler {
    fn sample(
        &mut self,
        _samples: &[Sample],
        _offset: Offset,
        image: &Image,
        new_samples: &mut Vec<Sample>,
    ) -> Result<()> {
        image.ensure_not_empty()?;
        new_samples.clear();

        let width = image.width as i32;
        let height = image.height as i32;
        let (min_px, max_px) =
            pixel_size_range(self.min_size, self.max_size, image.width, image.height);

        let mut scaled = min_px as f64;
        while scaled <= max_px as f64 {
            let size = scaled as i32;
            let half = size / 2;
            // A zero stride would never advance.
            let stride = ((self.step_size * scaled).round() as i32).max(1);
            let before = new_samples.len();

            let mut y = half;
            while y - half + size <= height {
                let mut x = half;
                while x - half + size <= width {
                    new_samples.push(Sample::new(x, y, size));
                    x += stride;
                }
                y += stride;
            }

            trace!(size, stride, count = new_samples.len() - before, "grid level");
            scaled *= self.size_scale;
        }
        Ok(())
    }
}
