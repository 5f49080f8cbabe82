//! Proposal distributions for the condensation tracker.

pub mod grid;
pub mod resampling;
pub mod transition;

pub use grid::{GridSampler, GridSamplerParams};
pub use resampling::{ResamplingSampler, ResamplingSamplerParams};
pub use transition::{SimpleTransitionModel, TransitionModel, TransitionParams};

use crate::sample::Sample;
use condtrack_core::{Image, Offset, Result};

/// Generates the particle set for a new frame.
pub trait Sampler: Send {
    /// Replace the content of `new_samples` with the proposals for `image`.
    ///
    /// `samples` is the weighted set of the previous frame and `offset` the
    /// estimated object motion since then; either may be ignored. Fails with
    /// [`condtrack_core::TrackerError::EmptyImage`] on zero-sized frames.
    fn sample(
        &mut self,
        samples: &[Sample],
        offset: Offset,
        image: &Image,
        new_samples: &mut Vec<Sample>,
    ) -> Result<()>;
}

/// Smallest accepted geometric growth between two size levels.
pub const MIN_SIZE_SCALE: f64 = 1.05;

/// Pixel size range `[min, max]` for relative sizes on an image, clamped to
/// at least one pixel.
pub(crate) fn pixel_size_range(min_size: f64, max_size: f64, width: u32, height: u32) -> (i32, i32) {
    let dim = width.min(height) as f64;
    let min_px = ((min_size * dim) as i32).max(1);
    let max_px = ((max_size * dim) as i32).max(1);
    (min_px, max_px)
}

/// Clamp a spread or step parameter to be non-negative; NaN becomes 0.
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

/// Clamp a `(min, max)` pair of relative sizes into `[0, 1]` with `max >= min`.
pub(crate) fn clamp_size_fractions(min_size: f64, max_size: f64) -> (f64, f64) {
    let min_size = if min_size.is_nan() { 0.0 } else { min_size.clamp(0.0, 1.0) };
    let max_size = if max_size.is_nan() { 1.0 } else { max_size.clamp(0.0, 1.0) };
    (min_size, max_size.max(min_size))
}
