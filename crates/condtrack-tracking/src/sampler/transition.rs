//! Motion models applied to resampled particles.

use super::non_negative;
use crate::sample::Sample;
use condtrack_core::Offset;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

/// Predicts the state of each particle in the next frame.
pub trait TransitionModel: Send {
    /// Move every sample in place given the estimated object motion.
    fn predict(&mut self, samples: &mut [Sample], offset: Offset);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionParams {
    /// Standard deviation of the position noise, relative to the sample size.
    pub position_scatter: f64,
    /// Standard deviation of the relative size change.
    pub size_scatter: f64,
}

impl Default for TransitionParams {
    fn default() -> Self {
        Self {
            position_scatter: 0.1,
            size_scatter: 0.05,
        }
    }
}

/// Constant-velocity drift by the offset plus Gaussian diffusion.
pub struct SimpleTransitionModel {
    position_scatter: f64,
    size_scatter: f64,
    rng: StdRng,
}

impl SimpleTransitionModel {
    /// Create a transition model; negative or NaN scatter values become 0.
    pub fn new(params: TransitionParams, seed: u64) -> Self {
        Self {
            position_scatter: non_negative(params.position_scatter),
            size_scatter: non_negative(params.size_scatter),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn noise(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}

impl TransitionModel for SimpleTransitionModel {
    fn predict(&mut self, samples: &mut [Sample], offset: Offset) {
        for sample in samples {
            let size = sample.size() as f64;
            let spread = self.position_scatter * size;
            let x = sample.x() as f64 + offset.x + spread * self.noise();
            let y = sample.y() as f64 + offset.y + spread * self.noise();
            let new_size = size * (1.0 + self.size_scatter * self.noise());
            sample.set_x(x.round() as i32);
            sample.set_y(y.round() as i32);
            sample.set_size((new_size.round() as i32).max(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_scatter_applies_offset_only() {
        let mut model = SimpleTransitionModel::new(
            TransitionParams {
                position_scatter: 0.0,
                size_scatter: 0.0,
            },
            1,
        );
        let mut samples = vec![Sample::new(10, 20, 8), Sample::new(0, 0, 4)];
        model.predict(&mut samples, Offset::new(3.0, -2.0));
        assert_eq!((samples[0].x(), samples[0].y(), samples[0].size()), (13, 18, 8));
        assert_eq!((samples[1].x(), samples[1].y(), samples[1].size()), (3, -2, 4));
    }

    #[test]
    fn test_scatter_diffuses_around_offset() {
        let mut model = SimpleTransitionModel::new(TransitionParams::default(), 5);
        let mut samples = vec![Sample::new(100, 100, 40); 2000];
        model.predict(&mut samples, Offset::new(10.0, 0.0));
        let mean_x = samples.iter().map(|s| s.x() as f64).sum::<f64>() / samples.len() as f64;
        assert!((mean_x - 110.0).abs() < 1.0);
        assert!(samples.iter().any(|s| s.x() != 110));
        assert!(samples.iter().all(|s| s.size() >= 1));
    }

    #[test]
    fn test_negative_scatter_is_clamped() {
        let mut model = SimpleTransitionModel::new(
            TransitionParams {
                position_scatter: -1.0,
                size_scatter: -1.0,
            },
            2,
        );
        let mut samples = vec![Sample::new(5, 5, 5)];
        model.predict(&mut samples, Offset::ZERO);
        assert_eq!((samples[0].x(), samples[0].y(), samples[0].size()), (5, 5, 5));

        let mut model = SimpleTransitionModel::new(
            TransitionParams {
                position_scatter: f64::NAN,
                size_scatter: f64::NAN,
            },
            2,
        );
        model.predict(&mut samples, Offset::new(1.0, 0.0));
        assert_eq!((samples[0].x(), samples[0].y(), samples[0].size()), (6, 5, 5));
    }
}
