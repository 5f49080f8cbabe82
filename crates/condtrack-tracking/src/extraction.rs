//! State estimation from a weighted particle set.

use crate::sample::Sample;

/// Reduces a weighted particle set to a single position estimate.
pub trait PositionExtractor: Send {
    /// Best estimate, or `None` when no usable sample exists.
    fn extract(&self, samples: &[Sample]) -> Option<Sample>;
}

/// Mode estimate: the sample with the highest weight.
///
/// Only reported when that sample has a positive weight and was classified
/// as the object. Ties keep the first sample in set order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxWeightPositionExtractor;

impl PositionExtractor for MaxWeightPositionExtractor {
    fn extract(&self, samples: &[Sample]) -> Option<Sample> {
        let best = samples.iter().fold(None::<&Sample>, |best, s| match best {
            Some(b) if s.weight() <= b.weight() => Some(b),
            _ => Some(s),
        })?;
        (best.weight() > 0.0 && best.is_object()).then_some(*best)
    }
}

/// Moment estimate: weight-normalised mean of position and size over all
/// samples, object-labelled or not.
///
/// No outlier rejection is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMeanPositionExtractor;

impl PositionExtractor for WeightedMeanPositionExtractor {
    fn extract(&self, samples: &[Sample]) -> Option<Sample> {
        if samples.is_empty() {
            return None;
        }
        let (mut x, mut y, mut size, mut total) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
        for s in samples {
            let w = s.weight();
            x += w * s.x() as f64;
            y += w * s.y() as f64;
            size += w * s.size() as f64;
            total += w;
        }
        if total == 0.0 {
            return None;
        }
        let round = |v: f64| (v / total + 0.5).floor() as i32;
        let mut position = Sample::new(round(x), round(y), round(size));
        position.set_weight(total / samples.len() as f64);
        position.set_object(true);
        Some(position)
    }
}

/// Restricts the input to object-labelled samples before delegating.
pub struct FilteringPositionExtractor {
    inner: Box<dyn PositionExtractor>,
}

impl FilteringPositionExtractor {
    pub fn new(inner: Box<dyn PositionExtractor>) -> Self {
        Self { inner }
    }
}

impl PositionExtractor for FilteringPositionExtractor {
    fn extract(&self, samples: &[Sample]) -> Option<Sample> {
        let objects: Vec<Sample> = samples.iter().filter(|s| s.is_object()).copied().collect();
        self.inner.extract(&objects)
    }
}
