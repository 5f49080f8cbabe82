//! Measurement models: scoring particles against the current frame.

use crate::sample::Sample;
use condtrack_core::{Image, IntegralImage, Rect};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Assigns weight and object flag to each particle given the current frame.
pub trait MeasurementModel: Send {
    fn evaluate(&mut self, image: &Image, samples: &mut [Sample]);
}

/// Outcome of classifying one image patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub is_object: bool,
    /// Likelihood of the patch showing the object, in [0, 1].
    pub probability: f64,
}

/// Binary classifier with a probabilistic output, evaluated on square
/// patches of the current frame.
pub trait PatchClassifier: Send + Sync {
    fn classify(&self, integral: &IntegralImage, bounds: Rect) -> Classification;
}

/// Measurement model that weights each sample by the probability a
/// [`PatchClassifier`] assigns to its bounding box.
///
/// Samples are independent, so they are evaluated in parallel.
pub struct ClassifierMeasurementModel<C> {
    classifier: C,
}

impl<C: PatchClassifier> ClassifierMeasurementModel<C> {
    pub fn new(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

impl<C: PatchClassifier> MeasurementModel for ClassifierMeasurementModel<C> {
    fn evaluate(&mut self, image: &Image, samples: &mut [Sample]) {
        if image.is_empty() {
            for sample in samples.iter_mut() {
                sample.set_weight(0.0);
                sample.set_object(false);
            }
            return;
        }
        let integral = IntegralImage::new(&image.to_gray());
        let classifier = &self.classifier;
        samples.par_iter_mut().for_each(|sample| {
            let result = classifier.classify(&integral, sample.bounds());
            sample.set_weight(result.probability);
            sample.set_object(result.is_object);
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastClassifierParams {
    /// Width of the surrounding ring relative to the patch size.
    pub surround: f64,
    /// Slope of the logistic mapping from contrast to probability.
    pub gain: f64,
    /// Contrast at which the probability is 0.5.
    pub bias: f64,
    /// Minimum probability to label a patch as the object.
    pub threshold: f64,
}

impl Default for ContrastClassifierParams {
    fn default() -> Self {
        Self {
            surround: 0.25,
            gain: 12.0,
            bias: 0.3,
            threshold: 0.5,
        }
    }
}

/// Centre-surround contrast classifier.
///
/// Scores a patch by how much brighter it is than a ring around it, which
/// peaks when the window is aligned with a bright blob on a dark background.
#[derive(Debug, Clone)]
pub struct ContrastClassifier {
    params: ContrastClassifierParams,
}

impl ContrastClassifier {
    pub fn new(params: ContrastClassifierParams) -> Self {
        Self { params }
    }

    /// Mean of the patch minus mean of the surrounding ring, `None` if the
    /// patch misses the image.
    pub fn contrast(&self, integral: &IntegralImage, bounds: Rect) -> Option<f64> {
        let inner_mean = integral.mean(bounds)?;
        let (inner_sum, inner_area) = integral.sum_and_area(bounds);
        let margin = ((bounds.width as f64 * self.params.surround).round() as i32).max(1);
        let (outer_sum, outer_area) = integral.sum_and_area(bounds.expand(margin));
        let ring_area = outer_area - inner_area;
        if ring_area <= 0 {
            return Some(inner_mean);
        }
        let ring_mean = (outer_sum - inner_sum) / ring_area as f64;
        Some(inner_mean - ring_mean)
    }
}

impl Default for ContrastClassifier {
    fn default() -> Self {
        Self::new(ContrastClassifierParams::default())
    }
}

impl PatchClassifier for ContrastClassifier {
    fn classify(&self, integral: &IntegralImage, bounds: Rect) -> Classification {
        let probability = match self.contrast(integral, bounds) {
            Some(c) => 1.0 / (1.0 + (-self.params.gain * (c - self.params.bias)).exp()),
            None => 0.0,
        };
        Classification {
            is_object: probability >= self.params.threshold,
            probability,
        }
    }
}
