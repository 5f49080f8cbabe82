//! Condtrack Tracking - Condensation (particle filter) single-object tracker.
//!
//! Each frame runs sample → measure → extract: a [`Sampler`] proposes
//! particles, a [`MeasurementModel`] weights them and a
//! [`PositionExtractor`] reduces the weighted set to one position.

pub mod config;
pub mod extraction;
pub mod measurement;
pub mod resampling;
pub mod sample;
pub mod sampler;
pub mod tracker;

pub use config::{ExtractorConfig, SamplerConfig, TrackerConfig};
pub use extraction::{
    FilteringPositionExtractor, MaxWeightPositionExtractor, PositionExtractor,
    WeightedMeanPositionExtractor,
};
pub use measurement::{
    Classification, ClassifierMeasurementModel, ContrastClassifier, ContrastClassifierParams,
    MeasurementModel, PatchClassifier,
};
pub use resampling::{LowVarianceSampling, ResamplingAlgorithm};
pub use sample::Sample;
pub use sampler::{
    GridSampler, GridSamplerParams, ResamplingSampler, ResamplingSamplerParams, Sampler,
    SimpleTransitionModel, TransitionModel, TransitionParams,
};
pub use tracker::CondensationTracker;
