//! Serializable tracker configuration.
//!
//! A [`TrackerConfig`] selects the sampler and position extractor variants
//! and their parameters; [`TrackerConfig::build`] wires them into a
//! [`CondensationTracker`] around a caller-supplied measurement model.

use crate::extraction::{
    FilteringPositionExtractor, MaxWeightPositionExtractor, PositionExtractor,
    WeightedMeanPositionExtractor,
};
use crate::measurement::MeasurementModel;
use crate::resampling::LowVarianceSampling;
use crate::sampler::{
    GridSampler, GridSamplerParams, ResamplingSampler, ResamplingSamplerParams, Sampler,
    SimpleTransitionModel, TransitionParams,
};
use crate::tracker::CondensationTracker;
use condtrack_core::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SamplerConfig {
    Grid(GridSamplerParams),
    Resampling {
        #[serde(default)]
        params: ResamplingSamplerParams,
        #[serde(default)]
        transition: TransitionParams,
    },
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::Resampling {
            params: ResamplingSamplerParams::default(),
            transition: TransitionParams::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExtractorConfig {
    MaxWeight,
    WeightedMean,
    /// Restricts the inner extractor to object-labelled samples.
    Filtering {
        inner: Box<ExtractorConfig>,
    },
}

impl ExtractorConfig {
    pub fn build(&self) -> Box<dyn PositionExtractor> {
        match self {
            Self::MaxWeight => Box::new(MaxWeightPositionExtractor),
            Self::WeightedMean => Box::new(WeightedMeanPositionExtractor),
            Self::Filtering { inner } => Box::new(FilteringPositionExtractor::new(inner.build())),
        }
    }
}

/// Complete tracker setup, loadable from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub sampler: SamplerConfig,
    pub extractor: ExtractorConfig,
    /// Seed for every stochastic component; each derives its own stream.
    pub seed: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            sampler: SamplerConfig::default(),
            extractor: ExtractorConfig::Filtering {
                inner: Box::new(ExtractorConfig::WeightedMean),
            },
            seed: 0x5eed,
        }
    }
}

impl TrackerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TrackerError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| TrackerError::Config(e.to_string()))
    }

    pub fn build_sampler(&self) -> Result<Box<dyn Sampler>> {
        let sampler: Box<dyn Sampler> = match &self.sampler {
            SamplerConfig::Grid(params) => Box::new(GridSampler::new(params.clone())),
            SamplerConfig::Resampling { params, transition } => {
                if params.count == 0 {
                    return Err(TrackerError::InvalidParameter(
                        "resampling sampler needs count > 0".into(),
                    ));
                }
                Box::new(ResamplingSampler::new(
                    params.clone(),
                    Box::new(LowVarianceSampling::new(self.seed)),
                    Box::new(SimpleTransitionModel::new(
                        transition.clone(),
                        self.seed.wrapping_add(1),
                    )),
                    self.seed.wrapping_add(2),
                ))
            }
        };
        Ok(sampler)
    }

    /// Assemble a tracker around `measurement_model`.
    pub fn build(&self, measurement_model: Box<dyn MeasurementModel>) -> Result<CondensationTracker> {
        let sampler = self.build_sampler()?;
        info!(sampler = ?self.sampler, extractor = ?self.extractor, seed = self.seed, "building tracker");
        Ok(CondensationTracker::new(
            sampler,
            measurement_model,
            self.extractor.build(),
        ))
    }
}
