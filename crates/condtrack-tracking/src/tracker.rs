//! Condensation tracker: one sample → measure → extract step per frame.

use crate::extraction::PositionExtractor;
use crate::measurement::MeasurementModel;
use crate::sample::Sample;
use crate::sampler::Sampler;
use condtrack_core::{Image, Offset, Rect, Result};
use tracing::debug;

/// Single-object particle filter.
///
/// Frames must be fed in order: each [`process`](Self::process) call reads
/// the particle set, position and offset left by the previous one.
pub struct CondensationTracker {
    sampler: Box<dyn Sampler>,
    measurement_model: Box<dyn MeasurementModel>,
    extractor: Box<dyn PositionExtractor>,
    samples: Vec<Sample>,
    old_samples: Vec<Sample>,
    /// Last reported position; kept across frames without a detection.
    old_position: Option<Sample>,
    offset: Offset,
    frame: u64,
}

impl CondensationTracker {
    pub fn new(
        sampler: Box<dyn Sampler>,
        measurement_model: Box<dyn MeasurementModel>,
        extractor: Box<dyn PositionExtractor>,
    ) -> Self {
        Self {
            sampler,
            measurement_model,
            extractor,
            samples: Vec::new(),
            old_samples: Vec::new(),
            old_position: None,
            offset: Offset::ZERO,
            frame: 0,
        }
    }

    /// Run one filtering step on `image`.
    ///
    /// Returns the bounding box of the estimated object position, or `None`
    /// if nothing was detected in this frame. On error the tracker state is
    /// unchanged.
    pub fn process(&mut self, image: &Image) -> Result<Option<Rect>> {
        std::mem::swap(&mut self.samples, &mut self.old_samples);
        if let Err(err) =
            self.sampler
                .sample(&self.old_samples, self.offset, image, &mut self.samples)
        {
            // A failed frame leaves the previous generation in place.
            std::mem::swap(&mut self.samples, &mut self.old_samples);
            return Err(err);
        }
        self.measurement_model.evaluate(image, &mut self.samples);
        let position = self.extractor.extract(&self.samples);
        self.frame += 1;

        match position {
            Some(position) => {
                self.offset = match self.old_position {
                    Some(old) => Offset::new(
                        (position.x() - old.x()) as f64,
                        (position.y() - old.y()) as f64,
                    ),
                    None => Offset::ZERO,
                };
                self.old_position = Some(position);
                debug!(
                    frame = self.frame,
                    samples = self.samples.len(),
                    x = position.x(),
                    y = position.y(),
                    size = position.size(),
                    "object detected"
                );
                Ok(Some(position.bounds()))
            }
            None => {
                self.offset = Offset::ZERO;
                debug!(frame = self.frame, samples = self.samples.len(), "no detection");
                Ok(None)
            }
        }
    }

    /// Weighted particle set of the last processed frame.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Last detected position, remembered across frames without detection.
    pub fn position(&self) -> Option<Sample> {
        self.old_position
    }

    /// Motion offset handed to the sampler on the next frame.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Number of frames processed since creation or the last reset.
    pub fn frames_processed(&self) -> u64 {
        self.frame
    }

    pub fn set_sampler(&mut self, sampler: Box<dyn Sampler>) {
        self.sampler = sampler;
    }

    pub fn set_measurement_model(&mut self, measurement_model: Box<dyn MeasurementModel>) {
        self.measurement_model = measurement_model;
    }

    pub fn set_extractor(&mut self, extractor: Box<dyn PositionExtractor>) {
        self.extractor = extractor;
    }

    /// Forget all particles and the last position.
    pub fn reset(&mut self) {
        self.samples.clear();
        self.old_samples.clear();
        self.old_position = None;
        self.offset = Offset::ZERO;
        self.frame = 0;
    }
}
