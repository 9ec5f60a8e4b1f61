//! Threshold soft clipper
//!
//! Below the threshold the signal passes through untouched. Above it the
//! excess is scaled by a compression factor that falls linearly from 1 to 0
//! as the excess grows to `hard_limit - threshold`, and stays at 0 beyond.
//! The output magnitude therefore never exceeds `hard_limit`.

use super::Effect;

/// Level where clipping begins
pub const CLIP_THRESHOLD: f64 = 0.6;
/// Ceiling of the clipper output
pub const CLIP_HARD_LIMIT: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftClipper {
    pub threshold: f64,
    pub hard_limit: f64,
}

impl SoftClipper {
    pub fn new(threshold: f64, hard_limit: f64) -> Self {
        Self {
            threshold,
            hard_limit,
        }
    }

    #[inline]
    pub fn clip(&self, sample: f64) -> f64 {
        let magnitude = sample.abs();
        if magnitude <= self.threshold {
            return sample;
        }

        let excess = magnitude - self.threshold;
        let compression = 1.0 - (excess / (self.hard_limit - self.threshold)).min(1.0);
        // Skip the product once fully compressed so an infinite excess cannot become NaN
        let kept = if compression > 0.0 { excess * compression } else { 0.0 };

        let sign = if sample < 0.0 { -1.0 } else { 1.0 };
        sign * (self.threshold + kept)
    }
}

impl Default for SoftClipper {
    fn default() -> Self {
        Self::new(CLIP_THRESHOLD, CLIP_HARD_LIMIT)
    }
}

impl Effect for SoftClipper {
    fn process(&self, input: f64) -> f64 {
        self.clip(input)
    }
}

/// Clip with the default threshold and ceiling
#[inline]
pub fn soft_clip(sample: f64) -> f64 {
    SoftClipper::default().clip(sample)
}
