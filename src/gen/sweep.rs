//! Sawtooth sweep of the modulator frequency
//!
//! The modulator ramps linearly from `min_freq` to `max_freq` over `period`
//! seconds and then wraps back to `min_freq`. The wrap is taken on the
//! frequency range rather than on `t`, so editing the bounds or the period
//! while running does not reset the sweep.

/// Sweep bounds and period read from the parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSettings {
    pub min_freq: f64,
    pub max_freq: f64,
    /// Seconds for one full sweep from min to max
    pub period: f64,
}

/// Instantaneous modulator frequency at time `t` (seconds).
///
/// A zero-width or inverted range, or a non-positive period, yields a constant
/// `min_freq` instead of a non-finite value.
#[inline]
pub fn modulator_frequency(sweep: &SweepSettings, t: f64) -> f64 {
    let range = sweep.max_freq - sweep.min_freq;
    if !(range > 0.0) || !(sweep.period > 0.0) {
        return sweep.min_freq;
    }

    let periods = t / sweep.period;
    sweep.min_freq + (periods * range) % range
}
