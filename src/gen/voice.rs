//! The swept-modulator voice
//!
//! The carrier is amplitude-modulated by a sine whose frequency follows the
//! sweep in [`super::sweep`]. The raw sample spans roughly
//! `[-(1 + mod_index), 1 + mod_index]` and must be clipped before output.

use std::f64::consts::TAU;

use super::sweep::{modulator_frequency, SweepSettings};

/// Everything the voice needs for one sample, read once from the parameter store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceSettings {
    pub carrier_freq: f64,
    pub sweep: SweepSettings,
    pub mod_index: f64,
    pub volume: f64,
}

/// Raw (pre-clip, pre-volume) voice output at time `t`
#[inline]
pub fn voice_sample(settings: &VoiceSettings, t: f64) -> f64 {
    let carrier = (TAU * settings.carrier_freq * t).sin();
    let modulator = (TAU * modulator_frequency(&settings.sweep, t) * t).sin();
    carrier * (1.0 + settings.mod_index * modulator)
}

/// Carrier alone at time `t`
#[inline]
pub fn carrier_sample(settings: &VoiceSettings, t: f64) -> f64 {
    (TAU * settings.carrier_freq * t).sin()
}

/// Fill `out` with raw voice samples spread evenly over `span` seconds
/// starting at `start`.
///
/// Used for look-ahead displays; not part of the audio path.
pub fn preview(settings: &VoiceSettings, start: f64, span: f64, out: &mut [f64]) {
    let points = out.len() as f64;
    for (i, value) in out.iter_mut().enumerate() {
        let t = start + i as f64 / points * span;
        *value = voice_sample(settings, t);
    }
}
