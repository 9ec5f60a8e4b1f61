//! Startup configuration for the synth

use crate::engine::DEFAULT_SAMPLE_RATE;
use crate::params::{Param, SynthParams, MOD_RANGE_GAP};

/// Device buffer size used by the reference setup
pub const DEFAULT_BUFFER_FRAMES: u32 = 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    /// Sample rate to request from the device; the device default is used if unsupported
    pub sample_rate: f64,
    /// Fixed device buffer size in frames, `None` leaves it to the device
    pub buffer_frames: Option<u32>,
    /// Try to connect a MIDI input for note events
    pub enable_midi: bool,
    /// Substring of the MIDI port name to prefer
    pub midi_port: Option<String>,
    /// Initial parameter values, applied in order through the clamping setters
    pub initial: Vec<(Param, f64)>,
}

impl SynthConfig {
    pub fn with_param(mut self, param: Param, value: f64) -> Self {
        self.initial.push((param, value));
        self
    }

    /// Apply the initial values to `params`
    ///
    /// The modulator bounds are written in whichever order keeps both
    /// requested values reachable.
    pub fn apply(&self, params: &SynthParams) {
        for &(param, value) in &self.initial {
            if param == Param::MinModFreq && value + MOD_RANGE_GAP > params.get(Param::MaxModFreq) {
                if let Some(&(_, max)) = self.initial.iter().find(|(p, _)| *p == Param::MaxModFreq) {
                    params.set(Param::MaxModFreq, max);
                }
            }
            params.set(param, value);
        }
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            buffer_frames: Some(DEFAULT_BUFFER_FRAMES),
            enable_midi: true,
            midi_port: None,
            initial: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let config = SynthConfig::default();
        assert_eq!(config.sample_rate, 44100.0);
        assert_eq!(config.buffer_frames, Some(1024));
        assert!(config.enable_midi);
    }

    #[test]
    fn test_apply_clamps() {
        let params = SynthParams::new();
        SynthConfig::default()
            .with_param(Param::Volume, 3.0)
            .with_param(Param::CarrierFreq, 330.0)
            .apply(&params);
        assert_eq!(params.get(Param::Volume), 1.0);
        assert_eq!(params.get(Param::CarrierFreq), 330.0);
    }

    #[test]
    fn test_apply_raises_max_before_min() {
        let params = SynthParams::new();
        SynthConfig::default()
            .with_param(Param::MinModFreq, 800.0)
            .with_param(Param::MaxModFreq, 1200.0)
            .apply(&params);
        assert_eq!(params.get(Param::MinModFreq), 800.0);
        assert_eq!(params.get(Param::MaxModFreq), 1200.0);
    }
}
