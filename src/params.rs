//! Live-adjustable synthesis parameters
//!
//! Every parameter is a single `f64` stored as bits in an `AtomicU64`, so the
//! control thread can write while the audio callback reads without locks.
//! Values are set immediately: there is no smoothing between UI edits.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::gen::{SweepSettings, VoiceSettings};
use crate::utils::note::midi_note_to_freq;

/// Lowest carrier frequency reachable from the controls
pub const MIN_CARRIER_FREQ: f64 = 20.0;
/// Highest carrier or modulator frequency
pub const MAX_FREQ: f64 = 2000.0;
/// Lowest modulator frequency
pub const MIN_MOD_FREQ_FLOOR: f64 = 20.0;
/// Minimum distance kept between the modulator sweep bounds
pub const MOD_RANGE_GAP: f64 = 10.0;

pub const DEFAULT_CARRIER_FREQ: f64 = 440.0;
pub const DEFAULT_MIN_MOD_FREQ: f64 = 100.0;
pub const DEFAULT_MAX_MOD_FREQ: f64 = 600.0;
pub const DEFAULT_SWEEP_PERIOD: f64 = 0.1;
pub const DEFAULT_MOD_INDEX: f64 = 0.5;
pub const DEFAULT_VOLUME: f64 = 0.75;

/// Names of the parameters held by [`SynthParams`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Param {
    CarrierFreq,
    MinModFreq,
    MaxModFreq,
    SweepPeriod,
    ModIndex,
    Volume,
}

impl Param {
    /// All parameters in control-panel order
    pub const ALL: [Param; 6] = [
        Param::CarrierFreq,
        Param::MinModFreq,
        Param::MaxModFreq,
        Param::SweepPeriod,
        Param::ModIndex,
        Param::Volume,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Param::CarrierFreq => "Carrier Frequency",
            Param::MinModFreq => "Min Modulator Frequency",
            Param::MaxModFreq => "Max Modulator Frequency",
            Param::SweepPeriod => "Sweep Time",
            Param::ModIndex => "Modulation Index",
            Param::Volume => "Volume",
        }
    }

    pub fn default_value(self) -> f64 {
        match self {
            Param::CarrierFreq => DEFAULT_CARRIER_FREQ,
            Param::MinModFreq => DEFAULT_MIN_MOD_FREQ,
            Param::MaxModFreq => DEFAULT_MAX_MOD_FREQ,
            Param::SweepPeriod => DEFAULT_SWEEP_PERIOD,
            Param::ModIndex => DEFAULT_MOD_INDEX,
            Param::Volume => DEFAULT_VOLUME,
        }
    }

    /// Static range as (min, max)
    ///
    /// The modulator bounds are further limited by each other at set time,
    /// see [`SynthParams::set`].
    pub fn range(self) -> (f64, f64) {
        match self {
            Param::CarrierFreq => (MIN_CARRIER_FREQ, MAX_FREQ),
            Param::MinModFreq => (MIN_MOD_FREQ_FLOOR, MAX_FREQ - MOD_RANGE_GAP),
            Param::MaxModFreq => (MIN_MOD_FREQ_FLOOR + MOD_RANGE_GAP, MAX_FREQ),
            Param::SweepPeriod => (0.01, 1.0),
            Param::ModIndex => (0.0, 1.0),
            Param::Volume => (0.0, 1.0),
        }
    }

    /// Increment applied by one control-surface step
    pub fn step(self) -> f64 {
        match self {
            Param::CarrierFreq | Param::MinModFreq | Param::MaxModFreq => 10.0,
            Param::SweepPeriod => 0.01,
            Param::ModIndex | Param::Volume => 0.05,
        }
    }

    /// Unit suffix for display, if any
    pub fn unit(self) -> &'static str {
        match self {
            Param::CarrierFreq | Param::MinModFreq | Param::MaxModFreq => " Hz",
            Param::SweepPeriod => " s",
            Param::ModIndex | Param::Volume => "",
        }
    }
}

/// A lock-free `f64` cell
#[derive(Debug)]
pub struct AtomicParam {
    bits: AtomicU64,
}

impl AtomicParam {
    pub fn new(value: f64) -> Self {
        Self {
            bits: AtomicU64::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn store(&self, value: f64) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// The parameter store shared between the control thread and the audio callback
#[derive(Debug)]
pub struct SynthParams {
    carrier_freq: AtomicParam,
    min_mod_freq: AtomicParam,
    max_mod_freq: AtomicParam,
    sweep_period: AtomicParam,
    mod_index: AtomicParam,
    volume: AtomicParam,
}

impl SynthParams {
    pub fn new() -> Self {
        Self {
            carrier_freq: AtomicParam::new(DEFAULT_CARRIER_FREQ),
            min_mod_freq: AtomicParam::new(DEFAULT_MIN_MOD_FREQ),
            max_mod_freq: AtomicParam::new(DEFAULT_MAX_MOD_FREQ),
            sweep_period: AtomicParam::new(DEFAULT_SWEEP_PERIOD),
            mod_index: AtomicParam::new(DEFAULT_MOD_INDEX),
            volume: AtomicParam::new(DEFAULT_VOLUME),
        }
    }

    fn cell(&self, param: Param) -> &AtomicParam {
        match param {
            Param::CarrierFreq => &self.carrier_freq,
            Param::MinModFreq => &self.min_mod_freq,
            Param::MaxModFreq => &self.max_mod_freq,
            Param::SweepPeriod => &self.sweep_period,
            Param::ModIndex => &self.mod_index,
            Param::Volume => &self.volume,
        }
    }

    #[inline]
    pub fn get(&self, param: Param) -> f64 {
        self.cell(param).get()
    }

    /// Current allowed range for `param`, including the cross-limit between
    /// the two modulator bounds
    pub fn bounds(&self, param: Param) -> (f64, f64) {
        let (lo, hi) = param.range();
        match param {
            Param::MinModFreq => (lo, hi.min(self.max_mod_freq.get() - MOD_RANGE_GAP).max(lo)),
            Param::MaxModFreq => (lo.max(self.min_mod_freq.get() + MOD_RANGE_GAP).min(hi), hi),
            _ => (lo, hi),
        }
    }

    /// Clamp `value` into the current bounds and store it
    ///
    /// Returns the value actually stored. NaN leaves the parameter unchanged.
    pub fn set(&self, param: Param, value: f64) -> f64 {
        let cell = self.cell(param);
        if value.is_nan() {
            return cell.get();
        }
        let (lo, hi) = self.bounds(param);
        let clamped = value.clamp(lo, hi);
        cell.store(clamped);
        clamped
    }

    /// Move `param` by a whole number of control steps
    pub fn nudge(&self, param: Param, steps: i32) -> f64 {
        self.set(param, self.get(param) + param.step() * f64::from(steps))
    }

    /// Set the carrier frequency from a note number
    pub fn note_on(&self, note: u8) -> f64 {
        self.set(Param::CarrierFreq, midi_note_to_freq(note))
    }

    /// Read every parameter once
    #[inline]
    pub fn snapshot(&self) -> VoiceSettings {
        VoiceSettings {
            carrier_freq: self.carrier_freq.get(),
            sweep: SweepSettings {
                min_freq: self.min_mod_freq.get(),
                max_freq: self.max_mod_freq.get(),
                period: self.sweep_period.get(),
            },
            mod_index: self.mod_index.get(),
            volume: self.volume.get(),
        }
    }

    pub fn reset(&self) {
        for param in Param::ALL {
            self.cell(param).store(param.default_value());
        }
    }
}

impl Default for SynthParams {
    fn default() -> Self {
        Self::new()
    }
}
