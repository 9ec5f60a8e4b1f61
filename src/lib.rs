//! Real-time swept-modulator synth voice with live parameters and MIDI note input

pub mod config;
pub mod controls;
pub mod engine;
pub mod params;

pub mod effects;
pub mod gen;
pub mod utils;

// Platform abstraction layer
pub mod platform;

#[cfg(feature = "native")]
pub mod synth;

pub use config::SynthConfig;
pub use engine::{Engine, SynthHandle, TransportClock};
pub use params::{Param, SynthParams};

#[cfg(feature = "native")]
pub use synth::Synth;
