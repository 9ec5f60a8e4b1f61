//! Platform abstraction for audio output and note input
//! Device collaborators live here; the synthesis core in `engine` never touches a device.

pub mod midi_input;

pub use self::midi_input::{parse_midi_message, NoteEvent};

#[cfg(feature = "midi")]
pub use self::midi_input::NoteInput;

/// Trait for platform-specific audio output implementations
pub trait AudioOutput {
    /// Pick a device and stream configuration, preferring `sample_rate`
    fn initialize(&mut self, sample_rate: f32) -> Result<(), anyhow::Error>;

    /// Start the audio stream
    fn start(&mut self) -> Result<(), anyhow::Error>;

    /// Stop the audio stream
    fn stop(&mut self) -> Result<(), anyhow::Error>;

    /// Get the current sample rate
    fn sample_rate(&self) -> f32;

    /// Check if the audio output is active
    fn is_active(&self) -> bool;
}

// Platform-specific implementations
#[cfg(feature = "native")]
pub mod cpal_output;

#[cfg(feature = "native")]
pub use self::cpal_output::CpalOutput;
