//! Synth lifecycle: audio output, optional note input, and the control handle

use std::sync::Arc;

use log::{info, warn};

use crate::config::SynthConfig;
use crate::engine::{Engine, SynthHandle};
use crate::params::SynthParams;
use crate::platform::{AudioOutput, CpalOutput};

#[cfg(feature = "midi")]
use crate::platform::NoteInput;

/// A running synth
///
/// Owns the output stream (and through it the [`Engine`]) plus the note
/// source. Dropping it without calling [`Synth::stop`] also closes both.
pub struct Synth {
    handle: SynthHandle,
    output: CpalOutput,
    #[cfg(feature = "midi")]
    notes: Option<NoteInput>,
}

impl Synth {
    /// Open the audio device and start playing
    ///
    /// Audio failures are returned as errors. A missing or broken MIDI input
    /// only logs a warning; the synth then runs without live note input.
    pub fn start(config: &SynthConfig) -> Result<Self, anyhow::Error> {
        let params = Arc::new(SynthParams::new());
        config.apply(&params);

        let mut output = CpalOutput::new().with_buffer_frames(config.buffer_frames);
        output.initialize(config.sample_rate as f32)?;

        let engine = Engine::with_params(params, f64::from(output.sample_rate()));
        let handle = engine.handle();

        #[cfg(feature = "midi")]
        let notes = if config.enable_midi {
            match NoteInput::connect(config.midi_port.as_deref(), handle.clone()) {
                Ok(input) => Some(input),
                Err(err) => {
                    warn!("MIDI input unavailable, continuing without it: {}", err);
                    None
                }
            }
        } else {
            None
        };

        #[cfg(not(feature = "midi"))]
        if config.enable_midi {
            warn!("Built without the `midi` feature, note input disabled");
        }

        output.create_stream_with_engine(engine)?;
        output.start()?;
        info!("Synth started");

        Ok(Self {
            handle,
            output,
            #[cfg(feature = "midi")]
            notes,
        })
    }

    pub fn handle(&self) -> &SynthHandle {
        &self.handle
    }

    /// Whether live note input is connected
    pub fn has_note_input(&self) -> bool {
        #[cfg(feature = "midi")]
        {
            self.notes.is_some()
        }
        #[cfg(not(feature = "midi"))]
        {
            false
        }
    }

    pub fn is_playing(&self) -> bool {
        self.output.is_active()
    }

    /// Detach the note source, then close the audio stream
    pub fn stop(mut self) -> Result<(), anyhow::Error> {
        #[cfg(feature = "midi")]
        if let Some(notes) = self.notes.take() {
            notes.close();
        }
        self.output.stop()?;
        info!("Synth stopped");
        Ok(())
    }
}
