//! MIDI note input
//!
//! Only note-on matters to the synth: it retunes the carrier. Note-off and
//! velocity are parsed but ignored.

#[cfg(feature = "midi")]
use crate::engine::SynthHandle;
#[cfg(feature = "midi")]
use log::{debug, info};
#[cfg(feature = "midi")]
use midir::{MidiInput, MidiInputConnection};

/// MIDI message types relevant for the synth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    /// Note on with note number and velocity (0-127)
    NoteOn { note: u8, velocity: u8 },
    NoteOff { note: u8 },
}

/// Parse raw MIDI bytes into note events, on any channel
pub fn parse_midi_message(message: &[u8]) -> Option<NoteEvent> {
    let [status, note, velocity, ..] = *message else {
        return None;
    };

    match status & 0xF0 {
        // Note On with velocity 0 is a Note Off
        0x90 if velocity > 0 => Some(NoteEvent::NoteOn {
            note: note & 0x7F,
            velocity,
        }),
        0x90 | 0x80 => Some(NoteEvent::NoteOff { note: note & 0x7F }),
        _ => None,
    }
}

/// Live connection from a MIDI input port to a synth
#[cfg(feature = "midi")]
pub struct NoteInput {
    connection: MidiInputConnection<()>,
    port_name: String,
}

#[cfg(feature = "midi")]
impl NoteInput {
    /// Connect to the first port whose name contains `port_filter`, or to the
    /// first available port. Note-on events are applied from the MIDI thread.
    pub fn connect(port_filter: Option<&str>, handle: SynthHandle) -> Result<Self, anyhow::Error> {
        let midi_in = MidiInput::new("sweepsynth")?;

        let ports = midi_in.ports();
        if ports.is_empty() {
            return Err(anyhow::anyhow!("No MIDI input devices found"));
        }

        // Find matching port or use first available
        let port = port_filter
            .and_then(|filter| {
                ports.iter().find(|p| {
                    midi_in
                        .port_name(p)
                        .map(|n| n.contains(filter))
                        .unwrap_or(false)
                })
            })
            .unwrap_or(&ports[0]);

        let port_name = midi_in.port_name(port)?;
        info!("Connecting to MIDI input: {}", port_name);

        let connection = midi_in
            .connect(
                port,
                "sweepsynth-note-input",
                move |_timestamp, message, _| {
                    if let Some(NoteEvent::NoteOn { note, .. }) = parse_midi_message(message) {
                        handle.note_on(note);
                    }
                },
                (),
            )
            .map_err(|e| anyhow::anyhow!("Failed to connect to MIDI input: {}", e))?;

        Ok(Self {
            connection,
            port_name,
        })
    }

    /// List available MIDI input ports
    pub fn list_ports() -> Vec<String> {
        let midi_in = MidiInput::new("sweepsynth-list").ok();
        midi_in
            .map(|m| {
                m.ports()
                    .iter()
                    .filter_map(|p| m.port_name(p).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    /// Detach from the port
    pub fn close(self) {
        debug!("Closing MIDI input: {}", self.port_name);
        self.connection.close();
    }
}
