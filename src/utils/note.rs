/// Equal-tempered note to frequency conversion, A4 (note 69) = 440 Hz.

/// Reference pitch of note 69
pub const A4_FREQ: f64 = 440.0;
/// Note number of the reference pitch
pub const A4_NOTE: u8 = 69;

/// Convert a MIDI note number (0-127) to a frequency in Hz.
#[inline]
pub fn midi_note_to_freq(note: u8) -> f64 {
    A4_FREQ * 2.0_f64.powf((f64::from(note) - f64::from(A4_NOTE)) / 12.0)
}
