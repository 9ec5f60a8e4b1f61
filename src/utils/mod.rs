//! Utility modules: logging and note mapping

pub mod logging;
pub mod note;

pub use logging::init_logger;
pub use note::midi_note_to_freq;
