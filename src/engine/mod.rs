//! The real-time synth engine
//!
//! [`Engine`] is owned by the audio callback. It keeps the authoritative time
//! cursor as a count of rendered frames and fills output buffers from the
//! shared [`SynthParams`]. The control thread talks to it only through a
//! [`SynthHandle`]: atomic parameter writes in, atomic time cursor out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::effects::{Effect, SoftClipper};
use crate::gen::{voice_sample, VoiceSettings};
use crate::params::{Param, SynthParams};

/// Sample rate used when the output device does not dictate one
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Read-only view of the engine's time cursor for other threads
#[derive(Debug)]
pub struct TransportClock {
    frames: AtomicU64,
    sample_rate: f64,
}

impl TransportClock {
    fn new(sample_rate: f64) -> Self {
        Self {
            frames: AtomicU64::new(0),
            sample_rate,
        }
    }

    /// Frames rendered by the engine so far
    pub fn frames(&self) -> u64 {
        self.frames.load(Ordering::Acquire)
    }

    /// Time cursor in seconds
    pub fn seconds(&self) -> f64 {
        self.frames() as f64 / self.sample_rate
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn publish(&self, frames: u64) {
        self.frames.store(frames, Ordering::Release);
    }
}

/// Control-thread handle to a running engine
#[derive(Debug, Clone)]
pub struct SynthHandle {
    params: Arc<SynthParams>,
    clock: Arc<TransportClock>,
}

impl SynthHandle {
    pub fn params(&self) -> &SynthParams {
        &self.params
    }

    pub fn get(&self, param: Param) -> f64 {
        self.params.get(param)
    }

    /// Set a parameter, clamped to its bounds. Returns the stored value.
    pub fn set(&self, param: Param, value: f64) -> f64 {
        self.params.set(param, value)
    }

    pub fn nudge(&self, param: Param, steps: i32) -> f64 {
        self.params.nudge(param, steps)
    }

    /// Retune the carrier to `note`. There is no note-off; the voice always sounds.
    pub fn note_on(&self, note: u8) {
        self.params.note_on(note);
    }

    pub fn snapshot(&self) -> VoiceSettings {
        self.params.snapshot()
    }

    /// The engine's time cursor in seconds
    pub fn time(&self) -> f64 {
        self.clock.seconds()
    }

    pub fn sample_rate(&self) -> f64 {
        self.clock.sample_rate()
    }
}

/// Mono swept-modulator voice with soft clipping and volume
pub struct Engine {
    sample_rate: f64,
    /// Frames rendered so far; `frames / sample_rate` is the time cursor
    frames: u64,
    params: Arc<SynthParams>,
    clock: Arc<TransportClock>,
    clipper: SoftClipper,
}

impl Engine {
    pub fn new(sample_rate: f64) -> Self {
        Self::with_params(Arc::new(SynthParams::new()), sample_rate)
    }

    /// Create an engine reading from an existing parameter store
    pub fn with_params(params: Arc<SynthParams>, sample_rate: f64) -> Self {
        let sample_rate = if sample_rate > 0.0 {
            sample_rate
        } else {
            DEFAULT_SAMPLE_RATE
        };
        Self {
            sample_rate,
            frames: 0,
            params,
            clock: Arc::new(TransportClock::new(sample_rate)),
            clipper: SoftClipper::default(),
        }
    }

    pub fn handle(&self) -> SynthHandle {
        SynthHandle {
            params: self.params.clone(),
            clock: self.clock.clone(),
        }
    }

    pub fn params(&self) -> &SynthParams {
        &self.params
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Time cursor in seconds
    pub fn time(&self) -> f64 {
        self.frames as f64 / self.sample_rate
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn note_on(&self, note: u8) {
        self.params.note_on(note);
    }

    /// One output sample at time `t`: voice, then clipper, then volume
    #[inline]
    pub fn sample_at(&self, t: f64) -> f32 {
        let settings = self.params.snapshot();
        let clipped = self.clipper.process(voice_sample(&settings, t));
        let out = clipped * settings.volume;
        if out.is_finite() {
            out as f32
        } else {
            0.0
        }
    }

    /// Render `frames` samples, handing each to `write` with its frame index,
    /// then advance the time cursor once.
    ///
    /// Runs on the audio thread: no allocation, locking or I/O.
    #[inline]
    pub fn render<F>(&mut self, frames: usize, mut write: F)
    where
        F: FnMut(usize, f32),
    {
        for i in 0..frames {
            let t = (self.frames + i as u64) as f64 / self.sample_rate;
            write(i, self.sample_at(t));
        }
        self.frames += frames as u64;
        self.clock.publish(self.frames);
    }

    /// Fill a mono buffer
    pub fn fill_buffer(&mut self, out: &mut [f32]) {
        self.render(out.len(), |i, sample| out[i] = sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_advances_per_buffer() {
        let mut engine = Engine::new(44100.0);
        let mut buffer = [0.0f32; 441];

        engine.fill_buffer(&mut buffer);
        assert_eq!(engine.frames_rendered(), 441);
        assert!((engine.time() - 0.01).abs() < 1e-12);

        engine.fill_buffer(&mut buffer);
        assert!((engine.time() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_handle_sees_published_time() {
        let mut engine = Engine::new(44100.0);
        let handle = engine.handle();
        assert_eq!(handle.time(), 0.0);

        let mut buffer = vec![0.0f32; 1024];
        engine.fill_buffer(&mut buffer);
        assert_eq!(handle.time(), engine.time());
    }

    #[test]
    fn test_handle_writes_reach_engine() {
        let engine = Engine::new(44100.0);
        let handle = engine.handle();
        handle.set(Param::Volume, 0.2);
        handle.note_on(57);
        assert_eq!(engine.params().get(Param::Volume), 0.2);
        assert!((engine.params().get(Param::CarrierFreq) - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_sample_rate_falls_back() {
        let engine = Engine::new(0.0);
        assert_eq!(engine.sample_rate(), DEFAULT_SAMPLE_RATE);
    }

    #[test]
    fn test_empty_buffer_keeps_time() {
        let mut engine = Engine::new(48000.0);
        engine.fill_buffer(&mut []);
        assert_eq!(engine.time(), 0.0);
    }
}
