//! Tests that setting volume to 0 fully silences the voice

use sweepsynth::{Engine, Param};

fn assert_silent(buffer: &[f32]) {
    for (i, &sample) in buffer.iter().enumerate() {
        assert_eq!(sample, 0.0, "frame {i} should be silent, got {sample}");
    }
}

#[test]
fn test_volume_zero_silences() {
    let mut engine = Engine::new(44100.0);
    let handle = engine.handle();
    handle.set(Param::Volume, 0.0);

    let mut buffer = vec![0.0f32; 1024];
    for _ in 0..5 {
        engine.fill_buffer(&mut buffer);
        assert_silent(&buffer);
    }
}

#[test]
fn test_volume_zero_mid_playback() {
    let mut engine = Engine::new(44100.0);
    let handle = engine.handle();
    let mut buffer = vec![0.0f32; 1024];

    engine.fill_buffer(&mut buffer);
    assert!(buffer.iter().any(|s| s.abs() > 0.001), "should be audible first");

    // No smoothing: the very next buffer is silent
    handle.set(Param::Volume, 0.0);
    engine.fill_buffer(&mut buffer);
    assert_silent(&buffer);
}

#[test]
fn test_volume_zero_regardless_of_other_params() {
    let mut engine = Engine::new(48000.0);
    let handle = engine.handle();
    handle.set(Param::Volume, 0.0);

    let mut buffer = vec![0.0f32; 512];
    for note in [0u8, 40, 69, 100, 127] {
        handle.note_on(note);
        for index in [0.0, 0.5, 1.0] {
            handle.set(Param::ModIndex, index);
            engine.fill_buffer(&mut buffer);
            assert_silent(&buffer);
        }
    }
}
