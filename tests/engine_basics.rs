// Integration tests for basic Engine functionality

use sweepsynth::effects::{soft_clip, CLIP_HARD_LIMIT};
use sweepsynth::{Engine, Param};

#[test]
fn test_engine_creation() {
    let engine = Engine::new(44100.0);

    assert_eq!(engine.sample_rate(), 44100.0);
    assert_eq!(engine.time(), 0.0);
    assert_eq!(engine.params().get(Param::CarrierFreq), 440.0);
}

#[test]
fn test_default_output_is_audible_and_bounded() {
    let mut engine = Engine::new(44100.0);
    let mut buffer = vec![0.0f32; 4096];
    engine.fill_buffer(&mut buffer);

    let peak = buffer.iter().map(|s| s.abs()).fold(0.0f32, f32::max);
    assert!(peak > 0.1, "Default voice should be audible, peak {peak}");
    assert!(buffer.iter().all(|s| s.is_finite()));
    assert!(f64::from(peak) <= CLIP_HARD_LIMIT * 0.75 + 1e-6);
}

#[test]
fn test_zero_index_is_pure_sine() {
    // 440 Hz lands a quarter period on an exact frame at this rate
    let sample_rate = 7040.0;
    let mut engine = Engine::new(sample_rate);
    let handle = engine.handle();
    handle.set(Param::ModIndex, 0.0);
    handle.set(Param::CarrierFreq, 440.0);

    let mut buffer = [0.0f32; 16];
    engine.fill_buffer(&mut buffer);

    assert_eq!(buffer[0], 0.0);
    let volume = handle.get(Param::Volume);
    assert_eq!(buffer[4], (volume * soft_clip(1.0)) as f32);
}

#[test]
fn test_zero_index_below_threshold_passes_sine_through() {
    let sample_rate = 44100.0;
    let mut engine = Engine::new(sample_rate);
    let handle = engine.handle();
    handle.set(Param::ModIndex, 0.0);
    handle.set(Param::Volume, 1.0);

    let mut buffer = vec![0.0f32; 2048];
    engine.fill_buffer(&mut buffer);

    for (i, &sample) in buffer.iter().enumerate() {
        let expected = (std::f64::consts::TAU * 440.0 * (i as f64 / sample_rate)).sin();
        if expected.abs() <= 0.6 {
            assert_eq!(sample, expected as f32, "frame {i}");
        }
    }
}

#[test]
fn test_note_on_changes_pitch() {
    let mut engine = Engine::new(44100.0);
    engine.note_on(81);
    assert!((engine.params().get(Param::CarrierFreq) - 880.0).abs() < 1e-9);

    let handle = engine.handle();
    handle.set(Param::ModIndex, 0.0);
    handle.set(Param::Volume, 1.0);

    // Count rising zero crossings over one second
    let mut buffer = vec![0.0f32; 44100];
    engine.fill_buffer(&mut buffer);
    let crossings = buffer
        .windows(2)
        .filter(|w| w[0] < 0.0 && w[1] >= 0.0)
        .count();
    assert!((879..=881).contains(&crossings), "got {crossings} crossings");
}

#[test]
fn test_extreme_sweep_settings_stay_bounded() {
    let mut engine = Engine::new(44100.0);
    let handle = engine.handle();
    handle.set(Param::MaxModFreq, 30.0);
    handle.set(Param::MinModFreq, 1990.0);
    handle.set(Param::ModIndex, 1.0);
    handle.set(Param::Volume, 1.0);

    let mut buffer = vec![0.0f32; 8192];
    engine.fill_buffer(&mut buffer);
    for sample in &buffer {
        assert!(sample.is_finite());
        assert!(f64::from(sample.abs()) <= CLIP_HARD_LIMIT);
    }
}
