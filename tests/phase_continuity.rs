//! Split buffers must render exactly what one long buffer renders

use sweepsynth::{Engine, Param};

fn render_in_chunks(sizes: &[usize]) -> Vec<f32> {
    let mut engine = Engine::new(44100.0);
    engine.handle().set(Param::ModIndex, 0.8);

    let mut out = Vec::new();
    for &size in sizes {
        let mut buffer = vec![0.0f32; size];
        engine.fill_buffer(&mut buffer);
        out.extend_from_slice(&buffer);
    }
    out
}

#[test]
fn test_two_buffers_equal_one_double_buffer() {
    let split = render_in_chunks(&[1024, 1024]);
    let whole = render_in_chunks(&[2048]);
    assert_eq!(split, whole);
}

#[test]
fn test_uneven_splits() {
    let split = render_in_chunks(&[1, 127, 900, 3068]);
    let whole = render_in_chunks(&[4096]);
    assert_eq!(split, whole);
}

#[test]
fn test_time_cursor_advances_once_per_call() {
    let mut engine = Engine::new(44100.0);
    let handle = engine.handle();
    let mut buffer = vec![0.0f32; 1024];

    for call in 1..=10u64 {
        engine.fill_buffer(&mut buffer);
        assert_eq!(engine.frames_rendered(), call * 1024);
        assert_eq!(handle.time(), (call * 1024) as f64 / 44100.0);
    }
}
