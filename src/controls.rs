//! Control-surface logic shared by front ends
//!
//! Tracks the selected parameter, applies step adjustments through the
//! clamping setters and formats the status shown to the player. It also
//! previews the next 20 ms of raw voice output at the engine's time cursor to
//! report how hard the clipper is being driven.

use std::fmt::Write;

use crate::effects::CLIP_THRESHOLD;
use crate::engine::SynthHandle;
use crate::gen::preview;
use crate::params::Param;

/// Points in the look-ahead window
pub const PREVIEW_POINTS: usize = 400;
/// Seconds covered by the look-ahead window
pub const PREVIEW_SPAN: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    fn steps(self) -> i32 {
        match self {
            Direction::Down => -1,
            Direction::Up => 1,
        }
    }
}

pub struct ControlPanel {
    selected: usize,
    preview: Vec<f64>,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            selected: 0,
            preview: vec![0.0; PREVIEW_POINTS],
        }
    }

    pub fn selected(&self) -> Param {
        Param::ALL[self.selected]
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < Param::ALL.len() {
            self.selected += 1;
        }
    }

    /// Step the selected parameter; returns the stored value
    pub fn adjust(&self, handle: &SynthHandle, direction: Direction) -> f64 {
        handle.nudge(self.selected(), direction.steps())
    }

    /// Peak magnitude of the raw voice over the look-ahead window
    pub fn preview_peak(&mut self, handle: &SynthHandle) -> f64 {
        let settings = handle.snapshot();
        preview(&settings, handle.time(), PREVIEW_SPAN, &mut self.preview);
        self.preview.iter().fold(0.0_f64, |peak, s| peak.max(s.abs()))
    }

    /// One line per parameter, the selected one marked with `>`
    pub fn status_lines(&self, handle: &SynthHandle) -> Vec<String> {
        Param::ALL
            .iter()
            .enumerate()
            .map(|(i, &param)| {
                let marker = if i == self.selected { '>' } else { ' ' };
                let value = handle.get(param);
                let precision = if param.step() < 1.0 { 2 } else { 1 };
                format!(
                    "{} {}: {:.*}{}",
                    marker,
                    param.label(),
                    precision,
                    value,
                    param.unit()
                )
            })
            .collect()
    }

    /// Compact single-line status for raw terminals
    pub fn status_line(&mut self, handle: &SynthHandle) -> String {
        let peak = self.preview_peak(handle);
        let param = self.selected();
        let mut line = String::new();
        let _ = write!(
            line,
            "{}: {:.2}{} | t={:.2}s | drive {:.2}",
            param.label(),
            handle.get(param),
            param.unit(),
            handle.time(),
            peak
        );
        if peak > CLIP_THRESHOLD {
            line.push_str(" (clipping)");
        }
        line
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    #[test]
    fn test_selection_is_bounded() {
        let mut panel = ControlPanel::new();
        panel.select_prev();
        assert_eq!(panel.selected(), Param::CarrierFreq);

        for _ in 0..20 {
            panel.select_next();
        }
        assert_eq!(panel.selected(), Param::Volume);
    }

    #[test]
    fn test_adjust_steps_selected_param() {
        let engine = Engine::new(44100.0);
        let handle = engine.handle();
        let mut panel = ControlPanel::new();

        assert_eq!(panel.adjust(&handle, Direction::Up), 450.0);
        panel.select_next();
        assert_eq!(panel.adjust(&handle, Direction::Down), 90.0);
        assert_eq!(handle.get(Param::CarrierFreq), 450.0);
    }

    #[test]
    fn test_status_lines() {
        let engine = Engine::new(44100.0);
        let handle = engine.handle();
        let panel = ControlPanel::new();
        let lines = panel.status_lines(&handle);

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "> Carrier Frequency: 440.0 Hz");
        assert_eq!(lines[3], "  Sweep Time: 0.10 s");
        assert_eq!(lines[5], "  Volume: 0.75");
    }

    #[test]
    fn test_preview_peak_tracks_mod_index() {
        let engine = Engine::new(44100.0);
        let handle = engine.handle();
        let mut panel = ControlPanel::new();

        handle.set(Param::ModIndex, 0.0);
        let plain = panel.preview_peak(&handle);
        assert!(plain <= 1.0 + 1e-12);
        assert!(plain > 0.9, "carrier alone should near full scale, got {plain}");

        assert!(panel.status_line(&handle).contains("(clipping)"));
    }
}
