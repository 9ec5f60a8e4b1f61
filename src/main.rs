/* Terminal front end for the synth.
Up/Down selects a parameter, Left/Right adjusts it, q or Esc quits.
Notes from the first MIDI input retune the carrier.
*/

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use log::info;

use sweepsynth::config::DEFAULT_BUFFER_FRAMES;
use sweepsynth::controls::{ControlPanel, Direction};
use sweepsynth::platform::NoteInput;
use sweepsynth::utils::init_logger;
use sweepsynth::{Param, Synth, SynthConfig, SynthHandle};

/// Swept-modulator synth with live controls
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Sample rate to request from the output device
    #[arg(long, default_value_t = 44100)]
    sample_rate: u32,

    /// Device buffer size in frames (0 leaves it to the device)
    #[arg(long, default_value_t = DEFAULT_BUFFER_FRAMES)]
    buffer_frames: u32,

    /// Do not connect a MIDI input
    #[arg(long)]
    no_midi: bool,

    /// Prefer the MIDI input whose name contains this text
    #[arg(long)]
    midi_port: Option<String>,

    /// Print the available MIDI inputs and exit
    #[arg(long)]
    list_midi_ports: bool,

    /// Initial carrier frequency in Hz
    #[arg(long)]
    carrier: Option<f64>,

    /// Initial lower bound of the modulator sweep in Hz
    #[arg(long)]
    min_mod: Option<f64>,

    /// Initial upper bound of the modulator sweep in Hz
    #[arg(long)]
    max_mod: Option<f64>,

    /// Initial sweep period in seconds
    #[arg(long)]
    sweep: Option<f64>,

    /// Initial modulation index (0-1)
    #[arg(long)]
    mod_index: Option<f64>,

    /// Initial volume (0-1)
    #[arg(long)]
    volume: Option<f64>,
}

impl Args {
    fn to_config(&self) -> SynthConfig {
        let mut config = SynthConfig {
            sample_rate: f64::from(self.sample_rate),
            buffer_frames: (self.buffer_frames > 0).then_some(self.buffer_frames),
            enable_midi: !self.no_midi,
            midi_port: self.midi_port.clone(),
            ..SynthConfig::default()
        };

        let overrides = [
            (Param::CarrierFreq, self.carrier),
            (Param::MinModFreq, self.min_mod),
            (Param::MaxModFreq, self.max_mod),
            (Param::SweepPeriod, self.sweep),
            (Param::ModIndex, self.mod_index),
            (Param::Volume, self.volume),
        ];
        for (param, value) in overrides {
            if let Some(value) = value {
                config = config.with_param(param, value);
            }
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let args = Args::parse();

    if args.list_midi_ports {
        let ports = NoteInput::list_ports();
        if ports.is_empty() {
            println!("No MIDI input ports found");
        }
        for (index, name) in ports.iter().enumerate() {
            println!("{}: {}", index, name);
        }
        return Ok(());
    }

    let synth = Synth::start(&args.to_config())?;
    if !synth.has_note_input() {
        info!("No live note input; carrier stays at {:.1} Hz", synth.handle().get(Param::CarrierFreq));
    }

    let mut panel = ControlPanel::new();
    for line in panel.status_lines(synth.handle()) {
        info!("{}", line);
    }
    info!("Use Up/Down to select, Left/Right to adjust, q to quit");

    enable_raw_mode()?;
    let result = run_controls(&mut panel, synth.handle());
    disable_raw_mode()?;
    println!();

    synth.stop()?;
    result
}

/// Poll keys at roughly 60 Hz and redraw the status line
fn run_controls(panel: &mut ControlPanel, handle: &SynthHandle) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    loop {
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            {
                match code {
                    KeyCode::Up => panel.select_prev(),
                    KeyCode::Down => panel.select_next(),
                    KeyCode::Left => {
                        panel.adjust(handle, Direction::Down);
                    }
                    KeyCode::Right => {
                        panel.adjust(handle, Direction::Up);
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                    _ => {}
                }
            }
        }

        write!(stdout, "\r\x1b[2K{}", panel.status_line(handle))?;
        stdout.flush()?;
    }

    info!("Quitting...");
    Ok(())
}
