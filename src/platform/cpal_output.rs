use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    BufferSize, Device, FromSample, Sample, SampleFormat, SampleRate, SizedSample, Stream,
    StreamConfig,
};
use log::{error, info, warn};

use super::AudioOutput;
use crate::engine::Engine;

pub struct CpalOutput {
    stream: Option<Stream>,
    device: Option<Device>,
    config: Option<StreamConfig>,
    sample_format: SampleFormat,
    buffer_frames: Option<u32>,
    sample_rate: f32,
    is_active: bool,
}

impl CpalOutput {
    pub fn new() -> Self {
        Self {
            stream: None,
            device: None,
            config: None,
            sample_format: SampleFormat::F32,
            buffer_frames: None,
            sample_rate: 44100.0,
            is_active: false,
        }
    }

    /// Request a fixed device buffer size; must be called before `initialize`
    pub fn with_buffer_frames(mut self, frames: Option<u32>) -> Self {
        self.buffer_frames = frames;
        self
    }

    /// Move the engine into the audio callback and build the stream
    pub fn create_stream_with_engine(&mut self, engine: Engine) -> Result<(), anyhow::Error> {
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Device not initialized"))?;
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Config not initialized"))?;

        if (engine.sample_rate() - f64::from(config.sample_rate.0)).abs() > f64::EPSILON {
            warn!(
                "Engine runs at {} Hz but the stream runs at {} Hz",
                engine.sample_rate(),
                config.sample_rate.0
            );
        }

        let stream = match self.sample_format {
            SampleFormat::I8 => Self::make_stream::<i8>(device, config, engine)?,
            SampleFormat::I16 => Self::make_stream::<i16>(device, config, engine)?,
            SampleFormat::I32 => Self::make_stream::<i32>(device, config, engine)?,
            SampleFormat::I64 => Self::make_stream::<i64>(device, config, engine)?,
            SampleFormat::U8 => Self::make_stream::<u8>(device, config, engine)?,
            SampleFormat::U16 => Self::make_stream::<u16>(device, config, engine)?,
            SampleFormat::U32 => Self::make_stream::<u32>(device, config, engine)?,
            SampleFormat::U64 => Self::make_stream::<u64>(device, config, engine)?,
            SampleFormat::F32 => Self::make_stream::<f32>(device, config, engine)?,
            SampleFormat::F64 => Self::make_stream::<f64>(device, config, engine)?,
            sample_format => {
                return Err(anyhow::anyhow!("Unsupported sample format '{}'", sample_format))
            }
        };

        self.stream = Some(stream);
        Ok(())
    }

    /// Setup the CPAL host and device
    fn setup_host_device(&mut self, preferred_rate: u32) -> Result<(), anyhow::Error> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("Default output device is not available"))?;

        info!("Output device: {}", device.name()?);

        let default_config = device.default_output_config()?;
        let sample_format = default_config.sample_format();

        let preferred = device.supported_output_configs()?.find(|range| {
            range.sample_format() == sample_format
                && range.min_sample_rate().0 <= preferred_rate
                && preferred_rate <= range.max_sample_rate().0
        });

        let supported = match preferred {
            Some(range) => range.with_sample_rate(SampleRate(preferred_rate)),
            None => {
                warn!(
                    "Device does not support {} Hz, using its default of {} Hz",
                    preferred_rate,
                    default_config.sample_rate().0
                );
                default_config
            }
        };
        info!("Output config: {:?}", supported);

        let mut config: StreamConfig = supported.into();
        if let Some(frames) = self.buffer_frames {
            config.buffer_size = BufferSize::Fixed(frames);
        }

        self.sample_rate = config.sample_rate.0 as f32;
        self.sample_format = sample_format;
        self.device = Some(device);
        self.config = Some(config);

        Ok(())
    }

    /// Create a typed stream for the given sample format
    fn make_stream<T>(
        device: &Device,
        config: &StreamConfig,
        mut engine: Engine,
    ) -> Result<Stream, anyhow::Error>
    where
        T: SizedSample + FromSample<f32>,
    {
        let num_channels = config.channels as usize;

        let err_fn = |err| error!("Error in output sound stream: {}", err);

        let stream = device.build_output_stream(
            config,
            move |output: &mut [T], _: &cpal::OutputCallbackInfo| {
                Self::process_frames(output, &mut engine, num_channels);
            },
            err_fn,
            None,
        )?;

        Ok(stream)
    }

    /// Render one device buffer, copying the mono engine output to every channel
    fn process_frames<T>(output: &mut [T], engine: &mut Engine, num_channels: usize)
    where
        T: Sample + FromSample<f32>,
    {
        let frames = output.len() / num_channels;
        engine.render(frames, |frame_index, value| {
            let start = frame_index * num_channels;
            let sample = T::from_sample(value);
            for channel in &mut output[start..start + num_channels] {
                *channel = sample;
            }
        });
    }
}

impl Default for CpalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput for CpalOutput {
    fn initialize(&mut self, sample_rate: f32) -> Result<(), anyhow::Error> {
        self.sample_rate = sample_rate;
        self.setup_host_device(sample_rate.round() as u32)?;
        Ok(())
    }

    fn start(&mut self) -> Result<(), anyhow::Error> {
        if let Some(stream) = &self.stream {
            stream.play()?;
            self.is_active = true;
            info!("Audio stream started at sample rate: {}", self.sample_rate);
        } else {
            return Err(anyhow::anyhow!(
                "Stream not created. Call create_stream_with_engine first."
            ));
        }

        Ok(())
    }

    /// Pause and drop the stream, releasing the device
    fn stop(&mut self) -> Result<(), anyhow::Error> {
        if let Some(stream) = self.stream.take() {
            stream.pause()?;
            self.is_active = false;
            info!("Audio stream stopped");
        }

        Ok(())
    }

    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}
