//! Audio output management using the `cpal` crate.
//!
//! This module handles output device selection and stream creation. The
//! stream callback pulls samples from the ring buffer, applies the shared
//! volume, and emits silence while playback is paused.

use std::{
    sync::{
        Arc,
        atomic::{
            AtomicBool, AtomicU32,
            Ordering::{Acquire, Release},
        },
    },
    time::Duration,
};

use {
    cpal::{
        BuildStreamError, Device, Host, OutputCallbackInfo, PlayStreamError,
        SampleFormat::{self, F32, I16, U16},
        Stream, StreamConfig, default_host,
        traits::{DeviceTrait, HostTrait, StreamTrait},
    },
    rtrb::{Consumer, PopError::Empty},
    thiserror::Error,
    tracing::{debug, error, warn},
};

use crate::audio::decoder::AudioFormat;

/// Error type for audio output operations.
#[derive(Error, Debug)]
pub enum OutputError {
    /// CPAL stream construction error.
    #[error("Audio output error: {0}")]
    CpalError(#[from] BuildStreamError),
    /// Failed to start audio stream.
    #[error("Failed to start audio stream: {0}")]
    StreamStartError(#[from] PlayStreamError),
    /// No suitable audio device found.
    #[error("No suitable audio device found")]
    NoDeviceFound,
    /// Unsupported sample format.
    #[error("Unsupported sample format: {format:?}")]
    UnsupportedSampleFormat { format: SampleFormat },
}

/// Audio output configuration.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Preferred output device name, default device when `None`.
    pub device_name: Option<String>,
    /// Buffer duration in milliseconds.
    pub buffer_duration_ms: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            device_name: None,
            buffer_duration_ms: 50,
        }
    }
}

/// Playback controls shared between the engine and the stream callback.
///
/// Volume is stored as the bit pattern of an `f32` so the realtime callback
/// never takes a lock.
#[derive(Debug, Clone)]
pub struct OutputControls {
    /// Whether the callback should emit silence.
    paused: Arc<AtomicBool>,
    /// Linear gain in [0, 1], as `f32` bits.
    volume: Arc<AtomicU32>,
}

impl OutputControls {
    /// Creates controls with the given initial volume, not paused.
    #[must_use]
    pub fn new(volume: f32) -> Self {
        Self {
            paused: Arc::new(AtomicBool::new(false)),
            volume: Arc::new(AtomicU32::new(clamp_volume(volume).to_bits())),
        }
    }

    /// Sets the output gain, clamped to [0, 1].
    pub fn set_volume(&self, volume: f32) {
        self.volume.store(clamp_volume(volume).to_bits(), Release);
    }

    /// Gets the output gain.
    #[must_use]
    pub fn volume(&self) -> f32 {
        f32::from_bits(self.volume.load(Acquire))
    }

    /// Pauses or unpauses the stream callback.
    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Release);
    }

    /// Returns whether the stream callback is emitting silence.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused.load(Acquire)
    }
}

/// Clamps a gain to [0, 1], mapping NaN to silence.
fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

/// Computes the ring buffer capacity for the configured buffer duration.
///
/// The result is a power of two and never below 4096 samples.
#[must_use]
pub fn ring_buffer_capacity(format: AudioFormat, buffer_duration_ms: u32) -> usize {
    let samples = u64::from(format.sample_rate) * u64::from(format.channels)
        * u64::from(buffer_duration_ms)
        / 1000;
    usize::try_from(samples)
        .unwrap_or(usize::MAX / 2)
        .max(4096)
        .next_power_of_two()
}

/// Manages the audio output device and stream creation.
pub struct AudioOutput {
    /// The selected output device.
    device: Device,
    /// Current output configuration.
    config: OutputConfig,
}

impl AudioOutput {
    /// Opens the configured output device, falling back to the default one.
    ///
    /// # Errors
    ///
    /// Returns `OutputError::NoDeviceFound` if no output device is available.
    pub fn new(config: OutputConfig) -> Result<Self, OutputError> {
        let host = default_host();
        let device = match config.device_name.as_deref() {
            Some(name) => find_device(&host, name).or_else(|| {
                warn!("Output device {name:?} not found, using default device");
                host.default_output_device()
            }),
            None => host.default_output_device(),
        }
        .ok_or(OutputError::NoDeviceFound)?;

        Ok(AudioOutput { device, config })
    }

    /// Gets the device's default stream configuration.
    ///
    /// # Returns
    ///
    /// The stream configuration, its sample format, and the equivalent
    /// `AudioFormat` used for conversion.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if the device capabilities cannot be queried.
    pub fn stream_config(&self) -> Result<(StreamConfig, SampleFormat, AudioFormat), OutputError> {
        let supported = self
            .device
            .default_output_config()
            .map_err(|_| OutputError::NoDeviceFound)?;

        let sample_format = supported.sample_format();
        let stream_config: StreamConfig = supported.config();
        let format = AudioFormat {
            sample_rate: stream_config.sample_rate,
            channels: u32::from(stream_config.channels),
        };

        Ok((stream_config, sample_format, format))
    }

    /// Creates and starts an output stream reading from `consumer`.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if stream creation or startup fails.
    pub fn start_stream(
        &self,
        stream_config: &StreamConfig,
        sample_format: SampleFormat,
        mut consumer: Consumer<f32>,
        controls: OutputControls,
    ) -> Result<Stream, OutputError> {
        let err_fn = |err| error!("Audio stream error: {err}");
        let timeout = Some(Duration::from_millis(u64::from(
            self.config.buffer_duration_ms,
        )));

        let stream = match sample_format {
            F32 => self.device.build_output_stream(
                stream_config,
                move |data: &mut [f32], _: &OutputCallbackInfo| {
                    write_samples(data, &mut consumer, &controls, 0.0, |v| v);
                },
                err_fn,
                timeout,
            )?,
            I16 => self.device.build_output_stream(
                stream_config,
                move |data: &mut [i16], _: &OutputCallbackInfo| {
                    write_samples(data, &mut consumer, &controls, 0, |v| {
                        (v * f32::from(i16::MAX)) as i16
                    });
                },
                err_fn,
                timeout,
            )?,
            U16 => self.device.build_output_stream(
                stream_config,
                move |data: &mut [u16], _: &OutputCallbackInfo| {
                    // Midpoint is silence for unsigned samples
                    write_samples(data, &mut consumer, &controls, 32768, |v| {
                        ((v + 1.0) * f32::from(u16::MAX) / 2.0) as u16
                    });
                },
                err_fn,
                timeout,
            )?,
            format => return Err(OutputError::UnsupportedSampleFormat { format }),
        };

        stream.play()?;
        debug!("Output stream started ({sample_format:?})");
        Ok(stream)
    }

    /// Gets the current device name.
    pub fn get_current_device_name(&self) -> String {
        self.device
            .description()
            .map(|desc| desc.to_string())
            .unwrap_or_else(|_| "Unknown".to_string())
    }
}

/// Finds an output device by its description.
fn find_device(host: &Host, name: &str) -> Option<Device> {
    host.output_devices().ok()?.find(|device| {
        device
            .description()
            .is_ok_and(|desc| desc.to_string() == name)
    })
}

/// Fills one callback buffer from the ring buffer.
///
/// Underruns and pauses produce `silence`; samples are scaled by the shared
/// volume and clamped to [-1, 1] before conversion.
fn write_samples<T: Copy>(
    data: &mut [T],
    consumer: &mut Consumer<f32>,
    controls: &OutputControls,
    silence: T,
    convert: impl Fn(f32) -> T,
) {
    if controls.is_paused() {
        data.fill(silence);
        return;
    }

    let volume = controls.volume();
    for sample in data.iter_mut() {
        *sample = match consumer.pop() {
            Ok(value) => convert((value * volume).clamp(-1.0, 1.0)),
            Err(Empty) => silence,
        };
    }
}
