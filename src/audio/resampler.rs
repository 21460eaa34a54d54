//! Sample rate and channel layout conversion for the output device.
//!
//! Ambient sound files rarely match the output device format, so decoded
//! frames are remixed to the device channel count and, when the rates differ,
//! resampled with the `rubato` crate before they reach the ring buffer.

use {
    rubato::{FftFixedIn, Resampler},
    thiserror::Error,
    tracing::debug,
};

use crate::audio::decoder::AudioFormat;

/// Input chunk size per channel handed to rubato.
const RESAMPLER_CHUNK_SIZE: usize = 1024;

/// Error type for resampling operations.
#[derive(Error, Debug)]
pub enum ResamplingError {
    /// Rubato resampling error.
    #[error("Rubato error: {0}")]
    RubatoError(String),
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Audio resampler using rubato's FFT based fixed-input resampler.
pub struct AudioResampler {
    /// Rubato resampler instance.
    resampler: FftFixedIn<f32>,
    /// Number of channels.
    channels: usize,
    /// Accumulated interleaved input not yet forming a full chunk.
    input_buffer: Vec<f32>,
}

impl AudioResampler {
    /// Creates a new audio resampler.
    ///
    /// # Arguments
    ///
    /// * `source_rate` - Source sample rate in Hz.
    /// * `target_rate` - Target sample rate in Hz.
    /// * `channels` - Number of interleaved channels.
    ///
    /// # Errors
    ///
    /// Returns `ResamplingError` if the rates are identical, a value is zero,
    /// or rubato rejects the configuration.
    pub fn new(source_rate: u32, target_rate: u32, channels: usize) -> Result<Self, ResamplingError> {
        if source_rate == 0 || target_rate == 0 || channels == 0 {
            return Err(ResamplingError::InvalidConfiguration(format!(
                "rates and channel count must be non-zero ({source_rate} Hz -> {target_rate} Hz, {channels} channels)"
            )));
        }
        if source_rate == target_rate {
            return Err(ResamplingError::InvalidConfiguration(
                "Source and target rates are identical".to_string(),
            ));
        }

        let resampler = FftFixedIn::<f32>::new(
            source_rate as usize,
            target_rate as usize,
            RESAMPLER_CHUNK_SIZE,
            2,
            channels,
        )
        .map_err(|e| ResamplingError::RubatoError(e.to_string()))?;

        debug!("Resampling {source_rate} Hz -> {target_rate} Hz ({channels} channels)");

        Ok(Self {
            resampler,
            channels,
            input_buffer: Vec::with_capacity(RESAMPLER_CHUNK_SIZE * channels * 2),
        })
    }

    /// Resamples a block of interleaved samples.
    ///
    /// Input that does not fill a whole rubato chunk is kept and prepended to
    /// the next call, so the output may be empty for small blocks.
    ///
    /// # Errors
    ///
    /// Returns `ResamplingError` if rubato fails to process a chunk.
    pub fn resample_block(&mut self, input_samples: &[f32]) -> Result<Vec<f32>, ResamplingError> {
        self.input_buffer.extend_from_slice(input_samples);
        let mut output = Vec::new();

        loop {
            let needed = self.resampler.input_frames_next() * self.channels;
            if self.input_buffer.len() < needed {
                break;
            }

            let chunk: Vec<f32> = self.input_buffer.drain(..needed).collect();
            let planar: Vec<Vec<f32>> = (0..self.channels)
                .map(|ch| chunk.iter().skip(ch).step_by(self.channels).copied().collect())
                .collect();

            let processed = self
                .resampler
                .process(&planar, None)
                .map_err(|e| ResamplingError::RubatoError(e.to_string()))?;

            let frames = processed.first().map_or(0, Vec::len);
            output.reserve(frames * self.channels);
            for frame in 0..frames {
                for channel in &processed {
                    output.push(channel[frame]);
                }
            }
        }

        Ok(output)
    }
}

/// Adapts decoded frames to the output device's channel count and rate.
pub struct FrameConverter {
    /// Channel count of the decoded file.
    source_channels: usize,
    /// Channel count of the output stream.
    target_channels: usize,
    /// Present only when the sample rates differ.
    resampler: Option<AudioResampler>,
}

impl FrameConverter {
    /// Creates a converter from the file format to the device format.
    ///
    /// # Errors
    ///
    /// Returns `ResamplingError` if a resampler is needed but cannot be built.
    pub fn new(source: AudioFormat, target: AudioFormat) -> Result<Self, ResamplingError> {
        let target_channels = target.channels as usize;
        let resampler = if source.sample_rate == target.sample_rate {
            None
        } else {
            Some(AudioResampler::new(
                source.sample_rate,
                target.sample_rate,
                target_channels,
            )?)
        };

        Ok(Self {
            source_channels: source.channels as usize,
            target_channels,
            resampler,
        })
    }

    /// Converts a block of interleaved source samples.
    ///
    /// # Errors
    ///
    /// Returns `ResamplingError` if resampling fails.
    pub fn process(&mut self, samples: &[f32]) -> Result<Vec<f32>, ResamplingError> {
        let remixed = remix_channels(samples, self.source_channels, self.target_channels);
        match self.resampler.as_mut() {
            Some(resampler) => resampler.resample_block(&remixed),
            None => Ok(remixed),
        }
    }
}

/// Remixes interleaved samples between channel counts.
///
/// Mono is duplicated to every output channel, downmixing to mono averages
/// all channels, and other layouts map channel `n` to `n % source_channels`.
#[must_use]
pub fn remix_channels(samples: &[f32], source_channels: usize, target_channels: usize) -> Vec<f32> {
    if source_channels == target_channels || source_channels == 0 || target_channels == 0 {
        return samples.to_vec();
    }

    let frames = samples.len() / source_channels;
    let mut output = Vec::with_capacity(frames * target_channels);

    for frame in samples.chunks_exact(source_channels) {
        if target_channels == 1 {
            output.push(frame.iter().sum::<f32>() / source_channels as f32);
        } else {
            for ch in 0..target_channels {
                output.push(frame[ch % source_channels]);
            }
        }
    }

    output
}
