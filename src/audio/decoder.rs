//! Audio file decoding using the `symphonia` crate.
//!
//! This module handles audio file format detection and decoding, and feeds the
//! decoded samples to the output system via a ring buffer, restarting from the
//! beginning of the file whenever the end is reached.

use std::{
    fs::File,
    io::{Error as StdError, ErrorKind::UnexpectedEof},
    path::{Path, PathBuf},
    thread::sleep,
    time::Duration,
};

use {
    rtrb::{Producer, PushError::Full},
    symphonia::{
        core::{
            audio::{SampleBuffer, SignalSpec},
            codecs::{CODEC_TYPE_NULL, Decoder, DecoderOptions},
            errors::Error as SymphoniaError,
            formats::{FormatOptions, FormatReader, SeekMode::Coarse, SeekTo::Time},
            io::{MediaSourceStream, MediaSourceStreamOptions},
            meta::MetadataOptions,
            probe::Hint,
            units::Time as SeekTime,
        },
        default::{get_codecs, get_probe},
    },
    thiserror::Error,
    tracing::{debug, warn},
};

use crate::audio::resampler::{FrameConverter, ResamplingError};

/// Sleep duration when producer buffer is full.
const PRODUCER_SLEEP_DURATION: Duration = Duration::from_micros(500);

/// Error type for audio decoding operations.
#[derive(Error, Debug)]
pub enum DecoderError {
    /// Failed to open or read the audio file.
    #[error("IO error: {0}")]
    IoError(#[from] StdError),
    /// Symphonia decoding error.
    #[error("Decoding error: {0}")]
    SymphoniaError(#[from] SymphoniaError),
    /// Unsupported audio format.
    #[error("Unsupported audio format")]
    UnsupportedFormat,
    /// No audio track found in file.
    #[error("No audio track found")]
    NoAudioTrack,
    /// Sample conversion for the output device failed.
    #[error("Conversion error: {0}")]
    ConversionError(#[from] ResamplingError),
}

/// Audio format information extracted during decoding setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels.
    pub channels: u32,
}

/// Audio decoder that reads and decodes one audio file.
pub struct AudioDecoder {
    /// Path of the file being decoded, kept for reopening.
    path: PathBuf,
    /// The underlying format reader.
    format_reader: Box<dyn FormatReader>,
    /// The active audio decoder.
    decoder: Box<dyn Decoder>,
    /// Identifier of the decoded track within the container.
    track_id: u32,
    /// Audio format information.
    pub format: AudioFormat,
    /// Signal specification from symphonia (sample rate + channel layout).
    pub signal_spec: SignalSpec,
}

impl AudioDecoder {
    /// Creates a new audio decoder for the specified file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the audio file to decode.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AudioDecoder` or a `DecoderError`.
    ///
    /// # Errors
    ///
    /// Returns `DecoderError` if:
    /// - The file cannot be opened or read
    /// - The file format is unsupported
    /// - No audio track is found in the file
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, DecoderError> {
        let path = path.as_ref();

        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(extension);
        }

        // Gapless trimming keeps the loop point free of encoder padding
        let format_opts = FormatOptions {
            enable_gapless: true,
            ..FormatOptions::default()
        };
        let metadata_opts = MetadataOptions::default();

        let probed = get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|e| match e {
                SymphoniaError::Unsupported(_) => DecoderError::UnsupportedFormat,
                other => DecoderError::SymphoniaError(other),
            })?;

        let format_reader = probed.format;

        let track = format_reader
            .tracks()
            .iter()
            .find(|track| track.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or(DecoderError::NoAudioTrack)?;

        let codec_params = &track.codec_params;
        let signal_spec = SignalSpec::new(
            codec_params.sample_rate.unwrap_or(44100),
            codec_params.channels.ok_or(DecoderError::NoAudioTrack)?,
        );

        let format = AudioFormat {
            sample_rate: signal_spec.rate,
            channels: u32::try_from(signal_spec.channels.count()).unwrap_or(2),
        };

        let decoder = get_codecs().make(codec_params, &DecoderOptions::default())?;
        let track_id = track.id;

        Ok(AudioDecoder {
            path: path.to_path_buf(),
            format_reader,
            decoder,
            track_id,
            format,
            signal_spec,
        })
    }

    /// Decodes the next packet of audio data into interleaved `f32` samples.
    ///
    /// # Returns
    ///
    /// `None` when the end of the file is reached.
    ///
    /// # Errors
    ///
    /// Returns `DecoderError` if reading the container fails.
    pub fn decode_next_packet(&mut self) -> Result<Option<Vec<f32>>, DecoderError> {
        loop {
            let packet = match self.format_reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == UnexpectedEof => {
                    return Ok(None);
                }
                Err(SymphoniaError::ResetRequired) => {
                    self.decoder.reset();
                    continue;
                }
                Err(e) => return Err(DecoderError::SymphoniaError(e)),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            match self.decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                    buffer.copy_interleaved_ref(decoded);
                    return Ok(Some(buffer.samples().to_vec()));
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    // Skip corrupted packets and continue
                    debug!("Skipping undecodable packet: {e}");
                }
                Err(e) => return Err(DecoderError::SymphoniaError(e)),
            }
        }
    }

    /// Moves the read position back to the start of the file.
    ///
    /// Containers that cannot seek are reopened instead.
    ///
    /// # Errors
    ///
    /// Returns `DecoderError` if the file can neither be seeked nor reopened.
    pub fn rewind(&mut self) -> Result<(), DecoderError> {
        let seek = self.format_reader.seek(
            Coarse,
            Time {
                time: SeekTime::new(0, 0.0),
                track_id: Some(self.track_id),
            },
        );

        match seek {
            Ok(_) => {
                self.decoder.reset();
                Ok(())
            }
            Err(e) => {
                debug!("Seek to start failed ({e}), reopening {:?}", self.path);
                *self = AudioDecoder::new(&self.path)?;
                Ok(())
            }
        }
    }
}

/// Audio producer that loops a decoded file into a ring buffer.
///
/// The producer runs on a dedicated thread and exits once the consumer side
/// of the ring buffer is dropped.
pub struct AudioProducer {
    /// The audio decoder that provides raw audio samples.
    decoder: AudioDecoder,
    /// Ring buffer producer for writing decoded samples.
    producer: Producer<f32>,
    /// Adapts decoded frames to the output device layout.
    converter: FrameConverter,
}

impl AudioProducer {
    /// Creates a new audio producer.
    ///
    /// # Arguments
    ///
    /// * `decoder` - The audio decoder to use.
    /// * `producer` - The ring buffer producer to write samples to.
    /// * `converter` - Channel and sample rate adapter for the output device.
    pub fn new(decoder: AudioDecoder, producer: Producer<f32>, converter: FrameConverter) -> Self {
        Self {
            decoder,
            producer,
            converter,
        }
    }

    /// Runs the looping production loop until the consumer goes away.
    ///
    /// # Errors
    ///
    /// Returns `DecoderError` if decoding, rewinding or conversion fails.
    pub fn run(mut self) -> Result<(), DecoderError> {
        let mut produced_this_pass = false;

        loop {
            let Some(samples) = self.decoder.decode_next_packet()? else {
                if !produced_this_pass {
                    warn!("Sound file produced no audio, stopping loop");
                    return Ok(());
                }
                produced_this_pass = false;
                self.decoder.rewind()?;
                debug!("Reached end of sound, looping");
                continue;
            };

            produced_this_pass |= !samples.is_empty();
            let converted = self.converter.process(&samples)?;

            for &sample in &converted {
                loop {
                    if self.producer.is_abandoned() {
                        return Ok(());
                    }
                    match self.producer.push(sample) {
                        Ok(()) => break,
                        Err(Full(_)) => sleep(PRODUCER_SLEEP_DURATION),
                    }
                }
            }
        }
    }
}
