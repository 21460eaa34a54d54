//! Ambient sound playback engine.
//!
//! This module provides the `AudioEngine`, which owns the audio thread that
//! builds cpal streams, the decoder thread that loops the current sound file,
//! and the shared pause/volume controls read by the stream callback.

use std::{
    mem::drop,
    path::{Path, PathBuf},
    sync::Arc,
    thread::{Builder, JoinHandle},
};

use {
    async_channel::{Receiver, Sender, bounded, unbounded},
    cpal::Stream,
    parking_lot::RwLock,
    rtrb::RingBuffer,
    tracing::{debug, error, info},
};

use crate::{
    audio::{
        decoder::{AudioDecoder, AudioProducer, DecoderError},
        output::{AudioOutput, OutputConfig, OutputControls, ring_buffer_capacity},
        player::SoundPlayer,
        resampler::FrameConverter,
    },
    error::AudioError,
};

/// Initial output gain, matching the view-model's initial volume.
const DEFAULT_VOLUME: f32 = 0.5;

/// Current playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No sound is loaded.
    Stopped,
    /// A sound is looping.
    Playing,
    /// A sound is loaded but silent.
    Paused,
}

/// Internal control messages for the audio thread.
enum ControlMessage {
    /// Replace the current sound with the file at `path` and start it.
    Load {
        path: PathBuf,
        reply: Sender<Result<(), AudioError>>,
    },
    /// Stop playback and exit the audio thread.
    Shutdown,
}

/// Handle to a running audio stream.
struct StreamHandle {
    /// The CPAL audio stream. Dropping it releases the device.
    stream: Stream,
    /// Join handle for the decoder thread.
    decoder_handle: JoinHandle<Result<(), DecoderError>>,
}

/// Looping ambient sound player backed by cpal.
///
/// cpal streams are not `Send`, so every stream lives on a dedicated audio
/// thread driven through a control channel. Pause and volume only touch
/// atomics shared with the stream callback and take effect immediately.
pub struct AudioEngine {
    /// Current playback state.
    state: Arc<RwLock<PlaybackState>>,
    /// Pause flag and gain shared with the stream callback.
    controls: OutputControls,
    /// Sender for audio thread control messages.
    control_tx: Sender<ControlMessage>,
    /// Audio thread handle, `None` once shut down.
    audio_thread: Option<JoinHandle<()>>,
}

impl AudioEngine {
    /// Creates a new audio engine and starts its audio thread.
    ///
    /// No device is opened until the first sound is played.
    ///
    /// # Errors
    ///
    /// Returns `AudioError::InvalidOperation` if the audio thread cannot be spawned.
    pub fn new(output_config: OutputConfig) -> Result<Self, AudioError> {
        let (control_tx, control_rx) = unbounded();
        let state = Arc::new(RwLock::new(PlaybackState::Stopped));
        let controls = OutputControls::new(DEFAULT_VOLUME);

        let audio_thread = {
            let state = Arc::clone(&state);
            let controls = controls.clone();
            Builder::new()
                .name("backtune-audio".to_string())
                .spawn(move || control_loop(&control_rx, &state, &controls, &output_config))
                .map_err(|e| AudioError::InvalidOperation {
                    reason: format!("Failed to spawn audio thread: {e}"),
                })?
        };

        Ok(AudioEngine {
            state,
            controls,
            control_tx,
            audio_thread: Some(audio_thread),
        })
    }

    /// Stops any current sound and starts looping the file at `path`.
    ///
    /// Blocks until the audio thread has opened the file and the device.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` if the file cannot be decoded, the device cannot be
    /// opened, or the engine has been shut down.
    pub fn play_path<P: AsRef<Path>>(&self, path: P) -> Result<(), AudioError> {
        let (reply, reply_rx) = bounded(1);
        self.control_tx
            .send_blocking(ControlMessage::Load {
                path: path.as_ref().to_path_buf(),
                reply,
            })
            .map_err(|_| AudioError::Released)?;

        reply_rx.recv_blocking().map_err(|_| AudioError::Released)?
    }

    /// Silences the current sound, keeping its position.
    pub fn pause(&self) {
        let mut state = self.state.write();
        if *state == PlaybackState::Playing {
            self.controls.set_paused(true);
            *state = PlaybackState::Paused;
            debug!("Playback paused");
        }
    }

    /// Resumes a paused sound. Does nothing when nothing is loaded.
    pub fn resume(&self) {
        let mut state = self.state.write();
        if *state == PlaybackState::Paused {
            self.controls.set_paused(false);
            *state = PlaybackState::Playing;
            debug!("Playback resumed");
        }
    }

    /// Sets the output gain; values outside [0, 1] are clamped.
    pub fn set_volume(&self, volume: f32) {
        self.controls.set_volume(volume);
        debug!("Volume updated: {}", self.controls.volume());
    }

    /// Gets the output gain.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.controls.volume()
    }

    /// Gets the current playback state.
    #[must_use]
    pub fn current_playback_state(&self) -> PlaybackState {
        *self.state.read()
    }

    /// Shuts down the audio thread, releasing any open stream.
    ///
    /// Safe to call more than once.
    pub fn shutdown(&mut self) {
        let Some(handle) = self.audio_thread.take() else {
            return;
        };

        debug!("Shutting down audio engine");
        let _ = self.control_tx.send_blocking(ControlMessage::Shutdown);
        self.control_tx.close();

        if handle.join().is_err() {
            error!("Audio thread panicked");
        }
        *self.state.write() = PlaybackState::Stopped;
        info!("Audio engine released");
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl SoundPlayer for AudioEngine {
    fn play_file(&mut self, path: &Path) -> Result<(), AudioError> {
        self.play_path(path)
    }

    fn pause(&mut self) {
        AudioEngine::pause(self);
    }

    fn resume(&mut self) {
        AudioEngine::resume(self);
    }

    fn is_playing(&self) -> bool {
        self.current_playback_state() == PlaybackState::Playing
    }

    fn set_volume(&mut self, volume: f32) {
        AudioEngine::set_volume(self, volume);
    }

    fn release(&mut self) {
        self.shutdown();
    }
}

/// Audio thread body: owns the stream and processes control messages.
fn control_loop(
    control_rx: &Receiver<ControlMessage>,
    state: &RwLock<PlaybackState>,
    controls: &OutputControls,
    output_config: &OutputConfig,
) {
    let mut current: Option<StreamHandle> = None;

    while let Ok(message) = control_rx.recv_blocking() {
        match message {
            ControlMessage::Load { path, reply } => {
                stop_stream(current.take());
                let result = match start_stream(&path, controls, output_config) {
                    Ok(handle) => {
                        current = Some(handle);
                        controls.set_paused(false);
                        *state.write() = PlaybackState::Playing;
                        info!("Started playing: {:?}", path);
                        Ok(())
                    }
                    Err(e) => {
                        *state.write() = PlaybackState::Stopped;
                        Err(e)
                    }
                };
                let _ = reply.send_blocking(result);
            }
            ControlMessage::Shutdown => break,
        }
    }

    stop_stream(current.take());
    debug!("Audio thread exiting");
}

/// Opens the file and the device, then starts the decoder thread and stream.
fn start_stream(
    path: &Path,
    controls: &OutputControls,
    output_config: &OutputConfig,
) -> Result<StreamHandle, AudioError> {
    // Decoder first so a missing or broken file never touches the device
    let decoder = AudioDecoder::new(path)?;
    let output = AudioOutput::new(output_config.clone())?;
    let (stream_config, sample_format, device_format) = output.stream_config()?;

    debug!(
        "Opening {:?} ({:?}) on {} ({:?})",
        path,
        decoder.format,
        output.get_current_device_name(),
        device_format
    );

    let converter = FrameConverter::new(decoder.format, device_format)
        .map_err(DecoderError::from)?;
    let capacity = ring_buffer_capacity(device_format, output_config.buffer_duration_ms);
    let (producer, consumer) = RingBuffer::<f32>::new(capacity);

    let producer = AudioProducer::new(decoder, producer, converter);
    let decoder_handle = Builder::new()
        .name("backtune-decoder".to_string())
        .spawn(move || producer.run())
        .map_err(|e| AudioError::InvalidOperation {
            reason: format!("Failed to spawn decoder thread: {e}"),
        })?;

    let stream = output.start_stream(&stream_config, sample_format, consumer, controls.clone())?;

    Ok(StreamHandle {
        stream,
        decoder_handle,
    })
}

/// Stops a running stream and waits for its decoder thread.
fn stop_stream(handle: Option<StreamHandle>) {
    let Some(handle) = handle else {
        return;
    };

    debug!("Stopping audio stream");
    // Dropping the stream drops the ring buffer consumer, which ends the decoder loop
    drop(handle.stream);

    match handle.decoder_handle.join() {
        Ok(Ok(())) => debug!("Decoder thread stopped successfully"),
        Ok(Err(e)) => error!("Decoder thread stopped with error: {e}"),
        Err(e) => error!("Decoder thread panicked: {:?}", e),
    }
}
