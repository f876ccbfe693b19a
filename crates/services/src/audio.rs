//! Speech output seam. The engine only ever hands text to an `AudioPrompter`;
//! it never waits on playback or looks at the result.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use crate::error::AudioError;

/// Best-effort text-to-speech sink.
pub trait AudioPrompter: Send + Sync {
    /// Attempt to say `text`. Implementations must return promptly.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` when the phrase could not be rendered.
    fn speak(&self, text: &str) -> Result<(), AudioError>;
}

/// Null device: accepts every phrase and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioPrompter for SilentAudio {
    fn speak(&self, _text: &str) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Device that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableAudio;

impl AudioPrompter for UnavailableAudio {
    fn speak(&self, _text: &str) -> Result<(), AudioError> {
        Err(AudioError::Unavailable)
    }
}

/// Emits each phrase as a log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAudio;

impl AudioPrompter for TracingAudio {
    fn speak(&self, text: &str) -> Result<(), AudioError> {
        info!(target: "quiz::audio", phrase = text, "speak");
        Ok(())
    }
}

/// Keeps every phrase it was asked to say, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn spoken(&self) -> Vec<String> {
        self.spoken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl AudioPrompter for RecordingAudio {
    fn speak(&self, text: &str) -> Result<(), AudioError> {
        self.spoken
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
        Ok(())
    }
}

/// Tries `primary` first and falls back to `secondary` when it fails.
#[derive(Debug, Clone, Default)]
pub struct FallbackAudio<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackAudio<P, S> {
    #[must_use]
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: AudioPrompter, S: AudioPrompter> AudioPrompter for FallbackAudio<P, S> {
    fn speak(&self, text: &str) -> Result<(), AudioError> {
        match self.primary.speak(text) {
            Ok(()) => Ok(()),
            Err(err) => {
                tracing::debug!(error = %err, "primary speech failed, using fallback");
                self.secondary.speak(text)
            }
        }
    }
}
