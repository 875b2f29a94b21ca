//! Rodio-backed audio primitive
//!
//! This crate runs playback in a dedicated audio thread, processing
//! commands from the UI thread and reporting back through
//! [`castwave_player::PrimitiveEvent`]s. The audio thread may block on
//! staging a remote file, but that never stalls the UI thread.

mod fetch;
mod primitive;
mod thread;

pub use fetch::MediaSource;
pub use primitive::RodioPrimitive;

use castwave_core::AppError;
use thiserror::Error;

/// Result type for media operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors from the audio backend
#[derive(Error, Debug)]
pub enum MediaError {
    /// No usable audio output device
    #[error("Audio device unavailable: {0}")]
    Device(String),

    /// Media could not be fetched or staged
    #[error("Failed to fetch media: {0}")]
    Fetch(String),

    /// Media could not be decoded
    #[error("Failed to decode media: {0}")]
    Decode(String),
}

impl From<MediaError> for AppError {
    fn from(err: MediaError) -> Self {
        match &err {
            MediaError::Fetch(reason) => AppError::MediaUnavailable {
                url: String::new(),
                reason: reason.clone(),
            },
            MediaError::Device(_) | MediaError::Decode(_) => AppError::PlaybackError {
                message: err.to_string(),
                source: None,
            },
        }
    }
}
