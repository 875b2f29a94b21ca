//! Error types for Castwave
//!
//! Errors are classified into three severity tiers:
//! - **Recoverable**: transient, safe to retry (network glitches)
//! - **Degraded**: a feature is unavailable but the app continues (feed
//!   refresh failed while a cached feed keeps serving)
//! - **Fatal**: requires user intervention (corrupted configuration)

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Error can be automatically recovered from
    Recoverable,
    /// Feature degraded but app can continue
    Degraded,
    /// Critical error requiring user action
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type for Castwave
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Network Errors =====
    /// Network request failed
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid URL provided
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    // ===== Feed/Catalog Errors =====
    /// Content API unavailable
    #[error("Episode feed unavailable: {reason}")]
    FeedUnavailable { reason: String },

    /// Content API returned a response we cannot use
    #[error("Invalid feed response: {details}")]
    FeedParse { details: String },

    /// Episode not present in the current feed
    #[error("Episode not found: {identifier}")]
    EpisodeNotFound { identifier: String },

    // ===== Playback Errors =====
    /// Episode media could not be fetched or opened
    #[error("Media unavailable: {url} - {reason}")]
    MediaUnavailable { url: String, reason: String },

    /// Audio playback failed
    #[error("Playback error: {message}")]
    PlaybackError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid playback position (seeking)
    #[error("Invalid playback position: {position}s (episode duration: {duration}s)")]
    InvalidPosition { position: u64, duration: u64 },

    // ===== Configuration Errors =====
    /// Invalid configuration value
    #[error("Invalid configuration: {setting} = '{value}' ({reason})")]
    InvalidConfiguration {
        setting: String,
        value: String,
        reason: String,
    },

    /// Configuration file corrupted
    #[error("Configuration corrupted: {path}")]
    ConfigurationCorrupted { path: PathBuf },

    // ===== Generic Errors =====
    /// General I/O error
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Generic internal error
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NetworkError { .. } => ErrorSeverity::Recoverable,

            Self::FeedUnavailable { .. }
            | Self::FeedParse { .. }
            | Self::EpisodeNotFound { .. }
            | Self::MediaUnavailable { .. }
            | Self::PlaybackError { .. }
            | Self::InvalidPosition { .. }
            | Self::InvalidUrl { .. } => ErrorSeverity::Degraded,

            Self::ConfigurationCorrupted { .. } => ErrorSeverity::Fatal,

            _ => ErrorSeverity::Degraded,
        }
    }

    /// Returns a user-friendly message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            Self::NetworkError { .. } => {
                "Cannot connect to the internet. Please check your connection.".to_string()
            }
            Self::InvalidUrl { .. } => "The link provided is not valid.".to_string(),

            Self::FeedUnavailable { .. } => {
                "The episode feed is currently unavailable. Showing the last known episodes."
                    .to_string()
            }
            Self::FeedParse { .. } => "Received invalid data from the server.".to_string(),
            Self::EpisodeNotFound { .. } => "The requested episode was not found.".to_string(),

            Self::MediaUnavailable { .. } => {
                "This episode's audio could not be loaded.".to_string()
            }
            Self::PlaybackError { .. } => {
                "Cannot play this episode. It may be in an unsupported format.".to_string()
            }
            Self::InvalidPosition { .. } => {
                "Cannot seek to that position in the episode.".to_string()
            }

            Self::InvalidConfiguration { setting, .. } => {
                format!("Invalid setting: {}. Please check your configuration.", setting)
            }
            Self::ConfigurationCorrupted { .. } => {
                "App settings are corrupted. Resetting to defaults...".to_string()
            }

            Self::IoError { .. } => "A file operation failed. Please try again.".to_string(),
            Self::InternalError { .. } => "An unexpected error occurred.".to_string(),
        }
    }

    /// Returns true if this error should be logged at ERROR level
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }

    /// Returns true if this error can be automatically retried
    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Recoverable
    }

    /// Helper to create a network error from any error type
    pub fn network<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a playback error from any error type
    pub fn playback<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::PlaybackError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}
