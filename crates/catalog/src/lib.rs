mod api;
mod feed;
mod refresh;

pub use api::{parse_locale, EpisodeSource, PodcastApiSource, RawEpisode, SourceMetadata};
pub use chrono::Locale;
pub use feed::HomeFeed;
pub use refresh::FeedCache;

use castwave_core::AppError;
use std::fmt;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from the episode catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Network error
    NetworkError(String),
    /// Unexpected HTTP status
    HttpStatus(u16),
    /// Parse error
    ParseError(String),
    /// Source unavailable
    Unavailable(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::NetworkError(e) => write!(f, "Network error: {}", e),
            CatalogError::HttpStatus(code) => write!(f, "HTTP {}", code),
            CatalogError::ParseError(e) => write!(f, "Parse error: {}", e),
            CatalogError::Unavailable(e) => write!(f, "Source unavailable: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NetworkError(message) => AppError::NetworkError {
                message,
                source: None,
            },
            CatalogError::HttpStatus(code) => AppError::FeedUnavailable {
                reason: format!("HTTP {}", code),
            },
            CatalogError::ParseError(details) => AppError::FeedParse { details },
            CatalogError::Unavailable(reason) => AppError::FeedUnavailable { reason },
        }
    }
}
