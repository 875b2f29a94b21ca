//! Episode domain model

use crate::types::Duration;
use serde::{Deserialize, Serialize};

/// A single playable podcast entry with display metadata
///
/// Episodes are created by the catalog once per feed refresh and are
/// immutable for the lifetime of that feed. The display fields are derived
/// from their sources at construction time: `duration_display` from
/// `duration`, `published_at_display` from the raw publish timestamp the
/// catalog parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Opaque unique identifier assigned by the content API
    pub id: String,
    /// Episode title
    pub title: String,
    /// Participants, as a single display string
    pub members: String,
    /// Episode description
    pub description: String,
    /// Cover image URL
    pub thumbnail: String,
    /// Episode length, source of truth for all duration displays
    pub duration: Duration,
    /// `duration` formatted as HH:MM:SS
    pub duration_display: String,
    /// Publish date formatted for display in the configured locale
    pub published_at_display: String,
    /// Playable media URL
    pub file_url: String,
}

impl Episode {
    /// Creates an episode, deriving `duration_display` from `duration`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        members: impl Into<String>,
        description: impl Into<String>,
        thumbnail: impl Into<String>,
        duration: Duration,
        published_at_display: impl Into<String>,
        file_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            members: members.into(),
            description: description.into(),
            thumbnail: thumbnail.into(),
            duration,
            duration_display: duration.as_hms(),
            published_at_display: published_at_display.into(),
            file_url: file_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Episode {
        Episode::new(
            "ep-1",
            "Faladev #30",
            "Diego and Rodrigo",
            "An episode about open source",
            "https://example.com/thumb.jpg",
            Duration::from_seconds(3661),
            "8 Jan 21",
            "https://example.com/ep1.mp3",
        )
    }

    #[test]
    fn test_episode_new() {
        let episode = sample();
        assert_eq!(episode.id, "ep-1");
        assert_eq!(episode.duration.as_seconds(), 3661);
    }

    #[test]
    fn test_duration_display_derived_from_duration() {
        let episode = sample();
        assert_eq!(episode.duration_display, "01:01:01");
        assert_eq!(episode.duration_display, episode.duration.as_hms());
    }

    #[test]
    fn test_episode_clone_preserves_fields() {
        let episode = sample();
        let copy = episode.clone();
        assert_eq!(episode, copy);
    }
}
