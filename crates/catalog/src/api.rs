use crate::{CatalogError, CatalogResult};
use castwave_core::{Duration, Episode};
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration as StdDuration;

/// Episode source trait
pub trait EpisodeSource: Send + Sync {
    /// Fetch the newest episodes, most recent first
    fn fetch_feed(&self) -> CatalogResult<Vec<Episode>>;

    /// Get metadata about the source
    fn metadata(&self) -> SourceMetadata;

    /// Check if the source is available
    fn is_available(&self) -> bool;
}

/// Source metadata
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    pub name: String,
    pub base_url: String,
}

/// Podcast content API source
///
/// Performs the single paginated read the app needs:
/// `GET {base_url}/episodes?_limit=N&_sort=published_at&_order=desc`.
pub struct PodcastApiSource {
    base_url: String,
    page_limit: usize,
    locale: Locale,
    client: Option<reqwest::blocking::Client>,
}

impl PodcastApiSource {
    pub const DEFAULT_PAGE_LIMIT: usize = 12;

    /// Create a new source with HTTP client
    pub fn new(base_url: impl Into<String>, page_limit: usize, locale: Locale) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(StdDuration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION"),
            ))
            .build()
            .ok();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            page_limit,
            locale,
            client,
        }
    }

    /// Fetch up to `page_limit` raw episode records, newest first
    pub fn fetch_episodes(&self) -> CatalogResult<Vec<RawEpisode>> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| CatalogError::Unavailable("HTTP client not available".to_string()))?;

        let url = format!(
            "{}/episodes?_limit={}&_sort=published_at&_order=desc",
            self.base_url, self.page_limit
        );

        let response = client
            .get(&url)
            .send()
            .map_err(|e| CatalogError::NetworkError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CatalogError::HttpStatus(response.status().as_u16()));
        }

        response
            .json()
            .map_err(|e| CatalogError::ParseError(format!("JSON parse error: {}", e)))
    }

    /// Check if the content API answers at all
    pub fn check_availability(&self) -> bool {
        let client = match &self.client {
            Some(c) => c,
            None => return false,
        };

        let url = format!("{}/episodes?_limit=1", self.base_url);

        client
            .get(&url)
            .timeout(StdDuration::from_secs(5))
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Map a raw API record into a display-ready episode
    pub fn map_episode(&self, raw: RawEpisode) -> Episode {
        let published_at_display = match parse_published_at(&raw.published_at) {
            Some(date) => date
                .format_localized("%-d %b %y", self.locale)
                .to_string(),
            None => {
                // Keep the raw string rather than dropping the episode
                log::warn!(
                    "Unparseable publish date '{}' for episode {}",
                    raw.published_at,
                    raw.id
                );
                raw.published_at.clone()
            }
        };

        Episode::new(
            raw.id,
            raw.title,
            raw.members,
            raw.description,
            raw.thumbnail,
            Duration::from_seconds(raw.file.duration),
            published_at_display,
            raw.file.url,
        )
    }
}

impl EpisodeSource for PodcastApiSource {
    fn fetch_feed(&self) -> CatalogResult<Vec<Episode>> {
        let raw = self.fetch_episodes()?;
        Ok(raw.into_iter().map(|r| self.map_episode(r)).collect())
    }

    fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Podcast API".to_string(),
            base_url: self.base_url.clone(),
        }
    }

    fn is_available(&self) -> bool {
        self.client.is_some()
    }
}

/// Raw episode record as returned by the content API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEpisode {
    /// Unique episode ID
    pub id: String,

    /// Episode title
    pub title: String,

    /// Cover image URL
    #[serde(default)]
    pub thumbnail: String,

    /// Participants as a single string
    #[serde(default)]
    pub members: String,

    /// Episode description
    #[serde(default)]
    pub description: String,

    /// Publish timestamp, ISO-8601
    pub published_at: String,

    /// Playable file reference
    pub file: RawEpisodeFile,
}

/// File reference nested in a raw episode record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEpisodeFile {
    /// Media URL
    pub url: String,

    /// Length in seconds; the API sometimes string-encodes this
    #[serde(deserialize_with = "deserialize_seconds")]
    pub duration: u64,
}

/// Accepts both numeric and string-encoded second counts
///
/// Fractional seconds are truncated here, before a `Duration` is ever built.
fn deserialize_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SecondsRepr {
        Number(f64),
        Text(String),
    }

    match SecondsRepr::deserialize(deserializer)? {
        SecondsRepr::Number(n) if n >= 0.0 => Ok(n as u64),
        SecondsRepr::Number(n) => Err(serde::de::Error::custom(format!(
            "negative duration: {}",
            n
        ))),
        SecondsRepr::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid duration '{}': {}", s, e)))
            .and_then(|n| {
                if n >= 0.0 {
                    Ok(n as u64)
                } else {
                    Err(serde::de::Error::custom(format!(
                        "negative duration: {}",
                        n
                    )))
                }
            }),
    }
}

/// Parses the publish timestamp formats the content API is known to emit
fn parse_published_at(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Resolves a BCP 47-ish tag ("pt-BR") into a chrono locale
pub fn parse_locale(tag: &str) -> Option<Locale> {
    Locale::try_from(tag.replace('-', "_").as_str()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_source() -> PodcastApiSource {
        PodcastApiSource::new("http://localhost:3333", 12, Locale::en_US)
    }

    fn sample_raw(duration_json: &str) -> RawEpisode {
        let json = format!(
            r#"{{
                "id": "a-importancia-da-contribuicao-em-open-source",
                "title": "Faladev #30",
                "thumbnail": "https://example.com/thumb.jpg",
                "members": "Diego and Rodrigo",
                "description": "An episode about open source",
                "published_at": "2021-01-08 12:00:00",
                "file": {{
                    "url": "https://example.com/ep.mp3",
                    "duration": {}
                }}
            }}"#,
            duration_json
        );
        serde_json::from_str(&json).expect("sample record should deserialize")
    }

    #[test]
    fn test_raw_episode_numeric_duration() {
        let raw = sample_raw("3661");
        assert_eq!(raw.file.duration, 3661);
    }

    #[test]
    fn test_raw_episode_string_duration() {
        let raw = sample_raw("\"3661\"");
        assert_eq!(raw.file.duration, 3661);
    }

    #[test]
    fn test_raw_episode_fractional_duration_truncates() {
        let raw = sample_raw("3661.9");
        assert_eq!(raw.file.duration, 3661);
    }

    #[test]
    fn test_raw_episode_negative_duration_rejected() {
        let json = r#"{
            "id": "x", "title": "t", "published_at": "2021-01-08 12:00:00",
            "file": { "url": "u", "duration": -5 }
        }"#;
        assert!(serde_json::from_str::<RawEpisode>(json).is_err());
    }

    #[test]
    fn test_map_episode_derives_display_fields() {
        let source = sample_source();
        let episode = source.map_episode(sample_raw("3661"));

        assert_eq!(episode.duration.as_seconds(), 3661);
        assert_eq!(episode.duration_display, "01:01:01");
        assert_eq!(episode.published_at_display, "8 Jan 21");
    }

    #[test]
    fn test_map_episode_localized_date() {
        let source = PodcastApiSource::new("http://localhost:3333", 12, Locale::pt_BR);
        let episode = source.map_episode(sample_raw("60"));

        // pt-BR abbreviates January as "jan"
        assert!(episode.published_at_display.contains("jan"));
        assert!(episode.published_at_display.contains("21"));
    }

    #[test]
    fn test_map_episode_keeps_unparseable_date() {
        let source = sample_source();
        let mut raw = sample_raw("60");
        raw.published_at = "sometime last week".to_string();

        let episode = source.map_episode(raw);
        assert_eq!(episode.published_at_display, "sometime last week");
    }

    #[test]
    fn test_parse_published_at_formats() {
        assert!(parse_published_at("2021-01-08T12:00:00Z").is_some());
        assert!(parse_published_at("2021-01-08 12:00:00").is_some());
        assert!(parse_published_at("2021-01-08").is_some());
        assert!(parse_published_at("not a date").is_none());
    }

    #[test]
    fn test_parse_locale() {
        assert!(parse_locale("pt-BR").is_some());
        assert!(parse_locale("en-US").is_some());
        assert!(parse_locale("xx-YY").is_none());
    }

    #[test]
    fn test_source_metadata() {
        let source = sample_source();
        let meta = source.metadata();
        assert_eq!(meta.name, "Podcast API");
        assert!(meta.base_url.contains("localhost"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let source = PodcastApiSource::new("http://localhost:3333/", 12, Locale::en_US);
        assert_eq!(source.metadata().base_url, "http://localhost:3333");
    }

    // Network tests - only run with a content API listening locally
    #[test]
    #[ignore = "Requires a running content API"]
    fn test_real_fetch() {
        let source = sample_source();

        if !source.check_availability() {
            eprintln!("Content API not available, skipping test");
            return;
        }

        let episodes = source.fetch_feed().expect("fetch should succeed");
        assert!(episodes.len() <= PodcastApiSource::DEFAULT_PAGE_LIMIT);
        for episode in episodes {
            println!("  - {} ({})", episode.title, episode.duration_display);
        }
    }
}
