//! Pull-based feed refresh
//!
//! The content API is read on a schedule, not per render: the cache keeps
//! the last good feed and only re-fetches once the configured interval has
//! elapsed. A failed refresh keeps serving the previous feed.

use crate::{CatalogError, CatalogResult, EpisodeSource, HomeFeed};
use castwave_core::Episode;
use std::time::{Duration as StdDuration, Instant};

/// Cached home feed with time-based invalidation
pub struct FeedCache {
    feed: Option<HomeFeed>,
    fetched_at: Option<Instant>,
    refresh_interval: StdDuration,
}

impl FeedCache {
    /// Creates an empty cache that goes stale after `refresh_interval`
    pub fn new(refresh_interval: StdDuration) -> Self {
        Self {
            feed: None,
            fetched_at: None,
            refresh_interval,
        }
    }

    /// Returns the cached feed, if any fetch has succeeded yet
    pub fn feed(&self) -> Option<&HomeFeed> {
        self.feed.as_ref()
    }

    /// Returns true when the cache holds nothing or the interval elapsed
    pub fn is_stale(&self) -> bool {
        match self.fetched_at {
            Some(at) => at.elapsed() >= self.refresh_interval,
            None => true,
        }
    }

    /// Re-fetches when stale, otherwise serves the cached feed
    ///
    /// A refresh failure is fatal only on a cold cache; with a previous
    /// feed available it is logged and the stale feed keeps serving.
    pub fn refresh_if_stale(&mut self, source: &dyn EpisodeSource) -> CatalogResult<&HomeFeed> {
        if self.is_stale() {
            match source.fetch_feed() {
                Ok(episodes) => {
                    log::info!("Feed refreshed: {} episodes", episodes.len());
                    return Ok(self.store(episodes));
                }
                Err(err) if self.feed.is_some() => {
                    log::warn!("Feed refresh failed, serving cached feed: {}", err);
                }
                Err(err) => return Err(err),
            }
        }

        match self.feed.as_ref() {
            Some(feed) => Ok(feed),
            None => Err(CatalogError::Unavailable("no feed cached".to_string())),
        }
    }

    /// Unconditionally re-fetches, replacing the cache on success
    pub fn force_refresh(&mut self, source: &dyn EpisodeSource) -> CatalogResult<&HomeFeed> {
        let episodes = source.fetch_feed()?;
        Ok(self.store(episodes))
    }

    fn store(&mut self, episodes: Vec<Episode>) -> &HomeFeed {
        self.fetched_at = Some(Instant::now());
        self.feed.insert(HomeFeed::partition(episodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogError, SourceMetadata};
    use castwave_core::{Duration, Episode};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        fetches: AtomicUsize,
        fail: bool,
    }

    impl StubSource {
        fn new(fail: bool) -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail,
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl EpisodeSource for StubSource {
        fn fetch_feed(&self) -> CatalogResult<Vec<Episode>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CatalogError::NetworkError("stub failure".to_string()));
            }
            Ok(vec![Episode::new(
                "1",
                "Episode 1",
                "Members",
                "Description",
                "thumb",
                Duration::from_seconds(60),
                "1 Jan 21",
                "file",
            )])
        }

        fn metadata(&self) -> SourceMetadata {
            SourceMetadata {
                name: "Stub".to_string(),
                base_url: String::new(),
            }
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_cold_cache_is_stale() {
        let cache = FeedCache::new(StdDuration::from_secs(3600));
        assert!(cache.is_stale());
        assert!(cache.feed().is_none());
    }

    #[test]
    fn test_refresh_populates_cache() {
        let source = StubSource::new(false);
        let mut cache = FeedCache::new(StdDuration::from_secs(3600));

        let feed = cache.refresh_if_stale(&source).expect("refresh succeeds");
        assert_eq!(feed.len(), 1);
        assert!(!cache.is_stale());
    }

    #[test]
    fn test_fresh_cache_skips_fetch() {
        let source = StubSource::new(false);
        let mut cache = FeedCache::new(StdDuration::from_secs(3600));

        cache.refresh_if_stale(&source).expect("first refresh");
        cache.refresh_if_stale(&source).expect("served from cache");
        assert_eq!(source.fetch_count(), 1);
    }

    #[test]
    fn test_zero_interval_always_refetches() {
        let source = StubSource::new(false);
        let mut cache = FeedCache::new(StdDuration::ZERO);

        cache.refresh_if_stale(&source).expect("refresh");
        cache.refresh_if_stale(&source).expect("refresh again");
        assert_eq!(source.fetch_count(), 2);
    }

    #[test]
    fn test_cold_cache_failure_is_fatal() {
        let source = StubSource::new(true);
        let mut cache = FeedCache::new(StdDuration::from_secs(3600));

        assert!(cache.refresh_if_stale(&source).is_err());
    }

    #[test]
    fn test_stale_cache_survives_failed_refresh() {
        let good = StubSource::new(false);
        let bad = StubSource::new(true);
        let mut cache = FeedCache::new(StdDuration::ZERO);

        cache.refresh_if_stale(&good).expect("populate cache");
        let feed = cache
            .refresh_if_stale(&bad)
            .expect("stale feed keeps serving");
        assert_eq!(feed.len(), 1);
        assert_eq!(bad.fetch_count(), 1);
    }

    #[test]
    fn test_force_refresh_bypasses_staleness() {
        let source = StubSource::new(false);
        let mut cache = FeedCache::new(StdDuration::from_secs(3600));

        cache.refresh_if_stale(&source).expect("populate");
        cache.force_refresh(&source).expect("forced");
        assert_eq!(source.fetch_count(), 2);
    }
}
