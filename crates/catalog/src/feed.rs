//! Home feed partitioning

use castwave_core::Episode;
use serde::{Deserialize, Serialize};

/// The episode feed as the home view consumes it
///
/// The two newest episodes are featured; the remainder form the full list.
/// Concatenating `latest_episodes` and `all_episodes` restores the API
/// order exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeFeed {
    pub latest_episodes: Vec<Episode>,
    pub all_episodes: Vec<Episode>,
}

impl HomeFeed {
    /// How many episodes are featured as "latest"
    pub const FEATURED_COUNT: usize = 2;

    /// Partitions an ordered episode list into featured and remaining
    pub fn partition(mut episodes: Vec<Episode>) -> Self {
        let split = episodes.len().min(Self::FEATURED_COUNT);
        let all_episodes = episodes.split_off(split);

        Self {
            latest_episodes: episodes,
            all_episodes,
        }
    }

    /// Total number of episodes in the feed
    pub fn len(&self) -> usize {
        self.latest_episodes.len() + self.all_episodes.len()
    }

    /// Returns true when the feed holds no episodes
    pub fn is_empty(&self) -> bool {
        self.latest_episodes.is_empty() && self.all_episodes.is_empty()
    }

    /// Episode at flat position `index`, counting featured episodes first
    pub fn get(&self, index: usize) -> Option<&Episode> {
        if index < self.latest_episodes.len() {
            self.latest_episodes.get(index)
        } else {
            self.all_episodes.get(index - self.latest_episodes.len())
        }
    }

    /// All episodes in original API order
    pub fn episodes_in_order(&self) -> Vec<Episode> {
        self.latest_episodes
            .iter()
            .chain(self.all_episodes.iter())
            .cloned()
            .collect()
    }
}
