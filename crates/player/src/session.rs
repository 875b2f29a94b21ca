//! Shared player session state
//!
//! The session is the single writer-of-record for the queue and playback
//! flags. Nothing here touches audio: controls flip flags, and playback
//! follows from the change notifications the session hands to its
//! subscribers on the mutating thread.

use castwave_core::Episode;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A change notification emitted after a session mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// `is_playing` changed value
    PlayingChanged(bool),
    /// A different episode was selected
    TrackChanged { index: usize },
    /// `is_looping` changed value
    LoopingChanged(bool),
    /// `is_shuffling` changed value
    ShufflingChanged(bool),
    /// Queue and selection were cleared
    QueueCleared,
}

type Observer = Box<dyn FnMut(&SessionChange) + Send>;

/// Shared, long-lived holder of the current queue and playback flags
pub struct PlayerSession {
    queue: Vec<Episode>,
    current_index: Option<usize>,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    /// Which queue positions have been visited; meaningful under shuffle
    played: Vec<bool>,
    /// Visit order; the last entry is always the current position
    history: Vec<usize>,
    rng: StdRng,
    observers: Vec<Observer>,
}

impl PlayerSession {
    /// Creates an empty session
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a session with a seeded RNG for deterministic shuffle
    pub fn with_rng_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            queue: Vec::new(),
            current_index: None,
            is_playing: false,
            is_looping: false,
            is_shuffling: false,
            played: Vec::new(),
            history: Vec::new(),
            rng,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for change notifications
    ///
    /// Observers run synchronously on the thread performing the mutation,
    /// in registration order.
    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&SessionChange) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn notify(&mut self, change: SessionChange) {
        for observer in &mut self.observers {
            observer(&change);
        }
    }

    // ===== Accessors =====

    pub fn queue(&self) -> &[Episode] {
        &self.queue
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_index.and_then(|i| self.queue.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    /// True when another episode can follow the current one
    ///
    /// Sequentially that is a simple boundary check; under shuffle it means
    /// an unvisited queue position remains.
    pub fn has_next(&self) -> bool {
        match self.current_index {
            None => false,
            Some(index) => {
                if self.is_shuffling {
                    self.played.iter().any(|p| !p)
                } else {
                    index + 1 < self.queue.len()
                }
            }
        }
    }

    /// True when a previously played episode can be returned to
    pub fn has_previous(&self) -> bool {
        match self.current_index {
            None => false,
            Some(index) => {
                if self.is_shuffling {
                    self.history.len() > 1
                } else {
                    index > 0
                }
            }
        }
    }

    // ===== Operations =====

    /// Loads a queue and selects the episode at `index`, starting playback
    pub fn play(&mut self, episodes: Vec<Episode>, index: usize) {
        if index >= episodes.len() {
            log::warn!(
                "Ignoring play request: index {} out of bounds for queue of {}",
                index,
                episodes.len()
            );
            return;
        }

        self.played = vec![false; episodes.len()];
        self.queue = episodes;
        self.history.clear();
        self.select(index);

        if !self.is_playing {
            self.is_playing = true;
            self.notify(SessionChange::PlayingChanged(true));
        }
    }

    /// Loads a single episode as the whole queue
    pub fn play_single(&mut self, episode: Episode) {
        self.play(vec![episode], 0);
    }

    /// Flips `is_playing`; inert while no episode is selected
    pub fn toggle_play(&mut self) {
        if self.current_index.is_none() {
            return;
        }
        self.is_playing = !self.is_playing;
        let playing = self.is_playing;
        self.notify(SessionChange::PlayingChanged(playing));
    }

    /// Reconciles `is_playing` with what the audio primitive reports
    ///
    /// No notification fires when the value is already in agreement, which
    /// keeps primitive-reported state from echoing back into the primitive.
    pub fn set_playing_state(&mut self, playing: bool) {
        if self.current_index.is_none() || self.is_playing == playing {
            return;
        }
        self.is_playing = playing;
        self.notify(SessionChange::PlayingChanged(playing));
    }

    /// Flips `is_looping`; inert while no episode is selected
    pub fn toggle_loop(&mut self) {
        if self.current_index.is_none() {
            return;
        }
        self.is_looping = !self.is_looping;
        let looping = self.is_looping;
        self.notify(SessionChange::LoopingChanged(looping));
    }

    /// Flips `is_shuffling`; inert while the queue holds one episode or none
    ///
    /// Enabling shuffle restarts the visit tracking: only the current
    /// position counts as played.
    pub fn toggle_shuffle(&mut self) {
        if self.queue.len() <= 1 {
            return;
        }
        self.is_shuffling = !self.is_shuffling;
        if self.is_shuffling {
            self.played = vec![false; self.queue.len()];
            self.history.clear();
            if let Some(index) = self.current_index {
                self.played[index] = true;
                self.history.push(index);
            }
        }
        let shuffling = self.is_shuffling;
        self.notify(SessionChange::ShufflingChanged(shuffling));
    }

    /// Advances to the next episode; inert when `has_next` is false
    pub fn play_next(&mut self) {
        if !self.has_next() {
            return;
        }

        let next = if self.is_shuffling {
            let unplayed: Vec<usize> = self
                .played
                .iter()
                .enumerate()
                .filter(|(_, p)| !**p)
                .map(|(i, _)| i)
                .collect();
            unplayed[self.rng.gen_range(0..unplayed.len())]
        } else {
            // has_next guaranteed Some above
            self.current_index.unwrap_or(0) + 1
        };

        self.select(next);
    }

    /// Steps back to the previous episode; inert when `has_previous` is false
    pub fn play_previous(&mut self) {
        if !self.has_previous() {
            return;
        }

        if self.is_shuffling {
            // Walk the visit history backwards
            self.history.pop();
            if let Some(&previous) = self.history.last() {
                self.current_index = Some(previous);
                self.notify(SessionChange::TrackChanged { index: previous });
            }
        } else if let Some(index) = self.current_index {
            self.select(index - 1);
        }
    }

    /// Clears the queue, selection, and playback flag
    ///
    /// This is the terminal transition after the last episode ends.
    pub fn clear_player_state(&mut self) {
        self.queue.clear();
        self.current_index = None;
        self.played.clear();
        self.history.clear();

        if self.is_playing {
            self.is_playing = false;
            self.notify(SessionChange::PlayingChanged(false));
        }
        self.notify(SessionChange::QueueCleared);
    }

    /// Marks `index` visited, selects it, and notifies
    fn select(&mut self, index: usize) {
        if let Some(slot) = self.played.get_mut(index) {
            *slot = true;
        }
        self.history.push(index);
        self.current_index = Some(index);
        self.notify(SessionChange::TrackChanged { index });
    }
}

impl Default for PlayerSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castwave_core::Duration;
    use std::sync::{Arc, Mutex};

    fn episode(id: &str, seconds: u64) -> Episode {
        Episode::new(
            id,
            format!("Episode {}", id),
            "Members",
            "Description",
            "thumb",
            Duration::from_seconds(seconds),
            "1 Jan 21",
            format!("https://example.com/{}.mp3", id),
        )
    }

    fn two_episode_session() -> PlayerSession {
        let mut session = PlayerSession::with_rng_seed(7);
        session.play(vec![episode("a", 100), episode("b", 200)], 0);
        session
    }

    fn recorded_changes(session: &mut PlayerSession) -> Arc<Mutex<Vec<SessionChange>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        session.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
        log
    }

    #[test]
    fn test_empty_session_is_inert() {
        let mut session = PlayerSession::new();
        assert!(session.current_episode().is_none());
        assert!(!session.has_next());
        assert!(!session.has_previous());

        session.toggle_play();
        session.toggle_loop();
        session.play_next();
        session.play_previous();
        assert!(!session.is_playing());
        assert!(!session.is_looping());
    }

    #[test]
    fn test_play_selects_and_starts() {
        let session = two_episode_session();
        assert_eq!(session.current_index(), Some(0));
        assert_eq!(session.current_episode().unwrap().id, "a");
        assert!(session.is_playing());
    }

    #[test]
    fn test_play_out_of_bounds_ignored() {
        let mut session = PlayerSession::new();
        session.play(vec![episode("a", 100)], 5);
        assert!(session.current_episode().is_none());
    }

    #[test]
    fn test_toggle_play_twice_restores_state() {
        let mut session = two_episode_session();
        let before = session.is_playing();
        session.toggle_play();
        session.toggle_play();
        assert_eq!(session.is_playing(), before);
    }

    #[test]
    fn test_set_playing_state_notifies_only_on_change() {
        let mut session = two_episode_session();
        let log = recorded_changes(&mut session);

        session.set_playing_state(true); // already playing
        assert!(log.lock().unwrap().is_empty());

        session.set_playing_state(false);
        assert_eq!(
            log.lock().unwrap().as_slice(),
            &[SessionChange::PlayingChanged(false)]
        );
    }

    #[test]
    fn test_sequential_next_and_previous() {
        let mut session = two_episode_session();
        assert!(session.has_next());
        assert!(!session.has_previous());

        session.play_next();
        assert_eq!(session.current_index(), Some(1));
        assert!(!session.has_next());
        assert!(session.has_previous());

        session.play_previous();
        assert_eq!(session.current_index(), Some(0));
    }

    #[test]
    fn test_next_at_end_is_inert() {
        let mut session = two_episode_session();
        session.play_next();
        session.play_next();
        assert_eq!(session.current_index(), Some(1));
    }

    #[test]
    fn test_toggle_shuffle_requires_multiple_episodes() {
        let mut session = PlayerSession::new();
        session.play_single(episode("only", 60));
        session.toggle_shuffle();
        assert!(!session.is_shuffling());
    }

    #[test]
    fn test_shuffle_visits_every_episode_once() {
        let mut session = PlayerSession::with_rng_seed(42);
        let episodes: Vec<Episode> =
            (0..5).map(|i| episode(&i.to_string(), 60)).collect();
        session.play(episodes, 0);
        session.toggle_shuffle();

        let mut visited = vec![session.current_index().unwrap()];
        while session.has_next() {
            session.play_next();
            visited.push(session.current_index().unwrap());
        }

        visited.sort_unstable();
        assert_eq!(visited, vec![0, 1, 2, 3, 4]);
        assert!(!session.has_next());
    }

    #[test]
    fn test_shuffle_previous_walks_history() {
        let mut session = PlayerSession::with_rng_seed(11);
        let episodes: Vec<Episode> =
            (0..4).map(|i| episode(&i.to_string(), 60)).collect();
        session.play(episodes, 0);
        session.toggle_shuffle();

        session.play_next();
        let second = session.current_index().unwrap();
        session.play_next();

        session.play_previous();
        assert_eq!(session.current_index(), Some(second));
        session.play_previous();
        assert_eq!(session.current_index(), Some(0));
        assert!(!session.has_previous());
    }

    #[test]
    fn test_clear_player_state() {
        let mut session = two_episode_session();
        session.clear_player_state();

        assert!(session.queue().is_empty());
        assert_eq!(session.current_index(), None);
        assert!(!session.is_playing());
        assert!(!session.has_next());
        assert!(!session.has_previous());
    }

    #[test]
    fn test_clear_notifies_stop_then_cleared() {
        let mut session = two_episode_session();
        let log = recorded_changes(&mut session);

        session.clear_player_state();
        assert_eq!(
            log.lock().unwrap().as_slice(),
            &[
                SessionChange::PlayingChanged(false),
                SessionChange::QueueCleared
            ]
        );
    }

    #[test]
    fn test_observer_sees_track_changes() {
        let mut session = PlayerSession::with_rng_seed(3);
        let log = recorded_changes(&mut session);

        session.play(vec![episode("a", 100), episode("b", 200)], 0);
        session.play_next();

        let changes = log.lock().unwrap();
        assert!(changes.contains(&SessionChange::TrackChanged { index: 0 }));
        assert!(changes.contains(&SessionChange::TrackChanged { index: 1 }));
    }

    #[test]
    fn test_toggle_loop() {
        let mut session = two_episode_session();
        session.toggle_loop();
        assert!(session.is_looping());
        session.toggle_loop();
        assert!(!session.is_looping());
    }
}
