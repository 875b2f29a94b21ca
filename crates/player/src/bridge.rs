//! The player bridge
//!
//! One bridge binds one audio primitive to the shared session. Controls
//! never reach the primitive directly: they mutate the session, the session
//! notifies, and the bridge translates notifications into primitive calls.
//! In the other direction the bridge folds primitive events back into the
//! session and into its own transient progress counter.

use crate::primitive::{AudioPrimitive, PrimitiveEvent};
use crate::session::{PlayerSession, SessionChange};
use castwave_core::Duration;
use crossbeam_channel::{unbounded, Receiver};

/// Lifecycle of the episode currently held by the primitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    /// No episode selected; transport controls are inert
    Empty,
    /// Episode selected, metadata not yet loaded
    Loading,
    /// Media loaded and seekable
    Ready { playing: bool },
}

/// Bridge between the player session and one audio primitive
pub struct PlayerBridge<P: AudioPrimitive> {
    primitive: P,
    autoplay: bool,
    phase: PlayerPhase,
    /// Mirrors the primitive's reported position; owned here, never shared
    elapsed: Duration,
    /// Duration reported by the primitive's metadata, once known
    track_duration: Option<Duration>,
    /// Bumped on every load; events from older loads are discarded
    generation: u64,
    changes: Receiver<SessionChange>,
    last_error: Option<String>,
}

impl<P: AudioPrimitive> PlayerBridge<P> {
    /// Creates a bridge and subscribes it to the session
    pub fn new(primitive: P, session: &mut PlayerSession, autoplay: bool) -> Self {
        let (tx, rx) = unbounded();
        session.subscribe(move |change: &SessionChange| {
            // The bridge may already be gone during shutdown
            let _ = tx.send(change.clone());
        });

        Self {
            primitive,
            autoplay,
            phase: PlayerPhase::Empty,
            elapsed: Duration::ZERO,
            track_duration: None,
            generation: 0,
            changes: rx,
            last_error: None,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// Transient playback progress for the loaded episode
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Duration the primitive reported for the loaded episode
    pub fn track_duration(&self) -> Option<Duration> {
        self.track_duration
    }

    /// Takes the most recent media error message, if one occurred
    pub fn take_error(&mut self) -> Option<String> {
        self.last_error.take()
    }

    /// Moves the playback position to `amount`
    ///
    /// The caller guarantees `0 <= amount <= duration` (a slider does this
    /// by construction). The position and the progress counter move
    /// together, bypassing the event-driven sync so no stale report can
    /// land in between.
    pub fn seek(&mut self, session: &PlayerSession, amount: Duration) {
        if session.current_episode().is_none() {
            return;
        }
        if !matches!(self.phase, PlayerPhase::Ready { .. }) {
            return;
        }
        self.primitive.seek(amount);
        self.elapsed = amount;
    }

    /// Processes pending session changes and primitive events until both
    /// queues are drained
    ///
    /// Handlers may trigger further session mutations (a natural end
    /// advances the queue), so the drain loops until quiescent.
    pub fn pump(&mut self, session: &mut PlayerSession) {
        loop {
            let mut acted = false;

            while let Ok(change) = self.changes.try_recv() {
                acted = true;
                self.apply_change(session, &change);
            }

            while let Some(event) = self.primitive.poll_event() {
                acted = true;
                self.apply_event(session, event);
            }

            if !acted {
                break;
            }
        }
    }

    fn apply_change(&mut self, session: &mut PlayerSession, change: &SessionChange) {
        match change {
            SessionChange::PlayingChanged(playing) => {
                if self.phase == PlayerPhase::Empty {
                    return;
                }
                if self.phase == (PlayerPhase::Ready { playing: *playing }) {
                    // Already in agreement; this was an echo of a
                    // primitive-reported transition
                    return;
                }
                if *playing {
                    self.primitive.play();
                } else {
                    self.primitive.pause();
                }
            }
            SessionChange::TrackChanged { .. } => {
                let Some(episode) = session.current_episode() else {
                    return;
                };
                let url = episode.file_url.clone();
                self.generation += 1;
                self.phase = PlayerPhase::Loading;
                self.elapsed = Duration::ZERO;
                self.track_duration = None;
                self.primitive.set_looping(session.is_looping());
                self.primitive.load(&url, self.generation);
            }
            SessionChange::QueueCleared => {
                self.primitive.stop();
                self.phase = PlayerPhase::Empty;
                self.elapsed = Duration::ZERO;
                self.track_duration = None;
            }
            SessionChange::LoopingChanged(looping) => {
                self.primitive.set_looping(*looping);
            }
            SessionChange::ShufflingChanged(_) => {
                // Queue ordering concerns the session alone
            }
        }
    }

    fn apply_event(&mut self, session: &mut PlayerSession, event: PrimitiveEvent) {
        if event.generation() != self.generation {
            log::debug!(
                "Discarding stale primitive event from generation {} (current {})",
                event.generation(),
                self.generation
            );
            return;
        }

        match event {
            PrimitiveEvent::MetadataLoaded { duration, .. } => {
                self.elapsed = Duration::ZERO;
                self.track_duration = Some(duration);
                self.phase = PlayerPhase::Ready { playing: false };
                if self.autoplay || session.is_playing() {
                    self.primitive.play();
                }
            }
            PrimitiveEvent::TimeUpdate { position, .. } => {
                if matches!(self.phase, PlayerPhase::Ready { .. }) {
                    self.elapsed = position;
                }
            }
            PrimitiveEvent::Played { .. } => {
                // Loading -> Ready happens through MetadataLoaded only
                if matches!(self.phase, PlayerPhase::Ready { .. }) {
                    self.phase = PlayerPhase::Ready { playing: true };
                }
                session.set_playing_state(true);
            }
            PrimitiveEvent::Paused { .. } => {
                if matches!(self.phase, PlayerPhase::Ready { .. }) {
                    self.phase = PlayerPhase::Ready { playing: false };
                }
                session.set_playing_state(false);
            }
            PrimitiveEvent::Ended { .. } => {
                if session.has_next() {
                    session.play_next();
                } else {
                    session.clear_player_state();
                }
            }
            PrimitiveEvent::Error { message, .. } => {
                log::warn!("Media error: {}", message);
                self.last_error = Some(message);
                self.primitive.stop();
                self.phase = match self.phase {
                    // Metadata never arrived; nothing is seekable
                    PlayerPhase::Loading => PlayerPhase::Empty,
                    PlayerPhase::Empty => PlayerPhase::Empty,
                    PlayerPhase::Ready { .. } => PlayerPhase::Ready { playing: false },
                };
                session.set_playing_state(false);
            }
        }
    }
}
