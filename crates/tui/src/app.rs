//! Main application logic

use crate::{
    error::TuiResult,
    events::{AppEvent, EventHandler},
    state::{AppState, View},
    theme::Theme,
    ui::{self, ViewContext},
};
use castwave_catalog::HomeFeed;
use castwave_core::Duration;
use castwave_player::{AudioPrimitive, PlayerBridge, PlayerSession};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{backend::Backend, Terminal};

/// How far one arrow-key press seeks, in seconds
const SEEK_STEP_SECONDS: u64 = 10;

/// The main TUI application
pub struct App<P: AudioPrimitive> {
    state: AppState,
    feed: HomeFeed,
    session: PlayerSession,
    bridge: PlayerBridge<P>,
    event_handler: EventHandler,
    theme: Theme,
}

impl<P: AudioPrimitive> App<P> {
    /// Creates the application around a fetched feed and an audio primitive
    pub fn new(feed: HomeFeed, primitive: P, autoplay: bool) -> Self {
        let mut session = PlayerSession::new();
        let bridge = PlayerBridge::new(primitive, &mut session, autoplay);

        Self {
            state: AppState::new(feed.len()),
            feed,
            session,
            bridge,
            event_handler: EventHandler::default(),
            theme: Theme::default(),
        }
    }

    /// Runs the application until quit
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> TuiResult<()> {
        while !self.state.should_quit {
            // Fold pending session changes and primitive events in before
            // drawing, so every frame reflects current playback reality
            self.bridge.pump(&mut self.session);
            if let Some(message) = self.bridge.take_error() {
                self.state.set_status(format!("Playback error: {}", message));
            }

            let ctx = ViewContext {
                state: &self.state,
                feed: &self.feed,
                session: &self.session,
                phase: self.bridge.phase(),
                elapsed: self.bridge.elapsed(),
                track_duration: self.bridge.track_duration(),
                theme: &self.theme,
            };
            terminal.draw(|frame| ui::render(frame, &ctx))?;

            match self.event_handler.next()? {
                AppEvent::Key(key) => self.handle_key(key.code, key.modifiers),
                AppEvent::Quit => self.state.quit(),
                AppEvent::Tick => {}
                AppEvent::Resize(_, _) => {}
            }
        }

        Ok(())
    }

    /// Handles key events
    fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) {
        match code {
            KeyCode::Tab => {
                self.state.cycle_view();
                return;
            }
            KeyCode::Char('1') => {
                self.state.set_view(View::Home);
                return;
            }
            KeyCode::Char('2') => {
                self.state.set_view(View::Player);
                return;
            }
            _ => {}
        }

        match self.state.view {
            View::Home => self.handle_home_keys(code),
            View::Player => self.handle_player_keys(code),
        }
    }

    /// Handles home view keys
    fn handle_home_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.select_previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.select_next();
            }
            KeyCode::Enter => {
                self.play_selected();
            }
            _ => {}
        }
    }

    /// Loads the whole feed as the queue, starting at the selected row
    fn play_selected(&mut self) {
        let index = self.state.home_selected;
        let Some(episode) = self.feed.get(index) else {
            return;
        };

        let title = episode.title.clone();
        log::info!("Queueing the feed from position {}", index + 1);
        self.session.play(self.feed.episodes_in_order(), index);
        self.state.set_view(View::Player);
        self.state.set_status(format!("Playing {}", title));
    }

    /// Handles player view keys
    fn handle_player_keys(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(' ') => {
                if self.session.current_episode().is_none() {
                    return;
                }
                self.session.toggle_play();
                let status = if self.session.is_playing() {
                    "Playing"
                } else {
                    "Paused"
                };
                self.state.set_status(status);
            }
            KeyCode::Char('n') => {
                self.session.play_next();
            }
            KeyCode::Char('p') => {
                self.session.play_previous();
            }
            KeyCode::Char('l') => {
                self.session.toggle_loop();
                if self.session.current_episode().is_some() {
                    let status = if self.session.is_looping() {
                        "Loop on"
                    } else {
                        "Loop off"
                    };
                    self.state.set_status(status);
                }
            }
            KeyCode::Char('s') => {
                if self.session.queue().len() <= 1 {
                    return;
                }
                self.session.toggle_shuffle();
                let status = if self.session.is_shuffling() {
                    "Shuffle on"
                } else {
                    "Shuffle off"
                };
                self.state.set_status(status);
            }
            KeyCode::Left => {
                let target = self.bridge.elapsed().saturating_sub(SEEK_STEP_SECONDS);
                self.seek_to(target);
            }
            KeyCode::Right => {
                let target = self.bridge.elapsed().saturating_add(SEEK_STEP_SECONDS);
                self.seek_to(target);
            }
            _ => {}
        }
    }

    /// Seeks within `[0, duration]`; the clamp keeps the slider contract
    fn seek_to(&mut self, target: Duration) {
        let Some(episode) = self.session.current_episode() else {
            return;
        };
        let duration = self.bridge.track_duration().unwrap_or(episode.duration);
        self.bridge.seek(&self.session, target.min(duration));
    }
}
