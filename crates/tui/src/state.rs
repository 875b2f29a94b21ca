//! Application state management

/// Available views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Player,
}

impl Default for View {
    fn default() -> Self {
        Self::Home
    }
}

/// UI-side application state
///
/// Holds only presentation concerns: the active view, the home list
/// cursor, and the status line. Playback state lives in the player
/// session.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current view
    pub view: View,
    /// Should quit
    pub should_quit: bool,
    /// Status message shown in the status bar
    pub status_message: Option<String>,
    /// Selected row in the home feed, flat across both sections
    pub home_selected: usize,
    /// Number of rows in the home feed
    pub feed_len: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::default(),
            should_quit: false,
            status_message: None,
            home_selected: 0,
            feed_len: 0,
        }
    }
}

impl AppState {
    /// Creates a new application state for a feed of `feed_len` rows
    pub fn new(feed_len: usize) -> Self {
        Self {
            feed_len,
            ..Self::default()
        }
    }

    /// Requests quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Sets the current view
    pub fn set_view(&mut self, view: View) {
        self.view = view;
    }

    /// Cycles to the other view
    pub fn cycle_view(&mut self) {
        self.view = match self.view {
            View::Home => View::Player,
            View::Player => View::Home,
        };
    }

    /// Sets a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clears the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Selects the next home row
    pub fn select_next(&mut self) {
        let max = self.feed_len.saturating_sub(1);
        if self.home_selected < max {
            self.home_selected += 1;
        }
    }

    /// Selects the previous home row
    pub fn select_previous(&mut self) {
        self.home_selected = self.home_selected.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_default() {
        assert_eq!(View::default(), View::Home);
    }

    #[test]
    fn test_app_state_new() {
        let state = AppState::new(5);
        assert_eq!(state.view, View::Home);
        assert!(!state.should_quit);
        assert_eq!(state.feed_len, 5);
    }

    #[test]
    fn test_cycle_view() {
        let mut state = AppState::new(0);
        state.cycle_view();
        assert_eq!(state.view, View::Player);
        state.cycle_view();
        assert_eq!(state.view, View::Home);
    }

    #[test]
    fn test_selection_bounds() {
        let mut state = AppState::new(3);

        state.select_previous();
        assert_eq!(state.home_selected, 0);

        for _ in 0..10 {
            state.select_next();
        }
        assert_eq!(state.home_selected, 2);
    }

    #[test]
    fn test_selection_in_empty_feed() {
        let mut state = AppState::new(0);
        state.select_next();
        assert_eq!(state.home_selected, 0);
    }

    #[test]
    fn test_status_message() {
        let mut state = AppState::new(0);
        state.set_status("Playing");
        assert_eq!(state.status_message, Some("Playing".to_string()));
        state.clear_status();
        assert_eq!(state.status_message, None);
    }
}
