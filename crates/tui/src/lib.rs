//! Terminal UI for Castwave
//!
//! Two views over shared state: the home feed listing and the player. Both
//! are pure renders of the session, the feed, and the bridge's transient
//! progress; all mutation happens in the key handlers.

pub mod app;
pub mod error;
pub mod events;
pub mod state;
pub mod theme;
pub mod ui;

pub use app::App;
pub use error::{TuiError, TuiResult};
pub use state::{AppState, View};
pub use theme::Theme;
