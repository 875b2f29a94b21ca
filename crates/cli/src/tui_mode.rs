//! Full-screen mode with real audio playback

use anyhow::{Context, Result};
use castwave_config::Config;
use castwave_media::RodioPrimitive;
use castwave_tui::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

/// Fetches the feed, spawns audio, and runs the TUI until quit
pub fn run(config: &Config) -> Result<()> {
    let feed = crate::commands::fetch_feed(config)?;
    let primitive = RodioPrimitive::spawn().context("Failed to start the audio thread")?;
    let mut app = App::new(feed, primitive, config.player.autoplay);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    // Restore the terminal even when the app errored
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(())
}
