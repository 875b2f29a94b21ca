//! UI rendering modules

pub mod home;
pub mod player;

use crate::{
    state::{AppState, View},
    theme::Theme,
};
use castwave_catalog::HomeFeed;
use castwave_core::Duration;
use castwave_player::{PlayerPhase, PlayerSession};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Everything the views need to draw one frame
pub struct ViewContext<'a> {
    pub state: &'a AppState,
    pub feed: &'a HomeFeed,
    pub session: &'a PlayerSession,
    pub phase: PlayerPhase,
    pub elapsed: Duration,
    pub track_duration: Option<Duration>,
    pub theme: &'a Theme,
}

/// Renders the main UI
pub fn render(frame: &mut Frame, ctx: &ViewContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], ctx);
    render_content(frame, chunks[1], ctx);
    render_status_bar(frame, chunks[2], ctx);
}

/// Renders the tab bar
fn render_tabs(frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let titles = vec!["Home", "Player"];
    let index = match ctx.state.view {
        View::Home => 0,
        View::Player => 1,
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ctx.theme.border_color()))
                .title("♪ Castwave"),
        )
        .select(index)
        .style(ctx.theme.text_style())
        .highlight_style(ctx.theme.highlight_style());

    frame.render_widget(tabs, area);
}

/// Renders the current view content
fn render_content(frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    match ctx.state.view {
        View::Home => home::render(frame, area, ctx),
        View::Player => player::render(frame, area, ctx),
    }
}

/// Renders the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let status_text = if let Some(ref msg) = ctx.state.status_message {
        msg.clone()
    } else {
        "q: Quit | Tab: Switch view | Enter: Play | Space: Play/Pause".to_string()
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            " ● ",
            Style::default().fg(if ctx.session.is_playing() {
                ctx.theme.playing
            } else {
                ctx.theme.paused
            }),
        ),
        Span::styled(status_text, ctx.theme.text_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ctx.theme.border_color())),
    );

    frame.render_widget(status, area);
}

/// Truncates `text` to `width` terminal columns, appending an ellipsis
pub(crate) fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        let truncated = truncate_to_width("a very long episode title", 10);
        assert!(truncated.width() <= 10);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_truncate_wide_chars() {
        let truncated = truncate_to_width("播客播客播客播客", 7);
        assert!(truncated.width() <= 7);
    }
}
