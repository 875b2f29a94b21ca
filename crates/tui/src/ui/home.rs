//! Home view rendering
//!
//! Two ordered sections over the same feed: the featured "Latest episodes"
//! and the remaining "All episodes". Selection is flat across both.

use super::{truncate_to_width, ViewContext};
use castwave_core::Episode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Renders the home view
pub fn render(frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let latest_height = ctx.feed.latest_episodes.len() as u16 + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(latest_height), Constraint::Min(0)])
        .split(area);

    render_section(
        frame,
        chunks[0],
        ctx,
        "Latest episodes",
        &ctx.feed.latest_episodes,
        0,
    );
    render_section(
        frame,
        chunks[1],
        ctx,
        "All episodes (↑/↓: Navigate | Enter: Play)",
        &ctx.feed.all_episodes,
        ctx.feed.latest_episodes.len(),
    );
}

/// Renders one episode list section
///
/// `offset` is the flat index of the section's first row, used to match
/// rows against the app-level selection.
fn render_section(
    frame: &mut Frame,
    area: Rect,
    ctx: &ViewContext,
    title: &str,
    episodes: &[Episode],
    offset: usize,
) {
    let width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = episodes
        .iter()
        .enumerate()
        .map(|(i, episode)| {
            let flat_index = offset + i;
            let style = if flat_index == ctx.state.home_selected {
                ctx.theme.highlight_style()
            } else {
                ctx.theme.text_style()
            };

            ListItem::new(Line::from(Span::styled(episode_row(episode, width), style)))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ctx.theme.border_color()))
                .title(title.to_string()),
        )
        .style(ctx.theme.text_style());

    frame.render_widget(list, area);
}

/// One feed row: title, members, publish date, duration
fn episode_row(episode: &Episode, width: usize) -> String {
    let row = format!(
        "{} — {}  {} · {}",
        episode.title, episode.members, episode.published_at_display, episode.duration_display
    );
    truncate_to_width(&row, width)
}
