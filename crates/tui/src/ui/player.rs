//! Player view rendering

use super::ViewContext;
use castwave_core::Duration;
use castwave_player::PlayerPhase;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Renders the player view
pub fn render(frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Now playing
            Constraint::Length(3), // Progress bar
            Constraint::Length(3), // Time info
            Constraint::Length(7), // Controls
            Constraint::Min(0),
        ])
        .split(area);

    render_now_playing(frame, chunks[0], ctx);
    render_progress(frame, chunks[1], ctx);
    render_time_info(frame, chunks[2], ctx);
    render_controls(frame, chunks[3], ctx);
}

/// The duration the progress display is based on
///
/// The primitive's reported duration wins once metadata has loaded; before
/// that the episode record's own length is shown.
fn display_duration(ctx: &ViewContext) -> Duration {
    ctx.track_duration
        .or_else(|| ctx.session.current_episode().map(|e| e.duration))
        .unwrap_or(Duration::ZERO)
}

/// Renders now playing information
fn render_now_playing(frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let text = match ctx.session.current_episode() {
        Some(episode) => vec![
            Line::from(Span::styled(
                "♪ Now playing",
                ctx.theme.accent_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(episode.title.clone(), ctx.theme.text_style())),
            Line::from(Span::styled(
                episode.members.clone(),
                ctx.theme.text_secondary_style(),
            )),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "Select an episode to listen",
                ctx.theme.text_secondary_style(),
            )),
        ],
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ctx.theme.border_color())),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Renders the progress bar
fn render_progress(frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let duration = display_duration(ctx);
    let percent = if duration.is_zero() {
        0
    } else {
        ((ctx.elapsed.as_seconds() * 100) / duration.as_seconds()).min(100) as u16
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ctx.theme.border_color()))
                .title("Progress"),
        )
        .gauge_style(ctx.theme.success_style())
        .percent(percent);

    frame.render_widget(gauge, area);
}

/// Renders elapsed and total time
fn render_time_info(frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let time_info = format!("{} / {}", ctx.elapsed.as_hms(), display_duration(ctx).as_hms());

    let paragraph = Paragraph::new(time_info)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ctx.theme.border_color()))
                .title("Time"),
        )
        .alignment(Alignment::Center)
        .style(ctx.theme.highlight_style());

    frame.render_widget(paragraph, area);
}

/// Renders transport controls with availability
fn render_controls(frame: &mut Frame, area: Rect, ctx: &ViewContext) {
    let has_episode = ctx.session.current_episode().is_some();

    let status = match (ctx.phase, ctx.session.is_playing()) {
        (PlayerPhase::Empty, _) => ("—", ctx.theme.text_secondary),
        (PlayerPhase::Loading, _) => ("⏳ Loading", ctx.theme.text_secondary),
        (PlayerPhase::Ready { .. }, true) => ("▶ Playing", ctx.theme.playing),
        (PlayerPhase::Ready { .. }, false) => ("⏸ Paused", ctx.theme.paused),
    };

    let control = |label: &str, enabled: bool, active: bool| -> Span<'static> {
        let style = if !enabled {
            ctx.theme.disabled_style()
        } else if active {
            ctx.theme.accent_style().add_modifier(Modifier::BOLD)
        } else {
            ctx.theme.text_style()
        };
        Span::styled(label.to_string(), style)
    };

    let shuffle_enabled = has_episode && ctx.session.queue().len() > 1;

    let controls = vec![
        Line::from(Span::styled(
            status.0,
            Style::default().fg(status.1).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            control("🔀 shuffle", shuffle_enabled, ctx.session.is_shuffling()),
            Span::raw("   "),
            control("⏮ prev", has_episode && ctx.session.has_previous(), false),
            Span::raw("   "),
            control("⏯ play/pause", has_episode, false),
            Span::raw("   "),
            control("⏭ next", has_episode && ctx.session.has_next(), false),
            Span::raw("   "),
            control("🔁 loop", has_episode, ctx.session.is_looping()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Space: Play/Pause | n/p: Next/Previous | ←/→: Seek 10s | l: Loop | s: Shuffle",
            ctx.theme.text_secondary_style(),
        )),
    ];

    let paragraph = Paragraph::new(controls)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ctx.theme.border_color()))
                .title("Controls"),
        )
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
