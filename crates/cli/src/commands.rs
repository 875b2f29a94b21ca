use anyhow::{bail, Context, Result};
use castwave_catalog::{parse_locale, FeedCache, HomeFeed, Locale, PodcastApiSource};
use castwave_config::Config;
use castwave_core::Episode;
use castwave_media::RodioPrimitive;
use castwave_player::{PlayerBridge, PlayerSession};
use console::style;
use std::io::Write;
use std::time::Duration as StdDuration;

/// Fetches the home feed according to the configuration
pub fn fetch_feed(config: &Config) -> Result<HomeFeed> {
    let locale = parse_locale(&config.api.locale).unwrap_or_else(|| {
        log::warn!(
            "Unknown locale '{}', falling back to pt-BR",
            config.api.locale
        );
        Locale::pt_BR
    });

    let source = PodcastApiSource::new(&config.api.base_url, config.api.page_limit, locale);
    let mut cache = FeedCache::new(StdDuration::from_secs(config.api.refresh_interval_secs));

    let feed = cache
        .refresh_if_stale(&source)
        .with_context(|| format!("Failed to fetch episodes from {}", config.api.base_url))?
        .clone();

    Ok(feed)
}

/// Prints the home feed to stdout
pub fn list_episodes(config: &Config) -> Result<()> {
    let feed = fetch_feed(config)?;

    if feed.is_empty() {
        println!("No episodes in the feed.");
        return Ok(());
    }

    println!("\n{}", style("Latest episodes").bold().cyan());
    println!("{}", "=".repeat(72));
    for (i, episode) in feed.latest_episodes.iter().enumerate() {
        print_episode_row(i + 1, episode);
    }

    if !feed.all_episodes.is_empty() {
        println!("\n{}", style("All episodes").bold().cyan());
        println!("{}", "=".repeat(72));
        for (i, episode) in feed.all_episodes.iter().enumerate() {
            print_episode_row(feed.latest_episodes.len() + i + 1, episode);
        }
    }

    Ok(())
}

fn print_episode_row(position: usize, episode: &Episode) {
    println!(
        "{:>3}. {} — {}  {} · {}",
        position,
        style(&episode.title).bold(),
        episode.members,
        episode.published_at_display,
        episode.duration_display
    );
}

/// Maps a 1-based feed position to a queue index
fn resolve_position(feed_len: usize, position: usize) -> Result<usize> {
    if position == 0 || position > feed_len {
        bail!(
            "No episode at position {} (the feed has {} episodes)",
            position,
            feed_len
        );
    }
    Ok(position - 1)
}

/// Plays a single episode from the feed without the UI
pub fn play_episode(config: &Config, position: usize) -> Result<()> {
    let feed = fetch_feed(config)?;
    let index = resolve_position(feed.len(), position)?;
    let Some(episode) = feed.get(index).cloned() else {
        bail!("No episode at position {}", position);
    };

    let primitive = RodioPrimitive::spawn().context("Failed to start the audio thread")?;
    let mut session = PlayerSession::new();
    let mut bridge = PlayerBridge::new(primitive, &mut session, true);

    println!(
        "Playing {} ({})",
        style(&episode.title).bold(),
        episode.duration_display
    );
    session.play_single(episode);

    loop {
        bridge.pump(&mut session);

        if let Some(message) = bridge.take_error() {
            println!();
            bail!("Playback failed: {}", message);
        }
        if session.current_episode().is_none() {
            // Natural end cleared the session
            break;
        }

        let total = bridge
            .track_duration()
            .map(|d| d.as_hms())
            .unwrap_or_else(|| "--:--:--".to_string());
        print!("\r  {} / {}  ", bridge.elapsed().as_hms(), total);
        std::io::stdout().flush().ok();

        std::thread::sleep(StdDuration::from_millis(250));
    }

    println!("\nDone.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_position_one_based() {
        assert_eq!(resolve_position(5, 1).unwrap(), 0);
        assert_eq!(resolve_position(5, 5).unwrap(), 4);
    }

    #[test]
    fn test_resolve_position_rejects_zero() {
        assert!(resolve_position(5, 0).is_err());
    }

    #[test]
    fn test_resolve_position_rejects_past_end() {
        assert!(resolve_position(5, 6).is_err());
        assert!(resolve_position(0, 1).is_err());
    }
}
