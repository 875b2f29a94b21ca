use anyhow::{Context, Result};
use castwave_config::{Config, ConfigPersistence};
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

mod commands;
mod tui_mode;

fn build_cli() -> Command {
    Command::new("castwave")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Podcast player for the terminal")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the config file")
                .global(true),
        )
        .subcommand(Command::new("tui").about("Run the full-screen player (default)"))
        .subcommand(Command::new("episodes").about("List the episode feed"))
        .subcommand(
            Command::new("play")
                .about("Play one episode from the feed, without the UI")
                .arg(
                    Arg::new("index")
                        .required(true)
                        .value_name("INDEX")
                        .help("Episode position in the feed, starting at 1"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Config {
    let persistence = match matches.get_one::<String>("config") {
        Some(path) => ConfigPersistence::new(PathBuf::from(path)),
        None => ConfigPersistence::at_default_location()
            .unwrap_or_else(|| ConfigPersistence::new(PathBuf::from("castwave.toml"))),
    };
    persistence.load_or_default()
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let config = load_config(&matches);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.app.log_level.as_filter()),
    )
    .init();

    match matches.subcommand() {
        Some(("episodes", _)) => commands::list_episodes(&config),
        Some(("play", sub_matches)) => {
            let index: usize = sub_matches
                .get_one::<String>("index")
                .ok_or_else(|| anyhow::anyhow!("INDEX is required"))?
                .parse()
                .context("INDEX must be a number")?;
            commands::play_episode(&config, index)
        }
        Some(("tui", _)) | None => tui_mode::run(&config),
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_play_takes_an_index() {
        let matches = build_cli()
            .try_get_matches_from(["castwave", "play", "3"])
            .expect("parses");
        let (name, sub) = matches.subcommand().expect("has subcommand");
        assert_eq!(name, "play");
        assert_eq!(sub.get_one::<String>("index").unwrap(), "3");
    }

    #[test]
    fn test_global_config_flag() {
        let matches = build_cli()
            .try_get_matches_from(["castwave", "--config", "/tmp/c.toml", "episodes"])
            .expect("parses");
        assert_eq!(
            matches.get_one::<String>("config").unwrap(),
            "/tmp/c.toml"
        );
    }
}
