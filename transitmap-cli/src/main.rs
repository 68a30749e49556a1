//! transitmap CLI - Command-line interface
//!
//! This binary polls a SIRI vehicle feed and shows the live positions in a
//! terminal dashboard.

mod commands;
mod error;
mod runner;
mod tui_app;
mod ui;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::fetch::FetchArgs;
use commands::run::RunArgs;

#[derive(Parser)]
#[command(name = "transitmap")]
#[command(version, about = "Live transit vehicle positions in the terminal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the feed and display vehicle markers until stopped
    Run(RunArgs),

    /// Fetch the feed once and print the vehicles
    Fetch(FetchArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Fetch(args) => commands::fetch::run(args),
        Commands::Config(command) => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "transitmap",
            "run",
            "--url",
            "https://example.com/vm.xml",
            "--interval-ms",
            "5000",
            "--format",
            "xml",
            "--overlap",
            "chained",
            "--region",
            "43.0,-3.5,43.5,-2.3",
            "--no-tui",
        ])
        .unwrap();

        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.feed.url.as_deref(), Some("https://example.com/vm.xml"));
                assert_eq!(args.interval_ms, Some(5_000));
                assert!(args.no_tui);
                assert!(!args.debug);
                assert!(args.region.is_some());
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["transitmap", "fetch", "--format", "csv"]).is_err());
    }

    #[test]
    fn test_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["transitmap", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true })
        ));
    }
}
