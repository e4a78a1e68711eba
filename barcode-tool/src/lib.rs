pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod issuance;

use cli::{Cli, Command};
use config::AppConfig;

/// Load configuration and dispatch the parsed command line.
pub fn run(cli: Cli) -> Result<(), anyhow::Error> {
    bootstrap::load_dotenv();
    let config = AppConfig::load()?.with_overrides(cli.ledger, cli.backend);

    match cli.command {
        Command::Issue(args) => commands::issue::run(&config, args),
        Command::Generate(args) => commands::generate::run(&config, args),
        Command::Used(args) => commands::used::run(&config, args),
        Command::Import(args) => commands::import::run(args),
    }
}
