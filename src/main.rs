use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use devassist::chat::{ChatClient, OpenAiClient};
use devassist::cli::{Cli, CliCommand};
use devassist::config::Config;
use devassist::dashboard::run_dashboard;
use devassist::error::Result;
use devassist::review::run_code_review;
use devassist::testgen::run_test_generation;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli)?;
    info!(?config, "config loaded");

    let client = config
        .api_key
        .as_ref()
        .map(|key| OpenAiClient::new(config.api_url.clone(), key.clone(), config.timeout));
    let client = client.as_ref().map(|c| c as &dyn ChatClient);

    match cli.command {
        CliCommand::Review => {
            run_code_review(&config, client)?;
        }
        CliCommand::GenTests => {
            run_test_generation(&config, client)?;
        }
        CliCommand::Dashboard => {
            run_dashboard(&config)?;
        }
        CliCommand::All => {
            run_code_review(&config, client)?;
            run_test_generation(&config, client)?;
            run_dashboard(&config)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
