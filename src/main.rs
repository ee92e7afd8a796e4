mod aggregate;
mod cli;
mod client;
mod commands;
mod config;
mod error;
mod fetch;
mod normalize;
mod output;
mod report;
mod responses;
mod sort;
#[cfg(test)]
mod testing;
mod types;

use std::error::Error;
use std::io;

use chrono::Utc;
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::{Cli, Commands};
use client::GitHubClient;
use commands::generate::GenerateSettings;
use config::Config;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);
    let verbose = cli.verbose > 0;

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        if verbose {
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("Caused by: {cause}");
                source = cause.source();
            }
        }

        std::process::exit(1);
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(verbose > 0)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    output::set_json_output(cli.json);
    output::set_quiet(cli.quiet);

    match cli.command {
        // Commands that don't require config/client
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "issue-dashboard", &mut io::stdout());
        }
        Commands::Init => {
            commands::init::run()?;
        }
        // Commands that require config and client
        command => {
            let config = Config::load()?;
            let client = GitHubClient::new(config.token()?, config.api_url())?;

            match command {
                Commands::Generate(args) => {
                    let settings = GenerateSettings::resolve(&config, args);
                    commands::generate::run(&client, &settings, Utc::now()).await?;
                }
                Commands::Summary(args) => {
                    commands::summary::show(&client, &config, args).await?;
                }
                Commands::Completions { .. } | Commands::Init => {
                    // Already handled above
                }
            }
        }
    }

    Ok(())
}
