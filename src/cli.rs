use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "issue-dashboard")]
#[command(about = "Build a static dashboard of the GitHub issues you authored or were assigned", version)]
#[command(after_help = "EXAMPLES:
    issue-dashboard generate                     Write index.html for the token's owner
    issue-dashboard generate --user octocat      Report on a specific user
    issue-dashboard summary                      Print totals and the monthly trend
    issue-dashboard init                         Create a config file")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress success messages and progress logging
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// More log output (-v, -vv) and full error causes
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch issues and write the HTML dashboard
    #[command(after_help = "EXAMPLES:
    issue-dashboard generate
    issue-dashboard generate --output site/index.html
    issue-dashboard generate --user octocat --limit 200")]
    Generate(GenerateArgs),
    /// Fetch issues and print the summary to the terminal
    #[command(after_help = "EXAMPLES:
    issue-dashboard summary
    issue-dashboard summary --json")]
    Summary(SummaryArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    issue-dashboard completions bash > ~/.bash_completion.d/issue-dashboard
    issue-dashboard completions zsh > ~/.zfunc/_issue-dashboard")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Args, Clone)]
pub struct GenerateArgs {
    /// GitHub login to report on (default: config, then the token's owner)
    #[arg(long, short)]
    pub user: Option<String>,

    /// Where to write the dashboard (default: index.html)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Maximum issues per search (default and max: 1000)
    #[arg(long, short)]
    pub limit: Option<usize>,

    /// Page title
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Args, Clone)]
pub struct SummaryArgs {
    /// GitHub login to report on (default: config, then the token's owner)
    #[arg(long, short)]
    pub user: Option<String>,

    /// Maximum issues per search (default and max: 1000)
    #[arg(long, short)]
    pub limit: Option<usize>,
}
