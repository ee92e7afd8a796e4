use chrono::Utc;
use tabled::Tabled;

use super::common::collect;
use crate::cli::SummaryArgs;
use crate::client::GitHubClient;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::types::{AggregateSummary, IssueStatus, MonthlyBucket};

const BAR_WIDTH: usize = 30;

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Open")]
    open: usize,
    #[tabled(rename = "Closed")]
    closed: usize,
    #[tabled(rename = "Total")]
    total: usize,
    #[tabled(rename = "")]
    bar: String,
}

impl MonthRow {
    fn new(bucket: &MonthlyBucket, max: usize) -> Self {
        Self {
            month: bucket.label(),
            open: bucket.open,
            closed: bucket.closed,
            total: bucket.total(),
            bar: output::bar(bucket.total(), max, BAR_WIDTH),
        }
    }
}

/// Print totals and the monthly trend without rendering a report.
pub async fn show(client: &GitHubClient, config: &Config, args: SummaryArgs) -> Result<()> {
    let user = config.resolve_user(args.user.as_deref());
    let limit = config.resolve_limit(args.limit);

    let collected = collect(client, user.as_deref(), limit, Utc::now()).await?;

    output::print_item(&collected.summary, |summary| {
        print_summary(&collected.user, summary);
    })?;

    Ok(())
}

fn print_summary(user: &str, summary: &AggregateSummary) {
    println!("Issues authored by or assigned to {user}");
    println!();
    println!("Total:  {}", summary.total);
    println!("{}: {}", output::status_colored(IssueStatus::Open), summary.open);
    println!("{}: {}", output::status_colored(IssueStatus::Closed), summary.closed);
    println!();

    let max = summary.months.iter().map(MonthlyBucket::total).max().unwrap_or(0);
    let rows: Vec<MonthRow> = summary.months.iter().map(|m| MonthRow::new(m, max)).collect();
    output::print_table(rows);
}
