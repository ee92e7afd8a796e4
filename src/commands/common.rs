use chrono::{DateTime, Utc};

use crate::aggregate::summarize;
use crate::client::IssueSearch;
use crate::error::Result;
use crate::fetch::fetch_issues;
use crate::normalize::normalize_all;
use crate::types::{AggregateSummary, Issue};

/// Everything one run computes before output.
#[derive(Debug)]
pub struct Collected {
    pub user: String,
    pub issues: Vec<Issue>,
    pub summary: AggregateSummary,
}

/// Fetch, normalize and aggregate. A fetch failure aborts before anything
/// downstream runs.
pub async fn collect<S: IssueSearch>(
    source: &S,
    user: Option<&str>,
    limit: usize,
    now: DateTime<Utc>,
) -> Result<Collected> {
    let fetched = fetch_issues(source, user, limit).await?;
    log::info!("Fetched {} unique issues", fetched.records.len());

    let issues = normalize_all(fetched.records, &fetched.user);
    let summary = summarize(&issues, now);
    log::info!("Open: {}, Closed: {}", summary.open, summary.closed);

    Ok(Collected {
        user: fetched.user,
        issues,
        summary,
    })
}
