use chrono::{DateTime, Datelike, Utc};

use crate::types::{AggregateSummary, Issue, IssueStatus, MonthlyBucket, TREND_MONTHS};

/// Totals plus the trailing 12-month creation trend ending at `now`'s month.
///
/// Buckets are keyed by creation date only. Issues without a creation date
/// count towards the totals but not the trend.
pub fn summarize(issues: &[Issue], now: DateTime<Utc>) -> AggregateSummary {
    let mut months = trailing_months(now);
    let first = month_index(months[0].year, months[0].month);
    let mut open = 0;
    let mut closed = 0;

    for issue in issues {
        match issue.status {
            IssueStatus::Open => open += 1,
            IssueStatus::Closed => closed += 1,
        }

        let Some(created) = issue.created_at else {
            continue;
        };
        let offset = month_index(created.year(), created.month()) - first;
        let Some(bucket) = usize::try_from(offset).ok().and_then(|i| months.get_mut(i)) else {
            continue;
        };
        match issue.status {
            IssueStatus::Open => bucket.open += 1,
            IssueStatus::Closed => bucket.closed += 1,
        }
    }

    AggregateSummary {
        total: issues.len(),
        open,
        closed,
        months,
        generated_at: now,
    }
}

/// Empty buckets for the 12 calendar months ending with `now`'s, oldest first.
pub fn trailing_months(now: DateTime<Utc>) -> Vec<MonthlyBucket> {
    let current = month_index(now.year(), now.month());
    (0..TREND_MONTHS as i64)
        .rev()
        .map(|back| {
            let index = current - back;
            let year = index.div_euclid(12) as i32;
            let month = index.rem_euclid(12) as u32 + 1;
            MonthlyBucket::empty(year, month)
        })
        .collect()
}

fn month_index(year: i32, month: u32) -> i64 {
    i64::from(year) * 12 + i64::from(month) - 1
}
