use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of calendar months covered by the trend.
pub const TREND_MONTHS: usize = 12;

/// Issues created in one calendar month, split by current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    pub year: i32,
    /// 1-based.
    pub month: u32,
    pub open: usize,
    pub closed: usize,
}

impl MonthlyBucket {
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            open: 0,
            closed: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.open + self.closed
    }

    /// `YYYY-MM`
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub total: usize,
    pub open: usize,
    pub closed: usize,
    /// Oldest first.
    pub months: Vec<MonthlyBucket>,
    pub generated_at: DateTime<Utc>,
}
