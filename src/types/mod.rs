mod issue;
mod raw;
mod summary;

pub use issue::{Issue, IssueStatus, Label};
pub use raw::{IssueKey, RawIssue, RawLabel, RawUser};
pub use summary::{AggregateSummary, MonthlyBucket, TREND_MONTHS};
