use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;

use crate::error::MalformedRecord;
use crate::types::{Issue, IssueStatus, Label, RawIssue, RawLabel};

/// Used when a label arrives without a usable color.
pub const DEFAULT_LABEL_COLOR: &str = "ededed";
const UNKNOWN_REPOSITORY: &str = "unknown/unknown";
const UNTITLED: &str = "(untitled)";

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{6}$").expect("hex color pattern is valid"));

/// A normalized issue plus whatever had to be patched up to produce it.
#[derive(Debug)]
pub struct Normalized {
    pub issue: Issue,
    pub anomalies: Vec<MalformedRecord>,
}

/// Normalize every record. Anomalies are logged, never fatal.
pub fn normalize_all(records: Vec<RawIssue>, query_user: &str) -> Vec<Issue> {
    let mut patched = 0usize;
    let issues: Vec<Issue> = records
        .into_iter()
        .map(|raw| {
            let normalized = normalize(raw, query_user);
            if !normalized.anomalies.is_empty() {
                patched += 1;
            }
            for anomaly in &normalized.anomalies {
                log::debug!("{anomaly}");
            }
            normalized.issue
        })
        .collect();

    if patched > 0 {
        log::info!("{patched} record(s) had missing or malformed fields; placeholders substituted");
    }

    issues
}

pub fn normalize(raw: RawIssue, query_user: &str) -> Normalized {
    let key = raw
        .identity()
        .map_or_else(|| "<unidentified>".to_string(), |k| k.to_string());
    let mut anomalies = Vec::new();
    let mut note = |field: &'static str, detail: String| {
        anomalies.push(MalformedRecord {
            issue: key.clone(),
            field,
            detail,
        });
    };

    let repository = raw.repository().unwrap_or_else(|| {
        note("repository", "is missing".to_string());
        UNKNOWN_REPOSITORY.to_string()
    });

    let number = raw.resolved_number().unwrap_or_else(|| {
        note("number", "is missing".to_string());
        0
    });

    let title = match raw.title {
        Some(title) if !title.trim().is_empty() => title,
        _ => {
            note("title", "is missing".to_string());
            UNTITLED.to_string()
        }
    };

    let created_at = timestamp_field(raw.created_at.as_deref(), "created_at", true, &mut note);
    let updated_at = timestamp_field(raw.updated_at.as_deref(), "updated_at", true, &mut note);
    let closed_at = timestamp_field(raw.closed_at.as_deref(), "closed_at", false, &mut note);

    let status = match raw.state.as_deref().and_then(parse_status) {
        Some(status) => status,
        None => {
            note("state", format!("is unusable ({:?})", raw.state));
            if closed_at.is_some() {
                IssueStatus::Closed
            } else {
                IssueStatus::Open
            }
        }
    };

    let author = match raw.user {
        Some(user) if !user.login.is_empty() => user.login,
        _ => {
            note("author", format!("is missing; using '{query_user}'"));
            query_user.to_string()
        }
    };

    let listed = raw.assignees.unwrap_or_default();
    let listed_count = listed.len();
    let assignees: Vec<String> = listed
        .into_iter()
        .map(|u| u.login)
        .filter(|login| !login.is_empty())
        .collect();
    if assignees.len() < listed_count {
        note(
            "assignees",
            format!("had {} entries without a login", listed_count - assignees.len()),
        );
    }

    let labels = normalize_labels(raw.labels.unwrap_or_default(), &mut note);

    let url = match raw.html_url {
        Some(url) if !url.is_empty() => url,
        _ => {
            note("html_url", "is missing".to_string());
            format!("https://github.com/{repository}/issues/{number}")
        }
    };

    Normalized {
        issue: Issue {
            number,
            repository,
            title,
            status,
            author,
            assignees,
            labels,
            created_at,
            updated_at,
            closed_at,
            url,
        },
        anomalies,
    }
}

fn parse_status(state: &str) -> Option<IssueStatus> {
    match state.trim().to_ascii_lowercase().as_str() {
        "open" => Some(IssueStatus::Open),
        "closed" => Some(IssueStatus::Closed),
        _ => None,
    }
}

/// RFC 3339, or a bare `YYYY-MM-DD` taken as midnight UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = value.parse::<DateTime<Utc>>() {
        return Some(dt);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn timestamp_field(
    value: Option<&str>,
    field: &'static str,
    expected: bool,
    note: &mut impl FnMut(&'static str, String),
) -> Option<DateTime<Utc>> {
    match value {
        Some(value) => {
            let parsed = parse_timestamp(value);
            if parsed.is_none() {
                note(field, format!("is malformed ({value:?})"));
            }
            parsed
        }
        None => {
            if expected {
                note(field, "is missing".to_string());
            }
            None
        }
    }
}

/// Deduplicate by name (first wins) and validate colors.
fn normalize_labels(
    labels: Vec<RawLabel>,
    note: &mut impl FnMut(&'static str, String),
) -> Vec<Label> {
    let mut seen = HashSet::new();
    let mut result = Vec::with_capacity(labels.len());

    for label in labels {
        if label.name.is_empty() {
            note("labels", "entry without a name dropped".to_string());
            continue;
        }
        if !seen.insert(label.name.clone()) {
            continue;
        }

        let color = match label.color {
            Some(color) if HEX_COLOR.is_match(color.trim_start_matches('#')) => {
                color.trim_start_matches('#').to_ascii_lowercase()
            }
            other => {
                note("labels", format!("'{}' has unusable color {other:?}", label.name));
                DEFAULT_LABEL_COLOR.to_string()
            }
        };

        result.push(Label {
            name: label.name,
            color,
        });
    }

    result
}
