//! Records as returned by the search API, before normalization.
//!
//! Every field is optional: a single record with holes must not fail the
//! decoding of a whole page. Nested users and labels without a login or name
//! decode with an empty one, and `null` list entries are dropped.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawIssue {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub state: Option<String>,
    pub user: Option<RawUser>,
    #[serde(default, deserialize_with = "skip_nulls")]
    pub assignees: Option<Vec<RawUser>>,
    #[serde(default, deserialize_with = "skip_nulls")]
    pub labels: Option<Vec<RawLabel>>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub closed_at: Option<String>,
    pub html_url: Option<String>,
    pub repository_url: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RawUser {
    #[serde(default)]
    pub login: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct RawLabel {
    #[serde(default)]
    pub name: String,
    pub color: Option<String>,
}

/// Identity of an issue within one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueKey {
    Numbered { repository: String, number: u64 },
    /// Fallback for records whose repository or number is missing.
    Url(String),
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered { repository, number } => write!(f, "{repository}#{number}"),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

impl RawIssue {
    /// `owner/name` of the owning repository, from the API repository URL
    /// (`.../repos/<owner>/<name>`) or else the issue's HTML URL
    /// (`https://host/<owner>/<name>/issues/<n>`).
    pub fn repository(&self) -> Option<String> {
        if let Some(repo) = self
            .repository_url
            .as_deref()
            .and_then(repository_from_api_url)
        {
            return Some(repo);
        }

        self.html_url.as_deref().and_then(repository_from_html_url)
    }

    /// Issue number, falling back to the last segment of the HTML URL.
    pub fn resolved_number(&self) -> Option<u64> {
        self.number
            .or_else(|| self.html_url.as_deref().and_then(number_from_html_url))
    }

    /// Author login, if the record carries a usable one.
    pub fn author(&self) -> Option<&str> {
        self.user
            .as_ref()
            .map(|u| u.login.as_str())
            .filter(|login| !login.is_empty())
    }

    pub fn identity(&self) -> Option<IssueKey> {
        match (self.repository(), self.resolved_number()) {
            (Some(repository), Some(number)) => Some(IssueKey::Numbered { repository, number }),
            _ => self
                .html_url
                .as_ref()
                .filter(|u| !u.is_empty())
                .map(|u| IssueKey::Url(u.clone())),
        }
    }

    /// How many of the optional fields are populated. Used to pick between
    /// duplicates of the same issue.
    pub fn richness(&self) -> usize {
        [
            self.number.is_some(),
            self.title.is_some(),
            self.state.is_some(),
            self.user.is_some(),
            self.assignees.is_some(),
            self.labels.is_some(),
            self.created_at.is_some(),
            self.updated_at.is_some(),
            self.closed_at.is_some(),
            self.html_url.is_some(),
            self.repository_url.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Whether `self` should replace `other` as the kept copy of a duplicate.
    /// Author presence dominates; otherwise strictly more fields wins.
    pub fn is_richer_than(&self, other: &RawIssue) -> bool {
        match (self.author().is_some(), other.author().is_some()) {
            (true, false) => true,
            (false, true) => false,
            _ => self.richness() > other.richness(),
        }
    }
}

fn repository_from_api_url(api_url: &str) -> Option<String> {
    let url = Url::parse(api_url).ok()?;
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    let repos_at = segments.iter().position(|s| *s == "repos")?;
    match segments.get(repos_at + 1..) {
        Some([owner, name]) => Some(format!("{owner}/{name}")),
        _ => None,
    }
}

fn number_from_html_url(html_url: &str) -> Option<u64> {
    let url = Url::parse(html_url).ok()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let kind = segments.nth(2)?;
    let number = segments.next()?;
    match kind {
        "issues" | "pull" => number.parse().ok(),
        _ => None,
    }
}

fn skip_nulls<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items: Option<Vec<Option<T>>> = Option::deserialize(deserializer)?;
    Ok(items.map(|items| items.into_iter().flatten().collect()))
}

fn repository_from_html_url(html_url: &str) -> Option<String> {
    let url = Url::parse(html_url).ok()?;
    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());
    let owner = segments.next()?;
    let name = segments.next()?;
    Some(format!("{owner}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(number: u64, repo: &str) -> RawIssue {
        RawIssue {
            number: Some(number),
            repository_url: Some(format!("https://api.github.com/repos/{repo}")),
            html_url: Some(format!("https://github.com/{repo}/issues/{number}")),
            ..RawIssue::default()
        }
    }

    #[test]
    fn test_repository_from_api_url() {
        assert_eq!(raw(1, "rust-lang/rust").repository().as_deref(), Some("rust-lang/rust"));
    }

    #[test]
    fn test_repository_from_enterprise_api_url() {
        let issue = RawIssue {
            repository_url: Some("https://ghe.example.com/api/v3/repos/team/tool".to_string()),
            ..RawIssue::default()
        };
        assert_eq!(issue.repository().as_deref(), Some("team/tool"));
    }

    #[test]
    fn test_repository_falls_back_to_html_url() {
        let issue = RawIssue {
            html_url: Some("https://github.com/octo/repo/issues/7".to_string()),
            ..RawIssue::default()
        };
        assert_eq!(issue.repository().as_deref(), Some("octo/repo"));
    }

    #[test]
    fn test_identity_without_number_reads_it_from_url() {
        let bare = RawIssue {
            html_url: Some("https://github.com/octo/repo/issues/7".to_string()),
            ..RawIssue::default()
        };
        let numbered = raw(7, "octo/repo");

        assert_eq!(bare.resolved_number(), Some(7));
        assert_eq!(bare.identity(), numbered.identity());
        assert_eq!(bare.identity().unwrap().to_string(), "octo/repo#7");
    }

    #[test]
    fn test_identity_falls_back_to_url() {
        let issue = RawIssue {
            html_url: Some("https://github.com/octo/repo".to_string()),
            ..RawIssue::default()
        };
        assert_eq!(
            issue.identity(),
            Some(IssueKey::Url("https://github.com/octo/repo".to_string()))
        );
    }

    #[test]
    fn test_identity_missing_everything() {
        assert_eq!(RawIssue::default().identity(), None);
    }

    #[test]
    fn test_author_presence_dominates_richness() {
        let mut bare = raw(1, "a/b");
        bare.title = Some("t".to_string());
        bare.labels = Some(Vec::new());
        let mut with_author = raw(1, "a/b");
        with_author.user = Some(RawUser { login: "me".to_string() });

        assert!(with_author.is_richer_than(&bare));
        assert!(!bare.is_richer_than(&with_author));
    }

    #[test]
    fn test_decode_search_item_with_missing_fields() {
        let json = r#"{
            "number": 12,
            "title": "Crash on start",
            "state": "open",
            "html_url": "https://github.com/octo/repo/issues/12",
            "repository_url": "https://api.github.com/repos/octo/repo",
            "assignees": null,
            "labels": [{"name": "bug", "color": "d73a4a"}]
        }"#;
        let issue: RawIssue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.number, Some(12));
        assert!(issue.user.is_none());
        assert!(issue.assignees.is_none());
        assert_eq!(issue.labels.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_decode_tolerates_holes_in_nested_objects() {
        let json = r#"{
            "number": 3,
            "user": {"id": 1},
            "assignees": [null, {"login": "amy"}, {"id": 2}],
            "labels": [{"color": "ffffff"}, null, {"name": "bug"}]
        }"#;
        let issue: RawIssue = serde_json::from_str(json).unwrap();

        assert_eq!(issue.author(), None);
        let assignees: Vec<&str> = issue
            .assignees
            .iter()
            .flatten()
            .map(|u| u.login.as_str())
            .collect();
        assert_eq!(assignees, vec!["", "amy", ""]);
        let labels: Vec<&str> = issue.labels.iter().flatten().map(|l| l.name.as_str()).collect();
        assert_eq!(labels, vec!["", "bug"]);
    }

    #[test]
    fn test_empty_login_is_not_an_author() {
        let mut blank = raw(1, "a/b");
        blank.user = Some(RawUser { login: String::new() });
        let mut named = raw(1, "a/b");
        named.user = Some(RawUser { login: "me".to_string() });

        assert!(named.is_richer_than(&blank));
        assert!(!blank.is_richer_than(&named));
    }
}
