//! Fixtures shared by unit tests.

use std::cell::RefCell;

use chrono::{DateTime, Utc};

use crate::client::IssueSearch;
use crate::error::{FetchError, FetchResult};
use crate::types::{Issue, IssueStatus, Label, RawIssue, RawLabel, RawUser};

/// In-memory search: queries containing `author:` get the authored set,
/// everything else the assigned set.
pub struct StubSearch {
    viewer: String,
    authored: Vec<RawIssue>,
    assigned: Vec<RawIssue>,
    fail_status: Option<u16>,
    queries: RefCell<Vec<String>>,
}

impl StubSearch {
    pub fn new(viewer: &str, authored: Vec<RawIssue>, assigned: Vec<RawIssue>) -> Self {
        Self {
            viewer: viewer.to_string(),
            authored,
            assigned,
            fail_status: None,
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::new("nobody", Vec::new(), Vec::new())
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.borrow().clone()
    }

    fn error(status: u16) -> FetchError {
        if status == 401 || status == 403 {
            FetchError::Unauthorized {
                status,
                message: "Bad credentials".to_string(),
            }
        } else {
            FetchError::Api {
                status,
                message: "Server error".to_string(),
            }
        }
    }
}

impl IssueSearch for StubSearch {
    async fn viewer_login(&self) -> FetchResult<String> {
        match self.fail_status {
            Some(status) => Err(Self::error(status)),
            None => Ok(self.viewer.clone()),
        }
    }

    async fn search_issues(&self, query: &str, limit: usize) -> FetchResult<Vec<RawIssue>> {
        self.queries.borrow_mut().push(query.to_string());
        if let Some(status) = self.fail_status {
            return Err(Self::error(status));
        }

        let set = if query.contains("author:") {
            &self.authored
        } else {
            &self.assigned
        };
        Ok(set.iter().take(limit).cloned().collect())
    }
}

pub fn raw_issue(repo: &str, number: u64) -> RawIssue {
    RawIssue {
        number: Some(number),
        title: Some(format!("Issue {number} in {repo}")),
        state: Some("open".to_string()),
        user: Some(RawUser {
            login: "octocat".to_string(),
        }),
        assignees: Some(Vec::new()),
        labels: Some(vec![RawLabel {
            name: "bug".to_string(),
            color: Some("d73a4a".to_string()),
        }]),
        created_at: Some("2026-09-01T10:00:00Z".to_string()),
        updated_at: Some("2026-09-02T10:00:00Z".to_string()),
        closed_at: None,
        html_url: Some(format!("https://github.com/{repo}/issues/{number}")),
        repository_url: Some(format!("https://api.github.com/repos/{repo}")),
    }
}

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().unwrap()
}

pub fn issue(repo: &str, number: u64, status: IssueStatus, created: &str) -> Issue {
    Issue {
        number,
        repository: repo.to_string(),
        title: format!("Issue {number}"),
        status,
        author: "octocat".to_string(),
        assignees: Vec::new(),
        labels: vec![Label {
            name: "bug".to_string(),
            color: "d73a4a".to_string(),
        }],
        created_at: Some(at(created)),
        updated_at: Some(at(created)),
        closed_at: None,
        url: format!("https://github.com/{repo}/issues/{number}"),
    }
}
