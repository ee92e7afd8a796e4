use std::path::PathBuf;

use chrono::{DateTime, Utc};

use super::common::collect;
use crate::cli::GenerateArgs;
use crate::client::IssueSearch;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::report::{self, ReportMeta};

/// Resolved inputs for one `generate` run.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    pub user: Option<String>,
    pub limit: usize,
    pub output: PathBuf,
    pub title: String,
}

impl GenerateSettings {
    pub fn resolve(config: &Config, args: GenerateArgs) -> Self {
        Self {
            user: config.resolve_user(args.user.as_deref()),
            limit: config.resolve_limit(args.limit),
            output: config.resolve_output(args.output),
            title: config.resolve_title(args.title.as_deref()),
        }
    }
}

/// Fetch, aggregate, render and publish. The output file is only touched
/// once a complete document exists.
pub async fn run<S: IssueSearch>(
    source: &S,
    settings: &GenerateSettings,
    now: DateTime<Utc>,
) -> Result<()> {
    let collected = collect(source, settings.user.as_deref(), settings.limit, now).await?;

    let meta = ReportMeta {
        title: settings.title.clone(),
        user: collected.user.clone(),
    };
    let document = report::render(&collected.issues, &collected.summary, &meta)?;
    report::publish(&settings.output, &document)?;

    output::print_message(&format!(
        "Dashboard generated: {} ({} issues, {} open, {} closed)",
        settings.output.display(),
        collected.summary.total,
        collected.summary.open,
        collected.summary.closed
    ));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DashboardError, FetchError};
    use crate::testing::{at, raw_issue, StubSearch};

    fn settings(output: PathBuf) -> GenerateSettings {
        GenerateSettings {
            user: Some("octocat".to_string()),
            limit: 1000,
            output,
            title: "Issues".to_string(),
        }
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_published_report_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        let previous = b"<html>previous good report</html>".to_vec();
        std::fs::write(&path, &previous).unwrap();

        let stub = StubSearch::failing(500);
        let result = run(&stub, &settings(path.clone()), at("2026-10-16T12:00:00Z")).await;

        assert!(matches!(
            result,
            Err(DashboardError::Fetch(FetchError::Api { status: 500, .. }))
        ));
        assert_eq!(std::fs::read(&path).unwrap(), previous);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_auth_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");

        let stub = StubSearch::failing(401);
        let result = run(&stub, &settings(path.clone()), at("2026-10-16T12:00:00Z")).await;

        assert!(matches!(
            result,
            Err(DashboardError::Fetch(FetchError::Unauthorized { .. }))
        ));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_generate_writes_report_with_each_issue_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        let stub = StubSearch::new(
            "octocat",
            vec![raw_issue("octo/a", 1), raw_issue("octo/a", 2)],
            vec![raw_issue("octo/a", 2)],
        );

        run(&stub, &settings(path.clone()), at("2026-10-16T12:00:00Z"))
            .await
            .unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        let all = &html[html.find("id=\"table-all\"").unwrap()..];
        assert_eq!(all.matches("data-number=\"2\"").count(), 1);
        assert!(html.contains("<h3>Total Issues</h3>\n      <div class=\"number\">2</div>"));
    }

    #[tokio::test]
    async fn test_missing_assignees_render_unassigned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        let mut record = raw_issue("octo/a", 7);
        record.assignees = None;
        let stub = StubSearch::new("octocat", vec![record], Vec::new());

        run(&stub, &settings(path.clone()), at("2026-10-16T12:00:00Z"))
            .await
            .unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<span class=\"unassigned\">Unassigned</span>"));
    }
}
