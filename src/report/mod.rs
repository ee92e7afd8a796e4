//! Self-contained HTML dashboard: summary cards, charts and three sortable
//! issue tables. Everything is inline; viewing the file needs no network.

mod assets;
mod charts;

use std::fmt::Write;
use std::io::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;
use url::Url;

use crate::error::{DashboardError, RenderError, Result};
use crate::sort::{self, Column, SortStates, TableId};
use crate::types::{AggregateSummary, Issue, TREND_MONTHS};

const DEFAULT_SITE: &str = "https://github.com";
const DEFAULT_TABLE: TableId = TableId::All;

/// What the report is about, beyond the data itself.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub title: String,
    pub user: String,
}

/// Render the full document. Fails only on inconsistent aggregates; record
/// level gaps get placeholders.
pub fn render(
    issues: &[Issue],
    summary: &AggregateSummary,
    meta: &ReportMeta,
) -> std::result::Result<String, RenderError> {
    validate(issues, summary)?;

    let mut out = String::with_capacity(16 * 1024 + issues.len() * 3 * 1024);
    generate(issues, summary, meta, &mut out)?;
    Ok(out)
}

/// Cross-check the summary against the issue set before anything is written.
pub fn validate(
    issues: &[Issue],
    summary: &AggregateSummary,
) -> std::result::Result<(), RenderError> {
    if summary.open + summary.closed != summary.total {
        return Err(RenderError::Inconsistent(format!(
            "open ({}) + closed ({}) != total ({})",
            summary.open, summary.closed, summary.total
        )));
    }

    if summary.total != issues.len() {
        return Err(RenderError::Inconsistent(format!(
            "summary total {} but {} issues",
            summary.total,
            issues.len()
        )));
    }

    if summary.months.len() != TREND_MONTHS {
        return Err(RenderError::Inconsistent(format!(
            "trend covers {} months, expected {TREND_MONTHS}",
            summary.months.len()
        )));
    }

    let chronological = summary
        .months
        .windows(2)
        .all(|pair| (pair[0].year, pair[0].month) < (pair[1].year, pair[1].month));
    if !chronological {
        return Err(RenderError::Inconsistent("trend months out of order".to_string()));
    }

    let trend_total: usize = summary.months.iter().map(|m| m.total()).sum();
    if trend_total > summary.total {
        return Err(RenderError::Inconsistent(format!(
            "trend counts {trend_total} issues but total is {}",
            summary.total
        )));
    }

    Ok(())
}

/// Replace `path` with `document` atomically: write a sibling temp file, then
/// rename it over the target. On any error the old file is left as it was.
pub fn publish(path: &Path, document: &str) -> Result<()> {
    let failed = |source: std::io::Error| DashboardError::PublishFailed {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(failed)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(failed)?;
    tmp.write_all(document.as_bytes()).map_err(failed)?;
    tmp.as_file().sync_all().map_err(failed)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))
            .map_err(failed)?;
    }

    let _ = tmp.persist(path).map_err(|e| failed(e.error))?;
    log::info!("Report written to {}", path.display());
    Ok(())
}

fn generate<W: Write>(
    issues: &[Issue],
    summary: &AggregateSummary,
    meta: &ReportMeta,
    writer: &mut W,
) -> std::result::Result<(), RenderError> {
    let now = summary.generated_at;
    let states = SortStates::default();

    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html lang=\"en\">")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "  <meta charset=\"UTF-8\">")?;
    writeln!(
        writer,
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(writer, "  <title>{}</title>", html_escape(&meta.title))?;
    writeln!(writer, "  <style>{}</style>", assets::STYLES)?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;
    writeln!(writer, "<div class=\"container\">")?;

    write_header(writer, meta, now, issues)?;
    write_summary(writer, summary)?;
    write_charts(writer, summary)?;
    write_controls(writer, issues)?;

    for table in TableId::ALL {
        write_table(writer, table, &states, issues, now)?;
    }

    writeln!(
        writer,
        "  <div class=\"footer\">Generated by issue-dashboard v{}</div>",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(writer, "</div>")?;
    writeln!(writer, "<script>{}</script>", assets::SCRIPT)?;
    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;

    Ok(())
}

fn write_header<W: Write>(
    writer: &mut W,
    meta: &ReportMeta,
    now: DateTime<Utc>,
    issues: &[Issue],
) -> std::fmt::Result {
    let site = issues.first().map_or_else(|| DEFAULT_SITE.to_string(), |i| site_root(&i.url));

    writeln!(writer, "  <div class=\"panel header\">")?;
    writeln!(writer, "    <h1>{}</h1>", html_escape(&meta.title))?;
    writeln!(
        writer,
        "    <div class=\"subtitle\">Issues authored by or assigned to <a href=\"{}/{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></div>",
        html_escape(&site),
        html_escape(&meta.user),
        html_escape(&meta.user)
    )?;
    writeln!(
        writer,
        "    <div class=\"last-updated\">Last updated: {}</div>",
        now.format("%B %d, %Y at %H:%M UTC")
    )?;
    writeln!(writer, "  </div>")
}

fn write_summary<W: Write>(writer: &mut W, summary: &AggregateSummary) -> std::fmt::Result {
    writeln!(writer, "  <div class=\"stats\">")?;
    for (title, count) in [
        ("Total Issues", summary.total),
        ("Open Issues", summary.open),
        ("Closed Issues", summary.closed),
    ] {
        writeln!(writer, "    <div class=\"panel stat-card\">")?;
        writeln!(writer, "      <h3>{title}</h3>")?;
        writeln!(writer, "      <div class=\"number\">{count}</div>")?;
        writeln!(writer, "    </div>")?;
    }
    writeln!(writer, "  </div>")
}

fn write_charts<W: Write>(writer: &mut W, summary: &AggregateSummary) -> std::fmt::Result {
    writeln!(writer, "  <div class=\"charts\">")?;
    writeln!(writer, "    <div class=\"panel\">")?;
    writeln!(writer, "      <h2>Open vs Closed</h2>")?;
    charts::write_distribution_chart(writer, summary.open, summary.closed)?;
    writeln!(writer, "    </div>")?;
    writeln!(writer, "    <div class=\"panel\">")?;
    writeln!(writer, "      <h2>Issues Created (Last 12 Months)</h2>")?;
    charts::write_trend_chart(writer, &summary.months)?;
    writeln!(writer, "    </div>")?;
    writeln!(writer, "  </div>")
}

fn write_controls<W: Write>(writer: &mut W, issues: &[Issue]) -> std::fmt::Result {
    writeln!(writer, "  <div class=\"panel controls\">")?;
    writeln!(
        writer,
        "    <input type=\"text\" class=\"search-bar\" id=\"search-input\" placeholder=\"Search by title, repository, author or label...\">"
    )?;
    for table in TableId::ALL {
        let count = issues.iter().filter(|i| table.includes(i)).count();
        let active = if table == DEFAULT_TABLE { " active" } else { "" };
        writeln!(
            writer,
            "    <button class=\"tab-btn{active}\" data-table=\"{}\">{} ({count})</button>",
            table.id(),
            table.label()
        )?;
    }
    writeln!(writer, "  </div>")
}

/// Rows are written in the table's current order and carry one rank per
/// column; the script re-sorts by those ranks and never compares cell text.
fn write_table<W: Write>(
    writer: &mut W,
    table: TableId,
    states: &SortStates,
    issues: &[Issue],
    now: DateTime<Utc>,
) -> std::result::Result<(), RenderError> {
    let state = states.get(table);
    let mut rows: Vec<&Issue> = issues.iter().filter(|i| table.includes(i)).collect();
    sort::sort_rows(&mut rows, state, now);

    let ranks: Vec<(Column, Vec<usize>)> = Column::ALL
        .into_iter()
        .map(|column| (column, sort::column_ranks(&rows, column, now)))
        .collect();
    let transitions = serde_json::to_string(&sort::transitions(table))?;

    let active = if table == DEFAULT_TABLE { " active" } else { "" };
    let id = table.id();

    writeln!(writer, "  <div class=\"panel table-panel{active}\" id=\"panel-{id}\">")?;
    writeln!(
        writer,
        "    <table class=\"issues\" id=\"table-{id}\" data-table=\"{id}\" data-sort-state=\"{}\" data-transitions=\"{}\">",
        html_escape(&state.key()),
        html_escape(&transitions)
    )?;
    writeln!(writer, "      <thead>")?;
    writeln!(writer, "        <tr>")?;
    for column in Column::ALL {
        writeln!(
            writer,
            "          <th class=\"sortable\" data-column=\"{}\">{}</th>",
            column.id(),
            column.header()
        )?;
    }
    writeln!(writer, "        </tr>")?;
    writeln!(writer, "      </thead>")?;
    writeln!(writer, "      <tbody>")?;
    for (position, issue) in rows.iter().enumerate() {
        write_row(writer, position, &ranks, issue, now)?;
    }
    writeln!(writer, "      </tbody>")?;
    writeln!(writer, "    </table>")?;
    if rows.is_empty() {
        writeln!(writer, "    <p class=\"empty\">No {} issues.</p>", table.label().to_lowercase())?;
    }
    writeln!(writer, "  </div>")?;
    Ok(())
}

fn write_row<W: Write>(
    writer: &mut W,
    position: usize,
    ranks: &[(Column, Vec<usize>)],
    issue: &Issue,
    now: DateTime<Utc>,
) -> std::fmt::Result {
    let url = html_escape(&issue.url);
    let site = site_root(&issue.url);
    let status = issue.status.as_str();

    write!(
        writer,
        "        <tr class=\"status-{status}\" data-rank=\"{position}\" data-number=\"{}\"",
        issue.number
    )?;
    for (column, column_ranks) in ranks {
        write!(writer, " data-rank-{}=\"{}\"", column.id(), column_ranks[position])?;
    }
    writeln!(writer, ">")?;

    writeln!(
        writer,
        "          <td><a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">#{}</a></td>",
        issue.number
    )?;
    writeln!(
        writer,
        "          <td class=\"issue-title\"><a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></td>",
        html_escape(&issue.title)
    )?;
    writeln!(
        writer,
        "          <td><a class=\"repo-badge\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></td>",
        html_escape(&format!("{site}/{}", issue.repository)),
        html_escape(&issue.repository)
    )?;
    writeln!(
        writer,
        "          <td><span class=\"status-badge status-{status}\">{}</span></td>",
        issue.status.label()
    )?;
    writeln!(writer, "          <td>{}</td>", profile_link(&site, &issue.author))?;

    if issue.assignees.is_empty() {
        writeln!(
            writer,
            "          <td><span class=\"unassigned\">{}</span></td>",
            html_escape(&issue.assignee_display())
        )?;
    } else {
        let links: Vec<String> = issue.assignees.iter().map(|a| profile_link(&site, a)).collect();
        writeln!(writer, "          <td>{}</td>", links.join(", "))?;
    }

    write!(writer, "          <td>")?;
    for label in &issue.labels {
        write!(
            writer,
            "<span class=\"label\" style=\"background-color: #{}; color: {};\">{}</span>",
            html_escape(&label.color),
            label_text_color(&label.color),
            html_escape(&label.name)
        )?;
    }
    writeln!(writer, "</td>")?;

    write_date_cell(writer, issue.created_at, now)?;
    write_date_cell(writer, issue.updated_at, now)?;
    writeln!(writer, "        </tr>")
}

/// Missing dates show the run time, marked as a placeholder.
fn write_date_cell<W: Write>(
    writer: &mut W,
    date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> std::fmt::Result {
    match date {
        Some(date) => writeln!(writer, "          <td>{}</td>", date.format("%Y-%m-%d")),
        None => writeln!(
            writer,
            "          <td><span class=\"placeholder\" title=\"date unavailable\">{}</span></td>",
            now.format("%Y-%m-%d")
        ),
    }
}

fn profile_link(site: &str, login: &str) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        html_escape(&format!("{site}/{login}")),
        html_escape(login)
    )
}

/// Scheme and host of an issue URL, e.g. `https://github.com`.
fn site_root(issue_url: &str) -> String {
    Url::parse(issue_url)
        .ok()
        .map(|u| u.origin().ascii_serialization())
        .filter(|origin| origin != "null")
        .unwrap_or_else(|| DEFAULT_SITE.to_string())
}

/// Dark text on light label colors, white on dark ones.
fn label_text_color(hex: &str) -> &'static str {
    let channel = |at: usize| {
        hex.get(at..at + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .map_or(0.0, f64::from)
    };
    let luminance = (0.299 * channel(0) + 0.587 * channel(2) + 0.114 * channel(4)) / 255.0;
    if luminance > 0.6 { "#1f2328" } else { "#ffffff" }
}

fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summarize;
    use crate::testing::{at, issue};
    use crate::types::IssueStatus;

    fn meta() -> ReportMeta {
        ReportMeta {
            title: "GitHub Issues Dashboard".to_string(),
            user: "octocat".to_string(),
        }
    }

    fn sample() -> Vec<Issue> {
        vec![
            issue("octo/a", 2, IssueStatus::Open, "2026-09-01T00:00:00Z"),
            issue("octo/a", 10, IssueStatus::Closed, "2026-08-01T00:00:00Z"),
            issue("octo/b", 1, IssueStatus::Open, "2026-10-01T00:00:00Z"),
        ]
    }

    fn render_sample(issues: &[Issue]) -> String {
        let summary = summarize(issues, at("2026-10-16T12:00:00Z"));
        render(issues, &summary, &meta()).unwrap()
    }

    #[test]
    fn test_html_escape_all_special_chars() {
        assert_eq!(html_escape("<>&\"'"), "&lt;&gt;&amp;&quot;&#39;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_render_contains_three_tables_and_cards() {
        let out = render_sample(&sample());

        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("id=\"table-open\""));
        assert!(out.contains("id=\"table-closed\""));
        assert!(out.contains("id=\"table-all\""));
        assert!(out.contains("<h3>Total Issues</h3>\n      <div class=\"number\">3</div>"));
        assert!(out.contains("<h3>Open Issues</h3>\n      <div class=\"number\">2</div>"));
        assert!(out.contains("<h3>Closed Issues</h3>\n      <div class=\"number\">1</div>"));
        assert!(out.contains("Open (2)"));
        assert!(out.contains("Closed (1)"));
        assert!(out.contains("All (3)"));
        assert_eq!(out.matches("<th class=\"sortable\"").count(), 27);
    }

    #[test]
    fn test_render_is_self_contained() {
        let out = render_sample(&sample());
        assert!(!out.contains("<script src"));
        assert!(!out.contains("<link rel=\"stylesheet\""));
        assert!(out.contains("<svg class=\"chart trend-chart\""));
        assert!(out.contains("<svg class=\"chart distribution-chart\""));
        assert!(out.contains("function handleHeaderClick(tableId, column)"));
    }

    #[test]
    fn test_rows_render_in_default_order() {
        let out = render_sample(&sample());
        let all = &out[out.find("id=\"table-all\"").unwrap()..];
        let first = all.find("data-number=\"1\"").unwrap();
        let second = all.find("data-number=\"2\"").unwrap();
        let third = all.find("data-number=\"10\"").unwrap();
        assert!(first < second && second < third);
    }

    fn row<'a>(out: &'a str, table: &str, number: u64) -> &'a str {
        let start = out.find(&format!("id=\"table-{table}\"")).unwrap();
        let marker = format!("data-number=\"{number}\"");
        out[start..]
            .lines()
            .find(|line| line.contains("<tr ") && line.contains(&marker))
            .unwrap()
    }

    #[test]
    fn test_rows_carry_numeric_column_ranks() {
        let out = render_sample(&sample());

        assert!(row(&out, "all", 1).contains("data-rank=\"0\""));
        assert!(row(&out, "all", 1).contains("data-rank-number=\"0\""));
        assert!(row(&out, "all", 2).contains("data-rank-number=\"1\""));
        assert!(row(&out, "all", 10).contains("data-rank-number=\"2\""));
    }

    #[test]
    fn test_tied_rows_share_a_rank() {
        let out = render_sample(&sample());

        assert!(row(&out, "all", 10).contains("data-rank-status=\"0\""));
        assert!(row(&out, "all", 1).contains("data-rank-status=\"1\""));
        assert!(row(&out, "all", 2).contains("data-rank-status=\"1\""));
    }

    #[test]
    fn test_ranks_are_per_table() {
        let out = render_sample(&sample());

        assert!(row(&out, "closed", 10).contains("data-rank-number=\"0\""));
        assert!(row(&out, "open", 2).contains("data-rank-number=\"1\""));
        assert!(row(&out, "all", 10).contains("data-rank-number=\"2\""));
    }

    #[test]
    fn test_tables_carry_state_and_transitions() {
        let out = render_sample(&sample());

        assert_eq!(out.matches("data-sort-state=\"default\"").count(), 3);
        assert!(out.contains("&quot;title:asc&quot;:{&quot;"));
        assert!(!out.contains("localeCompare"));
    }

    #[test]
    fn test_unassigned_and_links() {
        let out = render_sample(&sample());
        assert!(out.contains("<span class=\"unassigned\">Unassigned</span>"));
        assert!(out.contains("href=\"https://github.com/octo/a/issues/2\""));
        assert!(out.contains("href=\"https://github.com/octo/a\""));
        assert!(out.contains("href=\"https://github.com/octocat\""));
    }

    #[test]
    fn test_titles_are_escaped() {
        let mut issues = sample();
        issues[0].title = "<script>alert('x')</script>".to_string();
        let out = render_sample(&issues);
        assert!(!out.contains("<script>alert"));
        assert!(out.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
    }

    #[test]
    fn test_missing_dates_use_placeholder() {
        let mut issues = sample();
        issues[0].created_at = None;
        issues[0].labels.clear();
        let out = render_sample(&issues);
        assert!(out.contains("title=\"date unavailable\">2026-10-16</span>"));
    }

    #[test]
    fn test_validate_rejects_inconsistent_counts() {
        let issues = sample();
        let mut summary = summarize(&issues, at("2026-10-16T12:00:00Z"));
        summary.open += 1;
        assert!(matches!(render(&issues, &summary, &meta()), Err(RenderError::Inconsistent(_))));
    }

    #[test]
    fn test_validate_rejects_mismatched_issue_count() {
        let issues = sample();
        let summary = summarize(&issues[..2], at("2026-10-16T12:00:00Z"));
        assert!(validate(&issues, &summary).is_err());
    }

    #[test]
    fn test_validate_rejects_short_window() {
        let issues = sample();
        let mut summary = summarize(&issues, at("2026-10-16T12:00:00Z"));
        let _ = summary.months.pop();
        assert!(validate(&issues, &summary).is_err());
    }

    #[test]
    fn test_render_empty_set() {
        let out = render_sample(&[]);
        assert!(out.contains("No open issues."));
        assert!(out.contains("</html>"));
    }

    #[test]
    fn test_label_text_color() {
        assert_eq!(label_text_color("ffffff"), "#1f2328");
        assert_eq!(label_text_color("000000"), "#ffffff");
    }

    #[test]
    fn test_site_root() {
        assert_eq!(site_root("https://ghe.example.com/a/b/issues/1"), "https://ghe.example.com");
        assert_eq!(site_root("not a url"), DEFAULT_SITE);
    }

    #[test]
    fn test_publish_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site").join("index.html");

        publish(&path, "first").unwrap();
        publish(&path, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(std::fs::read_dir(path.parent().unwrap()).unwrap().count(), 1);
    }
}
