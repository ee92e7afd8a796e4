use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use crate::types::IssueStatus;

/// Global output settings, set once from the command line.
static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Print rows as a table (terminal mode only)
pub fn print_table<R: Tabled>(rows: Vec<R>) {
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{table}");
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) -> serde_json::Result<()> {
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        display(item);
    }
    Ok(())
}

/// Print a success message (skipped with --quiet; a simple object in JSON mode)
pub fn print_message(message: &str) {
    if is_quiet() {
        return;
    }
    if is_json_output() {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

/// Format status with its report color
pub fn status_colored(status: IssueStatus) -> String {
    match status {
        IssueStatus::Open => status.label().green().bold().to_string(),
        IssueStatus::Closed => status.label().magenta().bold().to_string(),
    }
}

/// Text bar proportional to `count / max`, for terminal trend output
pub fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    let filled = (count * width).div_ceil(max).min(width);
    "█".repeat(filled)
}
