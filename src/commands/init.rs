use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::{Config, DEFAULT_OUTPUT};
use crate::error::{DashboardError, Result};

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Issue Dashboard Configuration");
    println!("=============================\n");

    let token = prompt(
        "Enter a GitHub personal access token (leave empty to rely on GITHUB_TOKEN/GH_TOKEN): ",
    )?;
    let user =
        prompt("Enter the GitHub user to report on [optional, defaults to the token's owner]: ")?;
    let output = prompt(&format!("Output file [{DEFAULT_OUTPUT}]: "))?;

    let contents = render_config(&token, &user, &output);

    write_config(&config_path, &contents)?;

    println!("\nConfig saved to {}", config_path.display());
    if token.is_empty() {
        println!("No token stored; export GITHUB_TOKEN before running 'issue-dashboard generate'.");
    }
    println!("Note: use a personal token. Other credentials report on whoever they belong to.");

    Ok(())
}

fn write_config(path: &Path, contents: &str) -> Result<()> {
    let failed = |source: io::Error| DashboardError::ConfigWrite {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(failed)?;
    }
    std::fs::write(path, contents).map_err(failed)
}

/// TOML for the answers given; empty answers are left out.
fn render_config(token: &str, user: &str, output: &str) -> String {
    let mut table = toml::Table::new();
    for (key, value) in [("token", token), ("user", user), ("output", output)] {
        if !value.is_empty() {
            let _ = table.insert(key.to_string(), toml::Value::String(value.to_string()));
        }
    }
    table.to_string()
}
