use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::{DashboardError, Result};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_OUTPUT: &str = "index.html";
pub const DEFAULT_TITLE: &str = "GitHub Issues Dashboard";

/// Upper bound the search API will page through for a single query.
pub const MAX_RESULTS: usize = 1000;

#[derive(Deserialize, Default, Debug)]
pub struct Config {
    pub token: Option<String>,
    pub user: Option<String>,
    pub output: Option<PathBuf>,
    pub limit: Option<usize>,
    pub api_url: Option<String>,
    pub title: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| DashboardError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents).map_err(|e| DashboardError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "issue-dashboard")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(DashboardError::NoConfigDir)
    }

    /// Get token with env vars taking precedence over config file
    pub fn token(&self) -> Result<String> {
        for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
            if let Ok(token) = std::env::var(var) {
                if !token.trim().is_empty() {
                    return Ok(token);
                }
            }
        }

        self.token.clone().ok_or(DashboardError::MissingToken)
    }

    /// Get user, preferring explicit argument over config. `None` means
    /// "whoever the token belongs to".
    pub fn resolve_user(&self, explicit: Option<&str>) -> Option<String> {
        explicit.map(String::from).or_else(|| self.user.clone())
    }

    pub fn resolve_output(&self, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    pub fn resolve_limit(&self, explicit: Option<usize>) -> usize {
        explicit
            .or(self.limit)
            .unwrap_or(MAX_RESULTS)
            .clamp(1, MAX_RESULTS)
    }

    pub fn resolve_title(&self, explicit: Option<&str>) -> String {
        explicit
            .map(String::from)
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }
}
