use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the issue tracker. Always fatal for a run.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication rejected (status {status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// A single record missing or carrying unusable fields. Recovered locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed record {issue}: {field} {detail}")]
pub struct MalformedRecord {
    pub issue: String,
    pub field: &'static str,
    pub detail: String,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Inconsistent aggregate data: {0}")]
    Inconsistent(String),

    #[error("Failed to format document: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("Failed to encode sort table: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Fetching issues failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Rendering report failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to publish report to {path}: {source}")]
    PublishFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No GitHub token found. Set GITHUB_TOKEN or GH_TOKEN, or add token to ~/.config/issue-dashboard/config.toml"
    )]
    MissingToken,
}

pub type Result<T> = std::result::Result<T, DashboardError>;

pub type FetchResult<T> = std::result::Result<T, FetchError>;
