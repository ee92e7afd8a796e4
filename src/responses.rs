//! Response envelopes of the REST endpoints the client calls.

use serde::Deserialize;
use serde_json::Value;

use crate::types::RawIssue;

/// One page of `GET /search/issues`.
#[derive(Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    #[serde(default)]
    pub items: Vec<Value>,
}

impl SearchResponse {
    /// Decode each item on its own, so a record of the wrong shape costs only
    /// itself and not the rest of the page.
    pub fn into_records(self) -> Vec<RawIssue> {
        self.items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value::<RawIssue>(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping undecodable search result #{index}: {e}");
                    None
                }
            })
            .collect()
    }
}

/// `GET /user` (the token's owner).
#[derive(Deserialize)]
pub struct ViewerResponse {
    pub login: String,
}

/// Error body the API returns alongside non-2xx statuses.
#[derive(Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
