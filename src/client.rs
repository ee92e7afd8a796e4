use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::MAX_RESULTS;
use crate::error::{FetchError, FetchResult};
use crate::responses::{ApiErrorBody, SearchResponse, ViewerResponse};
use crate::types::RawIssue;

const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!("issue-dashboard/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Read access to an issue tracker's search.
pub trait IssueSearch {
    /// Login of the identity the credential belongs to.
    async fn viewer_login(&self) -> FetchResult<String>;

    /// Run one search query, paging until `limit` records or the results run out.
    async fn search_issues(&self, query: &str, limit: usize) -> FetchResult<Vec<RawIssue>>;
}

pub struct GitHubClient {
    http: Client,
    token: String,
    api_url: Url,
}

impl GitHubClient {
    pub fn new(token: String, api_url: &str) -> FetchResult<Self> {
        let parsed =
            Url::parse(api_url).map_err(|_| FetchError::InvalidUrl(api_url.to_string()))?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            http,
            token,
            api_url: parsed,
        })
    }

    /// Join `path` onto the API root, keeping any prefix such as `/api/v3`.
    fn endpoint(&self, path: &str) -> FetchResult<Url> {
        let base = self.api_url.as_str().trim_end_matches('/');
        let joined = format!("{base}/{path}");
        Url::parse(&joined).map_err(|_| FetchError::InvalidUrl(joined))
    }

    fn search_url(&self, query: &str, page: usize) -> FetchResult<Url> {
        let mut url = self.endpoint("search/issues")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("per_page", &PER_PAGE.to_string())
            .append_pair("page", &page.to_string());
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        log::debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read response body>".to_string());
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);

            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FetchError::Unauthorized {
                    status: status.as_u16(),
                    message,
                },
                _ => FetchError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        Ok(response.json().await?)
    }
}

impl IssueSearch for GitHubClient {
    async fn viewer_login(&self) -> FetchResult<String> {
        let viewer: ViewerResponse = self.get(self.endpoint("user")?).await?;
        Ok(viewer.login)
    }

    async fn search_issues(&self, query: &str, limit: usize) -> FetchResult<Vec<RawIssue>> {
        let limit = limit.min(MAX_RESULTS);
        let mut items: Vec<RawIssue> = Vec::new();
        let mut page = 1;

        loop {
            let response: SearchResponse = self.get(self.search_url(query, page)?).await?;
            if response.incomplete_results {
                log::warn!("Search for '{query}' returned incomplete results (page {page})");
            }

            let received = response.items.len();
            let total_count = response.total_count;
            items.extend(response.into_records());

            if !has_next_page(page, received, total_count, items.len(), limit) {
                break;
            }
            page += 1;
        }

        items.truncate(limit);
        log::debug!("Search '{query}' yielded {} records", items.len());
        Ok(items)
    }
}

/// Whether another page is worth requesting after `page` returned `received`
/// items and `collected` are held in total.
fn has_next_page(
    page: usize,
    received: usize,
    total_count: u64,
    collected: usize,
    limit: usize,
) -> bool {
    let seen = page * PER_PAGE;
    received == PER_PAGE
        && collected < limit
        && seen < MAX_RESULTS
        && (seen as u64) < total_count
}
