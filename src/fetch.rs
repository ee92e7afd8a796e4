use std::collections::HashMap;

use crate::client::IssueSearch;
use crate::error::FetchResult;
use crate::types::{IssueKey, RawIssue, RawUser};

/// Raw records for one user, already deduplicated.
#[derive(Debug)]
pub struct FetchedIssues {
    /// The identity the searches ran for.
    pub user: String,
    pub records: Vec<RawIssue>,
}

/// Fetch issues authored by or assigned to `user` (or the credential's owner
/// when `user` is `None`). Any upstream error aborts the whole fetch.
pub async fn fetch_issues<S: IssueSearch>(
    source: &S,
    user: Option<&str>,
    limit: usize,
) -> FetchResult<FetchedIssues> {
    let user = match user {
        Some(user) => user.to_string(),
        None => {
            let login = source.viewer_login().await?;
            log::info!("Token belongs to '{login}'; reporting on that user");
            login
        }
    };

    log::info!("Fetching issues authored by {user}...");
    let mut authored = source
        .search_issues(&format!("is:issue author:{user}"), limit)
        .await?;
    for record in &mut authored {
        if record.author().is_none() {
            record.user = Some(RawUser {
                login: user.clone(),
            });
        }
    }

    log::info!("Fetching issues assigned to {user}...");
    let assigned = source
        .search_issues(&format!("is:issue assignee:{user}"), limit)
        .await?;

    log::info!(
        "Fetched {} authored and {} assigned records",
        authored.len(),
        assigned.len()
    );

    let records = merge_unique(authored, assigned);
    Ok(FetchedIssues { user, records })
}

/// Union of both sets keyed by issue identity, in first-seen order. When a
/// record shows up twice the richer copy is kept.
pub fn merge_unique(authored: Vec<RawIssue>, assigned: Vec<RawIssue>) -> Vec<RawIssue> {
    let mut merged: Vec<RawIssue> = Vec::with_capacity(authored.len() + assigned.len());
    let mut index: HashMap<IssueKey, usize> = HashMap::new();

    for record in authored.into_iter().chain(assigned) {
        let Some(key) = record.identity() else {
            log::warn!(
                "Dropping record without repository, number or URL: {}",
                record.title.as_deref().unwrap_or("<untitled>")
            );
            continue;
        };

        match index.get(&key) {
            Some(&at) => {
                if record.is_richer_than(&merged[at]) {
                    merged[at] = record;
                }
            }
            None => {
                index.insert(key, merged.len());
                merged.push(record);
            }
        }
    }

    merged
}
