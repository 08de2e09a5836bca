//! Remote gist traversal
//!
//! Lists a user's gists, then fetches comments one gist at a time with a
//! fixed pause in between so the host's rate limits are respected.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use super::fetch::HttpFetch;
use super::types::{CommentRecord, GistRecord};
use crate::domain::{Comment, Gist};
use crate::error::NotifyError;

/// Fetches gists and their comments through an [`HttpFetch`]
pub struct GistSource {
    fetcher: Arc<dyn HttpFetch>,
    api_base_url: String,
    comment_delay: Duration,
}

impl GistSource {
    pub fn new(fetcher: Arc<dyn HttpFetch>, api_base_url: impl Into<String>, comment_delay: Duration) -> Self {
        let api_base_url = api_base_url.into();
        debug!(%api_base_url, ?comment_delay, "GistSource::new: called");
        Self {
            fetcher,
            api_base_url,
            comment_delay,
        }
    }

    /// URL of the gist listing for `user`, with `user` encoded as one path segment
    pub fn gists_url(&self, user: &str) -> Result<String, NotifyError> {
        if user.trim().is_empty() {
            return Err(NotifyError::Transport("GitHub user is empty".to_string()));
        }
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|e| NotifyError::Transport(format!("Invalid API base URL '{}': {}", self.api_base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| NotifyError::Transport(format!("API base URL '{}' cannot take a path", self.api_base_url)))?
            .pop_if_empty()
            .extend(["users", user, "gists"]);
        Ok(url.into())
    }

    /// Fetch every gist of `user`, with comments populated for those that have any
    ///
    /// Gists keep listing order. The first failed request aborts the whole call.
    pub async fn fetch_all(&self, user: &str) -> Result<Vec<Gist>, NotifyError> {
        debug!(%user, "GistSource::fetch_all: called");
        let url = self.gists_url(user)?;
        let records: Vec<GistRecord> = self.get(&url).await?;
        info!("Found {} gists for {}", records.len(), user);

        let mut gists = Vec::with_capacity(records.len());
        for record in records {
            let mut gist = record.into_gist(Vec::new());
            if gist.has_comments() {
                debug!(gist = %gist.url, count = gist.comment_count, "GistSource::fetch_all: fetching comments");
                gist.comments = self.fetch_comments(&gist.comments_url).await?;
            } else {
                debug!(gist = %gist.url, "GistSource::fetch_all: no comments, skipping");
            }
            gists.push(gist);
        }

        Ok(gists)
    }

    async fn fetch_comments(&self, comments_url: &str) -> Result<Vec<Comment>, NotifyError> {
        if !self.comment_delay.is_zero() {
            debug!(delay = ?self.comment_delay, "GistSource::fetch_comments: pausing for rate limit");
            tokio::time::sleep(self.comment_delay).await;
        }

        let records: Vec<CommentRecord> = self.get(comments_url).await?;
        records.into_iter().map(CommentRecord::into_comment).collect()
    }

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, NotifyError> {
        let value: Value = self.fetcher.get_json(url).await?;
        serde_json::from_value(value).map_err(|source| NotifyError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
