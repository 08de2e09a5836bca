//! HttpFetch trait and reqwest implementation

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::config::GithubConfig;
use crate::error::NotifyError;

/// Media type pinning the v3 REST API
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Fetch a JSON document from a URL
///
/// Implementations return `NotifyError::Remote` for any status other than
/// 200 and never retry.
#[async_trait]
pub trait HttpFetch: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, NotifyError>;
}

/// GitHub REST client backed by reqwest
pub struct ReqwestFetcher {
    http: Client,
}

impl ReqwestFetcher {
    /// Create a client from configuration
    ///
    /// Picks up an API token from `config.token_env` when set.
    pub fn from_config(config: &GithubConfig) -> Result<Self, NotifyError> {
        debug!(user_agent = %config.user_agent, timeout_ms = config.timeout_ms, "ReqwestFetcher::from_config: called");
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| NotifyError::Transport(format!("Invalid user agent: {}", e)))?,
        );

        if let Some(token) = config.token() {
            debug!(token_env = %config.token_env, "ReqwestFetcher::from_config: using API token");
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| NotifyError::Transport(format!("Invalid API token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        } else {
            debug!("ReqwestFetcher::from_config: no API token, using anonymous access");
        }

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, NotifyError> {
        debug!(%url, "ReqwestFetcher::get_json: called");
        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            debug!(%status, "ReqwestFetcher::get_json: non-success status");
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|source| NotifyError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
