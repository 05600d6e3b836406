use crate::{
    context::Fetched,
    error::FetchError,
};
use eyre::Result;
use reqwest::Client as HttpClient;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// Upper bound for a single request, connection set-up included.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves JSON documents, turning every failure into a logged failure marker.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http_client: HttpClient,
    timeout: Duration,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http_client, timeout })
    }

    /// GETs `url` and decodes the body. Errors are logged and yield `None`.
    pub async fn fetch(&self, url: &Url) -> Fetched {
        match self.try_fetch(url).await {
            Ok(value) => Some(value),
            Err(error) => {
                error!(%url, %error, "Error connecting");
                None
            }
        }
    }

    async fn try_fetch(&self, url: &Url) -> Result<Value, FetchError> {
        let response = self
            .http_client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
