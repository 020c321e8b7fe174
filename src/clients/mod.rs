/// Collaborator launch API client
use crate::domain::LaunchCollection;
use crate::errors::{ApiError, ApiResult};
use crate::filters::PreviousQuery;
use reqwest::Client;
use std::time::Duration;

/// HTTP client wrapper with common configuration
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("launch-tracker/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// Client for the collaborator launch-schedule API. Failures never escape
/// as panics; a non-success status and an undecodable body are reported
/// identically.
pub struct LaunchClient {
    http_client: HttpClient,
    base_url: String,
}

impl LaunchClient {
    pub fn new(base_url: String) -> ApiResult<Self> {
        Ok(Self {
            http_client: HttpClient::new()?,
            base_url,
        })
    }

    /// Fetch the upcoming launch collection.
    pub async fn fetch_upcoming(&self) -> ApiResult<LaunchCollection> {
        let url = format!("{}/api/launches", self.base_url);
        let resp = self.http_client.get_client().get(&url).send().await?;
        decode(resp).await
    }

    /// Fetch previous launches, filtered server-side by the query.
    pub async fn fetch_previous(&self, query: &PreviousQuery) -> ApiResult<LaunchCollection> {
        let url = format!("{}/api/previous", self.base_url);
        let resp = self
            .http_client
            .get_client()
            .get(&url)
            .query(&[
                ("lsp__name", query.provider.as_str()),
                ("location__ids", query.location_id.as_str()),
            ])
            .send()
            .await?;
        decode(resp).await
    }
}

async fn decode(resp: reqwest::Response) -> ApiResult<LaunchCollection> {
    if !resp.status().is_success() {
        return Err(ApiError::NetworkOrDecode(format!(
            "request failed with status {}",
            resp.status()
        )));
    }
    resp.json::<LaunchCollection>()
        .await
        .map_err(|e| ApiError::NetworkOrDecode(e.to_string()))
}
