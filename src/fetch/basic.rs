use super::client::HttpClient;
use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

/// Plain `reqwest` client with a request timeout.
pub struct BasicClient(reqwest::Client);

impl BasicClient {
    pub fn new() -> Self {
        Self(build_or_default(
            reqwest::Client::builder().timeout(Duration::from_secs(30)),
        ))
    }
}

impl Default for BasicClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds the configured client, falling back to an untimed default on failure.
fn build_or_default(builder: reqwest::ClientBuilder) -> reqwest::Client {
    builder.build().unwrap_or_else(|e| {
        warn!(error = %e, "HTTP client build failed, using defaults without timeout");
        reqwest::Client::new()
    })
}

#[async_trait]
impl HttpClient for BasicClient {
    async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        self.0.execute(req).await
    }
}
