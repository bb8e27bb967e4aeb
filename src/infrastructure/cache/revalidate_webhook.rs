use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    cache::{CacheError, PageCache},
    constants::REVALIDATE_SECRET_HEADER,
};

/// Asks the website to re-render a path by POSTing `{"path": ...}` to its
/// revalidation endpoint.
#[derive(Debug, Clone)]
pub struct RevalidateWebhook {
    client: Client,
    url: String,
    secret: Option<String>,
}

impl RevalidateWebhook {
    pub fn new(url: &str, secret: Option<String>) -> Result<Self, CacheError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| CacheError::Config(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
            secret,
        })
    }
}

#[async_trait]
impl PageCache for RevalidateWebhook {
    fn backend(&self) -> &'static str {
        "webhook"
    }

    async fn invalidate(&self, path: &str) -> Result<(), CacheError> {
        let mut request = self.client
            .post(&self.url)
            .json(&serde_json::json!({ "path": path }));

        if let Some(secret) = &self.secret {
            request = request.header(REVALIDATE_SECRET_HEADER, secret);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CacheError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CacheError::Rejected(status.as_u16()));
        }

        Ok(())
    }
}
