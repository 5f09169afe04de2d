use super::{HarvestError, RecordKind};
use crate::config::HarvestConfig;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

const USER_AGENT: &str = concat!("hiring-funnel/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 60;
const RETRY_DELAY_MS: u64 = 2_000;

/// One page of raw records for a collection. Pages are numbered from 1 and an empty page
/// marks the end of the collection.
pub trait PageSource {
    fn fetch_page(
        &self,
        kind: RecordKind,
        page: u32,
    ) -> impl Future<Output = Result<Vec<Value>, HarvestError>> + Send;
}

/// Basic-auth Harvest client with bounded retry on throttling and server errors.
pub struct HarvestClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    per_page: u32,
    max_attempts: u32,
    retry_delay: Duration,
}

impl HarvestClient {
    pub fn new(config: &HarvestConfig, token: impl Into<String>) -> Result<Self, HarvestError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(HarvestError::Http)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            token: token.into(),
            per_page: config.per_page,
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        })
    }

    fn page_url(&self, kind: RecordKind, page: u32) -> String {
        format!(
            "{}/{}?per_page={}&page={}",
            self.base_url,
            kind.path(),
            self.per_page,
            page
        )
    }

    async fn request_page(&self, url: &str) -> Result<Vec<Value>, Attempt> {
        let response = self
            .http
            .get(url)
            .basic_auth(&self.token, Some(""))
            .send()
            .await
            .map_err(|err| Attempt::Retry(HarvestError::Http(err)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = HarvestError::Status {
                status: status.as_u16(),
                body,
            };
            return if status.as_u16() == 429 || status.is_server_error() {
                Err(Attempt::Retry(err))
            } else {
                Err(Attempt::Fatal(err))
            };
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|err| Attempt::Fatal(HarvestError::Http(err)))
    }
}

enum Attempt {
    Retry(HarvestError),
    Fatal(HarvestError),
}

impl PageSource for HarvestClient {
    async fn fetch_page(&self, kind: RecordKind, page: u32) -> Result<Vec<Value>, HarvestError> {
        let url = self.page_url(kind, page);
        let mut attempt = 1;

        loop {
            tracing::debug!(url = %url, attempt, "requesting Harvest page");
            match self.request_page(&url).await {
                Ok(records) => return Ok(records),
                Err(Attempt::Fatal(err)) => return Err(err),
                Err(Attempt::Retry(err)) if attempt >= self.max_attempts => return Err(err),
                Err(Attempt::Retry(err)) => {
                    tracing::warn!(
                        kind = kind.path(),
                        page,
                        attempt,
                        error = %err,
                        "Harvest request failed, retrying"
                    );
                    tokio::time::sleep(self.retry_delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
