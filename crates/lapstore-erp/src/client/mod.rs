//! HTTP client for the ERP item endpoints.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::ErpError;
use crate::retry::{fetch_with_retry, RetryPolicy};
use crate::types::{parse_item_list, RawItem};

/// Path of the item list under the ERP item controller.
const ITEM_LIST_PATH: &str = "itemList";

/// Client for the ERP inventory API.
///
/// Every request goes through [`fetch_with_retry`], so transient failures
/// (429, 5xx, connection errors) are retried before an error surfaces.
pub struct ErpClient {
    client: Client,
    retry: RetryPolicy,
}

impl ErpClient {
    /// Creates a client with the given timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ErpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str, retry: RetryPolicy) -> Result<Self, ErpError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, retry })
    }

    /// Builds the `itemList` URL under an item-controller base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ErpError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute URL.
    pub fn item_list_url(base_url: &str) -> Result<String, ErpError> {
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| ErpError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let url = base
            .join(ITEM_LIST_PATH)
            .map_err(|e| ErpError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;
        Ok(url.to_string())
    }

    /// Fetches `url` and returns the body text exactly as sent.
    ///
    /// # Errors
    ///
    /// - [`ErpError::Http`] — transport failure after all retries.
    /// - [`ErpError::UnexpectedStatus`] — non-2xx status (after retries for
    ///   429/5xx, immediately for other 4xx).
    pub async fn fetch_body(&self, url: &str) -> Result<String, ErpError> {
        let response = fetch_with_retry(&self.client, url, self.retry).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ErpError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches `url` and parses the body as JSON, without checking its shape.
    ///
    /// # Errors
    ///
    /// Everything [`ErpClient::fetch_body`] returns, plus
    /// [`ErpError::Deserialize`] when the body is not valid JSON.
    pub async fn fetch_payload(&self, url: &str) -> Result<Value, ErpError> {
        let body = self.fetch_body(url).await?;
        parse_json(url, &body)
    }

    /// Fetches an item-list envelope from `url` and returns its raw items.
    ///
    /// # Errors
    ///
    /// Everything [`ErpClient::fetch_payload`] returns, plus
    /// [`ErpError::MalformedPayload`] when the JSON has no `data` array.
    pub async fn fetch_item_list(&self, url: &str) -> Result<Vec<RawItem>, ErpError> {
        let payload = self.fetch_payload(url).await?;
        parse_item_list(url, &payload)
    }
}

pub(crate) fn parse_json(url: &str, body: &str) -> Result<Value, ErpError> {
    serde_json::from_str(body).map_err(|e| ErpError::Deserialize {
        context: url.to_owned(),
        source: e,
    })
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
