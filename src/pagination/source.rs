//! HTTP page source
//!
//! Fetches pages from `GET {endpoint}?index=..&count=..[&filters]`.

use super::types::{PageRequest, PageSource};
use crate::config::FeedConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::debug;

/// Page source backed by the pictures collection endpoint
#[derive(Debug)]
pub struct HttpPageSource<T> {
    client: HttpClient,
    endpoint: String,
    _item: PhantomData<fn() -> T>,
}

impl<T> HttpPageSource<T> {
    /// Create a source for `endpoint` using an existing client
    pub fn new(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            _item: PhantomData,
        }
    }

    /// Build client and source from a feed configuration
    pub fn from_feed(feed: &FeedConfig) -> Result<Self> {
        let client = HttpClient::with_config(HttpClientConfig::from_feed(feed))?;
        Ok(Self::new(client, feed.endpoint.clone()))
    }

    /// Collection endpoint path
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl<T> PageSource for HttpPageSource<T>
where
    T: DeserializeOwned + Send,
{
    type Item = T;

    async fn fetch_page(&self, request: &PageRequest) -> Result<Vec<T>> {
        let config = RequestConfig::new().query_pairs(request.to_query());
        let body: Value = self
            .client
            .get_json_with_config(&self.endpoint, config)
            .await?;

        let items = match body {
            // The API answers `null` when a page has nothing to show
            Value::Null => Vec::new(),
            Value::Array(records) => records
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<T>, _>>()?,
            other => {
                return Err(Error::decode(format!(
                    "expected an array of records, got {}",
                    json_kind(&other)
                )))
            }
        };

        debug!(
            cursor = request.cursor,
            count = items.len(),
            "Fetched page from {}",
            self.endpoint
        );
        Ok(items)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
