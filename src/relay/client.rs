use crate::config::RelayConfig;
use crate::errors::{RelayError, RelayResult};
use crate::relay::retry::{retry_with_backoff, RetryPolicy};
use crate::types::RawMessage;
use futures::future::join_all;
use reqwest::{Method, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

const RELAY_API_PREFIX: [&str; 3] = ["relay", "v1", "auto"];

/// HTTP client for a relay node's REST API
///
/// Every call goes through the retry policy; transport failures and 5xx
/// responses are retried, 4xx responses are returned as-is.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    base_url: Url,
    retry: RetryPolicy,
    timeout_seconds: u64,
}

impl RelayClient {
    pub fn new(config: &RelayConfig) -> RelayResult<Self> {
        let base_url = Url::parse(&config.url)
            .map_err(|e| RelayError::InvalidUrl(format!("{}: {}", config.url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RelayError::InvalidUrl(config.url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                RelayError::ConnectionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url,
            retry: RetryPolicy::from(config),
            timeout_seconds: config.timeout_seconds,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Ask the relay to start caching messages for these topics
    pub async fn subscribe(&self, topics: &[String]) -> RelayResult<()> {
        let url = self.endpoint(&["subscriptions"])?;
        self.send_json(Method::POST, url, topics).await?;
        info!("Subscribed to {} content topic(s)", topics.len());
        Ok(())
    }

    /// Messages the relay currently holds for one content topic
    pub async fn fetch_messages(&self, topic: &str) -> RelayResult<Vec<RawMessage>> {
        let url = self.endpoint(&["messages", topic])?;
        let operation = format!("GET {}", url.path());

        let body = retry_with_backoff(&self.retry, &operation, || {
            let url = url.clone();
            async move { self.execute(self.http.request(Method::GET, url)).await }
        })
        .await?;

        let messages: Vec<RawMessage> = serde_json::from_str(&body)
            .map_err(|e| RelayError::DeserialisationFailed(format!("{}: {}", operation, e)))?;
        debug!("Fetched {} message(s) for topic {}", messages.len(), topic);
        Ok(messages)
    }

    /// Fetch several topics concurrently, concatenated in topic order
    pub async fn fetch_topics(&self, topics: &[String]) -> RelayResult<Vec<RawMessage>> {
        let results = join_all(topics.iter().map(|topic| self.fetch_messages(topic))).await;

        let mut messages = Vec::new();
        for result in results {
            messages.extend(result?);
        }
        Ok(messages)
    }

    /// Publish one message to its content topic
    pub async fn publish(&self, message: &RawMessage) -> RelayResult<()> {
        let url = self.endpoint(&["messages"])?;
        self.send_json(Method::POST, url, message).await?;
        info!("Published message to {}", message.content_topic);
        Ok(())
    }

    /// Base URL extended with the relay API prefix and `segments`
    ///
    /// Segments are percent-encoded, so a topic like `/swap/1/x/proto`
    /// stays a single path segment.
    fn endpoint(&self, segments: &[&str]) -> RelayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RelayError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(RELAY_API_PREFIX)
            .extend(segments);
        Ok(url)
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> RelayResult<String> {
        let operation = format!("{} {}", method, url.path());
        let payload = serde_json::to_vec(body)
            .map_err(|e| RelayError::DeserialisationFailed(format!("{}: {}", operation, e)))?;

        retry_with_backoff(&self.retry, &operation, || {
            let request = self
                .http
                .request(method.clone(), url.clone())
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(payload.clone());
            async move { self.execute(request).await }
        })
        .await
    }

    /// Send a request and return the body of a 2xx response
    async fn execute(&self, request: reqwest::RequestBuilder) -> RelayResult<String> {
        let request = request
            .build()
            .map_err(|e| RelayError::InvalidUrl(e.to_string()))?;
        let method = request.method().to_string();
        let path = request.url().path().to_string();

        let response = self.http.execute(request).await.map_err(|e| {
            if e.is_timeout() {
                RelayError::Timeout {
                    timeout_seconds: self.timeout_seconds,
                    operation: format!("{} {}", method, path),
                }
            } else {
                RelayError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::ConnectionFailed(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(RelayError::RequestFailed {
                method,
                path,
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(body)
    }
}
