//! Relay client against a scripted in-process relay node

use anyhow::Result;
use relay_offers::config::RelayConfig;
use relay_offers::errors::RelayError;
use relay_offers::processor::{ExtractionOptions, OfferPipeline};
use relay_offers::relay::RelayClient;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::common::mock_relay::MockRelay;
use crate::common::{messages_json, native_message, text_message, TEST_TOPIC};

const ENCODED_TOPIC_PATH: &str = "/relay/v1/auto/messages/%2Fswap%2F1%2Fbtc-usdc%2Fproto";

fn client_for(relay: &MockRelay) -> RelayClient {
    let config = RelayConfig {
        url: relay.base_url.clone(),
        timeout_seconds: 5,
        max_retries: 2,
        initial_backoff_ms: 5,
        backoff_multiplier: 2.0,
        max_backoff_seconds: 1,
    };
    RelayClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_messages_decodes_relay_json() -> Result<()> {
    let body = format!(
        r#"[{{"payload":"{}","contentTopic":"{}","timestamp":1700000000000000000}}]"#,
        native_message("BTC", 1.0, "USDC", 65000.0).payload,
        TEST_TOPIC
    );
    let relay = MockRelay::start(move |request| {
        if request.method == "GET" && request.path == ENCODED_TOPIC_PATH {
            (200, body.clone())
        } else {
            (404, "not found".to_string())
        }
    })
    .await?;

    let messages = client_for(&relay).fetch_messages(TEST_TOPIC).await?;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content_topic, TEST_TOPIC);
    assert_eq!(messages[0].timestamp.as_deref(), Some("1700000000000000000"));
    assert_eq!(relay.requests()[0].path, ENCODED_TOPIC_PATH);
    Ok(())
}

#[tokio::test]
async fn test_subscribe_posts_topic_list() -> Result<()> {
    let relay = MockRelay::start(|_| (200, "OK".to_string())).await?;
    let topics = vec![TEST_TOPIC.to_string(), "/swap/1/eth-usdc/proto".to_string()];

    client_for(&relay).subscribe(&topics).await?;

    let requests = relay.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/relay/v1/auto/subscriptions");
    let sent: Vec<String> = serde_json::from_str(&requests[0].body)?;
    assert_eq!(sent, topics);
    Ok(())
}

#[tokio::test]
async fn test_publish_sends_message() -> Result<()> {
    let relay = MockRelay::start(|_| (200, "OK".to_string())).await?;
    let message = native_message("ETH", 2.0, "USDC", 6400.0);

    client_for(&relay).publish(&message).await?;

    let requests = relay.requests();
    assert_eq!(requests[0].path, "/relay/v1/auto/messages");
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body)?;
    assert_eq!(sent["payload"], message.payload.as_str());
    assert_eq!(sent["contentTopic"], TEST_TOPIC);
    Ok(())
}

#[tokio::test]
async fn test_server_errors_are_retried() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let relay = MockRelay::start(move |_| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            (503, "busy".to_string())
        } else {
            (200, "[]".to_string())
        }
    })
    .await?;

    let messages = client_for(&relay).fetch_messages(TEST_TOPIC).await?;

    assert!(messages.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn test_client_errors_fail_immediately() -> Result<()> {
    let relay = MockRelay::start(|_| (400, "bad topic".to_string())).await?;

    let err = client_for(&relay)
        .fetch_messages(TEST_TOPIC)
        .await
        .unwrap_err();

    match err {
        RelayError::RequestFailed { status, message, .. } => {
            assert_eq!(status, 400);
            assert_eq!(message, "bad topic");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(relay.requests().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_retries_are_capped() -> Result<()> {
    let relay = MockRelay::start(|_| (500, "down".to_string())).await?;

    let err = client_for(&relay)
        .fetch_messages(TEST_TOPIC)
        .await
        .unwrap_err();

    assert!(matches!(err, RelayError::MaxRetriesExceeded { .. }));
    // max_retries = 2: one attempt plus two retries
    assert_eq!(relay.requests().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_fetch_topics_keeps_topic_order() -> Result<()> {
    let first = messages_json(&[text_message("first", Some(1))]);
    let second = messages_json(&[text_message("second", Some(2))]);
    let relay = MockRelay::start(move |request| {
        if request.path.ends_with("%2Fa") {
            (200, first.clone())
        } else {
            (200, second.clone())
        }
    })
    .await?;

    let topics = vec!["/a".to_string(), "/b".to_string()];
    let messages = client_for(&relay).fetch_topics(&topics).await?;

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].timestamp.as_deref(), Some("1"));
    assert_eq!(messages[1].timestamp.as_deref(), Some("2"));
    Ok(())
}

#[tokio::test]
async fn test_fetched_messages_feed_the_pipeline() -> Result<()> {
    let body = messages_json(&[
        native_message("BTC", 1.0, "USDC", 65000.0),
        text_message(r#"{"offer":{"fromAsset":"ETH","fromAmount":1,"toAsset":"USDC","toAmount":3000},"maker":"bob"}"#, Some(5)),
        text_message("gm", Some(6)),
    ]);
    let relay = MockRelay::start(move |_| (200, body.clone())).await?;

    let messages = client_for(&relay).fetch_messages(TEST_TOPIC).await?;
    let tabs = OfferPipeline::new(ExtractionOptions::new("alice", false))
        .run(&messages)
        .partition();

    assert_eq!(tabs.mine.len(), 1);
    assert_eq!(tabs.mine[0].rate, "65000.00");
    assert_eq!(tabs.others.len(), 1);
    assert_eq!(tabs.others[0].from_asset, "ETH");
    Ok(())
}
