//! Pipeline-wide properties: round-trip, idempotence, classifier monotonicity

use relay_offers::processor::{classify_ownership, extract_offers, is_my_offer, ExtractionOptions};
use relay_offers::types::{Amount, OwnershipRule, RawMessage};

use crate::common::{native_message, text_message, TEST_TOPIC};

#[test]
fn test_native_offers_round_trip() {
    let cases = [
        ("BTC", 1.0, "USDC", 65000.0),
        ("eth", 0.25, "usdc", 812.5),
        ("Veri", 1000.0, "btc", 0.00042),
        ("usdc", 12.75, "ETH", 0.004),
    ];

    for (from_asset, from_amount, to_asset, to_amount) in cases {
        let message = native_message(from_asset, from_amount, to_asset, to_amount);
        let offers = extract_offers(&[message], &ExtractionOptions::new("", false));

        assert_eq!(offers.len(), 1, "{} -> {}", from_asset, to_asset);
        let offer = &offers[0];
        assert_eq!(offer.from_asset, from_asset.to_uppercase());
        assert_eq!(offer.to_asset, to_asset.to_uppercase());
        assert_eq!(offer.from_amount, Amount::Value(from_amount));
        assert_eq!(offer.to_amount, Amount::Value(to_amount));
    }
}

#[test]
fn test_round_tripped_native_offer_is_mine_without_handle() {
    let offers = extract_offers(
        &[native_message("BTC", 1.0, "USDC", 65000.0)],
        &ExtractionOptions::new("", false),
    );
    assert!(offers[0].is_my_offer);
}

#[test]
fn test_extraction_is_idempotent() {
    let messages = vec![
        native_message("BTC", 1.0, "USDC", 65000.0),
        text_message("bob: 3 ETH for 9000 USDC", Some(7)),
        text_message(r#"{"from":{"asset":"ETH","amount":2},"to":{"asset":"USDC","amount":6000}}"#, Some(8)),
        RawMessage::new("not base64!", TEST_TOPIC).with_timestamp("9"),
    ];

    for debug in [false, true] {
        let options = ExtractionOptions::new("bob", debug);
        let first = extract_offers(&messages, &options);
        let second = extract_offers(&messages, &options);
        assert_eq!(first, second, "debug = {}", debug);
    }
}

#[test]
fn test_idempotence_without_timestamps_differs_only_in_key() {
    let messages = vec![text_message(r#"{"fromAsset":"BTC","fromAmount":1,"toAsset":"USDC","toAmount":2}"#, None)];
    let options = ExtractionOptions::new("", false);

    let mut first = extract_offers(&messages, &options);
    let mut second = extract_offers(&messages, &options);
    assert!(first[0].key.ends_with("-0"));
    assert!(second[0].key.ends_with("-0"));
    assert_eq!(first[0].payload_digest, second[0].payload_digest);

    first[0].key.clear();
    second[0].key.clear();
    assert_eq!(first, second);
}

#[test]
fn test_handle_rules_win_regardless_of_schema() {
    let handle = "alice";
    let payloads = [
        // Rule 1 inside a foreign schema
        r#"{"offer":{"fromAsset":"BTC"},"maker":"alice","id":7}"#,
        // Rule 2 as a key
        r#"{"alice":{"fromAsset":"BTC"},"type":"swap"}"#,
        // Rule 3 chat prefix, not JSON at all
        "alice: anyone selling VERI?",
    ];

    for payload in payloads {
        assert!(is_my_offer(payload, handle), "{}", payload);
        assert_ne!(
            classify_ownership(payload, handle),
            Some(OwnershipRule::NativeSchema),
            "{}",
            payload
        );
    }
}

#[test]
fn test_handle_rules_are_reported_in_order() {
    assert_eq!(
        classify_ownership(r#"{"maker":"alice"}"#, "alice"),
        Some(OwnershipRule::QuotedHandle)
    );
    assert_eq!(
        classify_ownership(r#"{bob_alice":1}"#, "alice"),
        Some(OwnershipRule::HandleKey)
    );
    assert_eq!(
        classify_ownership("alice: hi", "alice"),
        Some(OwnershipRule::ChatPrefix)
    );
}
