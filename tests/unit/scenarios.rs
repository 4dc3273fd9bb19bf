//! End-to-end extraction scenarios over encoded relay messages

use relay_offers::processor::{extract_offers, ExtractionOptions, OfferPipeline};
use relay_offers::types::{Amount, OfferShape, RawMessage};

use crate::common::{text_message, FLAT_OFFER_JSON, TEST_TOPIC};

fn strict(handle: &str) -> ExtractionOptions {
    ExtractionOptions::new(handle, false)
}

#[test]
fn test_flat_offer_without_handle_is_not_mine_when_native_rule_disabled() {
    let messages = vec![text_message(FLAT_OFFER_JSON, Some(1))];
    let options = strict("alice").with_native_schema_is_mine(false);
    let offers = extract_offers(&messages, &options);

    assert_eq!(offers.len(), 1);
    let offer = &offers[0];
    assert_eq!(offer.from_asset, "BTC");
    assert_eq!(offer.from_amount, Amount::Value(1.0));
    assert_eq!(offer.to_asset, "USDC");
    assert_eq!(offer.to_amount, Amount::Value(65000.0));
    assert_eq!(offer.rate, "65000.00");
    assert!(!offer.is_my_offer);
    assert!(offer.is_valid_json);
    assert_eq!(offer.shape, OfferShape::Flat);
}

#[test]
fn test_flat_offer_without_handle_is_mine_by_native_schema() {
    let messages = vec![text_message(FLAT_OFFER_JSON, Some(1))];
    let offers = extract_offers(&messages, &strict("alice"));

    assert_eq!(offers.len(), 1);
    assert!(offers[0].is_my_offer);
    assert_eq!(offers[0].rate, "65000.00");
}

#[test]
fn test_flat_offer_missing_to_amount_is_excluded() {
    let text = r#"{"fromAsset":"BTC","fromAmount":1,"toAsset":"USDC","timestamp":1700000000000}"#;
    let results = OfferPipeline::new(strict("alice")).run(&[text_message(text, Some(1))]);

    assert!(results.offers.is_empty());
    assert_eq!(results.stats.excluded, 1);
}

#[test]
fn test_chat_text_in_debug_mode_is_scraped() {
    let messages = vec![text_message("alice sent 2 BTC for 130000 USDC", Some(1_700_000_000_000_000_000))];
    let offers = extract_offers(&messages, &ExtractionOptions::new("alice", true));

    assert_eq!(offers.len(), 1);
    let offer = &offers[0];
    assert_eq!(offer.from_asset, "BTC");
    assert_eq!(offer.to_asset, "USDC");
    assert_eq!(offer.from_amount, Amount::Value(2.0));
    assert_eq!(offer.to_amount, Amount::Value(130000.0));
    assert!(!offer.is_valid_json);
    assert_eq!(offer.shape, OfferShape::TextScrape);
    assert_eq!(offer.rate, "65000.00");
    // "alice sent" does not follow the `alice:` chat prefix convention
    assert!(!offer.is_my_offer);
}

#[test]
fn test_chat_text_in_strict_mode_is_excluded() {
    let messages = vec![text_message("alice: 2 BTC for 130000 USDC", Some(1))];
    assert!(extract_offers(&messages, &strict("alice")).is_empty());
}

#[test]
fn test_nested_offer_with_symbol_objects() {
    let text = r#"{"offer":{"fromAsset":{"symbol":"eth"},"fromAmount":"1.5","toAsset":"usdc","toAmount":"4800"}}"#;
    let offers = extract_offers(&[text_message(text, Some(1))], &strict("alice"));

    assert_eq!(offers.len(), 1);
    let offer = &offers[0];
    assert_eq!(offer.shape, OfferShape::NestedOffer);
    assert_eq!(offer.from_asset, "ETH");
    assert_eq!(offer.to_asset, "USDC");
    assert_eq!(offer.from_amount, Amount::Value(1.5));
    assert_eq!(offer.to_amount, Amount::Value(4800.0));
    assert_eq!(offer.rate, "3200.00");
    // `"offer"` is a foreign-schema marker
    assert!(!offer.is_my_offer);
}

#[test]
fn test_from_to_shape() {
    let text = r#"{"from":{"asset":"veri","amount":250},"to":{"asset":"eth","amount":"0.05"},"maker":"bob"}"#;
    let offers = extract_offers(&[text_message(text, Some(1))], &strict("alice"));

    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].shape, OfferShape::FromTo);
    assert_eq!(offers[0].from_asset, "VERI");
    assert_eq!(offers[0].to_asset, "ETH");
    assert_eq!(offers[0].rate, "0.0002");
}

#[test]
fn test_foreign_offer_naming_handle_is_mine() {
    let text = r#"{"offer":{"fromAsset":"BTC","fromAmount":1,"toAsset":"USDC","toAmount":60000},"maker":"alice"}"#;
    let offers = extract_offers(&[text_message(text, Some(1))], &strict("alice"));
    assert!(offers[0].is_my_offer);
}

#[test]
fn test_debug_mode_fills_placeholders_for_incomplete_json() {
    let text = r#"{"fromAsset":"btc","toAsset":"usdc"}"#;
    let offers = extract_offers(&[text_message(text, Some(1))], &ExtractionOptions::new("", true));

    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].from_asset, "BTC");
    assert_eq!(offers[0].from_amount, Amount::Unknown);
    assert_eq!(offers[0].to_amount, Amount::Unknown);
    assert_eq!(offers[0].rate, "N/A");
}

#[test]
fn test_mixed_stream_partitions_in_order() {
    let messages = vec![
        text_message(r#"{"fromAsset":"ETH","fromAmount":1,"toAsset":"USDC","toAmount":3000,"user":"alice"}"#, Some(3)),
        text_message(r#"{"fromAsset":"ETH","fromAmount":2,"toAsset":"USDC","toAmount":6100,"user":"bob"}"#, Some(2)),
        RawMessage::new("@@@", TEST_TOPIC).with_timestamp("1"),
        text_message(r#"{"fromAsset":"BTC","fromAmount":1,"toAsset":"USDC","toAmount":64000,"user":"carol"}"#, Some(1)),
    ];
    let results = OfferPipeline::new(strict("alice")).run(&messages);
    assert_eq!(results.stats.decode_failures, 1);

    let tabs = results.partition();
    let mine: Vec<&str> = tabs.mine.iter().map(|o| o.key.as_str()).collect();
    let others: Vec<&str> = tabs.others.iter().map(|o| o.key.as_str()).collect();

    assert_eq!(mine, vec!["3-0"]);
    assert_eq!(others, vec!["2-1", "1-3"]);
}
