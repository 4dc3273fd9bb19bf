//! Saved message files through the CLI input and output layers

use anyhow::Result;
use relay_offers::cli::commands::extract::load_messages;
use relay_offers::cli::commands::post::build_offer;
use relay_offers::cli::output::{format_offers, OutputFormat};
use relay_offers::processor::{ExtractionOptions, OfferPipeline};
use std::io::Write;

use crate::common::{messages_json, text_message, FLAT_OFFER_JSON, TEST_TOPIC};

#[test]
fn test_file_to_json_report() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(
        messages_json(&[
            text_message(FLAT_OFFER_JSON, Some(1_700_000_000_000_000_000)),
            text_message("carol: 1 ETH for 3000 USDC", Some(1_700_000_000_000_000_001)),
        ])
        .as_bytes(),
    )?;

    let messages = load_messages(file.path())?;
    let results = OfferPipeline::new(ExtractionOptions::new("carol", true)).run(&messages);
    let stats = results.stats.clone();
    let report = format_offers(&results.partition(), &stats, OutputFormat::Json)?;
    let value: serde_json::Value = serde_json::from_str(&report)?;

    let mine = value["mine"].as_array().unwrap();
    assert_eq!(mine.len(), 2);
    assert_eq!(mine[0]["rate"], "65000.00");
    assert_eq!(mine[1]["isValidJSON"], false);
    assert_eq!(mine[1]["shape"], "textScrape");
    assert_eq!(value["stats"]["messagesSeen"], 2);
    Ok(())
}

#[test]
fn test_envelope_file_with_topic_filter() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    let body = format!(
        r#"{{"messages":{}}}"#,
        messages_json(&[
            text_message(FLAT_OFFER_JSON, Some(1)),
            relay_offers::types::RawMessage::from_text(FLAT_OFFER_JSON, "/elsewhere", Some(2)),
        ])
    );
    file.write_all(body.as_bytes())?;

    let messages = load_messages(file.path())?;
    let options = ExtractionOptions::new("", false).with_content_topic(TEST_TOPIC);
    let results = OfferPipeline::new(options).run(&messages);

    assert_eq!(results.offers.len(), 1);
    assert_eq!(results.stats.filtered_by_topic, 1);

    let table = format_offers(&results.clone().partition(), &results.stats, OutputFormat::Table)?;
    assert!(table.contains("Mine (1)"));
    assert!(table.contains("Others (0)"));
    Ok(())
}

#[test]
fn test_posted_offer_is_read_back_as_mine() -> Result<()> {
    let offer = build_offer("eth", 2.0, "usdc", 6400.0, 1_700_000_000_000)?;
    let message = offer.to_raw_message(TEST_TOPIC)?;

    let offers = OfferPipeline::new(ExtractionOptions::new("", false))
        .run(&[message])
        .offers;

    assert_eq!(offers.len(), 1);
    assert!(offers[0].is_my_offer);
    assert_eq!(offers[0].from_asset, "ETH");
    assert_eq!(offers[0].rate, "3200.00");
    assert_eq!(offers[0].timestamp_nanos, Some(1_700_000_000_000_000_000));
    Ok(())
}
