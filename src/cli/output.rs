//! Offer listing output
//!
//! Table output for people watching a topic, JSON for piping into other tools.

use crate::errors::AppResult;
use crate::processor::PartitionedOffers;
use crate::types::{ExtractedOffer, ExtractionStats, StatisticsCollector};
use crate::utils::currency::format_leg;
use crate::utils::time::format_timestamp_nanos;
use clap::ValueEnum;
use serde::Serialize;
use std::collections::BTreeMap;

/// Output format for offer listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables, "mine" first
    #[default]
    Table,
    /// One JSON document with both tabs and the pass statistics
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OffersReport<'a> {
    mine: &'a [ExtractedOffer],
    others: &'a [ExtractedOffer],
    stats: StatsReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    messages_seen: usize,
    filtered_by_topic: usize,
    decode_failures: usize,
    missing_timestamp: usize,
    json_payloads: usize,
    excluded: usize,
    offers_extracted: usize,
    mine: usize,
    others: usize,
    by_shape: BTreeMap<&'static str, usize>,
    extraction_rate: f64,
    duration_ms: u64,
    messages_per_second: f64,
}

impl From<&ExtractionStats> for StatsReport {
    fn from(stats: &ExtractionStats) -> Self {
        Self {
            messages_seen: stats.messages_seen,
            filtered_by_topic: stats.filtered_by_topic,
            decode_failures: stats.decode_failures,
            missing_timestamp: stats.missing_timestamp,
            json_payloads: stats.json_payloads,
            excluded: stats.excluded,
            offers_extracted: stats.offers_extracted,
            mine: stats.mine,
            others: stats.others,
            by_shape: stats
                .by_shape
                .iter()
                .map(|(shape, count)| (shape.as_str(), *count))
                .collect(),
            extraction_rate: stats.extraction_rate(),
            duration_ms: stats.duration().as_millis() as u64,
            messages_per_second: stats.processing_rate(),
        }
    }
}

/// Render one pass: "mine" tab, "others" tab, then statistics
pub fn format_offers(
    offers: &PartitionedOffers,
    stats: &ExtractionStats,
    format: OutputFormat,
) -> AppResult<String> {
    match format {
        OutputFormat::Table => {
            let mut output = String::new();
            push_tab(&mut output, "Mine", &offers.mine);
            output.push('\n');
            push_tab(&mut output, "Others", &offers.others);
            output.push_str(&format!(
                "\nStatistics:\n  Messages seen:     {}\n  Filtered by topic: {}\n  Decode failures:   {}\n  Missing timestamp: {}\n  Excluded:          {}\n  Offers extracted:  {} ({:.1}%)\n  Duration:          {:.3}s ({:.1} msg/s)\n",
                stats.messages_seen,
                stats.filtered_by_topic,
                stats.decode_failures,
                stats.missing_timestamp,
                stats.excluded,
                stats.offers_extracted,
                stats.extraction_rate(),
                stats.duration().as_secs_f64(),
                stats.processing_rate()
            ));
            for (shape, count) in &stats.by_shape {
                output.push_str(&format!("    {:<12} {}\n", shape.as_str(), count));
            }
            Ok(output)
        }
        OutputFormat::Json => {
            let report = OffersReport {
                mine: &offers.mine,
                others: &offers.others,
                stats: StatsReport::from(stats),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

fn push_tab(output: &mut String, title: &str, offers: &[ExtractedOffer]) {
    output.push_str(&format!("{} ({})\n", title, offers.len()));
    if offers.is_empty() {
        output.push_str("  (none)\n");
        return;
    }

    output.push_str(&format!(
        "  {:<24} {:<20} {:<20} {:<14} {:<20} {}\n",
        "KEY", "FROM", "TO", "RATE", "TIME", "SHAPE"
    ));
    for offer in offers {
        let time = offer
            .timestamp_nanos
            .map(format_timestamp_nanos)
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "  {:<24} {:<20} {:<20} {:<14} {:<20} {}{}\n",
            offer.key,
            format_leg(&offer.from_amount, &offer.from_asset),
            format_leg(&offer.to_amount, &offer.to_asset),
            offer.rate,
            time,
            offer.shape,
            if offer.is_valid_json { "" } else { " (text)" }
        ));
    }
}
