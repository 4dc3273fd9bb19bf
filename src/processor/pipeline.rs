//! One extraction pass over a list of relay messages
//!
//! A pass is a pure function of (messages, options) apart from the wall-clock
//! key fallback for untimestamped messages. Nothing survives between passes:
//! every poll result is processed from scratch into a fresh offer list, so
//! overlapping passes need no coordination.

use crate::decoder::{decode_payload, payload_digest};
use crate::processor::extraction::{extract_offer, ExtractionMode};
use crate::processor::ownership::OwnershipClassifier;
use crate::processor::partition::{partition_offers, PartitionedOffers};
use crate::types::{ExtractedOffer, ExtractionStats, RawMessage, StatisticsCollector};
use crate::utils::math::calculate_rate;
use crate::utils::time::wall_clock_nanos;
use tracing::{debug, info};

/// Inputs supplied by the settings/identity layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOptions {
    /// Current user's display handle
    pub handle: String,
    /// Lenient extraction with placeholders and text scraping
    pub debug_mode: bool,
    /// Count our own flat schema as "mine" even without the handle
    pub native_schema_is_mine: bool,
    /// Only consider messages on this content topic
    pub content_topic: Option<String>,
}

impl ExtractionOptions {
    pub fn new(handle: impl Into<String>, debug_mode: bool) -> Self {
        Self {
            handle: handle.into(),
            debug_mode,
            native_schema_is_mine: true,
            content_topic: None,
        }
    }

    pub fn with_content_topic(mut self, topic: impl Into<String>) -> Self {
        self.content_topic = Some(topic.into());
        self
    }

    pub fn with_native_schema_is_mine(mut self, enabled: bool) -> Self {
        self.native_schema_is_mine = enabled;
        self
    }

    pub fn mode(&self) -> ExtractionMode {
        ExtractionMode::from_debug_flag(self.debug_mode)
    }
}

/// Offers from one pass together with the pass counters
#[derive(Debug, Clone)]
pub struct ExtractionResults {
    pub offers: Vec<ExtractedOffer>,
    pub stats: ExtractionStats,
}

impl ExtractionResults {
    /// Split into "mine" and "others" tabs
    pub fn partition(self) -> PartitionedOffers {
        partition_offers(self.offers)
    }
}

/// Runs extraction passes with fixed options
#[derive(Debug, Clone)]
pub struct OfferPipeline {
    options: ExtractionOptions,
    classifier: OwnershipClassifier,
}

impl OfferPipeline {
    pub fn new(options: ExtractionOptions) -> Self {
        let classifier = OwnershipClassifier::new(options.native_schema_is_mine);
        Self {
            options,
            classifier,
        }
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Process a message list into offers
    ///
    /// Per-message failures (bad base64, invalid UTF-8, unusable content)
    /// skip that message only; this never fails as a whole.
    pub fn run(&self, messages: &[RawMessage]) -> ExtractionResults {
        let mut stats = ExtractionStats::new();
        let mut offers = Vec::new();
        let mode = self.options.mode();

        stats.messages_seen = messages.len();

        let on_topic = messages.iter().filter(|message| match &self.options.content_topic {
            Some(topic) => &message.content_topic == topic,
            None => true,
        });

        let mut considered = 0usize;
        for (index, message) in on_topic.enumerate() {
            considered += 1;

            if mode == ExtractionMode::Debug && !message.has_timestamp() {
                debug!("Skipping message {} without timestamp (debug mode)", index);
                stats.missing_timestamp += 1;
                continue;
            }

            let text = match decode_payload(&message.payload) {
                Ok(text) => text,
                Err(e) => {
                    debug!("Skipping message {}: {}", index, e);
                    stats.decode_failures += 1;
                    continue;
                }
            };

            match self.build_offer(index, message, text) {
                Some(offer) => {
                    if offer.is_valid_json {
                        stats.json_payloads += 1;
                    }
                    stats.record_offer(&offer);
                    offers.push(offer);
                }
                None => {
                    stats.excluded += 1;
                }
            }
        }

        stats.filtered_by_topic = messages.len() - considered;
        stats.finish();

        info!("Extraction pass complete: {}", stats.summary());

        ExtractionResults { offers, stats }
    }

    fn build_offer(&self, index: usize, message: &RawMessage, text: String) -> Option<ExtractedOffer> {
        let Some(recovered) = extract_offer(&text, self.options.mode()) else {
            debug!("Message {} yielded no offer", index);
            return None;
        };

        let is_my_offer = self.classifier.is_mine(&text, &self.options.handle);
        let rate = calculate_rate(recovered.from_amount, recovered.to_amount);

        Some(ExtractedOffer {
            key: offer_key(message, index),
            from_asset: recovered.from_asset,
            from_amount: recovered.from_amount,
            to_asset: recovered.to_asset,
            to_amount: recovered.to_amount,
            rate,
            is_my_offer,
            is_valid_json: recovered.is_valid_json,
            payload_digest: payload_digest(&text),
            raw_message: text,
            content_topic: message.content_topic.clone(),
            timestamp_nanos: message.timestamp_nanos(),
            shape: recovered.shape,
        })
    }
}

/// `<timestamp>-<index>`, falling back to the current time without a timestamp
///
/// Not a content identity: two messages sharing a timestamp and swapping
/// places between fetches swap keys too. Use `payload_digest` for identity.
pub fn offer_key(message: &RawMessage, index: usize) -> String {
    match message.timestamp.as_deref().map(str::trim) {
        Some(ts) if !ts.is_empty() => format!("{}-{}", ts, index),
        _ => format!("{}-{}", wall_clock_nanos(), index),
    }
}

/// Run a single pass and return only the offers
pub fn extract_offers(messages: &[RawMessage], options: &ExtractionOptions) -> Vec<ExtractedOffer> {
    OfferPipeline::new(options.clone()).run(messages).offers
}
