//! Extraction pass statistics
//!
//! Every pass over a message list produces one `ExtractionStats`. Nothing is
//! carried between passes; the counters describe exactly one input list.

use super::{ExtractedOffer, OfferShape};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Common trait for statistics collectors
pub trait StatisticsCollector {
    /// Get the total processing duration
    fn duration(&self) -> Duration;

    /// Calculate the processing rate (items per second)
    fn processing_rate(&self) -> f64;

    /// Finalize statistics collection
    fn finish(&mut self);

    /// Get a summary of the statistics
    fn summary(&self) -> String;
}

/// Common timing information for all statistics
#[derive(Debug, Clone)]
pub struct TimingInfo {
    pub start_time: Instant,
    pub processing_duration: Duration,
}

impl Default for TimingInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingInfo {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            processing_duration: Duration::default(),
        }
    }

    pub fn finish(&mut self) {
        self.processing_duration = self.start_time.elapsed();
    }

    pub fn elapsed(&self) -> Duration {
        if self.processing_duration.is_zero() {
            self.start_time.elapsed()
        } else {
            self.processing_duration
        }
    }
}

/// Counters for one extraction pass
#[derive(Debug, Clone, Default)]
pub struct ExtractionStats {
    pub messages_seen: usize,
    /// Dropped because their content topic did not match the filter
    pub filtered_by_topic: usize,
    /// Bad base64 or invalid UTF-8
    pub decode_failures: usize,
    /// Debug mode only: dropped for lacking a timestamp
    pub missing_timestamp: usize,
    /// Offers whose payload parsed as JSON
    pub json_payloads: usize,
    /// Decoded fine but produced no offer
    pub excluded: usize,
    pub offers_extracted: usize,
    pub mine: usize,
    pub others: usize,
    pub by_shape: BTreeMap<OfferShape, usize>,
    pub timing: TimingInfo,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_offer(&mut self, offer: &ExtractedOffer) {
        self.offers_extracted += 1;
        if offer.is_my_offer {
            self.mine += 1;
        } else {
            self.others += 1;
        }
        *self.by_shape.entry(offer.shape).or_insert(0) += 1;
    }

    pub fn shape_count(&self, shape: OfferShape) -> usize {
        self.by_shape.get(&shape).copied().unwrap_or(0)
    }

    /// Percentage of considered messages that yielded an offer
    pub fn extraction_rate(&self) -> f64 {
        let considered = self.messages_seen.saturating_sub(self.filtered_by_topic);
        crate::utils::math::safe_percentage(self.offers_extracted, considered)
    }

    fn shape_breakdown(&self) -> String {
        if self.by_shape.is_empty() {
            return "none".to_string();
        }
        self.by_shape
            .iter()
            .map(|(shape, count)| format!("{}={}", shape, count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl StatisticsCollector for ExtractionStats {
    fn duration(&self) -> Duration {
        self.timing.elapsed()
    }

    fn processing_rate(&self) -> f64 {
        let elapsed = self.timing.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.messages_seen as f64 / elapsed
        } else {
            0.0
        }
    }

    fn finish(&mut self) {
        self.timing.finish();
    }

    fn summary(&self) -> String {
        format!(
            "{} messages, {} offers ({:.1}%), {} mine / {} others, {} decode failures, {} excluded, shapes: {}",
            self.messages_seen,
            self.offers_extracted,
            self.extraction_rate(),
            self.mine,
            self.others,
            self.decode_failures,
            self.excluded,
            self.shape_breakdown()
        )
    }
}
