//! Relay Offer Extractor - Type System
//!
//! - `message`: Raw relay messages as delivered by the message source
//! - `offer`: Extracted offers, amounts, shapes and the native offer encoding
//! - `statistics`: Per-pass extraction counters and timing

mod message;
mod offer;
pub mod statistics;

pub use message::*;
pub use offer::*;

pub use statistics::{ExtractionStats, StatisticsCollector, TimingInfo};
