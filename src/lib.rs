//! Relay Offer Extractor
//!
//! Turns base64 relay messages into structured swap offers: decode, recognise
//! one of several offer layouts, decide ownership, compute a display rate.

pub mod cli;
pub mod config;
pub mod decoder;
pub mod errors;
pub mod processor;
pub mod relay;
pub mod types;
pub mod utils;
