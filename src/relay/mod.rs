//! Relay node integration
//!
//! This module provides the message source and sink the extraction pipeline
//! is fed from:
//! - **Client** - async REST client for subscribe / fetch / publish
//! - **Retry** - exponential backoff helpers shared by every client call
//!
//! The relay is an opaque collaborator. No ordering or delivery guarantees
//! are added here beyond what the relay itself provides.

pub mod client;
pub mod retry;

// Re-export main types
pub use client::RelayClient;
pub use retry::{calculate_next_backoff, retry_with_backoff, RetryPolicy};
