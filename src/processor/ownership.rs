//! Offer ownership heuristic ("is this my offer?")
//!
//! The relay channel is shared and unauthenticated, so there is no authorship
//! signal to verify. Ownership is decided by textual matching of the user's
//! handle against the decoded payload, plus one structural rule: a payload in
//! our own flat schema with none of the keys foreign producers use is assumed
//! to come from this application.
//!
//! Known limitation: another user whose text happens to contain the handle as
//! a quoted string, or a foreign offer naming an asset after the handle, is
//! classified as mine. This is accepted behaviour of the heuristic.
//!
//! Rules are evaluated in order and the first hit is reported:
//! 1. `"handle"` appears anywhere
//! 2. `handle":` appears anywhere
//! 3. the payload starts with `handle:`
//! 4. native flat schema present, foreign schema keys absent

use crate::types::OwnershipRule;

/// Keys that together identify the application's own flat offer schema
pub const NATIVE_SCHEMA_KEYS: [&str; 5] = [
    "\"fromAsset\"",
    "\"fromAmount\"",
    "\"toAsset\"",
    "\"toAmount\"",
    "\"timestamp\"",
];

/// Keys that mark a third-party offer schema
pub const FOREIGN_SCHEMA_KEYS: [&str; 5] = [
    "\"offer\"",
    "\"id\"",
    "\"type\"",
    "\"maker\"",
    "\"clientId\"",
];

/// Ownership classifier with a switchable structural rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipClassifier {
    /// Apply rule 4 (native schema counts as mine)
    pub native_schema_is_mine: bool,
}

impl Default for OwnershipClassifier {
    fn default() -> Self {
        Self {
            native_schema_is_mine: true,
        }
    }
}

impl OwnershipClassifier {
    pub fn new(native_schema_is_mine: bool) -> Self {
        Self {
            native_schema_is_mine,
        }
    }

    /// First rule that marks `text` as authored by `handle`, if any
    ///
    /// An empty handle never satisfies the handle-based rules; it would
    /// otherwise match every payload containing `""` or starting with `:`.
    pub fn classify(&self, text: &str, handle: &str) -> Option<OwnershipRule> {
        if !handle.is_empty() {
            if text.contains(&format!("\"{}\"", handle)) {
                return Some(OwnershipRule::QuotedHandle);
            }
            if text.contains(&format!("{}\":", handle)) {
                return Some(OwnershipRule::HandleKey);
            }
            if text.starts_with(&format!("{}:", handle)) {
                return Some(OwnershipRule::ChatPrefix);
            }
        }

        if self.native_schema_is_mine && has_native_schema(text) {
            return Some(OwnershipRule::NativeSchema);
        }

        None
    }

    pub fn is_mine(&self, text: &str, handle: &str) -> bool {
        self.classify(text, handle).is_some()
    }
}

/// True when every native key is present and no foreign key is
pub fn has_native_schema(text: &str) -> bool {
    NATIVE_SCHEMA_KEYS.iter().all(|key| text.contains(key))
        && !FOREIGN_SCHEMA_KEYS.iter().any(|key| text.contains(key))
}

/// Classify with all four rules enabled
pub fn classify_ownership(text: &str, handle: &str) -> Option<OwnershipRule> {
    OwnershipClassifier::default().classify(text, handle)
}

/// Boolean form of [`classify_ownership`]
pub fn is_my_offer(text: &str, handle: &str) -> bool {
    classify_ownership(text, handle).is_some()
}
