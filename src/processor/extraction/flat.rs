//! Flat layout, the application's own format
//!
//! `{"fromAsset", "fromAmount", "toAsset", "toAmount", "timestamp"}`

use super::{resolve_asset, OfferFields, ShapeMatcher};
use crate::types::OfferShape;
use serde_json::{Map, Value};

const FLAT_KEYS: [&str; 4] = ["fromAsset", "fromAmount", "toAsset", "toAmount"];

pub struct FlatShape;

impl ShapeMatcher for FlatShape {
    fn shape(&self) -> OfferShape {
        OfferShape::Flat
    }

    /// Any one of the four offer keys is enough to claim the payload
    fn matches(&self, object: &Map<String, Value>) -> bool {
        FLAT_KEYS.iter().any(|key| object.contains_key(*key))
    }

    fn fields<'a>(&self, object: &'a Map<String, Value>) -> OfferFields<'a> {
        OfferFields {
            from_asset: object.get("fromAsset").and_then(resolve_asset),
            from_amount: object.get("fromAmount"),
            to_asset: object.get("toAsset").and_then(resolve_asset),
            to_amount: object.get("toAmount"),
        }
    }
}
