//! Nested-offer layout used by third-party order books
//!
//! `{"offer": {"fromAsset": "eth" | {"symbol": "eth"}, "fromAmount": ..., ...}}`

use super::{resolve_asset, OfferFields, ShapeMatcher};
use crate::types::OfferShape;
use serde_json::{Map, Value};

pub struct NestedOfferShape;

impl ShapeMatcher for NestedOfferShape {
    fn shape(&self) -> OfferShape {
        OfferShape::NestedOffer
    }

    fn matches(&self, object: &Map<String, Value>) -> bool {
        matches!(object.get("offer"), Some(Value::Object(_)))
    }

    fn fields<'a>(&self, object: &'a Map<String, Value>) -> OfferFields<'a> {
        let Some(Value::Object(offer)) = object.get("offer") else {
            return OfferFields::default();
        };

        OfferFields {
            from_asset: offer.get("fromAsset").and_then(resolve_asset),
            from_amount: offer.get("fromAmount"),
            to_asset: offer.get("toAsset").and_then(resolve_asset),
            to_amount: offer.get("toAmount"),
        }
    }
}
