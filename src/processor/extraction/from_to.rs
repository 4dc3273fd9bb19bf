//! From/To layout: `{"from": {"asset", "amount"}, "to": {"asset", "amount"}}`

use super::{resolve_asset, OfferFields, ShapeMatcher};
use crate::types::OfferShape;
use serde_json::{Map, Value};

pub struct FromToShape;

impl ShapeMatcher for FromToShape {
    fn shape(&self) -> OfferShape {
        OfferShape::FromTo
    }

    fn matches(&self, object: &Map<String, Value>) -> bool {
        matches!(
            (object.get("from"), object.get("to")),
            (Some(Value::Object(_)), Some(Value::Object(_)))
        )
    }

    fn fields<'a>(&self, object: &'a Map<String, Value>) -> OfferFields<'a> {
        let from = object.get("from").and_then(Value::as_object);
        let to = object.get("to").and_then(Value::as_object);

        OfferFields {
            from_asset: from.and_then(|l| l.get("asset")).and_then(resolve_asset),
            from_amount: from.and_then(|l| l.get("amount")),
            to_asset: to.and_then(|l| l.get("asset")).and_then(resolve_asset),
            to_amount: to.and_then(|l| l.get("amount")),
        }
    }
}
