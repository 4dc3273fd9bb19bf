//! Offer extraction from decoded payload text
//!
//! JSON payloads are matched against an ordered list of known layouts. The
//! order is fixed and there is no schema versioning: a payload that satisfies
//! an earlier layout's structural test never reaches a later one, even if the
//! earlier layout then fails to yield a complete offer.
//!
//! Strict mode drops anything incomplete. Debug mode keeps everything,
//! filling gaps with `Unknown` / `?`, and falls back to scraping tickers and
//! numbers out of free text when no layout applies.

pub mod flat;
pub mod from_to;
pub mod nested_offer;
pub mod text_scrape;

pub use flat::FlatShape;
pub use from_to::FromToShape;
pub use nested_offer::NestedOfferShape;
pub use text_scrape::scrape_text;

use crate::types::{Amount, OfferShape, UNKNOWN_ASSET};
use crate::utils::math::parse_float_prefix;
use serde_json::{Map, Value};

/// Extraction strictness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Only complete JSON offers survive
    Strict,
    /// Best-effort guesses with placeholders
    Debug,
}

impl ExtractionMode {
    pub fn from_debug_flag(debug: bool) -> Self {
        if debug {
            ExtractionMode::Debug
        } else {
            ExtractionMode::Strict
        }
    }
}

/// Unnormalised field values pulled out of a JSON layout
#[derive(Debug, Clone, Copy, Default)]
pub struct OfferFields<'a> {
    pub from_asset: Option<&'a Value>,
    pub from_amount: Option<&'a Value>,
    pub to_asset: Option<&'a Value>,
    pub to_amount: Option<&'a Value>,
}

/// Offer content recovered from one payload, before ownership and keying
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveredOffer {
    pub shape: OfferShape,
    pub from_asset: String,
    pub from_amount: Amount,
    pub to_asset: String,
    pub to_amount: Amount,
    pub is_valid_json: bool,
}

/// A JSON layout that offers may arrive in
///
/// `matches` is the structural test deciding whether this layout claims the
/// payload; `fields` pulls the raw values out once it has.
pub trait ShapeMatcher: Sync {
    fn shape(&self) -> OfferShape;

    fn matches(&self, object: &Map<String, Value>) -> bool;

    fn fields<'a>(&self, object: &'a Map<String, Value>) -> OfferFields<'a>;
}

/// Layouts in priority order
pub fn shape_matchers() -> [&'static dyn ShapeMatcher; 3] {
    [&NestedOfferShape, &FromToShape, &FlatShape]
}

/// Recover an offer from decoded text
///
/// Returns `None` when the message should be excluded: in strict mode for
/// anything that is not a complete JSON offer, in debug mode never.
pub fn extract_offer(text: &str, mode: ExtractionMode) -> Option<RecoveredOffer> {
    let parsed = serde_json::from_str::<Value>(text).ok();
    let is_valid_json = parsed.is_some();

    let matched = parsed
        .as_ref()
        .and_then(Value::as_object)
        .and_then(|object| {
            shape_matchers()
                .into_iter()
                .find(|matcher| matcher.matches(object))
                .map(|matcher| (matcher.shape(), matcher.fields(object)))
        });

    match (mode, matched) {
        (ExtractionMode::Strict, Some((shape, fields))) => normalise_strict(shape, &fields),
        (ExtractionMode::Strict, None) => None,
        (ExtractionMode::Debug, Some((shape, fields))) => {
            Some(normalise_lenient(shape, &fields, is_valid_json))
        }
        (ExtractionMode::Debug, None) => Some(scrape_text(text, is_valid_json)),
    }
}

fn normalise_strict(shape: OfferShape, fields: &OfferFields<'_>) -> Option<RecoveredOffer> {
    let from_asset = fields.from_asset.filter(|v| is_truthy(v))?;
    let to_asset = fields.to_asset.filter(|v| is_truthy(v))?;
    let from_amount = fields.from_amount.filter(|v| is_truthy(v))?;
    let to_amount = fields.to_amount.filter(|v| is_truthy(v))?;

    Some(RecoveredOffer {
        shape,
        from_asset: ticker(from_asset),
        from_amount: Amount::Value(coerce_amount(from_amount)),
        to_asset: ticker(to_asset),
        to_amount: Amount::Value(coerce_amount(to_amount)),
        is_valid_json: true,
    })
}

fn normalise_lenient(
    shape: OfferShape,
    fields: &OfferFields<'_>,
    is_valid_json: bool,
) -> RecoveredOffer {
    let asset = |value: Option<&Value>| {
        value
            .filter(|v| is_truthy(v))
            .map(ticker)
            .unwrap_or_else(|| UNKNOWN_ASSET.to_string())
    };
    let amount = |value: Option<&Value>| {
        value
            .filter(|v| is_truthy(v))
            .map(|v| Amount::Value(coerce_amount(v)))
            .unwrap_or(Amount::Unknown)
    };

    RecoveredOffer {
        shape,
        from_asset: asset(fields.from_asset),
        from_amount: amount(fields.from_amount),
        to_asset: asset(fields.to_asset),
        to_amount: amount(fields.to_amount),
        is_valid_json,
    }
}

/// Resolve an asset field that may be a ticker or `{"symbol": ticker}`
///
/// An object without a `symbol` resolves to nothing.
pub fn resolve_asset(value: &Value) -> Option<&Value> {
    match value {
        Value::Object(object) => object.get("symbol"),
        other => Some(other),
    }
}

/// Loose truthiness: null, false, 0, NaN and "" are falsy
///
/// Note the asymmetry this gives amounts: the number `0` is missing, the
/// string `"0"` is present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce an amount field to f64; anything non-numeric is NaN
pub fn coerce_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_float_prefix(s),
        _ => f64::NAN,
    }
}

/// Uppercase ticker text for a resolved asset value
pub fn ticker(value: &Value) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    text.to_uppercase()
}
