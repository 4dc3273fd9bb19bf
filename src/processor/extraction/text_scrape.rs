//! Free-text scraping for debug mode
//!
//! Lossy on purpose: the first two distinct tickers and the first two numbers
//! in order of appearance, with no attempt to pair a number with the ticker
//! next to it. Interop debugging sessions compare this output across
//! producers, so the pairing must stay exactly this naive.

use super::RecoveredOffer;
use crate::types::{Amount, OfferShape, UNKNOWN_ASSET};
use crate::utils::math::parse_float_prefix;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TICKER: Regex =
        Regex::new(r"(?i)(BTC|ETH|USDC|VERI|bitcoin|ethereum|Bitcoin|Ethereum)").unwrap();
    static ref NUMBER: Regex = Regex::new(r"\d+\.?\d*").unwrap();
}

/// First `limit` distinct tickers (uppercased) in order of appearance
pub fn scan_tickers(text: &str, limit: usize) -> Vec<String> {
    let mut tickers: Vec<String> = Vec::with_capacity(limit);
    for m in TICKER.find_iter(text) {
        let ticker = m.as_str().to_uppercase();
        if !tickers.contains(&ticker) {
            tickers.push(ticker);
            if tickers.len() == limit {
                break;
            }
        }
    }
    tickers
}

/// First `limit` unsigned decimal numbers in order of appearance
pub fn scan_numbers(text: &str, limit: usize) -> Vec<f64> {
    NUMBER
        .find_iter(text)
        .take(limit)
        .map(|m| parse_float_prefix(m.as_str()))
        .collect()
}

/// Best-effort offer from arbitrary text; always produces a result
pub fn scrape_text(text: &str, is_valid_json: bool) -> RecoveredOffer {
    let mut tickers = scan_tickers(text, 2).into_iter();
    let mut numbers = scan_numbers(text, 2).into_iter();

    let from_asset = tickers.next().unwrap_or_else(|| UNKNOWN_ASSET.to_string());
    let to_asset = tickers.next().unwrap_or_else(|| UNKNOWN_ASSET.to_string());
    let from_amount = numbers.next().map(Amount::Value).unwrap_or(Amount::Unknown);
    let to_amount = numbers.next().map(Amount::Value).unwrap_or(Amount::Unknown);

    RecoveredOffer {
        shape: OfferShape::TextScrape,
        from_asset,
        from_amount,
        to_asset,
        to_amount,
        is_valid_json,
    }
}
