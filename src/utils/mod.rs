//! Shared helpers: amount coercion, rate calculation, formatting and time

pub mod currency;
pub mod math;
pub mod time;
