//! Shared formatting helpers for explanation text plus day-interval math.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Whole-unit currency, e.g. `$1200`.
pub(crate) fn money(amount: Decimal) -> String {
    format!("${}", amount.round_dp(0))
}

pub(crate) fn short_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

pub(crate) fn date_time(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Fractional days from `from` to `to`; negative when `to` precedes `from`.
pub(crate) fn fractional_days(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_seconds() as f64 / SECONDS_PER_DAY
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
