//! Text formatting for amounts and date ranges.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::month::parse_date;

/// Format an amount as dollars and cents, e.g. "$1,234.50" or "-$20.00".
pub fn format_currency(amount: Decimal) -> String {
    static DOLLARS_FMT: OnceLock<Formatter> = OnceLock::new();

    let dollars_fmt = DOLLARS_FMT.get_or_init(|| {
        Formatter::currency("$")
            .expect("'$' is a valid currency prefix")
            .precision(Precision::Decimals(0))
    });

    let rounded = amount.round_dp(2);
    let magnitude = rounded.abs();
    let dollars = magnitude.trunc();
    let cents = ((magnitude - dollars) * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or_default();

    let dollars_text = if dollars.is_zero() {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0".to_owned()
    } else {
        dollars_fmt.fmt_string(dollars.to_f64().unwrap_or_default())
    };

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{dollars_text}.{cents:02}")
}

/// Describe a date range in words, e.g. "October 2025",
/// "August - October 2025" or "December 2024 - February 2025".
///
/// Falls back to "{start} to {end}" if either date is malformed.
pub fn date_range_description(start: &str, end: &str) -> String {
    let (Some(start_date), Some(end_date)) = (parse_date(start), parse_date(end)) else {
        return format!("{start} to {end}");
    };

    if start_date.year() == end_date.year() && start_date.month() == end_date.month() {
        format!("{} {}", start_date.month(), start_date.year())
    } else if start_date.year() == end_date.year() {
        format!(
            "{} - {} {}",
            start_date.month(),
            end_date.month(),
            end_date.year()
        )
    } else {
        format!(
            "{} {} - {} {}",
            start_date.month(),
            start_date.year(),
            end_date.month(),
            end_date.year()
        )
    }
}
