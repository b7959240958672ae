#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── format_currency ───────────────────────────────────────────

#[test]
fn test_format_currency_basic() {
    assert_eq!(format_currency("Ksh", dec!(1234.5)), "Ksh 1,234.50");
}

#[test]
fn test_format_currency_large() {
    assert_eq!(format_currency("Ksh", dec!(1234567.89)), "Ksh 1,234,567.89");
}

#[test]
fn test_format_currency_small() {
    assert_eq!(format_currency("Ksh", dec!(5)), "Ksh 5.00");
    assert_eq!(format_currency("Ksh", dec!(999)), "Ksh 999.00");
}

#[test]
fn test_format_currency_zero() {
    assert_eq!(format_currency("Ksh", dec!(0)), "Ksh 0.00");
}

#[test]
fn test_format_currency_negative() {
    assert_eq!(format_currency("Ksh", dec!(-5000)), "Ksh -5,000.00");
}

#[test]
fn test_format_currency_rounds_to_cents() {
    assert_eq!(format_currency("USD", dec!(10.005)), "USD 10.00");
    assert_eq!(format_currency("USD", dec!(10.015)), "USD 10.02");
}

#[test]
fn test_format_currency_tiny_negative_is_not_signed() {
    assert_eq!(format_currency("Ksh", dec!(-0.001)), "Ksh 0.00");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("café résumé", 5), "café…");
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount() {
    assert_eq!(parse_amount("1,250.50"), Some(dec!(1250.50)));
    assert_eq!(parse_amount(" 300 "), Some(dec!(300)));
    assert_eq!(parse_amount("-4.5"), Some(dec!(-4.5)));
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount(""), None);
}
