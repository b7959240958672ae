use rust_decimal::Decimal;

/// Format an amount with a currency label, thousand separators and 2
/// decimal places. e.g. `("Ksh", -1234567.891)` → `"Ksh -1,234,567.89"`
pub(crate) fn format_currency(label: &str, val: Decimal) -> String {
    let abs = val.abs().round_dp(2);
    let formatted = format!("{abs:.2}");
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    let sign = if val.round_dp(2) < Decimal::ZERO { "-" } else { "" };
    format!("{label} {sign}{with_commas}.{dec_part}")
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{truncated}…")
}

/// Parse a user-typed amount: `"1,250.50"`, `"300"`.
pub(crate) fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse().ok()
}
