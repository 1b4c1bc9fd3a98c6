/// Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        trimmed[1..trimmed.len() - 1].trim()
    } else {
        trimmed
    }
}

/// Parse a raw cell as a number, falling back to `default` when the cell is
/// null, empty, unparsable, or not finite (`NaN`, `inf`).
///
/// Population columns pass `None` so missingness propagates into the rates;
/// metric columns pass `Some(0.0)`.
pub fn parse_numeric_or_default(cell: Option<&str>, default: Option<f64>) -> Option<f64> {
    cell.map(clean_str)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .or(default)
}
