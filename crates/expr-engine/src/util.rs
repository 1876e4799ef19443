//! Shared formatting helpers.

/// Formats a number the way the language prints it: integral values carry no
/// fractional part and negative zero prints as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else {
        // f64's Display never uses exponent notation and drops a zero fraction.
        n.to_string()
    }
}

/// Quotes `s` as a double-quoted literal that re-lexes to the same string.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
