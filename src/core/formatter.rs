//! Display formatting for replies coming back from the remote evaluator.

/// Replies longer than this are rendered in scientific notation when they are numeric.
pub const MAX_DISPLAY_LEN: usize = 10;

/// Formats a raw reply for the display.
///
/// Long numeric replies become `d.ddE<exp>` (`12345678901` → `1.23E10`,
/// `0.000012345678` → `1.23E-05`). Single underscores between digits are
/// accepted as separators (`1_000_000_000_0` → `1.00E10`). Anything else comes
/// back unchanged; this function never fails.
pub fn format_response(raw: &str) -> String {
    if raw.chars().count() <= MAX_DISPLAY_LEN {
        return raw.to_string();
    }

    let value = strip_digit_separators(raw.trim()).and_then(|text| text.parse::<f64>().ok());
    match value {
        Some(value) if value.is_finite() => to_scientific(value),
        _ => raw.to_string(),
    }
}

/// Removes `_` separators, which are only valid with a digit on each side.
fn strip_digit_separators(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut stripped = String::with_capacity(text.len());
    for (i, &c) in chars.iter().enumerate() {
        if c != '_' {
            stripped.push(c);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        match (before, after) {
            (Some(b), Some(a)) if b.is_ascii_digit() && a.is_ascii_digit() => {}
            _ => return None,
        }
    }
    Some(stripped)
}

fn to_scientific(value: f64) -> String {
    let rendered = format!("{:.2e}", value);
    let parts = rendered
        .split_once('e')
        .and_then(|(mantissa, exponent)| Some((mantissa, exponent.parse::<i32>().ok()?)));

    match parts {
        // Positive exponents carry no sign; both are padded to two digits.
        Some((mantissa, exponent)) => {
            let sign = if exponent < 0 { "-" } else { "" };
            format!("{}E{}{:02}", mantissa, sign, exponent.abs())
        }
        None => format!("{:.2E}", value),
    }
}
