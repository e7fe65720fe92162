//! Normalization of user-facing tuning values.
//!
//! Raw options live in a friendly `0..1`-ish range; these helpers map them
//! onto the values the per-frame update actually divides and multiplies by.

/// Divisor applied to the global strength option.
pub const STRENGTH_DIVISOR: f64 = 2.5;

/// Scale applied to raw deceleration before the floor at 1.
pub const DECELERATION_SCALE: f64 = 100.0 / 6.0;

/// Scale from device-motion acceleration to pixel-equivalent input.
pub const MOTION_SCALE: f64 = 100.0;

/// Map raw deceleration onto the smoothing denominator.
///
/// Always `>= 1`, so an update never overshoots its target. NaN input
/// also yields 1.
pub fn normalize_deceleration(raw: f64) -> f64 {
    f64::max(1.0, raw * 100.0 / 6.0)
}

/// Effective per-element strength: the element's marker value scaled by
/// the global strength option.
pub fn normalize_strength(marker_strength: f64, global_strength: f64) -> f64 {
    marker_strength * (global_strength / STRENGTH_DIVISOR)
}

/// Parse a marker attribute value the way a browser coerces a string to a
/// number.
///
/// - absent value: NaN
/// - empty or whitespace-only: 0
/// - decimal literals with optional sign and exponent, `Infinity`
/// - unsigned `0x`, `0o`, `0b` integer literals
/// - anything else: NaN
pub fn parse_marker(value: Option<&str>) -> f64 {
    let Some(value) = value else {
        return f64::NAN;
    };

    let trimmed = value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(parsed) = parse_radix_literal(trimmed) {
        return parsed;
    }

    // f64::from_str also takes "inf" and "nan", which are not numbers here.
    let decimal_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal_chars {
        return f64::NAN;
    }

    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let mut acc = 0.0_f64;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => acc = acc * f64::from(radix) + f64::from(d),
            None => return Some(f64::NAN),
        }
    }
    Some(acc)
}
