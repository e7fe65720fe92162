//! Transform string formatting.

use floatfx_scene_model::Offset;

/// Format `value` with exactly `precision` decimals, matching
/// `Number.prototype.toFixed`:
///
/// - NaN prints as `NaN`, infinities as `Infinity` / `-Infinity`
/// - negative zero prints without a sign
/// - exact ties round away from zero (`2.5` at precision 0 is `3`)
/// - magnitudes of `1e21` and above fall back to exponent notation
pub fn to_fixed(value: f64, precision: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value < 0.0 {
        return format!("-{}", to_fixed_abs(-value, precision));
    }
    to_fixed_abs(value.abs(), precision)
}

fn to_fixed_abs(value: f64, precision: u32) -> String {
    if value.is_infinite() {
        return "Infinity".to_string();
    }
    if value >= 1e21 {
        return exponent_notation(value);
    }

    let p = precision as usize;
    if !is_exact_tie(value, precision) {
        return format!("{value:.p$}");
    }

    // Exact ties: the (p+1)-digit expansion is exact and ends in 5.
    // Drop that digit and round the rest up.
    let extended = format!("{value:.prec$}", prec = p + 1);
    let mut digits = extended[..extended.len() - 1].to_string();
    if digits.ends_with('.') {
        digits.pop();
    }
    increment_decimal(&digits)
}

/// Whether `value` sits exactly halfway between two `precision`-digit
/// decimals, i.e. `value * 2^(precision+1)` is an odd integer.
fn is_exact_tie(value: f64, precision: u32) -> bool {
    let scaled = value * 2f64.powi(precision as i32 + 1);
    scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 == 1.0
}

/// Add one unit in the last place of a plain decimal string.
fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        match *b {
            b'.' => continue,
            b'9' => *b = b'0',
            d => {
                *b = d + 1;
                carry = false;
            }
        }
    }
    let mut out = String::with_capacity(bytes.len() + 1);
    if carry {
        out.push('1');
    }
    out.extend(bytes.into_iter().map(char::from));
    out
}

fn exponent_notation(value: f64) -> String {
    let raw = format!("{value:e}");
    match raw.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => raw,
    }
}

/// The CSS transform applied to a floating element.
pub fn translate3d(offset: Offset, precision: u32) -> String {
    format!(
        "translate3d({}px, {}px, 0)",
        to_fixed(offset.x, precision),
        to_fixed(offset.y, precision)
    )
}
