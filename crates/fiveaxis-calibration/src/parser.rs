//! Coordinate string parser
//!
//! Turns configuration strings such as `"30 40.5 2"` or `"30,40.5"` into a
//! [`Point3`]. The parser never fails: components that are missing default to
//! 0 and malformed leading content yields the origin.
//!
//! Tokens follow the C `strtod` decimal grammar. After each token exactly one
//! separator character is skipped, and the next token is only read when more
//! content follows that separator.

use fiveaxis_core::Point3;

/// Parse up to three numeric tokens into X, Y, Z
pub fn parse_xyz(text: &str) -> Point3 {
    let Some((x, mut pos)) = scan_number(text, 0) else {
        return Point3::ZERO;
    };

    let mut point = Point3::new(x, 0.0, 0.0);
    for component in [&mut point.y, &mut point.z] {
        let Some(next) = skip_separator(text, pos) else {
            break;
        };
        match scan_number(text, next) {
            Some((value, end)) => {
                *component = value;
                pos = end;
            }
            None => pos = next,
        }
    }
    point
}

/// Parse the leading number of `text`, ignoring anything after it
pub fn parse_number(text: &str) -> Option<f64> {
    scan_number(text, 0).map(|(value, _)| value)
}

/// Byte offset just past one separator character at `pos`, provided more
/// content follows it
///
/// A multibyte separator is skipped whole, so `"1°2°3"` reads three
/// components where a byte-wise skip would land inside the character.
fn skip_separator(text: &str, pos: usize) -> Option<usize> {
    let separator = text[pos..].chars().next()?;
    let next = pos + separator.len_utf8();
    (next < text.len()).then_some(next)
}

/// Scan a decimal number starting at byte `start`.
///
/// Returns the value and the byte offset just past it, or `None` when no
/// digits are found.
fn scan_number(text: &str, start: usize) -> Option<(f64, usize)> {
    let bytes = text.as_bytes();
    let mut pos = start;

    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }

    let negative = match bytes.get(pos) {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &text[int_start..pos];

    let mut frac_digits = "";
    if bytes.get(pos) == Some(&b'.') {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if !int_digits.is_empty() || end > frac_start {
            frac_digits = &text[frac_start..end];
            pos = end;
        }
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    // Exponent only counts when at least one digit follows the marker
    let mut exp_digits = "";
    let mut exp_negative = false;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut end = pos + 1;
        let sign = bytes.get(end).copied();
        if matches!(sign, Some(b'-' | b'+')) {
            end += 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > digits_start {
            exp_negative = sign == Some(b'-');
            exp_digits = &text[digits_start..end];
            pos = end;
        }
    }

    let normalized = format!(
        "{}{}.{}e{}{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { int_digits },
        if frac_digits.is_empty() { "0" } else { frac_digits },
        if exp_negative { "-" } else { "" },
        if exp_digits.is_empty() { "0" } else { exp_digits },
    );

    normalized.parse::<f64>().ok().map(|value| (value, pos))
}
