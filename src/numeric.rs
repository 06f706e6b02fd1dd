//! Locale-invariant number parsing straight from byte windows.
//!
//! Grammar accepted here is deliberately narrower than `str::parse`: no
//! `+` sign, no exponent, no `inf`/`nan`, no grouping separators, and `.`
//! is the only decimal point.

/// Parse a signed base-10 integer: an optional leading `-` followed by one
/// or more ASCII digits.
///
/// Returns `None` for empty spans, stray bytes, or overflow.
pub fn parse_integer(span: &[u8]) -> Option<i64> {
    let (negative, digits) = match span.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, span),
    };
    if digits.is_empty() {
        return None;
    }

    // Accumulate toward the sign so i64::MIN parses.
    let mut value: i64 = 0;
    for &b in digits {
        let d = digit(b)? as i64;
        value = value.checked_mul(10)?;
        value = if negative {
            value.checked_sub(d)?
        } else {
            value.checked_add(d)?
        };
    }
    Some(value)
}

/// Parse a signed decimal: optional leading `-`, ASCII digits, and at most
/// one `.`. At least one digit is required; `"1."` and `".5"` are accepted.
/// Values too large for `f64` are rejected rather than becoming infinite.
pub fn parse_decimal(span: &[u8]) -> Option<f64> {
    let digits = match span.split_first() {
        Some((b'-', rest)) => rest,
        _ => span,
    };

    let mut seen_dot = false;
    let mut seen_digit = false;
    for &b in digits {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => return None,
        }
    }
    if !seen_digit {
        return None;
    }

    // The span is pure ASCII at this point, and every remaining form is one
    // the standard float grammar accepts.
    std::str::from_utf8(span)
        .ok()?
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
}

/// Parse exactly `width` ASCII digits starting at `pos`.
pub fn parse_fixed_digits(span: &[u8], pos: usize, width: usize) -> Option<u32> {
    let window = span.get(pos..pos.checked_add(width)?)?;
    window
        .iter()
        .try_fold(0u32, |acc, &b| acc.checked_mul(10)?.checked_add(digit(b)?))
}

#[inline]
fn digit(b: u8) -> Option<u32> {
    b.is_ascii_digit().then(|| u32::from(b - b'0'))
}
