use common::CheeseId;

use crate::error::AppError;

/// Parse the leading base-10 integer of a path segment, so `"12abc"` is 12.
///
/// Returns `None` when the segment has no leading digits or the value does
/// not fit a [`CheeseId`]. Such ids match no cheese.
pub fn parse_id(raw: &str) -> Option<CheeseId> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let end = sign + count_digits(&bytes[sign..]);
    if end == sign {
        return None;
    }
    s[..end].parse().ok()
}

/// Parse the leading decimal number of a path segment, so `"2.5kg"` is 2.5.
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent. Returns `None` when no number prefix is present.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse().ok()
}

/// Parse a weight in kilograms. Anything that is not a finite, non-negative
/// number is rejected before the cheese is looked up.
pub fn parse_weight(raw: &str) -> Result<f64, AppError> {
    parse_float_prefix(raw)
        .filter(|w| w.is_finite() && *w >= 0.0)
        .ok_or_else(|| AppError::Validation("Invalid weight".into()))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
