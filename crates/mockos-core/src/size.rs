//! Human-readable byte sizes.
//!
//! Units are binary multiples: `KB` and `KiB` both mean 1024 bytes.

use thiserror::Error;

/// Errors from [`parse_size`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeParseError {
    /// Nothing but whitespace was given.
    #[error("size expression is empty")]
    Empty,

    /// The numeric part is missing or malformed.
    #[error("invalid number in size expression '{0}'")]
    InvalidNumber(String),

    /// The unit suffix is not recognised.
    #[error("unknown size unit '{unit}' in '{input}'")]
    UnknownUnit {
        /// The full expression.
        input: String,
        /// The unrecognised suffix.
        unit: String,
    },

    /// The byte count does not fit in memory on this platform.
    #[error("size expression '{0}' is too large")]
    Overflow(String),
}

/// Keeps `fraction * multiplier` within `u128` for every unit up to `EiB`.
const MAX_FRACTION_DIGITS: usize = 18;

fn unit_multiplier(unit: &str) -> Option<u128> {
    let shift = match unit.to_ascii_lowercase().as_str() {
        "" | "b" => 0,
        "k" | "kb" | "kib" => 10,
        "m" | "mb" | "mib" => 20,
        "g" | "gb" | "gib" => 30,
        "t" | "tb" | "tib" => 40,
        "p" | "pb" | "pib" => 50,
        "e" | "eb" | "eib" => 60,
        _ => return None,
    };
    Some(1u128 << shift)
}

/// Parse an expression such as `"10MB"`, `"1.5 GiB"` or `"512"` into bytes.
///
/// Fractional results are truncated to whole bytes.
///
/// # Errors
///
/// Returns a [`SizeParseError`] for empty input, a malformed number (including
/// negative values), an unknown unit, or a count that overflows `u64`.
pub fn parse_size(input: &str) -> Result<u64, SizeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SizeParseError::Empty);
    }

    let split = trimmed
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(trimmed.len());
    let (number, unit) = trimmed.split_at(split);

    let (whole, fraction) = number.split_once('.').unwrap_or((number, ""));
    if (whole.is_empty() && fraction.is_empty()) || fraction.contains('.') {
        return Err(SizeParseError::InvalidNumber(input.to_string()));
    }

    let unit = unit.trim_start();
    let multiplier = unit_multiplier(unit).ok_or_else(|| SizeParseError::UnknownUnit {
        input: input.to_string(),
        unit: unit.to_string(),
    })?;

    let overflow = || SizeParseError::Overflow(input.to_string());

    let whole: u128 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };

    let fraction = &fraction[..fraction.len().min(MAX_FRACTION_DIGITS)];
    let fraction_bytes = if fraction.is_empty() {
        0
    } else {
        let numerator: u128 = fraction
            .parse()
            .map_err(|_| SizeParseError::InvalidNumber(input.to_string()))?;
        let denominator = 10u128.pow(fraction.len() as u32);
        numerator * multiplier / denominator
    };

    let bytes = whole
        .checked_mul(multiplier)
        .and_then(|b| b.checked_add(fraction_bytes))
        .ok_or_else(overflow)?;
    u64::try_from(bytes).map_err(|_| overflow())
}

/// Format bytes for human-readable display.
pub fn format_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    if mb >= 1024.0 {
        format!("{:.1} GB", mb / 1024.0)
    } else if kb >= 1024.0 {
        format!("{mb:.1} MB")
    } else if kb >= 1.0 {
        format!("{kb:.1} KB")
    } else {
        format!("{bytes} B")
    }
}
