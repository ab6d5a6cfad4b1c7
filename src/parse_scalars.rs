//! Typed interpretation of scalar text: booleans, integers, floats and nulls.

use saphyr_parser::ScalarStyle;

use crate::error::{Error, Location};

/// Parse a YAML 1.1 boolean from a &str (handles the "Norway problem").
///
/// Accepted TRUE literals (case-insensitive): "y", "yes", "true", "on"
/// Accepted FALSE literals (case-insensitive): "n", "no", "false", "off"
pub(crate) fn parse_yaml11_bool(s: &str) -> Result<bool, String> {
    let t = s.trim();
    if ["true", "yes", "y", "on"].iter().any(|lit| t.eq_ignore_ascii_case(lit)) {
        Ok(true)
    } else if ["false", "no", "n", "off"].iter().any(|lit| t.eq_ignore_ascii_case(lit)) {
        Ok(false)
    } else {
        Err(format!("invalid YAML 1.1 bool: `{}`", s))
    }
}

/// Parse a boolean, accepting only `true`/`false` when `strict`.
pub(crate) fn parse_bool(s: &str, strict: bool, location: Location) -> Result<bool, Error> {
    if !strict {
        return parse_yaml11_bool(s).map_err(|msg| Error::msg(msg).with_location(location));
    }
    let t = s.trim();
    if t.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if t.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::msg("invalid boolean (strict mode expects true/false)").with_location(location))
    }
}

/// True for plain scalars YAML treats as null: empty, `~`, `null` (any case).
pub(crate) fn scalar_is_nullish(value: &str, style: &ScalarStyle) -> bool {
    matches!(style, ScalarStyle::Plain)
        && (value.is_empty() || value == "~" || value.eq_ignore_ascii_case("null"))
}

/// Decimal text with a redundant leading zero, such as `007` or `-012`.
///
/// Untyped decoding keeps these as strings (zip codes, identifiers).
pub(crate) fn leading_zero_decimal(t: &str) -> bool {
    let digits = t.strip_prefix(['+', '-']).unwrap_or(t);
    digits.len() > 1 && digits.starts_with('0') && digits.bytes().all(|b| b.is_ascii_digit() || b == b'_')
}

/// Accumulate `digits` in `radix`, skipping `_` separators.
fn parse_magnitude(digits: &str, radix: u32) -> Option<u128> {
    let mut val: u128 = 0;
    let mut saw = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(radix)?;
        val = val.checked_mul(radix as u128)?.checked_add(d as u128)?;
        saw = true;
    }
    saw.then_some(val)
}

/// Split an unsigned integer literal (sign already removed) into radix and digits.
fn split_radix(rest: &str, legacy_octal: bool) -> (u32, &str) {
    if let Some(r) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        (16, r)
    } else if let Some(r) = rest.strip_prefix("0o").or_else(|| rest.strip_prefix("0O")) {
        (8, r)
    } else if let Some(r) = rest.strip_prefix("0b").or_else(|| rest.strip_prefix("0B")) {
        (2, r)
    } else if legacy_octal && rest.starts_with("00") {
        (8, &rest[2..])
    } else {
        (10, rest)
    }
}

pub(crate) fn parse_int_signed<T>(
    s: &str,
    ty: &'static str,
    location: Location,
    legacy_octal: bool,
) -> Result<T, Error>
where
    T: TryFrom<i128>,
{
    let invalid = || Error::msg(format!("invalid {ty}: `{s}`")).with_location(location);
    let t = s.trim();
    let (neg, rest) = match t.strip_prefix('+') {
        Some(r) => (false, r),
        None => match t.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, t),
        },
    };
    let (radix, digits) = split_radix(rest, legacy_octal);
    let mag = parse_magnitude(digits, radix).ok_or_else(invalid)?;
    // i128::MIN has no positive counterpart, so negate in the unsigned domain.
    let val: i128 = if neg {
        if mag == i128::MIN.unsigned_abs() {
            i128::MIN
        } else {
            -(i128::try_from(mag).map_err(|_| invalid())?)
        }
    } else {
        i128::try_from(mag).map_err(|_| invalid())?
    };
    T::try_from(val).map_err(|_| invalid())
}

pub(crate) fn parse_int_unsigned<T>(
    s: &str,
    ty: &'static str,
    location: Location,
    legacy_octal: bool,
) -> Result<T, Error>
where
    T: TryFrom<u128>,
{
    let invalid = || Error::msg(format!("invalid {ty}: `{s}`")).with_location(location);
    let t = s.trim();
    if t.starts_with('-') {
        return Err(invalid());
    }
    let rest = t.strip_prefix('+').unwrap_or(t);
    let (radix, digits) = split_radix(rest, legacy_octal);
    let mag = parse_magnitude(digits, radix).ok_or_else(invalid)?;
    T::try_from(mag).map_err(|_| invalid())
}

/// Parse a float in Rust syntax or one of the YAML 1.2 special forms.
///
/// Alphabetic spellings Rust would accept (`inf`, `NaN`, `infinity`) are
/// rejected so that plain words are never mistaken for numbers.
pub(crate) fn parse_yaml12_f64(s: &str, location: Location) -> Result<f64, Error> {
    let invalid = || Error::msg(format!("invalid floating point value: `{s}`")).with_location(location);
    let t = s.trim();
    match t.to_ascii_lowercase().as_str() {
        ".nan" | "+.nan" | "-.nan" => return Ok(f64::NAN),
        ".inf" | "+.inf" => return Ok(f64::INFINITY),
        "-.inf" => return Ok(f64::NEG_INFINITY),
        _ => {}
    }
    let numeric = t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E' | b'_'));
    if !numeric || !t.bytes().any(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let cleaned: String = t.chars().filter(|c| *c != '_').collect();
    cleaned.parse::<f64>().map_err(|_| invalid())
}

pub(crate) fn parse_yaml12_f32(s: &str, location: Location) -> Result<f32, Error> {
    let v = parse_yaml12_f64(s, location)?;
    Ok(v as f32)
}
