//! Scalar converters: bool, integer, float, complex and string destinations.
//!
//! Each destination family has a strict and a weak routine. All of them look through
//! pointer layers first, so a nil pointer reports as a `nil` source.

use num_complex::Complex64;

use crate::error::{ConvertError, InvalidSyntax, ParseError};
use crate::kind::{Kind, KindSet};
use crate::overflow;
use crate::slot::{ComplexSlot, FloatSlot, IntSlot, UintSlot};
use crate::value::{Number, Value};

// ============================================================================
// Strict
// ============================================================================

/// Whether a `src` kind fits into a `dst` kind of at least the same capacity.
fn widens(src: Kind, dst: Kind) -> bool {
    matches!((src.size(), dst.size()), (Some(s), Some(d)) if s <= d)
}

/// Whether every integer of kind `src` is exact in a float or complex `dst`.
fn int_fits_mantissa(src: Kind, dst: Kind) -> bool {
    src.bits() <= dst.mantissa_bits()
}

pub(super) fn to_bool(src: &Value, dst: &mut bool) -> Result<(), ConvertError> {
    match src.indirect() {
        Value::Bool(b) => {
            *dst = *b;
            Ok(())
        }
        other => Err(ConvertError::cannot_convert(other, Kind::Bool)),
    }
}

pub(super) fn to_int(src: &Value, dst: IntSlot<'_>) -> Result<(), ConvertError> {
    let src = src.indirect();
    let kind = dst.kind();
    match src.number() {
        Some(Number::Int(x)) if widens(src.kind(), kind) => {
            dst.set(x);
            Ok(())
        }
        _ => Err(ConvertError::cannot_convert(src, kind)),
    }
}

pub(super) fn to_uint(src: &Value, dst: UintSlot<'_>) -> Result<(), ConvertError> {
    let src = src.indirect();
    let kind = dst.kind();
    match src.number() {
        Some(Number::Uint(x)) if widens(src.kind(), kind) => {
            dst.set(x);
            Ok(())
        }
        _ => Err(ConvertError::cannot_convert(src, kind)),
    }
}

pub(super) fn to_float(src: &Value, dst: FloatSlot<'_>) -> Result<(), ConvertError> {
    let src = src.indirect();
    let kind = dst.kind();
    let src_kind = src.kind();
    let allowed = if src_kind.is(KindSet::INT.union(KindSet::UINT)) {
        int_fits_mantissa(src_kind, kind)
    } else {
        src_kind.is(KindSet::FLOAT) && widens(src_kind, kind)
    };

    match src.number() {
        Some(n) if allowed => {
            dst.set(overflow::float_value(n));
            Ok(())
        }
        _ => Err(ConvertError::cannot_convert(src, kind)),
    }
}

pub(super) fn to_complex(src: &Value, dst: ComplexSlot<'_>) -> Result<(), ConvertError> {
    let src = src.indirect();
    let kind = dst.kind();
    let src_kind = src.kind();
    let allowed = if src_kind.is(KindSet::INT.union(KindSet::UINT)) {
        int_fits_mantissa(src_kind, kind)
    } else if src_kind.is(KindSet::FLOAT) {
        src_kind.bits() <= kind.bits()
    } else {
        src_kind.is(KindSet::COMPLEX) && widens(src_kind, kind)
    };

    match src.number() {
        Some(n) if allowed => {
            dst.set(overflow::complex_value(n));
            Ok(())
        }
        _ => Err(ConvertError::cannot_convert(src, kind)),
    }
}

pub(super) fn to_string(src: &Value, dst: &mut String) -> Result<(), ConvertError> {
    let src = src.indirect();
    if let Some(text) = src.display_text() {
        *dst = text.to_owned();
        return Ok(());
    }
    match src {
        Value::String(s) => {
            dst.clone_from(s);
            Ok(())
        }
        other => Err(ConvertError::cannot_convert(other, Kind::String)),
    }
}

// ============================================================================
// Weak
// ============================================================================

/// Parse the accepted boolean tokens.
pub(crate) fn parse_bool(s: &str) -> Result<bool, ParseError> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(ParseError::new("bool", s, InvalidSyntax)),
    }
}

/// Parse a complex literal such as `1+1i`, optionally wrapped in parentheses.
pub(crate) fn parse_complex(s: &str) -> Result<Complex64, ParseError> {
    let inner = s
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(s);
    inner
        .parse::<Complex64>()
        .map_err(|err| ParseError::new("complex", s, err))
}

pub(super) fn weak_to_bool(src: &Value, dst: &mut bool) -> Result<(), ConvertError> {
    let src = src.indirect();
    *dst = match src {
        Value::Bool(b) => *b,
        Value::String(s) => parse_bool(s)?,
        other => match other.number() {
            Some(Number::Int(i)) => i != 0,
            Some(Number::Uint(u)) => u != 0,
            Some(Number::Float(f)) => f != 0.0,
            Some(Number::Complex(c)) => c.re != 0.0 || c.im != 0.0,
            None => return Err(ConvertError::cannot_convert(other, Kind::Bool)),
        },
    };
    Ok(())
}

pub(super) fn weak_to_int(src: &Value, dst: IntSlot<'_>) -> Result<(), ConvertError> {
    let src = src.indirect();
    let kind = dst.kind();
    let n = match src {
        Value::Bool(b) => Number::Int(i64::from(*b)),
        Value::String(s) => Number::Int(
            s.parse::<i64>()
                .map_err(|err| ParseError::new("i64", s.as_str(), err))?,
        ),
        other => other
            .number()
            .ok_or_else(|| ConvertError::cannot_convert(other, kind))?,
    };
    let x = overflow::int_value(n)
        .filter(|_| !overflow::int_overflows(n, kind))
        .ok_or_else(|| ConvertError::overflow(src, kind))?;
    dst.set(x);
    Ok(())
}

pub(super) fn weak_to_uint(src: &Value, dst: UintSlot<'_>) -> Result<(), ConvertError> {
    let src = src.indirect();
    let kind = dst.kind();
    let n = match src {
        Value::Bool(b) => Number::Uint(u64::from(*b)),
        Value::String(s) => Number::Uint(
            s.parse::<u64>()
                .map_err(|err| ParseError::new("u64", s.as_str(), err))?,
        ),
        other => other
            .number()
            .ok_or_else(|| ConvertError::cannot_convert(other, kind))?,
    };
    let x = overflow::uint_value(n)
        .filter(|_| !overflow::uint_overflows(n, kind))
        .ok_or_else(|| ConvertError::overflow(src, kind))?;
    dst.set(x);
    Ok(())
}

pub(super) fn weak_to_float(src: &Value, dst: FloatSlot<'_>) -> Result<(), ConvertError> {
    let src = src.indirect();
    let kind = dst.kind();
    let n = match src {
        Value::Bool(b) => Number::Float(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => Number::Float(
            s.parse::<f64>()
                .map_err(|err| ParseError::new("f64", s.as_str(), err))?,
        ),
        other => other
            .number()
            .ok_or_else(|| ConvertError::cannot_convert(other, kind))?,
    };
    if overflow::float_overflows(n, kind) {
        return Err(ConvertError::overflow(src, kind));
    }
    dst.set(overflow::float_value(n));
    Ok(())
}

pub(super) fn weak_to_complex(src: &Value, dst: ComplexSlot<'_>) -> Result<(), ConvertError> {
    let src = src.indirect();
    let kind = dst.kind();
    let n = match src {
        Value::Bool(b) => Number::Complex(Complex64::new(if *b { 1.0 } else { 0.0 }, 0.0)),
        Value::String(s) => Number::Complex(parse_complex(s)?),
        other => other
            .number()
            .ok_or_else(|| ConvertError::cannot_convert(other, kind))?,
    };
    if overflow::complex_overflows(n, kind) {
        return Err(ConvertError::overflow(src, kind));
    }
    dst.set(overflow::complex_value(n));
    Ok(())
}

/// Any source renders into a string; see the `Display` impl of [`Value`].
pub(super) fn weak_to_string(src: &Value, dst: &mut String) -> Result<(), ConvertError> {
    *dst = src.indirect().to_string();
    Ok(())
}
