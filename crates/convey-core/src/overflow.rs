//! Overflow analysis.
//!
//! Each predicate answers "would converting this normalized number into a destination of
//! kind `dst` lose information". They are deliberately separate per destination family:
//! the representable-range test differs between signed, unsigned, float and complex
//! destinations.

use num_complex::Complex64;

use crate::kind::Kind;
use crate::value::Number;

/// 2^63 as f64; the first float past the i64 range.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;
/// 2^64 as f64; the first float past the u64 range.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Whether `n` overflows a signed integer destination of kind `dst`.
pub fn int_overflows(n: Number, dst: Kind) -> bool {
    match int_value(n) {
        Some(x) => !fits_signed(x, dst.bits()),
        None => true,
    }
}

/// Whether `n` overflows an unsigned integer destination of kind `dst`.
pub fn uint_overflows(n: Number, dst: Kind) -> bool {
    match uint_value(n) {
        Some(x) => !fits_unsigned(x, dst.bits()),
        None => true,
    }
}

/// Whether `n` overflows a float destination of kind `dst`.
///
/// Integers must be exactly representable as `f64`. The f32 range check treats
/// infinities and NaN as representable.
pub fn float_overflows(n: Number, dst: Kind) -> bool {
    let x = match n {
        Number::Int(i) => match exact_i64(i) {
            Some(x) => x,
            None => return true,
        },
        Number::Uint(u) => match exact_u64(u) {
            Some(x) => x,
            None => return true,
        },
        Number::Float(f) => f,
        Number::Complex(c) => {
            if c.im != 0.0 {
                return true;
            }
            c.re
        }
    };
    dst == Kind::F32 && overflows_f32(x)
}

/// Whether `n` overflows a complex destination of kind `dst`.
pub fn complex_overflows(n: Number, dst: Kind) -> bool {
    let c = match n {
        Number::Int(i) => match exact_i64(i) {
            Some(x) => Complex64::new(x, 0.0),
            None => return true,
        },
        Number::Uint(u) => match exact_u64(u) {
            Some(x) => Complex64::new(x, 0.0),
            None => return true,
        },
        Number::Float(f) => Complex64::new(f, 0.0),
        Number::Complex(c) => c,
    };
    dst == Kind::Complex64 && (overflows_f32(c.re) || overflows_f32(c.im))
}

/// Normalize to i64, or `None` if no i64 holds the value exactly.
pub(crate) fn int_value(n: Number) -> Option<i64> {
    match n {
        Number::Int(i) => Some(i),
        Number::Uint(u) => i64::try_from(u).ok(),
        Number::Float(f) => float_to_i64(f),
        Number::Complex(c) if c.im == 0.0 => float_to_i64(c.re),
        Number::Complex(_) => None,
    }
}

/// Normalize to u64, or `None` if no u64 holds the value exactly.
pub(crate) fn uint_value(n: Number) -> Option<u64> {
    match n {
        Number::Int(i) => u64::try_from(i).ok(),
        Number::Uint(u) => Some(u),
        Number::Float(f) => float_to_u64(f),
        Number::Complex(c) if c.im == 0.0 => float_to_u64(c.re),
        Number::Complex(_) => None,
    }
}

/// Normalize to f64. Callers check [`float_overflows`] first.
pub(crate) fn float_value(n: Number) -> f64 {
    match n {
        Number::Int(i) => i as f64,
        Number::Uint(u) => u as f64,
        Number::Float(f) => f,
        Number::Complex(c) => c.re,
    }
}

/// Normalize to a complex of f64. Callers check [`complex_overflows`] first.
pub(crate) fn complex_value(n: Number) -> Complex64 {
    match n {
        Number::Complex(c) => c,
        other => Complex64::new(float_value(other), 0.0),
    }
}

fn float_to_i64(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&f)).then_some(f as i64)
}

fn float_to_u64(f: f64) -> Option<u64> {
    (f.fract() == 0.0 && (0.0..U64_LIMIT).contains(&f)).then_some(f as u64)
}

fn exact_i64(i: i64) -> Option<f64> {
    let x = i as f64;
    (x as i128 == i as i128).then_some(x)
}

fn exact_u64(u: u64) -> Option<f64> {
    let x = u as f64;
    (x as u128 == u as u128).then_some(x)
}

fn fits_signed(x: i64, bits: u32) -> bool {
    if bits >= 64 {
        return true;
    }
    let half = 1i64 << (bits - 1);
    (-half..half).contains(&x)
}

fn fits_unsigned(x: u64, bits: u32) -> bool {
    bits >= 64 || x < 1u64 << bits
}

fn overflows_f32(x: f64) -> bool {
    let x = x.abs();
    (f32::MAX as f64) < x && x <= f64::MAX
}
