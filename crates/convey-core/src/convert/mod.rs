//! The conversion dispatcher.
//!
//! Every conversion, top-level or nested, passes through [`dispatch`]: special
//! destination types are recognized first, then the destination's kind selects a scalar
//! or composite converter. Composite converters call back into `dispatch` for each element,
//! so special-type recognition applies at every depth.
//!
//! ## Policies
//!
//! - [`Policy::Strict`]: same family only, never narrowing. A wider integer does not go
//!   into a narrower one even when the value fits.
//! - [`Policy::Weak`]: coerces across numeric families and parses strings, rejecting any
//!   value the destination cannot hold exactly.

mod composite;
mod scalar;
mod special;

use crate::error::ConvertError;
use crate::slot::{Build, Slot, Target};
use crate::to_value::ToValue;
use crate::value::Value;

/// Conversion policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Policy {
    /// Same-family, non-narrowing conversions only.
    #[default]
    Strict,
    /// Coercing conversions with string parsing and overflow checks.
    Weak,
}

impl Policy {
    /// Convert `src` into `dst` under this policy.
    pub fn convert<S, T>(self, src: &S, dst: &mut T) -> Result<(), ConvertError>
    where
        S: ToValue + ?Sized,
        T: Target + ?Sized,
    {
        convert(src, dst, self)
    }

    /// Build a fresh `T` from `src` under this policy.
    pub fn build<T, S>(self, src: &S) -> Result<T, ConvertError>
    where
        T: Build,
        S: ToValue + ?Sized,
    {
        T::build(&src.to_value(), self)
    }
}

/// Convert `src` into `dst` with [`Policy::Strict`].
///
/// On error the destination may be partially written: composite elements converted
/// before the failing one keep their new values.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn convert_strict<S, T>(src: &S, dst: &mut T) -> Result<(), ConvertError>
where
    S: ToValue + ?Sized,
    T: Target + ?Sized,
{
    convert(src, dst, Policy::Strict)
}

/// Convert `src` into `dst` with [`Policy::Weak`].
///
/// On error the destination may be partially written: composite elements converted
/// before the failing one keep their new values.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn convert_weak<S, T>(src: &S, dst: &mut T) -> Result<(), ConvertError>
where
    S: ToValue + ?Sized,
    T: Target + ?Sized,
{
    convert(src, dst, Policy::Weak)
}

/// Convert `src` into `dst` under `policy`.
pub fn convert<S, T>(src: &S, dst: &mut T, policy: Policy) -> Result<(), ConvertError>
where
    S: ToValue + ?Sized,
    T: Target + ?Sized,
{
    convert_value(&src.to_value(), dst, policy)
}

/// Convert an already lowered source into `dst` under `policy`.
pub fn convert_value<T>(src: &Value, dst: &mut T, policy: Policy) -> Result<(), ConvertError>
where
    T: Target + ?Sized,
{
    dispatch(src, dst.slot(), policy)
}

/// The single recursive entry point shared by every converter.
pub(crate) fn dispatch(src: &Value, dst: Slot<'_>, policy: Policy) -> Result<(), ConvertError> {
    tracing::trace!(src = %src.kind(), dst = %dst.kind(), ?policy, "dispatch");

    match dst {
        Slot::Special(special) => special::convert(src, special, policy),
        Slot::Bool(dst) => match policy {
            Policy::Strict => scalar::to_bool(src, dst),
            Policy::Weak => scalar::weak_to_bool(src, dst),
        },
        Slot::Int(dst) => match policy {
            Policy::Strict => scalar::to_int(src, dst),
            Policy::Weak => scalar::weak_to_int(src, dst),
        },
        Slot::Uint(dst) => match policy {
            Policy::Strict => scalar::to_uint(src, dst),
            Policy::Weak => scalar::weak_to_uint(src, dst),
        },
        Slot::Float(dst) => match policy {
            Policy::Strict => scalar::to_float(src, dst),
            Policy::Weak => scalar::weak_to_float(src, dst),
        },
        Slot::Complex(dst) => match policy {
            Policy::Strict => scalar::to_complex(src, dst),
            Policy::Weak => scalar::weak_to_complex(src, dst),
        },
        Slot::String(dst) => match policy {
            Policy::Strict => scalar::to_string(src, dst),
            Policy::Weak => scalar::weak_to_string(src, dst),
        },
        Slot::Array(dst) => composite::to_array(src, dst, policy),
        Slot::Slice(dst) => composite::to_slice(src, dst, policy),
        Slot::Map(dst) => composite::to_map(src, dst, policy),
        Slot::Struct(dst) => composite::to_struct(src, dst, policy),
        Slot::Pointer(dst) => composite::to_pointer(src, dst, policy),
        Slot::Interface(dst) => composite::to_interface(src, dst),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::Kind;

    #[test]
    fn policy_defaults_to_strict() {
        assert_eq!(Policy::default(), Policy::Strict);
    }

    #[test]
    fn strict_and_weak_differ_on_cross_family() {
        let mut b = false;
        let err = convert_strict(&1i32, &mut b).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::CannotConvert {
                src: Kind::I32,
                dst: Kind::Bool
            }
        ));

        convert_weak(&1i32, &mut b).unwrap();
        assert!(b);
    }

    #[test]
    fn policy_build() {
        let x: i64 = Policy::Weak.build("42").unwrap();
        assert_eq!(x, 42);

        let v: Vec<u8> = Policy::Strict.build(&[1u8, 2]).unwrap();
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    fn convert_value_reads_lowered_source() {
        let mut s = String::new();
        convert_value(&Value::from("x"), &mut s, Policy::Strict).unwrap();
        assert_eq!(s, "x");
    }

    #[test]
    fn dyn_target() {
        let mut x = 0u16;
        let dst: &mut dyn Target = &mut x;
        Policy::Weak.convert("7", dst).unwrap();
        assert_eq!(x, 7);
    }
}
