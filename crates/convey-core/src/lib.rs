//! Core of the convey value-conversion engine.
//!
//! A conversion reads a dynamically typed [`Value`] and writes it into a typed destination
//! under one of two policies:
//!
//! - **strict**: same kind family only, never narrowing
//! - **weak**: numeric coercion, string parsing, overflow-checked narrowing
//!
//! Destinations implement [`Target`]; sources implement [`ToValue`]. Structs get both from
//! `#[derive(Convert)]` in the `convey` crate.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use convey_core::{ConvertError, convert_strict, convert_weak};
//!
//! let mut port = 0u16;
//! convert_weak("8080", &mut port)?;
//! assert_eq!(port, 8080);
//!
//! let mut small = 0i8;
//! assert!(matches!(
//!     convert_weak(&200i16, &mut small),
//!     Err(ConvertError::Overflow { .. })
//! ));
//!
//! let src = HashMap::from([(1i64, 1i64), (2, 2)]);
//! let mut dst: HashMap<i64, i64> = HashMap::new();
//! convert_strict(&src, &mut dst)?;
//! assert_eq!(dst, src);
//! # Ok::<(), ConvertError>(())
//! ```

pub mod config;
mod convert;
mod error;
#[cfg(feature = "json")]
mod json;
mod kind;
mod overflow;
mod slot;
mod special;
mod to_value;
mod value;

pub use config::{
    DEFAULT_TIME_LAYOUT, InvalidLayout, reset_time_layout, set_time_layout, time_layout,
};
pub use convert::{Policy, convert, convert_strict, convert_value, convert_weak};
pub use error::{ConvertError, InvalidSyntax, ParseError};
pub use kind::{Kind, KindSet};
pub use overflow::{complex_overflows, float_overflows, int_overflows, uint_overflows};
pub use slot::{
    ArraySlot, Build, ComplexSlot, Field, FloatSlot, IntSlot, MapSlot, PointerSlot, SliceSlot,
    Slot, Special, StructSlot, Target, UintSlot, Zero,
};
pub use special::{
    ByteSize, ByteSizeError, HardwareAddr, HardwareAddrError, MailAddress, MailAddressError,
};
pub use to_value::ToValue;
pub use value::{Number, Opaque, StructValue, Value};
