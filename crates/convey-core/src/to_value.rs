//! Lowering Rust values into the [`Value`] source model.
//!
//! ## Supported Types
//!
//! - Integers, floats, `bool`, `char` (as a one-character string), `str`/`String`
//! - Complex numbers and `OrderedFloat`
//! - `Vec<T>` and slices (slice), `[T; N]` (array)
//! - `HashMap`/`BTreeMap` (map, iteration order)
//! - `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>` (pointer layers)
//! - `&T` (transparent)
//! - `Value` itself
//!
//! Special types and `serde_json::Value` are covered in their own modules; structs get
//! an impl from `#[derive(Convert)]`.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::sync::Arc;

use num_complex::{Complex32, Complex64};
use ordered_float::OrderedFloat;

use crate::value::Value;

/// Lower a Rust value into a [`Value`] tree.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! impl_to_value_copy {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

impl_to_value_copy! {
    bool => Bool,
    isize => Isize,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    usize => Usize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Complex32 => Complex64,
    Complex64 => Complex128,
}

impl ToValue for OrderedFloat<f32> {
    fn to_value(&self) -> Value {
        Value::F32(self.0)
    }
}

impl ToValue for OrderedFloat<f64> {
    fn to_value(&self) -> Value {
        Value::F64(self.0)
    }
}

impl ToValue for char {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_owned())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Slice(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect())
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        Value::Pointer(self.as_ref().map(|v| Box::new(v.to_value())))
    }
}

macro_rules! impl_to_value_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: ToValue + ?Sized> ToValue for $ptr<T> {
                fn to_value(&self) -> Value {
                    Value::Pointer(Some(Box::new((**self).to_value())))
                }
            }
        )*
    };
}

impl_to_value_pointer!(Box, Rc, Arc);

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}
