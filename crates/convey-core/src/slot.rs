//! The destination model.
//!
//! A destination is anything implementing [`Target`]: it hands the dispatcher a [`Slot`],
//! a closed union of writable shapes. Scalars expose a typed mutable reference; composites
//! expose a trait object (`SliceSlot`, `MapSlot`, ...) that the composite converters drive.
//! Holding `&mut self` is what makes a destination addressable.
//!
//! Special types (durations, timestamps, ...) get their own [`Special`] variant so the
//! dispatcher recognizes them before falling through to kind-based dispatch.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::net::IpAddr;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use num_complex::{Complex32, Complex64};
use ordered_float::OrderedFloat;
use regex::Regex;
use url::Url;

use crate::convert::{Policy, dispatch};
use crate::error::ConvertError;
use crate::kind::Kind;
use crate::special::{ByteSize, HardwareAddr, MailAddress};
use crate::value::Value;

/// A conversion destination.
pub trait Target {
    /// Borrow this destination as a writable slot.
    fn slot(&mut self) -> Slot<'_>;
}

/// The zero value of a destination type.
///
/// Used to grow sequences, allocate pointees and fill fresh map entries before
/// converting into them.
pub trait Zero: Sized {
    fn zero() -> Self;
}

/// Produce a fresh destination value from a source.
///
/// Every `Zero + Target` type builds by converting into its zero value. Types without a
/// meaningful zero (`Url`, `Regex`, `IpAddr`) build straight from the source.
pub trait Build: Sized {
    fn build(src: &Value, policy: Policy) -> Result<Self, ConvertError>;
}

impl<T: Zero + Target> Build for T {
    fn build(src: &Value, policy: Policy) -> Result<Self, ConvertError> {
        let mut value = T::zero();
        dispatch(src, value.slot(), policy)?;
        Ok(value)
    }
}

// ============================================================================
// Slots
// ============================================================================

/// A writable destination location.
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Int(IntSlot<'a>),
    Uint(UintSlot<'a>),
    Float(FloatSlot<'a>),
    Complex(ComplexSlot<'a>),
    String(&'a mut String),
    Array(&'a mut dyn ArraySlot),
    Slice(&'a mut dyn SliceSlot),
    Map(&'a mut dyn MapSlot),
    Struct(&'a mut dyn StructSlot),
    Pointer(&'a mut dyn PointerSlot),
    /// Holds any source verbatim.
    Interface(&'a mut Value),
    Special(Special<'a>),
}

impl Slot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Slot::Bool(_) => Kind::Bool,
            Slot::Int(s) => s.kind(),
            Slot::Uint(s) => s.kind(),
            Slot::Float(s) => s.kind(),
            Slot::Complex(s) => s.kind(),
            Slot::String(_) => Kind::String,
            Slot::Array(_) => Kind::Array,
            Slot::Slice(_) => Kind::Slice,
            Slot::Map(_) => Kind::Map,
            Slot::Struct(_) => Kind::Struct,
            Slot::Pointer(_) => Kind::Pointer,
            Slot::Interface(_) => Kind::Interface,
            Slot::Special(s) => s.kind(),
        }
    }
}

macro_rules! numeric_slot {
    ($(#[$meta:meta])* $name:ident, $wide:ty, { $($variant:ident($ty:ty) => $kind:ident),* $(,)? }) => {
        $(#[$meta])*
        pub enum $name<'a> {
            $($variant(&'a mut $ty)),*
        }

        impl $name<'_> {
            pub fn kind(&self) -> Kind {
                match self {
                    $($name::$variant(_) => Kind::$kind),*
                }
            }

            /// Store a value already checked against this slot's range.
            pub(crate) fn set(self, value: $wide) {
                match self {
                    $($name::$variant(dst) => *dst = value as $ty),*
                }
            }
        }
    };
}

numeric_slot!(
    /// A signed integer destination.
    IntSlot, i64, {
        Isize(isize) => Isize,
        I8(i8) => I8,
        I16(i16) => I16,
        I32(i32) => I32,
        I64(i64) => I64,
    }
);

numeric_slot!(
    /// An unsigned integer destination.
    UintSlot, u64, {
        Usize(usize) => Usize,
        U8(u8) => U8,
        U16(u16) => U16,
        U32(u32) => U32,
        U64(u64) => U64,
    }
);

numeric_slot!(
    /// A float destination.
    FloatSlot, f64, {
        F32(f32) => F32,
        F64(f64) => F64,
    }
);

/// A complex destination.
pub enum ComplexSlot<'a> {
    Complex64(&'a mut Complex32),
    Complex128(&'a mut Complex64),
}

impl ComplexSlot<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            ComplexSlot::Complex64(_) => Kind::Complex64,
            ComplexSlot::Complex128(_) => Kind::Complex128,
        }
    }

    pub(crate) fn set(self, value: Complex64) {
        match self {
            ComplexSlot::Complex64(dst) => *dst = Complex32::new(value.re as f32, value.im as f32),
            ComplexSlot::Complex128(dst) => *dst = value,
        }
    }
}

/// A special destination type, recognized before kind dispatch.
pub enum Special<'a> {
    Duration(&'a mut Duration),
    Timestamp(&'a mut DateTime<FixedOffset>),
    ByteSize(&'a mut ByteSize),
    Ip(&'a mut IpAddr),
    HardwareAddr(&'a mut HardwareAddr),
    Url(&'a mut Url),
    MailAddress(&'a mut MailAddress),
    Pattern(&'a mut Regex),
}

impl Special<'_> {
    /// The kind the special type would have without special handling.
    pub fn kind(&self) -> Kind {
        match self {
            Special::Duration(_) | Special::ByteSize(_) => Kind::U64,
            Special::Ip(_) => Kind::Array,
            Special::HardwareAddr(_) => Kind::Slice,
            Special::Timestamp(_)
            | Special::Url(_)
            | Special::MailAddress(_)
            | Special::Pattern(_) => Kind::Struct,
        }
    }

    /// Fully qualified name of the special type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Special::Duration(_) => "std::time::Duration",
            Special::Timestamp(_) => "chrono::DateTime<FixedOffset>",
            Special::ByteSize(_) => "convey::ByteSize",
            Special::Ip(_) => "std::net::IpAddr",
            Special::HardwareAddr(_) => "convey::HardwareAddr",
            Special::Url(_) => "url::Url",
            Special::MailAddress(_) => "convey::MailAddress",
            Special::Pattern(_) => "regex::Regex",
        }
    }
}

// ============================================================================
// Composite slot traits
// ============================================================================

/// A fixed-capacity sequence destination.
pub trait ArraySlot {
    fn len(&self) -> usize;

    /// Slot for an element; `index < self.len()`.
    fn element(&mut self, index: usize) -> Slot<'_>;
}

/// A growable sequence destination.
pub trait SliceSlot {
    fn len(&self) -> usize;

    /// Reserve room for `additional` more elements.
    fn reserve(&mut self, additional: usize);

    /// Slot for an existing element; `index < self.len()`.
    fn element(&mut self, index: usize) -> Slot<'_>;

    /// Append an element built from `src`.
    fn push_from(&mut self, src: &Value, policy: Policy) -> Result<(), ConvertError>;
}

/// A map destination.
pub trait MapSlot {
    fn len(&self) -> usize;

    /// Convert `value` into the entry under `key`, or under the zero key when `key` is
    /// `None`. The key is converted with `key_policy`. An existing entry is converted in
    /// place; a new entry is inserted only once its value converted.
    fn convert_entry(
        &mut self,
        key: Option<&Value>,
        key_policy: Policy,
        value: &Value,
        policy: Policy,
    ) -> Result<(), ConvertError>;
}

/// Compile-time descriptor of a struct field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub settable: bool,
}

impl Field {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            settable: true,
        }
    }

    pub const fn readonly(name: &'static str) -> Self {
        Self {
            name,
            settable: false,
        }
    }
}

/// A struct destination with compile-time field descriptors.
///
/// Usually generated by `#[derive(Convert)]`.
pub trait StructSlot {
    fn type_name(&self) -> &'static str;

    /// Field descriptors in declaration order.
    fn fields(&self) -> &'static [Field];

    /// Slot for the field at `index`, or `None` if the field is not settable.
    fn field(&mut self, index: usize) -> Option<Slot<'_>>;
}

/// A pointer destination.
pub trait PointerSlot {
    fn type_name(&self) -> &'static str;

    /// Convert `src` into the pointee, allocating one if the pointer is unset.
    fn convert_pointee(&mut self, src: &Value, policy: Policy) -> Result<(), ConvertError>;

    /// Reset the pointer to unset. Returns `false` for pointers that cannot be unset.
    fn clear(&mut self) -> bool;
}

// ============================================================================
// Scalar implementations
// ============================================================================

macro_rules! impl_scalar_target {
    ($($ty:ty => |$v:ident| $slot:expr),* $(,)?) => {
        $(
            impl Target for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    let $v = self;
                    $slot
                }
            }

            impl Zero for $ty {
                fn zero() -> Self {
                    Default::default()
                }
            }
        )*
    };
}

impl_scalar_target! {
    bool => |v| Slot::Bool(v),
    isize => |v| Slot::Int(IntSlot::Isize(v)),
    i8 => |v| Slot::Int(IntSlot::I8(v)),
    i16 => |v| Slot::Int(IntSlot::I16(v)),
    i32 => |v| Slot::Int(IntSlot::I32(v)),
    i64 => |v| Slot::Int(IntSlot::I64(v)),
    usize => |v| Slot::Uint(UintSlot::Usize(v)),
    u8 => |v| Slot::Uint(UintSlot::U8(v)),
    u16 => |v| Slot::Uint(UintSlot::U16(v)),
    u32 => |v| Slot::Uint(UintSlot::U32(v)),
    u64 => |v| Slot::Uint(UintSlot::U64(v)),
    f32 => |v| Slot::Float(FloatSlot::F32(v)),
    f64 => |v| Slot::Float(FloatSlot::F64(v)),
    OrderedFloat<f32> => |v| Slot::Float(FloatSlot::F32(&mut v.0)),
    OrderedFloat<f64> => |v| Slot::Float(FloatSlot::F64(&mut v.0)),
    Complex32 => |v| Slot::Complex(ComplexSlot::Complex64(v)),
    Complex64 => |v| Slot::Complex(ComplexSlot::Complex128(v)),
    String => |v| Slot::String(v),
}

impl Target for Value {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Interface(self)
    }
}

impl Zero for Value {
    fn zero() -> Self {
        Value::Nil
    }
}

// ============================================================================
// Sequence implementations
// ============================================================================

impl<T: Target + Build> Target for Vec<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Slice(self)
    }
}

impl<T> Zero for Vec<T> {
    fn zero() -> Self {
        Vec::new()
    }
}

impl<T: Target + Build> SliceSlot for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn reserve(&mut self, additional: usize) {
        Vec::reserve(self, additional);
    }

    fn element(&mut self, index: usize) -> Slot<'_> {
        self[index].slot()
    }

    fn push_from(&mut self, src: &Value, policy: Policy) -> Result<(), ConvertError> {
        self.push(T::build(src, policy)?);
        Ok(())
    }
}

impl<T: Target, const N: usize> Target for [T; N] {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Array(self)
    }
}

impl<T: Zero, const N: usize> Zero for [T; N] {
    fn zero() -> Self {
        std::array::from_fn(|_| T::zero())
    }
}

impl<T: Target, const N: usize> ArraySlot for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element(&mut self, index: usize) -> Slot<'_> {
        self[index].slot()
    }
}

// ============================================================================
// Map implementations
// ============================================================================

fn map_key<K: Zero + Target>(key: Option<&Value>, policy: Policy) -> Result<K, ConvertError> {
    match key {
        Some(key) => K::build(key, policy),
        None => Ok(K::zero()),
    }
}

impl<K, V, S> Target for HashMap<K, V, S>
where
    K: Zero + Target + Eq + Hash,
    V: Target + Build,
    S: BuildHasher,
{
    fn slot(&mut self) -> Slot<'_> {
        Slot::Map(self)
    }
}

impl<K, V, S: Default> Zero for HashMap<K, V, S> {
    fn zero() -> Self {
        HashMap::default()
    }
}

impl<K, V, S> MapSlot for HashMap<K, V, S>
where
    K: Zero + Target + Eq + Hash,
    V: Target + Build,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn convert_entry(
        &mut self,
        key: Option<&Value>,
        key_policy: Policy,
        value: &Value,
        policy: Policy,
    ) -> Result<(), ConvertError> {
        let key: K = map_key(key, key_policy)?;
        if let Some(existing) = self.get_mut(&key) {
            return dispatch(value, existing.slot(), policy);
        }
        let value = V::build(value, policy)?;
        self.insert(key, value);
        Ok(())
    }
}

impl<K, V> Target for BTreeMap<K, V>
where
    K: Zero + Target + Ord,
    V: Target + Build,
{
    fn slot(&mut self) -> Slot<'_> {
        Slot::Map(self)
    }
}

impl<K, V> Zero for BTreeMap<K, V> {
    fn zero() -> Self {
        BTreeMap::new()
    }
}

impl<K, V> MapSlot for BTreeMap<K, V>
where
    K: Zero + Target + Ord,
    V: Target + Build,
{
    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn convert_entry(
        &mut self,
        key: Option<&Value>,
        key_policy: Policy,
        value: &Value,
        policy: Policy,
    ) -> Result<(), ConvertError> {
        let key: K = map_key(key, key_policy)?;
        if let Some(existing) = self.get_mut(&key) {
            return dispatch(value, existing.slot(), policy);
        }
        let value = V::build(value, policy)?;
        self.insert(key, value);
        Ok(())
    }
}

// ============================================================================
// Pointer implementations
// ============================================================================

impl<T: Target + Build> Target for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Pointer(self)
    }
}

impl<T> Zero for Option<T> {
    fn zero() -> Self {
        None
    }
}

impl<T: Target + Build> PointerSlot for Option<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn convert_pointee(&mut self, src: &Value, policy: Policy) -> Result<(), ConvertError> {
        match self {
            Some(pointee) => dispatch(src, pointee.slot(), policy),
            None => {
                *self = Some(T::build(src, policy)?);
                Ok(())
            }
        }
    }

    fn clear(&mut self) -> bool {
        *self = None;
        true
    }
}

impl<T: Target + ?Sized> Target for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Pointer(self)
    }
}

impl<T: Zero> Zero for Box<T> {
    fn zero() -> Self {
        Box::new(T::zero())
    }
}

impl<T: Target + ?Sized> PointerSlot for Box<T> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn convert_pointee(&mut self, src: &Value, policy: Policy) -> Result<(), ConvertError> {
        dispatch(src, (**self).slot(), policy)
    }

    fn clear(&mut self) -> bool {
        false
    }
}

macro_rules! impl_shared_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Target> Target for $ptr<T> {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Pointer(self)
                }
            }

            impl<T: Zero> Zero for $ptr<T> {
                fn zero() -> Self {
                    $ptr::new(T::zero())
                }
            }

            impl<T: Target> PointerSlot for $ptr<T> {
                fn type_name(&self) -> &'static str {
                    std::any::type_name::<Self>()
                }

                /// Writes only through a uniquely owned pointer.
                fn convert_pointee(&mut self, src: &Value, policy: Policy) -> Result<(), ConvertError> {
                    let type_name = PointerSlot::type_name(self);
                    let pointee = $ptr::get_mut(self)
                        .ok_or(ConvertError::NotAddressable { type_name })?;
                    dispatch(src, pointee.slot(), policy)
                }

                fn clear(&mut self) -> bool {
                    false
                }
            }
        )*
    };
}

impl_shared_pointer!(Rc, Arc);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_slot_kinds() {
        let mut a = 0i8;
        let mut b = 0usize;
        let mut c = 0f32;
        let mut d = Complex64::new(0.0, 0.0);
        let mut e = String::new();
        assert_eq!(a.slot().kind(), Kind::I8);
        assert_eq!(b.slot().kind(), Kind::Usize);
        assert_eq!(c.slot().kind(), Kind::F32);
        assert_eq!(d.slot().kind(), Kind::Complex128);
        assert_eq!(e.slot().kind(), Kind::String);
    }

    #[test]
    fn composite_slot_kinds() {
        let mut seq: Vec<i32> = Vec::new();
        let mut arr = [0u8; 2];
        let mut map: HashMap<String, i32> = HashMap::new();
        let mut ptr: Option<i32> = None;
        let mut any = Value::Nil;
        assert_eq!(seq.slot().kind(), Kind::Slice);
        assert_eq!(arr.slot().kind(), Kind::Array);
        assert_eq!(map.slot().kind(), Kind::Map);
        assert_eq!(ptr.slot().kind(), Kind::Pointer);
        assert_eq!(any.slot().kind(), Kind::Interface);
    }

    #[test]
    fn int_slot_set_truncates_to_width() {
        let mut x = 0i16;
        IntSlot::I16(&mut x).set(-300);
        assert_eq!(x, -300);

        let mut y = 0u8;
        UintSlot::U8(&mut y).set(200);
        assert_eq!(y, 200);
    }

    #[test]
    fn complex_slot_narrows_components() {
        let mut c = Complex32::new(0.0, 0.0);
        ComplexSlot::Complex64(&mut c).set(Complex64::new(1.5, -2.0));
        assert_eq!(c, Complex32::new(1.5, -2.0));
    }

    #[test]
    fn zero_values() {
        assert_eq!(<[i32; 3]>::zero(), [0, 0, 0]);
        assert_eq!(<Option<u8>>::zero(), None);
        assert_eq!(Value::zero(), Value::Nil);
        assert_eq!(*<Box<String>>::zero(), "");
    }

    #[test]
    fn shared_pointer_requires_unique_owner() {
        let mut shared = Rc::new(1i32);
        let _alias = Rc::clone(&shared);
        let err = shared
            .convert_pointee(&Value::I32(2), Policy::Strict)
            .unwrap_err();
        assert!(matches!(err, ConvertError::NotAddressable { .. }));
    }
}
