//! The kind model.
//!
//! Every conversion decision is keyed off the [`Kind`] of the source value and the kind of
//! the destination slot. Kinds are grouped into families with [`KindSet`] so converters can
//! ask "is this any signed integer" without listing widths.

use std::fmt;

use bitflags::bitflags;

/// Semantic shape of a value or destination slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Kind {
    /// Absent value: a null document node or the target of a nil pointer.
    Nil,
    Bool,
    /// Platform-width signed integer.
    Isize,
    I8,
    I16,
    I32,
    I64,
    /// Platform-width unsigned integer.
    Usize,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Complex64,
    Complex128,
    String,
    Array,
    Slice,
    Map,
    Struct,
    Pointer,
    Interface,
    /// Runtime shapes with no conversion rules (functions, raw addresses).
    Opaque,
}

bitflags! {
    /// A set of kinds, used to describe kind families.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KindSet: u32 {
        const NIL = 1 << Kind::Nil as u8;
        const BOOL = 1 << Kind::Bool as u8;
        const ISIZE = 1 << Kind::Isize as u8;
        const I8 = 1 << Kind::I8 as u8;
        const I16 = 1 << Kind::I16 as u8;
        const I32 = 1 << Kind::I32 as u8;
        const I64 = 1 << Kind::I64 as u8;
        const USIZE = 1 << Kind::Usize as u8;
        const U8 = 1 << Kind::U8 as u8;
        const U16 = 1 << Kind::U16 as u8;
        const U32 = 1 << Kind::U32 as u8;
        const U64 = 1 << Kind::U64 as u8;
        const F32 = 1 << Kind::F32 as u8;
        const F64 = 1 << Kind::F64 as u8;
        const COMPLEX64 = 1 << Kind::Complex64 as u8;
        const COMPLEX128 = 1 << Kind::Complex128 as u8;
        const STRING = 1 << Kind::String as u8;
        const ARRAY = 1 << Kind::Array as u8;
        const SLICE = 1 << Kind::Slice as u8;
        const MAP = 1 << Kind::Map as u8;
        const STRUCT = 1 << Kind::Struct as u8;
        const POINTER = 1 << Kind::Pointer as u8;
        const INTERFACE = 1 << Kind::Interface as u8;
        const OPAQUE = 1 << Kind::Opaque as u8;

        /// Signed integers.
        const INT = Self::ISIZE.bits() | Self::I8.bits() | Self::I16.bits()
            | Self::I32.bits() | Self::I64.bits();
        /// Unsigned integers.
        const UINT = Self::USIZE.bits() | Self::U8.bits() | Self::U16.bits()
            | Self::U32.bits() | Self::U64.bits();
        const FLOAT = Self::F32.bits() | Self::F64.bits();
        const COMPLEX = Self::COMPLEX64.bits() | Self::COMPLEX128.bits();
        const NUMERIC = Self::INT.bits() | Self::UINT.bits() | Self::FLOAT.bits()
            | Self::COMPLEX.bits();
        /// Kinds a composite destination treats as a single element.
        /// Strings are deliberately absent.
        const SCALAR = Self::BOOL.bits() | Self::NUMERIC.bits();
        const SEQUENCE = Self::ARRAY.bits() | Self::SLICE.bits();
    }
}

impl Kind {
    /// The singleton set containing this kind.
    pub const fn set(self) -> KindSet {
        KindSet::from_bits_retain(1 << self as u8)
    }

    /// Whether this kind belongs to `family`.
    pub const fn is(self, family: KindSet) -> bool {
        family.contains(self.set())
    }

    /// Storage capacity in bytes for numeric and boolean kinds.
    pub const fn size(self) -> Option<usize> {
        Some(match self {
            Kind::Bool | Kind::I8 | Kind::U8 => 1,
            Kind::I16 | Kind::U16 => 2,
            Kind::I32 | Kind::U32 | Kind::F32 => 4,
            Kind::I64 | Kind::U64 | Kind::F64 | Kind::Complex64 => 8,
            Kind::Isize => size_of::<isize>(),
            Kind::Usize => size_of::<usize>(),
            Kind::Complex128 => 16,
            _ => return None,
        })
    }

    /// Width in bits of an integer or float kind, or of one component of a complex kind.
    pub const fn bits(self) -> u32 {
        match self {
            Kind::Complex64 => 32,
            Kind::Complex128 => 64,
            _ => match self.size() {
                Some(bytes) => bytes as u32 * 8,
                None => 0,
            },
        }
    }

    /// Significand precision of a float kind, or of the components of a complex kind.
    ///
    /// An integer converts into such a destination without rounding when its width
    /// does not exceed this many bits.
    pub const fn mantissa_bits(self) -> u32 {
        match self {
            Kind::F32 | Kind::Complex64 => f32::MANTISSA_DIGITS,
            Kind::F64 | Kind::Complex128 => f64::MANTISSA_DIGITS,
            _ => 0,
        }
    }

    /// Lowercase name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Nil => "nil",
            Kind::Bool => "bool",
            Kind::Isize => "isize",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Usize => "usize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Complex64 => "complex64",
            Kind::Complex128 => "complex128",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Slice => "slice",
            Kind::Map => "map",
            Kind::Struct => "struct",
            Kind::Pointer => "pointer",
            Kind::Interface => "interface",
            Kind::Opaque => "opaque",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
