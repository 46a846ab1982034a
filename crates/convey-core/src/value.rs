//! The dynamically typed source model.
//!
//! A conversion reads from a [`Value`] tree. Callers rarely build one by hand: anything
//! implementing [`ToValue`](crate::ToValue) is lowered into a `Value` by the entry points.
//!
//! The [`Display`](fmt::Display) impl doubles as the weak string rendering, so
//! `value.to_string()` is what a weak conversion into a `String` produces.

use std::borrow::Cow;
use std::fmt;

use num_complex::{Complex32, Complex64};

use crate::kind::Kind;

/// A dynamically typed source value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Isize(isize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Usize(usize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Complex64(Complex32),
    Complex128(Complex64),
    String(String),
    /// Fixed-length sequence.
    Array(Vec<Value>),
    /// Growable sequence.
    Slice(Vec<Value>),
    /// Key/value pairs in source order.
    Map(Vec<(Value, Value)>),
    Struct(StructValue),
    /// A pointer layer; `None` is a nil pointer.
    Pointer(Option<Box<Value>>),
    Opaque(Opaque),
}

/// A struct-shaped source value.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    pub type_name: Cow<'static, str>,
    /// Fields in declaration order.
    pub fields: Vec<(Cow<'static, str>, Value)>,
    /// Textual representation, used by string destinations when present.
    pub display: Option<String>,
}

impl StructValue {
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
            display: None,
        }
    }

    /// Append a field.
    pub fn field(mut self, name: impl Into<Cow<'static, str>>, value: Value) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Attach a textual representation.
    pub fn display(mut self, text: impl Into<String>) -> Self {
        self.display = Some(text.into());
        self
    }

    /// Look up a field by exact name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }
}

/// A value with no conversion rules: a function, a raw address, a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opaque {
    pub type_name: Cow<'static, str>,
    pub address: Option<usize>,
}

impl Opaque {
    pub fn new(type_name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            type_name: type_name.into(),
            address: None,
        }
    }

    /// An opaque value that renders as its address.
    pub fn address(type_name: impl Into<Cow<'static, str>>, address: usize) -> Self {
        Self {
            type_name: type_name.into(),
            address: Some(address),
        }
    }
}

/// A numeric source normalized to its family's widest representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Uint(u64),
    Float(f64),
    Complex(Complex64),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Nil => Kind::Nil,
            Value::Bool(_) => Kind::Bool,
            Value::Isize(_) => Kind::Isize,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Usize(_) => Kind::Usize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::Complex64(_) => Kind::Complex64,
            Value::Complex128(_) => Kind::Complex128,
            Value::String(_) => Kind::String,
            Value::Array(_) => Kind::Array,
            Value::Slice(_) => Kind::Slice,
            Value::Map(_) => Kind::Map,
            Value::Struct(_) => Kind::Struct,
            Value::Pointer(_) => Kind::Pointer,
            Value::Opaque(_) => Kind::Opaque,
        }
    }

    /// Follow pointer layers down to the pointee. A nil pointer yields [`Value::Nil`].
    pub fn indirect(&self) -> &Value {
        let mut value = self;
        loop {
            match value {
                Value::Pointer(Some(inner)) => value = inner,
                Value::Pointer(None) => return &Value::Nil,
                _ => return value,
            }
        }
    }

    /// Normalize a numeric value, or `None` for non-numeric kinds.
    pub fn number(&self) -> Option<Number> {
        Some(match *self {
            Value::Isize(v) => Number::Int(v as i64),
            Value::I8(v) => Number::Int(v.into()),
            Value::I16(v) => Number::Int(v.into()),
            Value::I32(v) => Number::Int(v.into()),
            Value::I64(v) => Number::Int(v),
            Value::Usize(v) => Number::Uint(v as u64),
            Value::U8(v) => Number::Uint(v.into()),
            Value::U16(v) => Number::Uint(v.into()),
            Value::U32(v) => Number::Uint(v.into()),
            Value::U64(v) => Number::Uint(v),
            Value::F32(v) => Number::Float(v.into()),
            Value::F64(v) => Number::Float(v),
            Value::Complex64(c) => Number::Complex(Complex64::new(c.re.into(), c.im.into())),
            Value::Complex128(c) => Number::Complex(c),
            _ => return None,
        })
    }

    /// The textual representation carried by a struct value.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Value::Struct(s) => s.display.as_deref(),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self.indirect(), Value::Nil)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<StructValue> for Value {
    fn from(s: StructValue) -> Self {
        Value::Struct(s)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Decimal exponent at or beyond which floats switch to exponent notation.
const EXPONENT_UPPER: i32 = 21;
/// Decimal exponent below which floats switch to exponent notation.
const EXPONENT_LOWER: i32 = -4;

/// Write a float using the shortest digits that round-trip.
///
/// Large and tiny magnitudes use `d.dddE±XX`, e.g. `9.5367431640625E-07`.
fn write_float<F>(f: &mut fmt::Formatter<'_>, x: F) -> fmt::Result
where
    F: Copy + Into<f64> + fmt::Display + fmt::UpperExp,
{
    let wide: f64 = x.into();
    if wide.is_nan() {
        return f.write_str("NaN");
    }
    if wide.is_infinite() {
        return f.write_str(if wide > 0.0 { "+Inf" } else { "-Inf" });
    }
    if wide == 0.0 {
        return f.write_str(if wide.is_sign_negative() { "-0" } else { "0" });
    }

    let sci = format!("{x:E}");
    let (mantissa, exponent) = sci.split_once('E').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (EXPONENT_LOWER..EXPONENT_UPPER).contains(&exponent) {
        write!(f, "{x}")
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{mantissa}E{sign}{:02}", exponent.unsigned_abs())
    }
}

fn write_complex<F>(f: &mut fmt::Formatter<'_>, re: F, im: F) -> fmt::Result
where
    F: Copy + Into<f64> + fmt::Display + fmt::UpperExp,
{
    f.write_str("(")?;
    write_float(f, re)?;
    let wide: f64 = im.into();
    if !wide.is_sign_negative() || wide.is_nan() {
        f.write_str("+")?;
    }
    write_float(f, im)?;
    f.write_str("i)")
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("<nil>"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Isize(v) => write!(f, "{v}"),
            Value::I8(v) => write!(f, "{v}"),
            Value::I16(v) => write!(f, "{v}"),
            Value::I32(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::Usize(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v}"),
            Value::U16(v) => write!(f, "{v}"),
            Value::U32(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F32(v) => write_float(f, *v),
            Value::F64(v) => write_float(f, *v),
            Value::Complex64(c) => write_complex(f, c.re, c.im),
            Value::Complex128(c) => write_complex(f, c.re, c.im),
            Value::String(s) => f.write_str(s),
            Value::Array(items) | Value::Slice(items) => {
                f.write_str("[")?;
                write_joined(f, items.iter())?;
                f.write_str("]")
            }
            Value::Map(entries) => {
                f.write_str("map[")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{k}:{v}")?;
                }
                f.write_str("]")
            }
            Value::Struct(s) => match &s.display {
                Some(text) => f.write_str(text),
                None => {
                    f.write_str("{")?;
                    write_joined(f, s.fields.iter().map(|(_, v)| v))?;
                    f.write_str("}")
                }
            },
            Value::Pointer(Some(inner)) => write!(f, "{inner}"),
            Value::Pointer(None) => f.write_str("<nil>"),
            Value::Opaque(o) => match o.address {
                Some(addr) => write!(f, "{addr:#x}"),
                None => write!(f, "<{} Value>", o.type_name),
            },
        }
    }
}
