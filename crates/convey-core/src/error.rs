//! Conversion errors.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ConvertError
//! ├── NotAddressable - destination cannot be written through (aliased shared pointer)
//! ├── CannotSet      - destination field is read-only
//! ├── CannotConvert  - no rule for this kind pairing under the active policy
//! ├── Overflow       - value does not fit the destination losslessly
//! └── Parse          - a textual parser rejected its input (ParseError)
//! ```
//!
//! The first error raised while descending into a composite aborts the whole conversion.
//! Elements converted before it stay written; treat the destination as untrustworthy after
//! any error.

use std::error::Error as StdError;

use thiserror::Error;

use crate::kind::Kind;
use crate::value::Value;

// ============================================================================
// Conversion Errors
// ============================================================================

/// Errors raised by [`convert_strict`](crate::convert_strict) and
/// [`convert_weak`](crate::convert_weak).
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The destination is shared and cannot be written through.
    #[error("destination {type_name} is not addressable")]
    NotAddressable { type_name: &'static str },

    /// The destination field is read-only.
    #[error("cannot set field {field} of {type_name}")]
    CannotSet {
        type_name: &'static str,
        field: &'static str,
    },

    /// No conversion rule exists for this kind pairing.
    #[error("cannot convert {src} to {dst}")]
    CannotConvert { src: Kind, dst: Kind },

    /// The value is representable in the source kind but not in the destination kind.
    #[error("convert {value} to {dst} overflows")]
    Overflow { value: Value, src: Kind, dst: Kind },

    /// A textual parser rejected its input.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl ConvertError {
    pub(crate) fn cannot_convert(src: &Value, dst: Kind) -> Self {
        ConvertError::CannotConvert {
            src: src.kind(),
            dst,
        }
    }

    pub(crate) fn overflow(value: &Value, dst: Kind) -> Self {
        ConvertError::Overflow {
            value: value.clone(),
            src: value.kind(),
            dst,
        }
    }

    /// Whether this is a parse failure.
    pub fn is_parse(&self) -> bool {
        matches!(self, ConvertError::Parse(_))
    }
}

// ============================================================================
// Parse Errors
// ============================================================================

/// A textual parser rejected its input.
///
/// The parser's own error is kept untouched and is reachable through
/// [`source`](StdError::source) or [`ParseError::cause`].
#[derive(Debug, Error)]
#[error("parsing {input:?} as {target}: {source}")]
pub struct ParseError {
    /// What was being parsed, e.g. `"i64"` or `"duration"`.
    pub target: &'static str,
    pub input: String,
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl ParseError {
    pub fn new(
        target: &'static str,
        input: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            target,
            input: input.into(),
            source: source.into(),
        }
    }

    /// The underlying parser error.
    pub fn cause(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.source.as_ref()
    }

    /// Downcast the underlying parser error.
    pub fn cause_as<E: StdError + 'static>(&self) -> Option<&E> {
        self.source.downcast_ref::<E>()
    }
}

/// Input that matches none of the accepted tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid syntax")]
pub struct InvalidSyntax;
