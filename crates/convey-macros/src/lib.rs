//! Convey Proc Macros
//!
//! `#[derive(Convert)]` turns a struct into a conversion destination and source. The
//! generated code refers to `::convey_core`, so the deriving crate depends on it.
//!
//! # Example
//!
//! ```ignore
//! use convey::Convert;
//!
//! #[derive(Convert)]
//! #[convey(name = "Server")]
//! pub struct Server {
//!     pub host: String,
//!     #[convey(rename = "Port")]
//!     pub port: u16,
//! }
//! ```

use proc_macro::TokenStream;

mod attrs;
mod derive_convert;

/// Derive `StructSlot`, `Target`, `Zero` and `ToValue` for a struct.
///
/// Field descriptors are generated at compile time in declaration order; the conversion
/// engine matches source keys against them by name or position. Named, tuple and unit
/// structs are supported, generics included. Tuple fields are named `"0"`, `"1"`, ...
///
/// # Attributes
///
/// - `#[convey(name = "...")]` - Type name used in errors and source values
/// - `#[convey(display)]` - Attach the struct's `Display` output to its source value, so
///   string destinations receive it
/// - `#[convey(no_zero)]` - Skip the `Zero` impl, for structs holding a type without one
///   (`Url`, `Regex`, `IpAddr`)
///
/// # Field Attributes
///
/// - `#[convey(rename = "...")]` - Name used for matching
/// - `#[convey(readonly)]` - Field is listed but writing it fails with `CannotSet`
/// - `#[convey(skip)]` - Field is invisible to conversions; its zero value is `Default`
///
/// # Example
///
/// ```ignore
/// #[derive(Convert)]
/// struct Limits {
///     max_body: convey::ByteSize,
///
///     #[convey(readonly)]
///     id: u64,
///
///     #[convey(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Convert, attributes(convey))]
pub fn derive_convert(input: TokenStream) -> TokenStream {
    derive_convert::derive_convert_impl(input)
}
