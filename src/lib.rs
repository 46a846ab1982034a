//! Convey: strict and weak conversion of dynamic values into typed Rust destinations.
//!
//! This crate re-exports the engine from `convey-core` and the `#[derive(Convert)]` macro.
//! Structs deriving `Convert` become both destinations and sources:
//!
//! ```
//! use std::collections::HashMap;
//! use std::time::Duration;
//! use convey::{Convert, ConvertError, Zero, convert_weak};
//!
//! #[derive(Convert, Debug, PartialEq)]
//! struct Server {
//!     host: String,
//!     port: u16,
//!     timeout: Duration,
//! }
//!
//! let src = HashMap::from([
//!     ("host", "localhost"),
//!     ("port", "8080"),
//!     ("timeout", "2s"),
//! ]);
//! let mut server = Server::zero();
//! convert_weak(&src, &mut server)?;
//! assert_eq!(server.port, 8080);
//! assert_eq!(server.timeout, Duration::from_secs(2));
//! # Ok::<(), ConvertError>(())
//! ```
//!
//! # Features
//!
//! - `json` (default): `serde_json::Value` as a source
//! - `profiling`: instrument the entry points with `profiling::function`
//! - `profile-with-puffin`: puffin backend for the benchmarks

pub use convey_core::*;
pub use convey_macros::Convert;

/// Crates whose types appear in the public API.
pub use {chrono, num_complex, ordered_float, regex, url};
#[cfg(feature = "json")]
pub use serde_json;
