//! Byte sizes with binary multiples: `100MB` is 100 * 2^20 bytes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A size in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteSize(pub u64);

/// The byte-size grammar rejected the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ByteSizeError(String);

/// Units from largest to smallest, with their power-of-two exponent.
const UNITS: [(&str, u32); 6] = [
    ("PB", 50),
    ("TB", 40),
    ("GB", 30),
    ("MB", 20),
    ("KB", 10),
    ("B", 0),
];

/// Spell decimal-looking units as their binary counterparts, so `MB` means `MiB`.
fn binary_unit(unit: &str) -> String {
    let unit = unit.to_ascii_lowercase();
    match unit.as_str() {
        "k" | "m" | "g" | "t" | "p" => format!("{unit}i"),
        "kb" | "mb" | "gb" | "tb" | "pb" => format!("{}ib", &unit[..1]),
        _ => unit,
    }
}

impl ByteSize {
    pub const fn bytes(self) -> u64 {
        self.0
    }
}

impl FromStr for ByteSize {
    type Err = ByteSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let number = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
        let unit = &s[number.len()..];
        format!("{number}{}", binary_unit(unit))
            .parse::<bytesize::ByteSize>()
            .map(|size| ByteSize(size.as_u64()))
            .map_err(ByteSizeError)
    }
}

impl fmt::Display for ByteSize {
    /// The largest unit that divides the size exactly.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (unit, shift) = UNITS
            .iter()
            .copied()
            .find(|&(_, shift)| self.0 != 0 && self.0 % (1u64 << shift) == 0)
            .unwrap_or(("B", 0));
        write!(f, "{}{unit}", self.0 >> shift)
    }
}
