//! Link-layer hardware addresses: IEEE 802 MAC-48, EUI-48, EUI-64 and 20-octet
//! IP-over-InfiniBand addresses.
//!
//! Accepted forms:
//!
//! ```text
//! 00:00:5e:00:53:01
//! 00-00-5e-00-53-01
//! 0000.5e00.5301
//! 02:00:5e:10:00:00:00:01
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A hardware address of 6, 8 or 20 octets.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HardwareAddr(Vec<u8>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid MAC address")]
pub struct HardwareAddrError;

const VALID_LENGTHS: [usize; 3] = [6, 8, 20];

impl HardwareAddr {
    /// Wrap raw octets; `None` unless there are 6, 8 or 20 of them.
    pub fn from_octets(octets: impl Into<Vec<u8>>) -> Option<Self> {
        let octets = octets.into();
        VALID_LENGTHS
            .contains(&octets.len())
            .then_some(HardwareAddr(octets))
    }

    pub fn octets(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn hex_octet(pair: &[u8]) -> Option<u8> {
    if pair.len() != 2 || !pair.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let text = std::str::from_utf8(pair).ok()?;
    u8::from_str_radix(text, 16).ok()
}

/// `xx:xx:...` or `xx-xx-...`.
fn parse_pairs(s: &[u8], sep: u8) -> Option<Vec<u8>> {
    if (s.len() + 1) % 3 != 0 {
        return None;
    }
    let count = (s.len() + 1) / 3;
    if !VALID_LENGTHS.contains(&count) {
        return None;
    }
    let mut octets = Vec::with_capacity(count);
    for (i, chunk) in s.chunks(3).enumerate() {
        octets.push(hex_octet(&chunk[..2])?);
        if i + 1 < count && chunk.get(2) != Some(&sep) {
            return None;
        }
    }
    Some(octets)
}

/// `xxxx.xxxx.xxxx`.
fn parse_quads(s: &[u8]) -> Option<Vec<u8>> {
    if (s.len() + 1) % 5 != 0 {
        return None;
    }
    let count = 2 * (s.len() + 1) / 5;
    if !VALID_LENGTHS.contains(&count) {
        return None;
    }
    let mut octets = Vec::with_capacity(count);
    for (i, chunk) in s.chunks(5).enumerate() {
        octets.push(hex_octet(&chunk[..2])?);
        octets.push(hex_octet(chunk.get(2..4)?)?);
        if i + 1 < count / 2 && chunk.get(4) != Some(&b'.') {
            return None;
        }
    }
    Some(octets)
}

impl FromStr for HardwareAddr {
    type Err = HardwareAddrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() < 14 {
            return Err(HardwareAddrError);
        }
        let octets = match (bytes[2], bytes[4]) {
            (sep @ (b':' | b'-'), _) => parse_pairs(bytes, sep),
            (_, b'.') => parse_quads(bytes),
            _ => None,
        };
        octets.map(HardwareAddr).ok_or(HardwareAddrError)
    }
}

impl fmt::Display for HardwareAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, octet) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{octet:02x}")?;
        }
        Ok(())
    }
}
