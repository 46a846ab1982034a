//! Special destination types.
//!
//! These types convert by identity rather than by kind: a string source goes through the
//! type's own parser, any other source falls back to an integer or struct conversion.
//!
//! | Type | String source | Other sources |
//! |------|---------------|---------------|
//! | `std::time::Duration` | `humantime` (`2s`, `1h 30m`) | unsigned nanoseconds |
//! | `chrono::DateTime<FixedOffset>` | configured layout | `{secs, nanos, offset}` |
//! | [`ByteSize`] | `100MB`, `1.5 KiB` | `{bytes}` |
//! | `std::net::IpAddr` | IPv4/IPv6 literal | fails |
//! | [`HardwareAddr`] | `00:00:5e:00:53:01` | fails |
//! | `url::Url` | absolute URL | `{scheme, username, password, host, port, path, query, fragment}` |
//! | [`MailAddress`] | `"Name" <user@host>` | `{name, address}` |
//! | `regex::Regex` | pattern | `{pattern}` |

mod byte_size;
mod hardware_addr;
mod mail;
pub(crate) mod parts;

use std::net::IpAddr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use regex::Regex;
use url::Url;

pub use byte_size::{ByteSize, ByteSizeError};
pub use hardware_addr::{HardwareAddr, HardwareAddrError};
pub use mail::{MailAddress, MailAddressError};

use crate::slot::{Field, Slot, Special, StructSlot, Target, Zero};
use crate::to_value::ToValue;
use crate::value::{StructValue, Value};

// ============================================================================
// Destinations
// ============================================================================

macro_rules! impl_special_target {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Target for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::Special(Special::$variant(self))
                }
            }
        )*
    };
}

impl_special_target! {
    Duration => Duration,
    DateTime<FixedOffset> => Timestamp,
    ByteSize => ByteSize,
    IpAddr => Ip,
    HardwareAddr => HardwareAddr,
    Url => Url,
    MailAddress => MailAddress,
    Regex => Pattern,
}

impl Zero for Duration {
    fn zero() -> Self {
        Duration::ZERO
    }
}

/// The Unix epoch in UTC.
impl Zero for DateTime<FixedOffset> {
    fn zero() -> Self {
        DateTime::<Utc>::UNIX_EPOCH.fixed_offset()
    }
}

impl Zero for ByteSize {
    fn zero() -> Self {
        ByteSize(0)
    }
}

impl Zero for HardwareAddr {
    fn zero() -> Self {
        HardwareAddr::default()
    }
}

impl Zero for MailAddress {
    fn zero() -> Self {
        MailAddress::default()
    }
}

static BYTE_SIZE_FIELDS: [Field; 1] = [Field::new("bytes")];

impl StructSlot for ByteSize {
    fn type_name(&self) -> &'static str {
        "ByteSize"
    }

    fn fields(&self) -> &'static [Field] {
        &BYTE_SIZE_FIELDS
    }

    fn field(&mut self, index: usize) -> Option<Slot<'_>> {
        match index {
            0 => Some(self.0.slot()),
            _ => None,
        }
    }
}

static MAIL_ADDRESS_FIELDS: [Field; 2] = [Field::new("name"), Field::new("address")];

impl StructSlot for MailAddress {
    fn type_name(&self) -> &'static str {
        "MailAddress"
    }

    fn fields(&self) -> &'static [Field] {
        &MAIL_ADDRESS_FIELDS
    }

    fn field(&mut self, index: usize) -> Option<Slot<'_>> {
        match index {
            0 => Some(self.name.slot()),
            1 => Some(self.address.slot()),
            _ => None,
        }
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Nanoseconds, saturating at `u64::MAX` (about 584 years).
impl ToValue for Duration {
    fn to_value(&self) -> Value {
        Value::U64(u64::try_from(self.as_nanos()).unwrap_or(u64::MAX))
    }
}

impl<Tz: TimeZone> ToValue for DateTime<Tz> {
    fn to_value(&self) -> Value {
        parts::timestamp_value(&self.fixed_offset())
    }
}

impl ToValue for ByteSize {
    fn to_value(&self) -> Value {
        Value::U64(self.0)
    }
}

impl ToValue for IpAddr {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for HardwareAddr {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl ToValue for Url {
    fn to_value(&self) -> Value {
        parts::url_value(self)
    }
}

impl ToValue for MailAddress {
    fn to_value(&self) -> Value {
        StructValue::new("MailAddress")
            .field("name", Value::String(self.name.clone()))
            .field("address", Value::String(self.address.clone()))
            .display(self.to_string())
            .into()
    }
}

impl ToValue for Regex {
    fn to_value(&self) -> Value {
        parts::pattern_value(self)
    }
}
