//! Converters for special destination types.
//!
//! Each converter produces a new value from the source and the destination's current
//! value; the dispatcher stores it only on success. Pointer layers are followed before the
//! string check, so `Some("2s")` parses like `"2s"`.

use std::net::IpAddr;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use url::Url;

use super::{Policy, dispatch};
use crate::config;
use crate::error::{ConvertError, ParseError};
use crate::kind::{Kind, KindSet};
use crate::slot::{Build, Slot, Special, Target};
use crate::special::parts::{PatternParts, TimestampParts, UrlParts};
use crate::special::{ByteSize, HardwareAddr, MailAddress};
use crate::value::Value;

pub(super) fn convert(src: &Value, dst: Special<'_>, policy: Policy) -> Result<(), ConvertError> {
    match dst {
        Special::Duration(dst) => *dst = duration(src, *dst, policy)?,
        Special::Timestamp(dst) => *dst = timestamp(src, dst, policy)?,
        Special::ByteSize(dst) => *dst = byte_size(src, *dst, policy)?,
        Special::Ip(dst) => *dst = ip(src)?,
        Special::HardwareAddr(dst) => *dst = hardware_addr(src)?,
        Special::Url(dst) => *dst = url(src, Some(&*dst), policy)?,
        Special::MailAddress(dst) => *dst = mail_address(src, dst, policy)?,
        Special::Pattern(dst) => *dst = pattern(src, Some(&*dst), policy)?,
    }
    Ok(())
}

fn parse<T>(target: &'static str, text: &str) -> Result<T, ConvertError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    text.parse::<T>()
        .map_err(|err| ParseError::new(target, text, err).into())
}

fn duration(src: &Value, current: Duration, policy: Policy) -> Result<Duration, ConvertError> {
    match src.indirect() {
        Value::String(s) => humantime::parse_duration(s)
            .map_err(|err| ParseError::new("duration", s.as_str(), err).into()),
        src if src.kind().is(KindSet::UINT) => {
            let mut nanos = u64::try_from(current.as_nanos()).unwrap_or(u64::MAX);
            dispatch(src, nanos.slot(), policy)?;
            Ok(Duration::from_nanos(nanos))
        }
        src => {
            let mut nanos = i64::try_from(current.as_nanos()).unwrap_or(i64::MAX);
            dispatch(src, nanos.slot(), policy)?;
            u64::try_from(nanos)
                .map(Duration::from_nanos)
                .map_err(|_| ConvertError::overflow(src, Kind::U64))
        }
    }
}

fn timestamp(
    src: &Value,
    current: &DateTime<FixedOffset>,
    policy: Policy,
) -> Result<DateTime<FixedOffset>, ConvertError> {
    match src.indirect() {
        Value::String(s) => DateTime::parse_from_str(s, &config::time_layout())
            .map_err(|err| ParseError::new("timestamp", s.as_str(), err).into()),
        src => {
            let mut parts = TimestampParts::of(current);
            dispatch(src, Slot::Struct(&mut parts), policy)?;
            parts.assemble()
        }
    }
}

fn byte_size(src: &Value, current: ByteSize, policy: Policy) -> Result<ByteSize, ConvertError> {
    match src.indirect() {
        Value::String(s) => parse("byte size", s),
        src => {
            let mut size = current;
            dispatch(src, Slot::Struct(&mut size), policy)?;
            Ok(size)
        }
    }
}

fn ip(src: &Value) -> Result<IpAddr, ConvertError> {
    match src.indirect() {
        Value::String(s) => parse("IP address", s),
        src => Err(ConvertError::cannot_convert(src, Kind::Array)),
    }
}

fn hardware_addr(src: &Value) -> Result<HardwareAddr, ConvertError> {
    match src.indirect() {
        Value::String(s) => parse("MAC address", s),
        src => Err(ConvertError::cannot_convert(src, Kind::Slice)),
    }
}

fn url(src: &Value, current: Option<&Url>, policy: Policy) -> Result<Url, ConvertError> {
    match src.indirect() {
        Value::String(s) => {
            Url::parse(s).map_err(|err| ParseError::new("url", s.as_str(), err).into())
        }
        src => {
            let mut parts = current.map(UrlParts::of).unwrap_or_default();
            dispatch(src, Slot::Struct(&mut parts), policy)?;
            parts.assemble()
        }
    }
}

fn mail_address(
    src: &Value,
    current: &MailAddress,
    policy: Policy,
) -> Result<MailAddress, ConvertError> {
    match src.indirect() {
        Value::String(s) => parse("mail address", s),
        src => {
            let mut address = current.clone();
            dispatch(src, Slot::Struct(&mut address), policy)?;
            Ok(address)
        }
    }
}

fn pattern(src: &Value, current: Option<&Regex>, policy: Policy) -> Result<Regex, ConvertError> {
    match src.indirect() {
        Value::String(s) => {
            Regex::new(s).map_err(|err| ParseError::new("regex", s.as_str(), err).into())
        }
        src => {
            let mut parts = current.map(PatternParts::of).unwrap_or_default();
            dispatch(src, Slot::Struct(&mut parts), policy)?;
            parts.assemble()
        }
    }
}

// ============================================================================
// Types without a zero value
// ============================================================================

impl Build for IpAddr {
    fn build(src: &Value, _policy: Policy) -> Result<Self, ConvertError> {
        ip(src)
    }
}

impl Build for Url {
    fn build(src: &Value, policy: Policy) -> Result<Self, ConvertError> {
        url(src, None, policy)
    }
}

impl Build for Regex {
    fn build(src: &Value, policy: Policy) -> Result<Self, ConvertError> {
        pattern(src, None, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::StructValue;

    #[test]
    fn duration_from_text_and_nanos() {
        let two = Value::from("2s");
        assert_eq!(
            duration(&two, Duration::ZERO, Policy::Weak).unwrap(),
            Duration::from_secs(2)
        );
        assert_eq!(
            duration(&Value::U64(1500), Duration::ZERO, Policy::Strict).unwrap(),
            Duration::from_nanos(1500)
        );
        let err = duration(&Value::from("2 fortnights"), Duration::ZERO, Policy::Weak).unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn duration_from_signed_nanos() {
        for src in [Value::I32(5), Value::I64(5)] {
            assert_eq!(
                duration(&src, Duration::ZERO, Policy::Strict).unwrap(),
                Duration::from_nanos(5)
            );
        }
        let err = duration(&Value::I64(-5), Duration::ZERO, Policy::Strict).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Overflow {
                value: Value::I64(-5),
                src: Kind::I64,
                dst: Kind::U64
            }
        ));
        assert!(duration(&Value::F64(5.0), Duration::ZERO, Policy::Strict).is_err());
    }

    #[test]
    fn pointer_layers_are_followed_before_string_check() {
        let src = Value::Pointer(Some(Box::new(Value::from("10.0.0.1"))));
        assert_eq!(ip(&src).unwrap(), IpAddr::from([10, 0, 0, 1]));
    }

    #[test]
    fn ip_and_mac_reject_non_strings() {
        assert!(matches!(
            ip(&Value::U32(1)),
            Err(ConvertError::CannotConvert {
                src: Kind::U32,
                dst: Kind::Array
            })
        ));
        assert!(matches!(
            hardware_addr(&Value::Slice(vec![Value::U8(1)])),
            Err(ConvertError::CannotConvert {
                src: Kind::Slice,
                dst: Kind::Slice
            })
        ));
    }

    #[test]
    fn byte_size_struct_fallback() {
        let src = Value::Struct(StructValue::new("Limits").field("bytes", Value::U32(4096)));
        assert_eq!(
            byte_size(&src, ByteSize(0), Policy::Strict).unwrap(),
            ByteSize(4096)
        );
        assert_eq!(
            byte_size(&Value::U64(7), ByteSize(0), Policy::Strict).unwrap(),
            ByteSize(7)
        );
    }

    #[test]
    fn url_from_map_without_current() {
        let src = Value::Map(vec![
            (Value::from("scheme"), Value::from("https")),
            (Value::from("host"), Value::from("example.org")),
            (Value::from("path"), Value::from("/docs")),
        ]);
        let url = Url::build(&src, Policy::Strict).unwrap();
        assert_eq!(url.as_str(), "https://example.org/docs");
    }

    #[test]
    fn pattern_keeps_parser_error() {
        let err = Regex::build(&Value::from("(unclosed"), Policy::Weak).unwrap_err();
        let ConvertError::Parse(parse) = err else {
            panic!("expected parse error");
        };
        assert!(parse.cause_as::<regex::Error>().is_some());
    }
}
