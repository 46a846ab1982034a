//! Struct views of special types.
//!
//! A non-string source converts into a special type field by field. Types that are not
//! structs of their own (timestamps, URLs, patterns) are first decomposed into one of the
//! parts below, converted as a struct, then reassembled. The `ToValue` impls emit the same
//! field names, so a special value survives a trip through a map or struct.

use std::fmt::Write as _;

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use url::Url;

use crate::config;
use crate::error::{ConvertError, InvalidSyntax, ParseError};
use crate::slot::{Field, Slot, StructSlot, Target};
use crate::value::{StructValue, Value};

// ============================================================================
// Timestamp
// ============================================================================

static TIMESTAMP_FIELDS: [Field; 3] = [
    Field::new("secs"),
    Field::new("nanos"),
    Field::new("offset"),
];

/// Seconds and nanoseconds since the Unix epoch, plus the UTC offset in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimestampParts {
    pub secs: i64,
    pub nanos: u32,
    pub offset: i32,
}

impl TimestampParts {
    pub(crate) fn of(ts: &DateTime<FixedOffset>) -> Self {
        Self {
            secs: ts.timestamp(),
            nanos: ts.timestamp_subsec_nanos(),
            offset: ts.offset().local_minus_utc(),
        }
    }

    pub(crate) fn assemble(&self) -> Result<DateTime<FixedOffset>, ConvertError> {
        let offset = FixedOffset::east_opt(self.offset);
        let utc = DateTime::from_timestamp(self.secs, self.nanos);
        match (offset, utc) {
            (Some(offset), Some(utc)) => Ok(utc.with_timezone(&offset)),
            _ => {
                let input = format!("{}.{:09} {:+}", self.secs, self.nanos, self.offset);
                Err(ParseError::new("timestamp", input, InvalidSyntax).into())
            }
        }
    }
}

impl StructSlot for TimestampParts {
    fn type_name(&self) -> &'static str {
        "Timestamp"
    }

    fn fields(&self) -> &'static [Field] {
        &TIMESTAMP_FIELDS
    }

    fn field(&mut self, index: usize) -> Option<Slot<'_>> {
        Some(match index {
            0 => self.secs.slot(),
            1 => self.nanos.slot(),
            2 => self.offset.slot(),
            _ => return None,
        })
    }
}

/// Render with the configured layout, falling back to RFC 3339.
pub(crate) fn format_timestamp(ts: &DateTime<FixedOffset>) -> String {
    render_timestamp(ts, &config::time_layout())
}

fn render_timestamp(ts: &DateTime<FixedOffset>, layout: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", ts.format(layout)).is_err() {
        tracing::debug!(%layout, "time layout failed to render, using RFC 3339");
        return ts.to_rfc3339();
    }
    out
}

pub(crate) fn timestamp_value(ts: &DateTime<FixedOffset>) -> Value {
    let parts = TimestampParts::of(ts);
    StructValue::new("Timestamp")
        .field("secs", Value::I64(parts.secs))
        .field("nanos", Value::U32(parts.nanos))
        .field("offset", Value::I32(parts.offset))
        .display(format_timestamp(ts))
        .into()
}

// ============================================================================
// Url
// ============================================================================

static URL_FIELDS: [Field; 8] = [
    Field::new("scheme"),
    Field::new("username"),
    Field::new("password"),
    Field::new("host"),
    Field::new("port"),
    Field::new("path"),
    Field::new("query"),
    Field::new("fragment"),
];

/// URL components. Empty strings and a zero port mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct UrlParts {
    pub scheme: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub query: String,
    pub fragment: String,
}

impl UrlParts {
    pub(crate) fn of(url: &Url) -> Self {
        Self {
            scheme: url.scheme().to_owned(),
            username: url.username().to_owned(),
            password: url.password().unwrap_or_default().to_owned(),
            host: url.host_str().unwrap_or_default().to_owned(),
            port: url.port().unwrap_or_default(),
            path: url.path().to_owned(),
            query: url.query().unwrap_or_default().to_owned(),
            fragment: url.fragment().unwrap_or_default().to_owned(),
        }
    }

    /// Reassemble the components into URL text and parse it.
    pub(crate) fn assemble(&self) -> Result<Url, ConvertError> {
        let mut text = format!("{}:", self.scheme);
        if !self.host.is_empty() {
            text.push_str("//");
            if !self.username.is_empty() {
                text.push_str(&self.username);
                if !self.password.is_empty() {
                    text.push(':');
                    text.push_str(&self.password);
                }
                text.push('@');
            }
            text.push_str(&self.host);
            if self.port != 0 {
                text.push(':');
                text.push_str(&self.port.to_string());
            }
        }
        text.push_str(&self.path);
        if !self.query.is_empty() {
            text.push('?');
            text.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            text.push('#');
            text.push_str(&self.fragment);
        }
        Url::parse(&text).map_err(|err| ParseError::new("url", text, err).into())
    }
}

impl StructSlot for UrlParts {
    fn type_name(&self) -> &'static str {
        "Url"
    }

    fn fields(&self) -> &'static [Field] {
        &URL_FIELDS
    }

    fn field(&mut self, index: usize) -> Option<Slot<'_>> {
        Some(match index {
            0 => self.scheme.slot(),
            1 => self.username.slot(),
            2 => self.password.slot(),
            3 => self.host.slot(),
            4 => self.port.slot(),
            5 => self.path.slot(),
            6 => self.query.slot(),
            7 => self.fragment.slot(),
            _ => return None,
        })
    }
}

pub(crate) fn url_value(url: &Url) -> Value {
    let parts = UrlParts::of(url);
    StructValue::new("Url")
        .field("scheme", Value::String(parts.scheme))
        .field("username", Value::String(parts.username))
        .field("password", Value::String(parts.password))
        .field("host", Value::String(parts.host))
        .field("port", Value::U16(parts.port))
        .field("path", Value::String(parts.path))
        .field("query", Value::String(parts.query))
        .field("fragment", Value::String(parts.fragment))
        .display(url.as_str())
        .into()
}

// ============================================================================
// Pattern
// ============================================================================

static PATTERN_FIELDS: [Field; 1] = [Field::new("pattern")];

/// The source text of a regular expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PatternParts {
    pub pattern: String,
}

impl PatternParts {
    pub(crate) fn of(re: &Regex) -> Self {
        Self {
            pattern: re.as_str().to_owned(),
        }
    }

    pub(crate) fn assemble(&self) -> Result<Regex, ConvertError> {
        Regex::new(&self.pattern)
            .map_err(|err| ParseError::new("regex", self.pattern.as_str(), err).into())
    }
}

impl StructSlot for PatternParts {
    fn type_name(&self) -> &'static str {
        "Regex"
    }

    fn fields(&self) -> &'static [Field] {
        &PATTERN_FIELDS
    }

    fn field(&mut self, index: usize) -> Option<Slot<'_>> {
        match index {
            0 => Some(self.pattern.slot()),
            _ => None,
        }
    }
}

pub(crate) fn pattern_value(re: &Regex) -> Value {
    StructValue::new("Regex")
        .field("pattern", Value::String(re.as_str().to_owned()))
        .display(re.as_str())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_parts_reassemble() {
        let ts = DateTime::parse_from_rfc3339("2024-03-01T12:30:45.5+02:00").unwrap();
        let parts = TimestampParts::of(&ts);
        assert_eq!(parts.offset, 7200);
        assert_eq!(parts.nanos, 500_000_000);
        assert_eq!(parts.assemble().unwrap(), ts);
    }

    #[test]
    fn timestamp_parts_reject_bad_offset() {
        let parts = TimestampParts {
            secs: 0,
            nanos: 0,
            offset: 86_400,
        };
        assert!(parts.assemble().unwrap_err().is_parse());
    }

    #[test]
    fn unrenderable_layout_falls_back_to_rfc3339() {
        let ts = DateTime::parse_from_rfc3339("2024-03-01T12:30:45+02:00").unwrap();
        assert_eq!(render_timestamp(&ts, "%Y-%Q"), "2024-03-01T12:30:45+02:00");
        assert_eq!(render_timestamp(&ts, "%Y-%m-%d"), "2024-03-01");
    }

    #[test]
    fn url_parts_reassemble() {
        let url = Url::parse("https://user:pw@example.org:8443/a/b?x=1#top").unwrap();
        assert_eq!(UrlParts::of(&url).assemble().unwrap(), url);

        let mailto = Url::parse("mailto:ops@example.org").unwrap();
        assert_eq!(UrlParts::of(&mailto).assemble().unwrap(), mailto);
    }

    #[test]
    fn empty_url_parts_do_not_parse() {
        assert!(UrlParts::default().assemble().unwrap_err().is_parse());
    }
}
