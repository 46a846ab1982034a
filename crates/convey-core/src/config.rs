//! Process-wide conversion settings.
//!
//! The only setting is the timestamp layout used to parse strings into
//! `chrono::DateTime<FixedOffset>` destinations and to render timestamp sources. Layouts
//! use strftime syntax. Set it once during startup, before conversions run.

use std::sync::{PoisonError, RwLock};

use chrono::format::{Item, StrftimeItems};
use thiserror::Error;

/// `Mon Jan 2 15:04:05 -0700 MST 2006`.
pub const DEFAULT_TIME_LAYOUT: &str = "%a %b %e %H:%M:%S %z %Z %Y";

static TIME_LAYOUT: RwLock<Option<String>> = RwLock::new(None);

/// A layout containing an unknown or malformed strftime specifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time layout {0:?}")]
pub struct InvalidLayout(pub String);

/// The layout currently used for timestamps.
pub fn time_layout() -> String {
    TIME_LAYOUT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_deref()
        .unwrap_or(DEFAULT_TIME_LAYOUT)
        .to_owned()
}

/// Replace the timestamp layout for the whole process.
pub fn set_time_layout(layout: impl Into<String>) -> Result<(), InvalidLayout> {
    let layout = layout.into();
    if StrftimeItems::new(&layout).any(|item| matches!(item, Item::Error)) {
        return Err(InvalidLayout(layout));
    }
    tracing::debug!(%layout, "time layout changed");
    *TIME_LAYOUT.write().unwrap_or_else(PoisonError::into_inner) = Some(layout);
    Ok(())
}

/// Restore [`DEFAULT_TIME_LAYOUT`].
pub fn reset_time_layout() {
    tracing::debug!(layout = DEFAULT_TIME_LAYOUT, "time layout reset");
    *TIME_LAYOUT.write().unwrap_or_else(PoisonError::into_inner) = None;
}
