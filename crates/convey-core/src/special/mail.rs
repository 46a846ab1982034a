//! Mail addresses of the form `"Display Name" <user@host>`, `Name <user@host>`,
//! `<user@host>` or a bare `user@host`.
//!
//! Parsing goes through [`lettre::message::Mailbox`], which follows RFC 5322 and drops
//! comments from the display name.

use std::fmt;
use std::str::FromStr;

use lettre::address::AddressError;
use lettre::message::Mailbox;
use thiserror::Error;

/// A single mail address with an optional display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MailAddress {
    pub name: String,
    pub address: String,
}

/// The mailbox grammar rejected the input.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct MailAddressError(#[from] AddressError);

impl MailAddress {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

impl From<Mailbox> for MailAddress {
    fn from(mailbox: Mailbox) -> Self {
        let name = mailbox.name.as_deref().map(str::trim).unwrap_or_default();
        MailAddress::new(name, mailbox.email.to_string())
    }
}

impl FromStr for MailAddress {
    type Err = MailAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mailbox: Mailbox = s.trim().parse()?;
        Ok(mailbox.into())
    }
}

impl fmt::Display for MailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            return write!(f, "<{}>", self.address);
        }
        f.write_str("\"")?;
        for c in self.name.chars() {
            if matches!(c, '"' | '\\') {
                f.write_str("\\")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "\" <{}>", self.address)
    }
}
