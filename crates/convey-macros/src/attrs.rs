//! Attribute parsing for `#[convey(...)]`.

use syn::{Attribute, LitStr};

/// Parsed `#[convey(...)]` attributes on a struct.
#[derive(Debug, Default)]
pub struct TypeAttrs {
    /// Type name reported in errors and source values (default: Rust struct name)
    pub name: Option<String>,
    /// Render source values through the struct's `Display` impl
    pub display: bool,
    /// Do not implement `Zero` (for structs holding types without a zero value)
    pub no_zero: bool,
}

/// Parsed `#[convey(...)]` attributes on a field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Override the field name used for matching
    pub rename: Option<String>,
    /// Field is described but cannot be written
    pub readonly: bool,
    /// Field is invisible to conversions
    pub skip: bool,
}

impl TypeAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("convey") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.name = Some(value.value());
                } else if meta.path.is_ident("display") {
                    result.display = true;
                } else if meta.path.is_ident("no_zero") {
                    result.no_zero = true;
                } else {
                    return Err(meta.error(format!(
                        "unknown convey attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        Ok(result)
    }
}

impl FieldAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("convey") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: LitStr = meta.value()?.parse()?;
                    result.rename = Some(value.value());
                } else if meta.path.is_ident("readonly") {
                    result.readonly = true;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else {
                    return Err(meta.error(format!(
                        "unknown convey field attribute: {}",
                        meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
                    )));
                }
                Ok(())
            })?;
        }

        if result.skip && (result.readonly || result.rename.is_some()) {
            return Err(syn::Error::new_spanned(
                &attrs[0],
                "`skip` cannot be combined with `rename` or `readonly`",
            ));
        }

        Ok(result)
    }
}
