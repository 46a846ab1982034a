//! Composite converters: array, slice, map, struct, pointer and interface destinations.
//!
//! Scalar sources (bool and numeric, not strings) are treated as one-element sources.
//! Every element goes back through [`dispatch`], and the first failing element aborts the
//! conversion with earlier elements left written.

use rustc_hash::FxHashMap;

use super::{Policy, dispatch};
use crate::error::ConvertError;
use crate::kind::{Kind, KindSet};
use crate::slot::{ArraySlot, Field, MapSlot, PointerSlot, SliceSlot, StructSlot};
use crate::value::Value;

fn is_scalar(value: &Value) -> bool {
    value.kind().is(KindSet::SCALAR)
}

/// Elements of a sequence-like source, or `None` if the source is not sequence-like.
///
/// Struct fields count as elements in declaration order.
fn elements(src: &Value) -> Option<Box<dyn Iterator<Item = &Value> + '_>> {
    match src {
        Value::Array(items) | Value::Slice(items) => Some(Box::new(items.iter())),
        Value::Struct(s) => Some(Box::new(s.fields.iter().map(|(_, v)| v))),
        _ => None,
    }
}

pub(super) fn to_array(
    src: &Value,
    dst: &mut dyn ArraySlot,
    policy: Policy,
) -> Result<(), ConvertError> {
    let src = src.indirect();
    if is_scalar(src) {
        if dst.len() > 0 {
            dispatch(src, dst.element(0), policy)?;
        }
        return Ok(());
    }

    let items = elements(src).ok_or_else(|| ConvertError::cannot_convert(src, Kind::Array))?;
    let capacity = dst.len();
    for (index, item) in items.take(capacity).enumerate() {
        dispatch(item, dst.element(index), policy)
            .inspect_err(|err| tracing::debug!(index, %err, "array element conversion failed"))?;
    }
    Ok(())
}

/// Convert into `index`, appending when `index` is one past the end.
fn convert_element(
    dst: &mut dyn SliceSlot,
    index: usize,
    src: &Value,
    policy: Policy,
) -> Result<(), ConvertError> {
    if index < dst.len() {
        dispatch(src, dst.element(index), policy)
    } else {
        dst.push_from(src, policy)
    }
}

pub(super) fn to_slice(
    src: &Value,
    dst: &mut dyn SliceSlot,
    policy: Policy,
) -> Result<(), ConvertError> {
    let src = src.indirect();
    if is_scalar(src) {
        return convert_element(dst, 0, src, policy);
    }

    let items = elements(src).ok_or_else(|| ConvertError::cannot_convert(src, Kind::Slice))?;
    let (lower, _) = items.size_hint();
    dst.reserve(lower.saturating_sub(dst.len()));
    for (index, item) in items.enumerate() {
        convert_element(dst, index, item, policy)
            .inspect_err(|err| tracing::debug!(index, %err, "slice element conversion failed"))?;
    }
    Ok(())
}

pub(super) fn to_map(src: &Value, dst: &mut dyn MapSlot, policy: Policy) -> Result<(), ConvertError> {
    let src = src.indirect();
    if is_scalar(src) {
        return dst.convert_entry(None, policy, src, policy);
    }

    match src {
        Value::Map(entries) => {
            for (key, value) in entries {
                dst.convert_entry(Some(key), policy, value, policy)
                    .inspect_err(|err| tracing::debug!(%key, %err, "map entry conversion failed"))?;
            }
            Ok(())
        }
        Value::Array(items) | Value::Slice(items) => {
            for (index, item) in items.iter().enumerate() {
                let key = Value::Isize(index as isize);
                dst.convert_entry(Some(&key), Policy::Weak, item, policy)
                    .inspect_err(|err| tracing::debug!(index, %err, "map entry conversion failed"))?;
            }
            Ok(())
        }
        Value::Struct(s) => {
            for (name, value) in &s.fields {
                let key = Value::String(name.to_string());
                dst.convert_entry(Some(&key), Policy::Weak, value, policy)
                    .inspect_err(|err| tracing::debug!(field = %name, %err, "map entry conversion failed"))?;
            }
            Ok(())
        }
        other => Err(ConvertError::cannot_convert(other, Kind::Map)),
    }
}

/// Name lookup over a struct's field descriptors.
///
/// An all-lowercase key matches case-insensitively; when it matches several fields the
/// key is ambiguous and matches none. Any other key must match exactly.
struct FieldIndex {
    exact: FxHashMap<&'static str, usize>,
    folded: FxHashMap<String, Option<usize>>,
}

impl FieldIndex {
    fn new(fields: &'static [Field]) -> Self {
        let mut exact = FxHashMap::default();
        let mut folded: FxHashMap<String, Option<usize>> = FxHashMap::default();
        for (index, field) in fields.iter().enumerate() {
            exact.entry(field.name).or_insert(index);
            folded
                .entry(field.name.to_lowercase())
                .and_modify(|slot| *slot = None)
                .or_insert(Some(index));
        }
        Self { exact, folded }
    }

    fn exact(&self, name: &str) -> Option<usize> {
        self.exact.get(name).copied()
    }

    fn lookup(&self, key: &str) -> Option<usize> {
        if key == key.to_lowercase() {
            self.folded.get(key).copied().flatten()
        } else {
            self.exact(key)
        }
    }
}

fn convert_field(
    dst: &mut dyn StructSlot,
    index: usize,
    src: &Value,
    policy: Policy,
) -> Result<(), ConvertError> {
    let type_name = dst.type_name();
    let Some(field) = dst.fields().get(index).copied() else {
        return Ok(());
    };
    let slot = dst.field(index).ok_or(ConvertError::CannotSet {
        type_name,
        field: field.name,
    })?;
    dispatch(src, slot, policy).inspect_err(|err| {
        tracing::debug!(target_type = type_name, field = field.name, %err, "field conversion failed")
    })
}

pub(super) fn to_struct(
    src: &Value,
    dst: &mut dyn StructSlot,
    policy: Policy,
) -> Result<(), ConvertError> {
    let src = src.indirect();
    if is_scalar(src) {
        return convert_field(dst, 0, src, policy);
    }

    match src {
        Value::Array(items) | Value::Slice(items) => {
            let count = dst.fields().len();
            for (index, item) in items.iter().take(count).enumerate() {
                convert_field(dst, index, item, policy)?;
            }
            Ok(())
        }
        Value::Map(entries) => {
            let index = FieldIndex::new(dst.fields());
            for (key, value) in entries {
                let Value::String(key) = key.indirect() else {
                    continue;
                };
                if let Some(field) = index.lookup(key) {
                    convert_field(dst, field, value, policy)?;
                }
            }
            Ok(())
        }
        Value::Struct(s) => {
            let index = FieldIndex::new(dst.fields());
            for (name, value) in &s.fields {
                if let Some(field) = index.exact(name) {
                    convert_field(dst, field, value, policy)?;
                }
            }
            Ok(())
        }
        other => Err(ConvertError::cannot_convert(other, Kind::Struct)),
    }
}

pub(super) fn to_pointer(
    src: &Value,
    dst: &mut dyn PointerSlot,
    policy: Policy,
) -> Result<(), ConvertError> {
    if src.is_nil() && dst.clear() {
        return Ok(());
    }
    dst.convert_pointee(src, policy)
}

pub(super) fn to_interface(src: &Value, dst: &mut Value) -> Result<(), ConvertError> {
    dst.clone_from(src);
    Ok(())
}
