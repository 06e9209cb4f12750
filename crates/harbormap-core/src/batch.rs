//! Batch conversion
//!
//! Lifts a single-value converter over the container shapes users write for
//! lists of things: nothing, one scalar, a list, or a mapping. Output order
//! follows input order. The first element that fails aborts the batch.

use crate::convert::{Converter, HostVolumes, Links, PortBindings, Volumes};
use crate::error::{Error, Result};
use crate::records::{ContainerLink, Ident, PortBinding, SharedVolume};
use crate::shape::Shape;
use crate::value::Value;

/// Wrap `value` in a list.
///
/// Null gives an empty list, lists are copied, and strings or placeholders
/// become a one-element list.
pub fn to_list(value: &Value) -> Result<Vec<Value>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Seq(items) => Ok(items.clone()),
        Value::String(_) | Value::Lazy(_) => Ok(vec![value.clone()]),
        other => Err(Error::invalid_type(
            "list",
            "list, tuple, or string",
            other.type_name(),
        )),
    }
}

/// [`to_list`], with every element read as an identifier
pub fn to_ident_list(value: &Value) -> Result<Vec<Ident>> {
    to_list(value)?
        .iter()
        .map(|item| Ident::from_value("list element", item))
        .collect()
}

/// Convert every element of `value` with `C`.
///
/// Mapping entries are converted as `(key, value)` pairs.
pub fn convert_all<C: Converter>(value: &Value) -> Result<Vec<C::Output>> {
    let records = match value {
        Value::Null => Vec::new(),
        Value::String(_) | Value::Lazy(_) => vec![C::convert(Shape::Scalar(value))?],
        Value::Seq(items) => items
            .iter()
            .map(|item| C::convert(Shape::of(item)))
            .collect::<Result<_>>()?,
        Value::Map(entries) => entries
            .iter()
            .map(|(k, v)| C::convert(Shape::Pair(k, v)))
            .collect::<Result<_>>()?,
        other => match C::canonical(other) {
            Some(record) => vec![record.clone()],
            None => {
                return Err(Error::invalid_type(
                    C::TARGET,
                    C::BATCH_EXPECTED,
                    other.type_name(),
                ));
            }
        },
    };
    tracing::trace!(target_kind = C::TARGET, count = records.len(), "converted batch");
    Ok(records)
}

/// Convert to a list of shared volumes
pub fn to_volumes(value: &Value) -> Result<Vec<SharedVolume>> {
    convert_all::<Volumes>(value)
}

/// Convert to a list of host-bound shared volumes
pub fn to_host_volumes(value: &Value) -> Result<Vec<SharedVolume>> {
    convert_all::<HostVolumes>(value)
}

/// Convert to a list of container links
pub fn to_links(value: &Value) -> Result<Vec<ContainerLink>> {
    convert_all::<Links>(value)
}

/// Convert to a list of port bindings
pub fn to_port_bindings(value: &Value) -> Result<Vec<PortBinding>> {
    convert_all::<PortBindings>(value)
}
