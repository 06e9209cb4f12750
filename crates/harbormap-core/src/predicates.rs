//! Shape predicates

use crate::value::Value;

/// Marker for read-only access
pub const READ_ONLY: &str = "ro";

/// Marker for read-write access
pub const READ_WRITE: &str = "rw";

/// Prefix of a path relative to the current directory
pub const CURRENT_DIR: &str = "./";

/// Whether `value` is a string that looks like an absolute or `./`-relative path.
pub fn is_path_like(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.starts_with('/') || s.starts_with(CURRENT_DIR))
}

/// Whether `value` asks for read-only access.
///
/// Any truthy value except the string `"rw"` counts as read-only, so `"yes"`
/// or `1` are read-only too. Falsy values, including null, mean read-write.
pub fn is_read_only(value: &Value) -> bool {
    value.is_truthy() && value.as_str() != Some(READ_WRITE)
}

/// Whether `value` is unmistakably an access flag: a boolean, `"ro"`, or `"rw"`
pub fn is_access_marker(value: &Value) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::String(s) => s == READ_ONLY || s == READ_WRITE,
        _ => false,
    }
}
