//! Key Codec Module
//!
//! Composes a namespace prefix and a logical key into the effective key
//! sent to the backend.

/// Separator placed between the prefix and the logical key.
pub const KEY_SEPARATOR: &str = "-";

// == Make Key ==
/// Returns `prefix + "-" + key`.
///
/// No character validation is performed. Keys containing the separator
/// are accepted and may produce ambiguous effective keys.
pub fn make_key(prefix: &str, key: &str) -> String {
    let mut effective = String::with_capacity(prefix.len() + KEY_SEPARATOR.len() + key.len());
    effective.push_str(prefix);
    effective.push_str(KEY_SEPARATOR);
    effective.push_str(key);
    effective
}
