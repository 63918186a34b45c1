//! Serde helpers for the engine document.
//!
//! Used with `#[serde(skip_serializing_if = ...)]` so default values are
//! omitted from the generated JSON.

/// Returns `true` if the boolean value is `false`.
#[inline]
pub fn is_false(b: &bool) -> bool {
    !*b
}

/// Returns `true` if the u32 value is zero.
#[inline]
pub fn is_zero_u32(v: &u32) -> bool {
    *v == 0
}
