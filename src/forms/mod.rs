//! Request-shaped input structs and their conversion into typed payloads.

pub mod categories;
pub mod comments;
pub mod recommendations;

/// Treats an empty or whitespace-only optional field as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
