//! Flat, serializable views handed to templates and API consumers.

pub mod categories;
pub mod comments;
pub mod recommendations;
