//! Core library exports for the recommendation site.
//!
//! The crate stores categorized website, book and video recommendations
//! together with comments, votes and bookmarks in SQLite. It exposes the
//! domain types, Diesel models and repositories, validated forms and the
//! service layer that implements the user-facing operations.

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod error_conversions;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "data")]
pub mod services;
