//! Diesel row models and their conversions into domain entities.

pub mod book;
pub mod category;
pub mod comment;
#[cfg(feature = "app")]
pub mod config;
pub mod user;
pub mod video;
pub mod website;
