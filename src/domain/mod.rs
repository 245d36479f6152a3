//! Domain entities and value objects, free of persistence concerns.

pub mod book;
pub mod category;
pub mod comment;
pub mod isbn;
pub mod slug;
pub mod types;
pub mod user;
pub mod video;
pub mod website;
