use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::isbn::Isbn;
use crate::domain::types::{
    BookAuthor, BookDescription, BookId, BookTitle, BookUrl, CategoryId, ImageUrl,
    RelationCounts, SubCategoryId, UserId,
};

/// A book recommended by a member, identified by its ISBN.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub isbn: Isbn,
    pub title: BookTitle,
    pub recommended_by: UserId,
    pub category_id: CategoryId,
    pub subcategory_id: SubCategoryId,
    pub author: BookAuthor,
    pub description: BookDescription,
    pub created_at: NaiveDateTime,
    /// Link to a store page where the book can be bought.
    pub url: BookUrl,
    /// Cover image.
    pub image_url: ImageUrl,
    pub publish_date: NaiveDate,
    pub counts: RelationCounts,
}

impl Book {
    pub fn score(&self) -> i64 {
        self.counts.score()
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Information required to create a new [`Book`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBook {
    pub isbn: Isbn,
    pub title: BookTitle,
    pub recommended_by: UserId,
    pub category_id: CategoryId,
    pub subcategory_id: SubCategoryId,
    pub author: BookAuthor,
    pub description: BookDescription,
    pub created_at: NaiveDateTime,
    pub url: BookUrl,
    pub image_url: ImageUrl,
    pub publish_date: NaiveDate,
}
