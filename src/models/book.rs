use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::book::{Book as DomainBook, NewBook as DomainNewBook};
use crate::domain::isbn::Isbn;
use crate::domain::types::{
    BookAuthor, BookDescription, BookTitle, BookUrl, ImageUrl, RelationCounts,
    TypeConstraintError,
};

/// Diesel model representing the `books` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::books)]
pub struct Book {
    pub id: i32,
    pub isbn: String,
    pub title: String,
    pub recommended_by: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub author: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub url: String,
    pub image_url: String,
    pub publish_date: NaiveDate,
}

/// Insertable form of [`Book`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::books)]
pub struct NewBook<'a> {
    pub isbn: &'a str,
    pub title: &'a str,
    pub recommended_by: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub author: &'a str,
    pub description: &'a str,
    pub created_at: NaiveDateTime,
    pub url: &'a str,
    pub image_url: &'a str,
    pub publish_date: NaiveDate,
}

impl TryFrom<Book> for DomainBook {
    type Error = TypeConstraintError;

    fn try_from(book: Book) -> Result<Self, Self::Error> {
        Ok(Self {
            id: book.id.try_into()?,
            isbn: Isbn::new(book.isbn)?,
            title: BookTitle::new(book.title)?,
            recommended_by: book.recommended_by.try_into()?,
            category_id: book.category_id.try_into()?,
            subcategory_id: book.subcategory_id.try_into()?,
            author: BookAuthor::new(book.author)?,
            description: BookDescription::new(book.description)?,
            created_at: book.created_at,
            url: BookUrl::new(book.url)?,
            image_url: ImageUrl::new(book.image_url)?,
            publish_date: book.publish_date,
            counts: RelationCounts::default(),
        })
    }
}

impl<'a> From<&'a DomainNewBook> for NewBook<'a> {
    fn from(book: &'a DomainNewBook) -> Self {
        Self {
            isbn: book.isbn.as_str(),
            title: book.title.as_str(),
            recommended_by: book.recommended_by.get(),
            category_id: book.category_id.get(),
            subcategory_id: book.subcategory_id.get(),
            author: book.author.as_str(),
            description: book.description.as_str(),
            created_at: book.created_at,
            url: book.url.as_str(),
            image_url: book.image_url.as_str(),
            publish_date: book.publish_date,
        }
    }
}
