use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::book::Book;
use crate::domain::types::RecommendationKind;
use crate::domain::video::Video;
use crate::domain::website::Website;

/// Listing row common to websites, books and videos.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationDto {
    pub id: i32,
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    /// Where the recommended resource lives.
    pub url: String,
    pub image_url: Option<String>,
    pub author_id: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub created_at: NaiveDateTime,
    pub upvotes: usize,
    pub downvotes: usize,
    pub bookmarks: usize,
    pub score: i64,
}

impl From<Website> for RecommendationDto {
    fn from(value: Website) -> Self {
        Self {
            id: value.id.get(),
            kind: RecommendationKind::Website,
            score: value.score(),
            upvotes: value.counts.upvotes,
            downvotes: value.counts.downvotes,
            bookmarks: value.counts.bookmarks,
            title: value.title.into_inner(),
            description: value.description.into_inner(),
            url: value.url.into_inner(),
            image_url: value.image_url.map(|u| u.into_inner()),
            author_id: value.author_id.get(),
            category_id: value.category_id.get(),
            subcategory_id: value.subcategory_id.get(),
            created_at: value.created_at,
        }
    }
}

impl From<Book> for RecommendationDto {
    fn from(value: Book) -> Self {
        Self {
            id: value.id.get(),
            kind: RecommendationKind::Book,
            score: value.score(),
            upvotes: value.counts.upvotes,
            downvotes: value.counts.downvotes,
            bookmarks: value.counts.bookmarks,
            title: value.title.into_inner(),
            description: value.description.into_inner(),
            url: value.url.into_inner(),
            image_url: Some(value.image_url.into_inner()),
            author_id: value.recommended_by.get(),
            category_id: value.category_id.get(),
            subcategory_id: value.subcategory_id.get(),
            created_at: value.created_at,
        }
    }
}

impl From<Video> for RecommendationDto {
    fn from(value: Video) -> Self {
        Self {
            id: value.id.get(),
            kind: RecommendationKind::Video,
            score: value.score(),
            upvotes: value.counts.upvotes,
            downvotes: value.counts.downvotes,
            bookmarks: value.counts.bookmarks,
            title: value.title.into_inner(),
            description: value.description.into_inner(),
            url: value.video_url.into_inner(),
            image_url: Some(value.image_url.into_inner()),
            author_id: value.recommended_by.get(),
            category_id: value.category_id.get(),
            subcategory_id: value.subcategory_id.get(),
            created_at: value.created_at,
        }
    }
}
