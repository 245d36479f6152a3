use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::book::NewBook;
use crate::domain::isbn::Isbn;
use crate::domain::types::{
    BookAuthor, BookDescription, BookTitle, BookUrl, CategoryId, ExternalVideoId, ImageUrl,
    SubCategoryId, TypeConstraintError, UserId, VideoDescription, VideoTitle, VideoUrl,
    WebsiteDescription, WebsiteImageUrl, WebsiteTitle, WebsiteUrl,
};
use crate::domain::video::NewVideo;
use crate::domain::website::NewWebsite;
use crate::forms::non_blank;

/// Errors shared by the three recommendation submission forms.
#[derive(Debug, Error)]
pub enum RecommendationFormError {
    #[error("Recommendation form validation failed: {0}")]
    Validation(String),
    #[error("Recommendation form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Recommendation form contains an invalid date: {0}")]
    InvalidDate(String),
}

impl From<ValidationErrors> for RecommendationFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RecommendationFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Parses a calendar date in `YYYY-MM-DD` form.
fn parse_publish_date(value: &str) -> Result<NaiveDate, RecommendationFormError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| RecommendationFormError::InvalidDate(value.to_string()))
}

/// Parses an RFC 3339 timestamp or a local `datetime-local` input value.
fn parse_publish_at(value: &str) -> Result<NaiveDateTime, RecommendationFormError> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .ok_or_else(|| RecommendationFormError::InvalidDate(value.to_string()))
}

#[derive(Deserialize, Validate)]
pub struct AddWebsiteForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 1))]
    pub subcategory_id: i32,
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    #[validate(length(min = 1, max = 300))]
    pub description: String,
    #[validate(url)]
    pub url: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddWebsiteFormPayload {
    pub category_id: CategoryId,
    pub subcategory_id: SubCategoryId,
    pub title: WebsiteTitle,
    pub description: WebsiteDescription,
    pub url: WebsiteUrl,
    pub image_url: Option<WebsiteImageUrl>,
}

impl AddWebsiteFormPayload {
    pub fn into_new_website(self, author_id: UserId) -> NewWebsite {
        NewWebsite {
            author_id,
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
            title: self.title,
            description: self.description,
            url: self.url,
            image_url: self.image_url,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<AddWebsiteForm> for AddWebsiteFormPayload {
    type Error = RecommendationFormError;

    fn try_from(value: AddWebsiteForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            subcategory_id: SubCategoryId::new(value.subcategory_id)?,
            title: WebsiteTitle::new(value.title)?,
            description: WebsiteDescription::new(value.description)?,
            url: WebsiteUrl::new(value.url)?,
            image_url: non_blank(value.image_url).map(WebsiteImageUrl::new).transpose()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct AddBookForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 1))]
    pub subcategory_id: i32,
    #[validate(length(min = 10, max = 17))]
    pub isbn: String,
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1, max = 128))]
    pub author: String,
    #[validate(length(min = 1, max = 10000))]
    pub description: String,
    #[validate(url)]
    pub url: String,
    #[validate(url)]
    pub image_url: String,
    pub publish_date: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddBookFormPayload {
    pub category_id: CategoryId,
    pub subcategory_id: SubCategoryId,
    pub isbn: Isbn,
    pub title: BookTitle,
    pub author: BookAuthor,
    pub description: BookDescription,
    pub url: BookUrl,
    pub image_url: ImageUrl,
    pub publish_date: NaiveDate,
}

impl AddBookFormPayload {
    pub fn into_new_book(self, recommended_by: UserId) -> NewBook {
        NewBook {
            isbn: self.isbn,
            title: self.title,
            recommended_by,
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
            author: self.author,
            description: self.description,
            created_at: Utc::now().naive_utc(),
            url: self.url,
            image_url: self.image_url,
            publish_date: self.publish_date,
        }
    }
}

impl TryFrom<AddBookForm> for AddBookFormPayload {
    type Error = RecommendationFormError;

    fn try_from(value: AddBookForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            subcategory_id: SubCategoryId::new(value.subcategory_id)?,
            isbn: Isbn::new(&value.isbn)?,
            title: BookTitle::new(value.title)?,
            author: BookAuthor::new(value.author)?,
            description: BookDescription::new(value.description)?,
            url: BookUrl::new(value.url)?,
            image_url: ImageUrl::new(value.image_url)?,
            publish_date: parse_publish_date(&value.publish_date)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct AddVideoForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(range(min = 1))]
    pub subcategory_id: i32,
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    #[validate(length(min = 1, max = 10000))]
    pub description: String,
    pub publish_at: String,
    #[validate(url)]
    pub video_url: String,
    #[validate(url)]
    pub image_url: String,
    #[validate(length(min = 1, max = 128))]
    pub video_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddVideoFormPayload {
    pub category_id: CategoryId,
    pub subcategory_id: SubCategoryId,
    pub title: VideoTitle,
    pub description: VideoDescription,
    pub publish_at: NaiveDateTime,
    pub video_url: VideoUrl,
    pub image_url: ImageUrl,
    pub video_id: ExternalVideoId,
}

impl AddVideoFormPayload {
    pub fn into_new_video(self, recommended_by: UserId) -> NewVideo {
        NewVideo {
            title: self.title,
            recommended_by,
            category_id: self.category_id,
            subcategory_id: self.subcategory_id,
            description: self.description,
            created_at: Utc::now().naive_utc(),
            publish_at: self.publish_at,
            video_url: self.video_url,
            image_url: self.image_url,
            video_id: self.video_id,
        }
    }
}

impl TryFrom<AddVideoForm> for AddVideoFormPayload {
    type Error = RecommendationFormError;

    fn try_from(value: AddVideoForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            subcategory_id: SubCategoryId::new(value.subcategory_id)?,
            title: VideoTitle::new(value.title)?,
            description: VideoDescription::new(value.description)?,
            publish_at: parse_publish_at(&value.publish_at)?,
            video_url: VideoUrl::new(value.video_url)?,
            image_url: ImageUrl::new(value.image_url)?,
            video_id: ExternalVideoId::new(value.video_id)?,
        })
    }
}
