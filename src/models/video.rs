use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{
    ExternalVideoId, ImageUrl, RelationCounts, TypeConstraintError, VideoDescription, VideoTitle,
    VideoUrl,
};
use crate::domain::video::{NewVideo as DomainNewVideo, Video as DomainVideo};

/// Diesel model representing the `videos` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::videos)]
pub struct Video {
    pub id: i32,
    pub title: String,
    pub recommended_by: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub publish_at: NaiveDateTime,
    pub video_url: String,
    pub image_url: String,
    pub video_id: String,
}

/// Insertable form of [`Video`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::videos)]
pub struct NewVideo<'a> {
    pub title: &'a str,
    pub recommended_by: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub description: &'a str,
    pub created_at: NaiveDateTime,
    pub publish_at: NaiveDateTime,
    pub video_url: &'a str,
    pub image_url: &'a str,
    pub video_id: &'a str,
}

impl TryFrom<Video> for DomainVideo {
    type Error = TypeConstraintError;

    fn try_from(video: Video) -> Result<Self, Self::Error> {
        Ok(Self {
            id: video.id.try_into()?,
            title: VideoTitle::new(video.title)?,
            recommended_by: video.recommended_by.try_into()?,
            category_id: video.category_id.try_into()?,
            subcategory_id: video.subcategory_id.try_into()?,
            description: VideoDescription::new(video.description)?,
            created_at: video.created_at,
            publish_at: video.publish_at,
            video_url: VideoUrl::new(video.video_url)?,
            image_url: ImageUrl::new(video.image_url)?,
            video_id: ExternalVideoId::new(video.video_id)?,
            counts: RelationCounts::default(),
        })
    }
}

impl<'a> From<&'a DomainNewVideo> for NewVideo<'a> {
    fn from(video: &'a DomainNewVideo) -> Self {
        Self {
            title: video.title.as_str(),
            recommended_by: video.recommended_by.get(),
            category_id: video.category_id.get(),
            subcategory_id: video.subcategory_id.get(),
            description: video.description.as_str(),
            created_at: video.created_at,
            publish_at: video.publish_at,
            video_url: video.video_url.as_str(),
            image_url: video.image_url.as_str(),
            video_id: video.video_id.as_str(),
        }
    }
}
