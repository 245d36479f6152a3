use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::{
    CategoryId, ExternalVideoId, ImageUrl, RelationCounts, SubCategoryId, UserId,
    VideoDescription, VideoId, VideoTitle, VideoUrl,
};

/// A video recommended by a member, identified by its hosting platform id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: VideoId,
    pub title: VideoTitle,
    pub recommended_by: UserId,
    pub category_id: CategoryId,
    pub subcategory_id: SubCategoryId,
    pub description: VideoDescription,
    pub created_at: NaiveDateTime,
    pub publish_at: NaiveDateTime,
    pub video_url: VideoUrl,
    pub image_url: ImageUrl,
    pub video_id: ExternalVideoId,
    pub counts: RelationCounts,
}

impl Video {
    pub fn score(&self) -> i64 {
        self.counts.score()
    }
}

impl Display for Video {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Information required to create a new [`Video`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVideo {
    pub title: VideoTitle,
    pub recommended_by: UserId,
    pub category_id: CategoryId,
    pub subcategory_id: SubCategoryId,
    pub description: VideoDescription,
    pub created_at: NaiveDateTime,
    pub publish_at: NaiveDateTime,
    pub video_url: VideoUrl,
    pub image_url: ImageUrl,
    pub video_id: ExternalVideoId,
}
