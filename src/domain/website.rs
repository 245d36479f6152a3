use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::{
    CategoryId, RelationCounts, SubCategoryId, UserId, WebsiteDescription, WebsiteId,
    WebsiteImageUrl, WebsiteTitle, WebsiteUrl,
};

/// A website recommended by a member.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Website {
    pub id: WebsiteId,
    pub author_id: UserId,
    pub category_id: CategoryId,
    pub subcategory_id: SubCategoryId,
    pub title: WebsiteTitle,
    pub description: WebsiteDescription,
    pub url: WebsiteUrl,
    pub image_url: Option<WebsiteImageUrl>,
    pub created_at: NaiveDateTime,
    /// Votes and bookmarks aggregated when the row was loaded.
    pub counts: RelationCounts,
}

impl Website {
    pub fn score(&self) -> i64 {
        self.counts.score()
    }
}

impl Display for Website {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Information required to create a new [`Website`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewWebsite {
    pub author_id: UserId,
    pub category_id: CategoryId,
    pub subcategory_id: SubCategoryId,
    pub title: WebsiteTitle,
    pub description: WebsiteDescription,
    pub url: WebsiteUrl,
    pub image_url: Option<WebsiteImageUrl>,
    pub created_at: NaiveDateTime,
}
