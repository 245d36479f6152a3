use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{
    RelationCounts, TypeConstraintError, WebsiteDescription, WebsiteImageUrl, WebsiteTitle,
    WebsiteUrl,
};
use crate::domain::website::{NewWebsite as DomainNewWebsite, Website as DomainWebsite};

/// Diesel model representing the `websites` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::websites)]
pub struct Website {
    pub id: i32,
    pub author_id: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Website`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::websites)]
pub struct NewWebsite<'a> {
    pub author_id: i32,
    pub category_id: i32,
    pub subcategory_id: i32,
    pub title: &'a str,
    pub description: &'a str,
    pub url: &'a str,
    pub image_url: Option<&'a str>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Website> for DomainWebsite {
    type Error = TypeConstraintError;

    fn try_from(website: Website) -> Result<Self, Self::Error> {
        Ok(Self {
            id: website.id.try_into()?,
            author_id: website.author_id.try_into()?,
            category_id: website.category_id.try_into()?,
            subcategory_id: website.subcategory_id.try_into()?,
            title: WebsiteTitle::new(website.title)?,
            description: WebsiteDescription::new(website.description)?,
            url: WebsiteUrl::new(website.url)?,
            image_url: website.image_url.map(WebsiteImageUrl::new).transpose()?,
            created_at: website.created_at,
            counts: RelationCounts::default(),
        })
    }
}

impl<'a> From<&'a DomainNewWebsite> for NewWebsite<'a> {
    fn from(website: &'a DomainNewWebsite) -> Self {
        Self {
            author_id: website.author_id.get(),
            category_id: website.category_id.get(),
            subcategory_id: website.subcategory_id.get(),
            title: website.title.as_str(),
            description: website.description.as_str(),
            url: website.url.as_str(),
            image_url: website.image_url.as_ref().map(|u| u.as_str()),
            created_at: website.created_at,
        }
    }
}
