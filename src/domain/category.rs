use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::slug::Slug;
use crate::domain::types::{CategoryId, CategoryName, ImagePath, SubCategoryId, SubCategoryName};

/// Directory prefix for uploaded category images.
pub const CATEGORY_IMAGE_DIR: &str = "category_images";
/// Directory prefix for uploaded subcategory images.
pub const SUBCATEGORY_IMAGE_DIR: &str = "subcategory_images";

/// Top-level grouping of recommendations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    /// Always derived from `name` when the row is saved.
    pub slug: Slug,
    pub image: Option<ImagePath>,
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Data required to insert or rename a [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCategory {
    pub name: CategoryName,
    pub image: Option<ImagePath>,
}

/// Second-level grouping scoped to one [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub category_id: CategoryId,
    pub name: SubCategoryName,
    pub slug: Slug,
    pub image: Option<ImagePath>,
    pub created_at: NaiveDateTime,
}

impl Display for SubCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Data required to insert a new [`SubCategory`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSubCategory {
    pub category_id: CategoryId,
    pub name: SubCategoryName,
    pub image: Option<ImagePath>,
    pub created_at: NaiveDateTime,
}

/// Editable fields of a [`SubCategory`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubCategoryUpdate {
    pub name: SubCategoryName,
    pub image: Option<ImagePath>,
}
