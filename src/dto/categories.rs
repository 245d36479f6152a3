use serde::Serialize;

use crate::domain::category::{Category, SubCategory};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            slug: value.slug.into_inner(),
            image: value.image.map(|i| i.into_inner()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryDto {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}

impl From<SubCategory> for SubCategoryDto {
    fn from(value: SubCategory) -> Self {
        Self {
            id: value.id.get(),
            category_id: value.category_id.get(),
            name: value.name.into_inner(),
            slug: value.slug.into_inner(),
            image: value.image.map(|i| i.into_inner()),
        }
    }
}
