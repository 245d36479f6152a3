use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    NewSubCategory as DomainNewSubCategory, SubCategory as DomainSubCategory, SubCategoryUpdate,
};
use crate::domain::slug::Slug;
use crate::domain::types::{CategoryName, ImagePath, SubCategoryName, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}

/// Insertable/patchable form of [`Category`].
///
/// The slug is computed from the name here so every insert and rename
/// stores a fresh one.
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            slug: Slug::from_stored(category.slug)?,
            image: category.image.map(ImagePath::new).transpose()?,
        })
    }
}

impl TryFrom<&DomainNewCategory> for NewCategory {
    type Error = TypeConstraintError;

    fn try_from(category: &DomainNewCategory) -> Result<Self, Self::Error> {
        let slug = Slug::from_name(category.name.as_str(), "category name")?;
        Ok(Self {
            name: category.name.as_str().to_string(),
            slug: slug.into_inner(),
            image: category.image.as_ref().map(|i| i.as_str().to_string()),
        })
    }
}

/// Diesel model representing the `subcategories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct SubCategory {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`SubCategory`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct NewSubCategory {
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Changeset applied when a subcategory is renamed or its image replaced.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::subcategories)]
#[diesel(treat_none_as_null = true)]
pub struct SubCategoryChangeset {
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}

impl TryFrom<SubCategory> for DomainSubCategory {
    type Error = TypeConstraintError;

    fn try_from(subcategory: SubCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: subcategory.id.try_into()?,
            category_id: subcategory.category_id.try_into()?,
            name: SubCategoryName::new(subcategory.name)?,
            slug: Slug::from_stored(subcategory.slug)?,
            image: subcategory.image.map(ImagePath::new).transpose()?,
            created_at: subcategory.created_at,
        })
    }
}

impl TryFrom<&DomainNewSubCategory> for NewSubCategory {
    type Error = TypeConstraintError;

    fn try_from(subcategory: &DomainNewSubCategory) -> Result<Self, Self::Error> {
        let slug = Slug::from_name(subcategory.name.as_str(), "subcategory name")?;
        Ok(Self {
            category_id: subcategory.category_id.get(),
            name: subcategory.name.as_str().to_string(),
            slug: slug.into_inner(),
            image: subcategory.image.as_ref().map(|i| i.as_str().to_string()),
            created_at: subcategory.created_at,
        })
    }
}

impl TryFrom<&SubCategoryUpdate> for SubCategoryChangeset {
    type Error = TypeConstraintError;

    fn try_from(update: &SubCategoryUpdate) -> Result<Self, Self::Error> {
        let slug = Slug::from_name(update.name.as_str(), "subcategory name")?;
        Ok(Self {
            name: update.name.as_str().to_string(),
            slug: slug.into_inner(),
            image: update.image.as_ref().map(|i| i.as_str().to_string()),
        })
    }
}
