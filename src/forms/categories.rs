use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{
    CATEGORY_IMAGE_DIR, NewCategory, NewSubCategory, SUBCATEGORY_IMAGE_DIR, SubCategoryUpdate,
};
use crate::domain::slug::Slug;
use crate::domain::types::{
    CategoryId, CategoryName, ImagePath, SubCategoryId, SubCategoryName, TypeConstraintError,
};
use crate::forms::non_blank;

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: CategoryName,
    pub image: Option<ImagePath>,
}

impl AddCategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name,
            image: self.image,
        }
    }
}

#[derive(Debug, Error)]
pub enum AddCategoryFormError {
    #[error("Add category form validation failed: {0}")]
    Validation(String),
    #[error("Add category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = AddCategoryFormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = CategoryName::new(value.name)?;
        // Reject names the slug cannot represent before they reach storage.
        Slug::from_name(name.as_str(), "category name")?;

        Ok(Self {
            name,
            image: non_blank(value.image)
                .map(|image| ImagePath::under_dir(image, CATEGORY_IMAGE_DIR))
                .transpose()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub category_id: CategoryId,
    pub name: CategoryName,
    pub image: Option<ImagePath>,
}

impl UpdateCategoryFormPayload {
    pub fn to_new_category(&self) -> NewCategory {
        NewCategory {
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateCategoryFormError {
    #[error("Update category form validation failed: {0}")]
    Validation(String),
    #[error("Update category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryFormPayload {
    type Error = UpdateCategoryFormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = CategoryName::new(value.name)?;
        Slug::from_name(name.as_str(), "category name")?;

        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            name,
            image: non_blank(value.image)
                .map(|image| ImagePath::under_dir(image, CATEGORY_IMAGE_DIR))
                .transpose()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCategoryFormPayload {
    pub category_id: CategoryId,
}

#[derive(Debug, Error)]
pub enum DeleteCategoryFormError {
    #[error("Delete category form validation failed: {0}")]
    Validation(String),
    #[error("Delete category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for DeleteCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for DeleteCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<DeleteCategoryForm> for DeleteCategoryFormPayload {
    type Error = DeleteCategoryFormError;

    fn try_from(value: DeleteCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct AddSubCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddSubCategoryFormPayload {
    pub category_id: CategoryId,
    pub name: SubCategoryName,
    pub image: Option<ImagePath>,
}

impl AddSubCategoryFormPayload {
    pub fn into_new_subcategory(self) -> NewSubCategory {
        NewSubCategory {
            category_id: self.category_id,
            name: self.name,
            image: self.image,
            created_at: Utc::now().naive_utc(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AddSubCategoryFormError {
    #[error("Add subcategory form validation failed: {0}")]
    Validation(String),
    #[error("Add subcategory form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for AddSubCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for AddSubCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<AddSubCategoryForm> for AddSubCategoryFormPayload {
    type Error = AddSubCategoryFormError;

    fn try_from(value: AddSubCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = SubCategoryName::new(value.name)?;
        Slug::from_name(name.as_str(), "subcategory name")?;

        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            name,
            image: non_blank(value.image)
                .map(|image| ImagePath::under_dir(image, SUBCATEGORY_IMAGE_DIR))
                .transpose()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateSubCategoryForm {
    #[validate(range(min = 1))]
    pub subcategory_id: i32,
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSubCategoryFormPayload {
    pub subcategory_id: SubCategoryId,
    pub name: SubCategoryName,
    pub image: Option<ImagePath>,
}

impl UpdateSubCategoryFormPayload {
    pub fn to_update(&self) -> SubCategoryUpdate {
        SubCategoryUpdate {
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateSubCategoryFormError {
    #[error("Update subcategory form validation failed: {0}")]
    Validation(String),
    #[error("Update subcategory form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UpdateSubCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UpdateSubCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<UpdateSubCategoryForm> for UpdateSubCategoryFormPayload {
    type Error = UpdateSubCategoryFormError;

    fn try_from(value: UpdateSubCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let name = SubCategoryName::new(value.name)?;
        Slug::from_name(name.as_str(), "subcategory name")?;

        Ok(Self {
            subcategory_id: SubCategoryId::new(value.subcategory_id)?,
            name,
            image: non_blank(value.image)
                .map(|image| ImagePath::under_dir(image, SUBCATEGORY_IMAGE_DIR))
                .transpose()?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteSubCategoryForm {
    #[validate(range(min = 1))]
    pub subcategory_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteSubCategoryFormPayload {
    pub subcategory_id: SubCategoryId,
}

#[derive(Debug, Error)]
pub enum DeleteSubCategoryFormError {
    #[error("Delete subcategory form validation failed: {0}")]
    Validation(String),
    #[error("Delete subcategory form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for DeleteSubCategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for DeleteSubCategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<DeleteSubCategoryForm> for DeleteSubCategoryFormPayload {
    type Error = DeleteSubCategoryFormError;

    fn try_from(value: DeleteSubCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            subcategory_id: SubCategoryId::new(value.subcategory_id)?,
        })
    }
}
