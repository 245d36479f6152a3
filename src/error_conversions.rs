//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service/repository error types, so
//! the conversions live here instead of next to either side.

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::{
    AddCategoryFormError, AddSubCategoryFormError, DeleteCategoryFormError,
    DeleteSubCategoryFormError, UpdateCategoryFormError, UpdateSubCategoryFormError,
};
use crate::forms::comments::CommentFormError;
use crate::forms::recommendations::RecommendationFormError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

macro_rules! form_error_into_service_error {
    ($($form_error:ty),+ $(,)?) => {
        $(
            impl From<$form_error> for ServiceError {
                fn from(val: $form_error) -> Self {
                    ServiceError::Form(val.to_string())
                }
            }
        )+
    };
}

form_error_into_service_error!(
    AddCategoryFormError,
    UpdateCategoryFormError,
    DeleteCategoryFormError,
    AddSubCategoryFormError,
    UpdateSubCategoryFormError,
    DeleteSubCategoryFormError,
    RecommendationFormError,
    CommentFormError,
);
