use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::comment::NewComment;
use crate::domain::types::{
    CommentId, CommentText, RecommendationKind, RecommendationRef, TypeConstraintError, UserId,
};

#[derive(Debug, Error)]
pub enum CommentFormError {
    #[error("Comment form validation failed: {0}")]
    Validation(String),
    #[error("Comment form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for CommentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for CommentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn parse_target(kind: &str, recommendation_id: i32) -> Result<RecommendationRef, TypeConstraintError> {
    RecommendationRef::new(RecommendationKind::try_from(kind)?, recommendation_id)
}

#[derive(Deserialize, Validate)]
pub struct AddCommentForm {
    pub kind: String,
    #[validate(range(min = 1))]
    pub recommendation_id: i32,
    #[validate(length(min = 1, max = 2000))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCommentFormPayload {
    pub target: RecommendationRef,
    pub text: CommentText,
}

impl AddCommentFormPayload {
    pub fn into_new_comment(self, author_id: UserId) -> NewComment {
        NewComment {
            target: self.target,
            author_id,
            text: self.text,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<AddCommentForm> for AddCommentFormPayload {
    type Error = CommentFormError;

    fn try_from(value: AddCommentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            target: parse_target(&value.kind, value.recommendation_id)?,
            text: CommentText::new(value.text)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct DeleteCommentForm {
    pub kind: String,
    #[validate(range(min = 1))]
    pub comment_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteCommentFormPayload {
    pub kind: RecommendationKind,
    pub comment_id: CommentId,
}

impl TryFrom<DeleteCommentForm> for DeleteCommentFormPayload {
    type Error = CommentFormError;

    fn try_from(value: DeleteCommentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            kind: RecommendationKind::try_from(value.kind.as_str())?,
            comment_id: CommentId::new(value.comment_id)?,
        })
    }
}

/// Identifies the recommendation a vote or bookmark applies to.
#[derive(Deserialize, Validate)]
pub struct RelationForm {
    pub kind: String,
    #[validate(range(min = 1))]
    pub recommendation_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelationFormPayload {
    pub target: RecommendationRef,
}

impl TryFrom<RelationForm> for RelationFormPayload {
    type Error = CommentFormError;

    fn try_from(value: RelationForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            target: parse_target(&value.kind, value.recommendation_id)?,
        })
    }
}
