use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::comment::Comment as DomainComment;
use crate::domain::types::{
    CommentText, RecommendationKind, RecommendationRef, TypeConstraintError,
};

/// Row shape shared by `website_comments`, `book_comments` and `video_comments`.
#[derive(Debug, Clone, Queryable)]
pub struct CommentRow {
    pub id: i32,
    pub recommendation_id: i32,
    pub author_id: i32,
    pub text: String,
    pub created_at: NaiveDateTime,
}

impl CommentRow {
    /// Converts the row, attaching the kind of table it was read from.
    pub fn into_domain(self, kind: RecommendationKind) -> Result<DomainComment, TypeConstraintError> {
        Ok(DomainComment {
            id: self.id.try_into()?,
            target: RecommendationRef::new(kind, self.recommendation_id)?,
            author_id: self.author_id.try_into()?,
            text: CommentText::new(self.text)?,
            created_at: self.created_at,
        })
    }
}
