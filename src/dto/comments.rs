use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::comment::Comment;
use crate::domain::types::RecommendationKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentDto {
    pub id: i32,
    pub kind: RecommendationKind,
    pub recommendation_id: i32,
    pub author_id: i32,
    pub text: String,
    pub created_at: NaiveDateTime,
}

impl From<Comment> for CommentDto {
    fn from(value: Comment) -> Self {
        Self {
            id: value.id.get(),
            kind: value.target.kind(),
            recommendation_id: value.target.raw_id(),
            author_id: value.author_id.get(),
            text: value.text.into_inner(),
            created_at: value.created_at,
        }
    }
}
