use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::{CommentId, CommentText, RecommendationRef, UserId};

/// Free-text comment left on a recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub target: RecommendationRef,
    pub author_id: UserId,
    pub text: CommentText,
    pub created_at: NaiveDateTime,
}

impl Display for Comment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Data required to insert a new [`Comment`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewComment {
    pub target: RecommendationRef,
    pub author_id: UserId,
    pub text: CommentText,
    pub created_at: NaiveDateTime,
}
