use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, Username};

/// Registered site member who can author, vote, bookmark and comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub is_active: bool,
    /// Staff members curate categories and moderate content.
    pub is_staff: bool,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`User`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: NaiveDateTime,
}

impl NewUser {
    /// An active, non-staff member created now.
    pub fn member(username: Username) -> Self {
        Self {
            username,
            is_active: true,
            is_staff: false,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
