use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, Username};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

/// Diesel model representing the `users` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`User`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.try_into()?,
            username: Username::new(user.username)?,
            is_active: user.is_active,
            is_staff: user.is_staff,
            created_at: user.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            username: user.username.as_str(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            created_at: user.created_at,
        }
    }
}
