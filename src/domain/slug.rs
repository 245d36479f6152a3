//! URL-safe identifiers derived from display names.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use unicode_normalization::UnicodeNormalization;

use crate::domain::types::TypeConstraintError;

/// Longest slug stored; matches the width of the `slug` columns.
pub const MAX_SLUG_LEN: usize = 50;

/// Lowercase, hyphenated identifier derived from a name.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Derives the slug for `name`, rejecting names with no slug characters.
    pub fn from_name(name: &str, field: &'static str) -> Result<Self, TypeConstraintError> {
        let slug = slugify(name);
        if slug.is_empty() {
            Err(TypeConstraintError::EmptySlug(field))
        } else {
            Ok(Self(slug))
        }
    }

    /// Wraps a slug read back from storage.
    pub fn from_stored<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.is_empty() || slugify(&value) != value {
            return Err(TypeConstraintError::InvalidValue(format!("slug: {value}")));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<&str> for Slug {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Lowercases `input`, drops punctuation and joins words with single hyphens.
///
/// Letters, digits and underscores survive; runs of whitespace and hyphens
/// become one `-`. The input is NFKD-decomposed first and only its ASCII
/// part is kept, so accented letters fold to their base letter and other
/// non-ASCII characters disappear. Leading and trailing
/// hyphens and underscores are stripped and the result is capped at
/// [`MAX_SLUG_LEN`] characters.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for ch in input.nfkd().filter(char::is_ascii) {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch == '-' || ch.is_whitespace() {
            pending_dash = true;
        }
    }

    let trimmed = slug.trim_matches(|c| c == '-' || c == '_');
    let mut slug = trimmed.to_string();

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}
