//! International Standard Book Number validation.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::TypeConstraintError;

/// A checksum-validated ISBN-10 or ISBN-13 without separators.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

impl Isbn {
    /// Strips hyphens and spaces then validates length and check digit.
    pub fn new<S: AsRef<str>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.as_ref();
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != ' ')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let valid = match normalized.len() {
            10 => is_valid_isbn10(&normalized),
            13 => is_valid_isbn13(&normalized),
            _ => false,
        };

        if valid {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidIsbn(raw.trim().to_string()))
        }
    }

    /// Returns `true` for the 13-digit form.
    pub fn is_isbn13(&self) -> bool {
        self.0.len() == 13
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_valid_isbn10(value: &str) -> bool {
    let mut sum = 0u32;
    for (i, ch) in value.chars().enumerate() {
        let digit = match ch {
            '0'..='9' => ch as u32 - '0' as u32,
            'X' if i == 9 => 10,
            _ => return false,
        };
        sum += (10 - i as u32) * digit;
    }
    sum % 11 == 0
}

fn is_valid_isbn13(value: &str) -> bool {
    let mut sum = 0u32;
    for (i, ch) in value.chars().enumerate() {
        let Some(digit) = ch.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 0 { digit } else { digit * 3 };
    }
    sum % 10 == 0
}

impl Display for Isbn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Isbn {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for Isbn {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Isbn {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Isbn> for String {
    fn from(value: Isbn) -> Self {
        value.0
    }
}
