//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, bounded text and URLs are validated once at the boundary and
//! can be trusted everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded the maximum number of characters for its column.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// ISBN format or checksum validation failed.
    #[error("invalid ISBN: {0}")]
    InvalidIsbn(String),
    /// A display name produced no usable slug characters.
    #[error("{0} must contain at least one letter or digit")]
    EmptySlug(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

fn require_max_chars(
    value: String,
    field: &'static str,
    max: usize,
) -> Result<String, TypeConstraintError> {
    if value.chars().count() > max {
        Err(TypeConstraintError::TooLong { field, max })
    } else {
        Ok(value)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

/// Shared string accessors and conversions for validated text wrappers.
macro_rules! string_wrapper_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

/// Trimmed, non-empty text limited to `$max` characters.
macro_rules! bounded_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Maximum number of characters accepted.
            pub const MAX_CHARS: usize = $max;

            /// Constructs a trimmed, non-empty value within the length bound.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                require_max_chars(trimmed, $field, $max).map(Self)
            }
        }

        string_wrapper_impls!($name);
    };
}

/// Validated URL limited to `$max` characters.
macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Maximum number of characters accepted.
            pub const MAX_CHARS: usize = $max;

            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                let trimmed = require_max_chars(trimmed, $field, $max)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }
        }

        string_wrapper_impls!($name);
    };
}

id_newtype!(UserId, "Unique identifier for a user.", "user_id");
id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
id_newtype!(
    SubCategoryId,
    "Unique identifier for a subcategory.",
    "subcategory_id"
);
id_newtype!(
    WebsiteId,
    "Unique identifier for a website recommendation.",
    "website_id"
);
id_newtype!(
    BookId,
    "Unique identifier for a book recommendation.",
    "book_id"
);
id_newtype!(
    VideoId,
    "Unique identifier for a video recommendation.",
    "video_id"
);
id_newtype!(
    CommentId,
    "Unique identifier for a comment within its recommendation kind.",
    "comment_id"
);

bounded_string_newtype!(Username, "Login name of a user.", "username", 150);
bounded_string_newtype!(CategoryName, "Category display name.", "category name", 128);
bounded_string_newtype!(
    SubCategoryName,
    "Subcategory display name.",
    "subcategory name",
    128
);
bounded_string_newtype!(
    ImagePath,
    "Relative path of an uploaded image.",
    "image path",
    100
);

impl ImagePath {
    /// Constructs a path that must name a file inside the upload directory `dir`.
    pub fn under_dir<S: Into<String>>(value: S, dir: &str) -> Result<Self, TypeConstraintError> {
        let path = Self::new(value)?;
        let inside = path
            .as_str()
            .strip_prefix(dir)
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|rest| !rest.is_empty() && !rest.split('/').any(|part| part == ".."));
        if inside {
            Ok(path)
        } else {
            Err(TypeConstraintError::InvalidValue(format!(
                "image path must be inside {dir}/"
            )))
        }
    }
}
bounded_string_newtype!(WebsiteTitle, "Title of a website recommendation.", "title", 128);
bounded_string_newtype!(
    WebsiteDescription,
    "Short description of a recommended website.",
    "description",
    300
);
bounded_string_newtype!(BookTitle, "Title of a recommended book.", "title", 500);
bounded_string_newtype!(BookAuthor, "Author of a recommended book.", "book author", 128);
bounded_string_newtype!(
    BookDescription,
    "Description of a recommended book.",
    "description",
    10000
);
bounded_string_newtype!(VideoTitle, "Title of a recommended video.", "title", 128);
bounded_string_newtype!(
    VideoDescription,
    "Description of a recommended video.",
    "description",
    10000
);
bounded_string_newtype!(
    ExternalVideoId,
    "Identifier of a video on its hosting platform.",
    "video id",
    128
);
bounded_string_newtype!(CommentText, "Body of a comment.", "comment", 2000);

url_string_newtype!(WebsiteUrl, "Address of a recommended website.", "url", 200);
url_string_newtype!(BookUrl, "External purchase link for a book.", "book url", 2000);
url_string_newtype!(VideoUrl, "Playback link for a video.", "video url", 2000);
url_string_newtype!(ImageUrl, "Book cover or video thumbnail URL.", "image url", 500);
url_string_newtype!(
    WebsiteImageUrl,
    "Optional preview image of a recommended website.",
    "image url",
    200
);

/// Membership relation a user can hold on a recommendation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Upvote,
    Downvote,
    Bookmark,
}

impl RelationKind {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
            Self::Bookmark => "bookmark",
        }
    }
}

impl Display for RelationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for RelationKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "upvote" => Ok(Self::Upvote),
            "downvote" => Ok(Self::Downvote),
            "bookmark" => Ok(Self::Bookmark),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "relation kind: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for RelationKind {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<RelationKind> for String {
    fn from(value: RelationKind) -> Self {
        value.as_str().to_string()
    }
}

/// Direction of a vote cast by a user.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    /// Relation recorded for this direction.
    pub const fn relation(self) -> RelationKind {
        match self {
            Self::Up => RelationKind::Upvote,
            Self::Down => RelationKind::Downvote,
        }
    }

    /// Relation that must be cleared when this direction is cast.
    pub const fn opposite(self) -> RelationKind {
        match self {
            Self::Up => RelationKind::Downvote,
            Self::Down => RelationKind::Upvote,
        }
    }
}

/// The three kinds of recommendation the site lists.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Website,
    Book,
    Video,
}

impl RecommendationKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Book => "book",
            Self::Video => "video",
        }
    }
}

impl Display for RecommendationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for RecommendationKind {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "website" => Ok(Self::Website),
            "book" => Ok(Self::Book),
            "video" => Ok(Self::Video),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "recommendation kind: {other}"
            ))),
        }
    }
}

/// Address of a single recommendation regardless of its kind.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RecommendationRef {
    Website(WebsiteId),
    Book(BookId),
    Video(VideoId),
}

impl RecommendationRef {
    /// Builds a reference from a kind and a raw identifier.
    pub fn new(kind: RecommendationKind, id: i32) -> Result<Self, TypeConstraintError> {
        Ok(match kind {
            RecommendationKind::Website => Self::Website(WebsiteId::new(id)?),
            RecommendationKind::Book => Self::Book(BookId::new(id)?),
            RecommendationKind::Video => Self::Video(VideoId::new(id)?),
        })
    }

    pub const fn kind(self) -> RecommendationKind {
        match self {
            Self::Website(_) => RecommendationKind::Website,
            Self::Book(_) => RecommendationKind::Book,
            Self::Video(_) => RecommendationKind::Video,
        }
    }

    /// Raw identifier within the kind's table.
    pub const fn raw_id(self) -> i32 {
        match self {
            Self::Website(id) => id.get(),
            Self::Book(id) => id.get(),
            Self::Video(id) => id.get(),
        }
    }
}

impl Display for RecommendationRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.kind(), self.raw_id())
    }
}

/// Relation totals for one recommendation, aggregated on read.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelationCounts {
    pub upvotes: usize,
    pub downvotes: usize,
    pub bookmarks: usize,
}

impl RelationCounts {
    /// Upvotes minus downvotes.
    pub fn score(&self) -> i64 {
        self.upvotes as i64 - self.downvotes as i64
    }

    /// Adds `count` members to the tally for `kind`.
    pub fn record(&mut self, kind: RelationKind, count: usize) {
        match kind {
            RelationKind::Upvote => self.upvotes += count,
            RelationKind::Downvote => self.downvotes += count,
            RelationKind::Bookmark => self.bookmarks += count,
        }
    }
}
