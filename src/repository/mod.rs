use crate::db::{DbConnection, DbPool};
use crate::domain::book::{Book, NewBook};
use crate::domain::category::{
    Category, NewCategory, NewSubCategory, SubCategory, SubCategoryUpdate,
};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::isbn::Isbn;
use crate::domain::types::{
    BookId, CategoryId, CommentId, ExternalVideoId, RecommendationKind, RecommendationRef,
    RelationCounts, RelationKind, SubCategoryId, UserId, Username, VideoId, VoteDirection,
    WebsiteId, WebsiteUrl,
};
use crate::domain::user::{NewUser, User};
use crate::domain::video::{NewVideo, Video};
use crate::domain::website::{NewWebsite, Website};

pub use errors::{RepositoryError, RepositoryResult};

pub mod book;
pub mod category;
pub mod comment;
pub mod errors;
pub mod relation;
pub mod subcategory;
#[cfg(test)]
pub mod test;
pub mod user;
pub mod video;
pub mod website;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// One-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Row offset of the first item on the page.
    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    pub pagination: Option<Pagination>,
}

impl CategoryListQuery {
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing the subcategories of one category.
#[derive(Debug, Clone)]
pub struct SubCategoryListQuery {
    pub category_id: CategoryId,
    pub pagination: Option<Pagination>,
}

impl SubCategoryListQuery {
    pub fn new(category_id: CategoryId) -> Self {
        Self {
            category_id,
            pagination: None,
        }
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters shared by website, book and video listings.
#[derive(Debug, Clone, Default)]
pub struct RecommendationListQuery {
    /// Filter by category.
    pub category_id: Option<CategoryId>,
    /// Filter by subcategory.
    pub subcategory_id: Option<SubCategoryId>,
    /// Filter by the member who submitted the recommendation.
    pub author_id: Option<UserId>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl RecommendationListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn subcategory(mut self, subcategory_id: SubCategoryId) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }
    pub fn author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for user entities.
pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>>;
}

/// Write operations for user entities.
pub trait UserWriter {
    /// Persist a new user and return the stored row.
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories ordered by name, returning the unpaginated total.
    fn list_categories(&self, query: CategoryListQuery)
    -> RepositoryResult<(usize, Vec<Category>)>;
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities. Every write recomputes the slug.
pub trait CategoryWriter {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Rename a category and replace its image.
    fn update_category(&self, id: CategoryId, category: &NewCategory) -> RepositoryResult<usize>;
    /// Delete a category together with everything filed under it.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for subcategory entities.
pub trait SubCategoryReader {
    fn list_subcategories(
        &self,
        query: SubCategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<SubCategory>)>;
    fn get_subcategory_by_id(&self, id: SubCategoryId) -> RepositoryResult<Option<SubCategory>>;
    fn get_subcategory_by_slug(
        &self,
        category_id: CategoryId,
        slug: &str,
    ) -> RepositoryResult<Option<SubCategory>>;
}

/// Write operations for subcategory entities. Every write recomputes the slug.
pub trait SubCategoryWriter {
    fn create_subcategory(&self, subcategory: &NewSubCategory) -> RepositoryResult<SubCategory>;
    fn update_subcategory(
        &self,
        id: SubCategoryId,
        update: &SubCategoryUpdate,
    ) -> RepositoryResult<usize>;
    fn delete_subcategory(&self, id: SubCategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for website recommendations.
pub trait WebsiteReader {
    /// List websites newest first with relation counts attached.
    fn list_websites(
        &self,
        query: RecommendationListQuery,
    ) -> RepositoryResult<(usize, Vec<Website>)>;
    fn get_website_by_id(&self, id: WebsiteId) -> RepositoryResult<Option<Website>>;
    /// Look up a website by its natural key.
    fn find_website(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
        url: &WebsiteUrl,
    ) -> RepositoryResult<Option<Website>>;
}

/// Write operations for website recommendations.
pub trait WebsiteWriter {
    /// Persist a website; a duplicate `(category, subcategory, url)` is a conflict.
    fn create_website(&self, website: &NewWebsite) -> RepositoryResult<Website>;
    fn delete_website(&self, id: WebsiteId) -> RepositoryResult<usize>;
}

/// Read-only operations for book recommendations.
pub trait BookReader {
    fn list_books(&self, query: RecommendationListQuery) -> RepositoryResult<(usize, Vec<Book>)>;
    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>>;
    fn find_book(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
        isbn: &Isbn,
    ) -> RepositoryResult<Option<Book>>;
}

/// Write operations for book recommendations.
pub trait BookWriter {
    /// Persist a book; a duplicate `(category, subcategory, isbn)` is a conflict.
    fn create_book(&self, book: &NewBook) -> RepositoryResult<Book>;
    fn delete_book(&self, id: BookId) -> RepositoryResult<usize>;
}

/// Read-only operations for video recommendations.
pub trait VideoReader {
    fn list_videos(&self, query: RecommendationListQuery)
    -> RepositoryResult<(usize, Vec<Video>)>;
    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>>;
    fn find_video(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
        video_id: &ExternalVideoId,
    ) -> RepositoryResult<Option<Video>>;
}

/// Write operations for video recommendations.
pub trait VideoWriter {
    /// Persist a video; a duplicate `(category, subcategory, video_id)` is a conflict.
    fn create_video(&self, video: &NewVideo) -> RepositoryResult<Video>;
    fn delete_video(&self, id: VideoId) -> RepositoryResult<usize>;
}

/// Read-only access to vote and bookmark membership.
pub trait RelationReader {
    /// Whether the addressed recommendation exists.
    fn recommendation_exists(&self, target: RecommendationRef) -> RepositoryResult<bool>;
    fn relation_counts(&self, target: RecommendationRef) -> RepositoryResult<RelationCounts>;
    fn has_relation(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        kind: RelationKind,
    ) -> RepositoryResult<bool>;
    /// Members holding `kind` on the target, in the order they joined.
    fn list_relation_users(
        &self,
        target: RecommendationRef,
        kind: RelationKind,
    ) -> RepositoryResult<Vec<UserId>>;
    /// Recommendations of one kind on which the user holds `relation`.
    fn list_user_relations(
        &self,
        user_id: UserId,
        relation: RelationKind,
        kind: RecommendationKind,
    ) -> RepositoryResult<Vec<RecommendationRef>>;
}

/// Write access to vote and bookmark membership.
pub trait RelationWriter {
    /// Insert a membership; returns 0 when the user already holds it.
    fn add_relation(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        kind: RelationKind,
    ) -> RepositoryResult<usize>;
    fn remove_relation(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        kind: RelationKind,
    ) -> RepositoryResult<usize>;
    /// Atomically drop the opposite vote and record `direction`.
    fn cast_vote(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        direction: VoteDirection,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for comments.
pub trait CommentReader {
    /// Comments on the target, oldest first.
    fn list_comments(&self, target: RecommendationRef) -> RepositoryResult<Vec<Comment>>;
    fn get_comment(
        &self,
        kind: RecommendationKind,
        id: CommentId,
    ) -> RepositoryResult<Option<Comment>>;
}

/// Write operations for comments.
pub trait CommentWriter {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<Comment>;
    fn delete_comment(&self, kind: RecommendationKind, id: CommentId) -> RepositoryResult<usize>;
}
