use std::cell::RefCell;

use crate::domain::book::{Book, NewBook};
use crate::domain::category::{
    Category, NewCategory, NewSubCategory, SubCategory, SubCategoryUpdate,
};
use crate::domain::comment::{Comment, NewComment};
use crate::domain::isbn::Isbn;
use crate::domain::slug::Slug;
use crate::domain::types::{
    BookId, CategoryId, CommentId, ExternalVideoId, RecommendationKind, RecommendationRef,
    RelationCounts, RelationKind, SubCategoryId, UserId, Username, VideoId, VoteDirection,
    WebsiteId, WebsiteUrl,
};
use crate::domain::user::{NewUser, User};
use crate::domain::video::{NewVideo, Video};
use crate::domain::website::{NewWebsite, Website};
use crate::repository::{
    BookReader, BookWriter, CategoryListQuery, CategoryReader, CategoryWriter, CommentReader,
    CommentWriter, Pagination, RecommendationListQuery, RelationReader, RelationWriter,
    RepositoryError, RepositoryResult, SubCategoryListQuery, SubCategoryReader, SubCategoryWriter,
    UserReader, UserWriter, VideoReader, VideoWriter, WebsiteReader, WebsiteWriter,
};

#[derive(Default)]
struct State {
    next_id: i32,
    users: Vec<User>,
    categories: Vec<Category>,
    subcategories: Vec<SubCategory>,
    websites: Vec<Website>,
    books: Vec<Book>,
    videos: Vec<Video>,
    relations: Vec<(RecommendationRef, UserId, RelationKind)>,
    comments: Vec<Comment>,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn counts(&self, target: RecommendationRef) -> RelationCounts {
        let mut counts = RelationCounts::default();
        for (item, _, kind) in &self.relations {
            if *item == target {
                counts.record(*kind, 1);
            }
        }
        counts
    }

    fn exists(&self, target: RecommendationRef) -> bool {
        match target {
            RecommendationRef::Website(id) => self.websites.iter().any(|w| w.id == id),
            RecommendationRef::Book(id) => self.books.iter().any(|b| b.id == id),
            RecommendationRef::Video(id) => self.videos.iter().any(|v| v.id == id),
        }
    }

    fn category_exists(&self, id: CategoryId) -> bool {
        self.categories.iter().any(|c| c.id == id)
    }

    fn subcategory_exists(&self, id: SubCategoryId) -> bool {
        self.subcategories.iter().any(|s| s.id == id)
    }

    /// Mirrors the `ON DELETE CASCADE` foreign keys of the real schema.
    fn cascade(&mut self) {
        let categories: Vec<CategoryId> = self.categories.iter().map(|c| c.id).collect();
        self.subcategories
            .retain(|s| categories.contains(&s.category_id));
        let subcategories: Vec<SubCategoryId> =
            self.subcategories.iter().map(|s| s.id).collect();
        self.websites
            .retain(|w| subcategories.contains(&w.subcategory_id));
        self.books
            .retain(|b| subcategories.contains(&b.subcategory_id));
        self.videos
            .retain(|v| subcategories.contains(&v.subcategory_id));

        let live: Vec<RecommendationRef> = self
            .websites
            .iter()
            .map(|w| RecommendationRef::Website(w.id))
            .chain(self.books.iter().map(|b| RecommendationRef::Book(b.id)))
            .chain(self.videos.iter().map(|v| RecommendationRef::Video(v.id)))
            .collect();
        self.relations.retain(|(target, _, _)| live.contains(target));
        self.comments.retain(|c| live.contains(&c.target));
    }

    fn check_placement(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
    ) -> RepositoryResult<()> {
        if self.category_exists(category_id) && self.subcategory_exists(subcategory_id) {
            Ok(())
        } else {
            Err(RepositoryError::ValidationError(
                "FOREIGN KEY constraint failed".to_string(),
            ))
        }
    }
}

fn paginate<T>(items: Vec<T>, pagination: Option<Pagination>) -> Vec<T> {
    match pagination {
        Some(p) => items
            .into_iter()
            .skip(p.offset() as usize)
            .take(p.limit() as usize)
            .collect(),
        None => items,
    }
}

fn conflict(what: &str) -> RepositoryError {
    RepositoryError::ConflictError(format!("UNIQUE constraint failed: {what}"))
}

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    state: RefCell<State>,
}

impl TestRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserReader for TestRepository {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let state = self.state.borrow();
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }

    fn get_user_by_username(&self, username: &Username) -> RepositoryResult<Option<User>> {
        let state = self.state.borrow();
        Ok(state.users.iter().find(|u| &u.username == username).cloned())
    }
}

impl UserWriter for TestRepository {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User> {
        let mut state = self.state.borrow_mut();
        if state.users.iter().any(|u| u.username == user.username) {
            return Err(conflict("users.username"));
        }
        let user = User {
            id: UserId::new(state.next_id())?,
            username: user.username.clone(),
            is_active: user.is_active,
            is_staff: user.is_staff,
            created_at: user.created_at,
        };
        state.users.push(user.clone());
        Ok(user)
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        let state = self.state.borrow();
        let mut items = state.categories.clone();
        items.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        let total = items.len();
        Ok((total, paginate(items, query.pagination)))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        let state = self.state.borrow();
        Ok(state.categories.iter().find(|c| c.id == id).cloned())
    }

    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        let state = self.state.borrow();
        Ok(state.categories.iter().find(|c| c.slug == slug).cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let mut state = self.state.borrow_mut();
        if state.categories.iter().any(|c| c.name == category.name) {
            return Err(conflict("categories.name"));
        }
        let category = Category {
            id: CategoryId::new(state.next_id())?,
            slug: Slug::from_name(category.name.as_str(), "category name")?,
            name: category.name.clone(),
            image: category.image.clone(),
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    fn update_category(&self, id: CategoryId, category: &NewCategory) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        if state
            .categories
            .iter()
            .any(|c| c.id != id && c.name == category.name)
        {
            return Err(conflict("categories.name"));
        }
        let slug = Slug::from_name(category.name.as_str(), "category name")?;
        match state.categories.iter_mut().find(|c| c.id == id) {
            Some(existing) => {
                existing.name = category.name.clone();
                existing.slug = slug;
                existing.image = category.image.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.categories.len();
        state.categories.retain(|c| c.id != id);
        let affected = before - state.categories.len();
        state.cascade();
        Ok(affected)
    }
}

impl SubCategoryReader for TestRepository {
    fn list_subcategories(
        &self,
        query: SubCategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<SubCategory>)> {
        let state = self.state.borrow();
        let mut items: Vec<SubCategory> = state
            .subcategories
            .iter()
            .filter(|s| s.category_id == query.category_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()));
        let total = items.len();
        Ok((total, paginate(items, query.pagination)))
    }

    fn get_subcategory_by_id(&self, id: SubCategoryId) -> RepositoryResult<Option<SubCategory>> {
        let state = self.state.borrow();
        Ok(state.subcategories.iter().find(|s| s.id == id).cloned())
    }

    fn get_subcategory_by_slug(
        &self,
        category_id: CategoryId,
        slug: &str,
    ) -> RepositoryResult<Option<SubCategory>> {
        let state = self.state.borrow();
        Ok(state
            .subcategories
            .iter()
            .find(|s| s.category_id == category_id && s.slug == slug)
            .cloned())
    }
}

impl SubCategoryWriter for TestRepository {
    fn create_subcategory(&self, subcategory: &NewSubCategory) -> RepositoryResult<SubCategory> {
        let mut state = self.state.borrow_mut();
        if !state.category_exists(subcategory.category_id) {
            return Err(RepositoryError::ValidationError(
                "FOREIGN KEY constraint failed".to_string(),
            ));
        }
        if state
            .subcategories
            .iter()
            .any(|s| s.category_id == subcategory.category_id && s.name == subcategory.name)
        {
            return Err(conflict("subcategories.category_id, subcategories.name"));
        }
        let subcategory = SubCategory {
            id: SubCategoryId::new(state.next_id())?,
            category_id: subcategory.category_id,
            slug: Slug::from_name(subcategory.name.as_str(), "subcategory name")?,
            name: subcategory.name.clone(),
            image: subcategory.image.clone(),
            created_at: subcategory.created_at,
        };
        state.subcategories.push(subcategory.clone());
        Ok(subcategory)
    }

    fn update_subcategory(
        &self,
        id: SubCategoryId,
        update: &SubCategoryUpdate,
    ) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let slug = Slug::from_name(update.name.as_str(), "subcategory name")?;
        match state.subcategories.iter_mut().find(|s| s.id == id) {
            Some(existing) => {
                existing.name = update.name.clone();
                existing.slug = slug;
                existing.image = update.image.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_subcategory(&self, id: SubCategoryId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.subcategories.len();
        state.subcategories.retain(|s| s.id != id);
        let affected = before - state.subcategories.len();
        state.cascade();
        Ok(affected)
    }
}

/// Applies the shared listing filters and newest-first ordering.
macro_rules! list_recommendations {
    ($state:expr, $items:ident, $author:ident, $ref:path, $query:expr) => {{
        let query = $query;
        let mut items: Vec<_> = $state
            .$items
            .iter()
            .filter(|i| query.category_id.is_none_or(|c| i.category_id == c))
            .filter(|i| query.subcategory_id.is_none_or(|s| i.subcategory_id == s))
            .filter(|i| query.author_id.is_none_or(|a| i.$author == a))
            .cloned()
            .collect();
        items.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        for item in items.iter_mut() {
            item.counts = $state.counts($ref(item.id));
        }
        let total = items.len();
        Ok((total, paginate(items, query.pagination)))
    }};
}

impl WebsiteReader for TestRepository {
    fn list_websites(
        &self,
        query: RecommendationListQuery,
    ) -> RepositoryResult<(usize, Vec<Website>)> {
        let state = self.state.borrow();
        list_recommendations!(state, websites, author_id, RecommendationRef::Website, query)
    }

    fn get_website_by_id(&self, id: WebsiteId) -> RepositoryResult<Option<Website>> {
        let state = self.state.borrow();
        Ok(state.websites.iter().find(|w| w.id == id).cloned().map(|mut w| {
            w.counts = state.counts(RecommendationRef::Website(w.id));
            w
        }))
    }

    fn find_website(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
        url: &WebsiteUrl,
    ) -> RepositoryResult<Option<Website>> {
        let state = self.state.borrow();
        Ok(state
            .websites
            .iter()
            .find(|w| {
                w.category_id == category_id && w.subcategory_id == subcategory_id && &w.url == url
            })
            .cloned())
    }
}

impl WebsiteWriter for TestRepository {
    fn create_website(&self, website: &NewWebsite) -> RepositoryResult<Website> {
        if self
            .find_website(website.category_id, website.subcategory_id, &website.url)?
            .is_some()
        {
            return Err(conflict("websites.category_id, websites.subcategory_id, websites.url"));
        }
        let mut state = self.state.borrow_mut();
        state.check_placement(website.category_id, website.subcategory_id)?;
        let website = Website {
            id: WebsiteId::new(state.next_id())?,
            author_id: website.author_id,
            category_id: website.category_id,
            subcategory_id: website.subcategory_id,
            title: website.title.clone(),
            description: website.description.clone(),
            url: website.url.clone(),
            image_url: website.image_url.clone(),
            created_at: website.created_at,
            counts: RelationCounts::default(),
        };
        state.websites.push(website.clone());
        Ok(website)
    }

    fn delete_website(&self, id: WebsiteId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.websites.len();
        state.websites.retain(|w| w.id != id);
        let affected = before - state.websites.len();
        state.cascade();
        Ok(affected)
    }
}

impl BookReader for TestRepository {
    fn list_books(&self, query: RecommendationListQuery) -> RepositoryResult<(usize, Vec<Book>)> {
        let state = self.state.borrow();
        list_recommendations!(state, books, recommended_by, RecommendationRef::Book, query)
    }

    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>> {
        let state = self.state.borrow();
        Ok(state.books.iter().find(|b| b.id == id).cloned().map(|mut b| {
            b.counts = state.counts(RecommendationRef::Book(b.id));
            b
        }))
    }

    fn find_book(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
        isbn: &Isbn,
    ) -> RepositoryResult<Option<Book>> {
        let state = self.state.borrow();
        Ok(state
            .books
            .iter()
            .find(|b| {
                b.category_id == category_id
                    && b.subcategory_id == subcategory_id
                    && &b.isbn == isbn
            })
            .cloned())
    }
}

impl BookWriter for TestRepository {
    fn create_book(&self, book: &NewBook) -> RepositoryResult<Book> {
        if self
            .find_book(book.category_id, book.subcategory_id, &book.isbn)?
            .is_some()
        {
            return Err(conflict("books.category_id, books.subcategory_id, books.isbn"));
        }
        let mut state = self.state.borrow_mut();
        state.check_placement(book.category_id, book.subcategory_id)?;
        let book = Book {
            id: BookId::new(state.next_id())?,
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            recommended_by: book.recommended_by,
            category_id: book.category_id,
            subcategory_id: book.subcategory_id,
            author: book.author.clone(),
            description: book.description.clone(),
            created_at: book.created_at,
            url: book.url.clone(),
            image_url: book.image_url.clone(),
            publish_date: book.publish_date,
            counts: RelationCounts::default(),
        };
        state.books.push(book.clone());
        Ok(book)
    }

    fn delete_book(&self, id: BookId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.books.len();
        state.books.retain(|b| b.id != id);
        let affected = before - state.books.len();
        state.cascade();
        Ok(affected)
    }
}

impl VideoReader for TestRepository {
    fn list_videos(
        &self,
        query: RecommendationListQuery,
    ) -> RepositoryResult<(usize, Vec<Video>)> {
        let state = self.state.borrow();
        list_recommendations!(state, videos, recommended_by, RecommendationRef::Video, query)
    }

    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>> {
        let state = self.state.borrow();
        Ok(state.videos.iter().find(|v| v.id == id).cloned().map(|mut v| {
            v.counts = state.counts(RecommendationRef::Video(v.id));
            v
        }))
    }

    fn find_video(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
        video_id: &ExternalVideoId,
    ) -> RepositoryResult<Option<Video>> {
        let state = self.state.borrow();
        Ok(state
            .videos
            .iter()
            .find(|v| {
                v.category_id == category_id
                    && v.subcategory_id == subcategory_id
                    && &v.video_id == video_id
            })
            .cloned())
    }
}

impl VideoWriter for TestRepository {
    fn create_video(&self, video: &NewVideo) -> RepositoryResult<Video> {
        if self
            .find_video(video.category_id, video.subcategory_id, &video.video_id)?
            .is_some()
        {
            return Err(conflict("videos.category_id, videos.subcategory_id, videos.video_id"));
        }
        let mut state = self.state.borrow_mut();
        state.check_placement(video.category_id, video.subcategory_id)?;
        let video = Video {
            id: VideoId::new(state.next_id())?,
            title: video.title.clone(),
            recommended_by: video.recommended_by,
            category_id: video.category_id,
            subcategory_id: video.subcategory_id,
            description: video.description.clone(),
            created_at: video.created_at,
            publish_at: video.publish_at,
            video_url: video.video_url.clone(),
            image_url: video.image_url.clone(),
            video_id: video.video_id.clone(),
            counts: RelationCounts::default(),
        };
        state.videos.push(video.clone());
        Ok(video)
    }

    fn delete_video(&self, id: VideoId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.videos.len();
        state.videos.retain(|v| v.id != id);
        let affected = before - state.videos.len();
        state.cascade();
        Ok(affected)
    }
}

impl RelationReader for TestRepository {
    fn recommendation_exists(&self, target: RecommendationRef) -> RepositoryResult<bool> {
        Ok(self.state.borrow().exists(target))
    }

    fn relation_counts(&self, target: RecommendationRef) -> RepositoryResult<RelationCounts> {
        Ok(self.state.borrow().counts(target))
    }

    fn has_relation(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        kind: RelationKind,
    ) -> RepositoryResult<bool> {
        Ok(self
            .state
            .borrow()
            .relations
            .contains(&(target, user_id, kind)))
    }

    fn list_relation_users(
        &self,
        target: RecommendationRef,
        kind: RelationKind,
    ) -> RepositoryResult<Vec<UserId>> {
        Ok(self
            .state
            .borrow()
            .relations
            .iter()
            .filter(|(t, _, k)| *t == target && *k == kind)
            .map(|(_, user_id, _)| *user_id)
            .collect())
    }

    fn list_user_relations(
        &self,
        user_id: UserId,
        relation: RelationKind,
        kind: RecommendationKind,
    ) -> RepositoryResult<Vec<RecommendationRef>> {
        // Newest first, like the SQL ordering on `created_at`.
        Ok(self
            .state
            .borrow()
            .relations
            .iter()
            .rev()
            .filter(|(t, u, k)| *u == user_id && *k == relation && t.kind() == kind)
            .map(|(target, _, _)| *target)
            .collect())
    }
}

impl RelationWriter for TestRepository {
    fn add_relation(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        kind: RelationKind,
    ) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let entry = (target, user_id, kind);
        if state.relations.contains(&entry) {
            return Ok(0);
        }
        state.relations.push(entry);
        Ok(1)
    }

    fn remove_relation(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        kind: RelationKind,
    ) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.relations.len();
        state.relations.retain(|entry| *entry != (target, user_id, kind));
        Ok(before - state.relations.len())
    }

    fn cast_vote(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        direction: VoteDirection,
    ) -> RepositoryResult<usize> {
        self.remove_relation(target, user_id, direction.opposite())?;
        self.add_relation(target, user_id, direction.relation())
    }
}

impl CommentReader for TestRepository {
    fn list_comments(&self, target: RecommendationRef) -> RepositoryResult<Vec<Comment>> {
        let state = self.state.borrow();
        let mut items: Vec<Comment> = state
            .comments
            .iter()
            .filter(|c| c.target == target)
            .cloned()
            .collect();
        items.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
        Ok(items)
    }

    fn get_comment(
        &self,
        kind: RecommendationKind,
        id: CommentId,
    ) -> RepositoryResult<Option<Comment>> {
        let state = self.state.borrow();
        Ok(state
            .comments
            .iter()
            .find(|c| c.id == id && c.target.kind() == kind)
            .cloned())
    }
}

impl CommentWriter for TestRepository {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<Comment> {
        let mut state = self.state.borrow_mut();
        if !state.exists(comment.target) {
            return Err(RepositoryError::ValidationError(
                "FOREIGN KEY constraint failed".to_string(),
            ));
        }
        let comment = Comment {
            id: CommentId::new(state.next_id())?,
            target: comment.target,
            author_id: comment.author_id,
            text: comment.text.clone(),
            created_at: comment.created_at,
        };
        state.comments.push(comment.clone());
        Ok(comment)
    }

    fn delete_comment(&self, kind: RecommendationKind, id: CommentId) -> RepositoryResult<usize> {
        let mut state = self.state.borrow_mut();
        let before = state.comments.len();
        state
            .comments
            .retain(|c| !(c.id == id && c.target.kind() == kind));
        Ok(before - state.comments.len())
    }
}

/// Seeds an active user; `is_staff` picks the role.
pub fn seed_user(repo: &TestRepository, username: &str, is_staff: bool) -> User {
    let mut user = NewUser::member(Username::new(username).unwrap());
    user.is_staff = is_staff;
    repo.create_user(&user).unwrap()
}
