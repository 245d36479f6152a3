//! Helpers for integration tests.

use chrono::{DateTime, NaiveDate};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use recsite::db::{DbPool, establish_connection_pool};
use recsite::domain::book::NewBook;
use recsite::domain::category::{Category, NewCategory, NewSubCategory, SubCategory};
use recsite::domain::isbn::Isbn;
use recsite::domain::types::{
    BookAuthor, BookDescription, BookTitle, BookUrl, CategoryName, ExternalVideoId, ImageUrl,
    SubCategoryName, UserId, Username, VideoDescription, VideoTitle, VideoUrl,
    WebsiteDescription, WebsiteTitle, WebsiteUrl,
};
use recsite::domain::user::{NewUser, User};
use recsite::domain::video::NewVideo;
use recsite::domain::website::NewWebsite;
use recsite::repository::{CategoryWriter, DieselRepository, SubCategoryWriter, UserWriter};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    #[allow(dead_code)]
    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

#[allow(dead_code)]
pub fn create_user(repo: &DieselRepository, username: &str) -> User {
    repo.create_user(&NewUser::member(
        Username::new(username).expect("valid username"),
    ))
    .expect("should create user")
}

/// Creates a category with one subcategory under it.
#[allow(dead_code)]
pub fn create_placement(
    repo: &DieselRepository,
    category: &str,
    subcategory: &str,
) -> (Category, SubCategory) {
    let category = repo
        .create_category(&NewCategory {
            name: CategoryName::new(category).expect("valid category name"),
            image: None,
        })
        .expect("should create category");
    let subcategory = repo
        .create_subcategory(&NewSubCategory {
            category_id: category.id,
            name: SubCategoryName::new(subcategory).expect("valid subcategory name"),
            image: None,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        })
        .expect("should create subcategory");
    (category, subcategory)
}

/// Adds another subcategory next to an existing placement.
#[allow(dead_code)]
pub fn create_sibling(
    repo: &DieselRepository,
    placement: &(Category, SubCategory),
    subcategory: &str,
) -> (Category, SubCategory) {
    let sibling = repo
        .create_subcategory(&NewSubCategory {
            category_id: placement.0.id,
            name: SubCategoryName::new(subcategory).expect("valid subcategory name"),
            image: None,
            created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        })
        .expect("should create subcategory");
    (placement.0.clone(), sibling)
}

#[allow(dead_code)]
pub fn new_website(
    author_id: UserId,
    placement: &(Category, SubCategory),
    url: &str,
    created_at: i64,
) -> NewWebsite {
    NewWebsite {
        author_id,
        category_id: placement.0.id,
        subcategory_id: placement.1.id,
        title: WebsiteTitle::new(format!("Site at {url}")).expect("valid title"),
        description: WebsiteDescription::new("A useful site.").expect("valid description"),
        url: WebsiteUrl::new(url).expect("valid url"),
        image_url: None,
        created_at: DateTime::from_timestamp(created_at, 0).unwrap().naive_utc(),
    }
}

#[allow(dead_code)]
pub fn new_book(recommended_by: UserId, placement: &(Category, SubCategory), isbn: &str) -> NewBook {
    NewBook {
        isbn: Isbn::new(isbn).expect("valid isbn"),
        title: BookTitle::new("The Rust Programming Language").expect("valid title"),
        recommended_by,
        category_id: placement.0.id,
        subcategory_id: placement.1.id,
        author: BookAuthor::new("Steve Klabnik").expect("valid author"),
        description: BookDescription::new("The official book.").expect("valid description"),
        created_at: DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
        url: BookUrl::new("https://nostarch.com/rust").expect("valid url"),
        image_url: ImageUrl::new("https://example.com/cover.jpg").expect("valid image url"),
        publish_date: NaiveDate::from_ymd_opt(2018, 8, 1).unwrap(),
    }
}

#[allow(dead_code)]
pub fn new_video(
    recommended_by: UserId,
    placement: &(Category, SubCategory),
    video_id: &str,
    created_at: i64,
) -> NewVideo {
    NewVideo {
        title: VideoTitle::new(format!("Video {video_id}")).expect("valid title"),
        recommended_by,
        category_id: placement.0.id,
        subcategory_id: placement.1.id,
        description: VideoDescription::new("Worth watching.").expect("valid description"),
        created_at: DateTime::from_timestamp(created_at, 0).unwrap().naive_utc(),
        publish_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap().naive_utc(),
        video_url: VideoUrl::new(format!("https://www.youtube.com/watch?v={video_id}"))
            .expect("valid url"),
        image_url: ImageUrl::new(format!("https://img.youtube.com/vi/{video_id}/0.jpg"))
            .expect("valid image url"),
        video_id: ExternalVideoId::new(video_id).expect("valid video id"),
    }
}
