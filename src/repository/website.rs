use diesel::prelude::*;

use crate::domain::types::{CategoryId, RecommendationKind, SubCategoryId, WebsiteId, WebsiteUrl};
use crate::domain::website::{NewWebsite, Website};
use crate::models::website::{NewWebsite as DbNewWebsite, Website as DbWebsite};
use crate::repository::relation::load_counts;
use crate::repository::{
    DieselRepository, RecommendationListQuery, RepositoryResult, WebsiteReader, WebsiteWriter,
};

/// Converts rows and attaches their aggregated votes and bookmarks.
fn with_counts(
    conn: &mut diesel::sqlite::SqliteConnection,
    rows: Vec<DbWebsite>,
) -> RepositoryResult<Vec<Website>> {
    let ids = rows.iter().map(|row| row.id).collect();
    let mut counts = load_counts(conn, RecommendationKind::Website, ids)?;

    let mut websites = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        let mut website: Website = row.try_into()?;
        website.counts = counts.remove(&id).unwrap_or_default();
        websites.push(website);
    }
    Ok(websites)
}

impl WebsiteReader for DieselRepository {
    fn list_websites(
        &self,
        query: RecommendationListQuery,
    ) -> RepositoryResult<(usize, Vec<Website>)> {
        use crate::schema::websites;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = websites::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(websites::category_id.eq(category_id.get()));
            }
            if let Some(subcategory_id) = query.subcategory_id {
                items = items.filter(websites::subcategory_id.eq(subcategory_id.get()));
            }
            if let Some(author_id) = query.author_id {
                items = items.filter(websites::author_id.eq(author_id.get()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items
            .order((websites::created_at.desc(), websites::id.desc()))
            .load::<DbWebsite>(&mut conn)?;

        Ok((total, with_counts(&mut conn, rows)?))
    }

    fn get_website_by_id(&self, id: WebsiteId) -> RepositoryResult<Option<Website>> {
        use crate::schema::websites;

        let mut conn = self.conn()?;

        let row = websites::table
            .filter(websites::id.eq(id.get()))
            .first::<DbWebsite>(&mut conn)
            .optional()?;

        Ok(with_counts(&mut conn, row.into_iter().collect())?.pop())
    }

    fn find_website(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
        url: &WebsiteUrl,
    ) -> RepositoryResult<Option<Website>> {
        use crate::schema::websites;

        let mut conn = self.conn()?;

        let row = websites::table
            .filter(websites::category_id.eq(category_id.get()))
            .filter(websites::subcategory_id.eq(subcategory_id.get()))
            .filter(websites::url.eq(url.as_str()))
            .first::<DbWebsite>(&mut conn)
            .optional()?;

        Ok(with_counts(&mut conn, row.into_iter().collect())?.pop())
    }
}

impl WebsiteWriter for DieselRepository {
    fn create_website(&self, website: &NewWebsite) -> RepositoryResult<Website> {
        use crate::schema::websites;

        let mut conn = self.conn()?;
        let db_website: DbNewWebsite = website.into();

        let created = diesel::insert_into(websites::table)
            .values(&db_website)
            .get_result::<DbWebsite>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn delete_website(&self, id: WebsiteId) -> RepositoryResult<usize> {
        use crate::schema::websites;

        let mut conn = self.conn()?;

        let affected = diesel::delete(websites::table.filter(websites::id.eq(id.get())))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
