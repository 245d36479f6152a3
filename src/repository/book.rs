use diesel::prelude::*;

use crate::domain::book::{Book, NewBook};
use crate::domain::isbn::Isbn;
use crate::domain::types::{BookId, CategoryId, RecommendationKind, SubCategoryId};
use crate::models::book::{Book as DbBook, NewBook as DbNewBook};
use crate::repository::relation::load_counts;
use crate::repository::{
    BookReader, BookWriter, DieselRepository, RecommendationListQuery, RepositoryResult,
};

fn with_counts(
    conn: &mut diesel::sqlite::SqliteConnection,
    rows: Vec<DbBook>,
) -> RepositoryResult<Vec<Book>> {
    let ids = rows.iter().map(|row| row.id).collect();
    let mut counts = load_counts(conn, RecommendationKind::Book, ids)?;

    let mut books = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        let mut book: Book = row.try_into()?;
        book.counts = counts.remove(&id).unwrap_or_default();
        books.push(book);
    }
    Ok(books)
}

impl BookReader for DieselRepository {
    fn list_books(&self, query: RecommendationListQuery) -> RepositoryResult<(usize, Vec<Book>)> {
        use crate::schema::books;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = books::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(books::category_id.eq(category_id.get()));
            }
            if let Some(subcategory_id) = query.subcategory_id {
                items = items.filter(books::subcategory_id.eq(subcategory_id.get()));
            }
            if let Some(author_id) = query.author_id {
                items = items.filter(books::recommended_by.eq(author_id.get()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items
            .order((books::created_at.desc(), books::id.desc()))
            .load::<DbBook>(&mut conn)?;

        Ok((total, with_counts(&mut conn, rows)?))
    }

    fn get_book_by_id(&self, id: BookId) -> RepositoryResult<Option<Book>> {
        use crate::schema::books;

        let mut conn = self.conn()?;

        let row = books::table
            .filter(books::id.eq(id.get()))
            .first::<DbBook>(&mut conn)
            .optional()?;

        Ok(with_counts(&mut conn, row.into_iter().collect())?.pop())
    }

    fn find_book(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
        isbn: &Isbn,
    ) -> RepositoryResult<Option<Book>> {
        use crate::schema::books;

        let mut conn = self.conn()?;

        let row = books::table
            .filter(books::category_id.eq(category_id.get()))
            .filter(books::subcategory_id.eq(subcategory_id.get()))
            .filter(books::isbn.eq(isbn.as_str()))
            .first::<DbBook>(&mut conn)
            .optional()?;

        Ok(with_counts(&mut conn, row.into_iter().collect())?.pop())
    }
}

impl BookWriter for DieselRepository {
    fn create_book(&self, book: &NewBook) -> RepositoryResult<Book> {
        use crate::schema::books;

        let mut conn = self.conn()?;
        let db_book: DbNewBook = book.into();

        let created = diesel::insert_into(books::table)
            .values(&db_book)
            .get_result::<DbBook>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn delete_book(&self, id: BookId) -> RepositoryResult<usize> {
        use crate::schema::books;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(books::table.filter(books::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
