use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::comment::{Comment, NewComment};
use crate::domain::types::{CommentId, RecommendationKind, RecommendationRef};
use crate::models::comment::CommentRow;
use crate::repository::{CommentReader, CommentWriter, DieselRepository, RepositoryResult};

/// Generates the queries for one comment table; all three share a shape.
macro_rules! comment_queries {
    ($module:ident, $comments:ident) => {
        mod $module {
            use chrono::NaiveDateTime;
            use diesel::prelude::*;
            use diesel::sqlite::SqliteConnection;

            use crate::models::comment::CommentRow;
            use crate::schema::$comments;

            pub fn list(conn: &mut SqliteConnection, target: i32) -> QueryResult<Vec<CommentRow>> {
                $comments::table
                    .filter($comments::recommendation_id.eq(target))
                    .order(($comments::created_at.asc(), $comments::id.asc()))
                    .load(conn)
            }

            pub fn get(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<CommentRow>> {
                $comments::table
                    .filter($comments::id.eq(id))
                    .first(conn)
                    .optional()
            }

            pub fn insert(
                conn: &mut SqliteConnection,
                target: i32,
                author_id: i32,
                text: &str,
                created_at: NaiveDateTime,
            ) -> QueryResult<CommentRow> {
                diesel::insert_into($comments::table)
                    .values((
                        $comments::recommendation_id.eq(target),
                        $comments::author_id.eq(author_id),
                        $comments::text.eq(text),
                        $comments::created_at.eq(created_at),
                    ))
                    .get_result(conn)
            }

            pub fn delete(conn: &mut SqliteConnection, id: i32) -> QueryResult<usize> {
                diesel::delete($comments::table.filter($comments::id.eq(id))).execute(conn)
            }
        }
    };
}

comment_queries!(website, website_comments);
comment_queries!(book, book_comments);
comment_queries!(video, video_comments);

fn insert_comment(
    conn: &mut diesel::sqlite::SqliteConnection,
    target: RecommendationRef,
    author_id: i32,
    text: &str,
    created_at: NaiveDateTime,
) -> QueryResult<CommentRow> {
    let id = target.raw_id();
    match target.kind() {
        RecommendationKind::Website => website::insert(conn, id, author_id, text, created_at),
        RecommendationKind::Book => book::insert(conn, id, author_id, text, created_at),
        RecommendationKind::Video => video::insert(conn, id, author_id, text, created_at),
    }
}

impl CommentReader for DieselRepository {
    fn list_comments(&self, target: RecommendationRef) -> RepositoryResult<Vec<Comment>> {
        let mut conn = self.conn()?;
        let id = target.raw_id();

        let rows = match target.kind() {
            RecommendationKind::Website => website::list(&mut conn, id)?,
            RecommendationKind::Book => book::list(&mut conn, id)?,
            RecommendationKind::Video => video::list(&mut conn, id)?,
        };

        Ok(rows
            .into_iter()
            .map(|row| row.into_domain(target.kind()))
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn get_comment(
        &self,
        kind: RecommendationKind,
        id: CommentId,
    ) -> RepositoryResult<Option<Comment>> {
        let mut conn = self.conn()?;

        let row = match kind {
            RecommendationKind::Website => website::get(&mut conn, id.get())?,
            RecommendationKind::Book => book::get(&mut conn, id.get())?,
            RecommendationKind::Video => video::get(&mut conn, id.get())?,
        };

        Ok(row.map(|row| row.into_domain(kind)).transpose()?)
    }
}

impl CommentWriter for DieselRepository {
    fn create_comment(&self, comment: &NewComment) -> RepositoryResult<Comment> {
        let mut conn = self.conn()?;

        let row = insert_comment(
            &mut conn,
            comment.target,
            comment.author_id.get(),
            comment.text.as_str(),
            comment.created_at,
        )?;

        Ok(row.into_domain(comment.target.kind())?)
    }

    fn delete_comment(&self, kind: RecommendationKind, id: CommentId) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let affected = match kind {
            RecommendationKind::Website => website::delete(&mut conn, id.get())?,
            RecommendationKind::Book => book::delete(&mut conn, id.get())?,
            RecommendationKind::Video => video::delete(&mut conn, id.get())?,
        };

        Ok(affected)
    }
}
