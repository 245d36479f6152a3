//! Vote and bookmark membership stored in the `*_relations` tables.
//!
//! Each recommendation kind has its own table keyed by
//! `(recommendation_id, user_id, kind)`, so a membership is a set entry and
//! inserting it twice is a no-op.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::types::{
    RecommendationKind, RecommendationRef, RelationCounts, RelationKind, TypeConstraintError,
    UserId, VoteDirection,
};
use crate::repository::{DieselRepository, RelationReader, RelationWriter, RepositoryResult};

/// Generates the per-table queries; the three relation tables share a shape.
macro_rules! relation_queries {
    ($module:ident, $relations:ident, $items:ident) => {
        pub(crate) mod $module {
            use diesel::prelude::*;
            use diesel::sqlite::SqliteConnection;

            use crate::schema::{$items, $relations};

            pub fn exists(conn: &mut SqliteConnection, id: i32) -> QueryResult<bool> {
                diesel::select(diesel::dsl::exists(
                    $items::table.filter($items::id.eq(id)),
                ))
                .get_result(conn)
            }

            pub fn counts(
                conn: &mut SqliteConnection,
                ids: Vec<i32>,
            ) -> QueryResult<Vec<(i32, String, i64)>> {
                $relations::table
                    .filter($relations::recommendation_id.eq_any(ids))
                    .group_by(($relations::recommendation_id, $relations::kind))
                    .select((
                        $relations::recommendation_id,
                        $relations::kind,
                        diesel::dsl::count_star(),
                    ))
                    .load(conn)
            }

            pub fn contains(
                conn: &mut SqliteConnection,
                id: i32,
                user_id: i32,
                kind: &str,
            ) -> QueryResult<bool> {
                diesel::select(diesel::dsl::exists(
                    $relations::table
                        .filter($relations::recommendation_id.eq(id))
                        .filter($relations::user_id.eq(user_id))
                        .filter($relations::kind.eq(kind)),
                ))
                .get_result(conn)
            }

            pub fn users(conn: &mut SqliteConnection, id: i32, kind: &str) -> QueryResult<Vec<i32>> {
                $relations::table
                    .filter($relations::recommendation_id.eq(id))
                    .filter($relations::kind.eq(kind))
                    .order(($relations::created_at.asc(), $relations::user_id.asc()))
                    .select($relations::user_id)
                    .load(conn)
            }

            pub fn for_user(
                conn: &mut SqliteConnection,
                user_id: i32,
                kind: &str,
            ) -> QueryResult<Vec<i32>> {
                $relations::table
                    .filter($relations::user_id.eq(user_id))
                    .filter($relations::kind.eq(kind))
                    .order((
                        $relations::created_at.desc(),
                        $relations::recommendation_id.desc(),
                    ))
                    .select($relations::recommendation_id)
                    .load(conn)
            }

            pub fn insert(
                conn: &mut SqliteConnection,
                id: i32,
                user_id: i32,
                kind: &str,
            ) -> QueryResult<usize> {
                diesel::insert_or_ignore_into($relations::table)
                    .values((
                        $relations::recommendation_id.eq(id),
                        $relations::user_id.eq(user_id),
                        $relations::kind.eq(kind),
                    ))
                    .execute(conn)
            }

            pub fn delete(
                conn: &mut SqliteConnection,
                id: i32,
                user_id: i32,
                kind: &str,
            ) -> QueryResult<usize> {
                diesel::delete(
                    $relations::table
                        .filter($relations::recommendation_id.eq(id))
                        .filter($relations::user_id.eq(user_id))
                        .filter($relations::kind.eq(kind)),
                )
                .execute(conn)
            }
        }
    };
}

relation_queries!(website, website_relations, websites);
relation_queries!(book, book_relations, books);
relation_queries!(video, video_relations, videos);

/// Folds `(recommendation_id, kind, count)` rows into per-item totals.
fn collect_counts(
    rows: Vec<(i32, String, i64)>,
) -> Result<HashMap<i32, RelationCounts>, TypeConstraintError> {
    let mut counts: HashMap<i32, RelationCounts> = HashMap::new();
    for (id, kind, count) in rows {
        let kind = RelationKind::try_from(kind)?;
        counts.entry(id).or_default().record(kind, count as usize);
    }
    Ok(counts)
}

/// Aggregates relation totals for a batch of recommendations of one kind.
pub(crate) fn load_counts(
    conn: &mut SqliteConnection,
    kind: RecommendationKind,
    ids: Vec<i32>,
) -> RepositoryResult<HashMap<i32, RelationCounts>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = match kind {
        RecommendationKind::Website => website::counts(conn, ids)?,
        RecommendationKind::Book => book::counts(conn, ids)?,
        RecommendationKind::Video => video::counts(conn, ids)?,
    };

    Ok(collect_counts(rows)?)
}

fn insert_relation(
    conn: &mut SqliteConnection,
    target: RecommendationRef,
    user_id: UserId,
    kind: RelationKind,
) -> QueryResult<usize> {
    let (id, user_id, kind) = (target.raw_id(), user_id.get(), kind.as_str());
    match target.kind() {
        RecommendationKind::Website => website::insert(conn, id, user_id, kind),
        RecommendationKind::Book => book::insert(conn, id, user_id, kind),
        RecommendationKind::Video => video::insert(conn, id, user_id, kind),
    }
}

fn delete_relation(
    conn: &mut SqliteConnection,
    target: RecommendationRef,
    user_id: UserId,
    kind: RelationKind,
) -> QueryResult<usize> {
    let (id, user_id, kind) = (target.raw_id(), user_id.get(), kind.as_str());
    match target.kind() {
        RecommendationKind::Website => website::delete(conn, id, user_id, kind),
        RecommendationKind::Book => book::delete(conn, id, user_id, kind),
        RecommendationKind::Video => video::delete(conn, id, user_id, kind),
    }
}

impl RelationReader for DieselRepository {
    fn recommendation_exists(&self, target: RecommendationRef) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        let id = target.raw_id();

        let exists = match target.kind() {
            RecommendationKind::Website => website::exists(&mut conn, id)?,
            RecommendationKind::Book => book::exists(&mut conn, id)?,
            RecommendationKind::Video => video::exists(&mut conn, id)?,
        };

        Ok(exists)
    }

    fn relation_counts(&self, target: RecommendationRef) -> RepositoryResult<RelationCounts> {
        let mut conn = self.conn()?;
        let id = target.raw_id();

        let mut counts = load_counts(&mut conn, target.kind(), vec![id])?;
        Ok(counts.remove(&id).unwrap_or_default())
    }

    fn has_relation(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        kind: RelationKind,
    ) -> RepositoryResult<bool> {
        let mut conn = self.conn()?;
        let (id, user_id, kind) = (target.raw_id(), user_id.get(), kind.as_str());

        let present = match target.kind() {
            RecommendationKind::Website => website::contains(&mut conn, id, user_id, kind)?,
            RecommendationKind::Book => book::contains(&mut conn, id, user_id, kind)?,
            RecommendationKind::Video => video::contains(&mut conn, id, user_id, kind)?,
        };

        Ok(present)
    }

    fn list_relation_users(
        &self,
        target: RecommendationRef,
        kind: RelationKind,
    ) -> RepositoryResult<Vec<UserId>> {
        let mut conn = self.conn()?;
        let (id, kind) = (target.raw_id(), kind.as_str());

        let users = match target.kind() {
            RecommendationKind::Website => website::users(&mut conn, id, kind)?,
            RecommendationKind::Book => book::users(&mut conn, id, kind)?,
            RecommendationKind::Video => video::users(&mut conn, id, kind)?,
        };

        Ok(users
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()?)
    }

    fn list_user_relations(
        &self,
        user_id: UserId,
        relation: RelationKind,
        kind: RecommendationKind,
    ) -> RepositoryResult<Vec<RecommendationRef>> {
        let mut conn = self.conn()?;
        let (user_id, relation) = (user_id.get(), relation.as_str());

        let ids = match kind {
            RecommendationKind::Website => website::for_user(&mut conn, user_id, relation)?,
            RecommendationKind::Book => book::for_user(&mut conn, user_id, relation)?,
            RecommendationKind::Video => video::for_user(&mut conn, user_id, relation)?,
        };

        Ok(ids
            .into_iter()
            .map(|id| RecommendationRef::new(kind, id))
            .collect::<Result<Vec<_>, _>>()?)
    }
}

impl RelationWriter for DieselRepository {
    fn add_relation(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        kind: RelationKind,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(insert_relation(&mut conn, target, user_id, kind)?)
    }

    fn remove_relation(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        kind: RelationKind,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        Ok(delete_relation(&mut conn, target, user_id, kind)?)
    }

    fn cast_vote(
        &self,
        target: RecommendationRef,
        user_id: UserId,
        direction: VoteDirection,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            delete_relation(conn, target, user_id, direction.opposite())?;
            insert_relation(conn, target, user_id, direction.relation())
        })?;

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_counts_groups_by_recommendation() {
        let rows = vec![
            (1, "upvote".to_string(), 3),
            (1, "downvote".to_string(), 1),
            (2, "bookmark".to_string(), 2),
        ];
        let counts = collect_counts(rows).unwrap();
        assert_eq!(counts[&1].score(), 2);
        assert_eq!(counts[&2].bookmarks, 2);
        assert_eq!(counts[&2].score(), 0);
    }

    #[test]
    fn collect_counts_rejects_unknown_kinds() {
        let rows = vec![(1, "like".to_string(), 1)];
        assert!(collect_counts(rows).is_err());
    }
}
