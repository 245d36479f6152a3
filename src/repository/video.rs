use diesel::prelude::*;

use crate::domain::types::{CategoryId, ExternalVideoId, RecommendationKind, SubCategoryId, VideoId};
use crate::domain::video::{NewVideo, Video};
use crate::models::video::{NewVideo as DbNewVideo, Video as DbVideo};
use crate::repository::relation::load_counts;
use crate::repository::{
    DieselRepository, RecommendationListQuery, RepositoryResult, VideoReader, VideoWriter,
};

fn with_counts(
    conn: &mut diesel::sqlite::SqliteConnection,
    rows: Vec<DbVideo>,
) -> RepositoryResult<Vec<Video>> {
    let ids = rows.iter().map(|row| row.id).collect();
    let mut counts = load_counts(conn, RecommendationKind::Video, ids)?;

    let mut videos = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        let mut video: Video = row.try_into()?;
        video.counts = counts.remove(&id).unwrap_or_default();
        videos.push(video);
    }
    Ok(videos)
}

impl VideoReader for DieselRepository {
    fn list_videos(
        &self,
        query: RecommendationListQuery,
    ) -> RepositoryResult<(usize, Vec<Video>)> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = videos::table.into_boxed::<diesel::sqlite::Sqlite>();

            if let Some(category_id) = query.category_id {
                items = items.filter(videos::category_id.eq(category_id.get()));
            }
            if let Some(subcategory_id) = query.subcategory_id {
                items = items.filter(videos::subcategory_id.eq(subcategory_id.get()));
            }
            if let Some(author_id) = query.author_id {
                items = items.filter(videos::recommended_by.eq(author_id.get()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items
            .order((videos::created_at.desc(), videos::id.desc()))
            .load::<DbVideo>(&mut conn)?;

        Ok((total, with_counts(&mut conn, rows)?))
    }

    fn get_video_by_id(&self, id: VideoId) -> RepositoryResult<Option<Video>> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        let row = videos::table
            .filter(videos::id.eq(id.get()))
            .first::<DbVideo>(&mut conn)
            .optional()?;

        Ok(with_counts(&mut conn, row.into_iter().collect())?.pop())
    }

    fn find_video(
        &self,
        category_id: CategoryId,
        subcategory_id: SubCategoryId,
        video_id: &ExternalVideoId,
    ) -> RepositoryResult<Option<Video>> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        let row = videos::table
            .filter(videos::category_id.eq(category_id.get()))
            .filter(videos::subcategory_id.eq(subcategory_id.get()))
            .filter(videos::video_id.eq(video_id.as_str()))
            .first::<DbVideo>(&mut conn)
            .optional()?;

        Ok(with_counts(&mut conn, row.into_iter().collect())?.pop())
    }
}

impl VideoWriter for DieselRepository {
    fn create_video(&self, video: &NewVideo) -> RepositoryResult<Video> {
        use crate::schema::videos;

        let mut conn = self.conn()?;
        let db_video: DbNewVideo = video.into();

        let created = diesel::insert_into(videos::table)
            .values(&db_video)
            .get_result::<DbVideo>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn delete_video(&self, id: VideoId) -> RepositoryResult<usize> {
        use crate::schema::videos;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(videos::table.filter(videos::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
