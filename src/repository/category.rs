use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository, RepositoryResult,
};

impl CategoryReader for DieselRepository {
    fn list_categories(
        &self,
        query: CategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<Category>)> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let total = categories::table.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = categories::table.into_boxed::<diesel::sqlite::Sqlite>();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok((total, items))
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(TryInto::try_into).transpose()?)
    }

    fn get_category_by_slug(&self, slug: &str) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // Slugs are not unique; the oldest matching row wins.
        let category = categories::table
            .filter(categories::slug.eq(slug))
            .order(categories::id.asc())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(TryInto::try_into).transpose()?)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category = DbNewCategory::try_from(category)?;

        let created = diesel::insert_into(categories::table)
            .values(&db_category)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_category(&self, id: CategoryId, category: &NewCategory) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let changeset = DbNewCategory::try_from(category)?;

        let affected = diesel::update(categories::table.filter(categories::id.eq(id.get())))
            .set(&changeset)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::delete(categories::table.filter(categories::id.eq(id.get())))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
