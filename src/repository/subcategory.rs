use diesel::prelude::*;

use crate::domain::category::{NewSubCategory, SubCategory, SubCategoryUpdate};
use crate::domain::types::{CategoryId, SubCategoryId};
use crate::models::category::{
    NewSubCategory as DbNewSubCategory, SubCategory as DbSubCategory, SubCategoryChangeset,
};
use crate::repository::{
    DieselRepository, RepositoryResult, SubCategoryListQuery, SubCategoryReader,
    SubCategoryWriter,
};

impl SubCategoryReader for DieselRepository {
    fn list_subcategories(
        &self,
        query: SubCategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<SubCategory>)> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let query_builder = || {
            subcategories::table
                .filter(subcategories::category_id.eq(query.category_id.get()))
                .into_boxed::<diesel::sqlite::Sqlite>()
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let items = items
            .order(subcategories::name.asc())
            .load::<DbSubCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<SubCategory>, _>>()?;

        Ok((total, items))
    }

    fn get_subcategory_by_id(&self, id: SubCategoryId) -> RepositoryResult<Option<SubCategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let subcategory = subcategories::table
            .filter(subcategories::id.eq(id.get()))
            .first::<DbSubCategory>(&mut conn)
            .optional()?;

        Ok(subcategory.map(TryInto::try_into).transpose()?)
    }

    fn get_subcategory_by_slug(
        &self,
        category_id: CategoryId,
        slug: &str,
    ) -> RepositoryResult<Option<SubCategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let subcategory = subcategories::table
            .filter(subcategories::category_id.eq(category_id.get()))
            .filter(subcategories::slug.eq(slug))
            .order(subcategories::id.asc())
            .first::<DbSubCategory>(&mut conn)
            .optional()?;

        Ok(subcategory.map(TryInto::try_into).transpose()?)
    }
}

impl SubCategoryWriter for DieselRepository {
    fn create_subcategory(&self, subcategory: &NewSubCategory) -> RepositoryResult<SubCategory> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;
        let db_subcategory = DbNewSubCategory::try_from(subcategory)?;

        let created = diesel::insert_into(subcategories::table)
            .values(&db_subcategory)
            .get_result::<DbSubCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_subcategory(
        &self,
        id: SubCategoryId,
        update: &SubCategoryUpdate,
    ) -> RepositoryResult<usize> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;
        let changeset = SubCategoryChangeset::try_from(update)?;

        let affected =
            diesel::update(subcategories::table.filter(subcategories::id.eq(id.get())))
                .set(&changeset)
                .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_subcategory(&self, id: SubCategoryId) -> RepositoryResult<usize> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(subcategories::table.filter(subcategories::id.eq(id.get())))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
