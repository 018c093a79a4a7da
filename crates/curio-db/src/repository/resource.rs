//! SurrealDB implementation of the [`Repository`] contract for resources.

use curio_core::error::CurioResult;
use curio_core::models::resource::{Resource, ResourceSummary};
use curio_core::repository::{Projection, QueryFilter, Repository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::{DbError, is_duplicate_record};

/// Stored fields of the `resource` table; the id lives in the record id.
#[derive(Debug, SurrealValue)]
struct ResourceRow {
    name: String,
    description: String,
    category_id: String,
    owner_id: String,
}

/// Row shape that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ResourceRowWithId {
    record_id: String,
    name: String,
    description: String,
    category_id: String,
    owner_id: String,
}

/// Projected row for category listings.
#[derive(Debug, SurrealValue)]
struct SummaryRow {
    record_id: String,
    name: String,
    description: String,
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn row_to_resource(row: ResourceRow, id: Uuid) -> Resource {
    Resource {
        id,
        name: row.name,
        description: row.description,
        category_id: row.category_id,
        owner_id: row.owner_id,
    }
}

impl ResourceRowWithId {
    fn try_into_resource(self) -> Result<Resource, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        Ok(Resource {
            id,
            name: self.name,
            description: self.description,
            category_id: self.category_id,
            owner_id: self.owner_id,
        })
    }
}

impl SummaryRow {
    fn try_into_summary(self) -> Result<ResourceSummary, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Migration(format!("invalid UUID: {e}")))?;
        Ok(ResourceSummary {
            id,
            name: self.name,
            description: self.description,
        })
    }
}

/// SurrealDB implementation of the resources repository.
pub struct SurrealResourcesRepository<C: Connection> {
    db: Surreal<C>,
}

// Manual impl: cloning duplicates the store handle, and the engine marker
// type `C` itself is never cloned.
impl<C: Connection> Clone for SurrealResourcesRepository<C> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

impl<C: Connection> SurrealResourcesRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// List the resources in a category, projected to id/name/description.
    pub async fn select_by_category_id(
        &self,
        category_id: &str,
    ) -> CurioResult<Vec<ResourceSummary>> {
        self.select_by_query(
            QueryFilter::eq("category_id", category_id),
            Projection(&["name", "description"]),
        )
        .await
    }

    /// Count the resources in a category.
    pub async fn count_by_category_id(&self, category_id: &str) -> CurioResult<u64> {
        self.count_by_query(QueryFilter::eq("category_id", category_id))
            .await
    }
}

impl<C: Connection> Repository for SurrealResourcesRepository<C> {
    type Entity = Resource;
    type Summary = ResourceSummary;

    async fn select(&self) -> CurioResult<Vec<Resource>> {
        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, * FROM resource")
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ResourceRowWithId> = result.take(0).map_err(DbError::from)?;

        rows.into_iter()
            .map(|row| row.try_into_resource())
            .collect::<Result<Vec<_>, DbError>>()
            .map_err(Into::into)
    }

    async fn select_by_id(&self, id: Uuid) -> CurioResult<Option<Resource>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('resource', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ResourceRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(|row| row_to_resource(row, id)))
    }

    async fn select_by_query(
        &self,
        filter: QueryFilter,
        projection: Projection,
    ) -> CurioResult<Vec<ResourceSummary>> {
        let query = format!(
            "SELECT meta::id(id) AS record_id, {} FROM resource \
             WHERE {} = $value",
            projection.0.join(", "),
            filter.field,
        );

        let mut result = self
            .db
            .query(query)
            .bind(("value", filter.value))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<SummaryRow> = result.take(0).map_err(DbError::from)?;

        rows.into_iter()
            .map(|row| row.try_into_summary())
            .collect::<Result<Vec<_>, DbError>>()
            .map_err(Into::into)
    }

    async fn count_by_query(&self, filter: QueryFilter) -> CurioResult<u64> {
        let query = format!(
            "SELECT count() AS total FROM resource \
             WHERE {} = $value GROUP ALL",
            filter.field,
        );

        let mut result = self
            .db
            .query(query)
            .bind(("value", filter.value))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn insert(&self, entity: Resource) -> CurioResult<Option<Resource>> {
        let id = entity.id;
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('resource', $id) SET \
                 name = $name, description = $description, \
                 category_id = $category_id, owner_id = $owner_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", entity.name))
            .bind(("description", entity.description))
            .bind(("category_id", entity.category_id))
            .bind(("owner_id", entity.owner_id))
            .await
            .map_err(DbError::from)?;

        let mut result = match result.check() {
            Ok(result) => result,
            // CREATE on a taken record id signals a duplicate.
            Err(err) if is_duplicate_record(&err) => return Ok(None),
            Err(err) => return Err(DbError::Migration(err.to_string()).into()),
        };

        let rows: Vec<ResourceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "resource".into(),
            id: id_str,
        })?;

        Ok(Some(row_to_resource(row, id)))
    }

    async fn update(&self, id: Uuid, entity: Resource) -> CurioResult<Resource> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('resource', $id) SET \
                 name = $name, description = $description, \
                 category_id = $category_id, owner_id = $owner_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", entity.name))
            .bind(("description", entity.description))
            .bind(("category_id", entity.category_id))
            .bind(("owner_id", entity.owner_id))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::Migration(e.to_string()))?;

        let rows: Vec<ResourceRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "resource".into(),
            id: id_str,
        })?;

        Ok(row_to_resource(row, id))
    }

    async fn delete(&self, id: Uuid) -> CurioResult<()> {
        self.db
            .query("DELETE type::record('resource', $id)")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
