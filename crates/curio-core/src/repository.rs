//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Each entity type gets one concrete
//! implementation of [`Repository`]; the generic HTTP handlers are written
//! against this contract plus [`Document`].

use uuid::Uuid;

use crate::error::CurioResult;

/// Uniform access to the identity fields of a persisted entity.
///
/// The generic handlers use this to assign server-side identity on create
/// and to preserve it on update.
pub trait Document {
    /// Entity name used in diagnostics and error payloads.
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);
    fn owner_id(&self) -> &str;
    fn set_owner_id(&mut self, owner_id: String);
}

/// Equality filter over a single stored field.
///
/// Field names come from code, never from request input.
#[derive(Debug, Clone)]
pub struct QueryFilter {
    pub field: &'static str,
    pub value: String,
}

impl QueryFilter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Stored fields a query result is narrowed to.
///
/// The record id is always included alongside the listed fields.
#[derive(Debug, Clone, Copy)]
pub struct Projection(pub &'static [&'static str]);

pub trait Repository: Send + Sync {
    /// Full entity shape stored in the backing table.
    type Entity: Send;
    /// Projected shape returned by [`Repository::select_by_query`].
    type Summary: Send;

    fn select(&self) -> impl Future<Output = CurioResult<Vec<Self::Entity>>> + Send;

    fn select_by_id(
        &self,
        id: Uuid,
    ) -> impl Future<Output = CurioResult<Option<Self::Entity>>> + Send;

    fn select_by_query(
        &self,
        filter: QueryFilter,
        projection: Projection,
    ) -> impl Future<Output = CurioResult<Vec<Self::Summary>>> + Send;

    fn count_by_query(&self, filter: QueryFilter) -> impl Future<Output = CurioResult<u64>> + Send;

    /// Returns `None` when a record with the entity's id already exists.
    fn insert(
        &self,
        entity: Self::Entity,
    ) -> impl Future<Output = CurioResult<Option<Self::Entity>>> + Send;

    fn update(
        &self,
        id: Uuid,
        entity: Self::Entity,
    ) -> impl Future<Output = CurioResult<Self::Entity>> + Send;

    fn delete(&self, id: Uuid) -> impl Future<Output = CurioResult<()>> + Send;
}
