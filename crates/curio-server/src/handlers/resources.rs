//! Resource endpoints: the five CRUD routes plus category-scoped
//! listings.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use surrealdb::Connection;
use uuid::Uuid;

use curio_core::models::resource::Resource;

use crate::auth::AuthContext;
use crate::error::ApiError;
use crate::handlers::crud::{self, InsertHooks};
use crate::state::AppState;

/// A resource payload must carry a non-empty name.
fn validate(resource: &Resource) -> bool {
    !resource.name.trim().is_empty()
}

pub async fn list<C: Connection>(State(state): State<AppState<C>>) -> Result<Response, ApiError> {
    crud::get(&state.resources).await
}

pub async fn get_by_id<C: Connection>(
    State(state): State<AppState<C>>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    crud::get_by_id(&state.resources, id).await
}

pub async fn create<C: Connection>(
    State(state): State<AppState<C>>,
    ctx: AuthContext,
    Json(payload): Json<Resource>,
) -> Result<Response, ApiError> {
    crud::post(
        &state.resources,
        &ctx,
        payload,
        InsertHooks {
            validate: Some(&validate),
            ..InsertHooks::default()
        },
    )
    .await
}

pub async fn update<C: Connection>(
    State(state): State<AppState<C>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<Resource>,
) -> Result<Response, ApiError> {
    crud::put(
        &state.resources,
        &ctx,
        &headers,
        &state.config.client_domain,
        id,
        payload,
    )
    .await
}

pub async fn remove<C: Connection>(
    State(state): State<AppState<C>>,
    ctx: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    crud::remove(&state.resources, &ctx, id).await
}

/// List the resources in a category, projected to id/name/description.
pub async fn list_by_category<C: Connection>(
    State(state): State<AppState<C>>,
    Path(category_id): Path<String>,
) -> Result<Response, ApiError> {
    let result = state.resources.select_by_category_id(&category_id).await?;
    Ok((StatusCode::OK, Json(result)).into_response())
}

/// Count the resources in a category.
pub async fn count_by_category<C: Connection>(
    State(state): State<AppState<C>>,
    Path(category_id): Path<String>,
) -> Result<Response, ApiError> {
    let count = state.resources.count_by_category_id(&category_id).await?;
    Ok((StatusCode::OK, Json(json!({ "count": count }))).into_response())
}
