//! Route table.

use axum::Router;
use axum::routing::get;
use surrealdb::Connection;

use crate::handlers::resources;
use crate::state::AppState;

/// Build the application router over the shared state.
pub fn router<C: Connection>(state: AppState<C>) -> Router {
    Router::new()
        .route(
            "/resources",
            get(resources::list::<C>).post(resources::create::<C>),
        )
        .route(
            "/resources/{id}",
            get(resources::get_by_id::<C>)
                .put(resources::update::<C>)
                .delete(resources::remove::<C>),
        )
        .route(
            "/categories/{category_id}/resources",
            get(resources::list_by_category::<C>),
        )
        .route(
            "/categories/{category_id}/resources/count",
            get(resources::count_by_category::<C>),
        )
        .with_state(state)
}
