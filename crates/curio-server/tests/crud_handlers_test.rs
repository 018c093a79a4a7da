//! Tests for the generic CRUD handlers against an in-memory store.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::http::{HeaderMap, StatusCode, header};
use curio_core::models::resource::Resource;
use curio_core::repository::Repository;
use curio_db::repository::SurrealResourcesRepository;
use curio_server::auth::AuthContext;
use curio_server::error::ApiError;
use curio_server::handlers::crud::{self, InsertHooks};
use http_body_util::BodyExt;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

const CLIENT_DOMAIN: &str = "http://localhost:4200";

/// Helper: spin up in-memory DB, run migrations, wrap in a repository.
async fn setup() -> SurrealResourcesRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    curio_db::run_migrations(&db).await.unwrap();
    SurrealResourcesRepository::new(db)
}

fn alice() -> AuthContext {
    AuthContext {
        principal: Some("alice".into()),
    }
}

fn payload(name: &str) -> Resource {
    Resource {
        id: Uuid::nil(),
        name: name.into(),
        description: "x".into(),
        category_id: "c1".into(),
        owner_id: String::new(),
    }
}

async fn stored(repo: &SurrealResourcesRepository<Db>, owner: &str) -> Resource {
    let resource = Resource {
        id: Uuid::new_v4(),
        name: "Widget".into(),
        description: "x".into(),
        category_id: "c1".into(),
        owner_id: owner.into(),
    };
    repo.insert(resource).await.unwrap().unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn origin_headers(origin: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ORIGIN, origin.parse().unwrap());
    headers
}

// -----------------------------------------------------------------------
// post
// -----------------------------------------------------------------------

#[tokio::test]
async fn post_assigns_server_side_identity() {
    let repo = setup().await;

    let mut to_add = payload("Widget");
    let client_id = Uuid::new_v4();
    to_add.id = client_id;
    to_add.owner_id = "mallory".into();

    let response = crud::post(&repo, &alice(), to_add, InsertHooks::default())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let stored_id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
    assert_ne!(stored_id, client_id);
    assert_eq!(body["ownerId"], "alice");
}

#[tokio::test]
async fn post_rejects_payload_failing_validation() {
    let repo = setup().await;

    let result = crud::post(
        &repo,
        &alice(),
        payload(""),
        InsertHooks {
            validate: Some(&|r: &Resource| !r.name.is_empty()),
            ..InsertHooks::default()
        },
    )
    .await;

    assert!(matches!(result, Err(ApiError::Unprocessable)));
    assert!(repo.select().await.unwrap().is_empty());
}

#[tokio::test]
async fn post_runs_after_inserted_hook() {
    let repo = setup().await;
    let ran = AtomicBool::new(false);

    let response = crud::post(
        &repo,
        &alice(),
        payload("Widget"),
        InsertHooks {
            after_inserted: Some(&|_: &Resource| ran.store(true, Ordering::SeqCst)),
            ..InsertHooks::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(ran.load(Ordering::SeqCst));
}

// -----------------------------------------------------------------------
// get / get_by_id
// -----------------------------------------------------------------------

#[tokio::test]
async fn get_lists_everything() {
    let repo = setup().await;
    stored(&repo, "alice").await;
    stored(&repo, "bob").await;

    let response = crud::get(&repo).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_by_id_missing_is_not_found() {
    let repo = setup().await;

    let result = crud::get_by_id(&repo, Uuid::new_v4()).await;
    assert!(matches!(result, Err(ApiError::NotFound)));
}

// -----------------------------------------------------------------------
// put
// -----------------------------------------------------------------------

#[tokio::test]
async fn put_preserves_identity_fields() {
    let repo = setup().await;
    let existing = stored(&repo, "alice").await;

    let mut replacement = payload("Renamed");
    replacement.id = Uuid::new_v4();
    replacement.owner_id = "mallory".into();

    let response = crud::put(
        &repo,
        &alice(),
        &origin_headers(CLIENT_DOMAIN),
        CLIENT_DOMAIN,
        existing.id,
        replacement,
    )
    .await
    .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], existing.id.to_string());
    assert_eq!(body["ownerId"], "alice");
    assert_eq!(body["name"], "Renamed");

    let persisted = repo.select_by_id(existing.id).await.unwrap().unwrap();
    assert_eq!(persisted.owner_id, "alice");
    assert_eq!(persisted.name, "Renamed");
}

#[tokio::test]
async fn put_with_mismatched_origin_is_forbidden() {
    let repo = setup().await;
    let existing = stored(&repo, "alice").await;

    let result = crud::put(
        &repo,
        &alice(),
        &origin_headers("https://evil.example"),
        CLIENT_DOMAIN,
        existing.id,
        payload("Renamed"),
    )
    .await;

    assert!(matches!(result, Err(ApiError::Forbidden)));

    // Store untouched.
    let persisted = repo.select_by_id(existing.id).await.unwrap().unwrap();
    assert_eq!(persisted.name, "Widget");
}

#[tokio::test]
async fn put_without_origin_header_is_forbidden() {
    let repo = setup().await;
    let existing = stored(&repo, "alice").await;

    let result = crud::put(
        &repo,
        &alice(),
        &HeaderMap::new(),
        CLIENT_DOMAIN,
        existing.id,
        payload("Renamed"),
    )
    .await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
}

#[tokio::test]
async fn put_missing_is_not_found() {
    let repo = setup().await;

    let result = crud::put(
        &repo,
        &alice(),
        &origin_headers(CLIENT_DOMAIN),
        CLIENT_DOMAIN,
        Uuid::new_v4(),
        payload("Renamed"),
    )
    .await;

    assert!(matches!(result, Err(ApiError::NotFound)));
}

// -----------------------------------------------------------------------
// remove
// -----------------------------------------------------------------------

#[tokio::test]
async fn remove_missing_is_not_found() {
    let repo = setup().await;

    let result = crud::remove(&repo, &alice(), Uuid::new_v4()).await;
    assert!(matches!(result, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn remove_by_non_owner_is_forbidden() {
    let repo = setup().await;
    let existing = stored(&repo, "alice").await;

    let bob = AuthContext {
        principal: Some("bob".into()),
    };
    let result = crud::remove(&repo, &bob, existing.id).await;

    assert!(matches!(result, Err(ApiError::Forbidden)));
    assert!(repo.select_by_id(existing.id).await.unwrap().is_some());
}

#[tokio::test]
async fn remove_by_owner_answers_empty_success() {
    let repo = setup().await;
    let existing = stored(&repo, "alice").await;

    let response = crud::remove(&repo, &alice(), existing.id).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(repo.select_by_id(existing.id).await.unwrap().is_none());
}
