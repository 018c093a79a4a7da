//! Curio core — domain models, repository contracts, and shared error types.
//!
//! These are the types shared across all crates. Nothing in here performs
//! I/O; the store-facing implementations live in `curio-db`.

pub mod error;
pub mod models;
pub mod repository;
