//! SurrealDB repository implementations.

mod resource;

pub use resource::SurrealResourcesRepository;
