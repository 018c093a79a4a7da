//! Database-specific error types and conversions.

use curio_core::error::CurioError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },
}

impl From<DbError> for CurioError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CurioError::NotFound { entity, id },
            other => CurioError::Database(other.to_string()),
        }
    }
}

/// Whether a statement failed because the target record id is taken.
///
/// SurrealDB reports this as a statement error on `CREATE`, so the check
/// is on the message text rather than an error variant.
pub(crate) fn is_duplicate_record(err: &surrealdb::Error) -> bool {
    err.to_string().contains("already exists")
}
