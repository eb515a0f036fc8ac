//! Repository Module
//!
//! CRUD operations over the embedded database tables.
//!
//! # ID convention
//!
//! Record ids cross the API as `"table:key"` strings. Queries surface them
//! via `type::string(id)`; lookups accept either the full form or the bare
//! key.

pub mod addon;
pub mod category;
pub mod employee;
pub mod product;
pub mod sale;

// Re-exports
pub use addon::AddonRepository;
pub use category::CategoryRepository;
pub use employee::EmployeeRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;

use shared::error::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(resource) => AppError::not_found(resource),
            RepoError::Duplicate(resource) => AppError::already_exists(resource),
            RepoError::Validation(message) => AppError::validation(message),
            RepoError::Database(message) => AppError::database(message),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Strip a `"table:"` prefix so callers may pass either id form
pub(crate) fn strip_table_prefix<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Normalize an id to the `"table:key"` form stored in reference fields
pub(crate) fn qualify_id(table: &str, id: &str) -> String {
    format!("{}:{}", table, strip_table_prefix(table, id))
}

/// Generate a fresh record key
pub(crate) fn new_record_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Shared database handle for table repositories
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
