//! Catalog/Persistence collaborator
//!
//! The cart and finalizer treat the catalog as an external service: every
//! read may be stale, every write reports errors instead of panicking. The
//! production implementation wraps the embedded database repositories; tests
//! substitute an in-memory implementation.

mod service;

pub use service::CatalogService;

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::models::{Addon, Category, Product, Sale, SaleInput};
use thiserror::Error;

use crate::db::repository::RepoError;

/// Errors surfaced by the catalog collaborator
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(String),

    /// Record rejected at the persistence boundary
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<RepoError> for CatalogError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(resource) => Self::NotFound(resource),
            RepoError::Validation(message) => Self::InvalidRecord(message),
            RepoError::Duplicate(resource) => Self::Storage(format!("duplicate {}", resource)),
            RepoError::Database(message) => Self::Storage(message),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(resource) => AppError::not_found(resource),
            CatalogError::InvalidRecord(message) => {
                AppError::with_message(ErrorCode::PersistenceFailed, message)
            }
            CatalogError::Storage(message) => AppError::database(message),
        }
    }
}

/// The external catalog/persistence interface consumed by the core
///
/// Injected into the [`crate::checkout::SaleFinalizer`] and the cart API so
/// both can be exercised without a real backend.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Current product snapshot
    async fn products(&self) -> Result<Vec<Product>, CatalogError>;

    async fn product(&self, id: &str) -> Result<Option<Product>, CatalogError>;

    /// Current category snapshot
    async fn categories(&self) -> Result<Vec<Category>, CatalogError>;

    /// Current add-on snapshot
    async fn addons(&self) -> Result<Vec<Addon>, CatalogError>;

    async fn addon(&self, id: &str) -> Result<Option<Addon>, CatalogError>;

    /// Durably store a sale; returns the stored record with its assigned id
    async fn create_sale(&self, input: SaleInput) -> Result<Sale, CatalogError>;

    /// Atomically decrement a product's stock by `sold`, floored at zero
    async fn decrement_stock(&self, product_id: &str, sold: i64)
    -> Result<Product, CatalogError>;

    /// Fetch a stored sale (receipt view)
    async fn sale(&self, id: &str) -> Result<Option<Sale>, CatalogError>;
}
