use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::cart::CartManager;
use crate::catalog::{CatalogService, CatalogStore};
use crate::checkout::SaleFinalizer;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// Server state - shared references to all services
///
/// Cloning is shallow (`Arc` internally); handlers receive a clone per
/// request via axum's `State` extractor.
///
/// | Field | Description |
/// |-------|-------------|
/// | config | Immutable configuration |
/// | db | Embedded SurrealDB handle |
/// | catalog | Catalog/persistence collaborator |
/// | carts | Per-terminal cart registry |
/// | finalizer | Sale finalizer (checkout) |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// Catalog/persistence collaborator
    pub catalog: Arc<dyn CatalogStore>,
    /// Per-terminal cart registry
    pub carts: Arc<CartManager>,
    /// Sale finalizer
    pub finalizer: Arc<SaleFinalizer>,
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("config", &self.config)
            .field("db", &"<Surreal<Db>>")
            .finish()
    }
}

impl ServerState {
    /// Build state around an already-open database handle
    ///
    /// Used directly by tests with an in-memory database.
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let catalog: Arc<dyn CatalogStore> = Arc::new(CatalogService::new(db.clone()));
        let carts = Arc::new(CartManager::new());
        let finalizer = Arc::new(SaleFinalizer::new(catalog.clone()));
        Self {
            config,
            db,
            catalog,
            carts,
            finalizer,
        }
    }

    /// Initialize server state
    ///
    /// 1. Ensure the work directory structure exists
    /// 2. Open the embedded database (work_dir/database/acaizen.db)
    /// 3. Wire the catalog, cart registry, and finalizer
    pub async fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("acaizen.db");
        let db_service = DbService::open(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self::with_db(config.clone(), db_service.db))
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
