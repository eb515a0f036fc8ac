//! Acaizen POS Server
//!
//! Backend for a small food-service point of sale: catalog management,
//! per-terminal carts, checkout, sales records, and basic reporting.
//!
//! # Module structure
//!
//! ```text
//! acaizen-server/src/
//! ├── core/          # Configuration, state, server bootstrap
//! ├── api/           # HTTP routes and handlers
//! ├── cart/          # Cart aggregator and per-terminal registry
//! ├── checkout/      # Sale finalizer
//! ├── catalog/       # Catalog/persistence abstraction
//! ├── money.rs       # Decimal money arithmetic and validation
//! ├── db/            # Embedded SurrealDB and repositories
//! └── utils/         # Logging and error re-exports
//! ```

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod core;
pub mod db;
pub mod money;
pub mod utils;

// Re-export public types
pub use cart::{Cart, CartError, CartManager};
pub use catalog::{CatalogService, CatalogStore};
pub use checkout::SaleFinalizer;
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env` and initialize logging; call once at startup
pub fn setup_environment() {
    dotenv::dotenv().ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
   ___   _________   ____ _____  ___
  / _ | / ___/ _ | /  _//__  / / _ \___  ___
 / __ |/ /__/ __ |_/ /   / /_ /  __/ _ \(_-<
/_/ |_|\___/_/ |_/___/  /___/ \___/_//_/___/
    "#
    );
}
