//! Database-backed catalog service

use async_trait::async_trait;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{Addon, Category, Product, Sale, SaleInput};

use super::{CatalogError, CatalogStore};
use crate::db::repository::{
    AddonRepository, CategoryRepository, ProductRepository, SaleRepository,
};

/// [`CatalogStore`] implementation over the embedded database repositories
#[derive(Clone)]
pub struct CatalogService {
    products: ProductRepository,
    categories: CategoryRepository,
    addons: AddonRepository,
    sales: SaleRepository,
}

impl CatalogService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            products: ProductRepository::new(db.clone()),
            categories: CategoryRepository::new(db.clone()),
            addons: AddonRepository::new(db.clone()),
            sales: SaleRepository::new(db),
        }
    }
}

#[async_trait]
impl CatalogStore for CatalogService {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.find_all().await?)
    }

    async fn product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.find_by_id(id).await?)
    }

    async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.find_all().await?)
    }

    async fn addons(&self) -> Result<Vec<Addon>, CatalogError> {
        Ok(self.addons.find_all().await?)
    }

    async fn addon(&self, id: &str) -> Result<Option<Addon>, CatalogError> {
        Ok(self.addons.find_by_id(id).await?)
    }

    async fn create_sale(&self, input: SaleInput) -> Result<Sale, CatalogError> {
        Ok(self.sales.create(input).await?)
    }

    async fn decrement_stock(
        &self,
        product_id: &str,
        sold: i64,
    ) -> Result<Product, CatalogError> {
        Ok(self.products.decrement_stock(product_id, sold).await?)
    }

    async fn sale(&self, id: &str) -> Result<Option<Sale>, CatalogError> {
        Ok(self.sales.find_by_id(id).await?)
    }
}
