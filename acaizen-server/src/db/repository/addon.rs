//! Add-on Repository

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_record_key, qualify_id, strip_table_prefix};
use shared::models::{Addon, AddonCreate, AddonUpdate};

const ADDON_TABLE: &str = "addon";
const CATEGORY_TABLE: &str = "category";

fn validate_price(price: f64) -> RepoResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(RepoError::Validation(format!(
            "price must be non-negative, got {}",
            price
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct AddonRepository {
    base: BaseRepository,
}

impl AddonRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Addon>> {
        let addons: Vec<Addon> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM addon ORDER BY name")
            .await?
            .take(0)?;
        Ok(addons)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Addon>> {
        let key = strip_table_prefix(ADDON_TABLE, id).to_string();
        let addons: Vec<Addon> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", ADDON_TABLE))
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(addons.into_iter().next())
    }

    pub async fn create(&self, data: AddonCreate) -> RepoResult<Addon> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("name cannot be empty".into()));
        }
        validate_price(data.price)?;

        #[derive(Serialize)]
        struct Row {
            name: String,
            price: f64,
            category: Option<String>,
        }
        let row = Row {
            name: data.name,
            price: data.price,
            category: data
                .category
                .map(|category| qualify_id(CATEGORY_TABLE, &category)),
        };

        let key = new_record_key();
        self.base
            .db()
            .query("CREATE type::thing($tb, $key) CONTENT $data RETURN NONE")
            .bind(("tb", ADDON_TABLE))
            .bind(("key", key.clone()))
            .bind(("data", row))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create add-on".to_string()))
    }

    pub async fn update(&self, id: &str, data: AddonUpdate) -> RepoResult<Addon> {
        let key = strip_table_prefix(ADDON_TABLE, id).to_string();

        if let Some(price) = data.price {
            validate_price(price)?;
        }
        if let Some(name) = &data.name
            && name.trim().is_empty()
        {
            return Err(RepoError::Validation("name cannot be empty".into()));
        }

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.price.is_some() {
            set_parts.push("price = $price");
        }
        if data.category.is_some() {
            set_parts.push("category = $category");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(&key)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Add-on {} not found", id)));
        }

        let query_str = format!(
            "UPDATE type::thing($tb, $key) SET {} RETURN NONE",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("tb", ADDON_TABLE))
            .bind(("key", key.clone()));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.price {
            query = query.bind(("price", v));
        }
        if let Some(v) = data.category {
            query = query.bind(("category", qualify_id(CATEGORY_TABLE, &v)));
        }

        query.await?.check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Add-on {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(ADDON_TABLE, id).to_string();
        if self.find_by_id(&key).await?.is_none() {
            return Err(RepoError::NotFound(format!("Add-on {} not found", id)));
        }
        self.base
            .db()
            .query("DELETE type::thing($tb, $key)")
            .bind(("tb", ADDON_TABLE))
            .bind(("key", key))
            .await?
            .check()?;
        Ok(())
    }
}
