//! Category Repository

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_record_key, strip_table_prefix};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

const CATEGORY_TABLE: &str = "category";

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM category ORDER BY name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        let key = strip_table_prefix(CATEGORY_TABLE, id).to_string();
        let categories: Vec<Category> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", CATEGORY_TABLE))
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(categories.into_iter().next())
    }

    async fn name_exists(&self, name: &str, exclude_key: Option<&str>) -> RepoResult<bool> {
        #[derive(serde::Deserialize)]
        struct Row {
            id: String,
        }
        let rows: Vec<Row> = self
            .base
            .db()
            .query("SELECT type::string(id) AS id FROM category WHERE name = $name")
            .bind(("name", name.to_string()))
            .await?
            .take(0)?;
        Ok(rows.iter().any(|row| {
            exclude_key.is_none_or(|key| strip_table_prefix(CATEGORY_TABLE, &row.id) != key)
        }))
    }

    pub async fn create(&self, data: CategoryCreate) -> RepoResult<Category> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("name cannot be empty".into()));
        }
        if self.name_exists(&data.name, None).await? {
            return Err(RepoError::Duplicate(format!("Category '{}'", data.name)));
        }

        #[derive(Serialize)]
        struct Row {
            name: String,
        }

        let key = new_record_key();
        self.base
            .db()
            .query("CREATE type::thing($tb, $key) CONTENT $data RETURN NONE")
            .bind(("tb", CATEGORY_TABLE))
            .bind(("key", key.clone()))
            .bind(("data", Row { name: data.name }))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    pub async fn update(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        let key = strip_table_prefix(CATEGORY_TABLE, id).to_string();

        let Some(name) = data.name else {
            return self
                .find_by_id(&key)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)));
        };
        if name.trim().is_empty() {
            return Err(RepoError::Validation("name cannot be empty".into()));
        }
        if self.name_exists(&name, Some(&key)).await? {
            return Err(RepoError::Duplicate(format!("Category '{}'", name)));
        }

        self.base
            .db()
            .query("UPDATE type::thing($tb, $key) SET name = $name RETURN NONE")
            .bind(("tb", CATEGORY_TABLE))
            .bind(("key", key.clone()))
            .bind(("name", name))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(CATEGORY_TABLE, id).to_string();
        if self.find_by_id(&key).await?.is_none() {
            return Err(RepoError::NotFound(format!("Category {} not found", id)));
        }
        self.base
            .db()
            .query("DELETE type::thing($tb, $key)")
            .bind(("tb", CATEGORY_TABLE))
            .bind(("key", key))
            .await?
            .check()?;
        Ok(())
    }
}
