//! Product Repository

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_record_key, qualify_id, strip_table_prefix};
use shared::models::{Product, ProductCreate, ProductUpdate};

const PRODUCT_TABLE: &str = "product";
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

fn validate_stock(stock: i64) -> RepoResult<()> {
    if stock < 0 {
        return Err(RepoError::Validation(format!(
            "stock must be non-negative, got {}",
            stock
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM product ORDER BY name")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find products by category
    pub async fn find_by_category(&self, category_id: &str) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query(
                "SELECT *, type::string(id) AS id FROM product \
                 WHERE category = $category ORDER BY name",
            )
            .bind(("category", qualify_id(CATEGORY_TABLE, category_id)))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Count products assigned to a category
    pub async fn count_by_category(&self, category_id: &str) -> RepoResult<usize> {
        #[derive(serde::Deserialize)]
        struct CountRow {
            count: i64,
        }
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() AS count FROM product WHERE category = $category GROUP ALL")
            .bind(("category", qualify_id(CATEGORY_TABLE, category_id)))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count.max(0) as usize).unwrap_or(0))
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", PRODUCT_TABLE))
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(products.into_iter().next())
    }

    /// Create a new product
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("name cannot be empty".into()));
        }
        validate_price(data.price)?;
        if let Some(stock) = data.stock {
            validate_stock(stock)?;
        }

        #[derive(Serialize)]
        struct Row {
            name: String,
            price: f64,
            category: String,
            description: String,
            image: Option<String>,
            stock: i64,
        }
        let row = Row {
            name: data.name,
            price: data.price,
            category: qualify_id(CATEGORY_TABLE, &data.category),
            description: data.description.unwrap_or_default(),
            image: data.image,
            stock: data.stock.unwrap_or(0),
        };

        let key = new_record_key();
        self.base
            .db()
            .query("CREATE type::thing($tb, $key) CONTENT $data RETURN NONE")
            .bind(("tb", PRODUCT_TABLE))
            .bind(("key", key.clone()))
            .bind(("data", row))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product
    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();

        if let Some(price) = data.price {
            validate_price(price)?;
        }
        if let Some(stock) = data.stock {
            validate_stock(stock)?;
        }
        if let Some(name) = &data.name
            && name.trim().is_empty()
        {
            return Err(RepoError::Validation("name cannot be empty".into()));
        }

        // Build dynamic SET clauses with typed bindings
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
        if data.description.is_some() {
            set_parts.push("description = $description");
        }
        if data.image.is_some() {
            set_parts.push("image = $image");
        }
        if data.stock.is_some() {
            set_parts.push("stock = $stock");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(&key)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)));
        }

        let query_str = format!(
            "UPDATE type::thing($tb, $key) SET {} RETURN NONE",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("tb", PRODUCT_TABLE))
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
        if let Some(v) = data.description {
            query = query.bind(("description", v));
        }
        if let Some(v) = data.image {
            query = query.bind(("image", v));
        }
        if let Some(v) = data.stock {
            query = query.bind(("stock", v));
        }

        query.await?.check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Atomically decrement stock by the quantity sold, floored at zero
    ///
    /// Runs as a single server-side statement so concurrent checkouts cannot
    /// lose updates.
    pub async fn decrement_stock(&self, id: &str, sold: i64) -> RepoResult<Product> {
        if sold < 0 {
            return Err(RepoError::Validation(format!(
                "sold quantity must be non-negative, got {}",
                sold
            )));
        }
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();

        self.base
            .db()
            .query(
                "UPDATE type::thing($tb, $key) \
                 SET stock = math::max([0, stock - $sold]) RETURN NONE",
            )
            .bind(("tb", PRODUCT_TABLE))
            .bind(("key", key.clone()))
            .bind(("sold", sold))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Delete a product
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(PRODUCT_TABLE, id).to_string();
        if self.find_by_id(&key).await?.is_none() {
            return Err(RepoError::NotFound(format!("Product {} not found", id)));
        }
        self.base
            .db()
            .query("DELETE type::thing($tb, $key)")
            .bind(("tb", PRODUCT_TABLE))
            .bind(("key", key))
            .await?
            .check()?;
        Ok(())
    }
}
