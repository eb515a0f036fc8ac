//! Sale Repository
//!
//! Sales are append-only: created once at checkout, never updated or
//! deleted. Inputs are validated before they cross into storage so a
//! malformed record can never be persisted.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_record_key, strip_table_prefix};
use shared::cart::PaymentMethod;
use shared::models::{Sale, SaleInput};

const SALE_TABLE: &str = "sale";

#[derive(Clone)]
pub struct SaleRepository {
    base: BaseRepository,
}

impl SaleRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Durably store a sale, returning the stored record with its assigned id
    pub async fn create(&self, input: SaleInput) -> RepoResult<Sale> {
        input.validate().map_err(RepoError::Validation)?;

        let key = new_record_key();
        self.base
            .db()
            .query("CREATE type::thing($tb, $key) CONTENT $data RETURN NONE")
            .bind(("tb", SALE_TABLE))
            .bind(("key", key.clone()))
            .bind(("data", input))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to store sale".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Sale>> {
        let key = strip_table_prefix(SALE_TABLE, id).to_string();
        let sales: Vec<Sale> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", SALE_TABLE))
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(sales.into_iter().next())
    }

    /// All sales, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Sale>> {
        let sales: Vec<Sale> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM sale ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(sales)
    }

    /// Sales filtered by creation time range and/or payment method
    ///
    /// Timestamps are RFC 3339 UTC strings, so range filters are plain
    /// string comparisons.
    pub async fn find_filtered(
        &self,
        start: Option<String>,
        end: Option<String>,
        method: Option<PaymentMethod>,
    ) -> RepoResult<Vec<Sale>> {
        let mut where_parts: Vec<&str> = Vec::new();
        if start.is_some() {
            where_parts.push("created_at >= $start");
        }
        if end.is_some() {
            where_parts.push("created_at <= $end");
        }
        if method.is_some() {
            where_parts.push("payment.method = $method");
        }

        let query_str = if where_parts.is_empty() {
            "SELECT *, type::string(id) AS id FROM sale ORDER BY created_at DESC".to_string()
        } else {
            format!(
                "SELECT *, type::string(id) AS id FROM sale WHERE {} ORDER BY created_at DESC",
                where_parts.join(" AND ")
            )
        };

        let mut query = self.base.db().query(query_str);
        if let Some(start) = start {
            query = query.bind(("start", start));
        }
        if let Some(end) = end {
            query = query.bind(("end", end));
        }
        if let Some(method) = method {
            query = query.bind(("method", method.as_str()));
        }

        let sales: Vec<Sale> = query.await?.take(0)?;
        Ok(sales)
    }
}
