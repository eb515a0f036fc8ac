//! Employee Repository

use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use super::{BaseRepository, RepoError, RepoResult, new_record_key, strip_table_prefix};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

const EMPLOYEE_TABLE: &str = "employee";

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM employee ORDER BY name")
            .await?
            .take(0)?;
        Ok(employees)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        let key = strip_table_prefix(EMPLOYEE_TABLE, id).to_string();
        let employees: Vec<Employee> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", EMPLOYEE_TABLE))
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(employees.into_iter().next())
    }

    async fn name_exists(&self, name: &str, exclude_key: Option<&str>) -> RepoResult<bool> {
        #[derive(serde::Deserialize)]
        struct Row {
            id: String,
        }
        let rows: Vec<Row> = self
            .base
            .db()
            .query("SELECT type::string(id) AS id FROM employee WHERE name = $name")
            .bind(("name", name.to_string()))
            .await?
            .take(0)?;
        Ok(rows.iter().any(|row| {
            exclude_key.is_none_or(|key| strip_table_prefix(EMPLOYEE_TABLE, &row.id) != key)
        }))
    }

    pub async fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        if data.name.trim().is_empty() {
            return Err(RepoError::Validation("name cannot be empty".into()));
        }
        if data.role.trim().is_empty() {
            return Err(RepoError::Validation("role cannot be empty".into()));
        }
        if self.name_exists(&data.name, None).await? {
            return Err(RepoError::Duplicate(format!("Employee '{}'", data.name)));
        }

        #[derive(Serialize)]
        struct Row {
            name: String,
            role: String,
            is_active: bool,
        }
        let row = Row {
            name: data.name,
            role: data.role,
            is_active: true,
        };

        let key = new_record_key();
        self.base
            .db()
            .query("CREATE type::thing($tb, $key) CONTENT $data RETURN NONE")
            .bind(("tb", EMPLOYEE_TABLE))
            .bind(("key", key.clone()))
            .bind(("data", row))
            .await?
            .check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    pub async fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let key = strip_table_prefix(EMPLOYEE_TABLE, id).to_string();

        if let Some(name) = &data.name {
            if name.trim().is_empty() {
                return Err(RepoError::Validation("name cannot be empty".into()));
            }
            if self.name_exists(name, Some(&key)).await? {
                return Err(RepoError::Duplicate(format!("Employee '{}'", name)));
            }
        }

        let mut set_parts: Vec<&str> = Vec::new();
        if data.name.is_some() {
            set_parts.push("name = $name");
        }
        if data.role.is_some() {
            set_parts.push("role = $role");
        }
        if data.is_active.is_some() {
            set_parts.push("is_active = $is_active");
        }

        if set_parts.is_empty() {
            return self
                .find_by_id(&key)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)));
        }

        let query_str = format!(
            "UPDATE type::thing($tb, $key) SET {} RETURN NONE",
            set_parts.join(", ")
        );

        let mut query = self
            .base
            .db()
            .query(query_str)
            .bind(("tb", EMPLOYEE_TABLE))
            .bind(("key", key.clone()));
        if let Some(v) = data.name {
            query = query.bind(("name", v));
        }
        if let Some(v) = data.role {
            query = query.bind(("role", v));
        }
        if let Some(v) = data.is_active {
            query = query.bind(("is_active", v));
        }

        query.await?.check()?;

        self.find_by_id(&key)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let key = strip_table_prefix(EMPLOYEE_TABLE, id).to_string();
        if self.find_by_id(&key).await?.is_none() {
            return Err(RepoError::NotFound(format!("Employee {} not found", id)));
        }
        self.base
            .db()
            .query("DELETE type::thing($tb, $key)")
            .bind(("tb", EMPLOYEE_TABLE))
            .bind(("key", key))
            .await?
            .check()?;
        Ok(())
    }
}
