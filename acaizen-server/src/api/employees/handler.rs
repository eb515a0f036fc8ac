//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::{EmployeeRepository, RepoError};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

fn map_employee_error(err: RepoError) -> AppError {
    match err {
        RepoError::NotFound(resource) => {
            AppError::with_message(ErrorCode::EmployeeNotFound, format!("{} not found", resource))
        }
        RepoError::Duplicate(resource) => AppError::with_message(
            ErrorCode::EmployeeNameExists,
            format!("{} already exists", resource),
        ),
        other => other.into(),
    }
}

/// GET /api/employees - list all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Employee>>> {
    let repo = EmployeeRepository::new(state.db.clone());
    Ok(Json(repo.find_all().await?))
}

/// GET /api/employees/{id} - fetch one employee
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo.find_by_id(&id).await?.ok_or_else(|| {
        AppError::with_message(
            ErrorCode::EmployeeNotFound,
            format!("Employee {} not found", id),
        )
    })?;
    Ok(Json(employee))
}

/// POST /api/employees - create an employee
pub async fn create(
    State(state): State<ServerState>,
    Json(data): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.db.clone());
    Ok(Json(repo.create(data).await.map_err(map_employee_error)?))
}

/// PUT /api/employees/{id} - update an employee
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(data): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    let repo = EmployeeRepository::new(state.db.clone());
    Ok(Json(repo.update(&id, data).await.map_err(map_employee_error)?))
}

/// DELETE /api/employees/{id} - delete an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = EmployeeRepository::new(state.db.clone());
    repo.delete(&id).await.map_err(map_employee_error)?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}
