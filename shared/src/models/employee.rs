//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Role label, e.g. "admin" or "cashier"
    pub role: String,
    pub is_active: bool,
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreate {
    pub name: String,
    pub role: String,
}

/// Update employee payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}
