//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Cart/sale errors
//! - 5xxx: Payment errors
//! - 6xxx: Catalog errors (products, categories, add-ons)
//! - 8xxx: Employee errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Cart/Sale ====================
    /// Sale record not found
    SaleNotFound = 4001,
    /// Checkout attempted on an empty cart
    CartEmpty = 4002,
    /// Cart line item index does not exist
    CartItemNotFound = 4003,

    // ==================== 5xxx: Payment ====================
    /// Tendered amount below the cart total
    PaymentInsufficient = 5001,
    /// Payment amount is not a valid monetary value
    InvalidAmount = 5002,

    // ==================== 6xxx: Catalog ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Category not found
    CategoryNotFound = 6002,
    /// Add-on not found
    AddonNotFound = 6003,
    /// Add-on is restricted to a different category
    AddonNotEligible = 6004,
    /// Category still has products assigned
    CategoryHasProducts = 6005,

    // ==================== 8xxx: Employee ====================
    /// Employee not found
    EmployeeNotFound = 8001,
    /// Employee name already taken
    EmployeeNameExists = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Sale/stock persistence failed
    PersistenceFailed = 9003,
}

impl ErrorCode {
    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::ValueOutOfRange => "Value out of range",
            Self::SaleNotFound => "Sale not found",
            Self::CartEmpty => "Cart is empty",
            Self::CartItemNotFound => "Cart item not found",
            Self::PaymentInsufficient => "Payment insufficient",
            Self::InvalidAmount => "Invalid payment amount",
            Self::ProductNotFound => "Product not found",
            Self::CategoryNotFound => "Category not found",
            Self::AddonNotFound => "Add-on not found",
            Self::AddonNotEligible => "Add-on not eligible for this product",
            Self::CategoryHasProducts => "Category still has products",
            Self::EmployeeNotFound => "Employee not found",
            Self::EmployeeNameExists => "Employee name already exists",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::PersistenceFailed => "Persistence failed",
        }
    }

    /// Numeric code as a string, prefixed the way clients display it
    pub fn as_code_string(&self) -> String {
        format!("E{:04}", *self as u16)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code_string())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

/// Error returned when deserializing an unknown numeric error code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            8 => Self::ValueOutOfRange,
            4001 => Self::SaleNotFound,
            4002 => Self::CartEmpty,
            4003 => Self::CartItemNotFound,
            5001 => Self::PaymentInsufficient,
            5002 => Self::InvalidAmount,
            6001 => Self::ProductNotFound,
            6002 => Self::CategoryNotFound,
            6003 => Self::AddonNotFound,
            6004 => Self::AddonNotEligible,
            6005 => Self::CategoryHasProducts,
            8001 => Self::EmployeeNotFound,
            8002 => Self::EmployeeNameExists,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::PersistenceFailed,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
