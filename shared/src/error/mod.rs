//! Unified error system for the Acaizen POS backend
//!
//! - [`ErrorCode`]: standardized error codes for all error types
//! - [`AppError`]: rich error type with codes, messages, and details
//! - [`ApiResponse`]: unified API response format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Cart/sale errors
//! - 5xxx: Payment errors
//! - 6xxx: Catalog errors
//! - 8xxx: Employee errors
//! - 9xxx: System errors

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
