//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use super::types::{ApiResponse, AppError};
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::SaleNotFound
            | Self::CartItemNotFound
            | Self::ProductNotFound
            | Self::CategoryNotFound
            | Self::AddonNotFound
            | Self::EmployeeNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists | Self::CategoryHasProducts | Self::EmployeeNameExists => {
                StatusCode::CONFLICT
            }

            // 422 Unprocessable Entity (business rule violations)
            Self::CartEmpty
            | Self::PaymentInsufficient
            | Self::AddonNotEligible => StatusCode::UNPROCESSABLE_ENTITY,

            // 400 Bad Request
            Self::ValidationFailed
            | Self::InvalidRequest
            | Self::ValueOutOfRange
            | Self::InvalidAmount => StatusCode::BAD_REQUEST,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::PersistenceFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "request failed");
        }
        (status, Json(ApiResponse::<()>::from_error(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ErrorCode::CartEmpty.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ErrorCode::SaleNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::PersistenceFailed.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::InvalidAmount.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
