use common_errors::AppError;
use database_traits::StoreError;
use redis_connection::CacheError;
use thiserror::Error;

/// Failures of an entity service operation.
///
/// The `Display` text of the first three variants is the user-facing
/// message.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

impl ServiceError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Conflict(_) => 409,
            ServiceError::Store(_) | ServiceError::Cache(_) => 500,
        }
    }

    /// Store and cache failures are infrastructure faults rather than
    /// caller mistakes.
    pub fn is_internal(&self) -> bool { self.status_code() == 500 }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => {
                AppError::bad_request("VALIDATION_FAILED", &msg)
            }
            ServiceError::NotFound(msg) => {
                AppError::not_found("NOT_FOUND", &msg)
            }
            ServiceError::Conflict(msg) => {
                AppError::conflict("DUPLICATE_ENTITY", &msg)
            }
            ServiceError::Store(store_err) => {
                AppError::internal_server_error(&format!(
                    "Database error: {store_err}"
                ))
            }
            ServiceError::Cache(cache_err) => {
                AppError::internal_server_error(&format!(
                    "Cache error: {cache_err}"
                ))
            }
        }
    }
}
