use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub error: ApiErrorInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorInfo {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    BadRequest {
        code: String,
        message: String,
        details: Option<String>,
    },
    NotFound {
        code: String,
        message: String,
        details: Option<String>,
    },
    Conflict {
        code: String,
        message: String,
        details: Option<String>,
    },
    InternalServerError {
        code: String,
        message: String,
        details: Option<String>,
    },
}

impl AppError {
    pub fn bad_request(code: &str, message: &str) -> Self {
        Self::BadRequest {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn bad_request_with_details(
        code: &str, message: &str, details: &str,
    ) -> Self {
        Self::BadRequest {
            code: code.to_string(),
            message: message.to_string(),
            details: Some(details.to_string()),
        }
    }

    pub fn not_found(code: &str, message: &str) -> Self {
        Self::NotFound {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn conflict(code: &str, message: &str) -> Self {
        Self::Conflict {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn internal_server_error(message: &str) -> Self {
        Self::InternalServerError {
            code: "INTERNAL_ERROR".to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::InternalServerError { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn parts(&self) -> (&String, &String, &Option<String>) {
        match self {
            Self::BadRequest {
                code,
                message,
                details,
            }
            | Self::NotFound {
                code,
                message,
                details,
            }
            | Self::Conflict {
                code,
                message,
                details,
            }
            | Self::InternalServerError {
                code,
                message,
                details,
            } => (code, message, details),
        }
    }

    pub fn code(&self) -> &str { self.parts().0 }

    pub fn message(&self) -> &str { self.parts().1 }

    pub fn details(&self) -> Option<&str> { self.parts().2.as_deref() }

    pub fn to_response_data(&self) -> ApiErrorResponse {
        let (code, message, details) = self.parts();

        ApiErrorResponse {
            error: ApiErrorInfo {
                code: code.clone(),
                message: message.clone(),
                details: details.clone(),
            },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let response_data = self.to_response_data();
        (status, Json(response_data)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal_server_error(&format!(
            "An unexpected error occurred: {}",
            err
        ))
    }
}
