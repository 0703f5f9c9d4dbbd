use actix_web::{HttpResponse, ResponseError};
use actix_web::http::StatusCode;
use serde::Serialize;
use std::fmt;
use log::error;

use crate::db::StoreError;
use crate::utils::validation::FieldErrors;

#[derive(Debug)]
pub enum AppError {
    Validation(FieldErrors),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Store(String),
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                let fields = errors.keys().map(String::as_str).collect::<Vec<_>>().join(", ");
                write!(f, "Validation failed: {}", fields)
            }
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Store(msg) => write!(f, "Store Error: {}", msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(_) => {
                AppError::Conflict("Employee with this email or name already exists".to_string())
            }
            StoreError::NotFound(_) => AppError::NotFound("Employee not found".to_string()),
            StoreError::Database(msg) => AppError::Store(msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Validation(errors) => ErrorResponse {
                message: "Invalid request",
                errors: Some(errors),
                error: None,
            },
            AppError::BadRequest(msg) => ErrorResponse {
                message: "Invalid request body",
                errors: None,
                error: Some(msg.as_str()),
            },
            AppError::NotFound(msg) | AppError::Conflict(msg) => ErrorResponse {
                message: msg,
                errors: None,
                error: None,
            },
            AppError::Store(msg) => {
                error!("Store failure: {}", msg);
                ErrorResponse {
                    message: "Internal Server Error",
                    errors: None,
                    error: Some(msg.as_str()),
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
