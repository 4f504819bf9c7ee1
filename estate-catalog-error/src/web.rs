use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::{storage::StorageError, ECError};

#[derive(Error, Debug)]
pub enum WebError {
    #[error("{0}")]
    BadRequest(String),
    #[error("`{0}` not found")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("InternalError: `{0}`")]
    InternalError(String),
}

impl From<std::io::Error> for WebError {
    fn from(e: std::io::Error) -> Self {
        WebError::InternalError(e.to_string())
    }
}

impl From<StorageError> for WebError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::EntityNotFound(msg) => WebError::NotFound(msg),
            StorageError::Conflict(msg) => WebError::Conflict(msg),
            StorageError::Validation(msg) => WebError::BadRequest(msg),
            other => WebError::InternalError(other.to_string()),
        }
    }
}

impl From<ECError> for WebError {
    fn from(e: ECError) -> Self {
        match e {
            ECError::StorageError(storage) => WebError::from(storage),
            ECError::InvalidValue(msg) => WebError::BadRequest(msg),
            other => WebError::InternalError(other.to_string()),
        }
    }
}

impl ResponseError for WebError {
    fn error_response(&self) -> HttpResponse {
        // `message` is surfaced verbatim by the admin client; keep it first-class.
        let mut body = json!({
            "message": self.to_string()
        });
        match self {
            WebError::BadRequest(_) => {
                body["error"] = json!("Bad Request");
                HttpResponse::BadRequest().json(body)
            }
            WebError::NotFound(_) => {
                body["error"] = json!("Not Found");
                HttpResponse::NotFound().json(body)
            }
            WebError::Conflict(_) => {
                body["error"] = json!("Conflict");
                HttpResponse::Conflict().json(body)
            }
            WebError::InternalError(_) => {
                body["error"] = json!("Internal Server Error");
                HttpResponse::InternalServerError().json(body)
            }
        }
    }
}
