pub mod init;
pub mod storage;
pub mod web;

use anyhow::Error as AnyhowError;
use config::ConfigError;
use init::InitError;
use sea_orm::DbErr;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use storage::StorageError;
use thiserror::Error;
use web::WebError;

pub type ECResult<T, E = ECError> = anyhow::Result<T, E>;
pub type WebResult<T, E = WebError> = anyhow::Result<T, E>;
pub type StorageResult<T, E = StorageError> = Result<T, E>;

#[derive(Error, Debug, Default)]
pub enum ECError {
    #[error("service unavailable")]
    #[default]
    ServiceUnavailable,
    #[error("{0}")]
    Msg(String),
    #[error("{0}")]
    IoError(#[from] IoError),
    #[error("{0}")]
    Anyhow(#[from] AnyhowError),
    #[error("{0}")]
    Json(#[from] SerdeJsonError),
    #[error("{0}")]
    ConfigError(#[from] ConfigError),
    #[error("{0}")]
    StorageError(#[from] StorageError),
    #[error("{0}")]
    InitError(#[from] InitError),
    #[error("{0}")]
    WebError(#[from] WebError),
    #[error("invalid attribute value: {0}")]
    InvalidValue(String),
}

impl From<String> for ECError {
    #[inline]
    fn from(e: String) -> Self {
        ECError::Msg(e)
    }
}

impl From<&str> for ECError {
    #[inline]
    fn from(e: &str) -> Self {
        ECError::Msg(e.to_string())
    }
}

impl From<DbErr> for ECError {
    #[inline]
    fn from(e: DbErr) -> Self {
        ECError::StorageError(StorageError::DBError(e))
    }
}
