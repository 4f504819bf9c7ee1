use thiserror::Error;

#[derive(Error, Debug, Default)]
pub enum StorageError {
    #[error("database unavailable")]
    #[default]
    StorageUnavailable,

    #[error("database error: `{0}`")]
    DBError(#[from] sea_orm::DbErr),

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// Referential-integrity rule blocked the operation (e.g. deleting an
    /// attribute still referenced by links or stored property values).
    /// The message is shown to the admin as-is.
    #[error("{0}")]
    Conflict(String),

    /// Caller-supplied data failed a structural rule.
    #[error("{0}")]
    Validation(String),

    /// A multi-row mutation could not be committed; no partial effects remain.
    #[error("transaction failed: {0}")]
    Transaction(String),
}
