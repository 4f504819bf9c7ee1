use thiserror::Error;

/// Errors raised while bootstrapping a component (database, web server).
#[derive(Error, Debug)]
pub enum InitError {
    #[error("initialization failed: {0}")]
    Failed(String),
}
