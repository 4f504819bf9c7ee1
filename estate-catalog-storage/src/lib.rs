mod migration;
mod sql;

use estate_catalog_error::{init::InitError, storage::StorageError, ECResult};
use estate_catalog_models::settings::{Settings, Sqlite};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{info, instrument};

/// Connects to SQLite and brings the schema up to date.
///
/// This is also the entry point for the integration test suites, which run
/// against `Sqlite::in_memory()`.
pub async fn connect_and_migrate(config: &Sqlite) -> ECResult<DatabaseConnection> {
    let db = sql::sqlite::init_db(config).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Global database manager struct
pub struct ECDbManager {
    db_conn: Option<DatabaseConnection>,
}

impl ECDbManager {
    #[instrument(name = "init-db-manager", skip_all)]
    pub async fn init(settings: &Settings) -> ECResult<Arc<Self>, InitError> {
        let db_conn = connect_and_migrate(&settings.db.sqlite)
            .await
            .map_err(|e| InitError::Failed(format!("Failed to init SQLite database: {e}")))?;

        info!("Database manager initialized successfully");
        Ok(Arc::new(ECDbManager {
            db_conn: Some(db_conn),
        }))
    }

    #[inline]
    pub fn get_connection(&self) -> ECResult<DatabaseConnection, StorageError> {
        self.db_conn
            .as_ref()
            .ok_or(StorageError::StorageUnavailable)
            .cloned()
    }

    #[instrument(name = "db_close", skip_all)]
    pub async fn close(&self) -> ECResult<()> {
        info!("Closing database connections...");
        if let Some(db) = &self.db_conn {
            db.clone().close().await?;
        }
        info!("Database connections closed successfully");
        Ok(())
    }
}
