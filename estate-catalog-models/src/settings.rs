use config::{Config, File};
use estate_catalog_error::ECResult;
use serde::{self, Deserialize};
use std::{ops::Deref, sync::Arc, thread};

#[derive(Debug, Clone)]
pub struct Settings(Arc<Inner>);

impl Deref for Settings {
    type Target = Inner;
    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl Settings {
    pub fn new(config_path: String) -> ECResult<Self> {
        let builder = Config::builder()
            .add_source(File::with_name(config_path.as_str()).required(false))
            .add_source(
                config::Environment::with_prefix("EC")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("web.cors.whitelist.origins")
                    .with_list_parse_key("web.cors.whitelist.methods")
                    .with_list_parse_key("web.cors.whitelist.headers")
                    .with_list_parse_key("web.cors.whitelist.expose_headers"),
            );
        let inner: Inner = builder.build()?.try_deserialize()?;
        Ok(Self(Arc::new(inner)))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Inner {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub web: Web,
    #[serde(default)]
    pub db: Db,
}

#[derive(Debug, Clone, Deserialize)]
pub struct General {
    /// Directory for rolling log files.
    #[serde(default = "General::log_dir_default")]
    pub log_dir: String,
}

impl Default for General {
    fn default() -> Self {
        General {
            log_dir: General::log_dir_default(),
        }
    }
}

impl General {
    fn log_dir_default() -> String {
        "logs".into()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Web {
    #[serde(default = "Web::host_default")]
    pub host: String,
    #[serde(default = "Web::port_default")]
    pub port: u16,
    #[serde(default = "Web::router_prefix_default")]
    pub router_prefix: String,
    /// Worker thread count; defaults to available parallelism.
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub cors: Cors,
}

impl Default for Web {
    fn default() -> Self {
        Web {
            host: Web::host_default(),
            port: Web::port_default(),
            router_prefix: Web::router_prefix_default(),
            workers: None,
            cors: Cors::default(),
        }
    }
}

impl Web {
    fn host_default() -> String {
        "0.0.0.0".into()
    }

    fn port_default() -> u16 {
        8080
    }

    fn router_prefix_default() -> String {
        "/api".into()
    }

    pub fn get_worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorsMode {
    #[default]
    AllowAll,
    Whitelist,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Cors {
    #[serde(default)]
    pub mode: CorsMode,
    #[serde(default)]
    pub whitelist: CorsWhitelist,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CorsWhitelist {
    #[serde(default)]
    pub origins: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub expose_headers: Vec<String>,
    #[serde(default)]
    pub credentials: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Db {
    #[serde(default)]
    pub sqlite: Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sqlite {
    #[serde(default = "Sqlite::path_default")]
    pub path: String,
    /// Create the database file on first connect (`mode=rwc`).
    #[serde(default = "Sqlite::auto_create_default")]
    pub auto_create: bool,
    #[serde(default = "Sqlite::max_connections_default")]
    pub max_connections: u32,
    /// Connect timeout in milliseconds.
    #[serde(default = "Sqlite::timeout_default")]
    pub timeout: u64,
    /// Idle timeout in milliseconds.
    #[serde(default = "Sqlite::idle_timeout_default")]
    pub idle_timeout: u64,
    /// Max connection lifetime in milliseconds.
    #[serde(default = "Sqlite::max_lifetime_default")]
    pub max_lifetime: u64,
}

impl Default for Sqlite {
    fn default() -> Self {
        Sqlite {
            path: Sqlite::path_default(),
            auto_create: Sqlite::auto_create_default(),
            max_connections: Sqlite::max_connections_default(),
            timeout: Sqlite::timeout_default(),
            idle_timeout: Sqlite::idle_timeout_default(),
            max_lifetime: Sqlite::max_lifetime_default(),
        }
    }
}

impl Sqlite {
    fn path_default() -> String {
        "./data/catalog.db".into()
    }

    fn auto_create_default() -> bool {
        true
    }

    fn max_connections_default() -> u32 {
        10
    }

    fn timeout_default() -> u64 {
        5_000
    }

    fn idle_timeout_default() -> u64 {
        60_000
    }

    fn max_lifetime_default() -> u64 {
        600_000
    }

    /// Hermetic in-memory database, used by the test suites.
    pub fn in_memory() -> Self {
        Sqlite {
            path: ":memory:".into(),
            ..Default::default()
        }
    }

    pub fn is_memory(&self) -> bool {
        self.path == ":memory:"
    }

    pub fn db_path(&self) -> &str {
        &self.path
    }

    pub fn to_url(&self) -> String {
        if self.is_memory() {
            "sqlite::memory:".to_string()
        } else if self.auto_create {
            format!("sqlite://{}?mode=rwc", self.path)
        } else {
            format!("sqlite://{}", self.path)
        }
    }
}
