/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "catalog.toml";
