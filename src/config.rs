//! Runtime configuration shared by the binary and the state constructor

use std::path::PathBuf;

/// Total number of addressable entries in the reference deployment.
pub const DEFAULT_CATALOG_SIZE: u32 = 1010;
/// Pikachu.
pub const DEFAULT_START_ID: u32 = 25;
pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub catalog_size: u32,
    pub start_id: u32,
    pub api_base: String,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Build a config, keeping the start id inside the catalog.
    pub fn new(catalog_size: u32, start_id: u32, api_base: impl Into<String>) -> Self {
        let catalog_size = catalog_size.max(1);
        Self {
            catalog_size,
            start_id: start_id.clamp(1, catalog_size),
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    pub fn with_log_dir(mut self, dir: PathBuf) -> Self {
        self.log_dir = dir;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_size: DEFAULT_CATALOG_SIZE,
            start_id: DEFAULT_START_ID,
            api_base: DEFAULT_API_BASE.to_string(),
            log_dir: default_log_dir(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

pub fn default_log_dir() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("pokedex").join("logs")
}
