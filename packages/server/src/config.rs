use std::path::PathBuf;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CorsConfig {
    /// Origins allowed to call the API. Empty allows any origin.
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            max_age: 3600,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogueConfig {
    /// Seed the built-in cheeses at startup. Default: true.
    #[serde(default = "default_seed")]
    pub seed: bool,
    /// Directory holding `<name>.jpg` images. Seeded cheeses pick up their
    /// picture bytes from here and it is served under `/images`.
    #[serde(default)]
    pub images_dir: Option<PathBuf>,
    /// Directory holding the built frontend, served for unmatched paths.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_seed() -> bool {
    true
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            images_dir: None,
            static_dir: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub catalogue: CatalogueConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        defaults()?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 5000)
}

/// Environment overrides, e.g. `CHEESE__SERVER__PORT=8080` or
/// `CHEESE__SERVER__CORS__ALLOW_ORIGINS=http://a.example,http://b.example`.
fn environment() -> Environment {
    Environment::with_prefix("CHEESE")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("server.cors.allow_origins")
}
