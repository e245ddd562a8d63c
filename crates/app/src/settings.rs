//! Settings for the `tally` binary.
//!
//! Read from an optional `settings.toml` in the working directory, then from
//! `TALLY_*` environment variables (`__` separates nested keys, e.g.
//! `TALLY_SERVER__PORT=8080`). Missing keys fall back to the defaults below.
use config::{Config, ConfigError, Environment, File};
use engine::Currency;
use serde::Deserialize;

const SETTINGS_FILE: &str = "settings";
const ENV_PREFIX: &str = "TALLY";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
    pub currency: Currency,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            currency: Currency::Eur,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub database: Database,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 3000,
            database: Database::Sqlite("./tally.db".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

/// `TALLY_` then the key path, nested keys joined by `__`.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(SETTINGS_FILE).required(false))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}
