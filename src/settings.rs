use config::{Config, ConfigError, Environment, File};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
  pub host: String,
  pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
  pub host: String,
  pub port: u16,
  pub user: String,
  pub password: String,
  pub database: String,
  pub pool_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub server: ServerSettings,
  pub database: DatabaseSettings,
}

impl Settings {
  /// Layers an optional TOML file under `COMMENTABLE__`-prefixed environment
  /// variables, e.g. `COMMENTABLE__SERVER__PORT=8080`. The file path comes
  /// from the `COMMENTABLE_CONFIG` env var, set from the CLI args on boot.
  pub fn new() -> Result<Settings, ConfigError> {
    let config_path =
      std::env::var("COMMENTABLE_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

    Config::builder()
      .set_default("server.host", "127.0.0.1")?
      .set_default("server.port", 8080)?
      .set_default("database.host", "127.0.0.1")?
      .set_default("database.port", 5432)?
      .set_default("database.user", "commentable")?
      .set_default("database.password", "")?
      .set_default("database.database", "commentable")?
      .set_default("database.pool_size", 16)?
      .add_source(File::with_name(&config_path).required(false))
      .add_source(
        Environment::with_prefix("COMMENTABLE")
          .prefix_separator("__")
          .separator("__"),
      )
      .build()?
      .try_deserialize()
  }
}

lazy_static! {
  pub static ref SETTINGS: Settings = Settings::new().expect("Failed to load app settings");
}
