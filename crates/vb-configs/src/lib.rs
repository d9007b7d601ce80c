//! # vb-configs
//!
//! Environment-driven settings for the Ventboard binary. Values come
//! from `VENTBOARD_*` variables, with a `.env` file loaded first for
//! local development. `admin_id` and `channel_id` have no sane default
//! and fail startup when absent.

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Transport user id of the single moderating admin.
    pub admin_id: String,
    /// Broadcast channel approved vents are published to.
    pub channel_id: String,
    /// First public number ever assigned; the durable counter is created
    /// lazily with this value on the first approval.
    #[serde(default = "default_start_vent_number")]
    pub start_vent_number: i64,
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Base URL for the comments deep link on published vents.
    #[serde(default = "default_deep_link_base")]
    pub deep_link_base: String,
}

fn default_start_vent_number() -> i64 {
    1
}

fn default_database_url() -> String {
    "sqlite:ventboard.db".to_string()
}

fn default_deep_link_base() -> String {
    "https://t.me/ventboard_bot".to_string()
}

impl Settings {
    /// Load from the process environment, reading `.env` first.
    pub fn load() -> Result<Self, SettingsError> {
        dotenvy::dotenv().ok();
        let settings = Self::from_source(config::Environment::with_prefix("VENTBOARD"))?;
        info!(
            start_vent_number = settings.start_vent_number,
            database_url = %settings.database_url,
            "settings loaded"
        );
        Ok(settings)
    }

    fn from_source(source: config::Environment) -> Result<Self, SettingsError> {
        let cfg = config::Config::builder().add_source(source).build()?;
        Ok(cfg.try_deserialize()?)
    }
}
