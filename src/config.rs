use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::GestureConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub database: DatabaseSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub swipe: SwipeSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Where pets, likes and matches are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// In-process store, lost on restart
    #[default]
    Memory,
    /// Appwrite for pets, PostgreSQL for likes and matches
    Hosted,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub pets: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_capacity")]
    pub capacity: u64,
    #[serde(default = "default_session_idle_ttl")]
    pub idle_ttl_secs: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            capacity: default_session_capacity(),
            idle_ttl_secs: default_session_idle_ttl(),
        }
    }
}

fn default_session_capacity() -> u64 { 10_000 }
fn default_session_idle_ttl() -> u64 { 1800 }

/// Gesture thresholds; the viewport width comes from each client
#[derive(Debug, Clone, Deserialize)]
pub struct SwipeSettings {
    #[serde(default = "default_deadzone")]
    pub deadzone: f64,
    #[serde(default = "default_threshold_ratio")]
    pub threshold_ratio: f64,
    #[serde(default = "default_flick_min_offset")]
    pub flick_min_offset: f64,
    #[serde(default = "default_flick_min_velocity")]
    pub flick_min_velocity: f64,
    #[serde(default = "default_exit_overshoot")]
    pub exit_overshoot: f64,
    #[serde(default = "default_max_rotation_deg")]
    pub max_rotation_deg: f64,
}

impl SwipeSettings {
    /// Gesture configuration for a client with the given viewport width
    pub fn gesture_config(&self, viewport_width: f64) -> GestureConfig {
        GestureConfig {
            viewport_width,
            deadzone: self.deadzone,
            threshold_ratio: self.threshold_ratio,
            flick_min_offset: self.flick_min_offset,
            flick_min_velocity: self.flick_min_velocity,
            exit_overshoot: self.exit_overshoot,
            max_rotation_deg: self.max_rotation_deg,
        }
    }
}

impl Default for SwipeSettings {
    fn default() -> Self {
        Self {
            deadzone: default_deadzone(),
            threshold_ratio: default_threshold_ratio(),
            flick_min_offset: default_flick_min_offset(),
            flick_min_velocity: default_flick_min_velocity(),
            exit_overshoot: default_exit_overshoot(),
            max_rotation_deg: default_max_rotation_deg(),
        }
    }
}

fn default_deadzone() -> f64 { crate::core::gesture::DEFAULT_DEADZONE }
fn default_threshold_ratio() -> f64 { crate::core::gesture::DEFAULT_THRESHOLD_RATIO }
fn default_flick_min_offset() -> f64 { crate::core::gesture::DEFAULT_FLICK_MIN_OFFSET }
fn default_flick_min_velocity() -> f64 { crate::core::gesture::DEFAULT_FLICK_MIN_VELOCITY }
fn default_exit_overshoot() -> f64 { crate::core::gesture::DEFAULT_EXIT_OVERSHOOT }
fn default_max_rotation_deg() -> f64 { crate::core::gesture::DEFAULT_MAX_ROTATION_DEG }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ANIMINDER__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ANIMINDER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ANIMINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        substitute_env_vars(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ANIMINDER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the conventional unprefixed variables used by hosting platforms
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", database_url)?;
    }
    if let Ok(api_key) = env::var("APPWRITE_API_KEY") {
        builder = builder.set_override("appwrite.api_key", api_key)?;
    }
    if let Ok(project_id) = env::var("APPWRITE_PROJECT_ID") {
        builder = builder.set_override("appwrite.project_id", project_id)?;
    }

    builder.build()
}
