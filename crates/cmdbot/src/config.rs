//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,

    /// Cooldown configuration
    #[serde(default)]
    pub cooldown: CooldownConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// User command storage configuration
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format (text or json)
    #[serde(default)]
    pub log_format: LogFormat,

    /// Prefix marking built-in commands
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Deadline for handling a single event
    #[serde(default = "default_handle_timeout", with = "humantime_serde")]
    pub handle_timeout: Duration,

    /// How long in-flight events may take to finish on shutdown
    #[serde(default = "default_shutdown_timeout", with = "humantime_serde")]
    pub shutdown_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CooldownConfig {
    /// Cooldown applied to user-defined commands
    #[serde(default = "default_user_command_cooldown", with = "humantime_serde")]
    pub user_command: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Deadline for a single cache call
    #[serde(default = "default_cache_op_timeout", with = "humantime_serde")]
    pub op_timeout: Duration,

    /// Interval between expired entry sweeps
    #[serde(default = "default_sweep_interval", with = "humantime_serde")]
    pub sweep_interval: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Snapshot file for user commands
    #[serde(default = "default_store_path")]
    pub path: PathBuf,

    /// Persist user commands to `path`; otherwise keep them in memory only
    #[serde(default = "default_true")]
    pub persist: bool,

    /// Deadline for a single store call
    #[serde(default = "default_store_op_timeout", with = "humantime_serde")]
    pub op_timeout: Duration,

    /// Lifetime of cached user commands
    #[serde(default = "default_store_cache_ttl", with = "humantime_serde")]
    pub cache_ttl: Duration,
}

// Default implementations
impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            command_prefix: default_command_prefix(),
            handle_timeout: default_handle_timeout(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            user_command: default_user_command_cooldown(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            op_timeout: default_cache_op_timeout(),
            sweep_interval: default_sweep_interval(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            persist: default_true(),
            op_timeout: default_store_op_timeout(),
            cache_ttl: default_store_cache_ttl(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".into()
}

fn default_command_prefix() -> String {
    commands::COMMAND_PREFIX.into()
}

fn default_handle_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(20)
}

fn default_user_command_cooldown() -> Duration {
    commands::USER_COMMAND_COOLDOWN
}

fn default_cache_op_timeout() -> Duration {
    Duration::from_secs(1)
}

fn default_sweep_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_store_path() -> PathBuf {
    PathBuf::from("data/user_commands.json")
}

fn default_true() -> bool {
    true
}

fn default_store_op_timeout() -> Duration {
    Duration::from_secs(2)
}

fn default_store_cache_ttl() -> Duration {
    commands::MIRROR_TTL
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_builder(config::Config::builder().add_source(
            config::Environment::default()
                .separator("__")
                // Keep strings as strings, serde converts per field
                .try_parsing(false),
        ))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self> {
        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}
