//! Configuration loading
//!
//! Handles loading configuration from embedded defaults, files, and environment.

use super::config::AppConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};

/// Embedded default configuration (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Load configuration from files and environment
pub fn load_config() -> Result<AppConfig> {
    let profile = std::env::var("LEADSCOUT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = Config::builder()
        // 1. Embedded defaults
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        // 2. Optional files
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{profile}")).required(false))
        .add_source(File::with_name("config/local").required(false))
        // 3. Environment: LEADSCOUT_PIPELINE__LIVE_ROSTER_CAP=5
        .add_source(
            Environment::with_prefix("LEADSCOUT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(text: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_embedded_defaults_parse() {
        let config = from_toml(DEFAULT_CONFIG);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.pipeline.static_roster_cap, 40);
        assert_eq!(config.pipeline.live_roster_cap, 10);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = from_toml("[server]\nport = 8080\n[pipeline]\nlive_roster_cap = 5\n");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.pipeline.live_roster_cap, 5);
        assert_eq!(config.pipeline.retry.max_attempts, 3);
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }
}
