use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

const CONFIG_PATHS: [&str; 2] = ["/etc/prizebox/panel.toml", "./panel.toml"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PanelConfig {
    pub database_url: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Run the setup procedure on `serve` when the prizes table is missing.
    #[serde(default)]
    pub auto_setup: bool,
}

fn default_listen_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    10
}

impl PanelConfig {
    pub fn load() -> Result<Self> {
        for path in CONFIG_PATHS {
            if let Ok(contents) = fs::read_to_string(path) {
                tracing::info!("Loading config from {}", path);
                return toml::from_str(&contents)
                    .with_context(|| format!("Invalid config file {}", path));
            }
        }

        tracing::info!("Loading config from environment");
        Self::from_env()
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .context("DATABASE_URL must be set in .env")?,
            listen_port: std::env::var("LISTEN_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(default_listen_port),
            max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or_else(default_max_connections),
            auto_setup: std::env::var("AUTO_SETUP")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_fills_in_defaults() {
        let config: PanelConfig =
            toml::from_str(r#"database_url = "postgres://localhost/prizebox""#).unwrap();
        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.max_connections, 10);
        assert!(!config.auto_setup);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: PanelConfig = toml::from_str(
            r#"
            database_url = "postgres://db/prizebox"
            listen_port = 3000
            max_connections = 4
            auto_setup = true
            "#,
        )
        .unwrap();
        assert_eq!(config.listen_port, 3000);
        assert_eq!(config.max_connections, 4);
        assert!(config.auto_setup);
    }
}
