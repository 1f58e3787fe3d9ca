use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://users.db?mode=rwc`
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
    /// Log a record with busy/idle timings whenever an HTTP or SQL statement span closes
    #[serde(default = "default_span_timings")]
    pub span_timings: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
            span_timings: default_span_timings(),
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

fn default_span_timings() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            bail!("Server port must be greater than 0");
        }

        if self.server.host.is_empty() {
            bail!("Server host must not be empty");
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.database.url.is_empty() {
            bail!("database url must not be empty");
        }

        if self.database.max_connections == 0 {
            bail!("max_connections must be greater than 0");
        }

        if self.database.min_connections > self.database.max_connections {
            bail!(
                "min_connections ({}) must not exceed max_connections ({})",
                self.database.min_connections,
                self.database.max_connections
            );
        }

        if self.database.acquire_timeout_secs == 0 {
            bail!("acquire_timeout_secs must be greater than 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [server]
        port = 8080

        [database]
        url = "sqlite::memory:"
    "#;

    #[test]
    fn test_load_shipped_config() {
        let path = PathBuf::from("config.toml");
        let config = Config::from_file(&path).expect("Failed to load config");

        assert_eq!(config.server.port, 8080);
        assert!(config.database.url.starts_with("sqlite:"));
    }

    #[test]
    fn test_minimal_config_defaults() {
        let config = Config::parse(MINIMAL).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.num_threads, num_cpus::get());
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.min_connections, 0);
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
        assert!(!config.logging.console);
        assert!(config.logging.span_timings);
    }

    #[test]
    fn test_missing_database_section() {
        let result = Config::parse("[server]\nport = 8080\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let content = MINIMAL.replace("port = 8080", "port = 0");
        let err = Config::parse(&content).unwrap_err();
        assert!(err.to_string().contains("port"));
    }

    #[test]
    fn test_empty_database_url_rejected() {
        let content = MINIMAL.replace("url = \"sqlite::memory:\"", "url = \"\"");
        assert!(Config::parse(&content).is_err());
    }

    #[test]
    fn test_min_connections_above_max_rejected() {
        let content = format!("{}\nmax_connections = 2\nmin_connections = 3\n", MINIMAL);
        let err = Config::parse(&content).unwrap_err();
        assert!(err.to_string().contains("min_connections"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let content = format!("{}\n[logging]\nlevel = \"loud\"\n", MINIMAL);
        assert!(Config::parse(&content).is_err());
    }

    #[test]
    fn test_span_timings_can_be_disabled() {
        let content = format!("{}\n[logging]\nspan_timings = false\n", MINIMAL);
        let config = Config::parse(&content).unwrap();
        assert!(!config.logging.span_timings);
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let content = format!("{}\n[logging]\nformat = \"xml\"\n", MINIMAL);
        assert!(Config::parse(&content).is_err());
    }
}
