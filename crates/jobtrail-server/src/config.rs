// Configuration module
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub auth: AuthConfig,
    pub logging: LoggingSettings,
    #[serde(default)]
    pub performance: PerformanceSettings,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// 0 means one worker per CPU core.
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub sqlite_path: String,
}

/// Auth settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: i64,
    /// Bcrypt cost override; absent means the library default.
    #[serde(default)]
    pub bcrypt_cost: Option<u32>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_file")]
    pub file_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Performance settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceSettings {
    #[serde(default = "default_keepalive_timeout")]
    pub keepalive_timeout: u64,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            keepalive_timeout: default_keepalive_timeout(),
            max_connections: default_max_connections(),
        }
    }
}

// Default value functions
fn default_workers() -> usize {
    0
}

fn default_token_expiry_hours() -> i64 {
    168 // 7 days
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "./logs/server.log".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

fn default_keepalive_timeout() -> u64 {
    75
}

fn default_max_connections() -> usize {
    25000
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides for deploy-time settings.
    ///
    /// Supported variables:
    /// - JOBTRAIL_SERVER_HOST: Override server.host
    /// - JOBTRAIL_SERVER_PORT: Override server.port
    /// - JOBTRAIL_DATA_PATH: Override storage.sqlite_path
    /// - JOBTRAIL_JWT_SECRET: Override auth.jwt_secret
    /// - JOBTRAIL_LOG_LEVEL: Override logging.level
    /// - JOBTRAIL_LOG_FILE: Override logging.file_path
    /// - JOBTRAIL_LOG_TO_CONSOLE: Override logging.log_to_console
    ///
    /// Environment variables take precedence over config.toml values.
    fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        use std::env;

        if let Ok(host) = env::var("JOBTRAIL_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("JOBTRAIL_SERVER_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid JOBTRAIL_SERVER_PORT value: {}", port_str))?;
        }

        if let Ok(path) = env::var("JOBTRAIL_DATA_PATH") {
            self.storage.sqlite_path = path;
        }

        if let Ok(secret) = env::var("JOBTRAIL_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }

        if let Ok(level) = env::var("JOBTRAIL_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(path) = env::var("JOBTRAIL_LOG_FILE") {
            self.logging.file_path = path;
        }

        if let Ok(val) = env::var("JOBTRAIL_LOG_TO_CONSOLE") {
            self.logging.log_to_console =
                val.to_lowercase() == "true" || val == "1" || val.to_lowercase() == "yes";
        }

        Ok(())
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "pretty", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        if self.auth.jwt_secret.is_empty() {
            return Err(anyhow::anyhow!("auth.jwt_secret cannot be empty"));
        }

        if self.auth.token_expiry_hours <= 0 {
            return Err(anyhow::anyhow!("auth.token_expiry_hours must be positive"));
        }

        if let Some(cost) = self.auth.bcrypt_cost {
            if !(4..=31).contains(&cost) {
                return Err(anyhow::anyhow!("auth.bcrypt_cost must be between 4 and 31"));
            }
        }

        Ok(())
    }

    /// Get default configuration (useful for testing)
    pub fn default() -> Self {
        ServerConfig {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: 0,
            },
            storage: StorageSettings {
                sqlite_path: "./data/jobtrail.db".to_string(),
            },
            auth: AuthConfig {
                jwt_secret: "change-me-in-production".to_string(),
                token_expiry_hours: default_token_expiry_hours(),
                bcrypt_cost: None,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
                file_path: default_log_file(),
                log_to_console: true,
                format: "compact".to_string(),
            },
            performance: PerformanceSettings::default(),
        }
    }
}
