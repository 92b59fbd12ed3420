use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for todo-service.
///
/// Loaded once at startup and handed to constructors; nothing reads it globally.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    pub bootstrap: BootstrapConfig,
}

/// Storage backend selection.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

/// Database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Access token configuration.
///
/// The secret must be at least 32 bytes; this is enforced when the
/// token handler is built from it.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
    #[serde(default = "default_expiration_minutes")]
    pub expiration_minutes: i64,
}

/// Argon2 cost parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    #[serde(default = "default_memory_cost_kib")]
    pub memory_cost_kib: u32,
    #[serde(default = "default_time_cost")]
    pub time_cost: u32,
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

/// Credentials of the identity seeded into an empty store.
#[derive(Deserialize, Clone)]
pub struct BootstrapConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl JwtConfig {
    /// Token lifetime as a duration.
    ///
    /// # Errors
    /// Returns error if `expiration_minutes` is not positive or does not fit a duration
    pub fn token_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if self.expiration_minutes <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must be positive, got {}",
                self.expiration_minutes
            )));
        }

        chrono::Duration::try_minutes(self.expiration_minutes).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.expiration_minutes out of range: {}",
                self.expiration_minutes
            ))
        })
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost_kib: default_memory_cost_kib(),
            time_cost: default_time_cost(),
            parallelism: default_parallelism(),
        }
    }
}

// Secrets stay out of the startup log line.
impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("expiration_minutes", &self.expiration_minutes)
            .finish()
    }
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_algorithm() -> String {
    "HS256".to_string()
}

fn default_expiration_minutes() -> i64 {
    auth::Authenticator::DEFAULT_TOKEN_TTL_MINUTES
}

fn default_memory_cost_kib() -> u32 {
    19 * 1024
}

fn default_time_cost() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (JWT__SECRET, BOOTSTRAP__PASSWORD, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_defaults_applied() {
        let config = from_toml(
            r#"
            [database]
            url = "postgres://localhost/todos"

            [server]
            http_port = 8080

            [jwt]
            secret = "0123456789abcdef0123456789abcdef"

            [bootstrap]
            username = "admin"
            email = "admin@example.com"
            password = "Admin_Pass1!"
            "#,
        )
        .expect("Failed to load config");

        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.database.acquire_timeout_secs, 5);
        assert_eq!(config.jwt.algorithm, "HS256");
        assert_eq!(config.jwt.expiration_minutes, 30);
        assert_eq!(config.password.time_cost, 2);
    }

    #[test]
    fn test_memory_backend() {
        let config = from_toml(
            r#"
            [database]
            backend = "memory"

            [server]
            http_port = 8080

            [jwt]
            secret = "0123456789abcdef0123456789abcdef"
            algorithm = "HS512"
            expiration_minutes = 5

            [bootstrap]
            username = "admin"
            email = "admin@example.com"
            password = "Admin_Pass1!"
            "#,
        )
        .expect("Failed to load config");

        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert_eq!(config.jwt.algorithm, "HS512");
        assert_eq!(config.jwt.expiration_minutes, 5);
    }

    #[test]
    fn test_missing_bootstrap_section_fails() {
        let result = from_toml(
            r#"
            [database]
            url = "postgres://localhost/todos"

            [server]
            http_port = 8080

            [jwt]
            secret = "0123456789abcdef0123456789abcdef"
            "#,
        );

        assert!(result.is_err());
    }

    fn jwt_config(expiration_minutes: i64) -> JwtConfig {
        JwtConfig {
            secret: "0123456789abcdef0123456789abcdef".to_string(),
            algorithm: "HS256".to_string(),
            expiration_minutes,
        }
    }

    #[test]
    fn test_token_ttl() {
        assert_eq!(
            jwt_config(30).token_ttl().unwrap(),
            chrono::Duration::minutes(30)
        );
    }

    #[test]
    fn test_token_ttl_rejects_non_positive_and_out_of_range() {
        for minutes in [0, -5, i64::MAX] {
            assert!(
                jwt_config(minutes).token_ttl().is_err(),
                "expiration_minutes = {} should be rejected",
                minutes
            );
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let jwt = JwtConfig {
            secret: "super-secret-signing-key-material!!".to_string(),
            algorithm: "HS256".to_string(),
            expiration_minutes: 30,
        };

        let rendered = format!("{:?}", jwt);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
