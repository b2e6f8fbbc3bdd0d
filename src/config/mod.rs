use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
    /// Directory served for css/js/images
    #[serde(default = "default_public_dir")]
    pub public_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
            public_dir: default_public_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5500
}

fn default_public_dir() -> PathBuf {
    PathBuf::from("./public")
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_database_url() -> String {
    "sqlite:./data/cse-motors.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for session tokens. Startup fails without it.
    pub token_secret: Option<String>,
    /// Key material for the signed flash cookie. Startup fails without it.
    pub session_secret: Option<String>,
    /// Seeded Admin account, created on startup when both are set
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Deployment environment; anything but development gets secure cookies
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" | "stage" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&content).with_context(|| "Failed to parse configuration file")?
        } else {
            info!("No config file found, using defaults");
            Config::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Overlay values from the process environment (or any lookup in tests).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }
        if let Some(env) = lookup("APP_ENV") {
            self.server.environment = env.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(secret) = lookup("ACCESS_TOKEN_SECRET") {
            self.auth.token_secret = Some(secret);
        }
        if let Some(secret) = lookup("SESSION_SECRET") {
            self.auth.session_secret = Some(secret);
        }
        if let Some(email) = lookup("ADMIN_EMAIL") {
            self.auth.admin_email = Some(email);
        }
        if let Some(password) = lookup("ADMIN_PASSWORD") {
            self.auth.admin_password = Some(password);
        }
        Ok(())
    }

    /// Refuse to start without signing material.
    pub fn validate(&self) -> Result<()> {
        if self.token_secret().is_none() {
            bail!("auth.token_secret (or ACCESS_TOKEN_SECRET) must be set");
        }
        if self.session_secret().is_none() {
            bail!("auth.session_secret (or SESSION_SECRET) must be set");
        }
        Ok(())
    }

    pub fn token_secret(&self) -> Option<&str> {
        non_empty(self.auth.token_secret.as_deref())
    }

    pub fn session_secret(&self) -> Option<&str> {
        non_empty(self.auth.session_secret.as_deref())
    }

    pub fn secure_cookies(&self) -> bool {
        !self.server.environment.is_development()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
