use std::fs;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::session::cookie::DEFAULT_COOKIE_NAME;
use crate::user_auth::PasswordScheme;

/// Default session secret shipped in sample configs. Never deploy with it.
pub const PLACEHOLDER_SECRET: &str = "JUST_A_PLACEHOLDER";

/// Minimum secret length considered safe for signing cookies
pub const MIN_SECRET_LEN: usize = 32;

pub const ENV_DATABASE_URL: &str = "AUTHGATE_DATABASE_URL";
pub const ENV_SESSION_SECRET: &str = "AUTHGATE_SESSION_SECRET";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Per-request spans from the HTTP trace layer
    #[serde(default = "default_access_log")]
    pub access_log: bool,
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/users.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Cookie signing secret
    pub secret: String,
    pub cookie_name: String,
    /// Sessions idle for longer than this are forgotten
    pub idle_timeout_secs: u64,
    pub purge_interval_secs: u64,
    /// Send the cookie over HTTPS only
    pub secure_cookie: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: PLACEHOLDER_SECRET.to_string(),
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            idle_timeout_secs: 7 * 24 * 3600,
            purge_interval_secs: 300,
            secure_cookie: false,
        }
    }
}

impl SessionConfig {
    /// Placeholder or too short to resist brute force
    pub fn secret_is_weak(&self) -> bool {
        self.secret == PLACEHOLDER_SECRET || self.secret.len() < MIN_SECRET_LEN
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub password_scheme: PasswordScheme,
}

fn default_access_log() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "authgate.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            access_log: true,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            session: SessionConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`, then apply environment overrides
    pub fn load(env: &str) -> Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Override secrets and the database location from the environment
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database.url = url;
        }
        if let Some(secret) = lookup(ENV_SESSION_SECRET) {
            self.session.secret = secret;
        }
    }
}
