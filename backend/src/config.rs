//! # Configuration
//!
//! Server settings are resolved in three layers, later layers winning:
//!
//! 1. Built-in defaults
//! 2. A JSON file named by `FINANCE_CONFIG` (missing keys keep their defaults)
//! 3. Individual `FINANCE_*` environment variables
//!
//! Invalid values fail startup with a message naming the offending setting.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use shared::{NotificationPreferences, PrivacyPreferences, UserPreferences};

pub const CONFIG_FILE_VAR: &str = "FINANCE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_url: String,
    pub cors_origin: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    pub default_currency: String,
    pub default_language: String,
    pub default_timezone: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            database_url: "sqlite://household_finance.db".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            log_filter: "household_finance=info,tower_http=info".to_string(),
            default_currency: "BRL".to_string(),
            default_language: "pt-BR".to_string(),
            default_timezone: "America/Sao_Paulo".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment
    pub fn load_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_FILE_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(&lookup);
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields: [(&str, &mut String); 7] = [
            ("FINANCE_BIND_ADDR", &mut self.bind_addr),
            ("FINANCE_DATABASE_URL", &mut self.database_url),
            ("FINANCE_CORS_ORIGIN", &mut self.cors_origin),
            ("FINANCE_LOG", &mut self.log_filter),
            ("FINANCE_DEFAULT_CURRENCY", &mut self.default_currency),
            ("FINANCE_DEFAULT_LANGUAGE", &mut self.default_language),
            ("FINANCE_DEFAULT_TIMEZONE", &mut self.default_timezone),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key) {
                *field = value;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if !self.database_url.starts_with("sqlite:") {
            bail!("database_url must be a sqlite: URL, got {:?}", self.database_url);
        }
        if axum::http::HeaderValue::from_str(&self.cors_origin).is_err() {
            bail!("cors_origin is not a valid header value: {:?}", self.cors_origin);
        }
        for (name, value) in [
            ("default_currency", &self.default_currency),
            ("default_language", &self.default_language),
            ("default_timezone", &self.default_timezone),
        ] {
            if value.trim().is_empty() {
                bail!("{} cannot be empty", name);
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("bind_addr is not a socket address: {:?}", self.bind_addr))
    }

    /// Preferences reported for users who never saved their own
    pub fn default_preferences(&self) -> UserPreferences {
        UserPreferences {
            currency: self.default_currency.clone(),
            language: self.default_language.clone(),
            timezone: self.default_timezone.clone(),
            notifications: NotificationPreferences {
                budget_alerts: true,
                weekly_reports: true,
                monthly_reports: true,
                goal_reminders: true,
            },
            privacy: PrivacyPreferences {
                share_data: false,
                analytics: true,
                marketing: false,
            },
        }
    }
}
