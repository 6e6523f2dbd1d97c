use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::errors::{AppError, Result};
use crate::models::TopLimit;
use crate::services::presenter::QuotaDisplay;

const ENV_PREFIX: &str = "TOP_USERS";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub base_url: String,
    pub endpoint_path: String,
    pub access_token: Option<String>,
    pub user_id: Option<String>,
    pub request_timeout_secs: u64,
    pub default_limit: u32,
    pub quota_per_unit: f64,
    pub display_in_currency: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Defaults, then the optional TOML file, then `TOP_USERS_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = ::config::Config::builder()
            .set_default("base_url", "http://localhost:3000")?
            .set_default("endpoint_path", "/api/log/top_users")?
            .set_default("request_timeout_secs", 30_i64)?
            .set_default("default_limit", 10_i64)?
            .set_default("quota_per_unit", 500_000.0)?
            .set_default("display_in_currency", true)?;

        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path));
        }

        let config: Config = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(AppError::Config("base_url must not be empty".to_string()));
        }
        if !self.endpoint_path.starts_with('/') {
            return Err(AppError::Config(format!(
                "endpoint_path must start with '/': {}",
                self.endpoint_path
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config("request_timeout_secs must be positive".to_string()));
        }
        if !(self.quota_per_unit.is_finite() && self.quota_per_unit > 0.0) {
            return Err(AppError::Config(format!(
                "quota_per_unit must be positive, got {}",
                self.quota_per_unit
            )));
        }
        TopLimit::try_from(self.default_limit)
            .map_err(|e| AppError::Config(format!("default_limit: {}", e)))?;
        Ok(())
    }

    pub fn default_limit(&self) -> TopLimit {
        TopLimit::try_from(self.default_limit).unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn quota_display(&self) -> QuotaDisplay {
        if self.display_in_currency {
            QuotaDisplay::Currency {
                per_unit: self.quota_per_unit,
            }
        } else {
            QuotaDisplay::Raw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    const VARS: [&str; 5] = [
        "TOP_USERS_BASE_URL",
        "TOP_USERS_DEFAULT_LIMIT",
        "TOP_USERS_ACCESS_TOKEN",
        "TOP_USERS_DISPLAY_IN_CURRENCY",
        "TOP_USERS_QUOTA_PER_UNIT",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.endpoint_path, "/api/log/top_users");
        assert_eq!(config.default_limit(), TopLimit::Top10);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.access_token.is_none());
        assert_eq!(
            config.quota_display(),
            QuotaDisplay::Currency { per_unit: 500_000.0 }
        );
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        env::set_var("TOP_USERS_BASE_URL", "https://usage.example.com");
        env::set_var("TOP_USERS_DEFAULT_LIMIT", "30");
        env::set_var("TOP_USERS_ACCESS_TOKEN", "secret");
        env::set_var("TOP_USERS_DISPLAY_IN_CURRENCY", "false");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_url, "https://usage.example.com");
        assert_eq!(config.default_limit(), TopLimit::Top30);
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert_eq!(config.quota_display(), QuotaDisplay::Raw);
    }

    #[test]
    #[serial]
    fn test_rejects_unsupported_limit() {
        clear_env();
        env::set_var("TOP_USERS_DEFAULT_LIMIT", "15");
        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_rejects_non_positive_quota_unit() {
        clear_env();
        env::set_var("TOP_USERS_QUOTA_PER_UNIT", "0");
        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_file_below_environment() {
        clear_env();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "base_url = \"http://from-file:8080\"").unwrap();
        writeln!(file, "default_limit = 20").unwrap();

        env::set_var("TOP_USERS_DEFAULT_LIMIT", "30");
        let config = Config::load(Some(file.path())).unwrap();
        clear_env();

        assert_eq!(config.base_url, "http://from-file:8080");
        assert_eq!(config.default_limit(), TopLimit::Top30);
    }
}
