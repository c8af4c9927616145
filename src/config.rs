//! Configuration for the admin console
//!
//! Settings are resolved from an optional TOML file plus `ACCOUNT_ADMIN_*`
//! environment variable overrides; command-line flags override both.

use std::path::Path;
use std::str::FromStr;

use config::{Config as ConfigLoader, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Which base path variant the backend exposes the account endpoint under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiRoot {
    /// `/Dev/account`
    #[default]
    Dev,
    /// `/Development/account`
    Development,
}

impl ApiRoot {
    /// Path of the account endpoint under this variant
    pub fn account_path(&self) -> &'static str {
        match self {
            ApiRoot::Dev => "/Dev/account",
            ApiRoot::Development => "/Development/account",
        }
    }
}

impl FromStr for ApiRoot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(ApiRoot::Dev),
            "development" => Ok(ApiRoot::Development),
            other => Err(Error::Config(format!(
                "Invalid api root: {}. Use 'dev' or 'development'",
                other
            ))),
        }
    }
}

/// Admin console configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Base URL of the backend, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Endpoint path variant
    #[serde(default)]
    pub api_root: ApiRoot,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_root: ApiRoot::Dev,
        }
    }
}

impl AdminConfig {
    /// Load configuration from an optional file plus environment overrides
    ///
    /// Environment variables use the `ACCOUNT_ADMIN_` prefix, e.g.
    /// `ACCOUNT_ADMIN_BASE_URL`, `ACCOUNT_ADMIN_API_ROOT`.
    pub fn load(config_file: Option<&Path>) -> Result<Self, Error> {
        let mut builder = ConfigLoader::builder()
            .set_default("base_url", AdminConfig::default().base_url)
            .map_err(|e| Error::Config(e.to_string()))?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix("ACCOUNT_ADMIN"))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Full URL of the account endpoint
    pub fn account_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_root.account_path()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_url_building() {
        let config = AdminConfig::default();
        assert_eq!(config.account_url(), "http://localhost:8080/Dev/account");

        let config = AdminConfig {
            base_url: "http://backend:9000/".to_string(),
            api_root: ApiRoot::Development,
        };
        assert_eq!(
            config.account_url(),
            "http://backend:9000/Development/account"
        );
    }

    #[test]
    fn test_api_root_parsing() {
        assert_eq!("dev".parse::<ApiRoot>().unwrap(), ApiRoot::Dev);
        assert_eq!(
            "Development".parse::<ApiRoot>().unwrap(),
            ApiRoot::Development
        );
        assert!("production".parse::<ApiRoot>().is_err());
    }
}
