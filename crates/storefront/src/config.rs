//! Shopfront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPFRONT_DATA_DIR` - Directory for the file-backed store (default: `.shopfront`)
//! - `SHOPFRONT_CATALOG` - Path to a YAML catalog (default: built-in demo catalog)
//! - `SHOPFRONT_ADMIN_EMAIL` - Address granted the admin role (default: `admin@gmail.com`)

use std::path::PathBuf;

use thiserror::Error;

use shopfront_core::Email;

const DEFAULT_DATA_DIR: &str = ".shopfront";
const DEFAULT_ADMIN_EMAIL: &str = "admin@gmail.com";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shopfront application configuration.
#[derive(Debug, Clone)]
pub struct ShopfrontConfig {
    /// Directory holding the persisted `cart`, `orders` and `user` values
    pub data_dir: PathBuf,
    /// YAML catalog to load instead of the demo catalog
    pub catalog_path: Option<PathBuf>,
    /// Email that signs in with the admin role
    pub admin_email: Email,
}

impl ShopfrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = get("SHOPFRONT_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let catalog_path = get("SHOPFRONT_CATALOG").map(PathBuf::from);
        let admin_email =
            get("SHOPFRONT_ADMIN_EMAIL").unwrap_or_else(|| DEFAULT_ADMIN_EMAIL.to_string());
        let admin_email = Email::parse(&admin_email).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPFRONT_ADMIN_EMAIL".to_string(), e.to_string())
        })?;

        Ok(Self {
            data_dir,
            catalog_path,
            admin_email,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ShopfrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ShopfrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".shopfront"));
        assert!(config.catalog_path.is_none());
        assert_eq!(config.admin_email.as_str(), "admin@gmail.com");
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("SHOPFRONT_DATA_DIR", "/tmp/shop"),
            ("SHOPFRONT_CATALOG", "catalog.yaml"),
            ("SHOPFRONT_ADMIN_EMAIL", "owner@shop.test"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/shop"));
        assert_eq!(config.catalog_path, Some(PathBuf::from("catalog.yaml")));
        assert_eq!(config.admin_email.as_str(), "owner@shop.test");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("SHOPFRONT_DATA_DIR", "  ")]).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".shopfront"));
    }

    #[test]
    fn test_invalid_admin_email() {
        let err = config_from(&[("SHOPFRONT_ADMIN_EMAIL", "nobody")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref var, _) if var == "SHOPFRONT_ADMIN_EMAIL"));
    }
}
