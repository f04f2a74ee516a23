//! Application configuration.
//!
//! Loaded from a sparse `config.toml`: override just the values you want;
//! unknown keys are rejected to catch typos early:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_dir = "images"     # Directory scanned for images and served at /images
//! db_path = "site.db"        # SQLite catalog database
//! host = "0.0.0.0"           # Bind address
//! port = 5000                # Bind port
//! contact_phone = ""         # WhatsApp number for inquiry links, digits only
//! # admin_token = "..."      # Shared admin secret; absent = all mutations denied
//! ```
//!
//! Externally supplied secrets override the file:
//!
//! | Env var       | Overrides       |
//! |---------------|-----------------|
//! | `ADMIN_TOKEN` | `admin_token`   |
//! | `WA_PHONE`    | `contact_phone` |

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Runtime configuration for both the reconciler and the server.
///
/// All fields have defaults; a missing `config.toml` is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory scanned by `ingest` and served at `/images`.
    pub content_dir: PathBuf,
    /// SQLite database path.
    pub db_path: PathBuf,
    /// Bind address for `serve`.
    pub host: String,
    /// Bind port for `serve`.
    pub port: u16,
    /// Shared admin secret. Absent means every mutation is denied.
    pub admin_token: Option<String>,
    /// WhatsApp number for inquiry links, digits only (no `+`, no spaces).
    /// Empty means links render without a number.
    pub contact_phone: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("images"),
            db_path: PathBuf::from("site.db"),
            host: "0.0.0.0".to_string(),
            port: 5000,
            admin_token: None,
            contact_phone: String::new(),
        }
    }
}

impl AppConfig {
    /// Load from `path` (defaults if the file doesn't exist), apply env
    /// overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(path)?;
        config.apply_overrides(
            std::env::var("ADMIN_TOKEN").ok(),
            std::env::var("WA_PHONE").ok(),
        );
        config.validate()?;
        Ok(config)
    }

    /// Parse the TOML file alone, without env overrides or validation.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(&fs::read_to_string(path)?)?)
    }

    /// Apply externally supplied secrets. Empty values are ignored; an
    /// empty `ADMIN_TOKEN` does not clobber a configured token.
    pub fn apply_overrides(&mut self, admin_token: Option<String>, phone: Option<String>) {
        if let Some(token) = admin_token.filter(|t| !t.is_empty()) {
            self.admin_token = Some(token);
        }
        if let Some(phone) = phone.filter(|p| !p.is_empty()) {
            self.contact_phone = phone;
        }
    }

    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.contact_phone.is_empty()
            && !self.contact_phone.chars().all(|c| c.is_ascii_digit())
        {
            return Err(ConfigError::Validation(
                "contact_phone must be digits only (no '+' or spaces)".into(),
            ));
        }
        if self.host.is_empty() {
            return Err(ConfigError::Validation("host must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, content).unwrap();
        (tmp, path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_file(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.content_dir, PathBuf::from("images"));
        assert_eq!(config.db_path, PathBuf::from("site.db"));
        assert_eq!(config.port, 5000);
        assert_eq!(config.admin_token, None);
        assert_eq!(config.contact_phone, "");
    }

    #[test]
    fn sparse_file_overrides_only_named_keys() {
        let (_tmp, path) = write_config("port = 8080\ncontact_phone = \"15551234\"\n");
        let config = AppConfig::load_file(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.contact_phone, "15551234");
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_tmp, path) = write_config("prot = 8080\n");
        assert!(matches!(
            AppConfig::load_file(&path),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut config = AppConfig {
            admin_token: Some("from-file".into()),
            contact_phone: "111".into(),
            ..AppConfig::default()
        };
        config.apply_overrides(Some("from-env".into()), Some("222".into()));
        assert_eq!(config.admin_token.as_deref(), Some("from-env"));
        assert_eq!(config.contact_phone, "222");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = AppConfig {
            admin_token: Some("keep".into()),
            ..AppConfig::default()
        };
        config.apply_overrides(Some(String::new()), Some(String::new()));
        assert_eq!(config.admin_token.as_deref(), Some("keep"));
        assert_eq!(config.contact_phone, "");
    }

    #[test]
    fn phone_with_plus_or_spaces_fails_validation() {
        for bad in ["+15551234", "555 1234", "555-1234"] {
            let config = AppConfig {
                contact_phone: bad.into(),
                ..AppConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::Validation(_))
            ));
        }
    }

    #[test]
    fn digits_only_phone_passes_validation() {
        let config = AppConfig {
            contact_phone: "4915551234567".into(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_phone_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
