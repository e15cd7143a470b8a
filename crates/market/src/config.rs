//! Marketplace configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CAMPUS_DATA_DIR` - Directory holding the device store (default: `.campus-market`)
//! - `CAMPUS_STUDENT_DOMAIN` - Email domain for student accounts (default: `kgkite.ac.in`)
//! - `CAMPUS_ADMIN_DOMAIN` - Email domain for admin accounts (default: `kgisl.ac.in`)
//! - `CAMPUS_BACKEND_LATENCY_MS` - Simulated backend delay in milliseconds (default: 500)
//! - `CAMPUS_SELLER_REPLY` - Automatic reply sent by sellers in chat

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Default directory for the file-backed store.
pub const DEFAULT_DATA_DIR: &str = ".campus-market";
/// Default email domain for student accounts.
pub const DEFAULT_STUDENT_DOMAIN: &str = "kgkite.ac.in";
/// Default email domain for admin accounts.
pub const DEFAULT_ADMIN_DOMAIN: &str = "kgisl.ac.in";
/// Default simulated backend delay.
pub const DEFAULT_LATENCY_MS: u64 = 500;
/// Default automatic seller reply.
pub const DEFAULT_SELLER_REPLY: &str =
    "Thanks for your message! I'll get back to you as soon as possible.";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Marketplace configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// Sign-in domain rules
    pub auth: AuthConfig,
    /// Mock backend behaviour
    pub backend: BackendConfig,
}

/// Email domains that decide an account's role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Domain required on the student tab (without the `@`)
    pub student_domain: String,
    /// Domain required on the admin tab (without the `@`)
    pub admin_domain: String,
}

/// Mock backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Delay applied before every backend response
    pub latency: Duration,
    /// Text sellers answer every chat message with
    pub seller_reply: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            auth: AuthConfig::default(),
            backend: BackendConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            student_domain: DEFAULT_STUDENT_DOMAIN.to_string(),
            admin_domain: DEFAULT_ADMIN_DOMAIN.to_string(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            seller_reply: DEFAULT_SELLER_REPLY.to_string(),
        }
    }
}

impl BackendConfig {
    /// Backend config with no simulated delay.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl MarketConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = PathBuf::from(get_or("CAMPUS_DATA_DIR", DEFAULT_DATA_DIR));

        let student_domain = parse_domain(
            "CAMPUS_STUDENT_DOMAIN",
            &get_or("CAMPUS_STUDENT_DOMAIN", DEFAULT_STUDENT_DOMAIN),
        )?;
        let admin_domain = parse_domain(
            "CAMPUS_ADMIN_DOMAIN",
            &get_or("CAMPUS_ADMIN_DOMAIN", DEFAULT_ADMIN_DOMAIN),
        )?;
        if student_domain.eq_ignore_ascii_case(&admin_domain) {
            return Err(ConfigError::InvalidEnvVar(
                "CAMPUS_ADMIN_DOMAIN".to_string(),
                "must differ from CAMPUS_STUDENT_DOMAIN".to_string(),
            ));
        }

        let latency_ms = get_or("CAMPUS_BACKEND_LATENCY_MS", &DEFAULT_LATENCY_MS.to_string())
            .trim()
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CAMPUS_BACKEND_LATENCY_MS".to_string(), e.to_string())
            })?;

        let seller_reply = get_or("CAMPUS_SELLER_REPLY", DEFAULT_SELLER_REPLY);
        if seller_reply.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CAMPUS_SELLER_REPLY".to_string(),
                "must not be blank".to_string(),
            ));
        }

        Ok(Self {
            data_dir,
            auth: AuthConfig {
                student_domain,
                admin_domain,
            },
            backend: BackendConfig {
                latency: Duration::from_millis(latency_ms),
                seller_reply,
            },
        })
    }
}

/// Normalize a domain setting: strip a leading `@`, reject blanks and `@`s.
fn parse_domain(key: &str, value: &str) -> Result<String, ConfigError> {
    let domain = value.trim().trim_start_matches('@');
    if domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("not a valid email domain: {value:?}"),
        ));
    }
    Ok(domain.to_ascii_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = MarketConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, MarketConfig::default());
        assert_eq!(config.auth.student_domain, "kgkite.ac.in");
        assert_eq!(config.auth.admin_domain, "kgisl.ac.in");
        assert_eq!(config.backend.latency, Duration::from_millis(500));
    }

    #[test]
    fn test_overrides() {
        let config = MarketConfig::from_lookup(lookup(&[
            ("CAMPUS_DATA_DIR", "/tmp/market"),
            ("CAMPUS_STUDENT_DOMAIN", "@Students.Example.edu"),
            ("CAMPUS_BACKEND_LATENCY_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/market"));
        assert_eq!(config.auth.student_domain, "students.example.edu");
        assert_eq!(config.backend.latency, Duration::ZERO);
    }

    #[test]
    fn test_invalid_latency() {
        let err = MarketConfig::from_lookup(lookup(&[("CAMPUS_BACKEND_LATENCY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "CAMPUS_BACKEND_LATENCY_MS"));
    }

    #[test]
    fn test_invalid_domains() {
        assert!(MarketConfig::from_lookup(lookup(&[("CAMPUS_ADMIN_DOMAIN", " ")])).is_err());
        assert!(MarketConfig::from_lookup(lookup(&[("CAMPUS_ADMIN_DOMAIN", "a@b")])).is_err());
        assert!(
            MarketConfig::from_lookup(lookup(&[("CAMPUS_ADMIN_DOMAIN", "KGKITE.ac.in")])).is_err()
        );
    }

    #[test]
    fn test_blank_seller_reply() {
        assert!(MarketConfig::from_lookup(lookup(&[("CAMPUS_SELLER_REPLY", "  ")])).is_err());
    }
}
