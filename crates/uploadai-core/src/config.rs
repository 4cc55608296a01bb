//! Configuration module
//!
//! Configuration is read once at startup from the environment (a `.env` file is honored).
//! Every value has a default except `DATABASE_URL`; values that are present but malformed
//! fail startup instead of silently falling back.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

// Common constants
const SERVER_PORT: u16 = 3333;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const UPLOAD_DIR: &str = "./tmp";
/// 50 MiB
const MAX_UPLOAD_SIZE_BYTES: u64 = 50 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &str = ".mp3";

/// Upload pipeline settings: where files land and what is accepted.
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub upload_dir: PathBuf,
    pub max_file_size_bytes: u64,
    /// Extensions including the leading dot, compared case-sensitively.
    pub allowed_extensions: Vec<String>,
    /// Remove partially written files when a transfer fails.
    pub cleanup_partial_files: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from(UPLOAD_DIR),
            max_file_size_bytes: MAX_UPLOAD_SIZE_BYTES,
            allowed_extensions: parse_extensions(ALLOWED_EXTENSIONS),
            cleanup_partial_files: false,
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub upload: UploadConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable not set"))?;

        let config = Config {
            server_port: parse_or(get("SERVER_PORT"), "SERVER_PORT", SERVER_PORT)?,
            environment: get("ENVIRONMENT")
                .unwrap_or_else(|| "development".to_string())
                .to_lowercase(),
            cors_origins: get("CORS_ORIGINS")
                .map(|s| split_list(&s))
                .unwrap_or_else(|| vec!["*".to_string()]),
            database_url,
            db_max_connections: parse_or(
                get("DB_MAX_CONNECTIONS"),
                "DB_MAX_CONNECTIONS",
                MAX_CONNECTIONS,
            )?,
            db_timeout_seconds: parse_or(
                get("DB_TIMEOUT_SECONDS"),
                "DB_TIMEOUT_SECONDS",
                CONNECTION_TIMEOUT_SECS,
            )?,
            upload: UploadConfig {
                upload_dir: get("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(UPLOAD_DIR)),
                max_file_size_bytes: parse_or(
                    get("MAX_UPLOAD_SIZE_BYTES"),
                    "MAX_UPLOAD_SIZE_BYTES",
                    MAX_UPLOAD_SIZE_BYTES,
                )?,
                allowed_extensions: parse_extensions(
                    &get("UPLOAD_ALLOWED_EXTENSIONS")
                        .unwrap_or_else(|| ALLOWED_EXTENSIONS.to_string()),
                ),
                cleanup_partial_files: parse_or(
                    get("UPLOAD_CLEANUP_PARTIAL_FILES").map(|s| s.to_lowercase()),
                    "UPLOAD_CLEANUP_PARTIAL_FILES",
                    false,
                )?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production" || self.environment == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.database_url.starts_with("postgres://")
            || self.database_url.starts_with("postgresql://"))
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if self.db_max_connections == 0 {
            return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS cannot be 0"));
        }

        if self.db_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("DB_TIMEOUT_SECONDS cannot be 0"));
        }

        if self.upload.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_BYTES cannot be 0"));
        }

        if self.upload.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "UPLOAD_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS configured to allow all origins (*) in production. \
                Set specific allowed origins via CORS_ORIGINS."
            ));
        }

        Ok(())
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: '{}' ({})", key, value, e)),
        None => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse a comma-separated extension list, adding the leading dot where missing.
fn parse_extensions(raw: &str) -> Vec<String> {
    split_list(raw)
        .into_iter()
        .map(|ext| {
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{}", ext)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/db")]))
                .unwrap();

        assert_eq!(config.server_port, 3333);
        assert_eq!(config.upload.max_file_size_bytes, 50 * 1024 * 1024);
        assert_eq!(config.upload.allowed_extensions, vec![".mp3".to_string()]);
        assert_eq!(config.upload.upload_dir, PathBuf::from("./tmp"));
        assert!(!config.upload.cleanup_partial_files);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }

    #[test]
    fn missing_database_url_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn non_postgres_database_url_is_rejected() {
        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "mysql://localhost/db")]));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_numbers_fail_instead_of_defaulting() {
        let err = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("MAX_UPLOAD_SIZE_BYTES", "fifty"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("MAX_UPLOAD_SIZE_BYTES"));
    }

    #[test]
    fn extensions_are_normalized_with_leading_dot() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("UPLOAD_ALLOWED_EXTENSIONS", "mp3, .wav ,,"),
        ]))
        .unwrap();
        assert_eq!(
            config.upload.allowed_extensions,
            vec![".mp3".to_string(), ".wav".to_string()]
        );
    }

    #[test]
    fn cleanup_flag_accepts_mixed_case() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("UPLOAD_CLEANUP_PARTIAL_FILES", "TRUE"),
        ]))
        .unwrap();
        assert!(config.upload.cleanup_partial_files);
    }

    #[test]
    fn wildcard_cors_is_rejected_in_production() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("ENVIRONMENT", "Production"),
        ]));
        assert!(result.is_err());

        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://upload.example.com"),
        ]))
        .unwrap();
        assert!(config.is_production());
    }
}
