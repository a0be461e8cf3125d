//! Configuration module
//!
//! Env-driven configuration for the API service: server, database, object
//! storage, and the hosted auth collaborator. Loaded once at startup and
//! validated before anything else is initialized.

use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

const DEFAULT_SERVER_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60 * 8;

/// Object storage backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            other => bail!("Unknown storage backend: {}", other),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub session_ttl_seconds: u64,
    // Database
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Object storage
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Auth collaborator
    pub auth_url: String,
    pub auth_anon_key: String,
    /// Privileged key for invite/list-users. Optional: its absence degrades
    /// the users page (emails hidden) and disables invites.
    pub auth_service_key: Option<String>,
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parsed<T: FromStr>(key: &str, default: T) -> T {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let storage_backend = env_opt("STORAGE_BACKEND")
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or(StorageBackend::S3);

        let cors_origins = env_opt("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let config = Config {
            server_port: env_parsed("SERVER_PORT", DEFAULT_SERVER_PORT),
            environment: env_opt("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            cors_origins,
            session_ttl_seconds: env_parsed("SESSION_TTL_SECONDS", DEFAULT_SESSION_TTL_SECS),
            database_url: env::var("DATABASE_URL").context("DATABASE_URL is required")?,
            db_max_connections: env_parsed("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            db_timeout_seconds: env_parsed("DB_TIMEOUT_SECONDS", DEFAULT_CONNECTION_TIMEOUT_SECS),
            storage_backend,
            s3_bucket: env_opt("S3_BUCKET"),
            s3_region: env_opt("S3_REGION").or_else(|| env_opt("AWS_REGION")),
            s3_endpoint: env_opt("S3_ENDPOINT"),
            local_storage_path: env_opt("LOCAL_STORAGE_PATH"),
            local_storage_base_url: env_opt("LOCAL_STORAGE_BASE_URL"),
            auth_url: env::var("AUTH_URL").context("AUTH_URL is required")?,
            auth_anon_key: env::var("AUTH_ANON_KEY").context("AUTH_ANON_KEY is required")?,
            auth_service_key: env_opt("AUTH_SERVICE_KEY"),
        };

        config.validate()?;
        Ok(config)
    }

    /// Fail fast on combinations that would only surface at request time.
    pub fn validate(&self) -> Result<()> {
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    bail!("S3_BUCKET is required when STORAGE_BACKEND=s3");
                }
                if self.s3_region.is_none() {
                    bail!("S3_REGION or AWS_REGION is required when STORAGE_BACKEND=s3");
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() || self.local_storage_base_url.is_none() {
                    bail!(
                        "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL are required when STORAGE_BACKEND=local"
                    );
                }
            }
        }
        if self.auth_service_key.is_none() {
            tracing::warn!(
                "AUTH_SERVICE_KEY not configured; user invites are disabled and emails will be hidden"
            );
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            server_port: 3000,
            environment: "development".to_string(),
            cors_origins: vec![],
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECS,
            database_url: "postgres://localhost/sitelog".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 5,
            storage_backend: StorageBackend::Local,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: Some("/tmp/sitelog".to_string()),
            local_storage_base_url: Some("http://localhost:3000/storage".to_string()),
            auth_url: "http://localhost:9999".to_string(),
            auth_anon_key: "anon".to_string(),
            auth_service_key: None,
        }
    }

    #[test]
    fn test_storage_backend_parse() {
        assert_eq!("s3".parse::<StorageBackend>().unwrap(), StorageBackend::S3);
        assert_eq!(
            "LOCAL".parse::<StorageBackend>().unwrap(),
            StorageBackend::Local
        );
        assert!("nfs".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn test_validate_rejects_s3_without_bucket() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_local_backend() {
        let config = base_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_is_production() {
        let mut config = base_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
    }
}
