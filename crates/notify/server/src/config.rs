use std::net::{AddrParseError, SocketAddr};

use notify_fcm::{DEFAULT_API_BASE, ServiceAccount};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable {0}")]
    Missing(&'static str),
    #[error("Failed to parse FIREBASE_SERVICE_ACCOUNT: {0}")]
    ServiceAccount(#[from] serde_json::Error),
    #[error("Invalid BIND_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

/// Where device tokens are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Supabase REST API with the service-role key.
    Supabase { url: String, service_role_key: String },
    /// Direct Postgres connection.
    Postgres { database_url: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub service_account: ServiceAccount,
    pub store: StoreConfig,
    pub fcm_api_base: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let require = |key: &'static str| var(key).ok_or(ConfigError::Missing(key));

        let service_account = ServiceAccount::from_json(&require("FIREBASE_SERVICE_ACCOUNT")?)?;

        let store = match var("DATABASE_URL") {
            Some(database_url) => StoreConfig::Postgres { database_url },
            None => StoreConfig::Supabase {
                url: require("SUPABASE_URL")?,
                service_role_key: require("SUPABASE_SERVICE_ROLE_KEY")?,
            },
        };

        let fcm_api_base = var("FCM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::BindAddr {
                value: bind_addr.clone(),
                source,
            })?;

        Ok(Self {
            service_account,
            store,
            fcm_api_base,
            bind_addr,
        })
    }
}
