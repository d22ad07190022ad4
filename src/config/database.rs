//! Storage settings for users, plans and the transaction ledger.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on pooled PostgreSQL connections.
const MAX_POOL_CONNECTIONS: u32 = 100;

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process-local store; data is lost on restart.
    Memory,
}

/// Storage configuration (`SAVINGS_GATEWAY__DATABASE__*`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// `postgres://` or `postgresql://` URL. Ignored by the memory backend.
    #[serde(default)]
    pub url: String,

    /// Connection pool sizing and lifetimes (`DATABASE__POOL__*`).
    #[serde(default)]
    pub pool: PoolConfig,

    /// Apply the embedded schema migrations before serving.
    #[serde(default)]
    pub run_migrations: bool,
}

/// PostgreSQL pool tuning. Durations are whole seconds.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    #[serde(default = "PoolConfig::default_min")]
    pub min_connections: u32,

    #[serde(default = "PoolConfig::default_max")]
    pub max_connections: u32,

    /// How long a request waits for a free connection.
    #[serde(default = "PoolConfig::default_acquire")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "PoolConfig::default_idle")]
    pub idle_timeout_secs: u64,

    #[serde(default = "PoolConfig::default_lifetime")]
    pub max_lifetime_secs: u64,
}

impl PoolConfig {
    fn default_min() -> u32 {
        1
    }

    fn default_max() -> u32 {
        10
    }

    fn default_acquire() -> u64 {
        30
    }

    fn default_idle() -> u64 {
        600
    }

    fn default_lifetime() -> u64 {
        1800
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > MAX_POOL_CONNECTIONS {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: Self::default_min(),
            max_connections: Self::default_max(),
            acquire_timeout_secs: Self::default_acquire(),
            idle_timeout_secs: Self::default_idle(),
            max_lifetime_secs: Self::default_lifetime(),
        }
    }
}

impl DatabaseConfig {
    /// True when a connection URL has been supplied.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    /// Checks the PostgreSQL settings. The memory backend has nothing to check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.backend {
            StorageBackend::Memory => Ok(()),
            StorageBackend::Postgres => {
                if !self.is_configured() {
                    return Err(ValidationError::MissingRequired("DATABASE__URL"));
                }
                let scheme_ok = ["postgres://", "postgresql://"]
                    .iter()
                    .any(|scheme| self.url.starts_with(scheme));
                if !scheme_ok {
                    return Err(ValidationError::InvalidDatabaseUrl);
                }
                self.pool.validate()
            }
        }
    }
}
