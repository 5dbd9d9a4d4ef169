//! CLI configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use noctazone::db::DatabaseConfig;
use noctazone::db::config::parse_env_or;
use noctazone::tournament::DEFAULT_MIN_PARTICIPANTS;
use noctazone::wallet::WalletClientConfig;

/// Wallet API used when `WALLET_API_URL` is unset
const DEFAULT_WALLET_API_URL: &str = "http://127.0.0.1:8081";

/// Complete CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Database configuration
    pub database: DatabaseConfig,
    /// Wallet API configuration
    pub wallet: WalletClientConfig,
    /// Smallest field a schedule is generated for
    pub min_participants: usize,
}

impl CliConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `database_url_override` - Optional database URL override (from CLI args)
    /// * `wallet_url_override` - Optional wallet API URL override (from CLI args)
    pub fn from_env(
        database_url_override: Option<String>,
        wallet_url_override: Option<String>,
    ) -> Self {
        let mut database = DatabaseConfig::from_env();
        if let Some(url) = database_url_override {
            database.database_url = url;
        }

        let base_url = wallet_url_override
            .or_else(|| std::env::var("WALLET_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_WALLET_API_URL.to_string());

        let wallet = WalletClientConfig {
            base_url,
            api_key: std::env::var("WALLET_API_KEY").ok().filter(|k| !k.is_empty()),
            timeout_secs: parse_env_or("WALLET_TIMEOUT_SECS", 10),
        };

        Self {
            database,
            wallet,
            min_participants: parse_env_or("TOURNAMENT_MIN_PARTICIPANTS", DEFAULT_MIN_PARTICIPANTS),
        }
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_participants < 2 {
            return Err(ConfigError::Invalid {
                var: "TOURNAMENT_MIN_PARTICIPANTS".to_string(),
                reason: "Must be at least 2".to_string(),
            });
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.database.max_connections
                ),
            });
        }

        if !self.wallet.base_url.starts_with("http://") && !self.wallet.base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                var: "WALLET_API_URL".to_string(),
                reason: format!("Must be an http(s) URL, got {}", self.wallet.base_url),
            });
        }

        if self.wallet.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "WALLET_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}
