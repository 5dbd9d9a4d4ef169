//! HTTP client for the remote wallet API.

use super::{
    errors::{WalletError, WalletResult},
    models::{CashOutReceipt, CashOutRequest},
};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Seam for moving prize money into a winner's wallet
#[async_trait]
pub trait CashOutGateway: Send + Sync {
    /// Credit `request.amount` to `request.user_id`
    async fn cash_out(&self, request: &CashOutRequest) -> WalletResult<CashOutReceipt>;
}

/// Wallet API connection settings
#[derive(Debug, Clone)]
pub struct WalletClientConfig {
    /// Base URL of the wallet service
    pub base_url: String,

    /// Bearer token sent with every request
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl WalletClientConfig {
    /// Configuration with no API key and a 10 second timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

/// Wallet API client
#[derive(Clone)]
pub struct HttpWalletClient {
    base_url: Url,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpWalletClient {
    /// Create a new wallet client
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if the base URL does not parse, or `Http` if the
    /// underlying client cannot be built.
    pub fn new(config: WalletClientConfig) -> WalletResult<Self> {
        // Url::join drops the last path segment unless it ends with a slash
        let mut raw = config.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw)
            .map_err(|e| WalletError::InvalidUrl(format!("{}: {e}", config.base_url)))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key: config.api_key,
            client,
        })
    }

    /// Full URL of the cash-out endpoint
    pub fn cash_out_url(&self) -> WalletResult<Url> {
        self.base_url
            .join("api/wallet/cash-out")
            .map_err(|e| WalletError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl CashOutGateway for HttpWalletClient {
    async fn cash_out(&self, request: &CashOutRequest) -> WalletResult<CashOutReceipt> {
        if request.amount <= 0 {
            return Err(WalletError::InvalidAmount(request.amount));
        }

        let mut builder = self
            .client
            .post(self.cash_out_url()?)
            .header("Idempotency-Key", request.idempotency_key.as_str())
            .json(request);

        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            log::warn!(
                "Cash-out for {} rejected with {}: {}",
                request.user_id,
                status,
                message
            );
            return Err(WalletError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let receipt: CashOutReceipt = response.json().await?;
        log::info!(
            "Cashed out {} to {} (transaction {})",
            receipt.amount,
            receipt.user_id,
            receipt.transaction_id
        );

        Ok(receipt)
    }
}
