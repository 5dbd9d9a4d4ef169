//! Wallet error types.

use thiserror::Error;

/// Wallet errors
#[derive(Debug, Error)]
pub enum WalletError {
    /// Transport or decoding failure talking to the wallet API
    #[error("Wallet API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The wallet API answered with a non-success status
    #[error("Wallet API rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Invalid amount (must be positive)
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),

    /// Wallet API base URL could not be used
    #[error("Invalid wallet API URL: {0}")]
    InvalidUrl(String),
}

impl WalletError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Transport errors are sanitized so URLs and tokens never reach the
    /// caller; remote rejection bodies are dropped for server-side failures.
    pub fn client_message(&self) -> String {
        match self {
            WalletError::Http(_) | WalletError::InvalidUrl(_) => {
                "Wallet service unavailable".to_string()
            }
            WalletError::Rejected { status, .. } if *status >= 500 => {
                "Wallet service unavailable".to_string()
            }
            WalletError::Rejected { message, .. } => message.clone(),
            WalletError::InvalidAmount(_) => self.to_string(),
        }
    }
}

/// Result type for wallet operations
pub type WalletResult<T> = Result<T, WalletError>;
