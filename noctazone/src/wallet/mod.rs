//! Wallet module for paying out tournament prizes.
//!
//! Balances live in a remote wallet service. This module provides:
//! - The [`CashOutGateway`] seam the tournament manager pays winners through
//! - An HTTP implementation, [`HttpWalletClient`]
//! - Deterministic idempotency keys so a repeated claim cannot pay twice
//!
//! ## Example
//!
//! ```no_run
//! use noctazone::wallet::{CashOutGateway, CashOutRequest, HttpWalletClient, WalletClientConfig};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpWalletClient::new(WalletClientConfig::new("https://wallet.example.com"))?;
//!
//!     let request = CashOutRequest::prize(Uuid::new_v4(), Uuid::new_v4(), 2500);
//!     let receipt = client.cash_out(&request).await?;
//!     println!("Paid {} (balance now {})", receipt.amount, receipt.balance_after);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod errors;
pub mod models;

pub use client::{CashOutGateway, HttpWalletClient, WalletClientConfig};
pub use errors::{WalletError, WalletResult};
pub use models::{CashOutReceipt, CashOutRequest};
