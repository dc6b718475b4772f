//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! AppConfig (RPC URL, private key)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts, calls, submission)
//!     → transaction.rs (nonce, gas, sign, submit, wait for receipt)
//! ```
//!
//! # Security Constraints
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod address;
pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use transaction::TxBuilder;
pub use types::{ActionError, ActionResult, GasLimit, SubmittedTransaction};
pub use wallet::Wallet;
