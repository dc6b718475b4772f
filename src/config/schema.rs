//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from an optional TOML
//! file. Values that identify the deployment (RPC endpoint, key, contract
//! addresses) are usually supplied through the environment instead; see
//! [`AppConfig::apply_env`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::blockchain::address::parse_address;
use crate::blockchain::types::{ActionError, ActionResult};
use crate::config::validation::ValidationError;
use alloy::primitives::Address;

pub const RPC_URL_ENV: &str = "RPC_URL";
pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";
pub const DIAMOND_ADDRESS_ENV: &str = "DIAMOND_ADDRESS";
pub const MULTIACCOUNT_ADDRESS_ENV: &str = "MULTIACCOUNT_ADDRESS";
pub const SUB_ACCOUNT_ADDRESS_ENV: &str = "SUB_ACCOUNT_ADDRESS";
pub const CHAIN_ID_ENV: &str = "CHAIN_ID";

/// Root configuration for a run.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Node endpoint and RPC behaviour.
    pub network: NetworkConfig,

    /// Contract addresses.
    pub contracts: ContractsConfig,

    /// Signing identity.
    pub signer: SignerConfig,

    /// Gas pricing and limits for write actions.
    pub gas: GasConfig,

    /// Locations of the interface descriptors.
    pub interfaces: InterfaceConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Overlay values from a key lookup (normally the process environment).
    ///
    /// Keys that resolve to `None` or an empty string leave the current
    /// value untouched. Values that cannot be parsed are returned as
    /// validation errors.
    pub fn apply_env<F>(&mut self, lookup: F) -> Vec<ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut errors = Vec::new();

        if let Some(v) = get(RPC_URL_ENV) {
            self.network.rpc_url = Some(v);
        }
        if let Some(v) = get(CHAIN_ID_ENV) {
            match v.trim().parse() {
                Ok(id) => self.network.chain_id = Some(id),
                Err(_) => errors.push(ValidationError::new(
                    "network.chain_id",
                    format!("{}='{}' is not a chain id", CHAIN_ID_ENV, v),
                )),
            }
        }
        if let Some(v) = get(PRIVATE_KEY_ENV) {
            self.signer.private_key = Some(v);
        }
        if let Some(v) = get(DIAMOND_ADDRESS_ENV) {
            self.contracts.diamond_address = Some(v);
        }
        if let Some(v) = get(MULTIACCOUNT_ADDRESS_ENV) {
            self.contracts.multiaccount_address = Some(v);
        }
        if let Some(v) = get(SUB_ACCOUNT_ADDRESS_ENV) {
            self.contracts.sub_account_address = Some(v);
        }

        errors
    }

    pub fn require_rpc_url(&self) -> ActionResult<&str> {
        self.network
            .rpc_url
            .as_deref()
            .ok_or(ActionError::ConfigMissing(RPC_URL_ENV))
    }

    pub fn require_private_key(&self) -> ActionResult<&str> {
        self.signer
            .private_key
            .as_deref()
            .ok_or(ActionError::ConfigMissing(PRIVATE_KEY_ENV))
    }
}

/// Node endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: Option<String>,

    /// Chain ID used for EIP-155 signing. Queried from the node when unset.
    pub chain_id: Option<u64>,

    /// Timeout applied to each individual RPC request, in seconds.
    pub rpc_timeout_secs: u64,

    /// Block confirmations to wait for after submitting a transaction.
    pub confirmations: u64,

    /// Upper bound on the receipt wait. `None` waits indefinitely.
    pub confirmation_timeout_secs: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            chain_id: None,
            rpc_timeout_secs: 30,
            confirmations: 1,
            confirmation_timeout_secs: None,
        }
    }
}

/// Contract addresses. Any letter case is accepted.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractsConfig {
    /// Trading diamond.
    pub diamond_address: Option<String>,

    /// Multi-account proxy.
    pub multiaccount_address: Option<String>,

    /// Default sub-account that forwarded calls act on behalf of.
    pub sub_account_address: Option<String>,
}

impl ContractsConfig {
    pub fn diamond(&self) -> ActionResult<Address> {
        required_address(&self.diamond_address, DIAMOND_ADDRESS_ENV)
    }

    pub fn multiaccount(&self) -> ActionResult<Address> {
        required_address(&self.multiaccount_address, MULTIACCOUNT_ADDRESS_ENV)
    }

    pub fn sub_account(&self) -> ActionResult<Address> {
        required_address(&self.sub_account_address, SUB_ACCOUNT_ADDRESS_ENV)
    }
}

fn required_address(value: &Option<String>, field: &'static str) -> ActionResult<Address> {
    let raw = value.as_deref().ok_or(ActionError::ConfigMissing(field))?;
    parse_address(field, raw)
}

/// Signing identity. The key is skipped on serialization and redacted in `Debug`.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SignerConfig {
    #[serde(skip_serializing)]
    pub private_key: Option<String>,
}

impl std::fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConfig")
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Gas settings for write actions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GasConfig {
    /// Multiplier applied to the network gas price (1.0 = as reported).
    pub price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: Option<u64>,

    /// Use this gas price instead of asking the node.
    pub fixed_gas_price_gwei: Option<u64>,

    /// Gas limit for `withdrawFromAccount`.
    pub withdraw_gas_limit: u64,

    /// Gas limit for calls forwarded through the multi-account proxy.
    pub forward_gas_limit: u64,

    /// Estimate gas limits with `eth_estimateGas` instead of the fixed limits.
    pub estimate_gas_limit: bool,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            price_multiplier: 1.0,
            max_gas_price_gwei: None,
            fixed_gas_price_gwei: None,
            withdraw_gas_limit: 300_000,
            forward_gas_limit: 400_000,
            estimate_gas_limit: false,
        }
    }
}

/// Interface descriptor locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InterfaceConfig {
    /// JSON ABI of the trading diamond.
    pub diamond_abi: PathBuf,

    /// JSON ABI of the multi-account proxy.
    pub multiaccount_abi: PathBuf,
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            diamond_abi: PathBuf::from("abi/symmio.json"),
            multiaccount_abi: PathBuf::from("abi/MultiAccount.json"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
