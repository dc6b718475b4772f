//! Chain-facing types and error definitions.

use alloy::primitives::TxHash;
use alloy::rpc::types::TransactionReceipt;
use alloy::transports::TransportError;
use thiserror::Error;

/// JSON-RPC error code nodes use for reverted `eth_call` / `eth_estimateGas`.
const EXECUTION_REVERTED_CODE: i64 = 3;

/// Errors that can occur while running a contract action.
#[derive(Debug, Error)]
pub enum ActionError {
    /// A required setting was never provided.
    #[error("Missing configuration value: {0}")]
    ConfigMissing(&'static str),

    /// A setting was provided but cannot be used (bad address, bad URL).
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// Interface descriptor could not be read or parsed.
    #[error("Failed to load interface descriptor for {contract} from {path}: {reason}")]
    InterfaceLoad {
        contract: String,
        path: String,
        reason: String,
    },

    /// A bound function is not declared by the loaded interface descriptor.
    #[error("Interface descriptor for {contract} does not declare {signature}")]
    InterfaceMismatch { contract: String, signature: String },

    /// RPC connection or request failed.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The call or transaction reverted on-chain.
    #[error("Contract reverted: {0}")]
    ContractRevert(String),

    /// Returned data did not match the declared return shape.
    #[error("Failed to decode {function} output: {reason}")]
    DecodeFailure {
        function: &'static str,
        reason: String,
    },

    /// Arguments could not be encoded for the declared input types.
    #[error("Failed to encode {function} input: {reason}")]
    EncodeFailure {
        function: &'static str,
        reason: String,
    },

    /// Invalid private key or signing failure.
    #[error("Signing error: {0}")]
    Signing(String),

    /// Gas price exceeded maximum allowed.
    #[error("Gas price {current_wei} wei exceeds maximum {max_gwei} gwei")]
    GasPriceTooHigh { current_wei: u128, max_gwei: u64 },
}

impl ActionError {
    /// Classify an RPC error into a revert or a transport failure.
    pub fn from_rpc(err: TransportError) -> Self {
        if let Some(payload) = err.as_error_resp() {
            if payload.code == EXECUTION_REVERTED_CODE || payload.message.contains("revert") {
                return ActionError::ContractRevert(payload.message.to_string());
            }
        }
        ActionError::TransportFailure(err.to_string())
    }
}

/// Result type for contract actions.
pub type ActionResult<T> = Result<T, ActionError>;

/// A transaction that was submitted and confirmed.
#[derive(Debug, Clone)]
pub struct SubmittedTransaction {
    pub tx_hash: TxHash,
    pub receipt: TransactionReceipt,
}

/// How the gas limit of a transaction is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasLimit {
    /// Use the given limit as-is.
    Fixed(u64),
    /// Ask the node via `eth_estimateGas`.
    Estimate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::rpc::json_rpc::{ErrorPayload, RpcError};

    #[test]
    fn test_error_display() {
        let err = ActionError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = ActionError::GasPriceTooHigh {
            current_wei: 600_000_000_000,
            max_gwei: 500,
        };
        assert_eq!(
            err.to_string(),
            "Gas price 600000000000 wei exceeds maximum 500 gwei"
        );

        let err = ActionError::ConfigMissing("RPC_URL");
        assert_eq!(err.to_string(), "Missing configuration value: RPC_URL");
    }

    #[test]
    fn test_revert_classification() {
        let err = RpcError::ErrorResp(ErrorPayload {
            code: 3,
            message: "execution reverted: LibAccess: Access not allowed".into(),
            data: None,
        });
        assert!(matches!(ActionError::from_rpc(err), ActionError::ContractRevert(_)));

        let err = RpcError::ErrorResp(ErrorPayload {
            code: -32000,
            message: "insufficient funds for gas * price + value".into(),
            data: None,
        });
        assert!(matches!(ActionError::from_rpc(err), ActionError::TransportFailure(_)));
    }
}
