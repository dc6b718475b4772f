//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to one JSON-RPC endpoint for the lifetime of a run
//! - Perform read-only contract calls and decode their output
//! - Query nonce, gas price and chain id for transaction building
//! - Submit signed transactions and wait for their receipt

use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use alloy::transports::TransportResult;
use std::future::IntoFuture;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{ActionError, ActionResult, SubmittedTransaction};
use crate::config::schema::RPC_URL_ENV;
use crate::config::NetworkConfig;

/// JSON-RPC client shared by the wrappers of a single run.
#[derive(Clone)]
pub struct ChainClient {
    provider: DynProvider,
    config: NetworkConfig,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Connect to the configured RPC endpoint over HTTP.
    ///
    /// No request is sent here; an unreachable node surfaces on first use.
    pub fn connect(config: &NetworkConfig) -> ActionResult<Self> {
        let rpc_url = config
            .rpc_url
            .as_deref()
            .ok_or(ActionError::ConfigMissing(RPC_URL_ENV))?;
        let url: url::Url = rpc_url.parse().map_err(|e| ActionError::InvalidConfig {
            field: RPC_URL_ENV,
            reason: format!("Invalid RPC URL '{}': {}", rpc_url, e),
        })?;

        // Nonce, gas and chain id are filled explicitly by the transaction builder.
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_http(url)
            .erased();

        tracing::info!(
            rpc_url = %rpc_url,
            timeout_secs = config.rpc_timeout_secs,
            "Blockchain client initialized"
        );

        Ok(Self::from_provider(provider, config))
    }

    /// Wrap an existing provider (used with mocked transports).
    pub fn from_provider(provider: DynProvider, config: &NetworkConfig) -> Self {
        Self {
            provider,
            config: config.clone(),
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
        }
    }

    /// Run one RPC future under the configured timeout.
    async fn rpc<T, F>(&self, method: &'static str, fut: F) -> ActionResult<T>
    where
        F: IntoFuture<Output = TransportResult<T>>,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(ActionError::from_rpc(e))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(ActionError::Timeout(self.config.rpc_timeout_secs))
            }
        }
    }

    /// Chain id for signing: the configured one, or the node's.
    pub async fn chain_id(&self) -> ActionResult<u64> {
        if let Some(id) = self.config.chain_id {
            return Ok(id);
        }
        self.rpc("eth_chainId", self.provider.get_chain_id()).await
    }

    /// Transaction count of `address` including pending transactions.
    pub async fn pending_nonce(&self, address: Address) -> ActionResult<u64> {
        self.rpc(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address).pending(),
        )
        .await
    }

    /// Current gas price in wei.
    pub async fn gas_price(&self) -> ActionResult<u128> {
        self.rpc("eth_gasPrice", self.provider.get_gas_price()).await
    }

    /// Estimate the gas a transaction request needs.
    pub async fn estimate_gas(&self, tx: TransactionRequest) -> ActionResult<u64> {
        self.rpc("eth_estimateGas", self.provider.estimate_gas(tx)).await
    }

    /// Perform a read-only call with pre-encoded input and return the raw output.
    pub async fn call_raw(&self, to: Address, input: Bytes, function: &str) -> ActionResult<Bytes> {
        let tx = TransactionRequest::default().with_to(to).with_input(input);

        let output = self.rpc("eth_call", self.provider.call(tx)).await?;

        tracing::debug!(
            to = %to,
            function,
            output_len = output.len(),
            "Call returned"
        );

        Ok(output)
    }

    /// Perform a read-only call and decode the declared return value.
    pub async fn call<C: SolCall>(&self, to: Address, call: &C) -> ActionResult<C::Return> {
        let output = self
            .call_raw(to, call.abi_encode().into(), C::SIGNATURE)
            .await?;

        C::abi_decode_returns(&output).map_err(|e| ActionError::DecodeFailure {
            function: C::SIGNATURE,
            reason: e.to_string(),
        })
    }

    /// Submit a signed transaction and block until its receipt is available.
    ///
    /// A receipt with a failed status is reported as [`ActionError::ContractRevert`].
    pub async fn submit(&self, envelope: &TxEnvelope) -> ActionResult<SubmittedTransaction> {
        let encoded = envelope.encoded_2718();
        let pending = self
            .rpc(
                "eth_sendRawTransaction",
                self.provider.send_raw_transaction(&encoded),
            )
            .await?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "Transaction sent");

        let receipt = pending
            .with_required_confirmations(self.config.confirmations)
            .with_timeout(self.config.confirmation_timeout_secs.map(Duration::from_secs))
            .get_receipt()
            .await
            .map_err(|e| ActionError::TransportFailure(format!("Waiting for {}: {}", tx_hash, e)))?;

        tracing::info!(
            tx_hash = %tx_hash,
            block_number = ?receipt.block_number,
            gas_used = receipt.gas_used,
            status = receipt.status(),
            "Transaction confirmed"
        );

        if !receipt.status() {
            return Err(ActionError::ContractRevert(format!(
                "transaction {} reverted",
                tx_hash
            )));
        }

        Ok(SubmittedTransaction { tx_hash, receipt })
    }

    /// Get the configuration.
    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}
