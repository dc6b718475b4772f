//! Transaction building, signing and submission.
//!
//! # Responsibilities
//! - Fetch the pending nonce and current gas price for every transaction
//! - Apply the configured gas limit policy
//! - Sign locally and hand the envelope to the client for submission
//!
//! Each call is independent. Two builders sharing a signer and running at
//! the same time can be assigned the same nonce.

use alloy::consensus::TxEnvelope;
use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes, U256};
use alloy::rpc::types::TransactionRequest;

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ActionError, ActionResult, GasLimit, SubmittedTransaction};
use crate::blockchain::wallet::Wallet;
use crate::config::GasConfig;

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Transaction builder for write actions.
pub struct TxBuilder<'a> {
    client: &'a ChainClient,
    wallet: &'a Wallet,
    gas: &'a GasConfig,
}

impl<'a> TxBuilder<'a> {
    /// Create a new transaction builder.
    pub fn new(client: &'a ChainClient, wallet: &'a Wallet, gas: &'a GasConfig) -> Self {
        Self { client, wallet, gas }
    }

    /// Gas price to use: fixed from config, or the network price times the
    /// configured multiplier, capped by `max_gas_price_gwei`.
    pub async fn gas_price(&self) -> ActionResult<u128> {
        if let Some(fixed_gwei) = self.gas.fixed_gas_price_gwei {
            return Ok(fixed_gwei as u128 * WEI_PER_GWEI);
        }

        let network_price = self.client.gas_price().await?;
        let adjusted = (network_price as f64 * self.gas.price_multiplier) as u128;

        if let Some(max_gwei) = self.gas.max_gas_price_gwei {
            if adjusted > max_gwei as u128 * WEI_PER_GWEI {
                return Err(ActionError::GasPriceTooHigh {
                    current_wei: adjusted,
                    max_gwei,
                });
            }
        }

        Ok(adjusted)
    }

    /// Build and sign a transaction calling `to` with `input`.
    ///
    /// The nonce is the sender's pending transaction count at call time.
    pub async fn prepare(&self, to: Address, input: Bytes, gas_limit: GasLimit) -> ActionResult<TxEnvelope> {
        let from = self.wallet.address();
        let nonce = self.client.pending_nonce(from).await?;
        let gas_price = self.gas_price().await?;

        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(to)
            .with_value(U256::ZERO)
            .with_input(input)
            .with_nonce(nonce)
            .with_gas_price(gas_price);

        let gas_limit = match gas_limit {
            GasLimit::Fixed(limit) => limit,
            GasLimit::Estimate => self.client.estimate_gas(request.clone()).await?,
        };
        let chain_id = self.client.chain_id().await?;

        let request = request.with_gas_limit(gas_limit).with_chain_id(chain_id);

        tracing::info!(
            from = %from,
            to = %to,
            nonce,
            gas_price,
            gas_limit,
            chain_id,
            "Transaction built"
        );

        <TransactionRequest as TransactionBuilder<Ethereum>>::build(request, &self.wallet.ethereum_wallet())
            .await
            .map_err(|e| ActionError::Signing(format!("Failed to sign transaction: {}", e)))
    }

    /// Build, sign, submit and wait for the receipt.
    pub async fn send(&self, to: Address, input: Bytes, gas_limit: GasLimit) -> ActionResult<SubmittedTransaction> {
        let envelope = self.prepare(to, input, gas_limit).await?;
        self.client.submit(&envelope).await
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use alloy::consensus::Transaction;
    use alloy::primitives::{address, U128, U64};
    use alloy::providers::{Provider, ProviderBuilder};
    use alloy::transports::mock::Asserter;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn mocked(asserter: &Asserter) -> ChainClient {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased();
        let config = NetworkConfig {
            chain_id: Some(31337),
            ..Default::default()
        };
        ChainClient::from_provider(provider, &config)
    }

    #[tokio::test]
    async fn test_prepare_uses_pending_nonce_and_fixed_limit() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(3));
        asserter.push_success(&U128::from(2 * WEI_PER_GWEI));

        let client = mocked(&asserter);
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let gas = GasConfig::default();
        let builder = TxBuilder::new(&client, &wallet, &gas);

        let to = address!("980b2CaEF214358cF9e7566372c7c2b9D7c2Da83");
        let envelope = builder
            .prepare(to, Bytes::from_static(&[0xde, 0xad]), GasLimit::Fixed(300_000))
            .await
            .unwrap();

        assert_eq!(envelope.nonce(), 3);
        assert_eq!(envelope.gas_limit(), 300_000);
        assert_eq!(envelope.gas_price(), Some(2 * WEI_PER_GWEI));
        assert_eq!(envelope.chain_id(), Some(31337));
        assert_eq!(envelope.to(), Some(to));
        assert_eq!(envelope.input().as_ref(), &[0xde, 0xad]);
    }

    #[tokio::test]
    async fn test_estimated_limit() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(0));
        asserter.push_success(&U128::from(WEI_PER_GWEI));
        asserter.push_success(&U64::from(123_456));

        let client = mocked(&asserter);
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let gas = GasConfig::default();
        let builder = TxBuilder::new(&client, &wallet, &gas);

        let envelope = builder
            .prepare(Address::repeat_byte(0x11), Bytes::new(), GasLimit::Estimate)
            .await
            .unwrap();
        assert_eq!(envelope.gas_limit(), 123_456);
    }

    #[tokio::test]
    async fn test_gas_price_cap() {
        let asserter = Asserter::new();
        asserter.push_success(&U128::from(600 * WEI_PER_GWEI));

        let client = mocked(&asserter);
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let gas = GasConfig {
            max_gas_price_gwei: Some(500),
            ..Default::default()
        };
        let builder = TxBuilder::new(&client, &wallet, &gas);

        let err = builder.gas_price().await.unwrap_err();
        assert!(matches!(
            err,
            ActionError::GasPriceTooHigh {
                current_wei: 600_000_000_000,
                max_gwei: 500
            }
        ));
    }

    #[tokio::test]
    async fn test_gas_price_cap_counts_fractional_gwei() {
        let asserter = Asserter::new();
        asserter.push_success(&U128::from(10 * WEI_PER_GWEI + 900_000_000));
        asserter.push_success(&U128::from(10 * WEI_PER_GWEI));

        let client = mocked(&asserter);
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let gas = GasConfig {
            max_gas_price_gwei: Some(10),
            ..Default::default()
        };
        let builder = TxBuilder::new(&client, &wallet, &gas);

        let err = builder.gas_price().await.unwrap_err();
        assert!(matches!(
            err,
            ActionError::GasPriceTooHigh {
                current_wei: 10_900_000_000,
                max_gwei: 10
            }
        ));
        assert_eq!(builder.gas_price().await.unwrap(), 10 * WEI_PER_GWEI);
    }

    #[tokio::test]
    async fn test_fixed_gas_price_skips_rpc() {
        let asserter = Asserter::new();
        let client = mocked(&asserter);
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let gas = GasConfig {
            fixed_gas_price_gwei: Some(3),
            ..Default::default()
        };
        let builder = TxBuilder::new(&client, &wallet, &gas);

        assert_eq!(builder.gas_price().await.unwrap(), 3 * WEI_PER_GWEI);
    }

    #[tokio::test]
    async fn test_send_failure_is_transport_failure() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(1));
        asserter.push_success(&U128::from(WEI_PER_GWEI));
        asserter.push_failure_msg("nonce too low");

        let client = mocked(&asserter);
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let gas = GasConfig::default();
        let builder = TxBuilder::new(&client, &wallet, &gas);

        let err = builder
            .send(Address::repeat_byte(0x22), Bytes::new(), GasLimit::Fixed(21_000))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::TransportFailure(_)));
    }
}
