//! Actions on the multi-account proxy.
//!
//! Write actions are signed by the controlling wallet and target the proxy.
//! Calls meant for the diamond are encoded locally and relayed through the
//! proxy's `_call(account, bytes[])`, which executes them as `account`.

use alloy::consensus::TxEnvelope;
use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;

use crate::actions::params::CloseRequest;
use crate::actions::views::AccountEntry;
use crate::blockchain::client::ChainClient;
use crate::blockchain::transaction::TxBuilder;
use crate::blockchain::types::{ActionError, ActionResult, GasLimit, SubmittedTransaction};
use crate::blockchain::wallet::Wallet;
use crate::config::schema::PRIVATE_KEY_ENV;
use crate::config::{AppConfig, GasConfig};
use crate::contracts::descriptor::InterfaceDescriptor;
use crate::contracts::diamond::{self, requestToClosePositionCall};
use crate::contracts::multiaccount::{self, _callCall, getAccountsCall, withdrawFromAccountCall};

/// Encode a diamond `requestToClosePosition` call without sending it.
pub fn encode_close_request(request: &CloseRequest) -> Bytes {
    requestToClosePositionCall {
        quoteId: request.quote_id,
        closePrice: request.close_price,
        quantityToClose: request.quantity_to_close,
        orderType: request.order_type.as_u8(),
        deadline: request.deadline,
    }
    .abi_encode()
    .into()
}

/// Encode a proxy `_call` relaying `payloads` on behalf of `account`.
pub fn forward_payload(account: Address, payloads: Vec<Bytes>) -> Bytes {
    _callCall {
        account,
        _callDatas: payloads,
    }
    .abi_encode()
    .into()
}

/// Client for the multi-account proxy, signing with the configured key.
#[derive(Debug, Clone)]
pub struct MultiAccountClient {
    client: ChainClient,
    wallet: Option<Wallet>,
    gas: GasConfig,
    multiaccount: Address,
}

impl MultiAccountClient {
    /// Bind the proxy at `MULTIACCOUNT_ADDRESS`.
    ///
    /// `multiaccount_abi` must declare the proxy functions used here and
    /// `diamond_abi` the diamond functions relayed through it. The wallet is
    /// only required once a signed action or the default user is needed.
    pub fn new(
        client: ChainClient,
        config: &AppConfig,
        multiaccount_abi: &InterfaceDescriptor,
        diamond_abi: &InterfaceDescriptor,
    ) -> ActionResult<Self> {
        let multiaccount = config.contracts.multiaccount()?;
        multiaccount::verify(multiaccount_abi)?;
        diamond::verify_actions(diamond_abi)?;

        let wallet = config
            .signer
            .private_key
            .as_deref()
            .map(Wallet::from_private_key)
            .transpose()?;

        Ok(Self {
            client,
            wallet,
            gas: config.gas.clone(),
            multiaccount,
        })
    }

    /// The signing wallet.
    pub fn wallet(&self) -> ActionResult<&Wallet> {
        self.wallet
            .as_ref()
            .ok_or(ActionError::ConfigMissing(PRIVATE_KEY_ENV))
    }

    pub fn address(&self) -> Address {
        self.multiaccount
    }

    fn gas_limit(&self, fixed: u64) -> GasLimit {
        if self.gas.estimate_gas_limit {
            GasLimit::Estimate
        } else {
            GasLimit::Fixed(fixed)
        }
    }

    /// Sub-accounts of `user`, paginated by `start` and `size`.
    pub async fn get_accounts(&self, user: Address, start: U256, size: U256) -> ActionResult<Vec<AccountEntry>> {
        let accounts = self
            .client
            .call(self.multiaccount, &getAccountsCall { user, start, size })
            .await?;
        Ok(accounts.into_iter().map(AccountEntry::from).collect())
    }

    /// Build and sign a `withdrawFromAccount` transaction without sending it.
    pub async fn prepare_withdraw_from_account(&self, account: Address, amount: U256) -> ActionResult<TxEnvelope> {
        let input = withdrawFromAccountCall { account, amount }.abi_encode();
        let limit = self.gas_limit(self.gas.withdraw_gas_limit);
        TxBuilder::new(&self.client, self.wallet()?, &self.gas)
            .prepare(self.multiaccount, input.into(), limit)
            .await
    }

    /// Withdraw `amount` from `account` to the controlling wallet.
    pub async fn withdraw_from_account(&self, account: Address, amount: U256) -> ActionResult<SubmittedTransaction> {
        tracing::info!(account = %account, amount = %amount, "Withdrawing from account");
        let envelope = self.prepare_withdraw_from_account(account, amount).await?;
        self.client.submit(&envelope).await
    }

    /// Build and sign the relayed close request without sending it.
    pub async fn prepare_request_to_close_position(
        &self,
        sub_account: Address,
        request: &CloseRequest,
    ) -> ActionResult<TxEnvelope> {
        let inner = encode_close_request(request);
        let input = forward_payload(sub_account, vec![inner]);
        let limit = self.gas_limit(self.gas.forward_gas_limit);
        TxBuilder::new(&self.client, self.wallet()?, &self.gas)
            .prepare(self.multiaccount, input, limit)
            .await
    }

    /// Request to close a position of `sub_account`, relayed through the proxy.
    pub async fn request_to_close_position_via_multiaccount(
        &self,
        sub_account: Address,
        request: &CloseRequest,
    ) -> ActionResult<SubmittedTransaction> {
        tracing::info!(
            sub_account = %sub_account,
            quote_id = %request.quote_id,
            order_type = ?request.order_type,
            "Requesting to close position"
        );
        let envelope = self.prepare_request_to_close_position(sub_account, request).await?;
        self.client.submit(&envelope).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::params::OrderType;
    use alloy::primitives::address;

    fn request() -> CloseRequest {
        CloseRequest {
            quote_id: U256::from(1),
            close_price: U256::from(2000u64) * U256::from(10u64).pow(U256::from(18)),
            quantity_to_close: U256::from(10u64).pow(U256::from(18)),
            order_type: OrderType::Market,
            deadline: U256::from(1_700_000_000u64),
        }
    }

    #[test]
    fn test_encode_close_request_selector_and_args() {
        let encoded = encode_close_request(&request());
        assert_eq!(&encoded[..4], requestToClosePositionCall::SELECTOR.as_slice());
        // selector + five static words
        assert_eq!(encoded.len(), 4 + 5 * 32);

        let decoded = requestToClosePositionCall::abi_decode(&encoded).unwrap();
        assert_eq!(decoded.quoteId, U256::from(1));
        assert_eq!(decoded.orderType, 1);
    }

    #[test]
    fn test_forward_payload_embeds_inner_call() {
        let sub_account = address!("980b2CaEF214358cF9e7566372c7c2b9D7c2Da83");
        let inner = encode_close_request(&request());
        let outer = forward_payload(sub_account, vec![inner.clone()]);

        let decoded = _callCall::abi_decode(&outer).unwrap();
        assert_eq!(decoded.account, sub_account);
        assert_eq!(decoded._callDatas, vec![inner]);
    }
}
