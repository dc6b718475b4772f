//! Read-only actions on the trading diamond.

use alloy::dyn_abi::{DynSolValue, FunctionExt, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::{Address, U256};

use crate::actions::views::{PartyAStats, QuoteView};
use crate::blockchain::client::ChainClient;
use crate::blockchain::types::{ActionError, ActionResult};
use crate::config::ContractsConfig;
use crate::contracts::descriptor::InterfaceDescriptor;
use crate::contracts::diamond::{
    forceCloseGapRatioCall, isSuspendedCall, partyAStatsCall, verify_views, GET_QUOTE_SIGNATURE,
};

/// Client for the diamond's view functions. Needs no signing key.
#[derive(Debug, Clone)]
pub struct DiamondReader {
    client: ChainClient,
    diamond: Address,
    get_quote: Function,
}

impl DiamondReader {
    /// Bind the diamond at `DIAMOND_ADDRESS`, checking `descriptor` declares
    /// every view this reader calls.
    pub fn new(
        client: ChainClient,
        contracts: &ContractsConfig,
        descriptor: &InterfaceDescriptor,
    ) -> ActionResult<Self> {
        let diamond = contracts.diamond()?;
        verify_views(descriptor)?;
        let get_quote = descriptor.function(GET_QUOTE_SIGNATURE)?.clone();
        Ok(Self {
            client,
            diamond,
            get_quote,
        })
    }

    pub fn address(&self) -> Address {
        self.diamond
    }

    pub async fn force_close_gap_ratio(&self, symbol_id: U256) -> ActionResult<U256> {
        self.client
            .call(self.diamond, &forceCloseGapRatioCall { symbolId: symbol_id })
            .await
    }

    pub async fn is_suspended(&self, user: Address) -> ActionResult<bool> {
        self.client
            .call(self.diamond, &isSuspendedCall { user })
            .await
    }

    /// Fetch a quote. The output is decoded against the descriptor's
    /// declared `Quote` layout.
    pub async fn get_quote(&self, quote_id: U256) -> ActionResult<QuoteView> {
        let input = self
            .get_quote
            .abi_encode_input(&[DynSolValue::Uint(quote_id, 256)])
            .map_err(|e| ActionError::EncodeFailure {
                function: GET_QUOTE_SIGNATURE,
                reason: e.to_string(),
            })?;

        let output = self
            .client
            .call_raw(self.diamond, input.into(), GET_QUOTE_SIGNATURE)
            .await?;

        let decode_failure = |reason: String| ActionError::DecodeFailure {
            function: GET_QUOTE_SIGNATURE,
            reason,
        };
        let values = self
            .get_quote
            .abi_decode_output(&output)
            .map_err(|e| decode_failure(e.to_string()))?;
        let quote = values
            .first()
            .ok_or_else(|| decode_failure("no return value declared".to_string()))?;

        QuoteView::from_abi(quote).map_err(decode_failure)
    }

    pub async fn party_a_stats(&self, party_a: Address) -> ActionResult<PartyAStats> {
        let stats = self
            .client
            .call(self.diamond, &partyAStatsCall { partyA: party_a })
            .await?;
        Ok(stats.into())
    }
}
