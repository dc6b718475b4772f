//! Contract actions.
//!
//! # Data Flow
//! ```text
//! AppConfig
//!     → ActionContext (one ChainClient for the run)
//!     → interface descriptors loaded from disk, checked against bindings
//!     → DiamondReader / MultiAccountClient
//!     → one action method
//!     → ActionOutput (printed by the binary)
//! ```
//!
//! Every action runs once per process. Errors are returned unchanged to the
//! caller, which decides whether to log or abort.

pub mod diamond;
pub mod multiaccount;
pub mod output;
pub mod params;
pub mod views;

use alloy::primitives::{Address, U256};

use crate::blockchain::client::ChainClient;
use crate::blockchain::types::ActionResult;
use crate::config::AppConfig;
use crate::contracts::descriptor::InterfaceDescriptor;
use crate::contracts::{diamond as diamond_abi, multiaccount as multiaccount_abi};

pub use diamond::DiamondReader;
pub use multiaccount::MultiAccountClient;
pub use output::ActionOutput;
pub use params::{CloseRequest, OrderType};

/// Configuration and connection shared by the wrappers of one run.
#[derive(Debug, Clone)]
pub struct ActionContext {
    config: AppConfig,
    client: ChainClient,
}

impl ActionContext {
    /// Connect to the configured RPC endpoint.
    pub fn connect(config: AppConfig) -> ActionResult<Self> {
        let client = ChainClient::connect(&config.network)?;
        Ok(Self::with_client(config, client))
    }

    /// Use an existing client (e.g. one backed by a mocked transport).
    pub fn with_client(config: AppConfig, client: ChainClient) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn diamond_interface(&self) -> ActionResult<InterfaceDescriptor> {
        InterfaceDescriptor::load(diamond_abi::CONTRACT_NAME, &self.config.interfaces.diamond_abi)
    }

    fn multiaccount_interface(&self) -> ActionResult<InterfaceDescriptor> {
        InterfaceDescriptor::load(
            multiaccount_abi::CONTRACT_NAME,
            &self.config.interfaces.multiaccount_abi,
        )
    }

    /// Read-only wrapper for the diamond.
    pub fn diamond_reader(&self) -> ActionResult<DiamondReader> {
        let descriptor = self.diamond_interface()?;
        DiamondReader::new(self.client.clone(), &self.config.contracts, &descriptor)
    }

    /// Signing wrapper for the multi-account proxy.
    pub fn multiaccount_client(&self) -> ActionResult<MultiAccountClient> {
        let multiaccount = self.multiaccount_interface()?;
        let diamond = self.diamond_interface()?;
        MultiAccountClient::new(self.client.clone(), &self.config, &multiaccount, &diamond)
    }
}

/// One contract action, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ForceCloseGapRatio {
        symbol_id: U256,
    },
    IsSuspended {
        user: Address,
    },
    GetQuote {
        quote_id: U256,
    },
    PartyAStats {
        party_a: Address,
    },
    /// `user` defaults to the signing wallet's address.
    GetAccounts {
        user: Option<Address>,
        start: U256,
        size: U256,
    },
    WithdrawFromAccount {
        account: Address,
        amount: U256,
    },
    /// `sub_account` defaults to `SUB_ACCOUNT_ADDRESS`.
    RequestToClosePosition {
        sub_account: Option<Address>,
        request: CloseRequest,
    },
}

impl Action {
    /// Contract function the action invokes.
    pub fn name(&self) -> &'static str {
        match self {
            Action::ForceCloseGapRatio { .. } => "forceCloseGapRatio",
            Action::IsSuspended { .. } => "isSuspended",
            Action::GetQuote { .. } => "getQuote",
            Action::PartyAStats { .. } => "partyAStats",
            Action::GetAccounts { .. } => "getAccounts",
            Action::WithdrawFromAccount { .. } => "withdrawFromAccount",
            Action::RequestToClosePosition { .. } => "requestToClosePosition",
        }
    }

    /// Run the action once.
    pub async fn execute(self, ctx: &ActionContext) -> ActionResult<ActionOutput> {
        tracing::debug!(action = self.name(), "Executing action");

        match self {
            Action::ForceCloseGapRatio { symbol_id } => {
                let ratio = ctx.diamond_reader()?.force_close_gap_ratio(symbol_id).await?;
                Ok(ActionOutput::scalar(ratio))
            }
            Action::IsSuspended { user } => {
                let suspended = ctx.diamond_reader()?.is_suspended(user).await?;
                Ok(ActionOutput::scalar(suspended))
            }
            Action::GetQuote { quote_id } => {
                let quote = ctx.diamond_reader()?.get_quote(quote_id).await?;
                ActionOutput::document(&quote)
            }
            Action::PartyAStats { party_a } => {
                let stats = ctx.diamond_reader()?.party_a_stats(party_a).await?;
                ActionOutput::document(&stats)
            }
            Action::GetAccounts { user, start, size } => {
                let client = ctx.multiaccount_client()?;
                let user = match user {
                    Some(user) => user,
                    None => client.wallet()?.address(),
                };
                let accounts = client.get_accounts(user, start, size).await?;
                ActionOutput::document(&accounts)
            }
            Action::WithdrawFromAccount { account, amount } => {
                let submitted = ctx
                    .multiaccount_client()?
                    .withdraw_from_account(account, amount)
                    .await?;
                ActionOutput::transaction(&submitted)
            }
            Action::RequestToClosePosition { sub_account, request } => {
                let client = ctx.multiaccount_client()?;
                let sub_account = match sub_account {
                    Some(account) => account,
                    None => ctx.config.contracts.sub_account()?,
                };
                let submitted = client
                    .request_to_close_position_via_multiaccount(sub_account, &request)
                    .await?;
                ActionOutput::transaction(&submitted)
            }
        }
    }
}
