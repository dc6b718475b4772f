//! Command line entry point.
//!
//! Each subcommand runs exactly one contract action and prints its result
//! on stdout. Logs go to stderr.

use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};

use symmio_actions::actions::params::{deadline_from_now, parse_amount};
use symmio_actions::actions::{Action, ActionContext, CloseRequest, OrderType};
use symmio_actions::blockchain::address::parse_address;
use symmio_actions::config::{overlay_env, read_config};
use symmio_actions::observability::init_logging;

#[derive(Parser)]
#[command(name = "symmio-actions")]
#[command(about = "Run one action against the Symmio diamond or the MultiAccount proxy", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "SYMMIO_CONFIG")]
    config: Option<PathBuf>,

    /// Environment file loaded before reading RPC_URL, PRIVATE_KEY and addresses.
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the force-close gap ratio of a symbol
    ForceCloseGapRatio {
        #[arg(long, default_value_t = 1)]
        symbol_id: u64,
    },
    /// Check whether a user is suspended
    IsSuspended {
        #[arg(long, value_parser = cli_address, default_value = "0xEb42F3b1aC3b1552138C7D30E9f4e0eF43229542")]
        user: Address,
    },
    /// Fetch a quote by id
    GetQuote {
        #[arg(long, default_value_t = 137887)]
        quote_id: u64,
    },
    /// Fetch the account statistics of a party A
    PartyAStats {
        #[arg(long, value_parser = cli_address, default_value = "0xEb42F3b1aC3b1552138C7D30E9f4e0eF43229542")]
        party_a: Address,
    },
    /// List the sub-accounts of a user (defaults to the signing wallet)
    GetAccounts {
        #[arg(long, value_parser = cli_address)]
        user: Option<Address>,
        #[arg(long, default_value_t = 0)]
        start: u64,
        #[arg(long, default_value_t = 10)]
        size: u64,
    },
    /// Withdraw funds from a sub-account
    Withdraw {
        #[arg(long, value_parser = cli_address, default_value = "0x980b2CaEF214358cF9e7566372c7c2b9D7c2Da83")]
        account: Address,
        /// Amount in wei, or with an `ether` / `gwei` suffix
        #[arg(long, value_parser = parse_amount, default_value = "0.5ether")]
        amount: U256,
    },
    /// Request to close a position through the MultiAccount proxy
    RequestToClose {
        /// Sub-account that owns the position (defaults to SUB_ACCOUNT_ADDRESS)
        #[arg(long, value_parser = cli_address)]
        sub_account: Option<Address>,
        #[arg(long, default_value_t = 1)]
        quote_id: u64,
        #[arg(long, value_parser = parse_amount, default_value = "2000ether")]
        close_price: U256,
        #[arg(long, value_parser = parse_amount, default_value = "1ether")]
        quantity: U256,
        #[arg(long, value_enum, default_value_t = OrderType::Market)]
        order_type: OrderType,
        /// Seconds from now until the request expires
        #[arg(long, default_value_t = 3600)]
        deadline_secs: u64,
    },
}

fn cli_address(raw: &str) -> Result<Address, String> {
    parse_address("address", raw).map_err(|e| e.to_string())
}

impl Commands {
    fn into_action(self) -> Action {
        match self {
            Commands::ForceCloseGapRatio { symbol_id } => Action::ForceCloseGapRatio {
                symbol_id: U256::from(symbol_id),
            },
            Commands::IsSuspended { user } => Action::IsSuspended { user },
            Commands::GetQuote { quote_id } => Action::GetQuote {
                quote_id: U256::from(quote_id),
            },
            Commands::PartyAStats { party_a } => Action::PartyAStats { party_a },
            Commands::GetAccounts { user, start, size } => Action::GetAccounts {
                user,
                start: U256::from(start),
                size: U256::from(size),
            },
            Commands::Withdraw { account, amount } => Action::WithdrawFromAccount { account, amount },
            Commands::RequestToClose {
                sub_account,
                quote_id,
                close_price,
                quantity,
                order_type,
                deadline_secs,
            } => Action::RequestToClosePosition {
                sub_account,
                request: CloseRequest {
                    quote_id: U256::from(quote_id),
                    close_price,
                    quantity_to_close: quantity,
                    order_type,
                    deadline: deadline_from_now(deadline_secs),
                },
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let env_loaded = dotenvy::from_path(&cli.env_file).is_ok();

    let config = read_config(cli.config.as_deref())?;
    init_logging(&config.observability.log_level);

    let config = match overlay_env(config, |key| std::env::var(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    tracing::debug!(
        env_file = %cli.env_file.display(),
        env_loaded,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    let action = cli.command.into_action();
    let name = action.name();

    let ctx = ActionContext::connect(config)?;
    match action.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(action = name, error = %e, "Action failed");
            Err(e.into())
        }
    }
}
