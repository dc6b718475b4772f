//! Shared helpers for integration tests.

use std::path::PathBuf;

use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::transports::mock::Asserter;

use symmio_actions::blockchain::ChainClient;
use symmio_actions::{ActionContext, AppConfig};

/// Anvil's first account.
#[allow(dead_code)]
pub const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const DIAMOND: &str = "0x976c214741b4657bd99dfd38a5c0e3ac5c99d903";
pub const MULTIACCOUNT: &str = "0x5de6949717f7d4b19e5a3e2bd0a4e1a9b3f7a5c1";

fn abi_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("abi").join(file)
}

/// Configuration pointing at the bundled descriptors, with no signer.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.network.rpc_url = Some("http://localhost:8545".to_string());
    config.network.chain_id = Some(31337);
    config.contracts.diamond_address = Some(DIAMOND.to_string());
    config.contracts.multiaccount_address = Some(MULTIACCOUNT.to_string());
    config.interfaces.diamond_abi = abi_path("symmio.json");
    config.interfaces.multiaccount_abi = abi_path("MultiAccount.json");
    config
}

/// Same as [`test_config`] with the test private key set.
#[allow(dead_code)]
pub fn signing_config() -> AppConfig {
    let mut config = test_config();
    config.signer.private_key = Some(TEST_PRIVATE_KEY.to_string());
    config
}

/// Context whose RPC responses come from `asserter`, in push order.
pub fn mocked_context(asserter: &Asserter, config: AppConfig) -> ActionContext {
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter.clone())
        .erased();
    let client = ChainClient::from_provider(provider, &config.network);
    ActionContext::with_client(config, client)
}

/// ABI encoding of a single static `uint256` return value.
#[allow(dead_code)]
pub fn uint_word(value: u64) -> Bytes {
    Bytes::from(U256::from(value).to_be_bytes::<32>().to_vec())
}

/// Legacy transaction receipt as a node returns it from
/// `eth_getTransactionReceipt`.
#[allow(dead_code)]
pub fn receipt_json(tx_hash: B256, from: Address, to: Address, success: bool) -> serde_json::Value {
    serde_json::json!({
        "type": "0x0",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0x2bf20",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0x42),
        "blockNumber": "0x10",
        "gasUsed": "0x2bf20",
        "effectiveGasPrice": "0x3b9aca00",
        "from": from,
        "to": to,
        "contractAddress": null,
    })
}
