//! Parameters accepted by the actions.

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy::primitives::U256;
use std::time::{SystemTime, UNIX_EPOCH};

/// Order type of a close request, as encoded by the diamond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OrderType {
    Limit,
    Market,
}

impl OrderType {
    pub fn as_u8(self) -> u8 {
        match self {
            OrderType::Limit => 0,
            OrderType::Market => 1,
        }
    }
}

/// Arguments of `requestToClosePosition`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseRequest {
    pub quote_id: U256,
    pub close_price: U256,
    pub quantity_to_close: U256,
    pub order_type: OrderType,
    /// Unix timestamp in seconds.
    pub deadline: U256,
}

/// Parse an amount given in wei, or with an `ether` / `gwei` suffix.
///
/// `"500"` is 500 wei, `"0.5ether"` and `"0.5 ether"` are 5×10^17 wei.
pub fn parse_amount(raw: &str) -> Result<U256, String> {
    let trimmed = raw.trim();
    for unit in ["ether", "gwei", "wei"] {
        if let Some(number) = trimmed.strip_suffix(unit) {
            let parsed: ParseUnits = parse_units(number.trim(), unit)
                .map_err(|e| format!("invalid amount '{}': {}", raw, e))?;
            return Ok(parsed.into());
        }
    }
    trimmed
        .parse::<U256>()
        .map_err(|e| format!("invalid amount '{}': {}", raw, e))
}

/// Unix timestamp `secs` seconds from now.
pub fn deadline_from_now(secs: u64) -> U256 {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    U256::from(now.saturating_add(secs))
}
