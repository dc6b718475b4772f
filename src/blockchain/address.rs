//! Address parsing and checksum normalisation.
//!
//! Inputs may arrive in any letter case; everything that leaves this crate
//! (requests, log lines, printed output) uses the EIP-55 checksummed form.

use alloy::primitives::Address;

use crate::blockchain::types::{ActionError, ActionResult};

/// Parse a hex address in any letter case.
///
/// `field` names the setting or argument the value came from and is used
/// in the error message.
pub fn parse_address(field: &'static str, raw: &str) -> ActionResult<Address> {
    let trimmed = raw.trim();
    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(ActionError::InvalidConfig {
            field,
            reason: format!("'{}' is missing the 0x prefix", trimmed),
        });
    }
    let hex = &trimmed[2..];
    // Normalise case first so a mixed-case input with a stale checksum is
    // still accepted, matching `to_checksum_address` semantics.
    format!("0x{}", hex.to_ascii_lowercase())
        .parse::<Address>()
        .map_err(|e| ActionError::InvalidConfig {
            field,
            reason: format!("'{}' is not a valid address: {}", trimmed, e),
        })
}

/// EIP-55 checksummed representation.
pub fn checksummed(address: &Address) -> String {
    address.to_checksum(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOWER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
    const CHECKSUMMED: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn test_lowercase_is_checksummed() {
        let address = parse_address("USER", LOWER).unwrap();
        assert_eq!(checksummed(&address), CHECKSUMMED);
        assert_eq!(address.to_string(), CHECKSUMMED);
    }

    #[test]
    fn test_mixed_case_is_normalised() {
        let address = parse_address("USER", "0xF39FD6E51AAD88F6F4CE6AB8827279CFFFB92266").unwrap();
        assert_eq!(checksummed(&address), CHECKSUMMED);

        let address = parse_address("USER", CHECKSUMMED).unwrap();
        assert_eq!(checksummed(&address), CHECKSUMMED);
    }

    #[test]
    fn test_invalid_address() {
        let err = parse_address("DIAMOND_ADDRESS", "0x1234").unwrap_err();
        assert!(err.to_string().contains("DIAMOND_ADDRESS"));

        let err = parse_address("DIAMOND_ADDRESS", "f39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap_err();
        assert!(err.to_string().contains("0x prefix"));
    }
}
