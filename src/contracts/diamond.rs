//! Bindings for the Symmio trading diamond.
//!
//! `getQuote` returns a 27-member struct, more than the static tuple
//! encodings support, so it has no `sol!` binding. Its output is decoded
//! from the interface descriptor instead (see [`GET_QUOTE_SIGNATURE`]).

use alloy::sol;

use crate::blockchain::types::ActionResult;
use crate::contracts::descriptor::InterfaceDescriptor;

sol! {
    /// Functions of the diamond used by the actions in this crate.
    #[derive(Debug, PartialEq, Eq)]
    interface ISymmio {
        function forceCloseGapRatio(uint256 symbolId) external view returns (uint256);

        function isSuspended(address user) external view returns (bool);

        function partyAStats(address partyA)
            external
            view
            returns (
                bool liquidationStatus,
                uint256 allocatedBalances,
                uint256 lockedCVA,
                uint256 lockedLF,
                uint256 lockedPartyAmm,
                uint256 lockedPartyBmm,
                uint256 pendingLockedCVA,
                uint256 pendingLockedLF,
                uint256 pendingLockedPartyAmm,
                uint256 pendingLockedPartyBmm,
                uint256 partyAPositionsCount,
                uint256 partyAPendingQuotesCount,
                uint256 partyANonces,
                uint256 quoteIdsCount
            );

        function requestToClosePosition(
            uint256 quoteId,
            uint256 closePrice,
            uint256 quantityToClose,
            uint8 orderType,
            uint256 deadline
        ) external;
    }
}

pub use ISymmio::*;

/// Name used for the diamond in logs and errors.
pub const CONTRACT_NAME: &str = "Symmio";

/// Canonical signature of the quote lookup.
pub const GET_QUOTE_SIGNATURE: &str = "getQuote(uint256)";

/// Check that the read-only functions are declared by `descriptor`.
pub fn verify_views(descriptor: &InterfaceDescriptor) -> ActionResult<()> {
    descriptor.require::<forceCloseGapRatioCall>()?;
    descriptor.require::<isSuspendedCall>()?;
    descriptor.function(GET_QUOTE_SIGNATURE)?;
    descriptor.require::<partyAStatsCall>()?;
    Ok(())
}

/// Check that the position actions are declared by `descriptor`.
pub fn verify_actions(descriptor: &InterfaceDescriptor) -> ActionResult<()> {
    descriptor.require::<requestToClosePositionCall>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_signatures() {
        assert_eq!(forceCloseGapRatioCall::SIGNATURE, "forceCloseGapRatio(uint256)");
        assert_eq!(
            requestToClosePositionCall::SIGNATURE,
            "requestToClosePosition(uint256,uint256,uint256,uint8,uint256)"
        );
    }

    #[test]
    fn test_bundled_descriptor_declares_bindings() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("abi/symmio.json");
        let descriptor = InterfaceDescriptor::load(CONTRACT_NAME, &path).unwrap();
        verify_views(&descriptor).unwrap();
        verify_actions(&descriptor).unwrap();

        let get_quote = descriptor.function(GET_QUOTE_SIGNATURE).unwrap();
        assert_eq!(get_quote.outputs.len(), 1);
        assert_eq!(get_quote.outputs[0].components.len(), 27);
    }
}
