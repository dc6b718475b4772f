//! Bindings for the MultiAccount proxy.

use alloy::sol;

use crate::blockchain::types::ActionResult;
use crate::contracts::descriptor::InterfaceDescriptor;

sol! {
    /// Functions of the multi-account proxy used by the actions in this crate.
    #[derive(Debug, PartialEq, Eq)]
    interface IMultiAccount {
        struct Account {
            address accountAddress;
            string name;
        }

        function getAccounts(address user, uint256 start, uint256 size)
            external
            view
            returns (Account[] memory);

        function withdrawFromAccount(address account, uint256 amount) external;

        /// Relays each payload in `_callDatas` from `account` to the diamond.
        function _call(address account, bytes[] memory _callDatas) external;
    }
}

pub use IMultiAccount::*;

/// Name used for the proxy in logs and errors.
pub const CONTRACT_NAME: &str = "MultiAccount";

/// Check that every bound function is declared by `descriptor`.
pub fn verify(descriptor: &InterfaceDescriptor) -> ActionResult<()> {
    descriptor.require::<getAccountsCall>()?;
    descriptor.require::<withdrawFromAccountCall>()?;
    descriptor.require::<_callCall>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolCall;

    #[test]
    fn test_signatures() {
        assert_eq!(_callCall::SIGNATURE, "_call(address,bytes[])");
        assert_eq!(withdrawFromAccountCall::SIGNATURE, "withdrawFromAccount(address,uint256)");
    }

    #[test]
    fn test_bundled_descriptor_declares_bindings() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("abi/MultiAccount.json");
        let descriptor = InterfaceDescriptor::load(CONTRACT_NAME, &path).unwrap();
        verify(&descriptor).unwrap();
    }
}
