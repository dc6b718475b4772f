//! JSON interface descriptors (ABIs).
//!
//! Descriptors are versioned outside this crate and only read here. They
//! are used to check that every function bound with `sol!` is actually
//! declared by the deployed contract's interface, before any call is made.

use alloy::json_abi::{Function, JsonAbi};
use alloy::sol_types::SolCall;
use std::fs;
use std::path::Path;

use crate::blockchain::types::{ActionError, ActionResult};

/// A loaded, read-only contract interface.
#[derive(Debug, Clone)]
pub struct InterfaceDescriptor {
    contract: String,
    abi: JsonAbi,
}

impl InterfaceDescriptor {
    /// Load a descriptor from a JSON file.
    ///
    /// Accepts a plain ABI array or a build artifact with an `abi` field.
    pub fn load(contract: &str, path: &Path) -> ActionResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ActionError::InterfaceLoad {
            contract: contract.to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let descriptor = Self::parse(contract, &content).map_err(|reason| ActionError::InterfaceLoad {
            contract: contract.to_string(),
            path: path.display().to_string(),
            reason,
        })?;

        tracing::debug!(
            contract,
            path = %path.display(),
            functions = descriptor.function_count(),
            "Interface descriptor loaded"
        );

        Ok(descriptor)
    }

    /// Parse a descriptor from JSON text.
    pub fn from_json_str(contract: &str, json: &str) -> ActionResult<Self> {
        Self::parse(contract, json).map_err(|reason| ActionError::InterfaceLoad {
            contract: contract.to_string(),
            path: "<inline>".to_string(),
            reason,
        })
    }

    fn parse(contract: &str, json: &str) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(json).map_err(|e| e.to_string())?;
        let abi_value = match value {
            serde_json::Value::Object(mut object) => object
                .remove("abi")
                .ok_or_else(|| "JSON object has no 'abi' field".to_string())?,
            other => other,
        };
        let abi: JsonAbi = serde_json::from_value(abi_value).map_err(|e| e.to_string())?;

        Ok(Self {
            contract: contract.to_string(),
            abi,
        })
    }

    /// Ensure the function bound by `C` is declared by this interface.
    pub fn require<C: SolCall>(&self) -> ActionResult<()> {
        let declared = self
            .abi
            .functions()
            .any(|function| function.selector().0 == C::SELECTOR);

        if declared {
            Ok(())
        } else {
            Err(ActionError::InterfaceMismatch {
                contract: self.contract.clone(),
                signature: C::SIGNATURE.to_string(),
            })
        }
    }

    /// Look up a function by its canonical signature, e.g. `getQuote(uint256)`.
    ///
    /// Used for functions whose return shape is decoded from the descriptor
    /// rather than from a `sol!` binding.
    pub fn function(&self, signature: &str) -> ActionResult<&Function> {
        self.abi
            .functions()
            .find(|function| function.signature() == signature)
            .ok_or_else(|| ActionError::InterfaceMismatch {
                contract: self.contract.clone(),
                signature: signature.to_string(),
            })
    }

    /// Name of the contract this descriptor describes.
    pub fn contract(&self) -> &str {
        &self.contract
    }

    /// Number of functions declared.
    pub fn function_count(&self) -> usize {
        self.abi.functions().count()
    }
}
