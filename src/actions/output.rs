//! Human-readable results written to stdout.

use std::fmt;

use serde::Serialize;

use crate::blockchain::types::{ActionError, ActionResult, SubmittedTransaction};

/// Result of one action, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutput {
    /// A single value, printed verbatim.
    Scalar(String),
    /// A structured value, printed as pretty JSON.
    Document(serde_json::Value),
    /// A confirmed transaction.
    Transaction {
        tx_hash: String,
        receipt: serde_json::Value,
    },
}

impl ActionOutput {
    pub fn scalar(value: impl fmt::Display) -> Self {
        ActionOutput::Scalar(value.to_string())
    }

    pub fn document<T: Serialize>(value: &T) -> ActionResult<Self> {
        let value = serde_json::to_value(value).map_err(|e| ActionError::DecodeFailure {
            function: "serialize",
            reason: e.to_string(),
        })?;
        Ok(ActionOutput::Document(value))
    }

    pub fn transaction(submitted: &SubmittedTransaction) -> ActionResult<Self> {
        let receipt = serde_json::to_value(&submitted.receipt).map_err(|e| ActionError::DecodeFailure {
            function: "receipt",
            reason: e.to_string(),
        })?;
        Ok(ActionOutput::Transaction {
            tx_hash: submitted.tx_hash.to_string(),
            receipt,
        })
    }
}

impl fmt::Display for ActionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutput::Scalar(value) => write!(f, "{}", value),
            ActionOutput::Document(value) => {
                let pretty = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
                write!(f, "{}", pretty)
            }
            ActionOutput::Transaction { tx_hash, receipt } => {
                let pretty = serde_json::to_string_pretty(receipt).map_err(|_| fmt::Error)?;
                writeln!(f, "Transaction confirmed: {}", tx_hash)?;
                write!(f, "{}", pretty)
            }
        }
    }
}
