//! Ledger transaction domain types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two kinds of ledger entry a user can record.
///
/// Serialized as `"income"` / `"expense"` on the wire and in storage.
/// The sign of an amount is deliberately not constrained by the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

impl TransactionKind {
    /// Returns the canonical string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown transaction kind.
#[derive(Debug, Error)]
#[error("unknown transaction type: {0}")]
pub struct ParseTransactionKindError(String);

impl FromStr for TransactionKind {
    type Err = ParseTransactionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(ParseTransactionKindError(other.to_string())),
        }
    }
}
