//! Transaction input validation for the ledger.

mod validation;

pub use validation::{LedgerValidationError, validate_new_transaction};
