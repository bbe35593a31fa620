//! Business rule validation for ledger operations.

use thiserror::Error;

use tally_shared::TransactionKind;

/// Validation errors for transaction creation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerValidationError {
    /// Transaction label is missing or empty.
    #[error("Text is required")]
    MissingText,

    /// Transaction amount is missing.
    #[error("Amount is required")]
    MissingAmount,

    /// Transaction kind is missing.
    #[error("Type is required")]
    MissingKind,

    /// Transaction kind is not one of the known values.
    #[error("Type must be income or expense")]
    InvalidKind,
}

/// Validates transaction input at the service boundary and resolves the
/// transaction kind.
///
/// `text` must be present and non-empty; `amount` must be present; `kind`
/// must parse as income or expense. The sign of the amount is not checked
/// against the kind: a negative expense (refund) is allowed.
///
/// # Errors
///
/// Returns an error if a required field is missing or the kind is unknown.
pub fn validate_new_transaction(
    text: Option<&str>,
    amount: Option<f64>,
    kind: Option<&str>,
) -> Result<TransactionKind, LedgerValidationError> {
    match text {
        None => return Err(LedgerValidationError::MissingText),
        Some(t) if t.trim().is_empty() => return Err(LedgerValidationError::MissingText),
        Some(_) => {}
    }

    if amount.is_none() {
        return Err(LedgerValidationError::MissingAmount);
    }

    match kind {
        None => Err(LedgerValidationError::MissingKind),
        Some(raw) => raw
            .parse::<TransactionKind>()
            .map_err(|_| LedgerValidationError::InvalidKind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_input() {
        let kind = validate_new_transaction(Some("Salary"), Some(1000.0), Some("income"));
        assert_eq!(kind, Ok(TransactionKind::Income));
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn test_missing_text_rejected(#[case] text: Option<&str>) {
        assert_eq!(
            validate_new_transaction(text, Some(1.0), Some("income")),
            Err(LedgerValidationError::MissingText)
        );
    }

    #[test]
    fn test_missing_amount_rejected() {
        assert_eq!(
            validate_new_transaction(Some("Rent"), None, Some("expense")),
            Err(LedgerValidationError::MissingAmount)
        );
    }

    #[test]
    fn test_missing_kind_rejected() {
        assert_eq!(
            validate_new_transaction(Some("Rent"), Some(900.0), None),
            Err(LedgerValidationError::MissingKind)
        );
    }

    #[rstest]
    #[case("transfer")]
    #[case("Income")]
    #[case("")]
    fn test_unknown_kind_rejected(#[case] kind: &str) {
        assert_eq!(
            validate_new_transaction(Some("Rent"), Some(900.0), Some(kind)),
            Err(LedgerValidationError::InvalidKind)
        );
    }

    #[rstest]
    #[case(-50.0)]
    #[case(0.0)]
    #[case(99.99)]
    fn test_any_sign_is_accepted(#[case] amount: f64) {
        // Mixed-sign amounts are intentional (refunds as negative expenses).
        assert!(validate_new_transaction(Some("Adjustment"), Some(amount), Some("expense")).is_ok());
    }
}
