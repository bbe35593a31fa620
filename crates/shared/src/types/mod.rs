//! Common types used across the application.

pub mod transaction;

pub use transaction::TransactionKind;
