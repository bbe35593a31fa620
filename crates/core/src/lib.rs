//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//!
//! # Modules
//!
//! - `auth` - Password hashing and credential validation
//! - `ledger` - Transaction input validation

pub mod auth;
pub mod ledger;
