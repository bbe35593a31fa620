//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - JWT token issuance and validation
//! - Auth claims and request/response payloads
//! - Ledger domain types shared between layers

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::AppConfig;
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
pub use types::TransactionKind;
