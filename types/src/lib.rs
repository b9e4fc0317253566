//! Fundamental types for the Tessera ledger.
//!
//! This crate defines the core types shared across the workspace:
//! addresses, token amounts, fixed-point decimals, and proposal identifiers.

pub mod address;
pub mod amount;
pub mod decimal;
pub mod id;

pub use address::{Address, AddressError};
pub use amount::TokenAmount;
pub use decimal::{Dec, DecError};
pub use id::ProposalId;
