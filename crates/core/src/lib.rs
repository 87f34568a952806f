//! CredVest Core - Domain entities, calculators, services, and traits.
//!
//! This crate contains the business logic for CredVest.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod constants;
pub mod errors;
pub mod goals;
pub mod insights;
pub mod portfolio;
pub mod simulation;
pub mod transactions;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
