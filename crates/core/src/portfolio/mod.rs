//! Portfolio views derived from the investment ledger.

pub mod holdings;

pub use holdings::*;
