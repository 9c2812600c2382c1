//! wallet-scope - Solana wallet reputation scoring
//!
//! This crate turns indexed on-chain balances and transaction history into a
//! bounded 0-100 wallet score with risk flags, and compares two wallets.

pub mod types;
pub mod error;
pub mod config;
pub mod scoring;
pub mod server;

// Re-export main types for convenience
pub use types::{AccountSnapshot, ComparisonResult, Winner, Side};
pub use error::{ScoreError, ComparisonError};
pub use config::ServiceConfig;
pub use scoring::{EngineBuilder, ScoringEngine};
