//! Error taxonomy for the scoring pipeline.
//!
//! Messages are what callers see. Underlying causes stay attached
//! to `FetchFailed` so operators can log them.

use crate::types::Side;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreError {
    /// No address supplied in the request
    #[error("Wallet address required")]
    MissingAddress,

    /// Address failed the syntactic check
    #[error("Invalid Solana address format.")]
    InvalidAddress(String),

    /// Upstream credential is not configured
    #[error("Helius API key missing on server.")]
    MissingCredential,

    /// Nothing usable came back from the upstream indexer
    #[error("Failed to fetch live wallet data.")]
    FetchFailed(#[source] anyhow::Error),
}

impl ScoreError {
    /// Whether the error was caused by the caller's input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ScoreError::MissingAddress | ScoreError::InvalidAddress(_))
    }
}

/// A pipeline error tagged with the side of the comparison that produced it.
#[derive(Error, Debug)]
#[error("{side}: {source}")]
pub struct ComparisonError {
    pub side: Side,
    #[source]
    pub source: ScoreError,
}

impl ComparisonError {
    pub fn new(side: Side, source: ScoreError) -> Self {
        Self { side, source }
    }

    pub fn is_client_error(&self) -> bool {
        self.source.is_client_error()
    }
}
