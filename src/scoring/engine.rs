//! Scoring engine - the validate, fetch, extract, score, flag pipeline.

use crate::error::{ComparisonError, ScoreError};
use crate::scoring::comparator;
use crate::scoring::data_sources::{RawDataSource, WalletPayload};
use crate::scoring::extractor::extract_metrics;
use crate::scoring::risk::RiskFlagger;
use crate::scoring::scorer::score_metrics;
use crate::scoring::validator::is_valid_address;
use crate::types::{AccountSnapshot, ComparisonResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Source of the current unix time in seconds.
pub type Clock = fn() -> i64;

pub fn system_clock() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Runs the full scoring pipeline for wallets.
///
/// Holds no per-request state; every call fetches and computes from scratch.
#[derive(Clone)]
pub struct ScoringEngine {
    /// `None` when the upstream credential is not configured
    source: Option<Arc<dyn RawDataSource>>,
    risk_flagger: RiskFlagger,
    clock: Clock,
}

impl ScoringEngine {
    pub fn new(
        source: Option<Arc<dyn RawDataSource>>,
        risk_flagger: RiskFlagger,
        clock: Clock,
    ) -> Self {
        Self {
            source,
            risk_flagger,
            clock,
        }
    }

    /// Whether requests can reach the upstream indexer.
    pub fn is_configured(&self) -> bool {
        self.source.is_some()
    }

    /// Score a single wallet.
    #[instrument(skip(self))]
    pub async fn score_wallet(&self, address: &str) -> Result<AccountSnapshot, ScoreError> {
        let start_time = Instant::now();

        if address.is_empty() {
            return Err(ScoreError::MissingAddress);
        }
        if !is_valid_address(address) {
            return Err(ScoreError::InvalidAddress(address.to_string()));
        }
        let source = self.source.as_deref().ok_or(ScoreError::MissingCredential)?;

        let payload = WalletPayload::fetch(source, address)
            .await
            .into_usable()
            .map_err(|e| {
                if let ScoreError::FetchFailed(cause) = &e {
                    error!("Failed to fetch wallet data for {}: {:#}", address, cause);
                }
                e
            })?;

        let metrics = extract_metrics(&payload, (self.clock)());
        let score = score_metrics(&metrics);
        let risk_flags = self.risk_flagger.flag(&metrics);

        info!(
            "Scored wallet {} with score {} in {}μs",
            address,
            score,
            start_time.elapsed().as_micros()
        );

        Ok(AccountSnapshot {
            address: address.to_string(),
            score,
            transaction_count: metrics.transaction_count,
            token_count: metrics.token_count,
            nft_count: metrics.nft_count,
            account_age_days: metrics.account_age_days,
            program_interaction_count: metrics.program_interaction_count,
            top_holdings: metrics.top_holdings,
            recent_activity: metrics.recent_activity,
            risk_flags,
        })
    }

    /// Score two wallets concurrently and pick a winner.
    pub async fn compare_wallets(
        &self,
        wallet_a: &str,
        wallet_b: &str,
    ) -> Result<ComparisonResult, ComparisonError> {
        comparator::compare(self, wallet_a, wallet_b).await
    }
}
