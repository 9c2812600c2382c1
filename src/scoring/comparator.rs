//! Side-by-side comparison of two wallets.

use crate::error::ComparisonError;
use crate::scoring::engine::ScoringEngine;
use crate::types::{AccountSnapshot, ComparisonResult, Side, Winner};
use tracing::{info, instrument};

/// Winner between two snapshots. Only a strictly higher score wins.
pub fn decide(wallet_a: &AccountSnapshot, wallet_b: &AccountSnapshot) -> Winner {
    Winner::from_scores(wallet_a.score, wallet_b.score)
}

/// Run both pipelines concurrently and compare their scores.
///
/// If either side fails no winner is computed. When both fail, side A is reported.
#[instrument(skip(engine))]
pub async fn compare(
    engine: &ScoringEngine,
    wallet_a: &str,
    wallet_b: &str,
) -> Result<ComparisonResult, ComparisonError> {
    let (result_a, result_b) =
        tokio::join!(engine.score_wallet(wallet_a), engine.score_wallet(wallet_b));

    let snapshot_a = result_a.map_err(|e| ComparisonError::new(Side::A, e))?;
    let snapshot_b = result_b.map_err(|e| ComparisonError::new(Side::B, e))?;

    let winner = decide(&snapshot_a, &snapshot_b);
    info!(
        "Compared {} ({}) with {} ({}): {:?}",
        wallet_a, snapshot_a.score, wallet_b, snapshot_b.score, winner
    );

    Ok(ComparisonResult {
        wallet_a: snapshot_a,
        wallet_b: snapshot_b,
        winner,
    })
}
