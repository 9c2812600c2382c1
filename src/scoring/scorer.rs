//! Wallet scorer - combines capped sub-scores into the final 0-100 score.
//!
//! | Sub-score     | Formula                     | Cap |
//! |---------------|-----------------------------|-----|
//! | Activity      | `transactions / 3`          | 40  |
//! | Diversity     | `tokens * 2`                | 20  |
//! | Age           | `days / 365 * 20`, unknown 0 | 20  |
//! | Program reach | `distinct programs * 2`     | 20  |
//!
//! The caps add up to 100, so the clamp on the total only guards the invariant.

use crate::scoring::types::WalletMetrics;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ACTIVITY_CAP: u64 = 40;
pub const DIVERSITY_CAP: u64 = 20;
pub const AGE_CAP: u64 = 20;
pub const PROGRAM_REACH_CAP: u64 = 20;
pub const MATURE_ACCOUNT_DAYS: u64 = 365;
pub const MAX_SCORE: u8 = 100;

/// Individual sub-scores behind a wallet score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub activity: u64,
    pub diversity: u64,
    pub age: u64,
    pub program_reach: u64,
}

pub fn activity_score(transaction_count: u64) -> u64 {
    (transaction_count / 3).min(ACTIVITY_CAP)
}

pub fn diversity_score(token_count: u64) -> u64 {
    token_count.saturating_mul(2).min(DIVERSITY_CAP)
}

/// Linear in age up to one year, then flat.
pub fn age_score(account_age_days: Option<u64>) -> u64 {
    match account_age_days {
        None => 0,
        Some(days) if days >= MATURE_ACCOUNT_DAYS => AGE_CAP,
        // Integer form of floor(days / 365 * 20)
        Some(days) => days * AGE_CAP / MATURE_ACCOUNT_DAYS,
    }
}

pub fn program_reach_score(program_interaction_count: u64) -> u64 {
    program_interaction_count.saturating_mul(2).min(PROGRAM_REACH_CAP)
}

impl ScoreBreakdown {
    pub fn compute(metrics: &WalletMetrics) -> Self {
        Self {
            activity: activity_score(metrics.transaction_count),
            diversity: diversity_score(metrics.token_count),
            age: age_score(metrics.account_age_days),
            program_reach: program_reach_score(metrics.program_interaction_count),
        }
    }

    /// Sum of the sub-scores clamped to [0, 100].
    pub fn total(&self) -> u8 {
        let sum = self.activity + self.diversity + self.age + self.program_reach;
        sum.min(MAX_SCORE as u64) as u8
    }
}

/// Score a wallet from its extracted metrics.
pub fn score_metrics(metrics: &WalletMetrics) -> u8 {
    let breakdown = ScoreBreakdown::compute(metrics);
    let score = breakdown.total();

    debug!(
        "Score {}/100 (activity={}, diversity={}, age={}, programs={})",
        score, breakdown.activity, breakdown.diversity, breakdown.age, breakdown.program_reach
    );

    score
}
