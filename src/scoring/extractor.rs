//! Metric extraction from raw wallet payloads.
//!
//! Balances and transactions are processed independently: a failed or
//! malformed half degrades its metrics to zero/empty and never blocks the other.

use crate::scoring::data_sources::WalletPayload;
use crate::scoring::types::{
    transactions_from_value, BalancesPayload, TransactionSummary, WalletMetrics,
};
use std::collections::HashSet;
use tracing::{debug, instrument};

pub const TOP_HOLDINGS_LIMIT: usize = 10;
pub const RECENT_ACTIVITY_LIMIT: usize = 5;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Days between the earliest transaction timestamp and `now_secs`.
///
/// Transactions are not assumed sorted. Returns `None` when no transaction
/// carries a timestamp.
pub fn account_age_days(transactions: &[TransactionSummary], now_secs: i64) -> Option<u64> {
    let earliest = transactions.iter().filter_map(|tx| tx.block_time).min()?;
    let elapsed = now_secs.saturating_sub(earliest).max(0);
    Some((elapsed / SECONDS_PER_DAY) as u64)
}

/// Number of distinct program ids across all instructions of all transactions.
pub fn distinct_program_count(transactions: &[TransactionSummary]) -> u64 {
    let programs: HashSet<&str> = transactions
        .iter()
        .flat_map(TransactionSummary::program_ids)
        .collect();
    programs.len() as u64
}

/// Derive wallet metrics from whatever data arrived.
#[instrument(skip(payload))]
pub fn extract_metrics(payload: &WalletPayload, now_secs: i64) -> WalletMetrics {
    let balances = payload
        .balances
        .data()
        .map(BalancesPayload::from_value)
        .unwrap_or_default();

    let transactions = payload
        .transactions
        .data()
        .map(transactions_from_value)
        .unwrap_or_default();

    let metrics = WalletMetrics {
        transaction_count: transactions.len() as u64,
        token_count: balances.tokens.len() as u64,
        nft_count: balances.nft_count as u64,
        account_age_days: account_age_days(&transactions, now_secs),
        program_interaction_count: distinct_program_count(&transactions),
        top_holdings: balances
            .tokens
            .iter()
            .take(TOP_HOLDINGS_LIMIT)
            .map(|token| token.to_top_holding())
            .collect(),
        recent_activity: transactions
            .iter()
            .take(RECENT_ACTIVITY_LIMIT)
            .map(TransactionSummary::to_recent_activity)
            .collect(),
    };

    debug!(
        "Extracted metrics: {} txs, {} tokens, {} nfts, age {:?} days, {} programs",
        metrics.transaction_count,
        metrics.token_count,
        metrics.nft_count,
        metrics.account_age_days,
        metrics.program_interaction_count
    );

    metrics
}
