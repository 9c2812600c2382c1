//! Core types and data structures returned by the wallet scoring service.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Solana account address (kept as a string; validated by `scoring::validator`).
pub type Pubkey = String;

/// Amount of a token holding as reported upstream.
///
/// The indexer reports either a human-readable string (`uiAmountString`)
/// or a raw number, so both shapes are preserved verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoldingAmount {
    Text(String),
    Number(serde_json::Number),
}

/// One of the wallet's largest holdings, normalized for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHolding {
    /// Display symbol, falling back to the mint and then "UNKNOWN"
    pub symbol: String,
    /// Held amount, if reported
    pub amount: Option<HoldingAmount>,
    /// Mint address, if reported
    pub mint: Option<Pubkey>,
}

/// Short summary of a recent transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub signature: Option<String>,
    pub slot: Option<u64>,
    /// Unix seconds
    pub block_time: Option<i64>,
    /// Transaction type label or description from the indexer
    pub description: Option<String>,
}

/// Complete derived metric and score record for one wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    /// The wallet address
    pub address: Pubkey,
    /// Score (0-100)
    pub score: u8,
    pub transaction_count: u64,
    pub token_count: u64,
    pub nft_count: u64,
    /// Days since the earliest observed transaction, `None` when unknown
    pub account_age_days: Option<u64>,
    /// Number of distinct programs invoked
    pub program_interaction_count: u64,
    /// At most 10 holdings in upstream order
    pub top_holdings: Vec<TopHolding>,
    /// At most 5 transactions in upstream order
    pub recent_activity: Vec<RecentActivity>,
    /// Human-readable warnings
    pub risk_flags: Vec<String>,
}

/// Which of the two compared wallets a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Display label used in responses and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Side::A => "Wallet A",
            Side::B => "Wallet B",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of comparing two wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    #[serde(rename = "Wallet A")]
    WalletA,
    #[serde(rename = "Wallet B")]
    WalletB,
    #[serde(rename = "tie")]
    Tie,
}

impl Winner {
    /// Decide the winner from two scores. Only a strictly higher score wins.
    pub fn from_scores(score_a: u8, score_b: u8) -> Self {
        match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => Winner::WalletA,
            std::cmp::Ordering::Less => Winner::WalletB,
            std::cmp::Ordering::Equal => Winner::Tie,
        }
    }

    /// The same outcome seen with the two wallets swapped.
    pub fn swapped(self) -> Self {
        match self {
            Winner::WalletA => Winner::WalletB,
            Winner::WalletB => Winner::WalletA,
            Winner::Tie => Winner::Tie,
        }
    }
}

/// Side-by-side result for two wallets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub wallet_a: AccountSnapshot,
    pub wallet_b: AccountSnapshot,
    pub winner: Winner,
}
