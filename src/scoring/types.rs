//! Canonical records for upstream indexer data and the metrics derived from them.
//!
//! The indexer payload is loosely shaped: fields go missing, the same concept
//! appears under different names, and numbers sometimes arrive as strings.
//! Every accepted shape is mapped here onto one record type, with absent or
//! malformed fields resolved to `None` instead of failing the whole payload.

use crate::types::{HoldingAmount, RecentActivity, TopHolding};
use serde_json::Value;

/// Field names under which an instruction may carry its program id.
const PROGRAM_ID_FIELDS: [&str; 2] = ["programId", "program"];

/// Token holding as reported by the balances endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenHolding {
    pub mint: Option<String>,
    pub symbol: Option<String>,
    pub ui_amount: Option<String>,
    pub raw_amount: Option<HoldingAmount>,
}

/// Instruction inside a transaction summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructionRecord {
    /// Every program id found on the instruction, across accepted field names
    pub program_ids: Vec<String>,
}

/// Transaction summary as reported by the history endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionSummary {
    pub signature: Option<String>,
    pub slot: Option<u64>,
    /// Unix seconds; zero is treated as absent
    pub block_time: Option<i64>,
    pub tx_type: Option<String>,
    pub description: Option<String>,
    pub instructions: Vec<InstructionRecord>,
}

/// Balances payload split into fungible tokens and NFTs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalancesPayload {
    pub tokens: Vec<TokenHolding>,
    pub nft_count: usize,
}

/// Metrics extracted from one wallet's payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletMetrics {
    pub transaction_count: u64,
    pub token_count: u64,
    pub nft_count: u64,
    pub account_age_days: Option<u64>,
    pub program_interaction_count: u64,
    pub top_holdings: Vec<TopHolding>,
    pub recent_activity: Vec<RecentActivity>,
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// String field that also treats `""` as absent.
fn non_empty_string_field(value: &Value, key: &str) -> Option<String> {
    string_field(value, key).filter(|s| !s.is_empty())
}

/// Unsigned integer that may be encoded as a JSON number or numeric string.
fn u64_field(value: &Value, key: &str) -> Option<u64> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn i64_field(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Elements of `value[key]` when it is an array; anything else counts as empty.
fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

impl TokenHolding {
    pub fn from_value(value: &Value) -> Self {
        let raw_amount = match value.get("amount") {
            Some(Value::String(s)) => Some(HoldingAmount::Text(s.clone())),
            Some(Value::Number(n)) => Some(HoldingAmount::Number(n.clone())),
            _ => None,
        };

        Self {
            mint: string_field(value, "mint"),
            symbol: string_field(value, "symbol"),
            ui_amount: string_field(value, "uiAmountString"),
            raw_amount,
        }
    }

    /// Display form: symbol falls back to mint, then "UNKNOWN";
    /// amount prefers the human-readable string over the raw amount.
    pub fn to_top_holding(&self) -> TopHolding {
        let symbol = self
            .symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.mint.as_deref().filter(|m| !m.is_empty()))
            .unwrap_or("UNKNOWN")
            .to_string();

        let amount = self
            .ui_amount
            .clone()
            .map(HoldingAmount::Text)
            .or_else(|| self.raw_amount.clone());

        TopHolding {
            symbol,
            amount,
            mint: self.mint.clone(),
        }
    }
}

impl InstructionRecord {
    pub fn from_value(value: &Value) -> Self {
        let program_ids = PROGRAM_ID_FIELDS
            .iter()
            .filter_map(|field| non_empty_string_field(value, field))
            .collect();

        Self { program_ids }
    }
}

impl TransactionSummary {
    pub fn from_value(value: &Value) -> Self {
        Self {
            signature: string_field(value, "signature"),
            slot: u64_field(value, "slot"),
            block_time: i64_field(value, "blockTime").filter(|t| *t != 0),
            tx_type: non_empty_string_field(value, "type"),
            description: non_empty_string_field(value, "description"),
            instructions: array_field(value, "instructions")
                .iter()
                .map(InstructionRecord::from_value)
                .collect(),
        }
    }

    pub fn to_recent_activity(&self) -> RecentActivity {
        RecentActivity {
            signature: self.signature.clone(),
            slot: self.slot,
            block_time: self.block_time,
            description: self.tx_type.clone().or_else(|| self.description.clone()),
        }
    }

    /// Program ids invoked by this transaction, possibly repeated.
    pub fn program_ids(&self) -> impl Iterator<Item = &str> {
        self.instructions
            .iter()
            .flat_map(|ix| ix.program_ids.iter().map(String::as_str))
    }
}

impl BalancesPayload {
    pub fn from_value(value: &Value) -> Self {
        Self {
            tokens: array_field(value, "tokens")
                .iter()
                .map(TokenHolding::from_value)
                .collect(),
            nft_count: array_field(value, "nfts").len(),
        }
    }
}

/// Parse the transaction history payload. A non-array payload yields no transactions.
pub fn transactions_from_value(value: &Value) -> Vec<TransactionSummary> {
    value
        .as_array()
        .map(|txs| txs.iter().map(TransactionSummary::from_value).collect())
        .unwrap_or_default()
}
