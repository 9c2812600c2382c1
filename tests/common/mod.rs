//! Shared fixtures for integration tests.

#![allow(dead_code)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use wallet_scope::scoring::{EngineBuilder, RawDataSource, ScoringEngine};

pub const NOW: i64 = 1_700_000_000;
pub const DAY: i64 = 86_400;

pub const WALLET_ACTIVE: &str = "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM";
pub const WALLET_EMPTY: &str = "11111111111111111111111111111111";
pub const WALLET_NO_BALANCES: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const WALLET_BROKEN: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";

pub fn fixed_clock() -> i64 {
    NOW
}

/// In-memory indexer keyed by address. `None` halves fail.
#[derive(Default)]
pub struct MockSource {
    wallets: HashMap<String, (Option<Value>, Option<Value>)>,
}

impl MockSource {
    pub fn with_wallet(
        mut self,
        address: &str,
        balances: Option<Value>,
        transactions: Option<Value>,
    ) -> Self {
        self.wallets
            .insert(address.to_string(), (balances, transactions));
        self
    }
}

#[async_trait]
impl RawDataSource for MockSource {
    async fn fetch_balances(&self, address: &str) -> Result<Value> {
        self.wallets
            .get(address)
            .and_then(|(balances, _)| balances.clone())
            .ok_or_else(|| anyhow!("balances unavailable for {}", address))
    }

    async fn fetch_transactions(&self, address: &str) -> Result<Value> {
        self.wallets
            .get(address)
            .and_then(|(_, transactions)| transactions.clone())
            .ok_or_else(|| anyhow!("transactions unavailable for {}", address))
    }
}

/// 90 transactions spanning 400 days touching 3 programs, and 5 tokens.
pub fn active_wallet_data() -> (Value, Value) {
    let programs = ["ProgA", "ProgB", "ProgC"];
    let transactions: Vec<Value> = (0..90)
        .map(|i| {
            json!({
                "signature": format!("sig{}", i),
                "slot": 250_000_000 - i,
                "blockTime": if i == 45 { NOW - 400 * DAY } else { NOW - (i as i64 % 10) * DAY },
                "type": "TRANSFER",
                "instructions": [
                    {"programId": programs[i % 3]},
                    {"program": programs[(i + 1) % 3]}
                ]
            })
        })
        .collect();

    let tokens: Vec<Value> = (0..5)
        .map(|i| json!({"mint": format!("Mint{}", i), "symbol": format!("TK{}", i), "amount": 1000 * (i + 1)}))
        .collect();

    (json!({"tokens": tokens, "nfts": [{"mint": "Nft1"}]}), Value::Array(transactions))
}

pub fn mock_source() -> MockSource {
    let (balances, transactions) = active_wallet_data();

    MockSource::default()
        .with_wallet(WALLET_ACTIVE, Some(balances), Some(transactions.clone()))
        .with_wallet(WALLET_EMPTY, Some(json!({"tokens": [], "nfts": []})), Some(json!([])))
        .with_wallet(WALLET_NO_BALANCES, None, Some(transactions))
        .with_wallet(WALLET_BROKEN, None, None)
}

pub fn test_engine() -> ScoringEngine {
    EngineBuilder::new()
        .with_source(Arc::new(mock_source()))
        .with_clock(fixed_clock)
        .build()
}
