//! End-to-end tests for the wallet scoring pipeline

mod common;

use common::*;
use serde_json::json;
use std::sync::Arc;
use wallet_scope::scoring::risk::EMPTY_WALLET_FLAG;
use wallet_scope::scoring::{EngineBuilder, RiskFlagger, RiskRule};
use wallet_scope::ScoreError;

#[tokio::test]
async fn test_active_wallet_reference_score() {
    let engine = test_engine();

    let snapshot = engine.score_wallet(WALLET_ACTIVE).await.expect("scoring failed");

    assert_eq!(snapshot.transaction_count, 90);
    assert_eq!(snapshot.token_count, 5);
    assert_eq!(snapshot.nft_count, 1);
    assert_eq!(snapshot.account_age_days, Some(400));
    assert_eq!(snapshot.program_interaction_count, 3);
    assert_eq!(snapshot.score, 66);
    assert!(snapshot.risk_flags.is_empty());

    assert_eq!(snapshot.top_holdings.len(), 5);
    assert_eq!(snapshot.top_holdings[0].symbol, "TK0");
    assert_eq!(snapshot.recent_activity.len(), 5);
    assert_eq!(snapshot.recent_activity[0].signature.as_deref(), Some("sig0"));
    assert_eq!(snapshot.recent_activity[0].description.as_deref(), Some("TRANSFER"));
}

#[tokio::test]
async fn test_empty_wallet_scores_zero_and_is_flagged() {
    let engine = test_engine();

    let snapshot = engine.score_wallet(WALLET_EMPTY).await.expect("scoring failed");

    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.account_age_days, None);
    assert!(snapshot.risk_flags.contains(&EMPTY_WALLET_FLAG.to_string()));
}

#[tokio::test]
async fn test_balances_failure_degrades_gracefully() {
    let engine = test_engine();

    let snapshot = engine
        .score_wallet(WALLET_NO_BALANCES)
        .await
        .expect("partial failure must not fail the request");

    assert_eq!(snapshot.token_count, 0);
    assert!(snapshot.top_holdings.is_empty());
    assert_eq!(snapshot.transaction_count, 90);
    assert_eq!(snapshot.account_age_days, Some(400));
    assert_eq!(snapshot.program_interaction_count, 3);
    // 30 activity + 0 diversity + 20 age + 6 programs
    assert_eq!(snapshot.score, 56);
}

#[tokio::test]
async fn test_both_fetches_failing_is_an_error() {
    let engine = test_engine();

    let err = engine.score_wallet(WALLET_BROKEN).await.unwrap_err();
    assert!(matches!(err, ScoreError::FetchFailed(_)));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn test_repeated_program_counts_once() {
    let transactions: Vec<_> = (0..10)
        .map(|i| json!({"signature": format!("s{}", i), "instructions": [{"programId": "OnlyProgram"}]}))
        .collect();
    let source = MockSource::default().with_wallet(
        WALLET_ACTIVE,
        Some(json!({"tokens": [], "nfts": []})),
        Some(json!(transactions)),
    );
    let engine = EngineBuilder::new()
        .with_source(Arc::new(source))
        .with_clock(fixed_clock)
        .build();

    let snapshot = engine.score_wallet(WALLET_ACTIVE).await.unwrap();

    assert_eq!(snapshot.transaction_count, 10);
    assert_eq!(snapshot.program_interaction_count, 1);
    assert_eq!(snapshot.account_age_days, None);
    // 3 activity + 2 programs
    assert_eq!(snapshot.score, 5);
}

#[tokio::test]
async fn test_saturated_wallet_caps_at_100() {
    let transactions: Vec<_> = (0..200)
        .map(|i| {
            json!({
                "blockTime": NOW - 1000 * DAY + i,
                "instructions": [{"programId": format!("Prog{}", i % 25)}]
            })
        })
        .collect();
    let tokens: Vec<_> = (0..30).map(|i| json!({"mint": format!("M{}", i)})).collect();
    let source = MockSource::default().with_wallet(
        WALLET_ACTIVE,
        Some(json!({"tokens": tokens})),
        Some(json!(transactions)),
    );
    let engine = EngineBuilder::new()
        .with_source(Arc::new(source))
        .with_clock(fixed_clock)
        .build();

    let snapshot = engine.score_wallet(WALLET_ACTIVE).await.unwrap();

    assert_eq!(snapshot.score, 100);
    assert_eq!(snapshot.top_holdings.len(), 10);
    assert_eq!(snapshot.nft_count, 0);
}

#[tokio::test]
async fn test_malformed_payloads_degrade_to_defaults() {
    let source = MockSource::default().with_wallet(
        WALLET_ACTIVE,
        Some(json!("not an object")),
        Some(json!({"unexpected": "shape"})),
    );
    let engine = EngineBuilder::new()
        .with_source(Arc::new(source))
        .with_clock(fixed_clock)
        .build();

    let snapshot = engine.score_wallet(WALLET_ACTIVE).await.unwrap();

    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.transaction_count, 0);
    assert_eq!(snapshot.token_count, 0);
}

#[tokio::test]
async fn test_custom_risk_rule() {
    let engine = EngineBuilder::new()
        .with_source(Arc::new(mock_source()))
        .with_clock(fixed_clock)
        .with_risk_rule(RiskRule::new("no_nfts", "Holds no NFTs", |m| m.nft_count == 0))
        .build();

    let snapshot = engine.score_wallet(WALLET_EMPTY).await.unwrap();

    assert_eq!(snapshot.risk_flags.len(), 2);
    assert!(snapshot.risk_flags.contains(&"Holds no NFTs".to_string()));
}

#[tokio::test]
async fn test_replacing_risk_rules() {
    let engine = EngineBuilder::new()
        .with_source(Arc::new(mock_source()))
        .with_clock(fixed_clock)
        .with_risk_flagger(RiskFlagger::empty())
        .build();

    let snapshot = engine.score_wallet(WALLET_EMPTY).await.unwrap();
    assert_eq!(snapshot.score, 0);
    assert!(snapshot.risk_flags.is_empty());

    let only_nfts = RiskFlagger::empty()
        .with_rule(RiskRule::new("no_nfts", "Holds no NFTs", |m| m.nft_count == 0));
    let engine = EngineBuilder::new()
        .with_source(Arc::new(mock_source()))
        .with_clock(fixed_clock)
        .with_risk_flagger(only_nfts)
        .build();

    let snapshot = engine.score_wallet(WALLET_EMPTY).await.unwrap();
    assert_eq!(snapshot.risk_flags, vec!["Holds no NFTs".to_string()]);
}

#[tokio::test]
async fn test_unconfigured_engine_rejects_after_validation() {
    let engine = EngineBuilder::new().build();

    assert!(matches!(
        engine.score_wallet("bad address").await,
        Err(ScoreError::InvalidAddress(_))
    ));
    assert!(matches!(
        engine.score_wallet(WALLET_ACTIVE).await,
        Err(ScoreError::MissingCredential)
    ));
}
