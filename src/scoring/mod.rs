//! Scoring module - wallet reputation scoring from indexed on-chain data.
//!
//! The pipeline validates an address, fetches balances and transaction
//! history concurrently, extracts metrics from whatever arrived, and turns
//! them into a bounded score plus risk flags.

pub mod types;
pub mod validator;
pub mod data_sources;
pub mod rate_limit;
pub mod extractor;
pub mod scorer;
pub mod risk;
pub mod comparator;
pub mod engine;

// Re-export main public types and the engine
pub use engine::{ScoringEngine, Clock, system_clock};
pub use types::{WalletMetrics, TokenHolding, TransactionSummary, InstructionRecord};

// Re-export other key components for advanced usage
pub use data_sources::{RawDataSource, HeliusClient, FetchOutcome, WalletPayload};
pub use scorer::{ScoreBreakdown, score_metrics};
pub use risk::{RiskFlagger, RiskRule};
pub use validator::is_valid_address;

use crate::config::ServiceConfig;
use std::sync::Arc;
use tracing::warn;

/// Engine builder for convenient construction with sensible defaults.
pub struct EngineBuilder {
    source: Option<Arc<dyn RawDataSource>>,
    risk_flagger: RiskFlagger,
    clock: Clock,
}

impl EngineBuilder {
    /// Create a new builder with no data source and the default risk rules.
    pub fn new() -> Self {
        Self {
            source: None,
            risk_flagger: RiskFlagger::default(),
            clock: system_clock,
        }
    }

    /// Use the Helius client described by `config`.
    ///
    /// Without a credential the engine is still built, but every request
    /// fails with a configuration error.
    pub fn with_config(mut self, config: &ServiceConfig) -> Self {
        match HeliusClient::new(config) {
            Ok(client) => self.source = Some(Arc::new(client)),
            Err(e) => {
                warn!("Upstream indexer not configured: {}", e);
                self.source = None;
            }
        }
        self
    }

    /// Set the data source.
    pub fn with_source(mut self, source: Arc<dyn RawDataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Add a risk rule on top of the defaults.
    pub fn with_risk_rule(mut self, rule: RiskRule) -> Self {
        self.risk_flagger = self.risk_flagger.with_rule(rule);
        self
    }

    /// Replace the whole rule set.
    pub fn with_risk_flagger(mut self, risk_flagger: RiskFlagger) -> Self {
        self.risk_flagger = risk_flagger;
        self
    }

    /// Set the clock used for account age.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the engine.
    pub fn build(self) -> ScoringEngine {
        ScoringEngine::new(self.source, self.risk_flagger, self.clock)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
