//! Heuristic risk flags for scored wallets.
//!
//! Each rule is an independent predicate over the extracted metrics.
//! Rules do not see each other's results and any number of them may fire.

use crate::scoring::types::WalletMetrics;
use std::fmt;
use tracing::{debug, warn};

pub const EMPTY_WALLET_FLAG: &str = "New/empty wallet";

/// A single named risk rule.
#[derive(Clone, Copy)]
pub struct RiskRule {
    pub name: &'static str,
    /// Message added to the snapshot when the rule fires
    pub flag: &'static str,
    pub predicate: fn(&WalletMetrics) -> bool,
}

impl RiskRule {
    pub const fn new(
        name: &'static str,
        flag: &'static str,
        predicate: fn(&WalletMetrics) -> bool,
    ) -> Self {
        Self {
            name,
            flag,
            predicate,
        }
    }

    pub fn applies(&self, metrics: &WalletMetrics) -> bool {
        (self.predicate)(metrics)
    }
}

impl fmt::Debug for RiskRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiskRule")
            .field("name", &self.name)
            .field("flag", &self.flag)
            .finish()
    }
}

fn is_empty_wallet(metrics: &WalletMetrics) -> bool {
    metrics.transaction_count == 0 && metrics.token_count == 0
}

/// No transactions and no tokens.
pub const EMPTY_WALLET: RiskRule = RiskRule::new("empty_wallet", EMPTY_WALLET_FLAG, is_empty_wallet);

/// Ordered set of risk rules.
#[derive(Debug, Clone)]
pub struct RiskFlagger {
    rules: Vec<RiskRule>,
}

impl RiskFlagger {
    /// A flagger with no rules at all.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule.
    pub fn with_rule(mut self, rule: RiskRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    /// Evaluate every rule and collect the flags of those that fire.
    pub fn flag(&self, metrics: &WalletMetrics) -> Vec<String> {
        let flags: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| rule.applies(metrics))
            .map(|rule| {
                debug!("Risk rule {} fired", rule.name);
                rule.flag.to_string()
            })
            .collect();

        if !flags.is_empty() {
            warn!("Wallet raised {} risk flags: {:?}", flags.len(), flags);
        }

        flags
    }
}

impl Default for RiskFlagger {
    fn default() -> Self {
        Self::empty().with_rule(EMPTY_WALLET)
    }
}
