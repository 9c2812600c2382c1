//! Data sources for fetching wallet balances and transaction history.
//!
//! The scoring pipeline only depends on the `RawDataSource` trait; the Helius
//! REST client is the production implementation.

use crate::config::ServiceConfig;
use crate::error::ScoreError;
use crate::scoring::rate_limit::UpstreamRateLimiter;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Contract for the upstream indexing service.
#[async_trait]
pub trait RawDataSource: Send + Sync {
    /// Token and NFT balances, as the raw JSON document.
    async fn fetch_balances(&self, address: &str) -> Result<Value>;

    /// Recent transaction summaries, as the raw JSON document.
    async fn fetch_transactions(&self, address: &str) -> Result<Value>;
}

/// Result of one upstream fetch, consumed by the extractor.
#[derive(Debug)]
pub enum FetchOutcome {
    Fetched(Value),
    Failed(anyhow::Error),
}

impl FetchOutcome {
    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchOutcome::Fetched(_))
    }

    /// The payload, if the fetch succeeded.
    pub fn data(&self) -> Option<&Value> {
        match self {
            FetchOutcome::Fetched(value) => Some(value),
            FetchOutcome::Failed(_) => None,
        }
    }
}

impl From<Result<Value>> for FetchOutcome {
    fn from(result: Result<Value>) -> Self {
        match result {
            Ok(value) => FetchOutcome::Fetched(value),
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

/// Both fetches for one wallet.
#[derive(Debug)]
pub struct WalletPayload {
    pub balances: FetchOutcome,
    pub transactions: FetchOutcome,
}

impl WalletPayload {
    /// Issue both fetches concurrently. A failure of one does not affect the other.
    #[instrument(skip(source))]
    pub async fn fetch(source: &dyn RawDataSource, address: &str) -> Self {
        let (balances, transactions) = tokio::join!(
            source.fetch_balances(address),
            source.fetch_transactions(address),
        );

        let payload = Self {
            balances: balances.into(),
            transactions: transactions.into(),
        };

        if let FetchOutcome::Failed(e) = &payload.balances {
            warn!("Balances fetch failed for {}: {:#}", address, e);
        }
        if let FetchOutcome::Failed(e) = &payload.transactions {
            warn!("Transactions fetch failed for {}: {:#}", address, e);
        }

        payload
    }

    /// Fails only when neither fetch produced data.
    pub fn into_usable(self) -> std::result::Result<Self, ScoreError> {
        match (&self.balances, &self.transactions) {
            (FetchOutcome::Failed(balances_err), FetchOutcome::Failed(transactions_err)) => {
                Err(ScoreError::FetchFailed(anyhow!(
                    "balances: {:#}; transactions: {:#}",
                    balances_err,
                    transactions_err
                )))
            }
            _ => Ok(self),
        }
    }
}

/// Helius REST client.
pub struct HeliusClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    transaction_limit: u32,
    rate_limiter: UpstreamRateLimiter,
}

impl HeliusClient {
    /// Create a client from configuration. A missing API key is a configuration error.
    pub fn new(config: &ServiceConfig) -> std::result::Result<Self, ScoreError> {
        let api_key = config
            .helius_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ScoreError::MissingCredential)?
            .to_string();

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Ok(Self {
            http_client,
            base_url: config.helius_base_url.trim_end_matches('/').to_string(),
            api_key,
            transaction_limit: config.transaction_limit,
            rate_limiter: UpstreamRateLimiter::new(config.requests_per_second),
        })
    }

    fn address_url(&self, address: &str, resource: &str) -> String {
        format!("{}/addresses/{}/{}", self.base_url, address, resource)
    }

    /// GET a JSON document. The API key is only ever sent as a query parameter,
    /// and request URLs are stripped from reqwest errors so it cannot reach logs.
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        self.rate_limiter.acquire().await;

        let response = self
            .http_client
            .get(url)
            .query(&[("api-key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("{} returned {}: {}", url, status, body));
        }

        response
            .json::<Value>()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

#[async_trait]
impl RawDataSource for HeliusClient {
    #[instrument(skip(self))]
    async fn fetch_balances(&self, address: &str) -> Result<Value> {
        let url = self.address_url(address, "balances");
        let value = self.get_json(&url, &[]).await?;
        debug!("Fetched balances for {}", address);
        Ok(value)
    }

    #[instrument(skip(self))]
    async fn fetch_transactions(&self, address: &str) -> Result<Value> {
        let url = self.address_url(address, "transactions");
        let value = self
            .get_json(&url, &[("limit", self.transaction_limit.to_string())])
            .await?;
        debug!(
            "Fetched {} transactions for {}",
            value.as_array().map(Vec::len).unwrap_or(0),
            address
        );
        Ok(value)
    }
}
