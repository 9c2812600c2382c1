//! Outbound rate limiting wrapper around governor.
//!
//! The indexer enforces a per-key request quota; every upstream call waits
//! for a permit here before it is sent.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use tracing::{debug, instrument};

const FALLBACK_REQUESTS_PER_SECOND: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Rate limiter shared by all requests to one upstream.
pub struct UpstreamRateLimiter {
    limiter: DefaultDirectRateLimiter,
    requests_per_second: NonZeroU32,
}

impl UpstreamRateLimiter {
    /// Create a limiter. A zero quota falls back to the default of 10 req/s.
    pub fn new(requests_per_second: u32) -> Self {
        let requests_per_second =
            NonZeroU32::new(requests_per_second).unwrap_or(FALLBACK_REQUESTS_PER_SECOND);

        Self {
            limiter: RateLimiter::direct(Quota::per_second(requests_per_second)),
            requests_per_second,
        }
    }

    /// Wait until a request may be sent.
    #[instrument(skip(self))]
    pub async fn acquire(&self) {
        if self.limiter.check().is_err() {
            debug!("Upstream quota exhausted, waiting for a permit");
            self.limiter.until_ready().await;
        }
    }

    /// Effective quota in requests per second.
    pub fn requests_per_second(&self) -> u32 {
        self.requests_per_second.get()
    }
}
