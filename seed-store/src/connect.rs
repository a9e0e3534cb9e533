//! Connector: block until the database answers a health probe.
//!
//! The delay between attempts goes through [`Sleeper`] so tests can simulate
//! time. By default there is no attempt cap and the loop only ends on success.

use std::{future::Future, pin::Pin, time::Duration};

use tracing::{error, info, instrument, warn};

use crate::config::{SeedConfig, defaults};
use crate::errors::SeedError;
use crate::store::VectorStore;

/// Fixed-delay retry policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay between consecutive attempts.
    pub interval: Duration,
    /// Attempt cap; `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(defaults::RETRY_INTERVAL_SECS),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(cfg: &SeedConfig) -> Self {
        Self {
            interval: cfg.retry_interval,
            max_attempts: cfg.max_attempts,
        }
    }
}

/// Async delay used between connection attempts.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, dur: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// Real-time sleeper backed by `tokio::time::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, dur: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(dur))
    }
}

/// Probes `store` until it answers, sleeping `policy.interval` between failures.
///
/// Returns the number of attempts it took.
///
/// # Errors
/// Only with an attempt cap: [`SeedError::RetryExhausted`] once the last
/// allowed attempt fails. No sleep follows the final attempt.
#[instrument(skip_all, fields(interval = ?policy.interval, max_attempts = ?policy.max_attempts))]
pub async fn connect_with_retry(
    store: &dyn VectorStore,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
) -> Result<u32, SeedError> {
    info!("Attempting to connect to Qdrant...");

    let mut attempt: u32 = 0;
    loop {
        attempt = attempt.saturating_add(1);
        match store.probe().await {
            Ok(()) => {
                info!(attempts = attempt, "Successfully connected to Qdrant!");
                return Ok(attempt);
            }
            Err(e) => {
                if policy.max_attempts.is_some_and(|max| attempt >= max) {
                    error!(attempts = attempt, "Giving up on Qdrant: {e}");
                    return Err(SeedError::RetryExhausted {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
                warn!(
                    attempt,
                    "Connection failed: {e}. Retrying in {:?}...", policy.interval
                );
                sleeper.sleep(policy.interval).await;
            }
        }
    }
}
