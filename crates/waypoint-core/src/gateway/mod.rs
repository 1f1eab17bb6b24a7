//! Resilient wrapper around the external generative-text service.
//!
//! The gateway owns two policies the rest of the crate never sees:
//!
//! 1. **Credential rotation.** Calls run against the pool's active
//!    credential. A rate-limit/quota failure advances the shared cursor
//!    and retries, up to one attempt per credential; any other failure
//!    propagates after a single attempt.
//! 2. **Fallback substitution.** Each public generation operation pairs
//!    its prompt with a typed fallback payload. Whatever goes wrong
//!    upstream (transport, quota exhaustion across every key, or
//!    unparseable output), the caller receives a well-formed value and
//!    the error is logged, never returned.
//!
//! Parse failures deliberately do not retry: a model that answered with
//! prose will answer with prose again, and burning the remaining
//! credentials on it helps nobody.

use std::future::Future;

use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod client;
pub mod extract;
pub mod pool;
pub mod prompts;
pub mod responses;

pub use client::ModelClient;
pub use pool::CredentialPool;
pub use prompts::{DailyContext, NotificationContext, PlanRequest, SummaryContext};
pub use responses::{
    DailyMission, DashboardSummary, GeneratedPlan, MissionTask, NotificationCopy,
};

/// Errors raised by gateway calls.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The credential pool is empty
    #[error("no API credentials configured")]
    NoCredentials,
    /// The endpoint answered with a non-success status
    #[error("model endpoint returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },
    /// The request never completed
    #[error("transport error: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },
    /// The response carried no usable payload
    #[error("malformed model response: {0}")]
    Malformed(String),
}

impl GatewayError {
    /// Whether this failure is a rate-limit/quota signal worth rotating
    /// credentials for. Everything else fails fast.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GatewayError::Upstream { status, message } => {
                *status == 429 || message.contains("429") || message.contains("quota")
            }
            GatewayError::Transport { source } => {
                source.status().is_some_and(|s| s.as_u16() == 429)
            }
            _ => false,
        }
    }
}

/// The active credential bound to a client, handed to call operations.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    client: ModelClient,
    api_key: String,
    /// Position of the credential in the pool, for logging
    pub index: usize,
}

impl ModelHandle {
    /// Send `prompt` through the bound credential.
    pub async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        self.client.generate(&self.api_key, prompt).await
    }
}

/// Resilient entry point for all generation operations.
#[derive(Debug)]
pub struct Gateway {
    pool: CredentialPool,
    client: ModelClient,
}

impl Gateway {
    /// Create a gateway over a credential pool and model client.
    pub fn new(pool: CredentialPool, client: ModelClient) -> Self {
        Self { pool, client }
    }

    /// Invoke `op` with the active credential, rotating on rate limits.
    ///
    /// With `N` credentials, a persistent rate limit produces exactly `N`
    /// attempts before the final error propagates. A non-rate-limit error
    /// propagates after the first attempt.
    pub async fn call_with_rotation<T, F, Fut>(&self, mut op: F) -> Result<T, GatewayError>
    where
        F: FnMut(ModelHandle) -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let max_attempts = self.pool.len();
        let mut attempt = 0;

        loop {
            let Some((index, key)) = self.pool.active() else {
                return Err(GatewayError::NoCredentials);
            };
            log::debug!("model call attempt {} using credential #{}", attempt + 1, index + 1);

            let handle = ModelHandle {
                client: self.client.clone(),
                api_key: key.to_string(),
                index,
            };

            match op(handle).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_rate_limited() && attempt + 1 < max_attempts => {
                    let next = self.pool.advance();
                    log::warn!("rate limit hit, switching to credential #{}", next + 1);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Run one prompt through rotation and JSON extraction, substituting
    /// `fallback` on any unrecovered failure.
    async fn call_or_fallback<T>(
        &self,
        label: &str,
        prompt: String,
        fallback: impl FnOnce() -> T,
    ) -> T
    where
        T: DeserializeOwned,
    {
        let result = self
            .call_with_rotation(|handle| {
                let prompt = prompt.clone();
                async move {
                    let text = handle.generate(&prompt).await?;
                    extract::extract_payload::<T>(&text)
                        .map_err(|e| GatewayError::Malformed(e.to_string()))
                }
            })
            .await;

        match result {
            Ok(value) => value,
            Err(err) => {
                log::error!("{label} generation failed, using fallback: {err}");
                fallback()
            }
        }
    }

    /// Generate a complete multi-day plan. Never fails.
    pub async fn generate_plan(&self, req: &PlanRequest) -> GeneratedPlan {
        self.call_or_fallback("plan", prompts::plan_prompt(req), || {
            GeneratedPlan::fallback(req)
        })
        .await
    }

    /// Generate today's task set. Never fails.
    pub async fn generate_daily(&self, ctx: &DailyContext) -> DailyMission {
        self.call_or_fallback("daily mission", prompts::daily_prompt(ctx), || {
            DailyMission::fallback(ctx)
        })
        .await
    }

    /// Generate the dashboard summary. Never fails.
    pub async fn generate_summary(&self, ctx: &SummaryContext) -> DashboardSummary {
        self.call_or_fallback("dashboard summary", prompts::summary_prompt(ctx), || {
            DashboardSummary::fallback(ctx)
        })
        .await
    }

    /// Generate notification copy. Never fails.
    pub async fn generate_notification(&self, ctx: &NotificationContext) -> NotificationCopy {
        self.call_or_fallback("notification", prompts::notification_prompt(ctx), || {
            NotificationCopy::fallback(ctx)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn gateway_with_keys(n: usize) -> Gateway {
        let keys = (0..n).map(|i| format!("key-{i}")).collect();
        Gateway::new(CredentialPool::new(keys), ModelClient::new())
    }

    fn rate_limited() -> GatewayError {
        GatewayError::Upstream {
            status: 429,
            message: "quota exceeded".to_string(),
        }
    }

    #[test]
    fn test_rate_limit_classification() {
        assert!(rate_limited().is_rate_limited());
        assert!(GatewayError::Upstream {
            status: 500,
            message: "quota exceeded for project".to_string(),
        }
        .is_rate_limited());
        assert!(!GatewayError::Upstream {
            status: 500,
            message: "internal".to_string(),
        }
        .is_rate_limited());
        assert!(!GatewayError::Malformed("nope".to_string()).is_rate_limited());
    }

    #[tokio::test]
    async fn test_persistent_rate_limit_attempts_every_credential() {
        let gateway = gateway_with_keys(3);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let result: Result<(), _> = gateway
            .call_with_rotation(|_handle| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(rate_limited())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_hard_failure_makes_exactly_one_attempt() {
        let gateway = gateway_with_keys(3);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let result: Result<(), _> = gateway
            .call_with_rotation(|_handle| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(GatewayError::Malformed("prose instead of JSON".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(GatewayError::Malformed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rotation_recovers_on_second_credential() {
        let gateway = gateway_with_keys(2);
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let result = gateway
            .call_with_rotation(|handle| {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        Err(rate_limited())
                    } else {
                        Ok(handle.index)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_pool_yields_no_credentials() {
        let gateway = gateway_with_keys(0);
        let result: Result<(), _> = gateway
            .call_with_rotation(|_handle| async move { Ok(()) })
            .await;
        assert!(matches!(result, Err(GatewayError::NoCredentials)));
    }

    #[tokio::test]
    async fn test_generate_plan_falls_back_without_credentials() {
        let gateway = gateway_with_keys(0);
        let req = PlanRequest {
            title: "Learn Rust".to_string(),
            total_days: 14,
            ..Default::default()
        };

        let plan = gateway.generate_plan(&req).await;
        assert_eq!(plan.goal_title, "Learn Rust");
        assert_eq!(plan.total_days, 14);
        assert_eq!(plan.full_plan.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_notification_falls_back_without_credentials() {
        let gateway = gateway_with_keys(0);
        let ctx = NotificationContext {
            goal_title: "Learn Rust".to_string(),
            ..Default::default()
        };

        let copy = gateway.generate_notification(&ctx).await;
        assert!(copy.message.contains("Learn Rust"));
    }
}
