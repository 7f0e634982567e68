// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Delivery engine: issues the intake request and drives retries.
//!
//! ```text
//!   Pending ──▶ Attempting(n) ──▶ Success
//!                 │      ▲
//!       retryable │      │ backoff elapsed
//!                 ▼      │
//!               RetryWait(n) ── n == max ──▶ Failed
//! ```
//!
//! - **2xx**: the body is decoded as JSON. A body that does not decode is a
//!   terminal [`LogglyError::Decode`], it is not retried.
//! - **Other statuses and network failures**: retried until the attempt
//!   budget of the [`RetryStrategy`] is spent, then reported with the last
//!   error.
//!
//! Only one outcome leaves [`DeliveryEngine::deliver`], however many attempts
//! were made.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, error, trace};

use crate::constants::{DEFAULT_BACKOFF_BASE_MS, DEFAULT_BACKOFF_MAX_MS, DEFAULT_MAX_ATTEMPTS};
use crate::error::LogglyError;
use crate::request::RequestSpec;
use crate::serialize::{serialize, Mapping, Value};
use crate::transport::{Transport, TransportResponse};

/// Terminal result of one `log` call: the decoded intake response, or the
/// error that ended delivery.
pub type DeliveryOutcome = Result<serde_json::Value, LogglyError>;

/// How many attempts are made for one message and how long to wait between
/// them. Every variant carries the total number of attempts, first one
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RetryStrategy {
    /// Retry without waiting.
    Immediate(u32),
    /// Wait the same number of milliseconds before every retry.
    LinearBackoff(u32, u64),
    /// Wait `base_ms * 2^(n-1)` before the n-th retry, capped at `max_ms`.
    ExponentialBackoff {
        attempts: u32,
        base_ms: u64,
        max_ms: u64,
    },
}

impl Default for RetryStrategy {
    fn default() -> Self {
        RetryStrategy::ExponentialBackoff {
            attempts: DEFAULT_MAX_ATTEMPTS,
            base_ms: DEFAULT_BACKOFF_BASE_MS,
            max_ms: DEFAULT_BACKOFF_MAX_MS,
        }
    }
}

impl RetryStrategy {
    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        match *self {
            RetryStrategy::Immediate(attempts)
            | RetryStrategy::LinearBackoff(attempts, _)
            | RetryStrategy::ExponentialBackoff { attempts, .. } => attempts,
        }
    }

    /// Same backoff curve with a different attempt budget.
    #[must_use]
    pub fn with_attempts(self, attempts: u32) -> Self {
        match self {
            RetryStrategy::Immediate(_) => RetryStrategy::Immediate(attempts),
            RetryStrategy::LinearBackoff(_, delay_ms) => {
                RetryStrategy::LinearBackoff(attempts, delay_ms)
            }
            RetryStrategy::ExponentialBackoff {
                base_ms, max_ms, ..
            } => RetryStrategy::ExponentialBackoff {
                attempts,
                base_ms,
                max_ms,
            },
        }
    }

    /// Delay before retry number `retry` (1 for the second attempt).
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        match *self {
            RetryStrategy::Immediate(_) => Duration::ZERO,
            RetryStrategy::LinearBackoff(_, delay_ms) => Duration::from_millis(delay_ms),
            RetryStrategy::ExponentialBackoff {
                base_ms, max_ms, ..
            } => {
                let factor = 1_u64
                    .checked_shl(retry.saturating_sub(1))
                    .unwrap_or(u64::MAX);
                Duration::from_millis(base_ms.saturating_mul(factor).min(max_ms))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryState {
    Pending,
    Attempting(u32),
    RetryWait(u32),
    Success(serde_json::Value),
    Failed(LogglyError),
}

/// What to do after an attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    Success(serde_json::Value),
    Retry(LogglyError),
    Fail(LogglyError),
}

/// One HTTP round-trip made for a message.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryAttempt {
    pub number: u32,
    /// Response status, `None` on a network-level failure.
    pub status: Option<u16>,
    pub decision: Decision,
}

/// Outcome of a delivery together with the number of attempts it took.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub outcome: DeliveryOutcome,
    pub attempts: u32,
}

/// Classifies the answer of the transport.
#[must_use]
pub fn classify(result: Result<TransportResponse, LogglyError>) -> Decision {
    match result {
        Ok(response) if (200..300).contains(&response.status) => {
            match serde_json::from_slice(&response.body) {
                Ok(body) => Decision::Success(body),
                Err(e) => Decision::Fail(LogglyError::Decode(e.to_string())),
            }
        }
        Ok(response) => Decision::Retry(LogglyError::Server {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        }),
        Err(e) if e.is_retryable() => Decision::Retry(e),
        Err(e) => Decision::Fail(e),
    }
}

#[derive(Clone)]
pub struct DeliveryEngine {
    transport: Arc<dyn Transport>,
    retry: RetryStrategy,
}

impl DeliveryEngine {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, retry: RetryStrategy) -> Self {
        DeliveryEngine { transport, retry }
    }

    #[must_use]
    pub fn retry(&self) -> RetryStrategy {
        self.retry
    }

    /// Makes a single attempt.
    pub async fn attempt(&self, request: &RequestSpec, number: u32) -> DeliveryAttempt {
        let result = self.transport.send(request).await;
        let status = match &result {
            Ok(response) => Some(response.status),
            Err(_) => None,
        };
        DeliveryAttempt {
            number,
            status,
            decision: classify(result),
        }
    }

    /// Delivers `request`, retrying as the strategy allows.
    pub async fn deliver(&self, request: &RequestSpec) -> Delivery {
        let max_attempts = self.retry.max_attempts().max(1);
        let mut attempts = 0;
        let mut state = DeliveryState::Pending;

        loop {
            state = match state {
                DeliveryState::Pending => DeliveryState::Attempting(1),
                DeliveryState::Attempting(n) => {
                    attempts = n;
                    let attempt = self.attempt(request, n).await;
                    match attempt.decision {
                        Decision::Success(body) => DeliveryState::Success(body),
                        Decision::Retry(e) if n < max_attempts => {
                            debug!("LOGGLY | Attempt {n}/{max_attempts} failed, retrying: {e}");
                            DeliveryState::RetryWait(n)
                        }
                        Decision::Retry(e) | Decision::Fail(e) => {
                            error!(
                                "LOGGLY | Failed to deliver message: {}",
                                failure_context(request, n, &e)
                            );
                            DeliveryState::Failed(e)
                        }
                    }
                }
                DeliveryState::RetryWait(n) => {
                    tokio::time::sleep(self.retry.delay(n)).await;
                    DeliveryState::Attempting(n + 1)
                }
                DeliveryState::Success(body) => {
                    return Delivery {
                        outcome: Ok(body),
                        attempts,
                    }
                }
                DeliveryState::Failed(e) => {
                    return Delivery {
                        outcome: Err(e),
                        attempts,
                    }
                }
            };
            trace!("LOGGLY | Delivery state: {state:?}");
        }
    }
}

fn failure_context(request: &RequestSpec, attempts: u32, error: &LogglyError) -> String {
    let context = Mapping::new();
    context.insert("host", request.url.host_str().unwrap_or_default());
    context.insert("attempts", i64::from(attempts));
    if let Some(status) = error.status() {
        context.insert("status", i64::from(status));
    }
    context.insert("error", error.to_string());
    serialize(&Value::Map(context))
}
