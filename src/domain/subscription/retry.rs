//! Retry policies for receipt validation.
//!
//! A policy decides, before the first gateway call, how many attempts a
//! receipt gets and how long to wait before each one. The validator that
//! applies the plan lives in `adapters::billing::RetryingValidator`.

use std::time::Duration;

use super::Receipt;

/// Attempt budget for one receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPlan {
    /// Total attempts, including the first. Never zero.
    pub max_attempts: u32,

    /// Unit of the linear backoff; zero means no waiting.
    pub base_delay: Duration,
}

impl RetryPlan {
    /// One attempt, no waiting.
    pub fn single() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }

    /// Delay before the 1-based `attempt`: `base_delay * attempt`.
    ///
    /// Single-attempt plans never wait.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if self.max_attempts <= 1 {
            return Duration::ZERO;
        }
        self.base_delay * attempt
    }

    pub fn is_retried(&self) -> bool {
        self.max_attempts > 1
    }
}

/// Chooses a retry plan for a receipt.
pub trait RetryPolicy: Send + Sync {
    fn plan_for(&self, receipt: &Receipt) -> RetryPlan;
}

/// Never retries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn plan_for(&self, _receipt: &Receipt) -> RetryPlan {
        RetryPlan::single()
    }
}

/// Retries receipts whose last two characters parse as an integer divisible
/// by six: three attempts, waiting `base_delay * k` before attempt `k`.
///
/// Receipts of any other shape get exactly one attempt.
#[derive(Debug, Clone, Copy)]
pub struct ReceiptSuffixPolicy {
    base_delay: Duration,
}

impl ReceiptSuffixPolicy {
    pub const ATTEMPTS: u32 = 3;
    pub const DIVISOR: i64 = 6;
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(5);

    pub fn new(base_delay: Duration) -> Self {
        Self { base_delay }
    }

    /// Whether the receipt falls under the retried path.
    pub fn applies_to(receipt: &Receipt) -> bool {
        receipt
            .suffix(2)
            .and_then(|suffix| suffix.parse::<i64>().ok())
            .map(|n| n % Self::DIVISOR == 0)
            .unwrap_or(false)
    }
}

impl Default for ReceiptSuffixPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_DELAY)
    }
}

impl RetryPolicy for ReceiptSuffixPolicy {
    fn plan_for(&self, receipt: &Receipt) -> RetryPlan {
        if Self::applies_to(receipt) {
            RetryPlan {
                max_attempts: Self::ATTEMPTS,
                base_delay: self.base_delay,
            }
        } else {
            RetryPlan::single()
        }
    }
}
