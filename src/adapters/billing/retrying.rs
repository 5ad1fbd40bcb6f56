//! Retry decorator for receipt validators.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::subscription::{
    ApplicationCredential, Receipt, RetryPolicy, ValidationError, ValidationOutcome,
};
use crate::ports::ReceiptValidator;

/// Applies a `RetryPolicy` around another validator.
///
/// The plan is chosen once per receipt before the first call. When the plan
/// allows several attempts, the wait before attempt `k` is taken first and
/// the first success wins. Exhausting a retried plan yields
/// `ValidationError::RetriesExhausted` wrapping the final failure; a
/// single-attempt plan returns the inner error unchanged.
pub struct RetryingValidator {
    inner: Arc<dyn ReceiptValidator>,
    policy: Arc<dyn RetryPolicy>,
}

impl RetryingValidator {
    pub fn new(inner: Arc<dyn ReceiptValidator>, policy: Arc<dyn RetryPolicy>) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl ReceiptValidator for RetryingValidator {
    async fn validate(
        &self,
        credential: &ApplicationCredential,
        receipt: &Receipt,
    ) -> Result<ValidationOutcome, ValidationError> {
        let plan = self.policy.plan_for(receipt);
        let mut attempt = 1;

        loop {
            let delay = plan.delay_before(attempt);
            if !delay.is_zero() {
                tracing::debug!(attempt, delay_secs = delay.as_secs(), "Waiting before validation attempt");
                tokio::time::sleep(delay).await;
            }

            let error = match self.inner.validate(credential, receipt).await {
                Ok(outcome) => return Ok(outcome),
                Err(e) => e,
            };

            if !plan.is_retried() || !error.is_retryable() {
                return Err(error);
            }

            tracing::warn!(
                attempt,
                max_attempts = plan.max_attempts,
                platform = %credential.platform,
                error = %error,
                "Receipt validation attempt failed"
            );

            if attempt >= plan.max_attempts {
                return Err(ValidationError::RetriesExhausted {
                    attempts: attempt,
                    last: Box::new(error),
                });
            }
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ApplicationId, CredentialId};
    use crate::domain::subscription::{NoRetry, Platform, ReceiptSuffixPolicy};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::Instant;

    /// Replays scripted results and records when each call happened.
    struct ScriptedValidator {
        results: Mutex<VecDeque<Result<ValidationOutcome, ValidationError>>>,
        calls: Mutex<Vec<Instant>>,
    }

    impl ScriptedValidator {
        fn new(results: Vec<Result<ValidationOutcome, ValidationError>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(results.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_times(&self) -> Vec<Instant> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReceiptValidator for ScriptedValidator {
        async fn validate(
            &self,
            _credential: &ApplicationCredential,
            _receipt: &Receipt,
        ) -> Result<ValidationOutcome, ValidationError> {
            self.calls.lock().unwrap().push(Instant::now());
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ValidationError::UnexpectedStatus(500)))
        }
    }

    fn credential() -> ApplicationCredential {
        ApplicationCredential::new(
            CredentialId::new(1),
            ApplicationId::new(10),
            Platform::Android,
            "user",
            "pass",
        )
    }

    fn retrying(inner: Arc<ScriptedValidator>) -> RetryingValidator {
        RetryingValidator::new(inner, Arc::new(ReceiptSuffixPolicy::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn divisible_suffix_makes_three_attempts_with_linear_backoff() {
        let inner = ScriptedValidator::new(vec![]);
        let validator = retrying(inner.clone());
        let started = Instant::now();

        let err = validator
            .validate(&credential(), &Receipt::new("999996"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ValidationError::RetriesExhausted {
                attempts: 3,
                last: Box::new(ValidationError::UnexpectedStatus(500)),
            }
        );

        let calls = inner.call_times();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0] - started, Duration::from_secs(5));
        assert_eq!(calls[1] - calls[0], Duration::from_secs(10));
        assert_eq!(calls[2] - calls[1], Duration::from_secs(15));
        assert_eq!(Instant::now() - started, Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn retried_path_returns_first_success() {
        let inner = ScriptedValidator::new(vec![
            Err(ValidationError::Timeout(Duration::from_secs(10))),
            Ok(ValidationOutcome::renewed("2025-06-01 00:00:00")),
        ]);
        let validator = retrying(inner.clone());

        let outcome = validator
            .validate(&credential(), &Receipt::new("AB12"))
            .await
            .unwrap();

        assert_eq!(outcome, ValidationOutcome::renewed("2025-06-01 00:00:00"));
        assert_eq!(inner.call_times().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_error_wraps_last_failure_only() {
        let inner = ScriptedValidator::new(vec![
            Err(ValidationError::Transport("refused".into())),
            Err(ValidationError::Timeout(Duration::from_secs(10))),
            Err(ValidationError::Decode("eof".into())),
        ]);
        let validator = retrying(inner);

        let err = validator
            .validate(&credential(), &Receipt::new("AB06"))
            .await
            .unwrap_err();

        assert_eq!(err.last_failure(), &ValidationError::Decode("eof".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn other_suffix_makes_a_single_immediate_attempt() {
        let inner = ScriptedValidator::new(vec![Err(ValidationError::UnexpectedStatus(502))]);
        let validator = retrying(inner.clone());
        let started = Instant::now();

        let err = validator
            .validate(&credential(), &Receipt::new("999991"))
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::UnexpectedStatus(502));
        assert_eq!(inner.call_times().len(), 1);
        assert_eq!(Instant::now() - started, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn unsupported_platform_is_not_retried() {
        let inner = ScriptedValidator::new(vec![Err(ValidationError::UnsupportedPlatform(
            "windows".into(),
        ))]);
        let validator = retrying(inner.clone());

        let err = validator
            .validate(&credential(), &Receipt::new("999996"))
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::UnsupportedPlatform("windows".into()));
        assert_eq!(inner.call_times().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn no_retry_policy_passes_through() {
        let inner = ScriptedValidator::new(vec![Err(ValidationError::UnexpectedStatus(500))]);
        let validator = RetryingValidator::new(inner.clone(), Arc::new(NoRetry));

        let err = validator
            .validate(&credential(), &Receipt::new("999996"))
            .await
            .unwrap_err();

        assert_eq!(err, ValidationError::UnexpectedStatus(500));
        assert_eq!(inner.call_times().len(), 1);
    }
}
