//! Platform dispatch for receipt validation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::{HttpGatewayValidator, RetryingValidator};
use crate::config::BillingConfig;
use crate::domain::subscription::{
    ApplicationCredential, Platform, Receipt, RetryPolicy, ValidationError, ValidationOutcome,
};
use crate::ports::ReceiptValidator;

/// Routes each validation to the validator registered for the credential's
/// platform.
///
/// A platform without a registered validator fails with
/// `ValidationError::UnsupportedPlatform` and no network call is made.
#[derive(Default)]
pub struct PlatformRouter {
    routes: HashMap<Platform, Arc<dyn ReceiptValidator>>,
}

impl PlatformRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `validator` for `platform`, replacing any previous one.
    pub fn with_platform(mut self, platform: Platform, validator: Arc<dyn ReceiptValidator>) -> Self {
        self.routes.insert(platform, validator);
        self
    }

    /// Builds the production routing table: `ios` goes to the App Store
    /// gateway and `android` to Google Play, each wrapped in `policy`.
    pub fn from_config(
        config: &BillingConfig,
        policy: Arc<dyn RetryPolicy>,
    ) -> Result<Self, reqwest::Error> {
        let timeout = config.request_timeout();
        let app_store = HttpGatewayValidator::new(&config.app_store_url, timeout)?;
        let google_play = HttpGatewayValidator::new(&config.google_play_url, timeout)?;

        Ok(Self::new()
            .with_platform(
                Platform::Ios,
                Arc::new(RetryingValidator::new(Arc::new(app_store), policy.clone())),
            )
            .with_platform(
                Platform::Android,
                Arc::new(RetryingValidator::new(Arc::new(google_play), policy)),
            ))
    }

    pub fn supports(&self, platform: &Platform) -> bool {
        self.routes.contains_key(platform)
    }
}

#[async_trait]
impl ReceiptValidator for PlatformRouter {
    async fn validate(
        &self,
        credential: &ApplicationCredential,
        receipt: &Receipt,
    ) -> Result<ValidationOutcome, ValidationError> {
        let validator = self.routes.get(&credential.platform).ok_or_else(|| {
            ValidationError::UnsupportedPlatform(credential.platform.as_str().to_string())
        })?;
        validator.validate(credential, receipt).await
    }
}
