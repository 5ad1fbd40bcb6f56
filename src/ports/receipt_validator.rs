//! Receipt validator port.
//!
//! Re-validates a purchase receipt with the billing gateway of the
//! credential's platform. Implementations:
//!
//! - `HttpGatewayValidator` - one platform's HTTP gateway
//! - `PlatformRouter` - picks the validator for the credential's platform
//! - `RetryingValidator` - applies a `RetryPolicy` around another validator

use async_trait::async_trait;

use crate::domain::subscription::{
    ApplicationCredential, Receipt, ValidationError, ValidationOutcome,
};

/// Port for receipt validation.
#[async_trait]
pub trait ReceiptValidator: Send + Sync {
    async fn validate(
        &self,
        credential: &ApplicationCredential,
        receipt: &Receipt,
    ) -> Result<ValidationOutcome, ValidationError>;
}
