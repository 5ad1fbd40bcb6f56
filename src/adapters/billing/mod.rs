//! Billing gateway adapters.
//!
//! Production wiring nests the three validators:
//!
//! ```text
//! PlatformRouter
//!   ios     -> RetryingValidator -> HttpGatewayValidator (App Store)
//!   android -> RetryingValidator -> HttpGatewayValidator (Google Play)
//! ```

mod http_gateway;
mod platform_router;
mod retrying;

pub use http_gateway::{HttpGatewayValidator, DEFAULT_GATEWAY_TIMEOUT};
pub use platform_router::PlatformRouter;
pub use retrying::RetryingValidator;
