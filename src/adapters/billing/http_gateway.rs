//! HTTP billing gateway adapter.
//!
//! Implements `ReceiptValidator` against one platform's gateway:
//!
//! ```text
//! POST {base_url}/receipt/validate
//! Authorization: Basic <username:password>
//! Content-Type: application/json
//!
//! {"receipt": "<token>"}
//! ```
//!
//! Only `200 OK` counts as success. The body must decode as
//! `{"status": bool, "expire-date": "YYYY-MM-DD HH:MM:SS"}`. A missing or
//! `null` field reads as its zero value: `false` and `""`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::subscription::{
    ApplicationCredential, Receipt, ValidationError, ValidationOutcome,
};
use crate::ports::ReceiptValidator;

/// Default per-attempt bound for a gateway call.
pub const DEFAULT_GATEWAY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct ReceiptRequest<'a> {
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct ReceiptResponse {
    #[serde(default)]
    status: Option<bool>,
    #[serde(rename = "expire-date", default)]
    expire_date: Option<String>,
}

impl From<ReceiptResponse> for ValidationOutcome {
    fn from(response: ReceiptResponse) -> Self {
        if response.status.unwrap_or(false) {
            ValidationOutcome::renewed(response.expire_date.unwrap_or_default())
        } else {
            ValidationOutcome::canceled()
        }
    }
}

/// Receipt validator backed by one platform's HTTP gateway.
pub struct HttpGatewayValidator {
    base_url: String,
    timeout: Duration,
    http_client: reqwest::Client,
}

impl HttpGatewayValidator {
    /// Create a validator with its own client bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            timeout,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/receipt/validate", self.base_url.trim_end_matches('/'))
    }

    fn map_send_error(&self, e: reqwest::Error) -> ValidationError {
        if e.is_timeout() {
            ValidationError::Timeout(self.timeout)
        } else {
            ValidationError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ReceiptValidator for HttpGatewayValidator {
    async fn validate(
        &self,
        credential: &ApplicationCredential,
        receipt: &Receipt,
    ) -> Result<ValidationOutcome, ValidationError> {
        let response = self
            .http_client
            .post(self.endpoint())
            .basic_auth(&credential.username, Some(credential.password()))
            .json(&ReceiptRequest {
                receipt: receipt.as_str(),
            })
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!(
                platform = %credential.platform,
                status = status.as_u16(),
                "Billing gateway rejected receipt validation"
            );
            return Err(ValidationError::UnexpectedStatus(status.as_u16()));
        }

        let body: ReceiptResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ValidationError::Timeout(self.timeout)
            } else {
                ValidationError::Decode(e.to_string())
            }
        })?;

        Ok(body.into())
    }
}

impl std::fmt::Debug for HttpGatewayValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGatewayValidator")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
