//! Application credentials and platforms.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::foundation::{ApplicationId, CredentialId};

/// Storefront that issued a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
    /// Stored value the worker has no gateway for.
    Unknown(String),
}

impl Platform {
    /// Parses the stored platform tag. Only the exact lowercase tags are
    /// known; anything else is kept as `Unknown`.
    pub fn parse(value: &str) -> Self {
        match value {
            "ios" => Platform::Ios,
            "android" => Platform::Android,
            _ => Platform::Unknown(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Platform::Ios => "ios",
            Platform::Android => "android",
            Platform::Unknown(other) => other,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gateway credentials registered for an application.
#[derive(Clone)]
pub struct ApplicationCredential {
    pub id: CredentialId,
    pub application_id: ApplicationId,
    pub platform: Platform,
    pub username: String,
    password: SecretString,
}

impl ApplicationCredential {
    pub fn new(
        id: CredentialId,
        application_id: ApplicationId,
        platform: Platform,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id,
            application_id,
            platform,
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Exposes the password for HTTP basic auth.
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for ApplicationCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationCredential")
            .field("id", &self.id)
            .field("application_id", &self.application_id)
            .field("platform", &self.platform)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
