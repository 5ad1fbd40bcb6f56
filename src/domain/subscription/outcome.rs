//! Validation outcome and the label derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of re-validating a receipt with its billing gateway.
///
/// The new expiration is kept as the raw gateway string; the state updater
/// parses it so that a malformed date is reported as an update failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub renewed: bool,
    pub expire_date: Option<String>,
}

impl ValidationOutcome {
    pub fn renewed(expire_date: impl Into<String>) -> Self {
        Self {
            renewed: true,
            expire_date: Some(expire_date.into()),
        }
    }

    pub fn canceled() -> Self {
        Self {
            renewed: false,
            expire_date: None,
        }
    }
}

/// Label announced downstream after a subscription has been reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLabel {
    Renewed,
    Canceled,
}

impl OutcomeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeLabel::Renewed => "renewed",
            OutcomeLabel::Canceled => "canceled",
        }
    }
}

impl fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&OutcomeLabel::Renewed).unwrap(), "\"renewed\"");
        assert_eq!(serde_json::to_string(&OutcomeLabel::Canceled).unwrap(), "\"canceled\"");
    }

    #[test]
    fn constructors_set_flag() {
        assert!(ValidationOutcome::renewed("2025-01-01 00:00:00").renewed);
        assert_eq!(ValidationOutcome::canceled().expire_date, None);
    }
}
