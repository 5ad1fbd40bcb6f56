//! Receipt value object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque purchase token issued by a storefront.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Receipt(String);

impl Receipt {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last `n` characters of the token, or `None` when it is shorter.
    pub fn suffix(&self, n: usize) -> Option<&str> {
        let count = self.0.chars().count();
        if count < n {
            return None;
        }
        let start = self
            .0
            .char_indices()
            .nth(count - n)
            .map(|(idx, _)| idx)
            .unwrap_or(self.0.len());
        Some(&self.0[start..])
    }
}

// Receipts are customer purchase data; keep them out of logs.
impl fmt::Debug for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Receipt(len={})", self.0.len())
    }
}
