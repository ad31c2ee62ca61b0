//! ID types shared across providers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SportIntelError};

/// Type-safe wrapper for player IDs.
///
/// Providers disagree on ID representation (numeric for the stats feed,
/// strings for salary sites), so the canonical form is the string one.
///
/// # Examples
///
/// ```rust
/// use sportintel::PlayerId;
///
/// let id = PlayerId::new("237");
/// assert_eq!(id.as_str(), "237");
/// assert_eq!(id.to_string(), "237");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = SportIntelError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(SportIntelError::validation("player id must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl From<u64> for PlayerId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}
