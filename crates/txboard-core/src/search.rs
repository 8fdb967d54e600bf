//! Search query snapshot

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default quiet period before a typed query is sent
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

/// URL query parameter holding the settled search query
pub const QUERY_PARAM: &str = "q";

/// Trimmed, immutable search text. Empty means "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Snapshot raw input, trimming surrounding whitespace
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    /// No filter
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SearchQuery {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl std::fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
