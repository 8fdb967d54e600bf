//! Basic types for the dashboard

use serde::{Deserialize, Serialize};

/// Direction of a transaction relative to the current user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Money received by the current user
    Incoming,
    /// Money sent by the current user
    Outgoing,
    /// The current user is neither sender nor recipient
    Unrelated,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::Unrelated
    }
}

impl Direction {
    /// Sign prefix used when rendering the amount
    pub fn sign(&self) -> &'static str {
        match self {
            Direction::Incoming => "+",
            Direction::Outgoing => "-",
            Direction::Unrelated => "",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Incoming => write!(f, "incoming"),
            Direction::Outgoing => write!(f, "outgoing"),
            Direction::Unrelated => write!(f, "unrelated"),
        }
    }
}
