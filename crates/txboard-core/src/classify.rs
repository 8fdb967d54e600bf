//! Incoming/outgoing classification relative to the current user

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PaginatedResponse, Transaction};
use crate::types::Direction;

/// Classify a transaction from the point of view of `current_user`.
///
/// A transfer to oneself counts as outgoing. An empty identifier matches
/// nothing.
pub fn classify(tx: &Transaction, current_user: &str) -> Direction {
    let me = current_user.trim();
    if me.is_empty() || !tx.involves(me) {
        return Direction::Unrelated;
    }
    if tx.sender.trim() == me {
        Direction::Outgoing
    } else {
        Direction::Incoming
    }
}

/// Incoming and outgoing totals shown above the table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowTotals {
    pub incoming: Decimal,
    pub outgoing: Decimal,
}

impl FlowTotals {
    /// Sum absolute amounts of the given transactions by direction
    pub fn from_transactions<'a, I>(transactions: I, current_user: &str) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Self::default(), |mut totals, tx| {
                match classify(tx, current_user) {
                    Direction::Incoming => totals.incoming += tx.amount.abs(),
                    Direction::Outgoing => totals.outgoing += tx.amount.abs(),
                    Direction::Unrelated => {}
                }
                totals
            })
    }

    /// Prefer the API's totals; fill the missing ones from the current page
    pub fn from_response(response: &PaginatedResponse, current_user: &str) -> Self {
        let local = Self::from_transactions(&response.data, current_user);
        Self {
            incoming: response.incoming_sum.unwrap_or(local.incoming),
            outgoing: response.outgoing_sum.unwrap_or(local.outgoing),
        }
    }

    pub fn net(&self) -> Decimal {
        self.incoming - self.outgoing
    }
}
