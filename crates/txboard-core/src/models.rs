//! Data models exchanged with the transactions API

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::pagination::PaginationState;

/// Transaction information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: String,
    /// Transferred amount (always positive on the wire)
    pub amount: Decimal,
    /// ISO currency code
    #[serde(default)]
    pub currency: Option<String>,
    /// Free-text description
    #[serde(default)]
    pub description: String,
    /// Sending account identifier
    pub sender: String,
    /// Receiving account identifier
    pub recipient: String,
    /// Creation timestamp, `YYYY-MM-DD` or an RFC 3339 date-time
    pub created_at: String,
    /// Processing status reported by the API
    #[serde(default)]
    pub status: Option<String>,
}

impl Transaction {
    /// Parse the calendar date out of `created_at`
    pub fn date_naive(&self) -> Option<NaiveDate> {
        let date = self.created_at.get(..10)?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    /// Date for display, falling back to the raw timestamp
    pub fn display_date(&self) -> String {
        match self.date_naive() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => self.created_at.clone(),
        }
    }

    /// Check whether the account takes part in this transaction.
    /// Surrounding whitespace in either side is ignored.
    pub fn involves(&self, account: &str) -> bool {
        let account = account.trim();
        self.sender.trim() == account || self.recipient.trim() == account
    }
}

/// Page of transactions returned by the list and search endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse {
    /// Transactions on this page
    pub data: Vec<Transaction>,
    /// Pagination metadata
    pub pagination: PaginationState,
    /// Total received by the current user across the whole result set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incoming_sum: Option<Decimal>,
    /// Total sent by the current user across the whole result set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outgoing_sum: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_transaction_dates() {
        let tx = Transaction {
            id: "tx-1".to_string(),
            amount: Decimal::from_str("12.50").unwrap(),
            currency: Some("EUR".to_string()),
            description: "Lunch".to_string(),
            sender: "acc-1".to_string(),
            recipient: "acc-2".to_string(),
            created_at: "2024-06-15T10:30:00Z".to_string(),
            status: None,
        };

        assert_eq!(tx.date_naive(), NaiveDate::from_ymd_opt(2024, 6, 15));
        assert_eq!(tx.display_date(), "2024-06-15");
        assert!(tx.involves("acc-2"));
        assert!(tx.involves(" acc-1 "));
        assert!(!tx.involves("acc-3"));
    }

    #[test]
    fn test_unparseable_date_falls_back() {
        let tx = Transaction {
            id: "tx-2".to_string(),
            amount: Decimal::ONE,
            currency: None,
            description: String::new(),
            sender: "a".to_string(),
            recipient: "b".to_string(),
            created_at: "yesterday".to_string(),
            status: None,
        };

        assert!(tx.date_naive().is_none());
        assert_eq!(tx.display_date(), "yesterday");
    }

    #[test]
    fn test_response_from_api_json() {
        let body = serde_json::json!({
            "data": [{
                "id": "tx-9",
                "amount": 42.1,
                "currency": "USD",
                "description": "Refund",
                "sender": "shop",
                "recipient": "me",
                "createdAt": "2024-01-02"
            }],
            "pagination": {"page": 2, "limit": 10, "total": 11, "totalPages": 2},
            "incomingSum": 42.1
        });

        let response: PaginatedResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].amount, Decimal::from_str("42.1").unwrap());
        assert_eq!(response.pagination.total_pages, 2);
        assert_eq!(response.incoming_sum, Some(Decimal::from_str("42.1").unwrap()));
        assert!(response.outgoing_sum.is_none());
    }
}
