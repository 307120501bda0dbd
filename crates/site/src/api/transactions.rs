// Transactions API routes

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use super::ListResponse;

#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub id: &'static str,
    pub account_id: &'static str,
    pub description: &'static str,
    /// Signed amount in minor units (cents)
    pub amount_cents: i64,
    /// Posting date (YYYY-MM-DD)
    pub posted_on: &'static str,
}

/// Most recent first
pub const TRANSACTIONS: &[Transaction] = &[
    Transaction {
        id: "tx_1006",
        account_id: "1",
        description: "Client retainer: Northwind",
        amount_cents: 2_400_000,
        posted_on: "2024-06-03",
    },
    Transaction {
        id: "tx_1005",
        account_id: "3",
        description: "Travel: Portland to Denver",
        amount_cents: -61_840,
        posted_on: "2024-06-01",
    },
    Transaction {
        id: "tx_1004",
        account_id: "1",
        description: "Payroll",
        amount_cents: -1_875_000,
        posted_on: "2024-05-31",
    },
    Transaction {
        id: "tx_1003",
        account_id: "2",
        description: "Quarterly tax set-aside",
        amount_cents: 900_000,
        posted_on: "2024-05-30",
    },
    Transaction {
        id: "tx_1002",
        account_id: "3",
        description: "Software subscriptions",
        amount_cents: -48_299,
        posted_on: "2024-05-28",
    },
    Transaction {
        id: "tx_1001",
        account_id: "1",
        description: "Client invoice: Contoso",
        amount_cents: 1_120_000,
        posted_on: "2024-05-24",
    },
];

#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsQuery {
    pub account_id: Option<String>,
}

pub fn transactions_for(account_id: Option<&str>) -> Vec<Transaction> {
    TRANSACTIONS
        .iter()
        .filter(|tx| account_id.map_or(true, |id| tx.account_id == id))
        .cloned()
        .collect()
}

/// GET /api/transactions
pub async fn list_transactions(
    Query(query): Query<ListTransactionsQuery>,
) -> Json<ListResponse<Transaction>> {
    Json(transactions_for(query.account_id.as_deref()).into())
}
