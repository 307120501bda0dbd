// Accounts API routes
// Decision: Sample data only; the site owns no storage

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use meridian_gate::ErrorResponse;
use serde::Serialize;

use super::ListResponse;

/// Account as returned by the API
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: &'static str,
    /// Balance in minor units (cents)
    pub balance_cents: i64,
    pub currency: &'static str,
}

pub const ACCOUNTS: &[Account] = &[
    Account {
        id: "1",
        name: "Operating account",
        kind: "checking",
        balance_cents: 12_845_067,
        currency: "USD",
    },
    Account {
        id: "2",
        name: "Tax reserve",
        kind: "savings",
        balance_cents: 4_100_000,
        currency: "USD",
    },
    Account {
        id: "3",
        name: "Corporate card",
        kind: "credit",
        balance_cents: -238_412,
        currency: "USD",
    },
];

pub fn find_account(id: &str) -> Option<&'static Account> {
    ACCOUNTS.iter().find(|account| account.id == id)
}

/// Format minor units as `$1,234.56` (negative as `-$1,234.56`).
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = (cents / 100).to_string();

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// GET /api/accounts
pub async fn list_accounts() -> Json<ListResponse<Account>> {
    Json(ACCOUNTS.to_vec().into())
}

/// GET /api/accounts/:id
pub async fn get_account(Path(id): Path<String>) -> Response {
    match find_account(&id) {
        Some(account) => Json(account.clone()).into_response(),
        None => ErrorResponse::new("Account not found").with_status(StatusCode::NOT_FOUND),
    }
}
