// Dashboard page
// Decision: Greets the session user; in demo mode anyone gets the sample data

use axum::{extract::State, response::Html};
use meridian_gate::CurrentSession;
use serde::Serialize;

use super::{render_page, PageError};
use crate::{
    api::{
        accounts::{format_money, ACCOUNTS},
        transactions::TRANSACTIONS,
    },
    state::AppState,
};

const RECENT_TRANSACTIONS: usize = 5;

#[derive(Debug, Serialize)]
struct AccountRow {
    id: &'static str,
    name: &'static str,
    kind: &'static str,
    balance: String,
}

#[derive(Debug, Serialize)]
struct TransactionRow {
    posted_on: &'static str,
    description: &'static str,
    amount: String,
}

#[derive(Debug, Serialize)]
struct Dashboard {
    greeting: String,
    accounts: Vec<AccountRow>,
    transactions: Vec<TransactionRow>,
}

pub async fn dashboard(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Html<String>, PageError> {
    let greeting = session
        .as_ref()
        .map(|claims| claims.display_name().to_string())
        .unwrap_or_else(|| "visitor".to_string());

    let accounts = ACCOUNTS
        .iter()
        .map(|account| AccountRow {
            id: account.id,
            name: account.name,
            kind: account.kind,
            balance: format_money(account.balance_cents),
        })
        .collect();

    let transactions = TRANSACTIONS
        .iter()
        .take(RECENT_TRANSACTIONS)
        .map(|tx| TransactionRow {
            posted_on: tx.posted_on,
            description: tx.description,
            amount: format_money(tx.amount_cents),
        })
        .collect();

    render_page(
        &state,
        session.as_ref(),
        "dashboard.html",
        "Dashboard",
        "dashboard",
        Dashboard {
            greeting,
            accounts,
            transactions,
        },
    )
}
