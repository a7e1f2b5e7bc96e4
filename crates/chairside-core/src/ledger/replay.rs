//! Payment ledger replay: chronological running balance, displayed newest
//! first.

use serde::{Deserialize, Serialize};

use crate::models::Payment;

/// One row of the payment history: a payment annotated with the balance
/// remaining immediately after it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerEntry {
    pub payment: Payment,
    pub balance_after: f64,
}

/// Total order for replay: calendar date, then creation timestamp, then id.
/// Same-date payments land in insertion order for well-formed data, and the
/// trailing id keeps the order total even under timestamp collisions.
fn replay_key(p: &Payment) -> (&str, &str, &str) {
    (&p.date, &p.date_added, &p.id)
}

/// Replay payments in ascending date order from `opening_balance`
/// (gross total minus total discount), subtracting each payment and
/// attaching the post-payment running balance. The returned entries are in
/// display order: descending, newest first.
pub fn build_entries(payments: &[Payment], opening_balance: f64) -> Vec<LedgerEntry> {
    let mut ordered: Vec<&Payment> = payments.iter().collect();
    ordered.sort_by(|a, b| replay_key(a).cmp(&replay_key(b)));

    let mut running = opening_balance;
    let mut entries: Vec<LedgerEntry> = ordered
        .into_iter()
        .map(|p| {
            running -= p.amount;
            LedgerEntry {
                payment: p.clone(),
                balance_after: running,
            }
        })
        .collect();

    entries.reverse();
    entries
}
