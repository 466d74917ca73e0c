//! Debt settlement
//!
//! Turns per-party balances into a short list of peer-to-peer payments.
//! The balance is `already paid - should pay`: negative means the party
//! owes money, positive means the party is owed money. Each round matches
//! the largest debtor with the largest creditor and moves the smaller of
//! the two amounts, which settles at least one side per transaction and
//! yields at most n-1 transactions for n unsettled parties. A greedy
//! approximation, not a provably minimal solver.
//!
//! Balances are carried as integer cents. Amounts rounded to two decimals
//! are exact in that representation, so the loop terminates on exact zero
//! with no floating-point residue to guard against. Ties on amount are
//! broken by name, keeping the output deterministic for identical input.

use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, ToPrimitive};
use std::collections::BTreeMap;
use tracing::debug;

use crate::reconciliation::Reconciliation;
use crate::types::Transaction;

/// Compute the payments that settle every party's balance.
///
/// Balances within half a cent of zero round away and produce no payment.
pub fn settle(reconciliation: &Reconciliation) -> Vec<Transaction> {
    let mut payers: BTreeMap<String, i64> = BTreeMap::new();
    let mut receivers: BTreeMap<String, i64> = BTreeMap::new();

    for (name, already_paid) in &reconciliation.already_paid_eur {
        let should_pay = reconciliation
            .should_pay_eur
            .get(name)
            .cloned()
            .unwrap_or_else(|| BigDecimal::from(0));
        let balance_cents = to_cents(&(already_paid - &should_pay));

        match balance_cents.cmp(&0) {
            std::cmp::Ordering::Less => {
                payers.insert(name.clone(), -balance_cents);
            }
            std::cmp::Ordering::Greater => {
                receivers.insert(name.clone(), balance_cents);
            }
            std::cmp::Ordering::Equal => {}
        }
    }

    let mut transactions = Vec::new();

    while !payers.is_empty() && !receivers.is_empty() {
        // Largest amounts first; BTreeMap order makes the name tie-break
        // lexicographic.
        let (payer, debt) = match largest(&payers) {
            Some(found) => found,
            None => break,
        };
        let (receiver, credit) = match largest(&receivers) {
            Some(found) => found,
            None => break,
        };

        let payment = debt.min(credit);
        debug!(%payer, %receiver, payment_cents = payment, "settling");
        transactions.push(Transaction {
            payer: payer.clone(),
            receiver: receiver.clone(),
            amount_eur: eur_from_cents(payment),
        });

        decrease(&mut payers, &payer, payment);
        decrease(&mut receivers, &receiver, payment);
    }

    transactions
}

/// Entry with the largest amount, first name winning ties
fn largest(balances: &BTreeMap<String, i64>) -> Option<(String, i64)> {
    let mut best: Option<(&String, i64)> = None;
    for (name, &amount) in balances {
        if best.map_or(true, |(_, best_amount)| amount > best_amount) {
            best = Some((name, amount));
        }
    }
    best.map(|(name, amount)| (name.clone(), amount))
}

fn decrease(balances: &mut BTreeMap<String, i64>, name: &str, payment: i64) {
    if let Some(amount) = balances.get_mut(name) {
        *amount -= payment;
        if *amount == 0 {
            balances.remove(name);
        }
    }
}

fn to_cents(amount: &BigDecimal) -> i64 {
    (amount.round(2) * BigDecimal::from(100)).to_i64().unwrap_or(0)
}

fn eur_from_cents(cents: i64) -> BigDecimal {
    BigDecimal::new(BigInt::from(cents), 2)
}
