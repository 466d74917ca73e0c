//! Cost reconciliation
//!
//! Converts allocated units into money per party and compares that against
//! what each party already pre-paid through their fixed share of the total
//! bill. Two rounding rules are deliberately asymmetric and must stay so:
//! the should-pay amount is rounded to cents, while the already-paid amount
//! is the exact unrounded share of the total cost. Pooled units are also
//! split per party with independent rounding to whole units, so the rounded
//! shares may drift slightly from the pooled total. Both quirks are part of
//! the settlement contract, not defects to normalize away.

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::allocation::Allocation;
use crate::types::{Consumer, Party, PeriodTotals};

/// Per-party money view of one period.
///
/// All maps are keyed by party name and cover every declared party, whether
/// or not it has meter records of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Price of one unit for the period
    pub unit_price: BigDecimal,
    /// Each party's rounded share of the pooled bucket, in whole units
    pub pool_share_units: BTreeMap<String, i64>,
    /// Each party's total attributable units: individual plus pooled share
    pub total_units: BTreeMap<String, i64>,
    /// What each party should pay, rounded to cents
    pub should_pay_eur: BTreeMap<String, BigDecimal>,
    /// What each party already paid via their share of the bill, unrounded
    pub already_paid_eur: BTreeMap<String, BigDecimal>,
}

impl Reconciliation {
    /// Sum of all should-pay amounts
    pub fn total_should_pay(&self) -> BigDecimal {
        self.should_pay_eur.values().sum()
    }

    /// Sum of all already-paid amounts
    pub fn total_already_paid(&self) -> BigDecimal {
        self.already_paid_eur.values().sum()
    }
}

/// Compute every party's should-pay and already-paid amounts.
///
/// A party absent from the allocation simply has zero individual units; it
/// still receives its pooled share and its pre-paid amount.
pub fn reconcile(
    period: &PeriodTotals,
    allocation: &Allocation,
    parties: &[Party],
) -> Reconciliation {
    let unit_price = period.unit_price();
    let pooled_units = BigDecimal::from(allocation.pooled_units());
    let hundred = BigDecimal::from(100);

    let mut pool_share_units = BTreeMap::new();
    let mut total_units = BTreeMap::new();
    let mut should_pay_eur = BTreeMap::new();
    let mut already_paid_eur = BTreeMap::new();

    for party in parties {
        let pool_share = (&party.share_percent / &hundred * &pooled_units)
            .round(0)
            .to_i64()
            .unwrap_or(0);
        let individual = allocation.units_for(&Consumer::party(&party.name));
        let units = individual + pool_share;

        let should_pay = (BigDecimal::from(units) * &unit_price).round(2);
        let already_paid = &period.total_cost_eur / &hundred * &party.share_percent;

        pool_share_units.insert(party.name.clone(), pool_share);
        total_units.insert(party.name.clone(), units);
        should_pay_eur.insert(party.name.clone(), should_pay);
        already_paid_eur.insert(party.name.clone(), already_paid);
    }

    Reconciliation {
        unit_price,
        pool_share_units,
        total_units,
        should_pay_eur,
        already_paid_eur,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn period(start_meter: i64, end_meter: i64, cost: &str) -> PeriodTotals {
        PeriodTotals {
            start_meter,
            end_meter,
            total_cost_eur: BigDecimal::from_str(cost).unwrap(),
            year: 2023,
        }
    }

    fn allocation(entries: &[(Consumer, i64)]) -> Allocation {
        Allocation {
            units: entries.iter().cloned().collect(),
        }
    }

    #[test]
    fn single_party_with_full_share_absorbs_everything() {
        let period = period(0, 1000, "100");
        let allocation = allocation(&[
            (Consumer::party("Alice"), 400),
            (Consumer::GeneralElectric, 600),
        ]);
        let parties = vec![Party::new("Alice", 100)];

        let result = reconcile(&period, &allocation, &parties);

        assert_eq!(result.pool_share_units["Alice"], 600);
        assert_eq!(result.total_units["Alice"], 1000);
        assert_eq!(result.should_pay_eur["Alice"], BigDecimal::from(100));
        assert_eq!(result.already_paid_eur["Alice"], BigDecimal::from(100));
    }

    #[test]
    fn pooled_units_split_by_share() {
        let period = period(0, 1000, "100");
        let allocation = allocation(&[
            (Consumer::party("Alice"), 300),
            (Consumer::party("Bob"), 200),
            (Consumer::GeneralElectric, 500),
        ]);
        let parties = vec![Party::new("Alice", 60), Party::new("Bob", 40)];

        let result = reconcile(&period, &allocation, &parties);

        assert_eq!(result.pool_share_units["Alice"], 300);
        assert_eq!(result.pool_share_units["Bob"], 200);
        assert_eq!(result.total_units["Alice"], 600);
        assert_eq!(result.total_units["Bob"], 400);
        assert_eq!(result.should_pay_eur["Alice"], BigDecimal::from(60));
        assert_eq!(result.should_pay_eur["Bob"], BigDecimal::from(40));
    }

    #[test]
    fn pool_shares_round_per_party_and_may_drift_from_the_pool() {
        let period = period(0, 9, "9");
        let allocation = allocation(&[(Consumer::GeneralElectric, 9)]);
        let parties = vec![
            Party::new("Alice", 30),
            Party::new("Bob", 30),
            Party::new("Carol", 40),
        ];

        let result = reconcile(&period, &allocation, &parties);

        // 2.7 -> 3, 2.7 -> 3, 3.6 -> 4; the rounded shares sum to 10, one
        // more than the 9 pooled units. Accepted, not corrected.
        assert_eq!(result.pool_share_units["Alice"], 3);
        assert_eq!(result.pool_share_units["Bob"], 3);
        assert_eq!(result.pool_share_units["Carol"], 4);
        let rounded_sum: i64 = result.pool_share_units.values().sum();
        assert_eq!(rounded_sum, 10);
    }

    #[test]
    fn already_paid_is_left_unrounded() {
        let period = period(0, 100, "99.99");
        let allocation = allocation(&[(Consumer::GeneralElectric, 100)]);
        let parties = vec![Party::new("Alice", 50), Party::new("Bob", 50)];

        let result = reconcile(&period, &allocation, &parties);

        // 99.99 / 100 * 50 = 49.995, kept at full precision
        assert_eq!(
            result.already_paid_eur["Alice"],
            BigDecimal::from_str("49.995").unwrap()
        );
        assert_eq!(result.total_already_paid(), BigDecimal::from_str("99.99").unwrap());
    }

    #[test]
    fn party_without_records_still_gets_pool_share_and_prepayment() {
        let period = period(0, 1000, "100");
        let allocation = allocation(&[
            (Consumer::party("Alice"), 800),
            (Consumer::GeneralElectric, 200),
        ]);
        let parties = vec![Party::new("Alice", 50), Party::new("Bob", 50)];

        let result = reconcile(&period, &allocation, &parties);

        assert_eq!(result.total_units["Bob"], 100);
        assert_eq!(result.should_pay_eur["Bob"], BigDecimal::from(10));
        assert_eq!(result.already_paid_eur["Bob"], BigDecimal::from(50));
    }

    #[test]
    fn zero_length_period_costs_nothing() {
        let period = period(500, 500, "80");
        let allocation = allocation(&[(Consumer::GeneralElectric, 0)]);
        let parties = vec![Party::new("Alice", 100)];

        let result = reconcile(&period, &allocation, &parties);

        assert_eq!(result.unit_price, BigDecimal::from(0));
        assert_eq!(result.should_pay_eur["Alice"], BigDecimal::from(0));
        assert_eq!(result.already_paid_eur["Alice"], BigDecimal::from(80));
    }
}
