//! Consumption allocation
//!
//! Partitions the total annual meter movement into per-party consumption.
//! Records are walked in meter order with a running cursor starting at the
//! period's opening reading; any movement between the cursor and the next
//! record's check-in belongs to nobody in particular and is credited to the
//! pooled [`Consumer::GeneralElectric`] bucket, as is whatever remains after
//! the last record. The result covers every unit of movement exactly once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::types::{Consumer, MeterRecord, PeriodTotals};

/// Per-consumer unit totals for one period.
///
/// Keys are every distinct record owner plus the pooled bucket; values sum
/// to the period's total meter movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Units attributed to each consumer
    pub units: BTreeMap<Consumer, i64>,
}

impl Allocation {
    /// Units attributed to the given consumer, zero if absent
    pub fn units_for(&self, consumer: &Consumer) -> i64 {
        self.units.get(consumer).copied().unwrap_or(0)
    }

    /// Units in the pooled bucket
    pub fn pooled_units(&self) -> i64 {
        self.units_for(&Consumer::GeneralElectric)
    }

    /// Sum of all attributed units
    pub fn total_units(&self) -> i64 {
        self.units.values().sum()
    }
}

/// Attribute every unit of meter movement to a party or the pooled bucket.
///
/// Assumes the records have already passed validation: non-overlapping and
/// within the period window. A single linear pass over the sorted records,
/// no reordering or backtracking.
pub fn allocate(period: &PeriodTotals, records: &[MeterRecord]) -> Allocation {
    let mut sorted: Vec<&MeterRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.check_in);

    let mut units: BTreeMap<Consumer, i64> = BTreeMap::new();
    let mut pooled = 0;
    let mut cursor = period.start_meter;

    for record in sorted {
        *units.entry(Consumer::party(&record.owner)).or_insert(0) += record.units();

        let gap = record.check_in - cursor;
        if gap > 0 {
            debug!(owner = %record.owner, gap, "unattributed movement before record");
            pooled += gap;
        }
        cursor = record.check_out;
    }

    let tail = period.end_meter - cursor;
    if tail > 0 {
        debug!(tail, "unattributed movement after last record");
        pooled += tail;
    }

    units.insert(Consumer::GeneralElectric, pooled);
    Allocation { units }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use proptest::prelude::*;

    fn period(start_meter: i64, end_meter: i64) -> PeriodTotals {
        PeriodTotals {
            start_meter,
            end_meter,
            total_cost_eur: BigDecimal::from(100),
            year: 2023,
        }
    }

    #[test]
    fn gaps_go_to_the_pooled_bucket() {
        let records = vec![
            MeterRecord::new("Alice", 100, 400),
            MeterRecord::new("Bob", 500, 800),
        ];

        let allocation = allocate(&period(0, 1000), &records);

        assert_eq!(allocation.units_for(&Consumer::party("Alice")), 300);
        assert_eq!(allocation.units_for(&Consumer::party("Bob")), 300);
        // 100 before Alice, 100 between, 200 after Bob
        assert_eq!(allocation.pooled_units(), 400);
        assert_eq!(allocation.total_units(), 1000);
    }

    #[test]
    fn repeated_owner_records_accumulate() {
        let records = vec![
            MeterRecord::new("Alice", 0, 200),
            MeterRecord::new("Bob", 200, 500),
            MeterRecord::new("Alice", 500, 600),
        ];

        let allocation = allocate(&period(0, 600), &records);

        assert_eq!(allocation.units_for(&Consumer::party("Alice")), 300);
        assert_eq!(allocation.units_for(&Consumer::party("Bob")), 300);
        assert_eq!(allocation.pooled_units(), 0);
    }

    #[test]
    fn unsorted_input_is_processed_in_meter_order() {
        let records = vec![
            MeterRecord::new("Bob", 600, 900),
            MeterRecord::new("Alice", 0, 400),
        ];

        let allocation = allocate(&period(0, 1000), &records);

        assert_eq!(allocation.pooled_units(), 300);
        assert_eq!(allocation.total_units(), 1000);
    }

    #[test]
    fn empty_record_set_pools_the_whole_period() {
        let allocation = allocate(&period(100, 600), &[]);

        assert_eq!(allocation.units.len(), 1);
        assert_eq!(allocation.pooled_units(), 500);
    }

    #[test]
    fn zero_length_records_contribute_nothing() {
        let records = vec![MeterRecord::new("Alice", 250, 250)];

        let allocation = allocate(&period(0, 500), &records);

        assert_eq!(allocation.units_for(&Consumer::party("Alice")), 0);
        assert_eq!(allocation.pooled_units(), 500);
    }

    proptest! {
        /// Every unit of meter movement lands with exactly one consumer,
        /// whatever the mix of gaps and record lengths.
        #[test]
        fn allocation_conserves_total_movement(
            start_meter in 0i64..10_000,
            segments in prop::collection::vec((0i64..50, 0i64..200), 0..20),
            tail_gap in 0i64..100,
        ) {
            let mut cursor = start_meter;
            let mut records = Vec::new();
            for (i, (gap, length)) in segments.iter().enumerate() {
                cursor += gap;
                records.push(MeterRecord::new(format!("party-{}", i % 3), cursor, cursor + length));
                cursor += length;
            }
            let period = period(start_meter, cursor + tail_gap);

            let allocation = allocate(&period, &records);
            prop_assert_eq!(allocation.total_units(), period.total_units());
        }
    }
}
