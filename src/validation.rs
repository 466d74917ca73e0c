//! Dataset consistency validation
//!
//! Three checks run in a fixed order before any money is computed: every
//! record must lie within the annual meter window, no two records may
//! overlap, and every record owner must be a declared party. A single
//! failed check invalidates the whole run; misallocated money has no
//! meaningful partial-failure interpretation, so the pipeline treats the
//! first failure as fatal.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::types::{MeterRecord, Party, PeriodTotals};

/// Outcome of a single consistency check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyCheck {
    /// Human-readable description of what was checked
    pub description: String,
    /// Whether the dataset satisfied the check
    pub passed: bool,
}

/// Ordered outcomes of all consistency checks.
///
/// Always contains exactly three entries, in evaluation order. Callers
/// reporting the outcomes must do so in this order and stop the pipeline
/// at the first failed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// The individual check outcomes, in evaluation order
    pub checks: Vec<ConsistencyCheck>,
}

impl ValidationReport {
    /// Whether every check passed
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    /// The first failed check, if any
    pub fn first_failure(&self) -> Option<&ConsistencyCheck> {
        self.checks.iter().find(|check| !check.passed)
    }
}

/// Run the three consistency checks against a dataset.
///
/// The checks are pure; this function never short-circuits, so the report
/// always covers all three. Fail-fast behaviour is the caller's contract.
pub fn check_consistency(
    period: &PeriodTotals,
    records: &[MeterRecord],
    parties: &[Party],
) -> ValidationReport {
    ValidationReport {
        checks: vec![
            ConsistencyCheck {
                description: "all meter records lie between the start and end of year readings"
                    .to_string(),
                passed: records_within_range(period, records),
            },
            ConsistencyCheck {
                description: "no overlaps between meter records".to_string(),
                passed: !has_overlap(records),
            },
            ConsistencyCheck {
                description: "meter records reference only known parties".to_string(),
                passed: owners_known(records, parties),
            },
        ],
    }
}

fn records_within_range(period: &PeriodTotals, records: &[MeterRecord]) -> bool {
    records.iter().all(|record| {
        period.start_meter <= record.check_in
            && record.check_in <= period.end_meter
            && period.start_meter <= record.check_out
            && record.check_out <= period.end_meter
    })
}

/// Overlap means one interval reaching strictly past the start of the next
/// when sorted by check-in. Records sharing an exact boundary are fine:
/// one party checking out at the reading the next checks in at is the
/// normal hand-over case.
fn has_overlap(records: &[MeterRecord]) -> bool {
    let mut sorted: Vec<&MeterRecord> = records.iter().collect();
    sorted.sort_by_key(|record| record.check_in);

    sorted
        .windows(2)
        .any(|pair| pair[0].check_out > pair[1].check_in)
}

fn owners_known(records: &[MeterRecord], parties: &[Party]) -> bool {
    let names: HashSet<&str> = parties.iter().map(|party| party.name.as_str()).collect();
    records
        .iter()
        .all(|record| names.contains(record.owner.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn period() -> PeriodTotals {
        PeriodTotals {
            start_meter: 0,
            end_meter: 1000,
            total_cost_eur: BigDecimal::from(100),
            year: 2023,
        }
    }

    fn parties() -> Vec<Party> {
        vec![Party::new("Alice", 60), Party::new("Bob", 40)]
    }

    #[test]
    fn clean_dataset_passes_all_checks() {
        let records = vec![
            MeterRecord::new("Alice", 0, 400),
            MeterRecord::new("Bob", 400, 700),
        ];

        let report = check_consistency(&period(), &records, &parties());
        assert_eq!(report.checks.len(), 3);
        assert!(report.passed());
        assert!(report.first_failure().is_none());
    }

    #[test]
    fn record_outside_the_meter_window_fails_range_check() {
        let records = vec![MeterRecord::new("Alice", 900, 1100)];

        let report = check_consistency(&period(), &records, &parties());
        assert!(!report.checks[0].passed);
        assert_eq!(
            report.first_failure().unwrap().description,
            report.checks[0].description
        );
    }

    #[test]
    fn shared_boundary_is_not_an_overlap() {
        let records = vec![
            MeterRecord::new("Alice", 0, 10),
            MeterRecord::new("Bob", 10, 20),
        ];

        let report = check_consistency(&period(), &records, &parties());
        assert!(report.checks[1].passed);
    }

    #[test]
    fn strict_exceedance_is_an_overlap() {
        let records = vec![
            MeterRecord::new("Bob", 10, 20),
            MeterRecord::new("Alice", 0, 11),
        ];

        let report = check_consistency(&period(), &records, &parties());
        assert!(!report.checks[1].passed);
    }

    #[test]
    fn unknown_owner_fails_known_owner_check() {
        let records = vec![MeterRecord::new("Mallory", 0, 100)];

        let report = check_consistency(&period(), &records, &parties());
        assert!(report.checks[0].passed);
        assert!(report.checks[1].passed);
        assert!(!report.checks[2].passed);
    }
}
