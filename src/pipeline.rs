//! Pipeline orchestration
//!
//! Runs the four stages in their only valid order: validation, allocation,
//! reconciliation, settlement. Validation is fail-fast: check outcomes are
//! logged one by one and the first failure aborts the run before any money
//! is computed. The whole pipeline is a pure function of the dataset; the
//! same input always produces the same outcome.

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::allocation::{allocate, Allocation};
use crate::input::Dataset;
use crate::reconciliation::{reconcile, Reconciliation};
use crate::settlement::settle;
use crate::types::{Party, PeriodTotals, SplitError, SplitResult, Transaction};
use crate::validation::{check_consistency, ValidationReport};

/// Everything one pipeline run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// The period the run covered
    pub period: PeriodTotals,
    /// The declared parties, in input order
    pub parties: Vec<Party>,
    /// Outcomes of the consistency checks, all passed
    pub validation: ValidationReport,
    /// Per-consumer unit allocation
    pub allocation: Allocation,
    /// Per-party money reconciliation
    pub reconciliation: Reconciliation,
    /// Payments that settle all balances
    pub transactions: Vec<Transaction>,
}

/// Run the full pipeline over a dataset.
///
/// Returns [`SplitError::Validation`] naming the first failed consistency
/// check; in that case no allocation or cost figures are produced.
pub fn run(dataset: &Dataset) -> SplitResult<RunOutcome> {
    let validation = check_consistency(&dataset.period, &dataset.records, &dataset.parties);
    let total = validation.checks.len();
    for (index, check) in validation.checks.iter().enumerate() {
        if check.passed {
            info!(check = index + 1, total, "{} - OK", check.description);
        } else {
            error!(check = index + 1, total, "{} - FAIL", check.description);
            return Err(SplitError::Validation {
                description: check.description.clone(),
            });
        }
    }

    let allocation = allocate(&dataset.period, &dataset.records);
    info!(
        total_units = allocation.total_units(),
        pooled_units = allocation.pooled_units(),
        "allocation complete"
    );

    let reconciliation = reconcile(&dataset.period, &allocation, &dataset.parties);
    let transactions = settle(&reconciliation);
    info!(transactions = transactions.len(), "settlement complete");

    Ok(RunOutcome {
        period: dataset.period.clone(),
        parties: dataset.parties.clone(),
        validation,
        allocation,
        reconciliation,
        transactions,
    })
}
