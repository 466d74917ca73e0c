//! Core types and data structures for the meter-splitting pipeline

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved display name for the pooled consumption bucket.
///
/// Meter movement not covered by any recorded interval (hallway lighting,
/// idle consumption, shared appliances) is attributed to this bucket and
/// later split among the parties by their fixed shares.
pub const GENERAL_ELECTRIC: &str = "General Electric";

/// One contiguous interval of meter movement attributed to a single party.
///
/// Invariant: `check_out >= check_in`. A zero-length interval is permitted
/// and represents no usage. A party may appear in any number of records;
/// the allocator accumulates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeterRecord {
    /// Party the interval belongs to
    pub owner: String,
    /// Meter reading at check-in
    pub check_in: i64,
    /// Meter reading at check-out
    pub check_out: i64,
}

impl MeterRecord {
    /// Create a new meter record
    pub fn new(owner: impl Into<String>, check_in: i64, check_out: i64) -> Self {
        Self {
            owner: owner.into(),
            check_in,
            check_out,
        }
    }

    /// Units consumed within this interval
    pub fn units(&self) -> i64 {
        self.check_out - self.check_in
    }
}

/// A participant and their fixed percentage share.
///
/// The share governs both the split of pooled consumption and the portion
/// of the total cost the party has already pre-paid. Shares across all
/// parties are not required to sum to exactly 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Party name, unique within a dataset
    pub name: String,
    /// Fixed percentage share (e.g. 60 for 60%)
    pub share_percent: BigDecimal,
}

impl Party {
    /// Create a new party
    pub fn new(name: impl Into<String>, share_percent: impl Into<BigDecimal>) -> Self {
        Self {
            name: name.into(),
            share_percent: share_percent.into(),
        }
    }
}

/// The annual meter window and the total cost incurred within it.
///
/// Invariant: `end_meter >= start_meter`. A zero-length window is valid
/// and yields a unit price of zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Meter reading at the start of the period
    pub start_meter: i64,
    /// Meter reading at the end of the period
    pub end_meter: i64,
    /// Total energy cost for the period in EUR
    pub total_cost_eur: BigDecimal,
    /// Calendar year the period covers
    pub year: i32,
}

impl PeriodTotals {
    /// Total meter movement over the period
    pub fn total_units(&self) -> i64 {
        self.end_meter - self.start_meter
    }

    /// Price of one unit: total cost divided by total movement.
    ///
    /// A zero-length period yields a unit price of zero by convention
    /// rather than a division error.
    pub fn unit_price(&self) -> BigDecimal {
        let total_units = self.total_units();
        if total_units == 0 {
            BigDecimal::from(0)
        } else {
            &self.total_cost_eur / BigDecimal::from(total_units)
        }
    }
}

/// Key for allocated consumption: either a named party or the pooled bucket.
///
/// Modelling the pooled bucket as its own variant makes a collision with a
/// real party name impossible, so pooled usage can never silently merge
/// into a party's individual usage.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Consumer {
    /// An individual party, identified by name
    Party(String),
    /// The shared consumption bucket
    GeneralElectric,
}

impl Consumer {
    /// Create a party key
    pub fn party(name: impl Into<String>) -> Self {
        Consumer::Party(name.into())
    }
}

impl fmt::Display for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Consumer::Party(name) => f.write_str(name),
            Consumer::GeneralElectric => f.write_str(GENERAL_ELECTRIC),
        }
    }
}

/// One instructed peer-to-peer payment.
///
/// Applying every transaction of a settlement to the party balances brings
/// all of them to exactly zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Party that owes money
    pub payer: String,
    /// Party that is owed money
    pub receiver: String,
    /// Payment amount in EUR, at cent precision
    pub amount_eur: BigDecimal,
}

/// Errors that can occur while loading or reconciling a dataset
#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse input document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("consistency check failed: {description}")]
    Validation { description: String },
}

/// Result type for meter-splitting operations
pub type SplitResult<T> = Result<T, SplitError>;
