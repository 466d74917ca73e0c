//! # Metersplit Core
//!
//! Reconciles shared electricity consumption among several parties behind
//! one physical meter, using per-period sub-meter check-in/check-out
//! readings plus a pooled common-area bucket for unattributed movement.
//!
//! ## Features
//!
//! - **Consistency validation**: range, overlap, and known-owner checks,
//!   reported in order and fatal on first failure
//! - **Consumption allocation**: every unit of annual meter movement goes
//!   to exactly one party or the pooled "General Electric" bucket
//! - **Cost reconciliation**: per-party should-pay versus the share of the
//!   bill already pre-paid
//! - **Debt settlement**: a greedy minimal set of peer-to-peer payments
//!   that zeroes every balance, computed in exact integer cents
//! - **JSON loading and report rendering** as thin collaborators around
//!   the pure computational core
//!
//! ## Quick Start
//!
//! ```rust
//! use metersplit_core::{pipeline, report, Dataset};
//!
//! let dataset = Dataset::from_str(r#"{
//!     "GeneralData": {
//!         "StartMeterThisYear": 0,
//!         "EndMeterThisYear": 1000,
//!         "TotalEnergyCostThisYearInEUR": 100,
//!         "Year": 2023
//!     },
//!     "MeterData": [
//!         {"Name": "Alice", "CheckInMeter": 0, "CheckOutMeter": 400}
//!     ],
//!     "UserData": [
//!         {"Name": "Alice", "Share": 100}
//!     ]
//! }"#).unwrap();
//!
//! let outcome = pipeline::run(&dataset).unwrap();
//! for line in report::render(&outcome) {
//!     println!("{line}");
//! }
//! ```

pub mod allocation;
pub mod input;
pub mod pipeline;
pub mod reconciliation;
pub mod report;
pub mod settlement;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use allocation::{allocate, Allocation};
pub use input::Dataset;
pub use pipeline::{run, RunOutcome};
pub use reconciliation::{reconcile, Reconciliation};
pub use settlement::settle;
pub use types::*;
pub use validation::{check_consistency, ConsistencyCheck, ValidationReport};
