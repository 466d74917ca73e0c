//! JSON input loading
//!
//! The raw document uses the wire keys of the household data files
//! (`GeneralData`, `MeterData`, `UserData` with PascalCase fields). This
//! module is a thin collaborator around the core: it parses the document
//! and converts it into the types of [`crate::types`]. Logical consistency
//! of the data is the validator's job, not the loader's.

use bigdecimal::BigDecimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::{MeterRecord, Party, PeriodTotals, SplitResult};

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "GeneralData")]
    general_data: RawGeneralData,
    #[serde(rename = "MeterData")]
    meter_data: Vec<RawMeterRecord>,
    #[serde(rename = "UserData")]
    user_data: Vec<RawUser>,
}

#[derive(Debug, Deserialize)]
struct RawGeneralData {
    #[serde(rename = "StartMeterThisYear")]
    start_meter: i64,
    #[serde(rename = "EndMeterThisYear")]
    end_meter: i64,
    #[serde(rename = "TotalEnergyCostThisYearInEUR")]
    total_cost_eur: BigDecimal,
    #[serde(rename = "Year")]
    year: i32,
}

#[derive(Debug, Deserialize)]
struct RawMeterRecord {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "CheckInMeter")]
    check_in: i64,
    #[serde(rename = "CheckOutMeter")]
    check_out: i64,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Share")]
    share: BigDecimal,
}

/// A fully loaded input dataset, ready for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// The annual meter window and total cost
    pub period: PeriodTotals,
    /// All recorded consumption intervals
    pub records: Vec<MeterRecord>,
    /// All declared parties with their shares
    pub parties: Vec<Party>,
}

impl Dataset {
    /// Assemble a dataset from already constructed core types
    pub fn new(period: PeriodTotals, records: Vec<MeterRecord>, parties: Vec<Party>) -> Self {
        Self {
            period,
            records,
            parties,
        }
    }

    /// Parse a dataset from a JSON document
    pub fn from_str(json: &str) -> SplitResult<Self> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    /// Read and parse a dataset from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> SplitResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }
}

impl From<RawDocument> for Dataset {
    fn from(raw: RawDocument) -> Self {
        Self {
            period: PeriodTotals {
                start_meter: raw.general_data.start_meter,
                end_meter: raw.general_data.end_meter,
                total_cost_eur: raw.general_data.total_cost_eur,
                year: raw.general_data.year,
            },
            records: raw
                .meter_data
                .into_iter()
                .map(|r| MeterRecord::new(r.name, r.check_in, r.check_out))
                .collect(),
            parties: raw
                .user_data
                .into_iter()
                .map(|u| Party {
                    name: u.name,
                    share_percent: u.share,
                })
                .collect(),
        }
    }
}
