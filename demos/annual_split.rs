//! Annual meter split example
//!
//! Runs the full pipeline over a small three-party household and prints
//! the report. Pass a path to run against your own JSON data file:
//!
//!     cargo run --example annual_split -- data.json

use metersplit_core::{pipeline, report, Dataset};

const SAMPLE: &str = r#"{
    "GeneralData": {
        "StartMeterThisYear": 12000,
        "EndMeterThisYear": 15600,
        "TotalEnergyCostThisYearInEUR": 1188.50,
        "Year": 2023
    },
    "MeterData": [
        {"Name": "Alice", "CheckInMeter": 12000, "CheckOutMeter": 13100},
        {"Name": "Bob", "CheckInMeter": 13250, "CheckOutMeter": 14000},
        {"Name": "Carol", "CheckInMeter": 14000, "CheckOutMeter": 14950},
        {"Name": "Alice", "CheckInMeter": 15100, "CheckOutMeter": 15400}
    ],
    "UserData": [
        {"Name": "Alice", "Share": 40},
        {"Name": "Bob", "Share": 35},
        {"Name": "Carol", "Share": 25}
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dataset = match std::env::args().nth(1) {
        Some(path) => Dataset::from_file(path)?,
        None => Dataset::from_str(SAMPLE)?,
    };

    let outcome = pipeline::run(&dataset)?;
    for line in report::render(&outcome) {
        println!("{line}");
    }

    Ok(())
}
