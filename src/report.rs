//! Human-readable report rendering
//!
//! A thin collaborator around the core: turns a [`RunOutcome`] into
//! console-style report lines, section by section. The core
//! structures stay the source of truth; this module only formats them, in
//! a fixed, reproducible order. Consumers print the lines however they
//! like.

use crate::pipeline::RunOutcome;
use crate::types::Consumer;

const RULE_HEAVY: &str =
    "================================================================================";
const RULE_LIGHT: &str =
    "--------------------------------------------------------------------------------";

/// Render a pipeline outcome as report lines.
///
/// Consumers iterate alphabetically with the pooled bucket last; per-party
/// sections follow the declared party order of the input.
pub fn render(outcome: &RunOutcome) -> Vec<String> {
    let mut lines = Vec::new();
    let period = &outcome.period;
    let total_checks = outcome.validation.checks.len();

    lines.push(RULE_HEAVY.to_string());
    for (index, check) in outcome.validation.checks.iter().enumerate() {
        let status = if check.passed { "OK" } else { "FAIL" };
        lines.push(format!(
            "Check {} of {}: {} - {}",
            index + 1,
            total_checks,
            check.description,
            status
        ));
    }

    lines.push(RULE_LIGHT.to_string());
    lines.push(format!("Start of year meter: {} units", period.start_meter));
    lines.push(format!("End of year meter: {} units", period.end_meter));
    lines.push(format!(
        "Total for year {}: {} units",
        period.year,
        period.total_units()
    ));
    lines.push(format!(
        "Price per unit: {} EUR",
        outcome.reconciliation.unit_price.round(3)
    ));

    lines.push(RULE_LIGHT.to_string());
    for (consumer, units) in &outcome.allocation.units {
        lines.push(format!("{consumer} used {units} units."));
    }

    lines.push(RULE_LIGHT.to_string());
    for party in &outcome.parties {
        let share_units = outcome.reconciliation.pool_share_units[&party.name];
        lines.push(format!(
            "{} is responsible for {} units of {}.",
            party.name,
            share_units,
            Consumer::GeneralElectric
        ));
    }

    lines.push(RULE_HEAVY.to_string());
    for party in &outcome.parties {
        let units = outcome.reconciliation.total_units[&party.name];
        let cost = &outcome.reconciliation.should_pay_eur[&party.name];
        lines.push(format!(
            "{} total for year {} is {} units which is {} EUR.",
            party.name, period.year, units, cost
        ));
    }

    lines.push(RULE_LIGHT.to_string());
    for party in &outcome.parties {
        let paid = &outcome.reconciliation.already_paid_eur[&party.name];
        lines.push(format!(
            "SettleUp: {} already paid a share of {} percent of {} EUR, which is {} EUR.",
            party.name, party.share_percent, period.total_cost_eur, paid
        ));
    }

    lines.push(RULE_LIGHT.to_string());
    lines.push(format!(
        "Total Already Paid: {} EUR",
        outcome.reconciliation.total_already_paid()
    ));
    lines.push(format!(
        "Total Should Be: {} EUR",
        outcome.reconciliation.total_should_pay()
    ));

    lines.push(RULE_LIGHT.to_string());
    for transaction in &outcome.transactions {
        lines.push(format!(
            "{} needs to pay {} €{}",
            transaction.payer, transaction.receiver, transaction.amount_eur
        ));
    }

    lines
}
