mod compare_floats;
pub mod core;
pub mod errors;
pub mod input;
pub mod output;


#[macro_use]
extern crate is_close;

pub use crate::core::assumptions::EnergyAssumptions;
pub use crate::core::coefficients::{CoefficientTable, SolarCoefficientTable, StandardCoefficients};
pub use crate::core::energy_supply::solar_pv::{calculate_solar_pv, SolarPvResults};
pub use crate::core::heating_systems::heat_pump::{calculate_heat_pump_load, HeatPumpResults};
pub use crate::core::heating_systems::recommendations::get_recommendations;
use crate::errors::{AssumptionsError, CalculatorError, OutputError};
use crate::input::{ingest_for_processing, CalculationInput};
use crate::output::Output;
use anyhow::anyhow;
use bitflags::bitflags;
use csv::WriterBuilder;
use indexmap::IndexMap;
use serde::Serialize;
use serde_valid::Validate;
use std::io::{Read, Write};
use tracing::{debug, info};

bitflags! {
    /// Which files [`run_project`] writes to its output.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct ProjectFlags: u32 {
        /// The full results as JSON, under the key "results".
        const JSON_RESULTS = 0b1;
        /// One row per headline figure, under the key "summary".
        const CSV_SUMMARY = 0b10;
        /// The fuel comparison or the PV degradation curve, under the key "breakdown".
        const BREAKDOWN_CSV = 0b100;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum CalculationResults {
    HeatPump {
        results: HeatPumpResults,
        recommendations: Vec<String>,
    },
    #[serde(rename = "SolarPV")]
    SolarPv(SolarPvResults),
}

/// Run the calculator matching a JSON input document and write out the results selected by
/// `flags`.
///
/// Arguments:
/// * `input` - a `{"HeatPump": {...}}` or `{"SolarPV": {...}}` document
/// * `output` - where result files go
/// * `assumptions` - energy market and policy figures; the UK 2025 set is used when absent
/// * `flags` - which result files to write
pub fn run_project(
    input: impl Read,
    output: impl Output,
    assumptions: Option<EnergyAssumptions>,
    flags: &ProjectFlags,
) -> Result<CalculationResults, CalculatorError> {
    let input = ingest_for_processing(input)?;

    let assumptions = match assumptions {
        Some(assumptions) => {
            assumptions.validate().map_err(|errors| {
                CalculatorError::InvalidAssumptions(AssumptionsError::new(anyhow!(
                    "Energy assumptions failed validation: {errors}"
                )))
            })?;
            assumptions
        }
        None => EnergyAssumptions::uk_2025(),
    };
    debug!(assumptions = %assumptions.name, "running calculation");

    let results = match input {
        CalculationInput::HeatPump(inputs) => {
            let results = calculate_heat_pump_load(&inputs, &StandardCoefficients, &assumptions)?;
            let recommendations = get_recommendations(&inputs, &results);
            CalculationResults::HeatPump {
                results,
                recommendations,
            }
        }
        CalculationInput::SolarPv(inputs) => CalculationResults::SolarPv(calculate_solar_pv(
            &inputs,
            &StandardCoefficients,
            &assumptions,
        )?),
    };

    if !output.is_noop() {
        write_output_files(&output, &results, flags)
            .map_err(|e| CalculatorError::FailureInOutput(OutputError::new(e)))?;
    }

    Ok(results)
}

fn write_output_files(
    output: &impl Output,
    results: &CalculationResults,
    flags: &ProjectFlags,
) -> anyhow::Result<()> {
    if flags.contains(ProjectFlags::JSON_RESULTS) {
        info!("writing out to results");
        let mut writer = output.writer_for_location_key("results", "json")?;
        serde_json::to_writer_pretty(&mut writer, results)?;
        writer.flush()?;
    }
    if flags.contains(ProjectFlags::CSV_SUMMARY) {
        info!("writing out to summary");
        write_summary_file(output.writer_for_location_key("summary", "csv")?, results)?;
    }
    if flags.contains(ProjectFlags::BREAKDOWN_CSV) {
        info!("writing out to breakdown");
        write_breakdown_file(output.writer_for_location_key("breakdown", "csv")?, results)?;
    }

    Ok(())
}

/// Headline figures keyed by their heading, each with its value and units.
pub(crate) fn summary_rows(
    results: &CalculationResults,
) -> IndexMap<&'static str, (String, &'static str)> {
    match results {
        CalculationResults::HeatPump { results, .. } => IndexMap::from([
            ("Space heating load", (results.space_heating_load.to_string(), "[kW]")),
            ("Hot water load", (results.dhw_load.to_string(), "[kW]")),
            ("Total heat load", (results.total_heat_load.to_string(), "[kW]")),
            ("Heat loss per floor area", (results.heat_loss_per_m2.to_string(), "[W/m2]")),
            ("Design COP", (results.cop.to_string(), "[ratio]")),
            ("Seasonal COP", (results.performance.seasonal_cop.to_string(), "[ratio]")),
            ("Flow temperature", (results.flow_temperature.to_string(), "[deg C]")),
            ("Electrical power", (results.electrical_power.to_string(), "[kW]")),
            ("Annual heat demand", (results.annual_heat_demand_kwh.to_string(), "[kWh]")),
            ("Annual electricity", (results.annual_electricity_kwh.to_string(), "[kWh]")),
            ("Defrost penalty", (results.defrost_penalty_kwh.to_string(), "[kWh]")),
            ("Daily cost", (results.daily_cost.to_string(), "[GBP]")),
            ("Annual cost", (results.annual_cost.to_string(), "[GBP]")),
            ("Carbon savings", (results.carbon_savings.to_string(), "[kgCO2e]")),
            ("Recommended unit size", (results.sizing.recommended.to_string(), "[kW]")),
            ("Within MCS sizing", (results.sizing.within_mcs.to_string(), "[bool]")),
            ("BUS grant", (results.bus_grant.amount.to_string(), "[GBP]")),
            ("Efficiency", (results.performance.efficiency.to_string(), "[rating]")),
            ("Suitability", (results.performance.suitability.to_string(), "[rating]")),
            ("Review findings", (results.review_findings.len().to_string(), "[count]")),
        ]),
        CalculationResults::SolarPv(results) => {
            let payback = results
                .payback_years
                .map_or_else(|| "None".to_string(), |years| years.to_string());

            IndexMap::from([
                ("Annual generation", (results.annual_generation.to_string(), "[kWh]")),
                ("Annual savings", (results.annual_savings.to_string(), "[GBP]")),
                ("Lifetime savings", (results.lifetime_savings.to_string(), "[GBP]")),
                ("System cost", (results.cost_breakdown.total.to_string(), "[GBP]")),
                ("Payback", (payback, "[years]")),
                ("Carbon savings", (results.carbon_savings.to_string(), "[kgCO2e]")),
            ])
        }
    }
}

fn write_summary_file(writer: impl Write, results: &CalculationResults) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new().from_writer(writer);

    writer.write_record(["Output", "Value", "Units"])?;
    for (heading, (value, units)) in summary_rows(results) {
        writer.write_record([heading, value.as_str(), units])?;
    }

    writer.flush()?;

    Ok(())
}

fn write_breakdown_file(writer: impl Write, results: &CalculationResults) -> anyhow::Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_writer(writer);

    match results {
        CalculationResults::HeatPump { results, .. } => {
            writer.write_record(["Fuel", "Annual cost", "Heat pump saving"])?;
            writer.write_record(["[name]", "[GBP]", "[GBP]"])?;
            for row in &results.fuel_comparison {
                writer.write_record([
                    row.label.clone(),
                    row.annual_cost.to_string(),
                    row.saving.to_string(),
                ])?;
            }
        }
        CalculationResults::SolarPv(results) => {
            writer.write_record(["Year", "Generation", "Cumulative savings"])?;
            writer.write_record(["[count]", "[kWh]", "[GBP]"])?;
            for year in &results.degradation_curve {
                writer.write_record([
                    year.year.to_string(),
                    year.generation.to_string(),
                    year.cumulative_savings.to_string(),
                ])?;
            }
        }
    }

    writer.flush()?;

    Ok(())
}
