use crate::core::assumptions::{EnergyAssumptions, Fuel, FuelAssumption};
use serde::Serialize;

/// This module compares a heat pump's running cost and emissions with the fuels it would
/// typically replace.

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FuelComparison {
    pub fuel: Fuel,
    pub label: String,
    /// Annual cost of meeting the same heat demand with this fuel, in £
    pub annual_cost: f64,
    /// Annual cost of this fuel less the heat pump's annual cost, in £. Negative when the heat
    /// pump is the more expensive option.
    pub saving: f64,
}

/// Annual cost in £ of delivering `heat_demand_kwh` of heat with the given fuel.
///
/// Fuels without a fixed rate are billed at `electricity_rate`.
pub(crate) fn fuel_annual_cost(
    fuel: &FuelAssumption,
    heat_demand_kwh: f64,
    electricity_rate: f64,
) -> f64 {
    let rate = fuel.rate.unwrap_or(electricity_rate);
    heat_demand_kwh / fuel.efficiency * rate
}

/// Build the comparison table, one row per fuel in the order the assumptions list them.
pub(crate) fn compare_fuels(
    fuels: &[FuelAssumption],
    heat_demand_kwh: f64,
    heat_pump_annual_cost: f64,
    electricity_rate: f64,
) -> Vec<FuelComparison> {
    fuels
        .iter()
        .map(|fuel| {
            let annual_cost = fuel_annual_cost(fuel, heat_demand_kwh, electricity_rate);
            FuelComparison {
                fuel: fuel.fuel,
                label: fuel.label.clone(),
                annual_cost,
                saving: annual_cost - heat_pump_annual_cost,
            }
        })
        .collect()
}

/// Annual carbon saving in kgCO2e of the heat pump against a gas boiler meeting the same demand.
///
/// Arguments:
/// * `heat_demand_kwh` - annual heat delivered to the dwelling
/// * `heat_pump_electricity_kwh` - annual electricity drawn by the heat pump
pub(crate) fn carbon_savings(
    heat_demand_kwh: f64,
    heat_pump_electricity_kwh: f64,
    assumptions: &EnergyAssumptions,
) -> f64 {
    let gas_kwh = heat_demand_kwh / assumptions.baseline_boiler_efficiency;
    gas_kwh * assumptions.gas_carbon_intensity
        - heat_pump_electricity_kwh * assumptions.grid_carbon_intensity
}
