use crate::core::assumptions::{EnergyAssumptions, SolarCostShares};
use crate::core::coefficients::{SolarCoefficientTable, StandardCoefficients};
use crate::core::common::ensure_finite;
use crate::errors::ValidationError;
use crate::input::SolarPvInputs;
use interp::{interp, InterpMode};
use serde::Serialize;
use tracing::debug;

/// This module estimates the generation, savings and payback of a rooftop solar PV array.

pub const PITCH_MIN: f64 = 0.;
pub const PITCH_MAX: f64 = 90.;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SolarPvResults {
    /// Generation in the first year of operation, in kWh
    pub annual_generation: f64,
    pub degradation_curve: Vec<YearlyGeneration>,
    pub cost_breakdown: CostBreakdown,
    /// Bill saving plus export income in the first year, in £
    pub annual_savings: f64,
    /// First year in which the cumulative savings cover the installed cost
    pub payback_years: Option<u32>,
    /// Savings over the whole assumed lifetime, in £
    pub lifetime_savings: f64,
    /// Grid emissions displaced in the first year, in kgCO2e
    pub carbon_savings: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct YearlyGeneration {
    pub year: u32,
    /// in kWh
    pub generation: f64,
    /// in £, up to and including this year
    pub cumulative_savings: f64,
}

/// Installed cost of the array, in £.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub panels: f64,
    pub inverter: f64,
    pub mounting: f64,
    pub labour: f64,
    pub scaffolding: f64,
    pub total: f64,
}

impl CostBreakdown {
    fn split(total: f64, shares: &SolarCostShares) -> Self {
        Self {
            panels: total * shares.panels,
            inverter: total * shares.inverter,
            mounting: total * shares.mounting,
            labour: total * shares.labour,
            scaffolding: total * shares.scaffolding,
            total,
        }
    }
}

pub fn calculate_solar_pv_uk_2025(
    inputs: &SolarPvInputs,
) -> Result<SolarPvResults, ValidationError> {
    calculate_solar_pv(inputs, &StandardCoefficients, &EnergyAssumptions::uk_2025())
}

/// Estimate generation and financial return for a PV array.
///
/// Arguments:
/// * `inputs` - the array, its siting and the tariffs it is valued against
/// * `coefficients` - regional yield, orientation, pitch and shading corrections
/// * `assumptions` - degradation, lifetime, cost and grid carbon figures
pub fn calculate_solar_pv(
    inputs: &SolarPvInputs,
    coefficients: &impl SolarCoefficientTable,
    assumptions: &EnergyAssumptions,
) -> Result<SolarPvResults, ValidationError> {
    validate(inputs)?;

    let annual_generation = inputs.system_size
        * coefficients.annual_yield(inputs.region)
        * coefficients.orientation_factor(inputs.orientation)
        * pitch_factor(coefficients.pitch_factors(), inputs.pitch)
        * coefficients.shading_factor(inputs.shading);

    let value_per_kwh = value_per_kwh(inputs);
    let degradation_curve = degradation_curve(
        annual_generation,
        value_per_kwh,
        assumptions.solar.degradation_rate,
        assumptions.solar.lifetime_years,
    );

    let total_cost = inputs.system_cost.unwrap_or(
        assumptions.solar.cost_per_kwp * inputs.system_size + assumptions.solar.fixed_cost,
    );
    let cost_breakdown = CostBreakdown::split(total_cost, &assumptions.solar.cost_shares);

    let payback_years = degradation_curve
        .iter()
        .find(|year| year.cumulative_savings >= total_cost)
        .map(|year| year.year);
    let lifetime_savings = degradation_curve
        .last()
        .map_or(0., |year| year.cumulative_savings);
    debug!(
        annual_generation,
        total_cost, lifetime_savings, ?payback_years, "calculated solar PV return"
    );

    Ok(SolarPvResults {
        annual_generation,
        degradation_curve,
        cost_breakdown,
        annual_savings: annual_generation * value_per_kwh,
        payback_years,
        lifetime_savings,
        carbon_savings: annual_generation * assumptions.grid_carbon_intensity,
    })
}

pub(crate) fn validate(inputs: &SolarPvInputs) -> Result<(), ValidationError> {
    let system_size = ensure_finite("system_size", inputs.system_size)?;
    let pitch = ensure_finite("pitch", inputs.pitch)?;
    let electricity_rate = ensure_finite("electricity_rate", inputs.electricity_rate)?;
    let export_rate = ensure_finite("export_rate", inputs.export_rate)?;
    let self_consumption = ensure_finite("self_consumption", inputs.self_consumption)?;

    if system_size <= 0. {
        return Err(ValidationError::SystemSizeNotPositive(system_size));
    }
    if !(PITCH_MIN..=PITCH_MAX).contains(&pitch) {
        return Err(ValidationError::PitchOutOfRange(pitch));
    }
    if electricity_rate < 0. {
        return Err(ValidationError::ElectricityRateNegative(electricity_rate));
    }
    if export_rate < 0. {
        return Err(ValidationError::ExportRateNegative(export_rate));
    }
    if !(0. ..=1.).contains(&self_consumption) {
        return Err(ValidationError::SelfConsumptionOutOfRange(self_consumption));
    }
    if let Some(system_cost) = inputs.system_cost {
        let system_cost = ensure_finite("system_cost", system_cost)?;
        if system_cost < 0. {
            return Err(ValidationError::SystemCostNegative(system_cost));
        }
    }

    Ok(())
}

/// Linear interpolation over the pitch table; pitches outside the table take the end values.
pub(crate) fn pitch_factor(pitch_factors: &[(f64, f64)], pitch: f64) -> f64 {
    let (pitches, factors): (Vec<f64>, Vec<f64>) = pitch_factors.iter().copied().unzip();
    interp(&pitches, &factors, pitch, &InterpMode::FirstLast)
}

/// Value of one generated kWh in £, split between avoided imports and export payments.
fn value_per_kwh(inputs: &SolarPvInputs) -> f64 {
    inputs.self_consumption * inputs.electricity_rate
        + (1. - inputs.self_consumption) * inputs.export_rate
}

pub(crate) fn degradation_curve(
    annual_generation: f64,
    value_per_kwh: f64,
    degradation_rate: f64,
    lifetime_years: u32,
) -> Vec<YearlyGeneration> {
    let mut generation = annual_generation;
    let mut cumulative_savings = 0.;
    (1..=lifetime_years)
        .map(|year| {
            if year > 1 {
                generation *= 1. - degradation_rate;
            }
            cumulative_savings += generation * value_per_kwh;
            YearlyGeneration {
                year,
                generation,
                cumulative_savings,
            }
        })
        .collect()
}
