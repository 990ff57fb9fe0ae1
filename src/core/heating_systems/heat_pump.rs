use crate::compare_floats::{clamp_between, max_of_2, min_of_2};
use crate::core::assumptions::{EnergyAssumptions, Fuel};
use crate::core::coefficients::{
    CoefficientTable, EmitterCharacteristics, HeatPumpCharacteristics, StandardCoefficients,
};
use crate::core::common::ensure_finite;
use crate::core::energy_supply::fuel_comparison::{carbon_savings, compare_fuels, FuelComparison};
use crate::core::heating_systems::review::{review_findings, ReviewFinding};
use crate::core::units::{conduction_load_kw, load_per_floor_area};
use crate::errors::ValidationError;
use crate::input::{HeatPumpInputs, HeatPumpType, UkRegion};
use serde::Serialize;
use strum_macros::Display;
use tracing::{debug, warn};

/// This module provides the heat pump load and performance engine: a steady-state heat
/// loss estimate for the dwelling, a derated design COP for the chosen heat pump and emitters,
/// and the running cost, carbon, grant and sizing figures that follow from them.
///
/// The heat loss is a single whole-dwelling coefficient per m² of floor area rather than a full
/// fabric breakdown, so results are indicative and not a substitute for an MCS heat loss survey.

/// COP loss per kelvin of flow temperature above the reference
const FLOW_TEMP_PENALTY_PER_K: f64 = 0.01;
/// Flow temperature at which emitters impose no COP penalty, in Celsius
const FLOW_REFERENCE_TEMP: f64 = 30.;
/// Outdoor temperature below which air source coils start to frost, in Celsius
const DEFROST_ONSET_TEMP: f64 = 7.;
/// Share of annual heat output lost to defrost per kelvin of design temperature below onset
const DEFROST_FRACTION_PER_K: f64 = 0.004;
/// Non-standard units are rounded up to the next half kW
const UNIT_STEPS_PER_KW: f64 = 2.;

pub const INDOOR_TEMP_MIN: f64 = 18.;
pub const INDOOR_TEMP_MAX: f64 = 25.;
pub const DESIGN_TEMP_MIN: f64 = -30.;
pub const DESIGN_TEMP_MAX: f64 = 30.;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HeatPumpResults {
    /// Design space heating load, in kW
    pub space_heating_load: f64,
    /// Hot water contribution to the design load, in kW
    pub dhw_load: f64,
    /// Design heat load the heat pump must meet, in kW
    pub total_heat_load: f64,
    /// Design-point coefficient of performance after derating
    pub cop: f64,
    /// Whether the derated COP fell below the minimum and was raised to it
    pub cop_floor_applied: bool,
    /// Electrical input at design conditions, in kW
    pub electrical_power: f64,
    /// Design flow temperature of the emitter circuit, in Celsius
    pub flow_temperature: f64,
    /// Running cost on a design day, in £
    pub daily_cost: f64,
    /// Annual running cost, in £
    pub annual_cost: f64,
    /// Heat delivered to the dwelling over a year, in kWh
    pub annual_heat_demand_kwh: f64,
    /// Electricity drawn by the heat pump over a year, in kWh
    pub annual_electricity_kwh: f64,
    /// Extra annual heat output spent on defrost cycles, in kWh
    pub defrost_penalty_kwh: f64,
    /// Space heating load per m² of floor, in W/m²
    pub heat_loss_per_m2: f64,
    /// Annual saving against a gas boiler, in kgCO2e. Negative when the heat pump emits more.
    pub carbon_savings: f64,
    pub fuel_comparison: Vec<FuelComparison>,
    pub bus_grant: BusGrant,
    pub sizing: Sizing,
    pub performance: Performance,
    pub review_findings: Vec<ReviewFinding>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BusGrant {
    pub eligible: bool,
    /// Grant value in £, zero when not eligible
    pub amount: f64,
    pub reason: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sizing {
    /// Smallest standard unit rating that meets the design load, in kW
    pub recommended: f64,
    /// Capacity assessed against the MCS band: the installed capacity when given, else the
    /// recommended rating, in kW
    pub capacity_checked: f64,
    pub within_mcs: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Performance {
    pub seasonal_cop: f64,
    pub efficiency: EfficiencyRating,
    pub suitability: Suitability,
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EfficiencyRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Suitability {
    #[strum(to_string = "Highly suitable")]
    HighlySuitable,
    Suitable,
    #[strum(to_string = "Marginal - fabric improvements advised")]
    Marginal,
    #[strum(to_string = "Unsuitable without fabric upgrades")]
    Unsuitable,
}

/// Calculate heat loads, performance and costs for a heat pump installation using the
/// coefficient tables and assumptions the product ships with.
pub fn calculate_heat_pump_load_uk_2025(
    inputs: &HeatPumpInputs,
) -> Result<HeatPumpResults, ValidationError> {
    calculate_heat_pump_load(inputs, &StandardCoefficients, &EnergyAssumptions::uk_2025())
}

/// Calculate heat loads, performance and costs for a heat pump installation.
///
/// Arguments:
/// * `inputs` - description of the dwelling and the proposed system
/// * `coefficients` - lookup tables for the enumerated inputs
/// * `assumptions` - tariff, carbon, grant and sizing figures
///
/// The calculation has no side effects; identical arguments always give identical results.
pub fn calculate_heat_pump_load(
    inputs: &HeatPumpInputs,
    coefficients: &impl CoefficientTable,
    assumptions: &EnergyAssumptions,
) -> Result<HeatPumpResults, ValidationError> {
    validate(inputs)?;

    let heat_pump = coefficients.heat_pump(inputs.heat_pump_type);
    let emitter = coefficients.emitter(inputs.emitter_type);
    ensure_positive_coefficient("base COP", heat_pump.base_cop)?;
    ensure_positive_coefficient("emitter efficiency", emitter.efficiency)?;

    let space_heating_load = space_heating_load(
        inputs.floor_area,
        coefficients.insulation_u_value(inputs.insulation_level),
        coefficients.air_tightness_multiplier(inputs.air_tightness),
        inputs.indoor_temp,
        inputs.design_temp,
    );
    let dhw_load = coefficients.dhw_load(inputs.dhw_option);
    let total_heat_load = space_heating_load + dhw_load;
    debug!(
        space_heating_load,
        dhw_load, total_heat_load, "calculated design heat load"
    );

    let (cop, cop_floor_applied) = derated_cop(
        &heat_pump,
        &emitter,
        inputs.indoor_temp,
        inputs.design_temp,
        assumptions.min_cop,
    );
    let electrical_power = total_heat_load / (emitter.efficiency * cop);

    let annual_heat_demand_kwh = total_heat_load * assumptions.full_load_hours;
    // heat the unit itself has to produce, including what the emitter circuit loses
    let annual_equivalent_kwh = annual_heat_demand_kwh / emitter.efficiency;
    let defrost_penalty_kwh =
        defrost_penalty(heat_pump.defrosts, annual_equivalent_kwh, inputs.design_temp);

    let daily_cost = electrical_power * assumptions.daily_run_hours * inputs.electricity_rate;
    let annual_electricity_kwh = (annual_equivalent_kwh + defrost_penalty_kwh) / cop;
    let annual_cost = annual_electricity_kwh * inputs.electricity_rate;
    debug!(
        cop,
        electrical_power, annual_electricity_kwh, annual_cost, "calculated running costs"
    );

    let seasonal_cop = cop * (1. + heat_pump.seasonal_uplift);
    let heat_loss_per_m2 = load_per_floor_area(space_heating_load, inputs.floor_area);

    let mut results = HeatPumpResults {
        space_heating_load,
        dhw_load,
        total_heat_load,
        cop,
        cop_floor_applied,
        electrical_power,
        flow_temperature: emitter.flow_temperature,
        daily_cost,
        annual_cost,
        annual_heat_demand_kwh,
        annual_electricity_kwh,
        defrost_penalty_kwh,
        heat_loss_per_m2,
        carbon_savings: carbon_savings(annual_heat_demand_kwh, annual_electricity_kwh, assumptions),
        fuel_comparison: compare_fuels(
            &assumptions.fuels,
            annual_heat_demand_kwh,
            annual_cost,
            inputs.electricity_rate,
        ),
        bus_grant: bus_grant(
            inputs.heat_pump_type,
            &heat_pump,
            total_heat_load,
            inputs.region,
            assumptions,
        ),
        sizing: mcs_sizing(total_heat_load, inputs.installed_capacity, assumptions),
        performance: Performance {
            seasonal_cop,
            efficiency: efficiency_rating(seasonal_cop),
            suitability: suitability(heat_loss_per_m2, seasonal_cop),
        },
        review_findings: vec![],
    };
    results.review_findings = review_findings(inputs, &results, assumptions);

    Ok(results)
}

/// Check every field the engine relies on before any arithmetic runs.
pub(crate) fn validate(inputs: &HeatPumpInputs) -> Result<(), ValidationError> {
    let floor_area = ensure_finite("floor_area", inputs.floor_area)?;
    let indoor_temp = ensure_finite("indoor_temp", inputs.indoor_temp)?;
    let design_temp = ensure_finite("design_temp", inputs.design_temp)?;
    let electricity_rate = ensure_finite("electricity_rate", inputs.electricity_rate)?;

    if floor_area <= 0. {
        return Err(ValidationError::FloorAreaNotPositive(floor_area));
    }
    if !(INDOOR_TEMP_MIN..=INDOOR_TEMP_MAX).contains(&indoor_temp) {
        return Err(ValidationError::IndoorTempOutOfRange(indoor_temp));
    }
    if !(DESIGN_TEMP_MIN..=DESIGN_TEMP_MAX).contains(&design_temp) {
        return Err(ValidationError::DesignTempOutOfRange(design_temp));
    }
    if electricity_rate < 0. {
        return Err(ValidationError::ElectricityRateNegative(electricity_rate));
    }
    if let Some(installed_capacity) = inputs.installed_capacity {
        let installed_capacity = ensure_finite("installed_capacity", installed_capacity)?;
        if installed_capacity <= 0. {
            return Err(ValidationError::InstalledCapacityNotPositive(
                installed_capacity,
            ));
        }
    }

    Ok(())
}

/// Steady-state space heating load in kW, never negative.
///
/// A design temperature at or above the indoor temperature means there is no space heating
/// demand at design conditions, so the load is zero rather than negative.
/// Divisors taken from a coefficient table must be usable before any figure is derived from them.
fn ensure_positive_coefficient(
    coefficient: &'static str,
    value: f64,
) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0. {
        Ok(())
    } else {
        Err(ValidationError::CoefficientNotPositive { coefficient, value })
    }
}

pub(crate) fn space_heating_load(
    floor_area: f64,
    u_value: f64,
    air_tightness_multiplier: f64,
    indoor_temp: f64,
    design_temp: f64,
) -> f64 {
    let temp_diff = indoor_temp - design_temp;
    let load = conduction_load_kw(floor_area, u_value, temp_diff) * air_tightness_multiplier;
    if load < 0. {
        warn!(
            indoor_temp,
            design_temp, "design temperature is above indoor temperature; space heating load set to zero"
        );
        return 0.;
    }
    load
}

/// Derate the heat pump's base COP for the design temperature difference and the emitter
/// flow temperature. Returns the COP and whether the minimum COP floor was applied.
pub(crate) fn derated_cop(
    heat_pump: &HeatPumpCharacteristics,
    emitter: &EmitterCharacteristics,
    indoor_temp: f64,
    design_temp: f64,
    min_cop: f64,
) -> (f64, bool) {
    let temp_diff = max_of_2(indoor_temp - design_temp, 0.);
    let temp_factor = clamp_between(1. - heat_pump.temp_sensitivity * temp_diff, 0., 1.);
    let flow_factor = clamp_between(
        1. - FLOW_TEMP_PENALTY_PER_K * (emitter.flow_temperature - FLOW_REFERENCE_TEMP),
        0.,
        1.,
    );
    let cop = heat_pump.base_cop * temp_factor * flow_factor;

    if cop < min_cop {
        warn!(cop, min_cop, "derated COP below minimum; using minimum COP");
        (min_cop, true)
    } else {
        (cop, false)
    }
}

/// Additional annual heat output in kWh spent melting frost off an outdoor coil. Zero for
/// heat pumps that do not defrost or design temperatures above the frosting onset.
pub(crate) fn defrost_penalty(defrosts: bool, annual_equivalent_kwh: f64, design_temp: f64) -> f64 {
    if !defrosts {
        return 0.;
    }
    let kelvin_below_onset = max_of_2(DEFROST_ONSET_TEMP - design_temp, 0.);
    annual_equivalent_kwh * DEFROST_FRACTION_PER_K * kelvin_below_onset
}

pub(crate) fn bus_grant(
    heat_pump_type: HeatPumpType,
    heat_pump: &HeatPumpCharacteristics,
    total_heat_load: f64,
    region: Option<UkRegion>,
    assumptions: &EnergyAssumptions,
) -> BusGrant {
    let ineligible = |reason: String| BusGrant {
        eligible: false,
        amount: 0.,
        reason,
    };

    if !heat_pump.bus_eligible {
        return ineligible(format!(
            "{heat_pump_type} installations are not funded by the Boiler Upgrade Scheme"
        ));
    }
    if let Some(region) = region.filter(|region| !region.in_england_or_wales()) {
        return ineligible(format!(
            "The Boiler Upgrade Scheme only covers England and Wales, not {region}"
        ));
    }
    if total_heat_load > assumptions.bus_max_capacity {
        return ineligible(format!(
            "Design heat load of {total_heat_load:.1} kW exceeds the {} kW scheme limit",
            assumptions.bus_max_capacity
        ));
    }

    let reason = match region {
        Some(region) => format!("{heat_pump_type} in {region} qualifies for the Boiler Upgrade Scheme"),
        None => format!(
            "{heat_pump_type} qualifies for the Boiler Upgrade Scheme, assuming the property is in England or Wales"
        ),
    };
    BusGrant {
        eligible: true,
        amount: assumptions.bus_grant_amount,
        reason,
    }
}

/// Pick the smallest standard unit inside the band from the design load up to the permitted
/// oversizing margin, and check the assessed capacity against the same band.
///
/// When no standard unit falls in the band the load is rounded up to the next half kW, capped
/// at the top of the band, so the recommended unit always passes its own check.
pub(crate) fn mcs_sizing(
    total_heat_load: f64,
    installed_capacity: Option<f64>,
    assumptions: &EnergyAssumptions,
) -> Sizing {
    let upper_bound = total_heat_load * (1. + assumptions.mcs_oversize_tolerance);
    let in_band = |capacity: f64| {
        (capacity >= total_heat_load || is_close!(capacity, total_heat_load))
            && (capacity <= upper_bound || is_close!(capacity, upper_bound))
    };

    let recommended = assumptions
        .standard_unit_sizes
        .iter()
        .copied()
        .find(|size| in_band(*size))
        .unwrap_or_else(|| {
            min_of_2(
                (total_heat_load * UNIT_STEPS_PER_KW).ceil() / UNIT_STEPS_PER_KW,
                upper_bound,
            )
        });
    let capacity_checked = installed_capacity.unwrap_or(recommended);

    Sizing {
        recommended,
        capacity_checked,
        within_mcs: in_band(capacity_checked),
    }
}

pub(crate) fn efficiency_rating(seasonal_cop: f64) -> EfficiencyRating {
    match seasonal_cop {
        scop if scop >= 4.0 => EfficiencyRating::Excellent,
        scop if scop >= 3.0 => EfficiencyRating::Good,
        scop if scop >= 2.5 => EfficiencyRating::Fair,
        _ => EfficiencyRating::Poor,
    }
}

/// How well the dwelling suits a heat pump, from its space heating load per m² and the
/// seasonal COP the system would achieve.
pub(crate) fn suitability(heat_loss_per_m2: f64, seasonal_cop: f64) -> Suitability {
    match heat_loss_per_m2 {
        loss if loss <= 50. && seasonal_cop >= 3.0 => Suitability::HighlySuitable,
        loss if loss <= 80. => Suitability::Suitable,
        loss if loss <= 120. => Suitability::Marginal,
        _ => Suitability::Unsuitable,
    }
}

impl HeatPumpResults {
    /// The comparison row for mains gas, when the assumptions include one.
    pub fn gas_comparison(&self) -> Option<&FuelComparison> {
        self.fuel_comparison
            .iter()
            .find(|row| row.fuel == Fuel::MainsGas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{AirTightness, DhwOption, EmitterType, InsulationLevel};
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn inputs() -> HeatPumpInputs {
        HeatPumpInputs {
            floor_area: 100.,
            insulation_level: InsulationLevel::Average,
            air_tightness: AirTightness::Average,
            design_temp: -3.,
            indoor_temp: 21.,
            heat_pump_type: HeatPumpType::AirSource,
            emitter_type: EmitterType::Radiators,
            dhw_option: DhwOption::Cylinder,
            electricity_rate: 0.30,
            region: None,
            installed_capacity: None,
            weather_compensation: false,
        }
    }

    #[fixture]
    fn assumptions() -> EnergyAssumptions {
        EnergyAssumptions::uk_2025()
    }

    #[rstest]
    fn should_calculate_space_heating_load() {
        assert_relative_eq!(
            space_heating_load(100., 2.0, 1.1, 21., -3.),
            5.28,
            max_relative = 1e-12
        );
    }

    #[rstest]
    fn should_clamp_space_heating_load_when_design_temp_above_indoor() {
        assert_eq!(space_heating_load(100., 2.0, 1.1, 20., 24.), 0.);
    }

    #[rstest]
    fn should_derate_cop_for_temperature_and_flow() {
        let heat_pump = StandardCoefficients.heat_pump(HeatPumpType::AirSource);
        let emitter = StandardCoefficients.emitter(EmitterType::Radiators);

        let (cop, floor_applied) = derated_cop(&heat_pump, &emitter, 21., -3., 1.5);

        assert_relative_eq!(cop, 3.5 * 0.808 * 0.8, max_relative = 1e-12);
        assert!(!floor_applied);
    }

    #[rstest]
    fn should_apply_cop_floor() {
        let heat_pump = HeatPumpCharacteristics {
            base_cop: 2.0,
            temp_sensitivity: 0.02,
            seasonal_uplift: 0.,
            defrosts: true,
            bus_eligible: true,
        };
        let emitter = StandardCoefficients.emitter(EmitterType::Radiators);

        let (cop, floor_applied) = derated_cop(&heat_pump, &emitter, 21., -20., 1.5);

        assert_eq!(cop, 1.5);
        assert!(floor_applied);
    }

    #[rstest]
    fn should_not_raise_cop_when_design_temp_above_indoor() {
        let heat_pump = StandardCoefficients.heat_pump(HeatPumpType::GroundSource);
        let emitter = StandardCoefficients.emitter(EmitterType::Underfloor);

        let (cop, _) = derated_cop(&heat_pump, &emitter, 18., 25., 1.5);

        assert_relative_eq!(cop, 4.2 * 0.95, max_relative = 1e-12);
    }

    #[rstest]
    #[case(7., 0.)]
    #[case(12., 0.)]
    #[case(-3., 10_000. * 0.004 * 10.)]
    fn should_calculate_defrost_penalty(#[case] design_temp: f64, #[case] expected: f64) {
        assert_relative_eq!(
            defrost_penalty(true, 10_000., design_temp),
            expected,
            max_relative = 1e-12
        );
    }

    #[rstest]
    fn should_not_apply_defrost_penalty_without_defrost() {
        assert_eq!(defrost_penalty(false, 10_000., -20.), 0.);
    }

    #[rstest]
    #[case(-1.)]
    #[case(0.)]
    fn should_reject_non_positive_floor_area(mut inputs: HeatPumpInputs, #[case] floor_area: f64) {
        inputs.floor_area = floor_area;
        assert_eq!(
            validate(&inputs),
            Err(ValidationError::FloorAreaNotPositive(floor_area))
        );
    }

    #[rstest]
    #[case(17.9)]
    #[case(25.1)]
    fn should_reject_indoor_temp_out_of_range(mut inputs: HeatPumpInputs, #[case] indoor: f64) {
        inputs.indoor_temp = indoor;
        assert_eq!(
            validate(&inputs),
            Err(ValidationError::IndoorTempOutOfRange(indoor))
        );
    }

    #[rstest]
    #[case(18.)]
    #[case(25.)]
    fn should_accept_indoor_temp_at_limits(mut inputs: HeatPumpInputs, #[case] indoor: f64) {
        inputs.indoor_temp = indoor;
        assert!(validate(&inputs).is_ok());
    }

    #[rstest]
    fn should_reject_design_temp_out_of_range(mut inputs: HeatPumpInputs) {
        inputs.design_temp = -45.;
        assert_eq!(
            validate(&inputs),
            Err(ValidationError::DesignTempOutOfRange(-45.))
        );
    }

    #[rstest]
    fn should_reject_negative_electricity_rate(mut inputs: HeatPumpInputs) {
        inputs.electricity_rate = -0.01;
        assert_eq!(
            validate(&inputs),
            Err(ValidationError::ElectricityRateNegative(-0.01))
        );
    }

    #[rstest]
    fn should_reject_nan_inputs(mut inputs: HeatPumpInputs) {
        inputs.floor_area = f64::NAN;
        assert!(matches!(
            validate(&inputs),
            Err(ValidationError::NotFinite {
                field: "floor_area",
                ..
            })
        ));
    }

    #[rstest]
    fn should_reject_non_positive_installed_capacity(mut inputs: HeatPumpInputs) {
        inputs.installed_capacity = Some(0.);
        assert_eq!(
            validate(&inputs),
            Err(ValidationError::InstalledCapacityNotPositive(0.))
        );
    }

    #[rstest]
    fn should_recommend_smallest_standard_unit(assumptions: EnergyAssumptions) {
        let sizing = mcs_sizing(6.28, None, &assumptions);
        assert_eq!(sizing.recommended, 7.);
        assert_eq!(sizing.capacity_checked, 7.);
        assert!(sizing.within_mcs);
    }

    #[rstest]
    fn should_round_up_beyond_largest_unit(assumptions: EnergyAssumptions) {
        let sizing = mcs_sizing(18.3, None, &assumptions);
        assert_eq!(sizing.recommended, 18.5);
        assert!(sizing.within_mcs);
    }

    #[rstest]
    #[case(3.94, 4.)]
    #[case(9.7, 10.)]
    #[case(1.1, 1.32)]
    #[case(0., 0.)]
    fn should_recommend_unit_within_band_between_standard_sizes(
        assumptions: EnergyAssumptions,
        #[case] total_heat_load: f64,
        #[case] expected: f64,
    ) {
        let sizing = mcs_sizing(total_heat_load, None, &assumptions);
        assert_relative_eq!(sizing.recommended, expected, max_relative = 1e-12);
        assert_eq!(sizing.capacity_checked, sizing.recommended);
        assert!(sizing.within_mcs);
    }

    #[rstest]
    fn should_accept_own_recommendation_for_well_insulated_home(mut inputs: HeatPumpInputs) {
        inputs.insulation_level = InsulationLevel::Good;
        inputs.air_tightness = AirTightness::Good;
        inputs.design_temp = 0.;

        let results = calculate_heat_pump_load_uk_2025(&inputs).unwrap();

        assert_relative_eq!(results.total_heat_load, 3.94, max_relative = 1e-9);
        assert_eq!(results.sizing.recommended, 4.);
        assert!(results.sizing.within_mcs);
        assert!(results
            .review_findings
            .iter()
            .all(|finding| !finding.id.contains("sized")));
    }

    #[rstest]
    #[case(5., false)]
    #[case(6.28, true)]
    #[case(7.5, true)]
    #[case(9., false)]
    fn should_check_installed_capacity_against_mcs_band(
        assumptions: EnergyAssumptions,
        #[case] installed: f64,
        #[case] within: bool,
    ) {
        let sizing = mcs_sizing(6.28, Some(installed), &assumptions);
        assert_eq!(sizing.recommended, 7.);
        assert_eq!(sizing.capacity_checked, installed);
        assert_eq!(sizing.within_mcs, within);
    }

    #[rstest]
    fn should_grant_bus_for_air_source(assumptions: EnergyAssumptions) {
        let heat_pump = StandardCoefficients.heat_pump(HeatPumpType::AirSource);
        let grant = bus_grant(
            HeatPumpType::AirSource,
            &heat_pump,
            6.,
            Some(UkRegion::Midlands),
            &assumptions,
        );
        assert!(grant.eligible);
        assert_eq!(grant.amount, 7_500.);
    }

    #[rstest]
    fn should_refuse_bus_for_exhaust_air(assumptions: EnergyAssumptions) {
        let heat_pump = StandardCoefficients.heat_pump(HeatPumpType::ExhaustAir);
        let grant = bus_grant(HeatPumpType::ExhaustAir, &heat_pump, 6., None, &assumptions);
        assert!(!grant.eligible);
        assert_eq!(grant.amount, 0.);
    }

    #[rstest]
    fn should_refuse_bus_outside_england_and_wales(assumptions: EnergyAssumptions) {
        let heat_pump = StandardCoefficients.heat_pump(HeatPumpType::GroundSource);
        let grant = bus_grant(
            HeatPumpType::GroundSource,
            &heat_pump,
            6.,
            Some(UkRegion::Scotland),
            &assumptions,
        );
        assert!(!grant.eligible);
        assert!(grant.reason.contains("Scotland"));
    }

    #[rstest]
    fn should_refuse_bus_above_capacity_limit(assumptions: EnergyAssumptions) {
        let heat_pump = StandardCoefficients.heat_pump(HeatPumpType::GroundSource);
        let grant = bus_grant(HeatPumpType::GroundSource, &heat_pump, 46., None, &assumptions);
        assert!(!grant.eligible);
        assert!(grant.reason.contains("45 kW"));
    }

    #[rstest]
    #[case(4.2, EfficiencyRating::Excellent)]
    #[case(3.0, EfficiencyRating::Good)]
    #[case(2.83, EfficiencyRating::Fair)]
    #[case(2.1, EfficiencyRating::Poor)]
    fn should_rate_efficiency(#[case] seasonal_cop: f64, #[case] expected: EfficiencyRating) {
        assert_eq!(efficiency_rating(seasonal_cop), expected);
    }

    #[rstest]
    #[case(40., 3.4, Suitability::HighlySuitable)]
    #[case(40., 2.8, Suitability::Suitable)]
    #[case(52.8, 3.4, Suitability::Suitable)]
    #[case(100., 3.4, Suitability::Marginal)]
    #[case(150., 3.4, Suitability::Unsuitable)]
    fn should_assess_suitability(
        #[case] heat_loss_per_m2: f64,
        #[case] seasonal_cop: f64,
        #[case] expected: Suitability,
    ) {
        assert_eq!(suitability(heat_loss_per_m2, seasonal_cop), expected);
    }

    #[rstest]
    fn should_calculate_reference_case(inputs: HeatPumpInputs) {
        let results = calculate_heat_pump_load_uk_2025(&inputs).unwrap();

        assert_relative_eq!(results.space_heating_load, 5.28, max_relative = 1e-12);
        assert_eq!(results.dhw_load, 1.0);
        assert_relative_eq!(results.total_heat_load, 6.28, max_relative = 1e-12);
        assert_relative_eq!(results.cop, 2.2624, max_relative = 1e-12);
        assert_eq!(results.flow_temperature, 50.);
        assert_relative_eq!(
            results.electrical_power,
            6.28 / (0.93 * 2.2624),
            max_relative = 1e-12
        );
        assert_relative_eq!(results.annual_heat_demand_kwh, 12_560., max_relative = 1e-12);
        assert_relative_eq!(
            results.defrost_penalty_kwh,
            12_560. / 0.93 * 0.04,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            results.annual_cost,
            (12_560. / 0.93) * 1.04 / 2.2624 * 0.30,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            results.daily_cost,
            results.electrical_power * 8. * 0.30,
            max_relative = 1e-12
        );
        assert_relative_eq!(results.heat_loss_per_m2, 52.8, max_relative = 1e-12);
        assert_eq!(results.sizing.recommended, 7.);
        assert!(results.sizing.within_mcs);
        assert!(results.bus_grant.eligible);
        assert_eq!(results.performance.efficiency, EfficiencyRating::Fair);
        assert_eq!(results.performance.suitability, Suitability::Suitable);
        assert_eq!(results.fuel_comparison.len(), 4);
    }

    #[rstest]
    fn should_give_zero_costs_at_zero_electricity_rate(mut inputs: HeatPumpInputs) {
        inputs.electricity_rate = 0.;

        let results = calculate_heat_pump_load_uk_2025(&inputs).unwrap();

        assert_eq!(results.annual_cost, 0.);
        assert_eq!(results.daily_cost, 0.);
        assert!(results.annual_electricity_kwh > 0.);
    }

    #[rstest]
    fn should_find_gas_comparison(inputs: HeatPumpInputs) {
        let results = calculate_heat_pump_load_uk_2025(&inputs).unwrap();
        let gas = results.gas_comparison().unwrap();
        assert_eq!(gas.fuel, Fuel::MainsGas);
        assert_relative_eq!(gas.saving, gas.annual_cost - results.annual_cost);
    }
}
