use crate::core::assumptions::EnergyAssumptions;
use crate::core::heating_systems::heat_pump::HeatPumpResults;
use crate::core::units::single_phase_current;
use crate::input::{AirTightness, DhwOption, HeatPumpInputs, InsulationLevel};
use serde::Serialize;
use strum_macros::Display;

/// Design review of a heat pump calculation. Each rule looks at the inputs and the computed
/// results on its own and raises at most one finding, so the set of findings does not depend
/// on the order the rules run in.

pub const UNDERSIZED_SYSTEM: &str = "undersized-system";
pub const OVERSIZED_SYSTEM: &str = "oversized-system";
pub const HIGH_FLOW_TEMP_POOR_FABRIC: &str = "high-flow-temp-poor-fabric";
pub const COP_FLOOR_APPLIED: &str = "cop-floor-applied";
pub const SCOP_BELOW_BUS_MINIMUM: &str = "scop-below-bus-minimum";
pub const SUPPLY_CURRENT_EXCEEDED: &str = "supply-current-exceeded";
pub const DNO_APPROVAL_REQUIRED: &str = "dno-approval-required";
pub const POOR_AIR_TIGHTNESS: &str = "poor-air-tightness";
pub const NO_HOT_WATER_PROVISION: &str = "no-hot-water-provision";
pub const DEARER_THAN_GAS: &str = "dearer-than-gas";
pub const NO_SPACE_HEATING_DEMAND: &str = "no-space-heating-demand";
pub const BUS_INELIGIBLE: &str = "bus-ineligible";

/// Flow temperature at and above which poorly insulated homes struggle to stay warm, in Celsius
const HIGH_FLOW_TEMPERATURE: f64 = 50.;

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingType {
    Critical,
    Warning,
    Info,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReviewFinding {
    pub id: &'static str,
    #[serde(rename = "type")]
    pub finding_type: FindingType,
    pub title: &'static str,
    pub description: String,
    pub recommendation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regulation: Option<&'static str>,
}

type Rule = fn(&HeatPumpInputs, &HeatPumpResults, &EnergyAssumptions) -> Option<ReviewFinding>;

const RULES: [Rule; 12] = [
    undersized_system,
    oversized_system,
    high_flow_temp_with_poor_fabric,
    cop_floor_applied,
    scop_below_bus_minimum,
    supply_current_exceeded,
    dno_approval_required,
    poor_air_tightness,
    no_hot_water_provision,
    dearer_than_gas,
    no_space_heating_demand,
    bus_ineligible,
];

/// Run every review rule, collecting the findings they raise in rule order.
pub(crate) fn review_findings(
    inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    assumptions: &EnergyAssumptions,
) -> Vec<ReviewFinding> {
    RULES
        .iter()
        .filter_map(|rule| rule(inputs, results, assumptions))
        .collect()
}

fn undersized_system(
    _inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    _assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    let capacity = results.sizing.capacity_checked;
    (!results.sizing.within_mcs && capacity < results.total_heat_load).then(|| ReviewFinding {
        id: UNDERSIZED_SYSTEM,
        finding_type: FindingType::Critical,
        title: "Heat pump undersized",
        description: format!(
            "A {capacity:.1} kW unit cannot meet the design heat load of {:.2} kW",
            results.total_heat_load
        ),
        recommendation: "Select a unit rated at or above the design heat load, or reduce the load with fabric improvements",
        regulation: Some("MCS MIS 3005-D"),
    })
}

fn oversized_system(
    _inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    let capacity = results.sizing.capacity_checked;
    (!results.sizing.within_mcs && capacity >= results.total_heat_load).then(|| ReviewFinding {
        id: OVERSIZED_SYSTEM,
        finding_type: FindingType::Warning,
        title: "Heat pump oversized",
        description: format!(
            "A {capacity:.1} kW unit is more than {:.0}% above the design heat load of {:.2} kW, which leads to short cycling",
            assumptions.mcs_oversize_tolerance * 100.,
            results.total_heat_load
        ),
        recommendation: "Select a smaller unit or one with a wider modulation range",
        regulation: Some("MCS MIS 3005-D"),
    })
}

fn high_flow_temp_with_poor_fabric(
    inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    _assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    (results.flow_temperature >= HIGH_FLOW_TEMPERATURE
        && inputs.insulation_level == InsulationLevel::Poor)
        .then(|| ReviewFinding {
            id: HIGH_FLOW_TEMP_POOR_FABRIC,
            finding_type: FindingType::Warning,
            title: "High flow temperature with poor insulation",
            description: format!(
                "{}ºC flow temperature to {} in a poorly insulated home keeps the COP low",
                results.flow_temperature,
                inputs.emitter_type.to_string().to_lowercase()
            ),
            recommendation: "Upgrade insulation or enlarge emitters so the system can run at 45ºC or below",
            regulation: Some("Building Regulations Approved Document L"),
        })
}

fn cop_floor_applied(
    _inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    results.cop_floor_applied.then(|| ReviewFinding {
        id: COP_FLOOR_APPLIED,
        finding_type: FindingType::Critical,
        title: "Design COP at minimum",
        description: format!(
            "Derating took the design COP below {}, so figures use that minimum and are optimistic",
            assumptions.min_cop
        ),
        recommendation: "Reconsider the heat pump type, emitters and flow temperature for this property",
        regulation: None,
    })
}

fn scop_below_bus_minimum(
    _inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    (results.performance.seasonal_cop < assumptions.bus_min_scop).then(|| ReviewFinding {
        id: SCOP_BELOW_BUS_MINIMUM,
        finding_type: FindingType::Warning,
        title: "Seasonal COP below scheme minimum",
        description: format!(
            "Estimated seasonal COP of {:.2} is below the {} required for Boiler Upgrade Scheme funding",
            results.performance.seasonal_cop, assumptions.bus_min_scop
        ),
        recommendation: "Lower the design flow temperature to raise seasonal performance",
        regulation: Some("Boiler Upgrade Scheme (England and Wales) Regulations 2022"),
    })
}

fn supply_current_exceeded(
    _inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    let current = single_phase_current(results.electrical_power);
    (current > assumptions.max_single_phase_current).then(|| ReviewFinding {
        id: SUPPLY_CURRENT_EXCEEDED,
        finding_type: FindingType::Critical,
        title: "Supply current exceeds single-phase circuit rating",
        description: format!(
            "Design electrical input of {:.2} kW draws {current:.1} A, above the {} A a single-phase heat pump circuit is rated for",
            results.electrical_power, assumptions.max_single_phase_current
        ),
        recommendation: "Assess maximum demand and consider a three-phase supply or a cascade of smaller units",
        regulation: Some("BS 7671 Regulation 132.16"),
    })
}

fn dno_approval_required(
    _inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    (results.electrical_power > assumptions.dno_approval_threshold).then(|| ReviewFinding {
        id: DNO_APPROVAL_REQUIRED,
        finding_type: FindingType::Info,
        title: "DNO approval required before installation",
        description: format!(
            "Design electrical input of {:.2} kW is above the {} kW connect-and-notify threshold",
            results.electrical_power, assumptions.dno_approval_threshold
        ),
        recommendation: "Submit an application to the DNO and wait for approval before connecting",
        regulation: Some("ENA Heat Pump Connect and Notify"),
    })
}

fn poor_air_tightness(
    inputs: &HeatPumpInputs,
    _results: &HeatPumpResults,
    _assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    (inputs.air_tightness == AirTightness::Poor).then(|| ReviewFinding {
        id: POOR_AIR_TIGHTNESS,
        finding_type: FindingType::Info,
        title: "Poor air tightness",
        description: "Uncontrolled air leakage adds a quarter to the space heating load".to_string(),
        recommendation: "Draught-proof windows, doors and service penetrations before sizing the system",
        regulation: Some("Building Regulations Approved Document L"),
    })
}

fn no_hot_water_provision(
    inputs: &HeatPumpInputs,
    _results: &HeatPumpResults,
    _assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    (inputs.dhw_option == DhwOption::None).then(|| ReviewFinding {
        id: NO_HOT_WATER_PROVISION,
        finding_type: FindingType::Info,
        title: "No hot water provision",
        description: "The heat pump is sized for space heating only".to_string(),
        recommendation: "Confirm how hot water will be provided and allow space for a cylinder if needed",
        regulation: None,
    })
}

fn dearer_than_gas(
    _inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    _assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    let gas = results.gas_comparison()?;
    (gas.saving < 0.).then(|| ReviewFinding {
        id: DEARER_THAN_GAS,
        finding_type: FindingType::Warning,
        title: "Running cost higher than gas",
        description: format!(
            "Estimated annual cost of £{:.0} is £{:.0} more than a gas boiler at current tariffs",
            results.annual_cost, -gas.saving
        ),
        recommendation: "Consider a heat pump tariff, lower flow temperatures or pairing with solar PV",
        regulation: None,
    })
}

fn no_space_heating_demand(
    inputs: &HeatPumpInputs,
    _results: &HeatPumpResults,
    _assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    (inputs.design_temp >= inputs.indoor_temp).then(|| ReviewFinding {
        id: NO_SPACE_HEATING_DEMAND,
        finding_type: FindingType::Info,
        title: "No space heating demand at design conditions",
        description: format!(
            "Design temperature of {}ºC is not below the indoor temperature of {}ºC, so the space heating load is zero",
            inputs.design_temp, inputs.indoor_temp
        ),
        recommendation: "Check the external design temperature for the property's location",
        regulation: Some("CIBSE Guide A"),
    })
}

fn bus_ineligible(
    _inputs: &HeatPumpInputs,
    results: &HeatPumpResults,
    _assumptions: &EnergyAssumptions,
) -> Option<ReviewFinding> {
    (!results.bus_grant.eligible).then(|| ReviewFinding {
        id: BUS_INELIGIBLE,
        finding_type: FindingType::Info,
        title: "Not eligible for the Boiler Upgrade Scheme",
        description: results.bus_grant.reason.clone(),
        recommendation: "Check for other local or devolved funding such as Home Energy Scotland",
        regulation: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::heating_systems::heat_pump::calculate_heat_pump_load_uk_2025;
    use crate::input::{EmitterType, HeatPumpType, UkRegion};
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

    fn finding_ids(inputs: &HeatPumpInputs) -> Vec<&'static str> {
        calculate_heat_pump_load_uk_2025(inputs)
            .unwrap()
            .review_findings
            .iter()
            .map(|finding| finding.id)
            .collect()
    }

    #[rstest]
    fn should_only_flag_running_cost_for_reference_case(inputs: HeatPumpInputs) {
        assert_eq!(finding_ids(&inputs), vec![DEARER_THAN_GAS]);
    }

    #[rstest]
    fn should_flag_undersized_installed_unit(mut inputs: HeatPumpInputs) {
        inputs.installed_capacity = Some(5.);

        let results = calculate_heat_pump_load_uk_2025(&inputs).unwrap();
        let finding = results
            .review_findings
            .iter()
            .find(|finding| finding.id == UNDERSIZED_SYSTEM)
            .unwrap();

        assert_eq!(finding.finding_type, FindingType::Critical);
        assert!(!finding_ids(&inputs).contains(&OVERSIZED_SYSTEM));
    }

    #[rstest]
    fn should_flag_oversized_installed_unit(mut inputs: HeatPumpInputs) {
        inputs.installed_capacity = Some(12.);

        let ids = finding_ids(&inputs);

        assert!(ids.contains(&OVERSIZED_SYSTEM));
        assert!(!ids.contains(&UNDERSIZED_SYSTEM));
    }

    #[rstest]
    fn should_not_flag_recommended_unit_between_standard_sizes(mut inputs: HeatPumpInputs) {
        // 3.94 kW: 3.5 kW is too small and 5 kW is beyond the oversizing margin
        inputs.insulation_level = InsulationLevel::Good;
        inputs.air_tightness = AirTightness::Good;
        inputs.design_temp = 0.;

        let ids = finding_ids(&inputs);

        assert!(!ids.contains(&OVERSIZED_SYSTEM));
        assert!(!ids.contains(&UNDERSIZED_SYSTEM));
    }

    #[rstest]
    fn should_flag_high_flow_temp_with_poor_fabric(mut inputs: HeatPumpInputs) {
        inputs.insulation_level = InsulationLevel::Poor;

        assert!(finding_ids(&inputs).contains(&HIGH_FLOW_TEMP_POOR_FABRIC));

        inputs.emitter_type = EmitterType::Underfloor;
        assert!(!finding_ids(&inputs).contains(&HIGH_FLOW_TEMP_POOR_FABRIC));
    }

    #[rstest]
    fn should_flag_large_electrical_loads(mut inputs: HeatPumpInputs) {
        // 400 m² of poorly insulated, leaky floor area on standard radiators
        inputs.floor_area = 400.;
        inputs.insulation_level = InsulationLevel::Poor;
        inputs.air_tightness = AirTightness::Poor;

        let ids = finding_ids(&inputs);

        assert!(ids.contains(&SUPPLY_CURRENT_EXCEEDED));
        assert!(ids.contains(&DNO_APPROVAL_REQUIRED));
        assert!(ids.contains(&POOR_AIR_TIGHTNESS));
    }

    #[rstest]
    fn should_flag_seasonal_cop_below_bus_minimum(mut inputs: HeatPumpInputs) {
        inputs.design_temp = -10.;

        assert!(finding_ids(&inputs).contains(&SCOP_BELOW_BUS_MINIMUM));

        inputs.emitter_type = EmitterType::Underfloor;
        assert!(!finding_ids(&inputs).contains(&SCOP_BELOW_BUS_MINIMUM));
    }

    #[rstest]
    fn should_note_missing_hot_water_and_no_heating_demand(mut inputs: HeatPumpInputs) {
        inputs.dhw_option = DhwOption::None;
        inputs.indoor_temp = 18.;
        inputs.design_temp = 18.;

        let ids = finding_ids(&inputs);

        assert!(ids.contains(&NO_HOT_WATER_PROVISION));
        assert!(ids.contains(&NO_SPACE_HEATING_DEMAND));
    }

    #[rstest]
    fn should_note_bus_ineligibility(mut inputs: HeatPumpInputs) {
        inputs.region = Some(UkRegion::NorthernIreland);

        let results = calculate_heat_pump_load_uk_2025(&inputs).unwrap();
        let finding = results
            .review_findings
            .iter()
            .find(|finding| finding.id == BUS_INELIGIBLE)
            .unwrap();

        assert_eq!(finding.description, results.bus_grant.reason);
    }

    #[rstest]
    fn should_serialise_finding_type_in_lowercase(inputs: HeatPumpInputs) {
        let results = calculate_heat_pump_load_uk_2025(&inputs).unwrap();
        let json = serde_json::to_value(&results.review_findings[0]).unwrap();

        assert_eq!(json["type"], "warning");
        assert!(json.get("regulation").is_none());
    }
}
