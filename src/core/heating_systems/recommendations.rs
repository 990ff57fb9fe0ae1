use crate::core::heating_systems::heat_pump::HeatPumpResults;
use crate::core::heating_systems::review::SUPPLY_CURRENT_EXCEEDED;
use crate::input::{AirTightness, DhwOption, EmitterType, HeatPumpInputs, HeatPumpType};

const HIGH_HEAT_LOSS_PER_M2: f64 = 80.;
const MODERATE_HEAT_LOSS_PER_M2: f64 = 50.;
const LOW_COP: f64 = 2.5;
const COLD_CLIMATE_DESIGN_TEMP: f64 = -5.;

/// Advice for the installer or homeowner drawn from a fixed catalogue, in catalogue order.
///
/// Predicates that could overlap (oversized and undersized, high and moderate heat loss) are
/// mutually exclusive, so no message appears twice.
pub fn get_recommendations(inputs: &HeatPumpInputs, results: &HeatPumpResults) -> Vec<String> {
    let mut recommendations = vec![];
    let sizing = results.sizing;

    if !sizing.within_mcs {
        if sizing.capacity_checked < results.total_heat_load {
            recommendations.push(format!(
                "The {:.1} kW unit is undersized; choose at least {:.1} kW to meet the {:.2} kW design load.",
                sizing.capacity_checked, sizing.recommended, results.total_heat_load
            ));
        } else {
            recommendations.push(format!(
                "The {:.1} kW unit is oversized for a {:.2} kW design load; a {:.1} kW unit will cycle less and run more efficiently.",
                sizing.capacity_checked, results.total_heat_load, sizing.recommended
            ));
        }
    }

    if results.heat_loss_per_m2 > HIGH_HEAT_LOSS_PER_M2 {
        recommendations.push(
            "Heat loss is high for the floor area; prioritise loft, wall and floor insulation before installing."
                .to_string(),
        );
    } else if results.heat_loss_per_m2 > MODERATE_HEAT_LOSS_PER_M2 {
        recommendations.push(
            "Modest fabric improvements such as loft top-up and draught-proofing would allow a smaller unit."
                .to_string(),
        );
    }

    if inputs.emitter_type == EmitterType::Radiators && !inputs.weather_compensation {
        recommendations.push(
            "Enable weather compensation so radiator flow temperatures drop in milder weather.".to_string(),
        );
    }

    if results.cop < LOW_COP && inputs.emitter_type != EmitterType::Underfloor {
        recommendations.push(format!(
            "A design COP of {:.2} is low; larger radiators or underfloor heating would allow a lower flow temperature than {}ºC.",
            results.cop, results.flow_temperature
        ));
    }

    if inputs.heat_pump_type == HeatPumpType::AirSource
        && inputs.design_temp <= COLD_CLIMATE_DESIGN_TEMP
    {
        recommendations.push(
            "Site the outdoor unit clear of snow drift and with free drainage for defrost condensate."
                .to_string(),
        );
    }

    if results
        .review_findings
        .iter()
        .any(|finding| finding.id == SUPPLY_CURRENT_EXCEEDED)
    {
        recommendations.push(
            "Electrical demand is beyond a single-phase heat pump circuit; consult the DNO about a three-phase supply."
                .to_string(),
        );
    }

    if inputs.dhw_option == DhwOption::None {
        recommendations.push(
            "Add an unvented cylinder so the heat pump can also provide hot water efficiently.".to_string(),
        );
    }

    if inputs.air_tightness == AirTightness::Poor {
        recommendations.push(
            "Draught-proofing could cut the space heating load by up to a fifth.".to_string(),
        );
    }

    if results.bus_grant.eligible {
        recommendations.push(format!(
            "Apply for the £{:.0} Boiler Upgrade Scheme grant through an MCS certified installer.",
            results.bus_grant.amount
        ));
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::heating_systems::heat_pump::calculate_heat_pump_load_uk_2025;
    use crate::input::{InsulationLevel, UkRegion};
    use itertools::Itertools;
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

    fn recommendations_for(inputs: &HeatPumpInputs) -> Vec<String> {
        let results = calculate_heat_pump_load_uk_2025(inputs).unwrap();
        get_recommendations(inputs, &results)
    }

    #[rstest]
    fn should_recommend_for_reference_case(inputs: HeatPumpInputs) {
        let recommendations = recommendations_for(&inputs);

        assert_eq!(recommendations.len(), 4);
        assert!(recommendations[0].starts_with("Modest fabric improvements"));
        assert!(recommendations[1].starts_with("Enable weather compensation"));
        assert!(recommendations[2].starts_with("A design COP of 2.26 is low"));
        assert_eq!(
            recommendations[3],
            "Apply for the £7500 Boiler Upgrade Scheme grant through an MCS certified installer."
        );
    }

    #[rstest]
    fn should_not_recommend_weather_compensation_when_fitted(mut inputs: HeatPumpInputs) {
        inputs.weather_compensation = true;

        assert!(!recommendations_for(&inputs)
            .iter()
            .any(|recommendation| recommendation.starts_with("Enable weather compensation")));
    }

    #[rstest]
    fn should_recommend_one_sizing_change(mut inputs: HeatPumpInputs) {
        inputs.installed_capacity = Some(4.);
        let undersized = recommendations_for(&inputs);
        assert!(undersized[0].contains("undersized"));
        assert!(!undersized.iter().any(|r| r.contains("oversized")));

        inputs.installed_capacity = Some(14.);
        let oversized = recommendations_for(&inputs);
        assert!(oversized[0].contains("oversized"));
        assert!(!oversized.iter().any(|r| r.contains("undersized")));
    }

    #[rstest]
    fn should_not_recommend_resizing_the_recommended_unit(mut inputs: HeatPumpInputs) {
        inputs.insulation_level = InsulationLevel::Good;
        inputs.air_tightness = AirTightness::Good;
        inputs.design_temp = 0.;

        assert!(!recommendations_for(&inputs)
            .iter()
            .any(|r| r.contains("oversized") || r.contains("undersized")));
    }

    #[rstest]
    fn should_recommend_fabric_and_supply_work_for_large_leaky_home(mut inputs: HeatPumpInputs) {
        inputs.floor_area = 400.;
        inputs.insulation_level = InsulationLevel::Poor;
        inputs.air_tightness = AirTightness::Poor;
        inputs.design_temp = -8.;
        inputs.dhw_option = DhwOption::None;

        let recommendations = recommendations_for(&inputs);

        assert!(recommendations[0].starts_with("Heat loss is high"));
        assert!(recommendations
            .iter()
            .any(|r| r.starts_with("Site the outdoor unit")));
        assert!(recommendations.iter().any(|r| r.contains("three-phase")));
        assert!(recommendations.iter().any(|r| r.contains("cylinder")));
        assert!(recommendations.iter().any(|r| r.starts_with("Draught-proofing")));
    }

    #[rstest]
    fn should_not_repeat_recommendations(mut inputs: HeatPumpInputs) {
        inputs.insulation_level = InsulationLevel::Poor;
        inputs.air_tightness = AirTightness::Poor;
        inputs.installed_capacity = Some(3.5);

        let recommendations = recommendations_for(&inputs);

        assert_eq!(
            recommendations.iter().unique().count(),
            recommendations.len()
        );
    }

    #[rstest]
    fn should_make_no_recommendations_for_ideal_ground_source_system(mut inputs: HeatPumpInputs) {
        inputs.heat_pump_type = HeatPumpType::GroundSource;
        inputs.insulation_level = InsulationLevel::Excellent;
        inputs.air_tightness = AirTightness::Good;
        inputs.emitter_type = EmitterType::Underfloor;
        inputs.region = Some(UkRegion::Scotland);

        assert_eq!(recommendations_for(&inputs), Vec::<String>::new());
    }
}
