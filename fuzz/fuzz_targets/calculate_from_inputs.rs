#![no_main]

use heatcalc::core::energy_supply::solar_pv::calculate_solar_pv_uk_2025;
use heatcalc::core::heating_systems::heat_pump::calculate_heat_pump_load_uk_2025;
use heatcalc::get_recommendations;
use heatcalc::input::CalculationInput;
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

fuzz_target!(|input: CalculationInput| {
    match input {
        CalculationInput::HeatPump(inputs) => {
            if let Ok(results) = calculate_heat_pump_load_uk_2025(&inputs) {
                assert_eq!(
                    results.total_heat_load,
                    results.space_heating_load + results.dhw_load
                );
                assert!(results.cop.is_finite() && results.cop > 0.);
                if inputs.installed_capacity.is_none() {
                    assert!(results.sizing.within_mcs);
                }

                let recommendations = get_recommendations(&inputs, &results);
                let distinct = recommendations.iter().collect::<HashSet<_>>();
                assert_eq!(distinct.len(), recommendations.len());
            }
        }
        CalculationInput::SolarPv(inputs) => {
            if let Ok(results) = calculate_solar_pv_uk_2025(&inputs) {
                assert_eq!(results.degradation_curve.len(), 25);
            }
        }
    }
});
