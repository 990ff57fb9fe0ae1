use crate::input::{
    AirTightness, DhwOption, EmitterType, HeatPumpType, InsulationLevel, RoofOrientation,
    ShadingLevel, UkRegion,
};
use serde::Serialize;

/// This module contains the lookup tables that turn the enumerated building and system
/// descriptions into numeric coefficients. Every lookup is a total function over its enum,
/// so a calculation can never pick up a missing coefficient.

/// Characteristics of a heat pump family used by the load engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HeatPumpCharacteristics {
    /// COP at rating conditions before any derating
    pub base_cop: f64,
    /// Fractional COP loss per kelvin of design temperature difference
    pub temp_sensitivity: f64,
    /// Ratio of seasonal COP over design-point COP, minus one
    pub seasonal_uplift: f64,
    /// Whether the outdoor coil frosts and needs defrost cycles
    pub defrosts: bool,
    /// Whether this technology qualifies for the Boiler Upgrade Scheme
    pub bus_eligible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EmitterCharacteristics {
    /// Design flow temperature, in Celsius
    pub flow_temperature: f64,
    /// Fraction of heat leaving the heat pump that reaches the room
    pub efficiency: f64,
}

/// Lookup tables consumed by the heat pump load engine.
pub trait CoefficientTable {
    /// Specific heat loss per m² of floor area, in W/(m².K)
    fn insulation_u_value(&self, level: InsulationLevel) -> f64;
    fn air_tightness_multiplier(&self, air_tightness: AirTightness) -> f64;
    fn heat_pump(&self, heat_pump_type: HeatPumpType) -> HeatPumpCharacteristics;
    fn emitter(&self, emitter_type: EmitterType) -> EmitterCharacteristics;
    /// Hot water contribution to the design heat load, in kW
    fn dhw_load(&self, dhw_option: DhwOption) -> f64;
}

/// Lookup tables consumed by the solar PV calculator.
pub trait SolarCoefficientTable {
    /// Annual yield of a south facing, optimally pitched, unshaded array, in kWh/kWp
    fn annual_yield(&self, region: UkRegion) -> f64;
    fn orientation_factor(&self, orientation: RoofOrientation) -> f64;
    fn shading_factor(&self, shading: ShadingLevel) -> f64;
    /// Pitch correction points as (pitch in degrees, factor), sorted by pitch
    fn pitch_factors(&self) -> &[(f64, f64)];
}

/// Coefficients used by the calculators shipped with the product.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCoefficients;

// whole-dwelling heat loss per m² of floor, derived from typical HLP figures for UK stock
const U_VALUE_POOR: f64 = 2.8;
const U_VALUE_AVERAGE: f64 = 2.0;
const U_VALUE_GOOD: f64 = 1.4;
const U_VALUE_EXCELLENT: f64 = 0.9;
const U_VALUE_PASSIVHAUS: f64 = 0.5;

const AIR_TIGHTNESS_MULTIPLIER_POOR: f64 = 1.25;
const AIR_TIGHTNESS_MULTIPLIER_AVERAGE: f64 = 1.1;
const AIR_TIGHTNESS_MULTIPLIER_GOOD: f64 = 1.0;

const AIR_SOURCE: HeatPumpCharacteristics = HeatPumpCharacteristics {
    base_cop: 3.5,
    temp_sensitivity: 0.008,
    seasonal_uplift: 0.25,
    defrosts: true,
    bus_eligible: true,
};
const GROUND_SOURCE: HeatPumpCharacteristics = HeatPumpCharacteristics {
    base_cop: 4.2,
    temp_sensitivity: 0.003,
    seasonal_uplift: 0.1,
    defrosts: false,
    bus_eligible: true,
};
const WATER_SOURCE: HeatPumpCharacteristics = HeatPumpCharacteristics {
    base_cop: 4.5,
    temp_sensitivity: 0.003,
    seasonal_uplift: 0.1,
    defrosts: false,
    bus_eligible: true,
};
// extract air sits at room temperature so the outdoor climate matters less
const EXHAUST_AIR: HeatPumpCharacteristics = HeatPumpCharacteristics {
    base_cop: 3.0,
    temp_sensitivity: 0.004,
    seasonal_uplift: 0.15,
    defrosts: false,
    bus_eligible: false,
};

const RADIATORS: EmitterCharacteristics = EmitterCharacteristics {
    flow_temperature: 50.,
    efficiency: 0.93,
};
const LARGE_RADIATORS: EmitterCharacteristics = EmitterCharacteristics {
    flow_temperature: 45.,
    efficiency: 0.95,
};
const UNDERFLOOR: EmitterCharacteristics = EmitterCharacteristics {
    flow_temperature: 35.,
    efficiency: 0.98,
};
const FAN_COIL: EmitterCharacteristics = EmitterCharacteristics {
    flow_temperature: 40.,
    efficiency: 0.96,
};

// roughly 0.25 kW per occupant, MCS MIS 3005-D
const DHW_LOAD_SMALL_CYLINDER: f64 = 0.75;
const DHW_LOAD_CYLINDER: f64 = 1.0;
const DHW_LOAD_LARGE_CYLINDER: f64 = 1.5;
const DHW_LOAD_THERMAL_STORE: f64 = 1.25;

// MCS irradiance dataset, rounded per region, kWh/kWp for due south at 35º
const ANNUAL_YIELD_LONDON_SOUTH_EAST: f64 = 980.;
const ANNUAL_YIELD_SOUTH_WEST: f64 = 1_000.;
const ANNUAL_YIELD_EAST_OF_ENGLAND: f64 = 960.;
const ANNUAL_YIELD_MIDLANDS: f64 = 900.;
const ANNUAL_YIELD_NORTH_ENGLAND: f64 = 850.;
const ANNUAL_YIELD_WALES: f64 = 920.;
const ANNUAL_YIELD_SCOTLAND: f64 = 800.;
const ANNUAL_YIELD_NORTHERN_IRELAND: f64 = 820.;

const PITCH_FACTORS: [(f64, f64); 7] = [
    (0., 0.87),
    (15., 0.95),
    (30., 0.99),
    (35., 1.0),
    (45., 0.98),
    (60., 0.92),
    (90., 0.71),
];

impl CoefficientTable for StandardCoefficients {
    fn insulation_u_value(&self, level: InsulationLevel) -> f64 {
        match level {
            InsulationLevel::Poor => U_VALUE_POOR,
            InsulationLevel::Average => U_VALUE_AVERAGE,
            InsulationLevel::Good => U_VALUE_GOOD,
            InsulationLevel::Excellent => U_VALUE_EXCELLENT,
            InsulationLevel::Passivhaus => U_VALUE_PASSIVHAUS,
        }
    }

    fn air_tightness_multiplier(&self, air_tightness: AirTightness) -> f64 {
        match air_tightness {
            AirTightness::Poor => AIR_TIGHTNESS_MULTIPLIER_POOR,
            AirTightness::Average => AIR_TIGHTNESS_MULTIPLIER_AVERAGE,
            AirTightness::Good => AIR_TIGHTNESS_MULTIPLIER_GOOD,
        }
    }

    fn heat_pump(&self, heat_pump_type: HeatPumpType) -> HeatPumpCharacteristics {
        match heat_pump_type {
            HeatPumpType::AirSource => AIR_SOURCE,
            HeatPumpType::GroundSource => GROUND_SOURCE,
            HeatPumpType::WaterSource => WATER_SOURCE,
            HeatPumpType::ExhaustAir => EXHAUST_AIR,
        }
    }

    fn emitter(&self, emitter_type: EmitterType) -> EmitterCharacteristics {
        match emitter_type {
            EmitterType::Radiators => RADIATORS,
            EmitterType::LargeRadiators => LARGE_RADIATORS,
            EmitterType::Underfloor => UNDERFLOOR,
            EmitterType::FanCoil => FAN_COIL,
        }
    }

    fn dhw_load(&self, dhw_option: DhwOption) -> f64 {
        match dhw_option {
            DhwOption::None => 0.,
            DhwOption::SmallCylinder => DHW_LOAD_SMALL_CYLINDER,
            DhwOption::Cylinder => DHW_LOAD_CYLINDER,
            DhwOption::LargeCylinder => DHW_LOAD_LARGE_CYLINDER,
            DhwOption::ThermalStore => DHW_LOAD_THERMAL_STORE,
        }
    }
}

impl SolarCoefficientTable for StandardCoefficients {
    fn annual_yield(&self, region: UkRegion) -> f64 {
        match region {
            UkRegion::LondonSouthEast => ANNUAL_YIELD_LONDON_SOUTH_EAST,
            UkRegion::SouthWest => ANNUAL_YIELD_SOUTH_WEST,
            UkRegion::EastOfEngland => ANNUAL_YIELD_EAST_OF_ENGLAND,
            UkRegion::Midlands => ANNUAL_YIELD_MIDLANDS,
            UkRegion::NorthEngland => ANNUAL_YIELD_NORTH_ENGLAND,
            UkRegion::Wales => ANNUAL_YIELD_WALES,
            UkRegion::Scotland => ANNUAL_YIELD_SCOTLAND,
            UkRegion::NorthernIreland => ANNUAL_YIELD_NORTHERN_IRELAND,
        }
    }

    fn orientation_factor(&self, orientation: RoofOrientation) -> f64 {
        match orientation {
            RoofOrientation::South => 1.0,
            RoofOrientation::SouthEastWest => 0.95,
            RoofOrientation::EastWest => 0.85,
            RoofOrientation::NorthEastWest => 0.7,
            RoofOrientation::North => 0.6,
        }
    }

    fn shading_factor(&self, shading: ShadingLevel) -> f64 {
        // MCS shade assessment bands
        match shading {
            ShadingLevel::None => 1.0,
            ShadingLevel::Light => 0.95,
            ShadingLevel::Moderate => 0.85,
            ShadingLevel::Heavy => 0.7,
        }
    }

    fn pitch_factors(&self) -> &[(f64, f64)] {
        &PITCH_FACTORS
    }
}
