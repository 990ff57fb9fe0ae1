use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read};
use strum_macros::{Display, EnumIter};

pub fn ingest_for_processing(json: impl Read) -> Result<CalculationInput, anyhow::Error> {
    let reader = BufReader::new(json);
    Ok(serde_json::from_reader(reader)?)
}

/// The top-level input document. Exactly one calculator is run per document.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum CalculationInput {
    HeatPump(HeatPumpInputs),
    #[serde(rename = "SolarPV", alias = "SolarPv")]
    SolarPv(SolarPvInputs),
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct HeatPumpInputs {
    /// Heated floor area, in m²
    #[serde(alias = "floorArea")]
    pub floor_area: f64,
    #[serde(alias = "insulationLevel")]
    pub insulation_level: InsulationLevel,
    #[serde(alias = "airTightness")]
    pub air_tightness: AirTightness,
    /// External design temperature, in Celsius
    #[serde(alias = "designTemp")]
    pub design_temp: f64,
    /// Internal design temperature, in Celsius
    #[serde(alias = "indoorTemp")]
    pub indoor_temp: f64,
    #[serde(alias = "heatPumpType")]
    pub heat_pump_type: HeatPumpType,
    #[serde(alias = "emitterType")]
    pub emitter_type: EmitterType,
    #[serde(alias = "dhwOption")]
    pub dhw_option: DhwOption,
    /// Unit rate for electricity, in £/kWh
    #[serde(alias = "electricityRate")]
    pub electricity_rate: f64,
    #[serde(default)]
    pub region: Option<UkRegion>,
    /// Output capacity of a proposed or installed unit, in kW
    #[serde(default, alias = "installedCapacity")]
    pub installed_capacity: Option<f64>,
    #[serde(default, alias = "weatherCompensation")]
    pub weather_compensation: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum InsulationLevel {
    #[strum(to_string = "Poor (pre-1930s, uninsulated walls)")]
    Poor,
    #[strum(to_string = "Average (cavity fill, 100mm loft)")]
    Average,
    #[strum(to_string = "Good (Part L 2006 onwards)")]
    Good,
    #[strum(to_string = "Excellent (Part L 2021 / Future Homes)")]
    Excellent,
    #[strum(to_string = "Passivhaus")]
    Passivhaus,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum AirTightness {
    Poor,
    Average,
    Good,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum HeatPumpType {
    #[strum(to_string = "Air source heat pump")]
    AirSource,
    #[strum(to_string = "Ground source heat pump")]
    GroundSource,
    #[strum(to_string = "Water source heat pump")]
    WaterSource,
    #[strum(to_string = "Exhaust air heat pump")]
    ExhaustAir,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum EmitterType {
    #[strum(to_string = "Standard radiators")]
    Radiators,
    #[strum(to_string = "Oversized radiators")]
    LargeRadiators,
    #[strum(to_string = "Underfloor heating")]
    Underfloor,
    #[strum(to_string = "Fan coil units")]
    FanCoil,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum DhwOption {
    #[strum(to_string = "No hot water from heat pump")]
    None,
    #[strum(to_string = "150 litre cylinder")]
    SmallCylinder,
    #[strum(to_string = "200 litre cylinder")]
    Cylinder,
    #[strum(to_string = "300 litre cylinder")]
    LargeCylinder,
    #[strum(to_string = "Thermal store")]
    ThermalStore,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum UkRegion {
    #[strum(to_string = "London & South East")]
    LondonSouthEast,
    #[strum(to_string = "South West")]
    SouthWest,
    #[strum(to_string = "East of England")]
    EastOfEngland,
    #[strum(to_string = "Midlands")]
    Midlands,
    #[strum(to_string = "North of England")]
    NorthEngland,
    Wales,
    Scotland,
    #[strum(to_string = "Northern Ireland")]
    NorthernIreland,
}

impl UkRegion {
    /// Whether the region falls within England or Wales, the nations covered by the
    /// Boiler Upgrade Scheme.
    pub fn in_england_or_wales(&self) -> bool {
        !matches!(self, UkRegion::Scotland | UkRegion::NorthernIreland)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct SolarPvInputs {
    /// Peak DC capacity of the array, in kWp
    #[serde(alias = "systemSize")]
    pub system_size: f64,
    pub region: UkRegion,
    pub orientation: RoofOrientation,
    /// Tilt of the panels from horizontal, in degrees (0 = flat, 90 = vertical)
    pub pitch: f64,
    pub shading: ShadingLevel,
    /// Import unit rate, in £/kWh
    #[serde(alias = "electricityRate")]
    pub electricity_rate: f64,
    /// Smart Export Guarantee rate, in £/kWh
    #[serde(alias = "exportRate")]
    pub export_rate: f64,
    /// Fraction of generation used on site
    #[serde(alias = "selfConsumption")]
    pub self_consumption: f64,
    /// Quoted installed cost, in £. Estimated from the system size when absent.
    #[serde(default, alias = "systemCost")]
    pub system_cost: Option<f64>,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum RoofOrientation {
    South,
    #[strum(to_string = "South East / South West")]
    SouthEastWest,
    #[strum(to_string = "East / West")]
    EastWest,
    #[strum(to_string = "North East / North West")]
    NorthEastWest,
    North,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum ShadingLevel {
    None,
    Light,
    Moderate,
    Heavy,
}
