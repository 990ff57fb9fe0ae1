use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;
use std::io::{BufReader, Read};
use strum_macros::{Display, EnumIter};

/// Time-sensitive UK energy market and policy figures used by the calculators.
///
/// These figures go stale (tariffs move quarterly, grant amounts and carbon factors annually),
/// so they are kept apart from the calculation logic and passed in at call time. The
/// [`EnergyAssumptions::uk_2025`] set is the default; a JSON file of the same shape can be
/// supplied instead.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct EnergyAssumptions {
    pub name: String,
    /// Annual equivalent full-load running hours of the heating system
    #[validate(exclusive_minimum = 0.)]
    pub full_load_hours: f64,
    /// Running hours assumed for a design (coldest) day
    #[validate(minimum = 0.)]
    #[validate(maximum = 24.)]
    pub daily_run_hours: f64,
    /// Lowest COP the engine will report, whatever derating is applied
    #[validate(minimum = 1.)]
    pub min_cop: f64,
    /// Gas carbon intensity, kgCO2e/kWh (gross CV)
    #[validate(minimum = 0.)]
    pub gas_carbon_intensity: f64,
    /// Grid electricity carbon intensity, kgCO2e/kWh
    #[validate(minimum = 0.)]
    pub grid_carbon_intensity: f64,
    /// Seasonal efficiency of the gas boiler a heat pump is assumed to replace
    #[validate(exclusive_minimum = 0.)]
    #[validate(maximum = 1.)]
    pub baseline_boiler_efficiency: f64,
    /// Alternative fuels in the order they are reported
    #[validate]
    #[validate(min_items = 1)]
    pub fuels: Vec<FuelAssumption>,
    #[validate(minimum = 0.)]
    pub bus_grant_amount: f64,
    /// Largest system capacity the Boiler Upgrade Scheme will fund, in kW
    #[validate(exclusive_minimum = 0.)]
    pub bus_max_capacity: f64,
    /// Minimum seasonal COP for a BUS funded installation
    #[validate(minimum = 1.)]
    pub bus_min_scop: f64,
    /// Fraction above the design heat load a unit may be sized to
    #[validate(minimum = 0.)]
    pub mcs_oversize_tolerance: f64,
    /// Commonly available heat pump output ratings, in kW, ascending
    #[validate(min_items = 1)]
    #[validate(custom = strictly_ascending_ratings)]
    pub standard_unit_sizes: Vec<f64>,
    /// Highest current a domestic single-phase heat pump circuit is expected to draw, in A
    #[validate(exclusive_minimum = 0.)]
    pub max_single_phase_current: f64,
    /// Electrical input above which the DNO must approve the connection before install, in kW
    #[validate(exclusive_minimum = 0.)]
    pub dno_approval_threshold: f64,
    #[validate]
    pub solar: SolarAssumptions,
}

#[derive(Clone, Copy, Debug, Deserialize, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fuel {
    #[strum(to_string = "Mains gas")]
    MainsGas,
    #[strum(to_string = "Heating oil")]
    HeatingOil,
    #[strum(to_string = "LPG")]
    Lpg,
    #[strum(to_string = "Direct electric")]
    DirectElectric,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FuelAssumption {
    pub fuel: Fuel,
    pub label: String,
    /// Seasonal efficiency of a typical appliance burning this fuel
    #[validate(exclusive_minimum = 0.)]
    #[validate(maximum = 1.)]
    pub efficiency: f64,
    /// Unit rate in £/kWh; when absent the electricity rate of the calculation is used
    #[validate(minimum = 0.)]
    pub rate: Option<f64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SolarAssumptions {
    /// Annual fractional loss of output
    #[validate(minimum = 0.)]
    #[validate(exclusive_maximum = 1.)]
    pub degradation_rate: f64,
    #[validate(minimum = 1)]
    #[validate(maximum = 100)]
    pub lifetime_years: u32,
    /// Installed cost per kWp, in £
    #[validate(minimum = 0.)]
    pub cost_per_kwp: f64,
    /// Fixed cost of any installation regardless of size, in £
    #[validate(minimum = 0.)]
    pub fixed_cost: f64,
    #[validate]
    #[validate(custom = shares_sum_to_one)]
    pub cost_shares: SolarCostShares,
}

/// How the total cost of a PV installation splits across its parts. Shares sum to one.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SolarCostShares {
    #[validate(minimum = 0.)]
    pub panels: f64,
    #[validate(minimum = 0.)]
    pub inverter: f64,
    #[validate(minimum = 0.)]
    pub mounting: f64,
    #[validate(minimum = 0.)]
    pub labour: f64,
    #[validate(minimum = 0.)]
    pub scaffolding: f64,
}

const COST_SHARE_TOLERANCE: f64 = 1e-6;

impl SolarCostShares {
    fn total(&self) -> f64 {
        self.panels + self.inverter + self.mounting + self.labour + self.scaffolding
    }
}

/// The sizing rule takes the first rating that fits, so the list must run smallest first.
fn strictly_ascending_ratings(sizes: &[f64]) -> Result<(), serde_valid::validation::Error> {
    if sizes.iter().any(|size| !size.is_finite() || *size <= 0.) {
        return Err(serde_valid::validation::Error::Custom(format!(
            "unit sizes must be finite and greater than zero: {sizes:?}"
        )));
    }
    if !sizes.windows(2).all(|pair| pair[0] < pair[1]) {
        return Err(serde_valid::validation::Error::Custom(format!(
            "unit sizes must be in strictly ascending order: {sizes:?}"
        )));
    }

    Ok(())
}

fn shares_sum_to_one(shares: &SolarCostShares) -> Result<(), serde_valid::validation::Error> {
    let total = shares.total();
    if is_close!(total, 1., abs_tol = COST_SHARE_TOLERANCE) {
        Ok(())
    } else {
        Err(serde_valid::validation::Error::Custom(format!(
            "cost shares must sum to 1 but sum to {total}"
        )))
    }
}

impl EnergyAssumptions {
    /// Figures current for the 2025/26 heating season: Ofgem price cap (Q4 2025), DESNZ 2025
    /// greenhouse gas conversion factors and the Boiler Upgrade Scheme as extended to 2028.
    pub fn uk_2025() -> Self {
        Self {
            name: "UK 2025".to_string(),
            full_load_hours: 2_000.,
            daily_run_hours: 8.,
            min_cop: 1.5,
            gas_carbon_intensity: 0.183,
            grid_carbon_intensity: 0.207,
            baseline_boiler_efficiency: 0.9,
            fuels: vec![
                FuelAssumption {
                    fuel: Fuel::MainsGas,
                    label: "Gas boiler".to_string(),
                    efficiency: 0.9,
                    rate: Some(0.0634),
                },
                FuelAssumption {
                    fuel: Fuel::HeatingOil,
                    label: "Oil boiler".to_string(),
                    efficiency: 0.85,
                    rate: Some(0.065),
                },
                FuelAssumption {
                    fuel: Fuel::Lpg,
                    label: "LPG boiler".to_string(),
                    efficiency: 0.89,
                    rate: Some(0.095),
                },
                FuelAssumption {
                    fuel: Fuel::DirectElectric,
                    label: "Electric storage / panel heaters".to_string(),
                    efficiency: 1.,
                    rate: None,
                },
            ],
            bus_grant_amount: 7_500.,
            bus_max_capacity: 45.,
            bus_min_scop: 2.8,
            mcs_oversize_tolerance: 0.2,
            standard_unit_sizes: vec![3.5, 5., 6., 7., 8.5, 10., 11.2, 12., 14., 16.],
            max_single_phase_current: 32.,
            dno_approval_threshold: 3.68,
            solar: SolarAssumptions {
                degradation_rate: 0.005,
                lifetime_years: 25,
                cost_per_kwp: 1_500.,
                fixed_cost: 1_000.,
                cost_shares: SolarCostShares {
                    panels: 0.4,
                    inverter: 0.13,
                    mounting: 0.12,
                    labour: 0.25,
                    scaffolding: 0.1,
                },
            },
        }
    }

    /// Read a set of assumptions from JSON and check every figure is within its permitted range.
    pub fn from_json(json: impl Read) -> anyhow::Result<Self> {
        let assumptions: Self = serde_json::from_reader(BufReader::new(json))?;
        assumptions
            .validate()
            .map_err(|errors| anyhow!("Energy assumptions failed validation: {errors}"))?;

        Ok(assumptions)
    }
}

impl Default for EnergyAssumptions {
    fn default() -> Self {
        Self::uk_2025()
    }
}
