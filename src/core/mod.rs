pub mod assumptions;
pub mod coefficients;
pub(crate) mod common;
pub mod energy_supply;
pub mod heating_systems;
pub(crate) mod units;
