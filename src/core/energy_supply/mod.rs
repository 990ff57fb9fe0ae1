pub mod fuel_comparison;
pub mod solar_pv;
