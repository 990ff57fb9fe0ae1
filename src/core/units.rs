pub const WATTS_PER_KILOWATT: u32 = 1_000;
/// Nominal UK single-phase supply voltage (BS 7671 / ESQCR 230 V +10% -6%)
pub const NOMINAL_SINGLE_PHASE_VOLTAGE: f64 = 230.;

/// Convert a temperature difference and a specific heat loss coefficient into a load in kW.
///
/// Arguments:
/// * `area` - area the coefficient applies to, in m²
/// * `coefficient` - heat loss coefficient, in W/(m².K)
/// * `temp_diff` - temperature difference driving the heat loss, in K
pub(crate) fn conduction_load_kw(area: f64, coefficient: f64, temp_diff: f64) -> f64 {
    area * coefficient * temp_diff / WATTS_PER_KILOWATT as f64
}

/// Current drawn on a single-phase supply for an electrical load given in kW, at unity power factor.
pub(crate) fn single_phase_current(power_kw: f64) -> f64 {
    power_kw * WATTS_PER_KILOWATT as f64 / NOMINAL_SINGLE_PHASE_VOLTAGE
}

/// Heat loss per unit floor area in W/m² for a load given in kW.
pub(crate) fn load_per_floor_area(load_kw: f64, floor_area: f64) -> f64 {
    load_kw * WATTS_PER_KILOWATT as f64 / floor_area
}
