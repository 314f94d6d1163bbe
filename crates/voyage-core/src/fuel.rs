//! Fuel burn and weather resistance models.

/// Wind speed above which resistance stops growing, knots.
pub const WIND_RESISTANCE_CAP_KNOTS: f64 = 40.0;
/// Wave height above which resistance stops growing, meters.
pub const WAVE_RESISTANCE_CAP_M: f64 = 8.0;

/// Dimensionless drag multiplier from wind speed (knots) and wave height (m).
///
/// `1 + 0.5·(min(w, 40)/25)² + 0.3·(min(h, 8)/4)^1.5`. Negative or non-finite
/// inputs count as calm, so the result is always >= 1.0.
pub fn weather_resistance(wind_speed_knots: f64, wave_height_m: f64) -> f64 {
    let wind = non_negative(wind_speed_knots).min(WIND_RESISTANCE_CAP_KNOTS);
    let wave = non_negative(wave_height_m).min(WAVE_RESISTANCE_CAP_M);

    let wind_resistance = 0.5 * (wind / 25.0).powi(2);
    let wave_resistance = 0.3 * (wave / 4.0).powf(1.5);
    1.0 + wind_resistance + wave_resistance
}

/// Fuel burn rate in t/day from the cube law on the speed ratio.
///
/// `base · (actual/service)³ · weather_factor`; the weather factor is floored
/// at 1.0.
pub fn fuel_burn_rate(
    base_consumption_tpd: f64,
    actual_speed_knots: f64,
    service_speed_knots: f64,
    weather_factor: f64,
) -> f64 {
    if service_speed_knots <= 0.0 || !service_speed_knots.is_finite() {
        return 0.0;
    }
    let ratio = actual_speed_knots / service_speed_knots;
    base_consumption_tpd * ratio.powi(3) * weather_factor.max(1.0)
}

/// Fuel mass for a leg: `rate(t/day) × duration(h) / 24`.
pub fn leg_fuel_tons(rate_tpd: f64, duration_hours: f64) -> f64 {
    rate_tpd * duration_hours / 24.0
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
