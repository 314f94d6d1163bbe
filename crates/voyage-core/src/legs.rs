//! Leg decomposition: one [`LegResult`] per consecutive waypoint pair.

use crate::config::AnalysisConfig;
use crate::error::{Result, VoyageError};
use crate::fuel::{fuel_burn_rate, leg_fuel_tons, weather_resistance};
use crate::geodesy::{bearing_deg, distance_nm, route_distance_nm};
use crate::models::{Coordinate, LegResult, Route, VesselProfile, WeatherObservation};
use crate::sampling::sample_index;

/// Ordered legs plus how much of the route they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct LegPlan {
    pub legs: Vec<LegResult>,
    /// Legs present in the route, analyzed or not
    pub legs_total: usize,
    /// Distance of the full route, including legs beyond the cap
    pub route_distance_nm: f64,
}

impl LegPlan {
    pub fn legs_analyzed(&self) -> usize {
        self.legs.len()
    }

    pub fn is_truncated(&self) -> bool {
        self.legs.len() < self.legs_total
    }
}

/// Decompose a route into legs using pre-fetched weather samples.
///
/// Legs come back in waypoint order. Trailing legs beyond
/// `config.max_legs` are left out of `legs` but still count toward
/// `route_distance_nm` and `legs_total`.
pub fn decompose(
    route: &Route,
    vessel: &VesselProfile,
    observations: &[WeatherObservation],
    config: &AnalysisConfig,
) -> Result<LegPlan> {
    route.validate()?;
    vessel.validate()?;
    if observations.is_empty() {
        return Err(VoyageError::NoWeatherData);
    }

    let legs_total = route.leg_count();
    let leg_count = config.legs_to_analyze(legs_total);
    let samples: Vec<WeatherObservation> =
        observations.iter().map(WeatherObservation::sanitized).collect();

    let legs = route
        .waypoints
        .windows(2)
        .take(leg_count)
        .enumerate()
        .map(|(leg_index, pair)| {
            // sample_index only returns None for an empty sample set, rejected above.
            let sample = sample_index(leg_index, leg_count, samples.len()).unwrap_or(0);
            compute_leg(leg_index, pair[0], pair[1], vessel, &samples[sample], sample, config)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LegPlan {
        legs,
        legs_total,
        route_distance_nm: route_distance_nm(&route.waypoints)?,
    })
}

/// Compute a single leg. Depends only on its inputs, never on other legs.
pub fn compute_leg(
    leg_index: usize,
    from: Coordinate,
    to: Coordinate,
    vessel: &VesselProfile,
    weather: &WeatherObservation,
    weather_sample_index: usize,
    config: &AnalysisConfig,
) -> Result<LegResult> {
    let distance = distance_nm(from, to)?;
    let bearing = bearing_deg(from, to)?;
    let stw = vessel.service_speed;

    let weather_factor = weather_resistance(weather.wind_speed_knots, weather.wave_height_m);
    let sog = config.sog_model.speed_over_ground(
        stw,
        bearing,
        weather.wind_speed_knots,
        weather.wind_direction_deg,
        weather.current_speed_knots,
        weather.current_direction_deg,
        config.min_sog_knots,
    );
    let duration_hours = distance / sog;
    let fuel_rate = fuel_burn_rate(vessel.fuel_consumption, sog, vessel.service_speed, weather_factor);

    Ok(LegResult {
        leg_index,
        from,
        to,
        distance_nm: distance,
        bearing_deg: bearing,
        stw_knots: stw,
        sog_knots: sog,
        weather_factor,
        fuel_rate_tpd: fuel_rate,
        fuel_tons: leg_fuel_tons(fuel_rate, duration_hours),
        duration_hours,
        weather_sample_index,
        weather: weather.clone(),
    })
}
