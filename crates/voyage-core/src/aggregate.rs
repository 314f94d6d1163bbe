//! Voyage aggregation: totals, ETA, laycan compliance and weather impact.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, VoyageError};
use crate::fuel::weather_resistance;
use crate::legs::LegPlan;
use crate::models::{
    LaycanCompliance, LaycanStatus, LaycanWindow, LegResult, OptimizationSuggestion, Route,
    RouteSummary, SuggestionKind, VesselProfile, VoyageAnalysis, VoyagePerformance,
    WeatherImpact,
};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Fuel above this multiple of nominal burn triggers a speed suggestion.
const EXCESS_FUEL_RATIO: f64 = 1.2;
/// Mean wind above this triggers a routing suggestion, knots.
const HIGH_WIND_KNOTS: f64 = 20.0;

/// Summed leg figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoyageTotals {
    pub total_distance_nm: f64,
    pub total_duration_hours: f64,
    pub total_fuel_tons: f64,
    pub estimated_cost: f64,
    pub average_sog_knots: f64,
}

/// Sum distance, duration, fuel and cost over the legs.
///
/// Fails with [`VoyageError::DegenerateVoyage`] when the legs take no time,
/// since the average SOG is undefined.
pub fn totals(legs: &[LegResult], fuel_price: f64) -> Result<VoyageTotals> {
    let total_distance_nm: f64 = legs.iter().map(|leg| leg.distance_nm).sum();
    let total_duration_hours: f64 = legs.iter().map(|leg| leg.duration_hours).sum();
    let total_fuel_tons: f64 = legs.iter().map(|leg| leg.fuel_tons).sum();

    if total_duration_hours <= 0.0 || !total_duration_hours.is_finite() {
        return Err(VoyageError::DegenerateVoyage);
    }

    Ok(VoyageTotals {
        total_distance_nm,
        total_duration_hours,
        total_fuel_tons,
        estimated_cost: total_fuel_tons * fuel_price,
        average_sog_knots: total_distance_nm / total_duration_hours,
    })
}

/// Departure plus the voyage duration, to millisecond precision.
///
/// Fails with [`VoyageError::EtaOutOfRange`] when the arrival cannot be
/// represented as a timestamp.
pub fn eta(departure: DateTime<Utc>, duration_hours: f64) -> Result<DateTime<Utc>> {
    let millis = (duration_hours * MILLIS_PER_HOUR).round() as i64;
    Duration::try_milliseconds(millis)
        .and_then(|offset| departure.checked_add_signed(offset))
        .ok_or(VoyageError::EtaOutOfRange)
}

/// Compare the ETA against the laycan window.
///
/// Without both bounds the status is [`LaycanStatus::Unspecified`]. An ETA
/// on either bound is compliant.
pub fn evaluate_laycan(eta: DateTime<Utc>, window: Option<&LaycanWindow>) -> LaycanCompliance {
    let (status, risk_hours) = match window.and_then(|w| w.start.zip(w.end)) {
        None => (LaycanStatus::Unspecified, 0),
        Some((_, end)) if eta > end => (LaycanStatus::Late, whole_hours(eta - end)),
        Some((start, _)) if eta < start => (LaycanStatus::Early, whole_hours(start - eta)),
        Some(_) => (LaycanStatus::Compliant, 0),
    };

    LaycanCompliance {
        status,
        risk_hours,
        eta,
        laycan_window: window.copied(),
    }
}

fn whole_hours(span: Duration) -> i64 {
    (span.num_milliseconds() as f64 / MILLIS_PER_HOUR).round() as i64
}

/// Mean wind, wave and resistance over the weather samples the legs used.
///
/// Each sample counts once, however many legs it served.
pub fn weather_impact(legs: &[LegResult]) -> Result<WeatherImpact> {
    let used: BTreeMap<usize, &LegResult> = legs
        .iter()
        .map(|leg| (leg.weather_sample_index, leg))
        .collect();
    if used.is_empty() {
        return Err(VoyageError::NoWeatherData);
    }

    let count = used.len() as f64;
    let (wind, wave, factor) = used.values().fold((0.0, 0.0, 0.0), |acc, leg| {
        let weather = &leg.weather;
        (
            acc.0 + weather.wind_speed_knots,
            acc.1 + weather.wave_height_m,
            acc.2 + weather_resistance(weather.wind_speed_knots, weather.wave_height_m),
        )
    });

    Ok(WeatherImpact {
        average_wind_speed: wind / count,
        average_wave_height: wave / count,
        weather_factor: factor / count,
        samples_used: used.len(),
    })
}

/// Advisory speed and routing suggestions derived from the totals.
pub fn optimization_suggestions(
    totals: &VoyageTotals,
    vessel: &VesselProfile,
    impact: &WeatherImpact,
    status: LaycanStatus,
) -> Vec<OptimizationSuggestion> {
    let nominal_fuel = vessel.fuel_consumption * totals.total_duration_hours / 24.0;
    let excess_fuel = totals.total_fuel_tons > nominal_fuel * EXCESS_FUEL_RATIO;

    let speed = if excess_fuel {
        OptimizationSuggestion {
            kind: SuggestionKind::SpeedAdjustment,
            description: format!(
                "Consider reducing speed to {} knots to save fuel in adverse weather",
                (vessel.service_speed - 1.0).max(1.0)
            ),
            impact: "Potential fuel savings: 15-25%".to_string(),
        }
    } else {
        OptimizationSuggestion {
            kind: SuggestionKind::SpeedAdjustment,
            description: "Current speed appears optimal for conditions".to_string(),
            impact: "Maintaining current efficiency".to_string(),
        }
    };

    let description = if impact.average_wind_speed > HIGH_WIND_KNOTS {
        "High winds detected - consider slight route deviation if possible"
    } else {
        "Weather conditions favorable for current route"
    };
    let routing_impact = if status == LaycanStatus::Late {
        "Could recover 2-4 hours"
    } else {
        "Maintain schedule reliability"
    };
    let routing = OptimizationSuggestion {
        kind: SuggestionKind::WeatherRouting,
        description: description.to_string(),
        impact: routing_impact.to_string(),
    };

    vec![speed, routing]
}

/// Reduce a leg plan into the analysis result.
pub fn build_analysis(
    route: &Route,
    vessel: &VesselProfile,
    plan: LegPlan,
    laycan: Option<&LaycanWindow>,
    departure: DateTime<Utc>,
) -> Result<VoyageAnalysis> {
    let totals = totals(&plan.legs, vessel.fuel_price)?;
    let impact = weather_impact(&plan.legs)?;
    let eta = eta(departure, totals.total_duration_hours)?;
    let laycan_compliance = evaluate_laycan(eta, laycan);
    let optimization_suggestions =
        optimization_suggestions(&totals, vessel, &impact, laycan_compliance.status);

    Ok(VoyageAnalysis {
        route: RouteSummary {
            route: route.clone(),
            total_distance: totals.total_distance_nm,
        },
        vessel: vessel.clone(),
        performance: VoyagePerformance {
            total_duration: totals.total_duration_hours,
            total_distance: totals.total_distance_nm,
            route_distance: plan.route_distance_nm,
            average_sog: totals.average_sog_knots,
            total_fuel: totals.total_fuel_tons,
            estimated_cost: totals.estimated_cost,
            departure,
            eta,
        },
        laycan_compliance,
        weather_impact: impact,
        legs_analyzed: plan.legs_analyzed(),
        legs_total: plan.legs_total,
        leg_analysis: plan.legs,
        optimization_suggestions,
        ai_insights: None,
    })
}
