//! Voyage CLI - command line tools for the voyage analysis server.
//!
//! Binaries:
//! - voyage-analyze: run an analysis and print a summary
//! - list-routes: show the route catalog

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::fmt::Write;

use voyage_core::{LaycanStatus, LaycanWindow, RouteListing, VesselProfile, VoyageAnalysis};

/// Body of `POST /v1/voyage/analyze`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeBody {
    pub route_id: String,
    pub vessel_specs: VesselProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub laycan_window: Option<LaycanWindow>,
    pub include_insights: bool,
}

/// Client for the voyage server REST API.
pub struct VoyageClient {
    base_url: String,
    client: reqwest::Client,
}

impl VoyageClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn list_routes(&self) -> Result<Vec<RouteListing>> {
        let url = format!("{}/v1/routes", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        decode(response).await
    }

    pub async fn analyze(&self, body: &AnalyzeBody) -> Result<VoyageAnalysis> {
        let url = format!("{}/v1/voyage/analyze", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        decode(response).await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        let error = body["error"].as_str().unwrap_or("request failed");
        let details = body["details"].as_str().unwrap_or("");
        bail!("server returned {status}: {error} {details}");
    }
    response.json().await.context("failed to decode response")
}

/// Human-readable summary of an analysis.
pub fn format_summary(analysis: &VoyageAnalysis) -> String {
    let perf = &analysis.performance;
    let laycan = &analysis.laycan_compliance;
    let mut out = String::new();

    let _ = writeln!(out, "Route:      {}", analysis.route.route.name);
    let _ = writeln!(out, "Vessel:     {}", analysis.vessel.vessel_name);
    let _ = writeln!(
        out,
        "Legs:       {} of {} analyzed",
        analysis.legs_analyzed, analysis.legs_total
    );
    let _ = writeln!(
        out,
        "Distance:   {:.1} nm (route {:.1} nm)",
        perf.total_distance, perf.route_distance
    );
    let _ = writeln!(out, "Duration:   {:.1} h", perf.total_duration);
    let _ = writeln!(out, "Avg SOG:    {:.2} kn", perf.average_sog);
    let _ = writeln!(out, "Fuel:       {:.2} t", perf.total_fuel);
    let _ = writeln!(out, "Cost:       ${:.0}", perf.estimated_cost);
    let _ = writeln!(out, "ETA:        {}", perf.eta.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out, "Laycan:     {}", laycan_label(laycan.status, laycan.risk_hours));
    let _ = writeln!(
        out,
        "Weather:    wind {:.1} kn, waves {:.1} m, factor {:.3} ({} samples)",
        analysis.weather_impact.average_wind_speed,
        analysis.weather_impact.average_wave_height,
        analysis.weather_impact.weather_factor,
        analysis.weather_impact.samples_used
    );

    for suggestion in &analysis.optimization_suggestions {
        let _ = writeln!(out, "  * {} ({})", suggestion.description, suggestion.impact);
    }
    for insight in analysis.ai_insights.iter().flatten() {
        let _ = writeln!(out, "{}", insight.headline);
        for point in &insight.points {
            let _ = writeln!(out, "  - {point}");
        }
    }
    out
}

fn laycan_label(status: LaycanStatus, risk_hours: i64) -> String {
    match status {
        LaycanStatus::Unspecified => "no window given".to_string(),
        LaycanStatus::Compliant => "compliant".to_string(),
        LaycanStatus::Early => format!("early by {risk_hours} h"),
        LaycanStatus::Late => format!("LATE by {risk_hours} h"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use voyage_core::{
        Coordinate, LaycanCompliance, Route, RouteSummary, VoyagePerformance, WeatherImpact,
    };

    fn analysis() -> VoyageAnalysis {
        let eta = Utc.with_ymd_and_hms(2025, 7, 4, 6, 0, 0).unwrap();
        VoyageAnalysis {
            route: RouteSummary {
                route: Route {
                    id: "2".to_string(),
                    name: "Rotterdam to Singapore".to_string(),
                    origin: "Rotterdam".to_string(),
                    destination: "Singapore".to_string(),
                    waypoints: vec![Coordinate { lat: 0.0, lon: 0.0 }],
                },
                total_distance: 1200.0,
            },
            vessel: VesselProfile::default(),
            performance: VoyagePerformance {
                total_duration: 100.0,
                total_distance: 1200.0,
                route_distance: 6795.4,
                average_sog: 12.0,
                total_fuel: 190.5,
                estimated_cost: 123_825.0,
                departure: eta,
                eta,
            },
            laycan_compliance: LaycanCompliance {
                status: LaycanStatus::Late,
                risk_hours: 7,
                eta,
                laycan_window: None,
            },
            weather_impact: WeatherImpact {
                average_wind_speed: 14.0,
                average_wave_height: 2.5,
                weather_factor: 1.25,
                samples_used: 5,
            },
            leg_analysis: Vec::new(),
            legs_analyzed: 39,
            legs_total: 39,
            optimization_suggestions: Vec::new(),
            ai_insights: None,
        }
    }

    #[test]
    fn summary_lists_key_figures() {
        let summary = format_summary(&analysis());
        assert!(summary.contains("Route:      Rotterdam to Singapore"));
        assert!(summary.contains("Legs:       39 of 39 analyzed"));
        assert!(summary.contains("Fuel:       190.50 t"));
        assert!(summary.contains("Laycan:     LATE by 7 h"));
        assert!(summary.contains("ETA:        2025-07-04 06:00 UTC"));
    }

    #[test]
    fn analyze_body_uses_server_field_names() {
        let body = AnalyzeBody {
            route_id: "1".to_string(),
            vessel_specs: VesselProfile::default(),
            laycan_window: None,
            include_insights: true,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["routeId"], "1");
        assert_eq!(value["vesselSpecs"]["serviceSpeed"], 12.0);
        assert_eq!(value["includeInsights"], true);
        assert!(value.get("laycanWindow").is_none());
    }
}
