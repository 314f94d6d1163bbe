//! Advisory insight formatting.
//!
//! Builds the request handed to an [`InsightGenerator`], parses what comes
//! back, and substitutes a static record whenever generation fails. Callers
//! always get a list of insights, never an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{InsightError, ProviderError};
use crate::models::{Insight, LaycanStatus, VoyageAnalysis};
use crate::provider::InsightGenerator;

/// Figures from a finished analysis that the insight prompt needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    pub route_name: String,
    pub route_distance_nm: f64,
    pub eta: DateTime<Utc>,
    pub laycan_start: Option<DateTime<Utc>>,
    pub laycan_end: Option<DateTime<Utc>>,
    pub laycan_status: LaycanStatus,
    pub laycan_risk_hours: i64,
    pub average_wind_knots: f64,
    pub average_wave_m: f64,
    pub total_fuel_tons: f64,
    pub estimated_cost: f64,
    pub total_duration_hours: f64,
}

impl InsightRequest {
    pub fn from_analysis(analysis: &VoyageAnalysis) -> Self {
        let window = analysis.laycan_compliance.laycan_window;
        Self {
            route_name: analysis.route.route.name.clone(),
            route_distance_nm: analysis.performance.route_distance,
            eta: analysis.performance.eta,
            laycan_start: window.and_then(|w| w.start),
            laycan_end: window.and_then(|w| w.end),
            laycan_status: analysis.laycan_compliance.status,
            laycan_risk_hours: analysis.laycan_compliance.risk_hours,
            average_wind_knots: analysis.weather_impact.average_wind_speed,
            average_wave_m: analysis.weather_impact.average_wave_height,
            total_fuel_tons: analysis.performance.total_fuel,
            estimated_cost: analysis.performance.estimated_cost,
            total_duration_hours: analysis.performance.total_duration,
        }
    }

    /// Prompt text asking for a JSON array of `{mainPoint, subPoints}` records.
    pub fn prompt(&self) -> String {
        let laycan = match (self.laycan_start, self.laycan_end) {
            (Some(start), Some(end)) => format!(
                "{} to {}",
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            _ => "not specified".to_string(),
        };
        let eta = self.eta.format("%Y-%m-%d %H:%M UTC");

        format!(
            "As a maritime routing specialist, analyze the voyage data below and give a \
             vessel operator a short list of actionable insights. Reply with a single JSON \
             array of objects, each with a \"mainPoint\" string and a \"subPoints\" array \
             of strings.\n\
             \n\
             Voyage details:\n\
             Route: {route}\n\
             Distance: {distance:.1} nautical miles\n\
             Duration: {duration:.1} hours\n\
             ETA: {eta}\n\
             Laycan window: {laycan}\n\
             Laycan status: {status} ({risk} hours)\n\
             Average weather: wind {wind:.1} knots, waves {wave:.1} meters\n\
             Total fuel: {fuel:.2} tons\n\
             Estimated cost: ${cost:.0}\n\
             \n\
             Cover these topics:\n\
             1. Laycan compliance and ETA: the status and any risk or buffer.\n\
             2. Speed optimization: concrete speed changes and their effect on fuel and cost.\n\
             3. Route analysis: how the weather affects this route compared to an alternative.\n\
             4. Cost and efficiency: the best balance of time, cost and laycan compliance.\n\
             \n\
             Example:\n\
             [{{\"mainPoint\": \"ETA and Laycan Compliance\", \"subPoints\": [\"ETA: {eta}.\"]}}]\n",
            route = self.route_name,
            distance = self.route_distance_nm,
            duration = self.total_duration_hours,
            eta = eta,
            laycan = laycan,
            status = status_label(self.laycan_status),
            risk = self.laycan_risk_hours,
            wind = self.average_wind_knots,
            wave = self.average_wave_m,
            fuel = self.total_fuel_tons,
            cost = self.estimated_cost,
        )
    }
}

fn status_label(status: LaycanStatus) -> &'static str {
    match status {
        LaycanStatus::Unspecified => "UNSPECIFIED",
        LaycanStatus::Compliant => "COMPLIANT",
        LaycanStatus::Early => "EARLY",
        LaycanStatus::Late => "LATE",
    }
}

/// Why the static fallback record is being returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// No generator is configured
    Unavailable,
    /// The generator could not be reached or timed out
    Failed,
    /// The generator answered with something unusable
    Malformed,
}

/// Single static insight for the given failure.
pub fn fallback_insights(reason: FallbackReason) -> Vec<Insight> {
    let (headline, points) = match reason {
        FallbackReason::Unavailable => (
            "AI recommendations are temporarily unavailable.",
            vec![
                "Please ensure the insight service API key is configured correctly.",
                "Consider monitoring weather conditions and optimizing speed manually.",
            ],
        ),
        FallbackReason::Failed => (
            "AI recommendations temporarily unavailable.",
            vec!["Failed to connect to the AI service. Please try again later."],
        ),
        FallbackReason::Malformed => (
            "AI analysis is not available at this moment.",
            vec!["Received an invalid response from the AI model."],
        ),
    };

    vec![Insight {
        headline: headline.to_string(),
        points: points.into_iter().map(String::from).collect(),
    }]
}

/// Parse generator output into insights.
///
/// Accepts a bare JSON array or one wrapped in a fenced code block.
pub fn parse_insights(text: &str) -> Result<Vec<Insight>, InsightError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(InsightError::Empty);
    }

    let insights: Vec<Insight> =
        serde_json::from_str(body).map_err(|e| InsightError::Parse(e.to_string()))?;

    if insights.is_empty() {
        return Err(InsightError::Invalid("no insights returned".to_string()));
    }
    if let Some(position) = insights.iter().position(|i| i.headline.trim().is_empty()) {
        return Err(InsightError::Invalid(format!(
            "insight {position} has an empty main point"
        )));
    }
    Ok(insights)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}

/// Turn a generator result into insights, falling back on any failure.
pub fn resolve_insights(result: Result<String, ProviderError>) -> Vec<Insight> {
    match result {
        Ok(text) => match parse_insights(&text) {
            Ok(insights) => insights,
            Err(err) => {
                warn!(error = %err, "Discarding malformed insight response");
                fallback_insights(FallbackReason::Malformed)
            }
        },
        Err(ProviderError::Unavailable(reason)) => {
            warn!(%reason, "Insight generator unavailable");
            fallback_insights(FallbackReason::Unavailable)
        }
        Err(ProviderError::Malformed(reason)) => {
            warn!(%reason, "Insight generator returned a malformed envelope");
            fallback_insights(FallbackReason::Malformed)
        }
        Err(err) => {
            warn!(error = %err, "Insight generation failed");
            fallback_insights(FallbackReason::Failed)
        }
    }
}

/// Ask the generator for insights; never fails.
pub async fn generate_insights<G: InsightGenerator>(
    generator: &G,
    request: &InsightRequest,
) -> Vec<Insight> {
    resolve_insights(generator.generate(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request() -> InsightRequest {
        InsightRequest {
            route_name: "Rotterdam to Singapore".to_string(),
            route_distance_nm: 8_300.0,
            eta: Utc.with_ymd_and_hms(2025, 4, 2, 14, 30, 0).unwrap(),
            laycan_start: Some(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap()),
            laycan_end: Some(Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap()),
            laycan_status: LaycanStatus::Late,
            laycan_risk_hours: 15,
            average_wind_knots: 14.2,
            average_wave_m: 2.1,
            total_fuel_tons: 1_020.456,
            estimated_cost: 663_296.4,
            total_duration_hours: 690.0,
        }
    }

    #[test]
    fn prompt_carries_voyage_figures() {
        let prompt = request().prompt();
        assert!(prompt.contains("Route: Rotterdam to Singapore"));
        assert!(prompt.contains("ETA: 2025-04-02 14:30 UTC"));
        assert!(prompt.contains("Laycan window: 2025-04-01 to 2025-04-02"));
        assert!(prompt.contains("Laycan status: LATE (15 hours)"));
        assert!(prompt.contains("Total fuel: 1020.46 tons"));
        assert!(prompt.contains("\"mainPoint\""));
    }

    #[test]
    fn prompt_without_window() {
        let mut req = request();
        req.laycan_end = None;
        req.laycan_status = LaycanStatus::Unspecified;
        assert!(req.prompt().contains("Laycan window: not specified"));
    }

    #[test]
    fn parses_bare_array() {
        let insights = parse_insights(
            r#"[{"mainPoint": "Speed", "subPoints": ["Slow to 11 kn"]}, {"mainPoint": "Route"}]"#,
        )
        .unwrap();
        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].points, vec!["Slow to 11 kn".to_string()]);
        assert!(insights[1].points.is_empty());
    }

    #[test]
    fn parses_fenced_array() {
        let text = "```json\n[{\"mainPoint\": \"ETA\", \"subPoints\": []}]\n```\n";
        let insights = parse_insights(text).unwrap();
        assert_eq!(insights[0].headline, "ETA");
    }

    #[test]
    fn rejects_unusable_payloads() {
        assert_eq!(parse_insights("  "), Err(InsightError::Empty));
        assert!(matches!(parse_insights("not json"), Err(InsightError::Parse(_))));
        assert!(matches!(parse_insights("[]"), Err(InsightError::Invalid(_))));
        assert!(matches!(
            parse_insights(r#"[{"mainPoint": " ", "subPoints": []}]"#),
            Err(InsightError::Invalid(_))
        ));
    }

    #[test]
    fn failures_resolve_to_one_fallback_record() {
        let unavailable = resolve_insights(Err(ProviderError::Unavailable("no key".into())));
        assert_eq!(unavailable, fallback_insights(FallbackReason::Unavailable));
        assert_eq!(unavailable.len(), 1);

        let timeout = resolve_insights(Err(ProviderError::Timeout));
        assert_eq!(timeout, fallback_insights(FallbackReason::Failed));

        let garbage = resolve_insights(Ok("{\"oops\": true}".to_string()));
        assert_eq!(garbage, fallback_insights(FallbackReason::Malformed));
    }

    #[test]
    fn fallback_records_are_non_empty() {
        for reason in [
            FallbackReason::Unavailable,
            FallbackReason::Failed,
            FallbackReason::Malformed,
        ] {
            let records = fallback_insights(reason);
            assert_eq!(records.len(), 1);
            assert!(!records[0].headline.is_empty());
            assert!(!records[0].points.is_empty());
        }
    }
}
