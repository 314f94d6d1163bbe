use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, state::AppState};

fn setup_app() -> (Router, Arc<AppState>) {
    let mut config = Config::from_env();
    // No provider keys: weather is simulated and insights fall back, so no network is touched.
    config.openweather_api_key = None;
    config.gemini_api_key = None;
    config.max_legs = 50;
    config.sample_stride = 8;
    config.max_samples = 10;
    config.response_leg_limit = 20;

    let state = Arc::new(AppState::new(config));
    (api::app(state.clone()), state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_reports_catalog() {
    let (app, state) = setup_app();
    assert!(!state.insights().is_configured());
    let res = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["routes"], 2);
    assert_eq!(body["weatherCacheSize"], 0);
}

#[tokio::test]
async fn lists_routes_and_vessels() {
    let (app, _state) = setup_app();

    let res = app.clone().oneshot(get("/v1/routes")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let routes = read_json(res).await;
    assert_eq!(routes.as_array().unwrap().len(), 2);
    assert_eq!(routes[0]["waypointCount"], 86);
    assert_eq!(routes[1]["name"], "Rotterdam to Singapore");

    let res = app.oneshot(get("/v1/vessels")).await.unwrap();
    let vessels = read_json(res).await;
    assert_eq!(vessels[0]["name"], "Container Vessel Alpha");
    assert_eq!(vessels[1]["fuelConsumptionPerDay"], 35.0);
}

#[tokio::test]
async fn route_detail_includes_distance_and_duration() {
    let (app, _state) = setup_app();
    let res = app.oneshot(get("/v1/routes/1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;

    let distance = body["totalDistance"].as_f64().unwrap();
    let duration = body["estimatedDuration"].as_f64().unwrap();
    assert!(distance > 5_000.0);
    assert!((duration - distance / 12.0).abs() < 1e-6);
    assert_eq!(body["waypoints"].as_array().unwrap().len(), 86);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _state) = setup_app();
    let res = app.oneshot(get("/v1/routes/42")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = read_json(res).await;
    assert_eq!(body["error"], "Route not found");
    assert!(body["details"].as_str().unwrap().contains("42"));
}

#[tokio::test]
async fn point_weather_validates_coordinates() {
    let (app, state) = setup_app();

    let res = app.clone().oneshot(get("/v1/weather/point/12.5/45.1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["synthetic"], true);
    assert_eq!(state.weather_cache_size(), 1);

    let res = app.clone().oneshot(get("/v1/weather/point/abc/45.1")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.oneshot(get("/v1/weather/point/95.0/10.0")).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn route_weather_samples_every_fifth_waypoint() {
    let (app, _state) = setup_app();
    let res = app.oneshot(get("/v1/weather/route/2")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["routeId"], "2");
    // 40 waypoints at stride 5.
    assert_eq!(body["weatherData"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn analyze_truncates_legs_and_falls_back_on_insights() {
    let (app, _state) = setup_app();
    let start = Utc::now() + Duration::days(60);
    let req = post_json(
        "/v1/voyage/analyze",
        json!({
            "routeId": "1",
            "vesselSpecs": {
                "vesselName": "Container Vessel Alpha",
                "serviceSpeed": 12.5,
                "fuelConsumption": 40.0,
                "fuelPrice": 650.0
            },
            "laycanWindow": {
                "start": start.to_rfc3339(),
                "end": (start + Duration::days(2)).to_rfc3339()
            }
        }),
    );

    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;

    assert_eq!(body["legsAnalyzed"], 50);
    assert_eq!(body["legsTotal"], 85);
    assert_eq!(body["legAnalysis"].as_array().unwrap().len(), 20);
    assert_eq!(body["laycanCompliance"]["status"], "EARLY");
    assert!(body["performance"]["totalFuel"].as_f64().unwrap() > 0.0);
    assert!(
        body["performance"]["routeDistance"].as_f64().unwrap()
            > body["performance"]["totalDistance"].as_f64().unwrap()
    );
    assert_eq!(body["optimizationSuggestions"].as_array().unwrap().len(), 2);

    let insights = body["aiInsights"].as_array().unwrap();
    assert_eq!(insights.len(), 1);
    assert_eq!(
        insights[0]["mainPoint"],
        "AI recommendations are temporarily unavailable."
    );
}

#[tokio::test]
async fn analyze_without_laycan_or_insights() {
    let (app, _state) = setup_app();
    let req = post_json(
        "/v1/voyage/analyze",
        json!({ "routeId": "2", "vesselSpecs": {}, "includeInsights": false }),
    );
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = read_json(res).await;
    assert_eq!(body["laycanCompliance"]["status"], "UNSPECIFIED");
    assert_eq!(body["vessel"]["vesselName"], "Unknown Vessel");
    assert!(body.get("aiInsights").is_none());
}

#[tokio::test]
async fn analyze_rejects_bad_input() {
    let (app, _state) = setup_app();

    let unknown = post_json(
        "/v1/voyage/analyze",
        json!({ "routeId": "7", "vesselSpecs": {} }),
    );
    let res = app.clone().oneshot(unknown).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let stopped = post_json(
        "/v1/voyage/analyze",
        json!({ "routeId": "1", "vesselSpecs": { "serviceSpeed": 0.0 } }),
    );
    let res = app.clone().oneshot(stopped).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["error"], "Invalid vessel specs");

    let now = Utc::now();
    let inverted = post_json(
        "/v1/voyage/analyze",
        json!({
            "routeId": "1",
            "vesselSpecs": {},
            "laycanWindow": {
                "start": (now + Duration::days(3)).to_rfc3339(),
                "end": now.to_rfc3339()
            }
        }),
    );
    let res = app.clone().oneshot(inverted).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let malformed = Request::builder()
        .method("POST")
        .uri("/v1/voyage/analyze")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let res = app.oneshot(malformed).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["error"], "Invalid request body");
}

#[tokio::test]
async fn analyze_requires_vessel_specs() {
    let (app, _state) = setup_app();
    let req = post_json("/v1/voyage/analyze", json!({ "routeId": "2" }));
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = read_json(res).await;
    assert_eq!(body["error"], "Invalid request body");
    assert!(body["details"].as_str().unwrap().contains("vesselSpecs"));
}

#[tokio::test]
async fn analyze_rejects_departure_near_end_of_time() {
    let (app, _state) = setup_app();
    let req = post_json(
        "/v1/voyage/analyze",
        json!({
            "routeId": "2",
            "vesselSpecs": {},
            "includeInsights": false,
            "departure": "+262142-12-31T00:00:00Z"
        }),
    );
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(res).await["error"], "Invalid departure");
}

#[tokio::test]
async fn request_id_is_echoed_or_generated() {
    let (app, _state) = setup_app();

    let req = Request::builder()
        .uri("/health")
        .header("x-request-id", "voyage-test-1")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.headers()["x-request-id"], "voyage-test-1");

    let res = app.oneshot(get("/health")).await.unwrap();
    let generated = res.headers()["x-request-id"].to_str().unwrap();
    assert_eq!(generated.len(), 36);
}
