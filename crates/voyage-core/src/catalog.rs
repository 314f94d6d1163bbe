//! Built-in route and vessel catalog.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VoyageError};
use crate::models::{Coordinate, Route, VesselProfile};

/// Route without its waypoints, as shown in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteListing {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub destination: String,
    pub waypoint_count: usize,
}

impl From<&Route> for RouteListing {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id.clone(),
            name: route.name.clone(),
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            waypoint_count: route.waypoints.len(),
        }
    }
}

/// Named routes available for analysis.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: Vec<Route>,
}

impl RouteCatalog {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The two routes shipped with the service.
    pub fn builtin() -> Self {
        Self::new(vec![
            builtin_route("1", "Gopalpur", "New Harbour", GOPALPUR_NEW_HARBOUR),
            builtin_route("2", "Rotterdam", "Singapore", ROTTERDAM_SINGAPORE),
        ])
    }

    pub fn get(&self, id: &str) -> Result<&Route> {
        self.routes
            .iter()
            .find(|route| route.id == id)
            .ok_or_else(|| VoyageError::UnknownRoute(id.to_string()))
    }

    pub fn list(&self) -> Vec<RouteListing> {
        self.routes.iter().map(RouteListing::from).collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn builtin_route(id: &str, origin: &str, destination: &str, waypoints: &[[f64; 2]]) -> Route {
    Route {
        id: id.to_string(),
        name: format!("{origin} to {destination}"),
        origin: origin.to_string(),
        destination: destination.to_string(),
        waypoints: waypoints.iter().copied().map(Coordinate::from).collect(),
    }
}

/// Reference vessel with nominal performance figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselPreset {
    pub id: String,
    pub name: String,
    pub service_speed: f64,
    pub max_speed: f64,
    /// Metric tons per day at service speed
    pub fuel_consumption_per_day: f64,
    pub fuel_type: String,
    /// Meters
    pub draught: f64,
}

impl VesselPreset {
    /// Profile for an analysis run at the given fuel price.
    pub fn profile(&self, fuel_price: f64) -> VesselProfile {
        VesselProfile {
            vessel_name: self.name.clone(),
            service_speed: self.service_speed,
            fuel_consumption: self.fuel_consumption_per_day,
            fuel_price,
        }
    }
}

/// Look up a vessel preset by id.
pub fn vessel_preset(id: &str) -> Option<VesselPreset> {
    vessel_presets().into_iter().find(|preset| preset.id == id)
}

pub fn vessel_presets() -> Vec<VesselPreset> {
    vec![
        VesselPreset {
            id: "vessel-a".to_string(),
            name: "Container Vessel Alpha".to_string(),
            service_speed: 12.5,
            max_speed: 16.0,
            fuel_consumption_per_day: 40.0,
            fuel_type: "VLSFO".to_string(),
            draught: 10.0,
        },
        VesselPreset {
            id: "vessel-b".to_string(),
            name: "Bulk Carrier Beta".to_string(),
            service_speed: 11.0,
            max_speed: 14.0,
            fuel_consumption_per_day: 35.0,
            fuel_type: "MGO".to_string(),
            draught: 12.0,
        },
    ]
}

const GOPALPUR_NEW_HARBOUR: &[[f64; 2]] = &[
    [30.213982, 32.557983], [30.318359, 32.382202], [30.945814, 32.306671],
    [31.298117, 32.387159], [31.7, 32.1], [32.316071, 30.408377],
    [32.863395, 28.905525], [33.115811, 28.212434], [33.219565, 27.927542],
    [33.328, 27.6298], [33.748752, 26.306431], [34.011915, 25.478721],
    [34.187436, 24.926664], [34.8, 23.0], [35.126694, 21.407365],
    [35.845726, 17.902084], [36.086854, 16.726588], [36.4, 15.2],
    [36.907095, 13.263819], [37.209117, 12.110644], [37.212689, 12.097004],
    [37.215493, 12.086301], [37.283186, 11.827836], [37.454891, 11.172235],
    [37.5, 11.0], [37.489085, 10.372293], [37.4851, 10.1431],
    [37.4, 7.5], [37.2, 3.1], [36.666667, -0.366667],
    [36.473171, -1.62439], [36.377724, -2.244793], [36.324512, -2.590675],
    [36.220888, -3.264225], [36.158352, -3.670714], [36.156455, -3.683043],
    [36.0, -4.7], [35.97289, -5.269383], [35.968819, -5.354867],
    [35.95, -5.75], [36.31906, -7.26966], [36.549727, -8.219465],
    [36.8, -9.25], [36.83741, -9.36445], [37.324914, -10.855872],
    [37.417342, -11.138637], [37.717697, -12.057515], [38.272734, -13.755544],
    [38.5182, -14.5065], [40.0, -20.0], [41.125083, -25.565029],
    [41.1999, -25.9351], [41.584862, -28.584901], [41.790603, -30.001074],
    [42.072366, -31.940532], [42.0901, -32.0626], [42.340269, -34.863425],
    [42.592324, -37.685353], [42.6501, -38.3322], [42.706999, -40.001623],
    [42.796183, -42.618304], [42.8665, -44.6814], [42.807466, -47.493255],
    [42.754804, -50.001652], [42.733, -51.0402], [42.618612, -52.53975],
    [42.613022, -52.613022], [42.2526, -57.3379], [41.53046, -62.794754],
    [41.4359, -63.5093], [41.222837, -64.632986], [40.435954, -68.782982],
    [40.430133, -68.813685], [40.413733, -68.900173], [40.412386, -68.907278],
    [40.311722, -69.43818], [40.3, -69.5], [40.419295, -71.289425],
    [40.437172, -71.557579], [40.453237, -71.798554], [40.535177, -73.027658],
    [40.6, -74.0], [40.6061, -74.0456], [40.6285, -74.0561],
    [40.6676, -74.0488], [40.7081, -73.9779],
];

const ROTTERDAM_SINGAPORE: &[[f64; 2]] = &[
    [51.9244, 4.4777], [29.7, 32.6], [27.9, 33.75],
    [27.0, 34.5], [23.6, 37.0], [20.75, 38.9],
    [16.3, 41.2], [15.0, 42.0], [12.7, 43.3],
    [12.40439, 43.746586], [12.0, 45.0], [13.0, 51.0],
    [12.577758, 53.059021], [12.2395, 54.7085], [11.4317, 58.3951],
    [11.083455, 59.894005], [10.866984, 60.825733], [10.5802, 62.0601],
    [10.031585, 64.303249], [9.934828, 64.698862], [9.862937, 64.992809],
    [9.6889, 65.7044], [8.881605, 68.858995], [8.7613, 69.3291],
    [8.6701, 69.671733], [8.582747, 69.999915], [8.365148, 70.817426],
    [8.356493, 70.84994], [7.8014, 72.9354], [6.966807, 75.966807],
    [6.8131, 76.5251], [5.8, 80.1], [5.9, 81.9],
    [6.1983, 85.9479], [6.4664, 90.0], [6.7, 94.0],
    [7.0, 97.0], [3.2, 100.6], [2.0, 102.0],
    [1.1, 103.6],
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::route_distance_nm;

    #[test]
    fn builtin_routes_are_valid() {
        let catalog = RouteCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        for listing in catalog.list() {
            let route = catalog.get(&listing.id).unwrap();
            assert!(route.validate().is_ok(), "route {} invalid", route.id);
        }
    }

    #[test]
    fn listing_counts_waypoints() {
        let listings = RouteCatalog::builtin().list();
        assert_eq!(listings[0].name, "Gopalpur to New Harbour");
        assert_eq!(listings[0].waypoint_count, 86);
        assert_eq!(listings[1].name, "Rotterdam to Singapore");
        assert_eq!(listings[1].waypoint_count, 40);
    }

    #[test]
    fn unknown_route_is_reported() {
        let err = RouteCatalog::builtin().get("99").unwrap_err();
        assert_eq!(err, VoyageError::UnknownRoute("99".to_string()));
        assert!(err.is_invalid_route());
    }

    #[test]
    fn atlantic_crossing_distance_is_plausible() {
        let catalog = RouteCatalog::builtin();
        let route = catalog.get("1").unwrap();
        let distance = route_distance_nm(&route.waypoints).unwrap();
        assert!(distance > 5_000.0 && distance < 6_500.0, "got {distance}");
    }

    #[test]
    fn preset_becomes_profile() {
        let presets = vessel_presets();
        let profile = presets[0].profile(650.0);
        assert_eq!(profile.vessel_name, "Container Vessel Alpha");
        assert_eq!(profile.service_speed, 12.5);
        assert_eq!(profile.fuel_consumption, 40.0);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn preset_lookup_by_id() {
        let beta = vessel_preset("vessel-b").unwrap();
        assert_eq!(beta.profile(600.0).fuel_consumption, 35.0);
        assert!(vessel_preset("vessel-z").is_none());
    }
}
