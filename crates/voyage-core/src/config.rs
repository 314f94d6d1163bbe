//! Tunables for one analysis run.

use serde::{Deserialize, Serialize};

use crate::kinematics::{SogModel, MIN_SOG_FLOOR_KNOTS};

/// Configuration for the leg decomposer and weather sampling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// SOG approximation used for every leg of the run
    pub sog_model: SogModel,
    /// SOG floor in knots; values below 1 are raised to 1
    pub min_sog_knots: f64,
    /// Maximum legs analyzed per voyage; `None` analyzes every leg
    pub max_legs: Option<usize>,
    /// Fetch weather for every n-th waypoint
    pub sample_stride: usize,
    /// Upper bound on weather fetches per voyage
    pub max_weather_samples: usize,
    /// Substitute default conditions when every weather fetch failed
    pub default_weather_on_empty: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sog_model: SogModel::AlongCourse,
            min_sog_knots: MIN_SOG_FLOOR_KNOTS,
            max_legs: Some(50),
            sample_stride: 8,
            max_weather_samples: 10,
            default_weather_on_empty: false,
        }
    }
}

impl AnalysisConfig {
    /// Number of legs the decomposer will produce for a route with `leg_count` legs.
    pub fn legs_to_analyze(&self, leg_count: usize) -> usize {
        match self.max_legs {
            Some(cap) => leg_count.min(cap),
            None => leg_count,
        }
    }
}
