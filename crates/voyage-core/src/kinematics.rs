//! Speed-over-ground models.
//!
//! Two approximations are available and one is chosen per analysis run.
//! Mixing them across legs of the same voyage makes results incomparable,
//! so the choice lives in [`crate::AnalysisConfig`] rather than per leg.

use serde::{Deserialize, Serialize};

/// Lowest SOG the leg decomposer will divide by.
pub const MIN_SOG_FLOOR_KNOTS: f64 = 1.0;

/// Share of the wind speed applied as drift in the vector-sum model.
pub const WIND_DRIFT_RATIO: f64 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SogModel {
    /// STW plus the current component projected on the course. Wind is ignored.
    #[default]
    AlongCourse,
    /// Magnitude of STW, 10% wind drift and current summed as 2-D vectors.
    VectorSum,
}

impl SogModel {
    /// Raw (unclamped) SOG in knots for a leg sailed on `course_deg`.
    pub fn raw_sog(
        self,
        stw_knots: f64,
        course_deg: f64,
        wind_speed_knots: f64,
        wind_direction_deg: f64,
        current_speed_knots: f64,
        current_direction_deg: f64,
    ) -> f64 {
        match self {
            Self::AlongCourse => along_course_sog(
                stw_knots,
                current_speed_knots,
                current_direction_deg,
                course_deg,
            ),
            Self::VectorSum => vector_sum_sog(
                stw_knots,
                wind_speed_knots,
                wind_direction_deg,
                current_speed_knots,
                current_direction_deg,
            ),
        }
    }

    /// SOG clamped to `floor_knots` (never below 1 knot).
    #[allow(clippy::too_many_arguments)]
    pub fn speed_over_ground(
        self,
        stw_knots: f64,
        course_deg: f64,
        wind_speed_knots: f64,
        wind_direction_deg: f64,
        current_speed_knots: f64,
        current_direction_deg: f64,
        floor_knots: f64,
    ) -> f64 {
        let raw = self.raw_sog(
            stw_knots,
            course_deg,
            wind_speed_knots,
            wind_direction_deg,
            current_speed_knots,
            current_direction_deg,
        );
        clamp_sog(raw, floor_knots)
    }
}

impl std::str::FromStr for SogModel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "along_course" | "along-course" | "additive" => Ok(Self::AlongCourse),
            "vector_sum" | "vector-sum" | "vector" => Ok(Self::VectorSum),
            other => Err(format!("unknown SOG model '{other}'")),
        }
    }
}

/// `stw + current·cos(current_dir − course)`.
///
/// A current setting along the course adds fully, an opposing one subtracts
/// fully and a perpendicular one contributes nothing.
pub fn along_course_sog(
    stw_knots: f64,
    current_speed_knots: f64,
    current_direction_deg: f64,
    course_deg: f64,
) -> f64 {
    let angle = (current_direction_deg - course_deg).to_radians();
    stw_knots + current_speed_knots * angle.cos()
}

/// Magnitude of the summed STW, wind drift and current vectors.
///
/// STW is fixed along the y axis; wind and current directions are taken
/// as absolute bearings.
pub fn vector_sum_sog(
    stw_knots: f64,
    wind_speed_knots: f64,
    wind_direction_deg: f64,
    current_speed_knots: f64,
    current_direction_deg: f64,
) -> f64 {
    let wind_effect = wind_speed_knots * WIND_DRIFT_RATIO;
    let wind_rad = wind_direction_deg.to_radians();
    let current_rad = current_direction_deg.to_radians();

    let x = wind_effect * wind_rad.sin() + current_speed_knots * current_rad.sin();
    let y = stw_knots + wind_effect * wind_rad.cos() + current_speed_knots * current_rad.cos();

    (x * x + y * y).sqrt()
}

/// Clamp a raw SOG to the floor. The floor itself is never below 1 knot.
pub fn clamp_sog(raw_knots: f64, floor_knots: f64) -> f64 {
    let floor = if floor_knots.is_finite() {
        floor_knots.max(MIN_SOG_FLOOR_KNOTS)
    } else {
        MIN_SOG_FLOOR_KNOTS
    };
    if raw_knots.is_finite() && raw_knots >= floor {
        raw_knots
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn along_course_current_aligned_adds_fully() {
        let sog = along_course_sog(12.0, 2.0, 90.0, 90.0);
        assert!((sog - 14.0).abs() < 1e-9);
    }

    #[test]
    fn along_course_current_opposed_subtracts_fully() {
        let sog = along_course_sog(12.0, 2.0, 270.0, 90.0);
        assert!((sog - 10.0).abs() < 1e-9);
    }

    #[test]
    fn along_course_current_perpendicular_contributes_nothing() {
        let sog = along_course_sog(12.0, 2.0, 0.0, 90.0);
        assert!((sog - 12.0).abs() < 1e-9);
    }

    #[test]
    fn vector_sum_calm_equals_stw() {
        assert!((vector_sum_sog(12.0, 0.0, 0.0, 0.0, 0.0) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn vector_sum_combines_wind_and_current() {
        // Wind 20 kn from 0° gives 2 kn drift on y; current 1 kn at 90° on x.
        let sog = vector_sum_sog(10.0, 20.0, 0.0, 1.0, 90.0);
        let expected = (1.0_f64.powi(2) + 12.0_f64.powi(2)).sqrt();
        assert!((sog - expected).abs() < 1e-9);
    }

    #[test]
    fn floor_applies_to_slow_or_negative_sog() {
        assert_eq!(clamp_sog(0.3, 1.0), 1.0);
        assert_eq!(clamp_sog(-4.0, 1.0), 1.0);
        assert_eq!(clamp_sog(f64::NAN, 1.0), 1.0);
        assert_eq!(clamp_sog(0.5, 0.2), 1.0);
        assert_eq!(clamp_sog(2.5, 3.0), 3.0);
        assert_eq!(clamp_sog(12.0, 1.0), 12.0);
    }

    #[test]
    fn speed_over_ground_is_floored() {
        // A 3 kn vessel against a 5 kn current.
        let sog = SogModel::AlongCourse.speed_over_ground(3.0, 0.0, 0.0, 0.0, 5.0, 180.0, 1.0);
        assert_eq!(sog, 1.0);
    }

    #[test]
    fn along_course_ignores_wind() {
        let calm = SogModel::AlongCourse.raw_sog(12.0, 45.0, 0.0, 0.0, 0.0, 0.0);
        let windy = SogModel::AlongCourse.raw_sog(12.0, 45.0, 35.0, 225.0, 0.0, 0.0);
        assert_eq!(calm, windy);
    }

    #[test]
    fn parses_model_names() {
        assert_eq!("along_course".parse::<SogModel>(), Ok(SogModel::AlongCourse));
        assert_eq!("Vector-Sum".parse::<SogModel>(), Ok(SogModel::VectorSum));
        assert!("polar".parse::<SogModel>().is_err());
    }
}
