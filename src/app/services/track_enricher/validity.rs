//! Fix validity decision rules
//!
//! Decides, per GPS sample, whether it is a trustworthy navigation fix.
//! The rules are evaluated in a fixed order and the first match wins; only
//! the immediately preceding point of the same track is ever consulted.

use geo::{GeodesicDistance, Point};
use tracing::debug;

use crate::app::models::EnrichedPoint;

/// Geodesic (ellipsoidal-earth) distance between two coordinate pairs, in
/// meters.
///
/// Coordinates are `(latitude, longitude)` pairs; geo's axis convention is
/// x = longitude, y = latitude, hence the swap when building the points.
/// Curvature matters at the threshold scale, so this is not a flat-earth
/// approximation.
pub fn geodesic_distance_meters(from: (f64, f64), to: (f64, f64)) -> f64 {
    let from = Point::new(from.1, from.0);
    let to = Point::new(to.1, to.0);
    from.geodesic_distance(&to)
}

/// Apply the validity rules to one fix.
///
/// Evaluated in this exact order, first match wins:
/// 1. `speed <= 0`: stationary/moored vessel or zero-speed sensor glitch
/// 2. `course <= 0`: missing or garbage heading
/// 3. distance to the previous point above `threshold_meters`: GPS jump
/// 4. otherwise valid
///
/// The first point of a track passes `previous = None`, so only rules 1–2
/// apply to it.
pub fn is_fix_valid(
    speed: f64,
    course: f64,
    location: (f64, f64),
    previous: Option<&EnrichedPoint>,
    threshold_meters: f64,
) -> bool {
    if speed <= 0.0 {
        return false;
    }

    if course <= 0.0 {
        return false;
    }

    if let Some(previous) = previous {
        let distance = geodesic_distance_meters(location, previous.location());
        if distance > threshold_meters {
            debug!(
                "Fix at ({}, {}) is {:.0}m from previous fix, above threshold {:.0}m",
                location.0, location.1, distance, threshold_meters
            );
            return false;
        }
    }

    true
}
