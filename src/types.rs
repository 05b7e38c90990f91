use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::vector::Vector3;

pub const WGS84_A: f64 = 6378.137; //km
pub const WGS84_E_SQUARED: f64 = 6.69437999014e-3;
pub const EARTH_ANGULAR_VELOCITY: f64 = 7.2921159e-5; //rad/s
/// 2000-01-01T12:00:00Z in UNIX seconds
pub const J2000_UNIX: i64 = 946_728_000;
pub const EARTH_ANGLE_AT_J2000: f64 = 280.46; //degrees

/// Inertial position (km) and velocity (km/s) of a satellite at `epoch`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatelliteState {
    pub position: Vector3,
    pub velocity: Vector3,
    pub epoch: DateTime<Utc>,
}

/// Everything `observe` knows about a satellite as seen from the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub time: DateTime<Utc>,
    pub range: f64,
    pub elevation: f64,
    pub azimuth: f64,
    pub ssp_longitude: f64,
    pub ssp_latitude: f64,
    pub altitude: f64,
    pub position_eci: Vector3,
    pub velocity_eci: Vector3,
    pub speed: f64,
    pub ground_track_speed: f64,
    pub ground_track_direction: f64,
}
