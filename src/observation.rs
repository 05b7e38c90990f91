//! Observer-relative geometry of a satellite at one instant.

use std::f64::consts::PI;

use chrono::{DateTime, Duration, Utc};
use tracing::trace;

use crate::error::{Error, Result};
use crate::frames::{earth_fixed_to_inertial, geodetic_to_earth_fixed, inertial_to_earth_fixed};
use crate::geodetic::GeodeticPoint;
use crate::helpers::{clamped_acos, modulus};
use crate::satellite::Propagator;
use crate::types::{Observation, SatelliteState};
use crate::vector::Vector3;

/// Below this horizontal share of the unit look vector the satellite is
/// considered to be at the zenith and azimuth is reported as 0.
const ZENITH_TOLERANCE: f64 = 1e-12;

/// Computes the full observation of `sat` from `observer` at `time`.
///
/// Fails with [`Error::DegenerateVector`] when the geometry has no defined
/// direction, e.g. an observer coinciding with the satellite or a satellite
/// without velocity.
pub fn observe(
    observer: &GeodeticPoint,
    sat: &SatelliteState,
    time: &DateTime<Utc>,
) -> Result<Observation> {
    let sat_eci = sat.position;
    let obs_eci = earth_fixed_to_inertial(&geodetic_to_earth_fixed(observer), time);

    let dir = sat_eci - obs_eci;
    let look = dir.normalize("observer to satellite direction")?;
    let range = dir.length();
    let elevation = elevation_angle(&obs_eci, &sat_eci, &dir);
    let azimuth = azimuth_angle(&obs_eci, &look)?;
    trace!(?obs_eci, ?sat_eci, range, elevation, azimuth, "look angles");

    // Direction only, so a unit sphere gives the right lon/lat
    let sat_ecef = inertial_to_earth_fixed(&sat_eci, time);
    let sat_ecef_norm = sat_ecef.normalize("satellite position")?;
    let ssp_latitude = sat_ecef_norm.z.clamp(-1., 1.).asin().to_degrees();
    let ssp_longitude = sat_ecef_norm.y.atan2(sat_ecef_norm.x).to_degrees();

    let ssp_ecef = geodetic_to_earth_fixed(&GeodeticPoint::new(ssp_longitude, ssp_latitude, 0.));
    let altitude = sat_ecef.length() - ssp_ecef.length();

    let velocity_ecef = inertial_to_earth_fixed(&sat.velocity, time);
    let ssp_norm = ssp_ecef.normalize("sub-satellite point")?;
    let ground_velocity = velocity_ecef - velocity_ecef.project_onto(&ssp_norm);
    let ground_track_direction = ground_track_direction(&ssp_ecef, &ground_velocity)?;
    trace!(?velocity_ecef, ?ssp_ecef, ?ground_velocity, "ground track");

    Ok(Observation {
        time: *time,
        range,
        elevation,
        azimuth,
        ssp_longitude,
        ssp_latitude,
        altitude,
        position_eci: sat.position,
        velocity_eci: sat.velocity,
        speed: sat.velocity.length(),
        ground_track_speed: ground_velocity.length(),
        ground_track_direction,
    })
}

/// Propagates and observes `count` times, `interval` seconds apart.
pub fn track<P: Propagator + ?Sized>(
    observer: &GeodeticPoint,
    propagator: &P,
    start: DateTime<Utc>,
    count: usize,
    interval: i64,
) -> Result<Vec<Observation>> {
    if interval < 1 {
        return Err(Error::Config(format!(
            "tracking interval must be at least 1 second, got {interval}"
        )));
    }
    let count = i64::try_from(count)
        .map_err(|_| Error::Config(format!("tracking count {count} is too large")))?;
    (0..count)
        .map(|step| {
            let time = start + Duration::seconds(step * interval);
            let state = propagator.state_at(&time)?;
            observe(observer, &state, &time)
        })
        .collect()
}

/// Elevation in degrees from the triangle spanned by the Earth's centre, the
/// observer and the satellite. The angle at the observer is 90 degrees plus
/// the elevation; the other two angles are taken from the side vectors.
fn elevation_angle(obs_eci: &Vector3, sat_eci: &Vector3, dir: &Vector3) -> f64 {
    // Angle at the satellite, between the sides towards the centre and towards the observer
    let alpha = sat_eci.angle_to(dir);
    // Angle at the centre
    let phi = obs_eci.angle_to(sat_eci);
    (PI - alpha - phi - PI / 2.).to_degrees()
}

/// `look` is the unit vector from the observer to the satellite.
fn azimuth_angle(obs_eci: &Vector3, look: &Vector3) -> Result<f64> {
    let up = obs_eci.normalize("observer position")?;
    let horizontal = *look - look.project_onto(&up);
    if horizontal.length() <= ZENITH_TOLERANCE {
        return Ok(0.);
    }
    let down = -up;
    let east = down
        .cross(&Vector3::POLAR_AXIS)
        .normalize("observer east")?;
    let north = east.cross(&down).normalize("observer north")?;
    Ok(heading(
        &horizontal.normalize("horizontal look direction")?,
        &north,
        &east,
    ))
}

/// The (east, north) basis built here at the SSP points west and south, so
/// the heading comes out half a turn off and is rotated back.
fn ground_track_direction(ssp_ecef: &Vector3, ground_velocity: &Vector3) -> Result<f64> {
    let east = ssp_ecef.cross(&Vector3::POLAR_AXIS);
    let north = east.cross(&-*ssp_ecef);
    let direction = heading(
        &ground_velocity.normalize("ground-track velocity")?,
        &north.normalize("sub-satellite north")?,
        &east.normalize("sub-satellite east")?,
    );
    Ok(modulus(direction + 180., 360.))
}

/// Clockwise angle in degrees from `north` to `unit`, all unit vectors in the
/// same tangent plane. The angle with `east` only picks the half-plane.
fn heading(unit: &Vector3, north: &Vector3, east: &Vector3) -> f64 {
    let angle_north = clamped_acos(north.dot(unit));
    let angle_east = clamped_acos(east.dot(unit));
    let angle = if angle_east < PI / 2. {
        angle_north
    } else {
        2. * PI - angle_north
    };
    modulus(angle.to_degrees(), 360.)
}
