//! Conversions between geodetic, Earth-fixed (ECEF) and inertial (ECI) frames.
//!
//! Earth rotation is modelled as a constant angular velocity from a fixed angle
//! at J2000, resolved to whole seconds.

use chrono::{DateTime, Utc};

use crate::geodetic::GeodeticPoint;
use crate::types::{
    EARTH_ANGLE_AT_J2000, EARTH_ANGULAR_VELOCITY, J2000_UNIX, WGS84_A, WGS84_E_SQUARED,
};
use crate::vector::Vector3;

/// Prime-vertical radius of curvature at geodetic latitude `lat` (radians).
fn prime_vertical_radius(lat: f64) -> f64 {
    let sin_lat = lat.sin();
    WGS84_A / (1. - WGS84_E_SQUARED * sin_lat * sin_lat).sqrt()
}

pub fn geodetic_to_earth_fixed(point: &GeodeticPoint) -> Vector3 {
    let lat = point.lat.to_radians();
    let lon = point.lon.to_radians();
    let n = prime_vertical_radius(lat);
    Vector3 {
        x: (n + point.alt) * lat.cos() * lon.cos(),
        y: (n + point.alt) * lat.cos() * lon.sin(),
        z: ((1. - WGS84_E_SQUARED) * n + point.alt) * lat.sin(),
    }
}

/// Rotation angle of the Earth (radians, not wrapped) at `time`.
pub fn earth_rotation_angle(time: &DateTime<Utc>) -> f64 {
    let delta_t = (time.timestamp() - J2000_UNIX) as f64;
    EARTH_ANGULAR_VELOCITY * delta_t + EARTH_ANGLE_AT_J2000.to_radians()
}

fn rotate_about_pole(v: &Vector3, angle: f64) -> Vector3 {
    let (sin_a, cos_a) = angle.sin_cos();
    Vector3 {
        x: v.x * cos_a - v.y * sin_a,
        y: v.x * sin_a + v.y * cos_a,
        z: v.z,
    }
}

pub fn earth_fixed_to_inertial(v: &Vector3, time: &DateTime<Utc>) -> Vector3 {
    rotate_about_pole(v, earth_rotation_angle(time))
}

pub fn inertial_to_earth_fixed(v: &Vector3, time: &DateTime<Utc>) -> Vector3 {
    rotate_about_pole(v, -earth_rotation_angle(time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::{assert_almost_eq, modulus};
    use std::f64::consts::PI;

    fn at(timestamp: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(timestamp, 0).unwrap()
    }

    #[test]
    fn test_equator_prime_meridian() {
        let v = geodetic_to_earth_fixed(&GeodeticPoint::new(0., 0., 0.));
        assert_eq!(v, Vector3::new(WGS84_A, 0., 0.));
    }

    #[test]
    fn test_pole_uses_polar_radius() {
        let v = geodetic_to_earth_fixed(&GeodeticPoint::new(0., 90., 0.));
        assert_almost_eq(v.x, 0., 1e-9);
        assert_almost_eq(v.z, 6356.752314, 1e-5);
    }

    #[test]
    fn test_altitude_adds_along_normal() {
        let ground = geodetic_to_earth_fixed(&GeodeticPoint::new(-93., 45., 0.));
        let raised = geodetic_to_earth_fixed(&GeodeticPoint::new(-93., 45., 10.));
        assert_almost_eq((raised - ground).length(), 10., 1e-9);
    }

    #[test]
    fn test_rotation_angle_at_j2000() {
        assert_almost_eq(
            earth_rotation_angle(&at(J2000_UNIX)),
            EARTH_ANGLE_AT_J2000.to_radians(),
            1e-15,
        );
        let one_day_later = earth_rotation_angle(&at(J2000_UNIX + 86400));
        // slightly more than a full turn per solar day
        assert_almost_eq(
            modulus(one_day_later, 2. * PI),
            modulus(EARTH_ANGLE_AT_J2000.to_radians() + 0.0172, 2. * PI),
            1e-3,
        );
    }

    #[test]
    fn test_round_trip() {
        let vectors = [
            Vector3::new(7000., 0., 0.),
            Vector3::new(-4400.594, 1932.870, 4760.712),
            Vector3::new(1e-3, -2e-3, 5.),
        ];
        for timestamp in [0, J2000_UNIX, 1_742_417_404, 4_102_444_800] {
            let t = at(timestamp);
            for v in &vectors {
                let back = earth_fixed_to_inertial(&inertial_to_earth_fixed(v, &t), &t);
                assert!((back - *v).length() <= 1e-9 * v.length());
                let forth = inertial_to_earth_fixed(&earth_fixed_to_inertial(v, &t), &t);
                assert!((forth - *v).length() <= 1e-9 * v.length());
            }
        }
    }

    #[test]
    fn test_rotation_keeps_z_and_length() {
        let v = Vector3::new(-4400.594, 1932.870, 4760.712);
        let r = earth_fixed_to_inertial(&v, &at(1_000_000_000));
        assert_eq!(r.z, v.z);
        assert_almost_eq(r.length(), v.length(), 1e-9);
    }
}
