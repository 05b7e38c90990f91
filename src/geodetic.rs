use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::WGS84_A;

/// A point referenced to the WGS84 ellipsoid. Degrees for lon/lat, km for alt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeodeticPoint {
    pub lon: f64,
    pub lat: f64,
    pub alt: f64,
}

impl GeodeticPoint {
    pub const fn new(lon: f64, lat: f64, alt: f64) -> GeodeticPoint {
        GeodeticPoint { lon, lat, alt }
    }

    ///Same as `new`, but rejects coordinates outside their valid ranges
    pub fn checked(lon: f64, lat: f64, alt: f64) -> Result<GeodeticPoint> {
        check_range("longitude", lon, -180., 180.)?;
        check_range("latitude", lat, -90., 90.)?;
        check_range("altitude", alt, -WGS84_A, f64::MAX)?;
        Ok(GeodeticPoint { lon, lat, alt })
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    // NaN fails both comparisons, so test for containment
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidCoordinate {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_accepts_bounds() {
        assert!(GeodeticPoint::checked(-180., 90., 0.).is_ok());
        assert!(GeodeticPoint::checked(180., -90., -WGS84_A).is_ok());
    }

    #[test]
    fn test_checked_rejects_out_of_range() {
        let err = GeodeticPoint::checked(4.3, 91., 0.).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidCoordinate {
                field: "latitude",
                ..
            }
        ));
        assert!(GeodeticPoint::checked(181., 0., 0.).is_err());
        assert!(GeodeticPoint::checked(0., 0., -7000.).is_err());
        assert!(GeodeticPoint::checked(f64::NAN, 0., 0.).is_err());
    }
}
