use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geodetic::GeodeticPoint;

/// A named observer location, as found in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundStation {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    ///km above the ellipsoid
    #[serde(default)]
    pub altitude: f64,
}

impl GroundStation {
    pub fn new(name: &str, point: GeodeticPoint) -> GroundStation {
        GroundStation {
            name: name.to_string(),
            longitude: point.lon,
            latitude: point.lat,
            altitude: point.alt,
        }
    }

    /// Location with range checks applied
    pub fn location(&self) -> Result<GeodeticPoint> {
        GeodeticPoint::checked(self.longitude, self.latitude, self.altitude)
    }
}
