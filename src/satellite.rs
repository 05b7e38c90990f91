use chrono::{DateTime, Utc};
use sgp4::Constants;

use crate::error::{Error, Result};
use crate::types::SatelliteState;

/// Anything that can tell where a satellite is at a given instant.
///
/// The sgp4-backed [`Satellite`] is the production implementation; tests drive
/// the geometry and the scanner with synthetic ones.
pub trait Propagator {
    fn name(&self) -> &str;
    /// Inertial position (km) and velocity (km/s) at `time`
    fn state_at(&self, time: &DateTime<Utc>) -> Result<SatelliteState>;
}

#[derive(Clone)]
pub struct Satellite {
    constants: Constants,
    name: String,
    norad_id: u64,
    orbital_period: f64, //seconds
    epoch: DateTime<Utc>, //Epoch of the element set
}

impl Satellite {
    /// Builds a satellite from a two- or three-line element block. Leading
    /// whitespace on every line is ignored; a name line is optional.
    pub fn new_from_tle(tle: &str) -> Result<Satellite> {
        let lines: Vec<&str> = tle
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        match lines.as_slice() {
            [line1, line2] => Self::from_tle(None, line1, line2),
            [name, line1, line2] => Self::from_tle(Some(*name), line1, line2),
            _ => Err(Error::Tle {
                name: "<unknown>".to_string(),
                message: format!("expected 2 or 3 lines, got {}", lines.len()),
            }),
        }
    }

    pub fn from_tle(name: Option<&str>, line1: &str, line2: &str) -> Result<Satellite> {
        let object_name = name.map(|n| n.trim().to_string());
        let elements = sgp4::Elements::from_tle(
            object_name.clone(),
            line1.as_bytes(),
            line2.as_bytes(),
        )
        .map_err(|e| Error::Tle {
            name: object_name.clone().unwrap_or_else(|| line1.to_string()),
            message: format!("{e:?}"),
        })?;
        let name = object_name.unwrap_or_else(|| format!("{}", elements.norad_id));
        let constants = Constants::from_elements(&elements).map_err(|e| Error::Tle {
            name: name.clone(),
            message: format!("{e:?}"),
        })?;
        Ok(Satellite {
            constants,
            orbital_period: 1. / elements.mean_motion * 86400.,
            norad_id: elements.norad_id,
            epoch: elements.datetime.and_utc(),
            name,
        })
    }

    pub fn norad_id(&self) -> u64 {
        self.norad_id
    }
    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }
    pub fn orbital_period(&self) -> f64 {
        self.orbital_period
    }
}

impl Propagator for Satellite {
    fn name(&self) -> &str {
        &self.name
    }

    fn state_at(&self, time: &DateTime<Utc>) -> Result<SatelliteState> {
        let minutes = (*time - self.epoch).num_milliseconds() as f64 / 60_000.;
        let prediction = self
            .constants
            .propagate(minutes)
            .map_err(|e| Error::Propagation {
                name: self.name.clone(),
                time: *time,
                message: format!("{e:?}"),
            })?;
        Ok(SatelliteState {
            position: prediction.position.into(),
            velocity: prediction.velocity.into(),
            epoch: *time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::assert_almost_eq;
    use chrono::TimeZone;

    const ISS: &str = "ISS (ZARYA)
1 25544U 98067A   25078.36999458  .00023040  00000+0  41584-3 0  9998
2 25544  51.6365  31.8868 0003892  28.0409 332.0788 15.49628144501233";

    #[test]
    fn test_satellite_gen() {
        let sat = Satellite::new_from_tle(
            "DELFI-PQ
            1 51074U 22002CU  23120.77859283  .00033391  00000+0  10673-2 0  9997
            2 51074  97.4622 192.5713 0010271  72.5102 287.7261 15.32323264 71737",
        )
        .unwrap();
        assert_eq!(sat.name(), "DELFI-PQ");
        assert_eq!(sat.norad_id(), 51074);
        assert_almost_eq(sat.orbital_period(), 86400. / 15.32323264, 1e-6);
    }

    #[test]
    fn test_unnamed_satellite_uses_catalog_number() {
        let sat = Satellite::new_from_tle(
            "1 25544U 98067A   25078.36999458  .00023040  00000+0  41584-3 0  9998
2 25544  51.6365  31.8868 0003892  28.0409 332.0788 15.49628144501233",
        )
        .unwrap();
        assert_eq!(sat.name(), "25544");
    }

    #[test]
    fn test_rejects_wrong_line_count() {
        assert!(matches!(
            Satellite::new_from_tle("just a name"),
            Err(Error::Tle { .. })
        ));
    }

    #[test]
    fn test_epoch() {
        let sat = Satellite::new_from_tle(ISS).unwrap();
        // day 78.36999458 of 2025
        let expected = Utc.with_ymd_and_hms(2025, 3, 19, 8, 52, 47).unwrap();
        assert!((sat.epoch() - expected).num_milliseconds().abs() < 1000);
    }

    #[test]
    fn test_eci() {
        let sat = Satellite::new_from_tle(
            "RUST_SGP4(TESTING)
            1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753
            2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667",
        )
        .unwrap();
        let state = sat.state_at(&sat.epoch()).unwrap();
        // sgp4's default (non-AFSPC) mode
        assert_almost_eq(state.position.x, 7022.46647, 1e-4);
        assert_almost_eq(state.position.y, -1400.06656, 1e-3);
        assert_almost_eq(state.position.z, 0.05106, 1e-3);
        assert_almost_eq(state.velocity.x, 1.893841, 1e-3);
        assert_almost_eq(state.velocity.y, 6.405894, 1e-3);
        assert_almost_eq(state.velocity.z, 4.534807, 1e-3);
    }

    #[test]
    fn test_bad_elements_report_sgp4_error() {
        let err = Satellite::from_tle(
            Some("BROKEN"),
            "1 25544U 98067A   25078.3699945x  .00023040  00000+0  41584-3 0  9998",
            "2 25544  51.6365  31.8868 0003892  28.0409 332.0788 15.49628144501233",
        )
        .err()
        .unwrap();
        match err {
            Error::Tle { name, message } => {
                assert_eq!(name, "BROKEN");
                assert!(!message.is_empty());
            }
            other => panic!("unexpected error {other}"),
        }
    }
}
