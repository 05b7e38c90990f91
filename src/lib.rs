//! Look angles, sub-satellite points and visibility passes for satellites
//! seen from a ground observer.
//!
//! ```no_run
//! use chrono::Utc;
//! use sky_watch::{Catalog, GeodeticPoint, PassScanner, ScanConfig};
//!
//! let catalog = Catalog::load("stations.tle")?;
//! let delft = GeodeticPoint::checked(4.3876, 51.9861, 0.0744)?;
//! let scan = ScanConfig { min_elevation: 10., max_passes: Some(3), ..ScanConfig::default() };
//! for pass in PassScanner::new(delft, &catalog, Utc::now(), scan)? {
//!     println!("{}", pass?);
//! }
//! # Ok::<(), sky_watch::Error>(())
//! ```

pub use catalog::Catalog;
pub use config::{Config, ScanConfig};
pub use error::{Error, Result};
pub use geodetic::GeodeticPoint;
pub use ground_station::GroundStation;
pub use observation::{observe, track};
pub use pass_scanner::{Pass, PassProgress, PassScanner, ScanState};
pub use satellite::{Propagator, Satellite};
pub use types::{Observation, SatelliteState};
pub use vector::Vector3;

mod catalog;
pub mod config;
mod error;
pub mod frames;
mod geodetic;
mod ground_station;
mod helpers;
mod observation;
mod pass_scanner;
mod satellite;
pub mod types;
mod vector;
