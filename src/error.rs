use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::vector::Vector3;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A zero-length or non-finite vector reached a normalization. This is a
    /// caller contract violation, e.g. an observer placed at the satellite.
    #[error("cannot normalize degenerate vector in {context}: {vector:?}")]
    DegenerateVector {
        context: &'static str,
        vector: Vector3,
    },

    #[error("{field} {value} outside of [{min}, {max}]")]
    InvalidCoordinate {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid element set for {name}: {message}")]
    Tle { name: String, message: String },

    #[error("propagation of {name} failed at {time}: {message}")]
    Propagation {
        name: String,
        time: DateTime<Utc>,
        message: String,
    },

    /// The give-up budget ran out before any pass completed.
    #[error("no pass found within {budget} ticks, consider raising the budget")]
    NoPassWithinBudget { budget: u64 },

    #[error("invalid scan configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
