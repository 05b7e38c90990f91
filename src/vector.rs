use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A 3-vector in km or km/s, depending on where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    /// Earth's rotational axis, pointing north.
    pub const POLAR_AXIS: Vector3 = Vector3 {
        x: 0.,
        y: 0.,
        z: 1.,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3 { x, y, z }
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Vector3) -> Vector3 {
        Vector3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn scale(&self, scalar: f64) -> Vector3 {
        Vector3 {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }

    /// Unit vector in the same direction. `context` names the computation so a
    /// zero-length input can be traced back to its source.
    pub fn normalize(&self, context: &'static str) -> Result<Vector3> {
        let len = self.length();
        if len == 0. || !len.is_finite() {
            return Err(Error::DegenerateVector {
                context,
                vector: *self,
            });
        }
        Ok(self.scale(1. / len))
    }

    /// Angle between two vectors in radians, in [0, PI].
    ///
    /// Uses the atan2 of the cross and dot products, which keeps full precision
    /// for nearly parallel vectors where an arc-cosine of the dot product does not.
    pub fn angle_to(&self, other: &Vector3) -> f64 {
        self.cross(other).length().atan2(self.dot(other))
    }

    /// Component of `self` along the unit vector `axis`.
    pub fn project_onto(&self, axis: &Vector3) -> Vector3 {
        axis.scale(self.dot(axis))
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Vector3 {
        Vector3::new(v[0], v[1], v[2])
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    fn neg(self) -> Vector3 {
        self.scale(-1.)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    fn mul(self, rhs: f64) -> Vector3 {
        self.scale(rhs)
    }
}
