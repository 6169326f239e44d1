//! 2D vector arithmetic used by all motion code.
//!
//! [`Vector2D`] is a plain value type: every operation is pure and returns a
//! new vector. World positions are expressed in grid units, so a vector of
//! `(3.0, 4.0)` is three cells right and four cells down from the origin.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A two-dimensional vector (or point) in world units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Vector2D {
    /// Horizontal component (grid column axis).
    pub x: f64,
    /// Vertical component (grid row axis).
    pub y: f64,
}

impl Vector2D {
    /// The origin / zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Dot product.
    pub fn dot(self, other: Self) -> f64 {
        self.x.mul_add(other.x, self.y * other.y)
    }

    /// Squared length. Cheaper than [`length`](Self::length) when only
    /// comparing magnitudes.
    pub fn magnitude(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.magnitude().sqrt()
    }

    /// Euclidean distance between two points.
    pub fn distance(self, other: Self) -> f64 {
        self.subtract(other).length()
    }

    /// Multiply both components by `factor`.
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Unit vector in the same direction.
    ///
    /// Returns [`Vector2D::ZERO`] for the zero vector and for vectors with
    /// non-finite components, so callers never divide by zero.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if !len.is_finite() || len <= f64::EPSILON {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len)
    }

    /// Whether both components are exactly zero.
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Exact component-wise equality.
    pub fn same_as(self, other: Self) -> bool {
        self == other
    }
}

impl Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.subtract(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn add_and_subtract() {
        let a = Vector2D::new(1.0, 2.0);
        let b = Vector2D::new(3.0, -1.0);
        assert!((a + b).same_as(Vector2D::new(4.0, 1.0)));
        assert!((a - b).same_as(Vector2D::new(-2.0, 3.0)));
        assert!(a.subtract(b).same_as(a - b));
    }

    #[test]
    fn length_and_distance() {
        let v = Vector2D::new(3.0, 4.0);
        assert!(approx(v.magnitude(), 25.0));
        assert!(approx(v.length(), 5.0));
        assert!(approx(Vector2D::ZERO.distance(v), 5.0));
    }

    #[test]
    fn dot_product() {
        let a = Vector2D::new(1.0, 0.0);
        let b = Vector2D::new(0.0, 1.0);
        assert!(approx(a.dot(b), 0.0));
        assert!(approx(a.dot(a), 1.0));
    }

    #[test]
    fn normalized_has_unit_length() {
        let n = Vector2D::new(10.0, 0.0).normalized();
        assert!(n.same_as(Vector2D::new(1.0, 0.0)));
        assert!(approx(Vector2D::new(-2.0, 7.0).normalized().length(), 1.0));
    }

    #[test]
    fn normalizing_zero_yields_zero() {
        assert!(Vector2D::ZERO.normalized().is_zero());
        assert!(Vector2D::new(f64::NAN, 1.0).normalized().is_zero());
    }

    #[test]
    fn zero_check() {
        assert!(Vector2D::ZERO.is_zero());
        assert!(Vector2D::default().is_zero());
        assert!(!Vector2D::new(0.0, 0.1).is_zero());
    }
}
