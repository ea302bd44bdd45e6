//! Struct and functions for working with the `Edge`s rivets are placed along.

use crate::float_types::{Real, tolerance};
use nalgebra::{Point3, Vector3};

/// A directed segment between two mesh vertices, in object-local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub start: Point3<Real>,
    pub end: Point3<Real>,
    /// Normal of the first face bordering this edge, if any.
    pub normal: Option<Vector3<Real>>,
}

impl Edge {
    /// Create a new [`Edge`] without an adjacent face.
    pub const fn new(start: Point3<Real>, end: Point3<Real>) -> Self {
        Edge {
            start,
            end,
            normal: None,
        }
    }

    /// Create a new [`Edge`] bordering a face with the given normal.
    /// The normal need not be unit length.
    pub const fn with_normal(
        start: Point3<Real>,
        end: Point3<Real>,
        normal: Vector3<Real>,
    ) -> Self {
        Edge {
            start,
            end,
            normal: Some(normal),
        }
    }

    /// Vector from `start` to `end`.
    pub fn vector(&self) -> Vector3<Real> {
        self.end - self.start
    }

    pub fn length(&self) -> Real {
        self.vector().norm()
    }

    /// Unit direction from `start` to `end`, or `None` for an edge no longer
    /// than [`tolerance`].
    pub fn tangent(&self) -> Option<Vector3<Real>> {
        self.vector().try_normalize(tolerance())
    }

    pub fn midpoint(&self) -> Point3<Real> {
        self.start + self.vector() * 0.5
    }

    /// The normal used to orient rivets on this edge.
    ///
    /// The face normal when the edge borders a face, otherwise +Z, or +Y for
    /// edges that run along Z.
    pub fn frame_normal(&self) -> Vector3<Real> {
        if let Some(normal) = self.normal {
            return normal;
        }
        match self.tangent() {
            Some(t) if t.z.abs() > 1.0 - tolerance().sqrt() => Vector3::y(),
            _ => Vector3::z(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn length_tangent_and_midpoint() {
        let edge = Edge::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 6.0, 3.0));
        assert_relative_eq!(edge.length(), 5.0);
        assert_relative_eq!(edge.tangent().unwrap(), Vector3::new(0.6, 0.8, 0.0));
        assert_relative_eq!(edge.midpoint(), Point3::new(2.5, 4.0, 3.0));
    }

    #[test]
    fn zero_length_edge_has_no_tangent() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let edge = Edge::new(p, p);
        assert_eq!(edge.length(), 0.0);
        assert!(edge.tangent().is_none());
    }

    #[test]
    fn default_normal_avoids_tangent() {
        let flat = Edge::new(Point3::origin(), Point3::new(1.0, 0.0, 0.0));
        assert_eq!(flat.frame_normal(), Vector3::z());

        let vertical = Edge::new(Point3::origin(), Point3::new(0.0, 0.0, -2.0));
        assert_eq!(vertical.frame_normal(), Vector3::y());

        let faced = Edge::with_normal(Point3::origin(), Point3::new(0.0, 0.0, 1.0), Vector3::x());
        assert_eq!(faced.frame_normal(), Vector3::x());
    }
}
