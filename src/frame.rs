//! Orthonormal frames that orient each rivet on its edge.

use crate::float_types::{Real, tolerance};
use nalgebra::{Matrix3, Rotation3, Vector3};

/// Build the rivet rotation for an edge `tangent` and surface `normal`.
///
/// * `Z` – the normalized surface normal
/// * `X` – `tangent × Z`, normalized
/// * `Y` – `Z × X`
///
/// The returned rotation has columns `(X, Y, Z)`, so a copy's local +Z ends up
/// along the surface normal. Neither input needs to be unit length.
///
/// Returns `None` when the normal is (near) zero or parallel to the tangent,
/// since no frame is defined in that case.
pub fn rivet_frame(tangent: &Vector3<Real>, normal: &Vector3<Real>) -> Option<Rotation3<Real>> {
    let z_axis = normal.try_normalize(tolerance())?;
    let x_axis = tangent.cross(&z_axis).try_normalize(tolerance())?;
    let y_axis = z_axis.cross(&x_axis);

    Some(Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[
        x_axis, y_axis, z_axis,
    ])))
}

/// Checks that the columns of `rotation` are unit length and mutually
/// perpendicular within `eps`.
pub fn is_orthonormal(rotation: &Rotation3<Real>, eps: Real) -> bool {
    let m = rotation.matrix();
    let (x, y, z) = (m.column(0), m.column(1), m.column(2));

    (x.norm() - 1.0).abs() < eps
        && (y.norm() - 1.0).abs() < eps
        && (z.norm() - 1.0).abs() < eps
        && x.dot(&y).abs() < eps
        && y.dot(&z).abs() < eps
        && z.dot(&x).abs() < eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn frame_for_x_edge_on_xy_face() {
        let rot = rivet_frame(&Vector3::x(), &Vector3::z()).unwrap();
        // X = x × z = -y, Y = z × -y = x
        assert_relative_eq!(rot * Vector3::x(), -Vector3::y());
        assert_relative_eq!(rot * Vector3::y(), Vector3::x());
        assert_relative_eq!(rot * Vector3::z(), Vector3::z());
        assert_relative_eq!(rot.matrix().determinant(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn frame_is_orthonormal_for_skewed_normal() {
        let tangent = Vector3::new(1.0, 2.0, 0.5);
        let normal = Vector3::new(0.3, -0.1, 4.0);
        let rot = rivet_frame(&tangent, &normal).unwrap();
        assert!(is_orthonormal(&rot, 1e-9));
        assert_relative_eq!(rot * Vector3::z(), normal.normalize(), epsilon = 1e-9);
    }

    #[test]
    fn parallel_or_zero_normal_has_no_frame() {
        assert!(rivet_frame(&Vector3::x(), &Vector3::new(2.0, 0.0, 0.0)).is_none());
        assert!(rivet_frame(&Vector3::x(), &Vector3::zeros()).is_none());
    }
}
